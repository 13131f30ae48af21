//! # run 子命令 CLI 定义
//!
//! 一次完成 extract → label → dataset。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory containing OUTCAR_, OSZICAR_ and POSCAR_ files
    #[arg(short, long, env = "VASP2ML_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output root (structures/, *_id_prop.csv, data.csv)
    #[arg(short, long, env = "VASP2ML_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite previous results instead of skipping/appending
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

impl RunArgs {
    pub fn config(&self) -> Config {
        Config::new(&self.input_dir, &self.output_dir)
            .with_jobs(self.jobs)
            .with_overwrite(self.overwrite)
    }
}
