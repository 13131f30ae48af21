//! # extract 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Directory containing OUTCAR_<mol>_<site> and POSCAR_<mol>_<site> files
    #[arg(short, long, env = "VASP2ML_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving one POSCAR_<mol>_<site>/ folder per OUTCAR
    #[arg(short, long, env = "VASP2ML_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Re-extract OUTCARs whose output folder already holds snapshots
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

impl ExtractArgs {
    pub fn config(&self) -> Config {
        Config::new(&self.input_dir, &self.output_dir)
            .with_jobs(self.jobs)
            .with_overwrite(self.overwrite)
    }
}
