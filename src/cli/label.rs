//! # label 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/label.rs`

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

/// label 子命令参数
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Directory containing OSZICAR_<mol>_<site> files
    #[arg(short, long, env = "VASP2ML_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory holding the extracted POSCAR_<mol>_<site>/ folders
    #[arg(short, long, env = "VASP2ML_STRUCTURES_DIR")]
    pub structures_dir: PathBuf,

    /// Directory receiving <mol>_<site>_id_prop.csv files
    #[arg(short, long, env = "VASP2ML_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Truncate existing id_prop files instead of appending
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

impl LabelArgs {
    pub fn config(&self) -> Config {
        Config::new(&self.input_dir, &self.output_dir).with_overwrite(self.overwrite)
    }
}
