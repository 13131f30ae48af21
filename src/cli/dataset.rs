//! # dataset 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/dataset.rs`

use clap::Args;
use std::path::PathBuf;

/// dataset 子命令参数
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Directory holding extracted POSCAR_<mol>_<site>_<i> files (searched recursively)
    #[arg(short, long, env = "VASP2ML_STRUCTURES_DIR")]
    pub structures_dir: PathBuf,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,
}
