//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `batch/`, `utils/`
//! - 子模块: extract, dataset, label, run

pub mod dataset;
pub mod extract;
pub mod label;
pub mod run;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Extract(args) => extract::execute(args),
        Commands::Dataset(args) => dataset::execute(args),
        Commands::Label(args) => label::execute(args),
        Commands::Run(args) => run::execute(args),
    }
}
