//! # vasp2ml - VASP 结构优化轨迹转机器学习数据集
//!
//! 把 OUTCAR 中每个离子步的坐标拆成独立的 POSCAR，
//! 再与 OSZICAR 中的能量配对，输出可直接用于训练的 CSV。
//!
//! ## 子命令
//! - `extract` - 从 OUTCAR 切出逐离子步 POSCAR
//! - `label`   - 从 OSZICAR 生成 (结构, 能量) 标签表
//! - `dataset` - 汇总结构为单列 CSV
//! - `run`     - 依次执行以上三步
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config.rs   (输入/输出目录配置)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (OUTCAR/OSZICAR/POSCAR 解析与写出)
//!   │     ├── batch/     (文件收集与并行执行)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
