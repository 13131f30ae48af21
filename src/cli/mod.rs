//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract`: 从 OUTCAR 切出每个离子步的 POSCAR
//! - `dataset`: 汇总结构文件为 CSV 数据集
//! - `label`: 从 OSZICAR 生成 (结构, 能量) 标签表
//! - `run`: 依次执行以上三步
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, dataset, label, run

pub mod dataset;
pub mod extract;
pub mod label;
pub mod run;

use clap::{Parser, Subcommand};

/// vasp2ml - VASP 结构优化轨迹转机器学习数据集
#[derive(Parser)]
#[command(name = "vasp2ml")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Turn VASP geometry optimizations into machine-learning datasets",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Split every OUTCAR_<mol>_<site> into one POSCAR per ionic step
    Extract(extract::ExtractArgs),

    /// Collect extracted POSCAR files into a single-column structure CSV
    Dataset(dataset::DatasetArgs),

    /// Pair extracted structures with OSZICAR energies (<mol>_<site>_id_prop.csv)
    Label(label::LabelArgs),

    /// Run extract, label and dataset in sequence
    Run(run::RunArgs),
}
