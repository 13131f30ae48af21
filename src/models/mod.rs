//! # 数据模型模块
//!
//! 定义快照、结构模板、文件名标识和数据集记录。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: snapshot, dataset

pub mod dataset;
pub mod snapshot;

pub use dataset::{LabelRecord, StructureRecord};
pub use snapshot::{FileKind, Identifier, Snapshot, StructureTemplate};
