//! # 解析器模块
//!
//! VASP 输出文件的读取与快照结构文件的写出。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: outcar, oszicar, poscar, naming

pub mod naming;
pub mod oszicar;
pub mod outcar;
pub mod poscar;
