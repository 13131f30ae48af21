//! # 运行配置
//!
//! 由命令行参数构造，显式传给各命令，不依赖当前工作目录。
//!
//! ## 依赖关系
//! - 被 `cli/` 构造，被 `commands/` 使用

use crate::error::{Result, Vasp2mlError};
use std::fs;
use std::path::PathBuf;

/// 输入/输出目录与并行设置
#[derive(Debug, Clone)]
pub struct Config {
    /// 存放 OUTCAR_/OSZICAR_/POSCAR_ 文件的目录
    pub input_dir: PathBuf,
    /// 输出根目录
    pub output_dir: PathBuf,
    /// 并行作业数（0 = 自动）
    pub jobs: usize,
    /// 覆盖已有输出
    pub overwrite: bool,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Config {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            jobs: 0,
            overwrite: false,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// 检查输入目录存在，并创建输出目录
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(Vasp2mlError::DirectoryNotFound {
                path: self.input_dir.display().to_string(),
            });
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| Vasp2mlError::FileWriteError {
            path: self.output_dir.display().to_string(),
            source: e,
        })
    }
}
