//! # 文件收集器
//!
//! 根据输入目录和模式收集待处理文件（或子目录）列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔的多模式）
//! - 递归目录搜索
//! - 结果按路径排序，保证批处理顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `commands/dataset.rs`, `commands/label.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, Vasp2mlError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 收集目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Files,
    Dirs,
}

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
    target: Target,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            patterns: vec!["*".to_string()],
            recursive: false,
            target: Target::Files,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集子目录而不是文件
    pub fn directories(mut self) -> Self {
        self.target = Target::Dirs;
        self
    }

    /// 收集所有匹配项
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    Vasp2mlError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if self.input.is_file() {
            return Ok(match self.target {
                Target::Files => vec![self.input.clone()],
                Target::Dirs => vec![],
            });
        }

        if !self.input.is_dir() {
            return Err(Vasp2mlError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut found: Vec<PathBuf> = WalkDir::new(&self.input)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| match self.target {
                Target::Files => e.file_type().is_file(),
                Target::Dirs => e.file_type().is_dir(),
            })
            .filter(|entry| Self::matches_patterns(&patterns, entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        found.sort();
        Ok(found)
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(patterns: &[Pattern], path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        patterns.iter().any(|p| p.matches(filename))
    }
}
