//! # 批量执行器
//!
//! 并行执行批量处理任务，单个文件失败不影响其他文件。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! 每个输入文件写入各自独立的输出路径，因此文件之间无需加锁。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `commands/label.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, Vasp2mlError};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功（附带的说明用于汇总，例如写出的结构数）
    Success(String),
    /// 跳过（如已提取过）
    Skipped(String, String), // (文件路径, 原因)
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

impl ProcessResult {
    /// 将处理函数的返回值转为结果，错误信息带上文件路径
    pub fn from_result(path: &str, result: Result<ProcessResult>) -> Self {
        result.unwrap_or_else(|e| ProcessResult::Failed(path.to_string(), e.to_string()))
    }
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功说明
    pub notes: Vec<String>,
    /// 跳过详情
    pub skips: Vec<(String, String)>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(note) => {
                self.success += 1;
                self.notes.push(note);
            }
            ProcessResult::Skipped(path, reason) => {
                self.skipped += 1;
                self.skips.push((path, reason));
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }

    /// 没有任何文件成功（或已完成而跳过）时报错
    pub fn ensure_progress(&self) -> Result<()> {
        if self.success + self.skipped == 0 {
            return Err(Vasp2mlError::NothingProcessed {
                failed: self.failed,
            });
        }
        Ok(())
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表，结果按输入顺序汇总
    pub fn run<F>(&self, files: Vec<PathBuf>, message: &str, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, message);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| Vasp2mlError::InvalidArgument(format!("thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    if let ProcessResult::Failed(path, err) = &result {
                        pb.suspend(|| output::print_error(&format!("{}: {}", path, err)));
                    }
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}
