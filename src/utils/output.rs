//! # 美化输出工具
//!
//! 提供统一的终端输出样式与批处理汇总。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored`, `tabled` crate

use crate::batch::BatchResult;

use colored::Colorize;
use tabled::{Table, Tabled};

/// 汇总表中的一行
#[derive(Debug, Clone, Tabled)]
struct IssueRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印批处理汇总：计数 + 跳过/失败明细表
pub fn print_summary(what: &str, batch: &BatchResult) {
    let rows: Vec<IssueRow> = batch
        .skips
        .iter()
        .map(|(file, reason)| IssueRow {
            file: file.clone(),
            status: "skipped".to_string(),
            reason: reason.clone(),
        })
        .chain(batch.failures.iter().map(|(file, reason)| IssueRow {
            file: file.clone(),
            status: "failed".to_string(),
            reason: reason.clone(),
        }))
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }

    let msg = format!(
        "{}: {} processed, {} skipped, {} failed (of {})",
        what,
        batch.success,
        batch.skipped,
        batch.failed,
        batch.total()
    );
    if batch.failed == 0 {
        print_done(&msg);
    } else {
        print_warning(&msg);
    }
}
