//! # VASP OSZICAR 能量提取
//!
//! 以两个空格开头的行按空白切分，取第 5 列作为该离子步的能量；
//! 电子步表头（`N E dE d eps ...`）的第 5 列是 `eps`，直接丢弃。
//!
//! ```text
//!        N       E                     dE             d eps       ncg     rms          rms(c)
//! DAV:   1    -0.108316784531E+02   -0.10832E+02   -0.18224E+03   480   0.323E+02
//!    1 F= -.10500000E+02 E0= -.10400000E+02  d E =-.105000E+02
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/label.rs` 使用

use crate::error::{Result, Vasp2mlError};
use std::fs;
use std::path::Path;

/// 只处理以此开头的行
const LINE_PREFIX: &str = "  ";

/// 能量所在列（0-based）
const ENERGY_COLUMN: usize = 4;

/// 表头中对应列的占位符
const PLACEHOLDER: &str = "eps";

/// 按文件顺序提取能量字符串
///
/// 返回原始文本（例如 `-.10400000E+02`），但每个值都必须能解析为 `f64`。
pub fn scrape_energies(content: &str) -> Result<Vec<String>> {
    let mut energies = Vec::new();

    for (i, line) in content.lines().enumerate() {
        if !line.starts_with(LINE_PREFIX) {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let token = parts.get(ENERGY_COLUMN).ok_or_else(|| {
            Vasp2mlError::malformed(
                i + 1,
                format!(
                    "expected at least {} columns, found {}",
                    ENERGY_COLUMN + 1,
                    parts.len()
                ),
            )
        })?;

        if *token == PLACEHOLDER {
            continue;
        }

        if token.parse::<f64>().is_err() {
            return Err(Vasp2mlError::NumericParse {
                path: String::new(),
                line: i + 1,
                token: token.to_string(),
            });
        }

        energies.push(token.to_string());
    }

    Ok(energies)
}

/// 读取 OSZICAR 文件并提取能量
pub fn read_energies(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Vasp2mlError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    scrape_energies(&content).map_err(|e| e.with_path(path))
}
