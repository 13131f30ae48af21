//! # 统一错误处理模块
//!
//! 定义 vasp2ml 的所有错误类型，使用 `thiserror` 派生。
//!
//! 解析器只处理内存中的文本，返回不带路径的错误；
//! 读文件的包装函数再通过 [`Vasp2mlError::with_path`] 补上文件路径。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// vasp2ml 统一错误类型
#[derive(Error, Debug)]
pub enum Vasp2mlError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed input in {path} at line {line}: {reason}")]
    MalformedInput {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Cannot decode file name '{name}': {reason}")]
    FilenameDecode { name: String, reason: String },

    #[error("Not a number in {path} at line {line}: '{token}'")]
    NumericParse {
        path: String,
        line: usize,
        token: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 数据集错误
    // ─────────────────────────────────────────────────────────────
    #[error("{structures} structures but {energies} energies in {path}")]
    LabelMismatch {
        structures: usize,
        energies: usize,
        path: String,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数 / 批处理错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No file was processed successfully ({failed} failed)")]
    NothingProcessed { failed: usize },
}

impl Vasp2mlError {
    /// 构造不带路径的格式错误，由调用方补充路径
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Vasp2mlError::MalformedInput {
            path: String::new(),
            line,
            reason: reason.into(),
        }
    }

    /// 为解析错误补上文件路径
    pub fn with_path(self, path: &std::path::Path) -> Self {
        let shown = path.display().to_string();
        match self {
            Vasp2mlError::MalformedInput { line, reason, .. } => Vasp2mlError::MalformedInput {
                path: shown,
                line,
                reason,
            },
            Vasp2mlError::NumericParse { line, token, .. } => Vasp2mlError::NumericParse {
                path: shown,
                line,
                token,
            },
            Vasp2mlError::LabelMismatch {
                structures,
                energies,
                ..
            } => Vasp2mlError::LabelMismatch {
                structures,
                energies,
                path: shown,
            },
            other => other,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, Vasp2mlError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_with_path_fills_malformed() {
        let err = Vasp2mlError::malformed(12, "separator not found").with_path(Path::new("OUTCAR_A_B"));
        assert_eq!(
            err.to_string(),
            "Malformed input in OUTCAR_A_B at line 12: separator not found"
        );
    }

    #[test]
    fn test_with_path_keeps_other_errors() {
        let err = Vasp2mlError::InvalidArgument("x".to_string()).with_path(Path::new("a"));
        assert!(matches!(err, Vasp2mlError::InvalidArgument(_)));
    }
}
