//! # 快照数据模型
//!
//! OUTCAR 中一个离子步的坐标块，以及与之配套的 POSCAR 头部模板。
//!
//! ## 依赖关系
//! - 被 `parsers/outcar.rs`, `parsers/poscar.rs`, `parsers/naming.rs` 使用
//! - 被 `commands/extract.rs` 使用

/// POSCAR 头部的行数（注释、缩放、三行晶格、元素、数目）
pub const TEMPLATE_LINES: usize = 7;

/// 一个离子步的坐标快照
///
/// `rows` 借用自整个 OUTCAR 的行缓冲，恰好 N 行，
/// 每行为 `x y z fx fy fz`，保留原始的列间空白。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    /// 文件内序号，从 1 开始
    pub index: usize,
    /// 块头所在行号（1-based）
    pub line: usize,
    /// 数据行
    pub rows: &'a [&'a str],
}

impl Snapshot<'_> {
    /// 原子数
    pub fn num_atoms(&self) -> usize {
        self.rows.len()
    }
}

/// POSCAR 头部模板（前 7 行），同一 OUTCAR 的所有快照共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureTemplate {
    lines: Vec<String>,
}

impl StructureTemplate {
    pub(crate) fn new(lines: Vec<String>) -> Self {
        debug_assert_eq!(lines.len(), TEMPLATE_LINES);
        StructureTemplate { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// 输入文件类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileKind {
    Outcar,
    Oszicar,
    Poscar,
    Other(String),
}

impl From<&str> for FileKind {
    fn from(s: &str) -> Self {
        match s {
            "OUTCAR" => FileKind::Outcar,
            "OSZICAR" => FileKind::Oszicar,
            "POSCAR" => FileKind::Poscar,
            other => FileKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Outcar => write!(f, "OUTCAR"),
            FileKind::Oszicar => write!(f, "OSZICAR"),
            FileKind::Poscar => write!(f, "POSCAR"),
            FileKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// 从 `<kind>_<molecule>_<site>` 文件名解出的标识
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub kind: FileKind,
    pub molecule: String,
    pub site: String,
}

impl Identifier {
    /// 同一 (molecule, site) 下另一类型文件的名字
    pub fn sibling(&self, kind: FileKind) -> String {
        format!("{}_{}_{}", kind, self.molecule, self.site)
    }

    /// 用于 id_prop.csv 命名的 `<molecule>_<site>`
    pub fn pair(&self) -> String {
        format!("{}_{}", self.molecule, self.site)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.kind, self.molecule, self.site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_sibling() {
        let id = Identifier {
            kind: FileKind::Outcar,
            molecule: "H2O".to_string(),
            site: "Site3".to_string(),
        };
        assert_eq!(id.sibling(FileKind::Poscar), "POSCAR_H2O_Site3");
        assert_eq!(id.sibling(FileKind::Oszicar), "OSZICAR_H2O_Site3");
        assert_eq!(id.pair(), "H2O_Site3");
        assert_eq!(id.to_string(), "OUTCAR_H2O_Site3");
    }

    #[test]
    fn test_file_kind_roundtrip_other() {
        assert_eq!(FileKind::from("CONTCAR"), FileKind::Other("CONTCAR".to_string()));
        assert_eq!(FileKind::from("CONTCAR").to_string(), "CONTCAR");
    }
}
