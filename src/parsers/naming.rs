//! # 文件命名约定
//!
//! 输入文件统一命名为 `<kind>_<molecule>_<site>`，例如 `OUTCAR_H2O_Site3`；
//! 快照目录为 `POSCAR_<molecule>_<site>`，快照文件为 `POSCAR_<molecule>_<site>_<i>`。
//!
//! ## 依赖关系
//! - 被 `parsers/poscar.rs` 与 `commands/` 使用
//! - 使用 `models/snapshot.rs`

use crate::error::{Result, Vasp2mlError};
use crate::models::{FileKind, Identifier};
use regex::Regex;
use std::sync::OnceLock;

/// 文件名分隔符
pub const DELIMITER: char = '_';

/// 解析 `<kind>_<molecule>_<site>`，必须恰好三段且均非空
pub fn decode_name(name: &str) -> Result<Identifier> {
    let parts: Vec<&str> = name.split(DELIMITER).collect();

    if parts.len() != 3 {
        return Err(Vasp2mlError::FilenameDecode {
            name: name.to_string(),
            reason: format!(
                "expected 3 '{}'-separated components, found {}",
                DELIMITER,
                parts.len()
            ),
        });
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Vasp2mlError::FilenameDecode {
            name: name.to_string(),
            reason: "empty component".to_string(),
        });
    }

    Ok(Identifier {
        kind: FileKind::from(parts[0]),
        molecule: parts[1].to_string(),
        site: parts[2].to_string(),
    })
}

/// 快照输出目录名
pub fn snapshot_dir_name(id: &Identifier) -> String {
    id.sibling(FileKind::Poscar)
}

/// 快照文件名
pub fn snapshot_file_name(id: &Identifier, index: usize) -> String {
    format!("{}{}{}", snapshot_dir_name(id), DELIMITER, index)
}

fn snapshot_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^POSCAR_([^_]+)_([^_]+)_(\d+)$").expect("snapshot name pattern is valid")
    })
}

/// 解析快照文件名，返回 (标识, 序号)；不是快照文件时返回 `None`
pub fn parse_snapshot_name(name: &str) -> Option<(Identifier, usize)> {
    let caps = snapshot_name_pattern().captures(name)?;
    let index = caps[3].parse().ok()?;
    Some((
        Identifier {
            kind: FileKind::Poscar,
            molecule: caps[1].to_string(),
            site: caps[2].to_string(),
        },
        index,
    ))
}

/// 文件名最后一个 `_` 之后的整数
pub fn numeric_suffix(name: &str) -> Result<u64> {
    let tail = name.rsplit(DELIMITER).next().unwrap_or(name);
    tail.parse().map_err(|_| Vasp2mlError::FilenameDecode {
        name: name.to_string(),
        reason: format!("'{}' is not a numeric suffix", tail),
    })
}

/// 按数字后缀排序（而不是字典序）
///
/// 任何一个文件名没有数字后缀都会整体报错，调用方据此跳过这一组。
pub fn sort_by_numeric_suffix(names: Vec<String>) -> Result<Vec<String>> {
    let mut keyed = names
        .into_iter()
        .map(|n| numeric_suffix(&n).map(|k| (k, n)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, n)| n).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_name() {
        let id = decode_name("OUTCAR_H2O_Site3").unwrap();
        assert_eq!(id.kind, FileKind::Outcar);
        assert_eq!(id.molecule, "H2O");
        assert_eq!(id.site, "Site3");
        assert_eq!(id.to_string(), "OUTCAR_H2O_Site3");
    }

    #[test]
    fn test_decode_name_errors() {
        assert!(matches!(
            decode_name("bad-name"),
            Err(Vasp2mlError::FilenameDecode { .. })
        ));
        assert!(decode_name("OUTCAR_H2O_Site_3").is_err());
        assert!(decode_name("OUTCAR__Site3").is_err());
    }

    #[test]
    fn test_snapshot_names() {
        let id = decode_name("OUTCAR_CO_Bridge").unwrap();
        assert_eq!(snapshot_dir_name(&id), "POSCAR_CO_Bridge");
        assert_eq!(snapshot_file_name(&id, 12), "POSCAR_CO_Bridge_12");

        let (parsed, index) = parse_snapshot_name("POSCAR_CO_Bridge_12").unwrap();
        assert_eq!(parsed.molecule, "CO");
        assert_eq!(parsed.site, "Bridge");
        assert_eq!(index, 12);

        assert!(parse_snapshot_name("POSCAR_CO_Bridge").is_none());
        assert!(parse_snapshot_name("POSCAR_CO_Bridge_x").is_none());
        assert!(parse_snapshot_name("data.csv").is_none());
    }

    #[test]
    fn test_sort_by_numeric_suffix() {
        let names = vec![
            "POSCAR_1".to_string(),
            "POSCAR_10".to_string(),
            "POSCAR_2".to_string(),
        ];
        assert_eq!(
            sort_by_numeric_suffix(names).unwrap(),
            vec!["POSCAR_1", "POSCAR_2", "POSCAR_10"]
        );
    }

    #[test]
    fn test_sort_rejects_malformed_suffix() {
        let names = vec!["POSCAR_A_B_2".to_string(), "POSCAR_A_B_x".to_string()];
        let err = sort_by_numeric_suffix(names).unwrap_err();
        assert!(err.to_string().contains("POSCAR_A_B_x"));
    }
}
