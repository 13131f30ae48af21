//! # VASP POSCAR 模板与快照写出
//!
//! 读取配套 POSCAR 的前 7 行作为头部模板，并把每个快照写成独立的 POSCAR。
//!
//! ## 输出格式
//! ```text
//! Comment line           # 模板第 1 行
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols
//! n1 n2 ...              # number of atoms per element
//! Cartesian
//! x y z fx fy fz         # OUTCAR 数据行，原样写出
//! ...
//! ```
//!
//! 模板内容不做任何校验；数据行中的力分量保留，与 OUTCAR 一致。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/snapshot.rs`, `parsers/naming.rs`

use crate::error::{Result, Vasp2mlError};
use crate::models::snapshot::TEMPLATE_LINES;
use crate::models::{Identifier, Snapshot, StructureTemplate};
use crate::parsers::naming;
use std::fs;
use std::path::{Path, PathBuf};

/// 坐标类型标记行
pub const COORDINATE_MODE: &str = "Cartesian";

/// 从 POSCAR 内容中取前 7 行作为模板
pub fn read_template(content: &str) -> Result<StructureTemplate> {
    let lines: Vec<String> = content
        .lines()
        .take(TEMPLATE_LINES)
        .map(|l| l.to_string())
        .collect();

    if lines.len() < TEMPLATE_LINES {
        return Err(Vasp2mlError::malformed(
            lines.len(),
            format!(
                "structure template needs {} lines, found {}",
                TEMPLATE_LINES,
                lines.len()
            ),
        ));
    }

    Ok(StructureTemplate::new(lines))
}

/// 读取 POSCAR 模板文件
pub fn read_template_file(path: &Path) -> Result<StructureTemplate> {
    if !path.is_file() {
        return Err(Vasp2mlError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| Vasp2mlError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    read_template(&content).map_err(|e| e.with_path(path))
}

/// 模板 + `Cartesian` + 快照数据行
pub fn to_poscar_string(template: &StructureTemplate, snapshot: &Snapshot<'_>) -> String {
    let mut result = String::new();

    for line in template.lines() {
        result.push_str(line);
        result.push('\n');
    }

    result.push_str(COORDINATE_MODE);
    result.push('\n');

    for row in snapshot.rows {
        result.push_str(row);
        result.push('\n');
    }

    result
}

/// 将一个快照写入 `dir/POSCAR_<mol>_<site>_<i>`
///
/// 总是新建或截断目标文件，重复运行不会追加重复内容。
pub fn write_snapshot(
    dir: &Path,
    id: &Identifier,
    template: &StructureTemplate,
    snapshot: &Snapshot<'_>,
) -> Result<PathBuf> {
    let path = dir.join(naming::snapshot_file_name(id, snapshot.index));
    fs::write(&path, to_poscar_string(template, snapshot)).map_err(|e| {
        Vasp2mlError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        }
    })?;
    Ok(path)
}
