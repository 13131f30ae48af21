//! # VASP OUTCAR 几何解析器
//!
//! 从 OUTCAR 中切出每个离子步的 `POSITION / TOTAL-FORCE` 坐标块。
//!
//! ## OUTCAR 坐标块
//! ```text
//!  POSITION                                       TOTAL-FORCE (eV/Angst)
//!  -----------------------------------------------------------------------------------
//!       0.00000      0.00000      0.00000         0.000000      0.000000      0.000000
//!       ...                                                                  (N 行)
//!  -----------------------------------------------------------------------------------
//!     total drift:  ...
//! ```
//!
//! 解析分两步：
//! 1. [`infer_atom_count`] 只看第一个块，数到分隔线为止得到 N；
//! 2. [`SnapshotExtractor`] 重新扫描全部块头，每个块头之后跳过一行，取 N 行。
//!
//! 所有越界访问都经过 `Lines::get`，越界即 `MalformedInput`。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/snapshot.rs`

use crate::error::{Result, Vasp2mlError};
use crate::models::Snapshot;
use std::fs;
use std::path::Path;

/// 坐标块头（去除全部空白后）
pub const HEADER_TOKEN: &str = "POSITIONTOTAL-FORCE(eV/Angst)";

/// 分隔线宽度（去除全部空白后的 `-` 个数）
pub const SEPARATOR_WIDTH: usize = 83;

/// 块头到第一行数据的距离（中间隔一条分隔线）
const FIRST_ROW_OFFSET: usize = 2;

/// 去除一行中的全部空白字符（不仅是首尾）
pub fn normalize(line: &str) -> String {
    line.split_whitespace().collect()
}

/// 是否为坐标块头
pub fn is_header(line: &str) -> bool {
    normalize(line) == HEADER_TOKEN
}

/// 是否为块结尾的分隔线
pub fn is_separator(line: &str) -> bool {
    let norm = normalize(line);
    norm.len() == SEPARATOR_WIDTH && norm.bytes().all(|b| b == b'-')
}

/// 整个 OUTCAR 的行缓冲，每行已去除首尾空白
#[derive(Debug)]
pub struct Lines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Lines<'a> {
    pub fn new(content: &'a str) -> Self {
        Lines {
            lines: content.lines().map(str::trim).collect(),
        }
    }

    fn len(&self) -> usize {
        self.lines.len()
    }

    /// 带边界检查的取行；`header` 为报错时引用的块头下标
    fn get(&self, offset: usize, header: usize, what: &str) -> Result<&'a str> {
        self.lines.get(offset).copied().ok_or_else(|| {
            Vasp2mlError::malformed(
                header + 1,
                format!("end of file reached while looking for {}", what),
            )
        })
    }

    /// 所有块头的下标，按文件顺序
    fn headers(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_header(line))
            .map(|(i, _)| i)
    }
}

/// 由第一个坐标块推断原子数 N
///
/// 没有块头时返回 0（表示没有快照）。块头存在但分隔线缺失，
/// 或块内没有任何数据行，都视为格式错误。
pub fn infer_atom_count(lines: &Lines<'_>) -> Result<usize> {
    let header = match lines.headers().next() {
        Some(h) => h,
        None => return Ok(0),
    };

    let mut offset = header + FIRST_ROW_OFFSET;
    let mut count = 0;
    while !is_separator(lines.get(offset, header, "the closing separator")?) {
        count += 1;
        offset += 1;
    }

    if count == 0 {
        return Err(Vasp2mlError::malformed(
            header + 1,
            "coordinate block has no rows",
        ));
    }

    Ok(count)
}

/// 按文件顺序逐个切出快照
///
/// 纯函数式迭代：同一份行缓冲、同一个 N 总是得到相同的序列。
/// 遇到第一个错误后迭代结束。
pub struct SnapshotExtractor<'l, 'a> {
    lines: &'l Lines<'a>,
    num_atoms: usize,
    cursor: usize,
    next_index: usize,
    failed: bool,
}

impl<'l, 'a> SnapshotExtractor<'l, 'a> {
    pub fn new(lines: &'l Lines<'a>, num_atoms: usize) -> Self {
        SnapshotExtractor {
            lines,
            num_atoms,
            cursor: 0,
            next_index: 1,
            failed: false,
        }
    }

    fn slice(&self, header: usize) -> Result<Snapshot<'l>> {
        let n = self.num_atoms;
        let start = header + FIRST_ROW_OFFSET;
        let end = start + n;
        let available = self.lines.len().saturating_sub(start);

        if available < n {
            return Err(Vasp2mlError::malformed(
                header + 1,
                format!(
                    "block {} expects {} rows but only {} remain ({} short)",
                    self.next_index,
                    n,
                    available,
                    n - available
                ),
            ));
        }

        let lines = self.lines;
        let rows = &lines.lines[start..end];
        if let Some(pos) = rows.iter().position(|r| is_separator(r)) {
            return Err(Vasp2mlError::malformed(
                header + 1,
                format!(
                    "block {} has {} rows, expected {}",
                    self.next_index, pos, n
                ),
            ));
        }
        if end < lines.len() && !is_separator(lines.get(end, header, "separator")?) {
            return Err(Vasp2mlError::malformed(
                header + 1,
                format!(
                    "block {} has more than {} rows (line {} is not a separator)",
                    self.next_index,
                    n,
                    end + 1
                ),
            ));
        }

        Ok(Snapshot {
            index: self.next_index,
            line: header + 1,
            rows,
        })
    }
}

impl<'l, 'a> Iterator for SnapshotExtractor<'l, 'a> {
    type Item = Result<Snapshot<'l>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.num_atoms == 0 {
            return None;
        }

        let lines = self.lines;
        let header = (self.cursor..lines.len()).find(|&i| is_header(lines.lines[i]))?;
        self.cursor = header + 1;

        match self.slice(header) {
            Ok(snapshot) => {
                self.next_index += 1;
                Some(Ok(snapshot))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// 推断 N 并收集全部快照
pub fn parse_snapshots<'l>(lines: &'l Lines<'_>) -> Result<Vec<Snapshot<'l>>> {
    let n = infer_atom_count(lines)?;
    SnapshotExtractor::new(lines, n).collect()
}

/// 读取 OUTCAR 文件内容
pub fn read_outcar(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Vasp2mlError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
