//! # dataset 命令实现
//!
//! 把提取出的全部快照结构汇总为单列 CSV（列名 `structure`），
//! 每个单元格是一个 POSCAR 文件的完整内容。
//!
//! ## 依赖关系
//! - 使用 `cli/dataset.rs` 定义的参数
//! - 使用 `parsers/naming.rs`, `models/dataset.rs`
//! - 使用 `batch/collector.rs`, `utils/output.rs`

use crate::batch::{BatchResult, FileCollector, ProcessResult};
use crate::cli::dataset::DatasetArgs;
use crate::error::{Result, Vasp2mlError};
use crate::models::StructureRecord;
use crate::parsers::naming;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 结构数据集唯一的列名
const STRUCTURE_COLUMN: &str = "structure";

/// 执行 dataset 命令
pub fn execute(args: DatasetArgs) -> Result<()> {
    output::print_header("Building Structure Dataset");

    let batch = build_dataset(&args.structures_dir, &args.output)?;
    output::print_summary("dataset", &batch);
    batch.ensure_progress()?;

    output::print_done(&format!(
        "Wrote {} structures to '{}'",
        batch.success,
        args.output.display()
    ));
    Ok(())
}

/// 按 (molecule, site, index) 排序的快照文件
fn collect_snapshots(structures_dir: &Path) -> Result<Vec<PathBuf>> {
    let files = FileCollector::new(structures_dir)
        .with_pattern("POSCAR_*")
        .recursive(true)
        .collect()?;

    let mut keyed: Vec<_> = files
        .into_iter()
        .filter_map(|path| {
            let (id, index) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(naming::parse_snapshot_name)?;
            Some(((id.molecule, id.site, index), path))
        })
        .collect();

    keyed.sort();
    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

/// 写出结构数据集，返回每个文件的处理结果
pub fn build_dataset(structures_dir: &Path, output_path: &Path) -> Result<BatchResult> {
    let files = collect_snapshots(structures_dir)?;
    output::print_info(&format!(
        "Found {} structure files under {}",
        files.len(),
        structures_dir.display()
    ));

    let mut batch = BatchResult::default();
    let mut records = Vec::with_capacity(files.len());

    for path in &files {
        match fs::read_to_string(path) {
            Ok(structure) => {
                records.push(StructureRecord { structure });
                batch.merge(ProcessResult::Success(path.display().to_string()));
            }
            Err(e) => batch.merge(ProcessResult::Failed(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Vasp2mlError::FileWriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    // 表头显式写出，空数据集也有 `structure` 列
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;
    wtr.write_record([STRUCTURE_COLUMN])?;
    for record in &records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(|e| Vasp2mlError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::extract::{self, tests::input_dir};
    use crate::config::Config;

    #[test]
    fn test_build_dataset_from_extracted() {
        let input = input_dir();
        let out = tempfile::tempdir().unwrap();
        extract::extract_all(&Config::new(input.path(), out.path())).unwrap();
        // 不是快照的文件被忽略
        fs::write(out.path().join("POSCAR_H2O_Top").join("notes.txt"), "x").unwrap();

        let csv_path = out.path().join("data.csv");
        let batch = build_dataset(out.path(), &csv_path).unwrap();
        assert_eq!(batch.success, 2);

        let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(
            rdr.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["structure"]
        );
        let records: Vec<StructureRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);

        let first = fs::read_to_string(out.path().join("POSCAR_H2O_Top/POSCAR_H2O_Top_1")).unwrap();
        assert_eq!(records[0].structure, first);
        assert!(records[1].structure.contains("1.10500"));
    }

    #[test]
    fn test_snapshots_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["POSCAR_A_S_10", "POSCAR_A_S_2", "POSCAR_A_S_1"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let names: Vec<_> = collect_snapshots(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["POSCAR_A_S_1", "POSCAR_A_S_2", "POSCAR_A_S_10"]);
    }

    #[test]
    fn test_empty_dataset_reports_nothing_processed() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("data.csv");
        let batch = build_dataset(dir.path(), &csv_path).unwrap();
        assert!(batch.ensure_progress().is_err());
        assert_eq!(fs::read_to_string(&csv_path).unwrap(), "structure\n");
    }
}
