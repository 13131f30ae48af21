//! # extract 命令实现
//!
//! 把每个 `OUTCAR_<mol>_<site>` 拆成逐离子步的 POSCAR 文件。
//!
//! ## 功能
//! - 扫描输入目录并解析文件名
//! - 为每个 OUTCAR 建立 `POSCAR_<mol>_<site>/` 输出目录
//! - 读取同目录下的 `POSCAR_<mol>_<site>` 前 7 行作为模板
//! - 推断原子数、切出快照并逐个写出
//! - 已提取过的 OUTCAR 默认跳过，`--overwrite` 时在新快照解析成功后替换旧快照
//!
//! 一个 OUTCAR 的全部快照先在内存中解析完成再写文件，
//! 格式错误的 OUTCAR 不会留下半成品，也不会删掉上一次的结果；
//! 写入中途失败时已写出的快照会被删除。
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `parsers/outcar.rs`, `parsers/poscar.rs`, `parsers/naming.rs`
//! - 使用 `batch/`, `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, FileCollector, ProcessResult};
use crate::cli::extract::ExtractArgs;
use crate::config::Config;
use crate::error::{Result, Vasp2mlError};
use crate::models::{FileKind, Identifier, Snapshot, StructureTemplate};
use crate::parsers::outcar::{self, Lines};
use crate::parsers::{naming, poscar};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting Ionic Steps from OUTCAR");

    let config = args.config();
    let batch = extract_all(&config)?;

    for note in &batch.notes {
        output::print_success(note);
    }
    output::print_summary("extract", &batch);

    batch.ensure_progress()
}

/// 处理输入目录中的全部 OUTCAR
pub fn extract_all(config: &Config) -> Result<BatchResult> {
    config.validate()?;

    let files = FileCollector::new(&config.input_dir).collect()?;

    let mut rejected = BatchResult::default();
    let mut outcars = Vec::new();

    for path in files {
        let shown = path.display().to_string();
        match decode_path(&path) {
            Ok(id) if id.kind == FileKind::Outcar => match prepare_dir(config, &id) {
                Ok(_) => outcars.push(path),
                Err(e) => rejected.merge(ProcessResult::Failed(shown, e.to_string())),
            },
            // POSCAR/OSZICAR 等是配套文件
            Ok(_) => {}
            Err(e) => rejected.merge(ProcessResult::Failed(shown, e.to_string())),
        }
    }

    if outcars.is_empty() {
        output::print_warning(&format!(
            "No OUTCAR_<mol>_<site> files found in {}",
            config.input_dir.display()
        ));
    } else {
        output::print_info(&format!("Found {} OUTCAR files", outcars.len()));
    }

    let mut batch = BatchRunner::new(config.jobs).run(outcars, "Extracting", |path| {
        ProcessResult::from_result(&path.display().to_string(), extract_file(path, config))
    })?;

    for (path, reason) in rejected.failures {
        batch.merge(ProcessResult::Failed(path, reason));
    }

    Ok(batch)
}

/// 从路径中取文件名并解码
fn decode_path(path: &Path) -> Result<Identifier> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Vasp2mlError::FilenameDecode {
            name: path.display().to_string(),
            reason: "not valid UTF-8".to_string(),
        })?;
    naming::decode_name(name)
}

/// 确保输出目录存在
fn prepare_dir(config: &Config, id: &Identifier) -> Result<PathBuf> {
    let dir_name = naming::snapshot_dir_name(id);
    let dir = config.output_dir.join(&dir_name);

    if dir.is_dir() {
        output::print_info(&format!("{} already exists", dir_name));
    } else {
        fs::create_dir_all(&dir).map_err(|e| Vasp2mlError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
        output::print_info(&format!("Made a directory called {}", dir_name));
    }

    Ok(dir)
}

/// 目录中属于该 (molecule, site) 的已有快照文件
fn existing_snapshots(dir: &Path, id: &Identifier) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(vec![]);
    }

    let pattern = format!("{}_*", naming::snapshot_dir_name(id));
    let files = FileCollector::new(dir).with_pattern(&pattern).collect()?;

    Ok(files
        .into_iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .and_then(naming::parse_snapshot_name)
                .map(|(found, _)| found.molecule == id.molecule && found.site == id.site)
                .unwrap_or(false)
        })
        .collect())
}

/// 写出全部快照；任一写入失败时删除本次已写的文件
///
/// 输出目录中要么是完整的一组快照，要么没有该 OUTCAR 的快照。
fn write_all(
    dir: &Path,
    id: &Identifier,
    template: &StructureTemplate,
    snapshots: &[Snapshot<'_>],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        match poscar::write_snapshot(dir, id, template, snapshot) {
            Ok(path) => written.push(path),
            Err(e) => {
                for path in &written {
                    let _ = fs::remove_file(path);
                }
                return Err(e);
            }
        }
    }
    Ok(written)
}

/// 处理单个 OUTCAR
fn extract_file(path: &Path, config: &Config) -> Result<ProcessResult> {
    let shown = path.display().to_string();
    let id = decode_path(path)?;
    let dir = config.output_dir.join(naming::snapshot_dir_name(&id));

    let existing = existing_snapshots(&dir, &id)?;
    if !existing.is_empty() && !config.overwrite {
        return Ok(ProcessResult::Skipped(
            shown,
            format!(
                "already extracted ({} structures in {})",
                existing.len(),
                dir.display()
            ),
        ));
    }

    let template_dir = path.parent().unwrap_or(config.input_dir.as_path());
    let template = poscar::read_template_file(&template_dir.join(id.sibling(FileKind::Poscar)))?;

    let content = outcar::read_outcar(path)?;
    let lines = Lines::new(&content);
    let snapshots = outcar::parse_snapshots(&lines).map_err(|e| e.with_path(path))?;

    // 旧快照只在新快照解析成功后才清除
    for stale in &existing {
        fs::remove_file(stale).map_err(|e| Vasp2mlError::FileWriteError {
            path: stale.display().to_string(),
            source: e,
        })?;
    }

    if snapshots.is_empty() {
        return Ok(ProcessResult::Success(format!(
            "{}: no ionic steps found, 0 structures",
            id
        )));
    }

    let written = write_all(&dir, &id, &template, &snapshots)?;

    Ok(ProcessResult::Success(format!(
        "{}: {} structures x {} atoms -> {}",
        id,
        written.len(),
        snapshots[0].num_atoms(),
        dir.display()
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::parsers::outcar::tests::outcar;
    use crate::parsers::poscar::tests::TEMPLATE;

    pub(crate) const STEP1: [&str; 3] = [
        "0.00000      0.00000      0.00000         0.100000     -0.020000      0.000000",
        "1.20000      0.00000      0.00000        -0.100000      0.020000      0.000000",
        "0.00000      1.10000      0.00000         0.000000      0.000000      0.010000",
    ];
    pub(crate) const STEP2: [&str; 3] = [
        "0.01000      0.00000      0.00000         0.050000     -0.010000      0.000000",
        "1.19000      0.00000      0.00000        -0.050000      0.010000      0.000000",
        "0.00000      1.10500      0.00000         0.000000      0.000000      0.005000",
    ];

    /// 输入目录：一个两步的 OUTCAR 及其模板
    pub(crate) fn input_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("OUTCAR_H2O_Top"),
            outcar(&[STEP1.to_vec(), STEP2.to_vec()]),
        )
        .unwrap();
        fs::write(dir.path().join("POSCAR_H2O_Top"), TEMPLATE).unwrap();
        dir
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_extract_two_steps() {
        let input = input_dir();
        let out = tempfile::tempdir().unwrap();
        let config = Config::new(input.path(), out.path()).with_jobs(1);

        let batch = extract_all(&config).unwrap();
        assert_eq!(batch.success, 1);
        assert_eq!(batch.failed, 0);

        let dir = out.path().join("POSCAR_H2O_Top");
        let first = read(dir.join("POSCAR_H2O_Top_1"));
        let second = read(dir.join("POSCAR_H2O_Top_2"));
        assert!(!dir.join("POSCAR_H2O_Top_3").exists());

        let lines: Vec<&str> = first.lines().collect();
        assert_eq!(lines.len(), 7 + 1 + 3);
        assert_eq!(lines[0], "H2O on Pt(111)");
        assert_eq!(lines[7], "Cartesian");
        assert_eq!(&lines[8..], &STEP1[..]);

        let lines: Vec<&str> = second.lines().collect();
        assert_eq!(&lines[8..], &STEP2[..]);
    }

    #[test]
    fn test_extract_is_idempotent_across_fresh_outputs() {
        let input = input_dir();
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        extract_all(&Config::new(input.path(), a.path())).unwrap();
        extract_all(&Config::new(input.path(), b.path())).unwrap();

        for i in 1..=2 {
            let name = format!("POSCAR_H2O_Top/POSCAR_H2O_Top_{}", i);
            assert_eq!(
                fs::read(a.path().join(&name)).unwrap(),
                fs::read(b.path().join(&name)).unwrap()
            );
        }
    }

    #[test]
    fn test_rerun_skips_then_overwrite_clears_stale() {
        let input = input_dir();
        let out = tempfile::tempdir().unwrap();
        extract_all(&Config::new(input.path(), out.path())).unwrap();
        let dir = out.path().join("POSCAR_H2O_Top");
        let before = read(dir.join("POSCAR_H2O_Top_1"));

        let batch = extract_all(&Config::new(input.path(), out.path())).unwrap();
        assert_eq!(batch.skipped, 1);
        assert_eq!(read(dir.join("POSCAR_H2O_Top_1")), before);

        // 第二次只剩一个离子步
        fs::write(input.path().join("OUTCAR_H2O_Top"), outcar(&[STEP1.to_vec()])).unwrap();
        let config = Config::new(input.path(), out.path()).with_overwrite(true);
        let batch = extract_all(&config).unwrap();
        assert_eq!(batch.success, 1);
        assert_eq!(read(dir.join("POSCAR_H2O_Top_1")), before);
        assert!(!dir.join("POSCAR_H2O_Top_2").exists());
    }

    #[test]
    fn test_overwrite_keeps_previous_output_when_outcar_is_malformed() {
        let input = input_dir();
        let out = tempfile::tempdir().unwrap();
        extract_all(&Config::new(input.path(), out.path())).unwrap();
        let dir = out.path().join("POSCAR_H2O_Top");
        let first = read(dir.join("POSCAR_H2O_Top_1"));
        let second = read(dir.join("POSCAR_H2O_Top_2"));

        let mut truncated = outcar(&[STEP1.to_vec()]);
        truncated.push_str(" POSITION                                       TOTAL-FORCE (eV/Angst)\n");
        fs::write(input.path().join("OUTCAR_H2O_Top"), truncated).unwrap();

        let config = Config::new(input.path(), out.path()).with_overwrite(true);
        let batch = extract_all(&config).unwrap();
        assert_eq!(batch.failed, 1);
        assert!(batch.failures[0].1.contains("Malformed input"));
        assert_eq!(read(dir.join("POSCAR_H2O_Top_1")), first);
        assert_eq!(read(dir.join("POSCAR_H2O_Top_2")), second);
    }

    #[test]
    fn test_overwrite_keeps_previous_output_when_template_is_missing() {
        let input = input_dir();
        let out = tempfile::tempdir().unwrap();
        extract_all(&Config::new(input.path(), out.path())).unwrap();
        fs::remove_file(input.path().join("POSCAR_H2O_Top")).unwrap();

        let config = Config::new(input.path(), out.path()).with_overwrite(true);
        let batch = extract_all(&config).unwrap();
        assert_eq!(batch.failed, 1);
        let dir = out.path().join("POSCAR_H2O_Top");
        assert!(dir.join("POSCAR_H2O_Top_1").is_file());
        assert!(dir.join("POSCAR_H2O_Top_2").is_file());
    }

    #[test]
    fn test_failed_write_leaves_no_partial_set() {
        let input = input_dir();
        let out = tempfile::tempdir().unwrap();
        let dir = out.path().join("POSCAR_H2O_Top");
        // 占位目录让第二个快照写入失败
        let blocker = dir.join("POSCAR_H2O_Top_2");
        fs::create_dir_all(&blocker).unwrap();

        let batch = extract_all(&Config::new(input.path(), out.path())).unwrap();
        assert_eq!(batch.failed, 1);
        assert!(!dir.join("POSCAR_H2O_Top_1").exists());

        // 下一次运行不会把残缺结果当作已完成
        fs::remove_dir(&blocker).unwrap();
        let batch = extract_all(&Config::new(input.path(), out.path())).unwrap();
        assert_eq!(batch.skipped, 0);
        assert_eq!(batch.success, 1);
        assert!(dir.join("POSCAR_H2O_Top_2").is_file());
    }

    #[test]
    fn test_bad_files_do_not_abort_batch() {
        let input = input_dir();
        fs::write(input.path().join("bad-name"), "").unwrap();
        fs::write(input.path().join("OSZICAR_H2O_Top"), "").unwrap();
        // 截断的 OUTCAR
        let mut truncated = outcar(&[STEP1.to_vec()]);
        truncated.push_str(" POSITION                                       TOTAL-FORCE (eV/Angst)\n");
        fs::write(input.path().join("OUTCAR_CO_Hollow"), truncated).unwrap();
        fs::write(input.path().join("POSCAR_CO_Hollow"), TEMPLATE).unwrap();
        // 缺少模板
        fs::write(input.path().join("OUTCAR_NH3_Bridge"), outcar(&[STEP1.to_vec()])).unwrap();

        let out = tempfile::tempdir().unwrap();
        let batch = extract_all(&Config::new(input.path(), out.path())).unwrap();

        assert_eq!(batch.success, 1);
        assert_eq!(batch.failed, 3);
        let reasons: Vec<&str> = batch.failures.iter().map(|(_, r)| r.as_str()).collect();
        assert!(reasons.iter().any(|r| r.contains("bad-name")));
        assert!(reasons.iter().any(|r| r.contains("Malformed input")));
        assert!(reasons.iter().any(|r| r.contains("File not found")));
        assert!(!out.path().join("POSCAR_CO_Hollow").join("POSCAR_CO_Hollow_1").exists());
        assert!(batch.ensure_progress().is_ok());
    }

    #[test]
    fn test_outcar_without_steps() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("OUTCAR_Ar_Gas"), " free  energy   TOTEN  = -1.0 eV\n").unwrap();
        fs::write(input.path().join("POSCAR_Ar_Gas"), TEMPLATE).unwrap();
        let out = tempfile::tempdir().unwrap();

        let batch = extract_all(&Config::new(input.path(), out.path())).unwrap();
        assert_eq!(batch.success, 1);
        assert!(batch.notes[0].contains("0 structures"));
        assert!(out.path().join("POSCAR_Ar_Gas").is_dir());
    }
}
