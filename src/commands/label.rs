//! # label 命令实现
//!
//! 为每个 `POSCAR_<mol>_<site>/` 生成 `<mol>_<site>_id_prop.csv`：
//! 快照文件名按数字后缀排序，与 `OSZICAR_<mol>_<site>` 的能量逐一对应。
//!
//! ## 功能
//! - 快照数与能量数不一致时整组报错，不写出错位的标签
//! - 不写表头；默认追加，`--overwrite` 时先截断
//!
//! ## 依赖关系
//! - 使用 `cli/label.rs` 定义的参数
//! - 使用 `parsers/oszicar.rs`, `parsers/naming.rs`, `models/dataset.rs`
//! - 使用 `batch/`, `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, FileCollector, ProcessResult};
use crate::cli::label::LabelArgs;
use crate::config::Config;
use crate::error::{Result, Vasp2mlError};
use crate::models::{FileKind, LabelRecord};
use crate::parsers::{naming, oszicar};
use crate::utils::output;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// id_prop 文件名后缀
const ID_PROP_SUFFIX: &str = "_id_prop.csv";

/// 执行 label 命令
pub fn execute(args: LabelArgs) -> Result<()> {
    output::print_header("Labelling Structures with OSZICAR Energies");

    let config = args.config();
    let batch = label_all(&config, &args.structures_dir)?;

    for note in &batch.notes {
        output::print_success(note);
    }
    output::print_summary("label", &batch);

    batch.ensure_progress()
}

/// 处理结构目录下全部 `POSCAR_<mol>_<site>/`
pub fn label_all(config: &Config, structures_dir: &Path) -> Result<BatchResult> {
    config.validate()?;

    let dirs = FileCollector::new(structures_dir)
        .with_pattern("POSCAR_*")
        .directories()
        .collect()?;

    if dirs.is_empty() {
        output::print_warning(&format!(
            "No POSCAR_<mol>_<site> folders found in {}",
            structures_dir.display()
        ));
    } else {
        output::print_info(&format!("Found {} structure folders", dirs.len()));
    }

    BatchRunner::new(config.jobs).run(dirs, "Labelling", |dir| {
        ProcessResult::from_result(&dir.display().to_string(), label_pair(dir, config))
    })
}

/// `<output_dir>/<mol>_<site>_id_prop.csv`
pub fn id_prop_path(output_dir: &Path, pair: &str) -> PathBuf {
    output_dir.join(format!("{}{}", pair, ID_PROP_SUFFIX))
}

/// 处理一个 (molecule, site)
fn label_pair(dir: &Path, config: &Config) -> Result<ProcessResult> {
    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let id = naming::decode_name(dir_name)?;

    let names: Vec<String> = FileCollector::new(dir)
        .collect()?
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();
    let sorted = naming::sort_by_numeric_suffix(names)?;

    let oszicar_path = config.input_dir.join(id.sibling(FileKind::Oszicar));
    if !oszicar_path.is_file() {
        return Err(Vasp2mlError::FileNotFound {
            path: oszicar_path.display().to_string(),
        });
    }
    let energies = oszicar::read_energies(&oszicar_path)?;

    if sorted.len() != energies.len() {
        return Err(Vasp2mlError::LabelMismatch {
            structures: sorted.len(),
            energies: energies.len(),
            path: oszicar_path.display().to_string(),
        });
    }

    let csv_path = id_prop_path(&config.output_dir, &id.pair());
    let file = OpenOptions::new()
        .create(true)
        .append(!config.overwrite)
        .write(true)
        .truncate(config.overwrite)
        .open(&csv_path)
        .map_err(|e| Vasp2mlError::FileWriteError {
            path: csv_path.display().to_string(),
            source: e,
        })?;

    let count = sorted.len();
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);
    for (name, energy) in sorted.into_iter().zip(energies) {
        wtr.serialize(LabelRecord { id: name, energy })?;
    }
    wtr.flush().map_err(|e| Vasp2mlError::FileWriteError {
        path: csv_path.display().to_string(),
        source: e,
    })?;

    Ok(ProcessResult::Success(format!(
        "{}: {} labelled structures -> {}",
        id.pair(),
        count,
        csv_path.display()
    )))
}
