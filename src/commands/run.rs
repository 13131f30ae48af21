//! # run 命令实现
//!
//! 依次执行 extract → label → dataset：
//! - 结构写入 `<output>/structures/POSCAR_<mol>_<site>/`
//! - 标签写入 `<output>/<mol>_<site>_id_prop.csv`（每次运行重新生成）
//! - 数据集写入 `<output>/data.csv`
//!
//! 只有提取阶段一个文件都没有成功时才返回错误。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 调用 `commands/extract.rs`, `commands/label.rs`, `commands/dataset.rs`

use crate::cli::run::RunArgs;
use crate::commands::{dataset, extract, label};
use crate::config::Config;
use crate::error::Result;
use crate::utils::output;

use std::path::PathBuf;

/// 结构子目录名
const STRUCTURES_DIR: &str = "structures";

/// 数据集文件名
const DATASET_FILE: &str = "data.csv";

/// 各阶段的输出位置
#[derive(Debug, Clone)]
pub struct RunLayout {
    pub structures_dir: PathBuf,
    pub dataset_file: PathBuf,
}

impl RunLayout {
    pub fn new(config: &Config) -> Self {
        RunLayout {
            structures_dir: config.output_dir.join(STRUCTURES_DIR),
            dataset_file: config.output_dir.join(DATASET_FILE),
        }
    }
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    let config = args.config();
    run_pipeline(&config)
}

/// 完整流程
pub fn run_pipeline(config: &Config) -> Result<()> {
    let layout = RunLayout::new(config);

    output::print_header("Step 1/3: Extracting Ionic Steps");
    let extract_config = Config {
        output_dir: layout.structures_dir.clone(),
        ..config.clone()
    };
    let extracted = extract::extract_all(&extract_config)?;
    output::print_summary("extract", &extracted);
    extracted.ensure_progress()?;

    output::print_header("Step 2/3: Labelling with OSZICAR Energies");
    // 标签文件总是按当前结构重新生成
    let label_config = config.clone().with_overwrite(true);
    let labelled = label::label_all(&label_config, &layout.structures_dir)?;
    for note in &labelled.notes {
        output::print_success(note);
    }
    output::print_summary("label", &labelled);

    output::print_header("Step 3/3: Building Structure Dataset");
    let dataset = dataset::build_dataset(&layout.structures_dir, &layout.dataset_file)?;
    output::print_summary("dataset", &dataset);

    output::print_done(&format!(
        "Dataset ready in '{}'",
        config.output_dir.display()
    ));
    Ok(())
}
