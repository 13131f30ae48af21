//! # 数据集记录
//!
//! 写入 CSV 的两类记录：结构表与 (结构 id, 能量) 标签表。
//!
//! ## 依赖关系
//! - 被 `commands/dataset.rs`, `commands/label.rs` 使用

use serde::{Deserialize, Serialize};

/// 结构数据集的一行：一个结构文件的完整内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRecord {
    pub structure: String,
}

/// 标签数据集的一行
///
/// 能量保持 OSZICAR 中的原始文本，避免浮点重新格式化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    pub id: String,
    pub energy: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_record_keeps_energy_text() {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.serialize(LabelRecord {
            id: "POSCAR_H2O_Top_1".to_string(),
            energy: "-.10400000E+02".to_string(),
        })
        .unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(text, "POSCAR_H2O_Top_1,-.10400000E+02\n");
    }
}
