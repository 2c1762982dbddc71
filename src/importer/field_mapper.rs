// ==========================================
// 培训管理系统 - 字段映射器
// ==========================================
// 职责: 原始行 → 记录字段（按列位置读取,不依赖表头文字）
// 包含: 重复子组切分（固定步长列块）
// ==========================================

use crate::domain::RawRow;
use crate::importer::data_cleaner::DataCleaner;

// ==========================================
// RawGroup - 原始子组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGroup {
    pub index: usize,       // 子组序号（从 1 开始）
    pub start_column: usize, // 子组首列位置
    pub cells: Vec<String>, // 子组内单元格（已 TRIM,长度 = 步长）
}

impl RawGroup {
    pub fn cell(&self, offset: usize) -> &str {
        self.cells.get(offset).map(String::as_str).unwrap_or("")
    }
}

pub struct FieldMapper;

impl FieldMapper {
    /// 文本字段（TRIM,缺失列为空串）
    pub fn text(row: &RawRow, index: usize) -> String {
        row.text(index).to_string()
    }

    /// 日期字段: 纯数字按表格日期序列号换算为 YYYY-MM-DD,其余原样保留
    pub fn date_text(row: &RawRow, index: usize) -> String {
        let value = row.text(index);
        DataCleaner::serial_text_to_iso(value).unwrap_or_else(|| value.to_string())
    }

    /// 切分重复子组
    ///
    /// # 参数
    /// - row: 原始行
    /// - start_index: 第一组首列位置
    /// - stride: 每组列数（第一列为子组名称）
    ///
    /// # 规则
    /// - 从 start_index 起每 stride 列为一组
    /// - 遇到名称列为空（或超出行宽）的组即停止,其后的列不再读取
    pub fn parse_repeating_groups(row: &RawRow, start_index: usize, stride: usize) -> Vec<RawGroup> {
        let mut groups = Vec::new();
        if stride == 0 {
            return groups;
        }

        let mut column = start_index;
        while column < row.len() {
            if row.text(column).is_empty() {
                break;
            }
            let cells = (column..column + stride)
                .map(|idx| row.text(idx).to_string())
                .collect();
            groups.push(RawGroup {
                index: groups.len() + 1,
                start_column: column,
                cells,
            });
            column += stride;
        }

        groups
    }
}
