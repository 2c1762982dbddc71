// ==========================================
// 培训管理系统 - 校验结果模型
// ==========================================
// 红线: 派生数据,不独立存储
//       记录/引用目录/人工修改任一变化时整体重建,不做局部修补
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ValidationResult - 单行校验结果
// ==========================================
// errors 为空即有效; 错误顺序: 必填 → 格式 → 子组 → 引用 → 批内唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult<R> {
    pub row: usize,
    pub data: R,
    pub errors: Vec<String>,
}

impl<R> ValidationResult<R> {
    pub fn new(row: usize, data: R, errors: Vec<String>) -> Self {
        Self { row, data, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ==========================================
// ValidationTableRow - 提交前的校验表格行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationTableRow {
    pub row: usize,
    pub label: String,
    pub key_fields: Vec<(String, String)>, // (列名, 值)
    pub errors: Vec<String>,
    pub valid: bool,
}

// ==========================================
// ValidationCounts - 校验统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCounts {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}
