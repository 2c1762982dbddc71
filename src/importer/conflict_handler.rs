// ==========================================
// 培训管理系统 - 批内重复检测
// ==========================================
// 职责: 检测同一次上传内唯一字段的重复（不区分大小写）
// 规则: 第一次出现不标记; 之后每次出现都指向第一次出现的行号
// 范围: 仅批内,不与远端已有数据比对
// ==========================================

use std::collections::HashMap;

// ==========================================
// Duplicate - 重复记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub row: usize,       // 重复行行号
    pub value: String,    // 重复值（该行原文,已 TRIM）
    pub first_row: usize, // 第一次出现的行号
}

pub struct ConflictHandler;

impl ConflictHandler {
    /// 检测批内重复
    ///
    /// # 参数
    /// - keys: (行号, 唯一字段值) 按源文件顺序; 空值不参与比较
    ///
    /// # 返回
    /// - Vec<Duplicate>: 重复记录（不包括第一次出现）,保持输入顺序
    pub fn detect_duplicates<'a, I>(keys: I) -> Vec<Duplicate>
    where
        I: IntoIterator<Item = (usize, Option<&'a str>)>,
    {
        let mut first_occurrence: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for (row, value) in keys {
            let value = match value.map(str::trim) {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };
            let key = value.to_lowercase();

            if let Some(first_row) = first_occurrence.get(&key) {
                // 发现重复：记录当前行号与首次行号
                duplicates.push(Duplicate {
                    row,
                    value: value.to_string(),
                    first_row: *first_row,
                });
            } else {
                // 首次出现：记录行号
                first_occurrence.insert(key, row);
            }
        }

        duplicates
    }
}
