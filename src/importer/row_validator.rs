// ==========================================
// 培训管理系统 - 行校验器
// ==========================================
// 职责: 按固定顺序累积每行错误
//   1. 必填 2. 格式 3. 子组 4. 引用解析 5. 批内唯一
// 说明: 1-4 只依赖本行,5 依赖整批记录
// ==========================================

use crate::domain::ValidationResult;
use crate::importer::conflict_handler::ConflictHandler;
use crate::importer::import_traits::RecordSchema;
use crate::importer::reference_catalog::ReferenceCatalog;
use std::collections::HashMap;
use std::sync::Arc;

pub struct RowValidator<S: RecordSchema> {
    schema: Arc<S>,
}

impl<S: RecordSchema> RowValidator<S> {
    pub fn new(schema: Arc<S>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// 单行字段级错误（规则 1-4）
    ///
    /// # 副作用
    /// - 引用解析结果写入 record（解析失败时写入 None）
    pub fn field_errors(&self, record: &mut S::Record, catalog: &ReferenceCatalog) -> Vec<String> {
        let mut errors = self.schema.check_required(record);
        errors.extend(self.schema.check_format(record));
        errors.extend(self.schema.check_groups(record));

        if let Some(label) = self.schema.reference_label() {
            let name = self
                .schema
                .reference_name(record)
                .map(|n| n.trim().to_string())
                .unwrap_or_default();
            let resolved = if name.is_empty() {
                None
            } else {
                catalog.lookup(&name)
            };
            if resolved.is_none() && !name.is_empty() {
                errors.push(format!("{}不存在: {}", label, name));
            }
            self.schema.attach_reference(record, resolved);
        }

        errors
    }

    /// 批内唯一错误（规则 5）
    ///
    /// # 返回
    /// - 行号 → 该行的重复错误; 第一次出现的行不在结果中
    pub fn uniqueness_errors<'a, I>(&self, records: I) -> HashMap<usize, Vec<String>>
    where
        I: IntoIterator<Item = (usize, &'a S::Record)>,
        S::Record: 'a,
    {
        let label = self.schema.unique_label();
        let keys: Vec<(usize, Option<&str>)> = records
            .into_iter()
            .map(|(row, record)| (row, self.schema.unique_value(record)))
            .collect();

        let mut errors: HashMap<usize, Vec<String>> = HashMap::new();
        for duplicate in ConflictHandler::detect_duplicates(keys) {
            errors.entry(duplicate.row).or_default().push(format!(
                "{}与第 {} 行重复: {}",
                label, duplicate.first_row, duplicate.value
            ));
        }
        errors
    }

    /// 整批校验
    ///
    /// # 返回
    /// - 每条输入记录一个 ValidationResult,顺序与输入一致
    pub fn validate_all(
        &self,
        records: Vec<(usize, S::Record)>,
        catalog: &ReferenceCatalog,
    ) -> Vec<ValidationResult<S::Record>> {
        let checked: Vec<(usize, S::Record, Vec<String>)> = records
            .into_iter()
            .map(|(row, mut record)| {
                let errors = self.field_errors(&mut record, catalog);
                (row, record, errors)
            })
            .collect();

        let mut duplicates =
            self.uniqueness_errors(checked.iter().map(|(row, record, _)| (*row, record)));

        checked
            .into_iter()
            .map(|(row, record, mut errors)| {
                if let Some(extra) = duplicates.remove(&row) {
                    errors.extend(extra);
                }
                ValidationResult::new(row, record, errors)
            })
            .collect()
    }
}
