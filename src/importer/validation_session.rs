// ==========================================
// 培训管理系统 - 校验会话
// ==========================================
// 职责: 持有一次上传的记录与校验结果,支持提交前的人工修改
// 红线:
// - 校验结果为派生数据,每次变化后整体重建（不做局部修补）
// - 修改单行只重算该行字段级错误; 批内唯一始终对整批重新扫描
// - 同一数据重复校验得到完全相同的错误列表
// ==========================================

use crate::domain::{RawRow, ValidationCounts, ValidationResult, ValidationTableRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_traits::RecordSchema;
use crate::importer::reference_catalog::ReferenceCatalog;
use crate::importer::row_validator::RowValidator;
use std::sync::Arc;
use tracing::debug;

/// 会话内单行状态: 当前记录 + 缓存的字段级错误
struct SessionEntry<R> {
    row: usize,
    record: R,
    field_errors: Vec<String>,
}

pub struct ValidationSession<S: RecordSchema> {
    validator: RowValidator<S>,
    catalog: Arc<ReferenceCatalog>,
    entries: Vec<SessionEntry<S::Record>>,
    results: Vec<ValidationResult<S::Record>>,
}

impl<S: RecordSchema> ValidationSession<S> {
    /// 由已解释的记录创建会话并完成首次校验
    pub fn new(
        schema: Arc<S>,
        catalog: Arc<ReferenceCatalog>,
        records: Vec<(usize, S::Record)>,
    ) -> Self {
        let validator = RowValidator::new(schema);
        let entries = records
            .into_iter()
            .map(|(row, mut record)| {
                let field_errors = validator.field_errors(&mut record, &catalog);
                SessionEntry {
                    row,
                    record,
                    field_errors,
                }
            })
            .collect();

        let mut session = Self {
            validator,
            catalog,
            entries,
            results: Vec::new(),
        };
        session.rebuild_results();
        session
    }

    /// 由原始行创建会话（按列布局解释后校验）
    pub fn from_rows(schema: Arc<S>, catalog: Arc<ReferenceCatalog>, rows: &[RawRow]) -> Self {
        let records = rows
            .iter()
            .map(|raw| (raw.row_number, schema.interpret(raw)))
            .collect();
        Self::new(schema, catalog, records)
    }

    /// 重建全部校验结果: 字段级错误（缓存）+ 批内唯一错误（整批重算）
    fn rebuild_results(&mut self) {
        let mut duplicates = self
            .validator
            .uniqueness_errors(self.entries.iter().map(|e| (e.row, &e.record)));

        self.results = self
            .entries
            .iter()
            .map(|entry| {
                let mut errors = entry.field_errors.clone();
                if let Some(extra) = duplicates.remove(&entry.row) {
                    errors.extend(extra);
                }
                ValidationResult::new(entry.row, entry.record.clone(), errors)
            })
            .collect();

        debug!(
            total = self.results.len(),
            invalid = self.results.iter().filter(|r| !r.is_valid()).count(),
            "校验结果已重建"
        );
    }

    /// 人工修改单行后重新校验
    ///
    /// # 参数
    /// - row: 原始文件行号
    /// - record: 修改后的记录（引用解析结果会被重新计算）
    ///
    /// # 返回
    /// - Err(ImportError::RowNotFound): 会话中没有该行号
    pub fn edit_row(
        &mut self,
        row: usize,
        record: S::Record,
    ) -> ImportResult<&ValidationResult<S::Record>> {
        let index = self
            .entries
            .iter()
            .position(|e| e.row == row)
            .ok_or(ImportError::RowNotFound(row))?;

        let mut record = record;
        let field_errors = self.validator.field_errors(&mut record, &self.catalog);
        let entry = &mut self.entries[index];
        entry.record = record;
        entry.field_errors = field_errors;

        self.rebuild_results();
        debug!(row = row, "人工修改后已重新校验");
        Ok(&self.results[index])
    }

    /// 替换引用目录并整体重新校验
    pub fn replace_catalog(&mut self, catalog: Arc<ReferenceCatalog>) {
        self.catalog = catalog;
        self.revalidate();
    }

    /// 整体重新校验（数据未变时结果不变）
    pub fn revalidate(&mut self) {
        for entry in &mut self.entries {
            entry.field_errors = self.validator.field_errors(&mut entry.record, &self.catalog);
        }
        self.rebuild_results();
    }

    pub fn results(&self) -> &[ValidationResult<S::Record>] {
        &self.results
    }

    /// 无错误的结果,保持源文件顺序
    pub fn valid_results(&self) -> Vec<&ValidationResult<S::Record>> {
        self.results.iter().filter(|r| r.is_valid()).collect()
    }

    pub fn result(&self, row: usize) -> Option<&ValidationResult<S::Record>> {
        self.results.iter().find(|r| r.row == row)
    }

    /// 提交前展示用的校验表格
    pub fn table(&self) -> Vec<ValidationTableRow> {
        let schema = self.validator.schema();
        self.results
            .iter()
            .map(|result| ValidationTableRow {
                row: result.row,
                label: schema.label(&result.data),
                key_fields: schema.key_fields(&result.data),
                errors: result.errors.clone(),
                valid: result.is_valid(),
            })
            .collect()
    }

    pub fn counts(&self) -> ValidationCounts {
        let valid = self.results.iter().filter(|r| r.is_valid()).count();
        ValidationCounts {
            total: self.results.len(),
            valid,
            invalid: self.results.len() - valid,
        }
    }

    pub fn schema(&self) -> &S {
        self.validator.schema()
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
