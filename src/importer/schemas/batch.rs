// ==========================================
// 培训管理系统 - 班级批次导入布局
// ==========================================
// 列布局（按位置读取）:
// 0 批次名称（必填,批内唯一）
// 1 开始日期（必填,日期）
// 2 时长/周（必填,正数）
// 3 类别（必填,引用类别目录）
// 4 说明（可选）
// ==========================================

use crate::domain::{BatchPayload, BatchRecord, ImportKind, RawRow};
use crate::i18n::t_in;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::field_rules::{DateCheck, FieldRules};
use crate::importer::import_traits::RecordSchema;
use crate::importer::template::TemplateFile;

const COL_NAME: usize = 0;
const COL_START_DATE: usize = 1;
const COL_DURATION: usize = 2;
const COL_CATEGORY: usize = 3;
const COL_DESCRIPTION: usize = 4;

const LABEL_NAME: &str = "批次名称";
const LABEL_START_DATE: &str = "开始日期";
const LABEL_DURATION: &str = "时长（周）";
const LABEL_CATEGORY: &str = "类别";

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSchema;

impl RecordSchema for BatchSchema {
    type Record = BatchRecord;
    type Payload = BatchPayload;

    fn kind(&self) -> ImportKind {
        ImportKind::Batch
    }

    fn template(&self, locale: &str) -> TemplateFile {
        let headers = [
            "template.batch.name",
            "template.batch.start_date",
            "template.batch.duration",
            "template.batch.category",
            "template.batch.description",
        ]
        .iter()
        .map(|key| t_in(locale, key))
        .collect();
        let example = ["Acme, Inc.", "2024-01-01", "12", "General", "Weekend cohort"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        TemplateFile::new("batch_import_template.csv", headers, example)
    }

    fn interpret(&self, row: &RawRow) -> BatchRecord {
        BatchRecord {
            name: FieldMapper::text(row, COL_NAME),
            start_date: FieldMapper::date_text(row, COL_START_DATE),
            duration: FieldMapper::text(row, COL_DURATION),
            category: FieldMapper::text(row, COL_CATEGORY),
            description: FieldMapper::text(row, COL_DESCRIPTION),
            category_id: None,
        }
    }

    fn check_required(&self, record: &BatchRecord) -> Vec<String> {
        [
            FieldRules::required(LABEL_NAME, &record.name),
            FieldRules::required(LABEL_START_DATE, &record.start_date),
            FieldRules::required(LABEL_DURATION, &record.duration),
            FieldRules::required(LABEL_CATEGORY, &record.category),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn check_format(&self, record: &BatchRecord) -> Vec<String> {
        [
            FieldRules::date(LABEL_START_DATE, &record.start_date),
            FieldRules::positive_number(LABEL_DURATION, &record.duration),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn reference_label(&self) -> Option<&'static str> {
        Some(LABEL_CATEGORY)
    }

    fn reference_name<'a>(&self, record: &'a BatchRecord) -> Option<&'a str> {
        Some(record.category.as_str())
    }

    fn attach_reference(&self, record: &mut BatchRecord, id: Option<i64>) {
        record.category_id = id;
    }

    fn unique_label(&self) -> &'static str {
        LABEL_NAME
    }

    fn unique_value<'a>(&self, record: &'a BatchRecord) -> Option<&'a str> {
        Some(record.name.as_str())
    }

    fn label(&self, record: &BatchRecord) -> String {
        record.name.trim().to_string()
    }

    fn key_fields(&self, record: &BatchRecord) -> Vec<(String, String)> {
        vec![
            (LABEL_NAME.to_string(), record.name.clone()),
            (LABEL_START_DATE.to_string(), record.start_date.clone()),
            (LABEL_CATEGORY.to_string(), record.category.clone()),
        ]
    }

    fn build_payload(&self, record: &BatchRecord) -> Result<BatchPayload, String> {
        let start_date = match FieldRules::check_date(&record.start_date) {
            DateCheck::Valid(date) => date,
            _ => return Err(format!("{}无效: {}", LABEL_START_DATE, record.start_date)),
        };
        let duration_weeks = FieldRules::parse_positive(&record.duration)
            .ok_or_else(|| format!("{}无效: {}", LABEL_DURATION, record.duration))?;
        let category_id = record
            .category_id
            .ok_or_else(|| format!("{}未解析: {}", LABEL_CATEGORY, record.category))?;

        Ok(BatchPayload {
            name: record.name.trim().to_string(),
            start_date,
            duration_weeks,
            category_id,
            description: DataCleaner::normalize_null(Some(record.description.clone())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn raw(cells: &[&str]) -> RawRow {
        let headers: Arc<[String]> = Arc::from(Vec::<String>::new());
        RawRow::new(2, headers, cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_interpret_positional() {
        let record = BatchSchema.interpret(&raw(&["Acme, Inc.", "45292", " 12 ", "General"]));

        assert_eq!(record.name, "Acme, Inc.");
        assert_eq!(record.start_date, "2024-01-01");
        assert_eq!(record.duration, "12");
        assert_eq!(record.description, "");
        assert_eq!(record.category_id, None);
    }

    #[test]
    fn test_required_then_format_order() {
        let record = BatchSchema.interpret(&raw(&["", "2024-02-30", "0", ""]));

        let required = BatchSchema.check_required(&record);
        let format = BatchSchema.check_format(&record);

        assert_eq!(required.len(), 2);
        assert!(required[0].contains(LABEL_NAME));
        assert!(required[1].contains(LABEL_CATEGORY));
        assert_eq!(format.len(), 2);
        assert!(format[0].contains("不是有效日期"));
        assert!(format[1].contains("大于 0"));
    }

    #[test]
    fn test_build_payload() {
        let mut record =
            BatchSchema.interpret(&raw(&["Acme", "01/03/2024", "12.5", "General", " note "]));
        BatchSchema.attach_reference(&mut record, Some(9));

        let payload = BatchSchema.build_payload(&record).unwrap();

        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(payload.duration_weeks, 12.5);
        assert_eq!(payload.category_id, 9);
        assert_eq!(payload.description.as_deref(), Some("note"));
    }

    #[test]
    fn test_build_payload_requires_resolved_category() {
        let record = BatchSchema.interpret(&raw(&["Acme", "2024-01-01", "12", "General"]));
        assert!(BatchSchema.build_payload(&record).is_err());
    }

    #[test]
    fn test_template_matches_layout() {
        let template = BatchSchema.template("zh-CN");
        assert_eq!(template.headers.len(), 5);
        assert_eq!(template.example.len(), 5);

        // 示例行本身可通过字段校验
        let cells: Vec<&str> = template.example.iter().map(String::as_str).collect();
        let record = BatchSchema.interpret(&raw(&cells));
        assert!(BatchSchema.check_required(&record).is_empty());
        assert!(BatchSchema.check_format(&record).is_empty());
    }
}
