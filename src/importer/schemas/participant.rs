// ==========================================
// 培训管理系统 - 研讨会学员导入布局
// ==========================================
// 列布局（按位置读取）:
// 0 姓名（必填）
// 1 邮箱（必填,批内唯一）
// 2 电话（必填,7-15 位数字）
// 3 性别（必填,male/female/other）
// 4 所在单位（可选）
// 说明: 学员挂在某个研讨会下,研讨会 ID 由调用方给定,不从文件读取
// ==========================================

use crate::domain::{Gender, ImportKind, ParticipantPayload, ParticipantRecord, RawRow};
use crate::i18n::t_in;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::field_rules::FieldRules;
use crate::importer::import_traits::RecordSchema;
use crate::importer::template::TemplateFile;

const COL_NAME: usize = 0;
const COL_EMAIL: usize = 1;
const COL_PHONE: usize = 2;
const COL_GENDER: usize = 3;
const COL_ORGANIZATION: usize = 4;

const LABEL_NAME: &str = "姓名";
const LABEL_EMAIL: &str = "邮箱";
const LABEL_PHONE: &str = "电话";
const LABEL_GENDER: &str = "性别";

#[derive(Debug, Clone, Copy)]
pub struct ParticipantSchema {
    workshop_id: i64,
}

impl ParticipantSchema {
    pub fn new(workshop_id: i64) -> Self {
        Self { workshop_id }
    }

    pub fn workshop_id(&self) -> i64 {
        self.workshop_id
    }
}

impl RecordSchema for ParticipantSchema {
    type Record = ParticipantRecord;
    type Payload = ParticipantPayload;

    fn kind(&self) -> ImportKind {
        ImportKind::Participant
    }

    fn template(&self, locale: &str) -> TemplateFile {
        let headers = [
            "template.participant.name",
            "template.participant.email",
            "template.participant.phone",
            "template.participant.gender",
            "template.participant.organization",
        ]
        .iter()
        .map(|key| t_in(locale, key))
        .collect();
        let example = [
            "Li Lei",
            "li.lei@example.com",
            "+86 138 0013 8000",
            "male",
            "Example University",
        ]
        .iter()
        .map(|v| v.to_string())
        .collect();
        TemplateFile::new("participant_import_template.csv", headers, example)
    }

    fn interpret(&self, row: &RawRow) -> ParticipantRecord {
        ParticipantRecord {
            name: FieldMapper::text(row, COL_NAME),
            email: FieldMapper::text(row, COL_EMAIL),
            phone: FieldMapper::text(row, COL_PHONE),
            gender: FieldMapper::text(row, COL_GENDER),
            organization: FieldMapper::text(row, COL_ORGANIZATION),
        }
    }

    fn check_required(&self, record: &ParticipantRecord) -> Vec<String> {
        [
            FieldRules::required(LABEL_NAME, &record.name),
            FieldRules::required(LABEL_EMAIL, &record.email),
            FieldRules::required(LABEL_PHONE, &record.phone),
            FieldRules::required(LABEL_GENDER, &record.gender),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn check_format(&self, record: &ParticipantRecord) -> Vec<String> {
        [
            FieldRules::email(LABEL_EMAIL, &record.email),
            FieldRules::phone(LABEL_PHONE, &record.phone),
            FieldRules::one_of(
                LABEL_GENDER,
                &record.gender,
                Gender::from_token(&record.gender).is_some(),
                &Gender::TOKENS,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn unique_label(&self) -> &'static str {
        LABEL_EMAIL
    }

    fn unique_value<'a>(&self, record: &'a ParticipantRecord) -> Option<&'a str> {
        Some(record.email.as_str())
    }

    fn label(&self, record: &ParticipantRecord) -> String {
        format!("{} <{}>", record.name.trim(), record.email.trim())
    }

    fn key_fields(&self, record: &ParticipantRecord) -> Vec<(String, String)> {
        vec![
            (LABEL_NAME.to_string(), record.name.clone()),
            (LABEL_EMAIL.to_string(), record.email.clone()),
            (LABEL_GENDER.to_string(), record.gender.clone()),
        ]
    }

    fn build_payload(&self, record: &ParticipantRecord) -> Result<ParticipantPayload, String> {
        let gender = Gender::from_token(&record.gender)
            .ok_or_else(|| format!("{}无效: {}", LABEL_GENDER, record.gender))?;

        Ok(ParticipantPayload {
            workshop_id: self.workshop_id,
            name: record.name.trim().to_string(),
            email: DataCleaner::clean_text(&record.email, false).to_lowercase(),
            phone: DataCleaner::normalize_phone(&record.phone),
            gender,
            organization: DataCleaner::normalize_null(Some(record.organization.clone())),
        })
    }
}
