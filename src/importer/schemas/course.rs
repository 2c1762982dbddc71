// ==========================================
// 培训管理系统 - 课程导入布局（含科目子组）
// ==========================================
// 列布局（按位置读取）:
// 0 课程名称（必填）
// 1 课程编码（必填,批内唯一）
// 2 学习模式（必填,full_time/part_time/online）
// 3 类别（必填,引用类别目录）
// 4.. 科目子组,每组 6 列:
//     名称 / 编码 / 理论学时 / 理论分值 / 实践学时 / 实践分值
// 子组规则: 理论与实践二选一,所选一类的学时与分值都必须为正数
// ==========================================

use crate::domain::{
    CoursePayload, CourseRecord, ImportKind, RawRow, StudyMode, SubjectGroup, SubjectKind,
    SubjectPayload,
};
use crate::i18n::{t_in, t_with_args_in};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::field_rules::FieldRules;
use crate::importer::import_traits::RecordSchema;
use crate::importer::template::TemplateFile;

const COL_NAME: usize = 0;
const COL_CODE: usize = 1;
const COL_STUDY_MODE: usize = 2;
const COL_CATEGORY: usize = 3;

/// 第一组科目首列
pub const SUBJECT_START_COLUMN: usize = 4;
/// 每组科目列数
pub const SUBJECT_STRIDE: usize = 6;

// 子组内列偏移
const OFFSET_NAME: usize = 0;
const OFFSET_CODE: usize = 1;
const OFFSET_THEORY_HOURS: usize = 2;
const OFFSET_THEORY_MARKS: usize = 3;
const OFFSET_PRACTICAL_HOURS: usize = 4;
const OFFSET_PRACTICAL_MARKS: usize = 5;

const LABEL_NAME: &str = "课程名称";
const LABEL_CODE: &str = "课程编码";
const LABEL_STUDY_MODE: &str = "学习模式";
const LABEL_CATEGORY: &str = "类别";

#[derive(Debug, Clone, Copy)]
pub struct CourseSchema {
    subject_start: usize,
    subject_stride: usize,
}

impl Default for CourseSchema {
    fn default() -> Self {
        Self {
            subject_start: SUBJECT_START_COLUMN,
            subject_stride: SUBJECT_STRIDE,
        }
    }
}

impl CourseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 子组错误前缀: 第 N 组科目（名称）
    fn group_label(group: &SubjectGroup) -> String {
        format!("第 {} 组科目（{}）", group.index, group.name.trim())
    }

    /// 单组校验
    fn check_group(group: &SubjectGroup) -> Vec<String> {
        let prefix = Self::group_label(group);
        if group.name.trim().is_empty() {
            return vec![format!("第 {} 组科目名称不能为空", group.index)];
        }

        let (hours, marks) = match group.kind() {
            Some(SubjectKind::Theory) => (
                ("理论学时", &group.theory_hours),
                ("理论分值", &group.theory_marks),
            ),
            Some(SubjectKind::Practical) => (
                ("实践学时", &group.practical_hours),
                ("实践分值", &group.practical_marks),
            ),
            None if group.has_theory() => {
                return vec![format!("{}理论与实践只能填写其一", prefix)];
            }
            None => {
                return vec![format!("{}须填写理论或实践的学时与分值", prefix)];
            }
        };

        let mut errors = Vec::new();
        for (label, value) in [hours, marks] {
            let field = format!("{}{}", prefix, label);
            if let Some(e) = FieldRules::required(&field, value) {
                errors.push(e);
            } else if let Some(e) = FieldRules::positive_number(&field, value) {
                errors.push(e);
            }
        }
        errors
    }

    fn subject_payload(group: &SubjectGroup) -> Result<SubjectPayload, String> {
        let kind = group
            .kind()
            .ok_or_else(|| format!("{}类型无法确定", Self::group_label(group)))?;
        let (hours, marks) = match kind {
            SubjectKind::Theory => (&group.theory_hours, &group.theory_marks),
            SubjectKind::Practical => (&group.practical_hours, &group.practical_marks),
        };
        let parse = |value: &String| {
            FieldRules::parse_positive(value)
                .ok_or_else(|| format!("{}数值无效: {}", Self::group_label(group), value))
        };

        Ok(SubjectPayload {
            name: group.name.trim().to_string(),
            code: DataCleaner::normalize_null(Some(group.code.clone())),
            kind,
            hours: parse(hours)?,
            marks: parse(marks)?,
        })
    }
}

impl RecordSchema for CourseSchema {
    type Record = CourseRecord;
    type Payload = CoursePayload;

    fn kind(&self) -> ImportKind {
        ImportKind::Course
    }

    fn template(&self, locale: &str) -> TemplateFile {
        let mut headers: Vec<String> = [
            "template.course.name",
            "template.course.code",
            "template.course.study_mode",
            "template.course.category",
        ]
        .iter()
        .map(|key| t_in(locale, key))
        .collect();

        // 模板给出两组科目列,更多科目按相同步长向右追加
        for index in 1..=2 {
            let index = index.to_string();
            for key in [
                "template.course.subject_name",
                "template.course.subject_code",
                "template.course.theory_hours",
                "template.course.theory_marks",
                "template.course.practical_hours",
                "template.course.practical_marks",
            ] {
                headers.push(t_with_args_in(locale, key, &[("index", index.as_str())]));
            }
        }

        let example = [
            "Nursing Fundamentals",
            "NUR-101",
            "full_time",
            "General",
            "Anatomy",
            "ANA-1",
            "40",
            "100",
            "",
            "",
            "Clinical Practice",
            "CLP-1",
            "",
            "",
            "60",
            "100",
        ]
        .iter()
        .map(|v| v.to_string())
        .collect();

        TemplateFile::new("course_import_template.csv", headers, example)
    }

    fn interpret(&self, row: &RawRow) -> CourseRecord {
        let subjects =
            FieldMapper::parse_repeating_groups(row, self.subject_start, self.subject_stride)
                .into_iter()
                .map(|group| SubjectGroup {
                    index: group.index,
                    name: group.cell(OFFSET_NAME).to_string(),
                    code: group.cell(OFFSET_CODE).to_string(),
                    theory_hours: group.cell(OFFSET_THEORY_HOURS).to_string(),
                    theory_marks: group.cell(OFFSET_THEORY_MARKS).to_string(),
                    practical_hours: group.cell(OFFSET_PRACTICAL_HOURS).to_string(),
                    practical_marks: group.cell(OFFSET_PRACTICAL_MARKS).to_string(),
                })
                .collect();

        CourseRecord {
            name: FieldMapper::text(row, COL_NAME),
            code: FieldMapper::text(row, COL_CODE),
            study_mode: FieldMapper::text(row, COL_STUDY_MODE),
            category: FieldMapper::text(row, COL_CATEGORY),
            category_id: None,
            subjects,
        }
    }

    fn check_required(&self, record: &CourseRecord) -> Vec<String> {
        [
            FieldRules::required(LABEL_NAME, &record.name),
            FieldRules::required(LABEL_CODE, &record.code),
            FieldRules::required(LABEL_STUDY_MODE, &record.study_mode),
            FieldRules::required(LABEL_CATEGORY, &record.category),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn check_format(&self, record: &CourseRecord) -> Vec<String> {
        FieldRules::one_of(
            LABEL_STUDY_MODE,
            &record.study_mode,
            StudyMode::from_token(&record.study_mode).is_some(),
            &StudyMode::TOKENS,
        )
        .into_iter()
        .collect()
    }

    fn check_groups(&self, record: &CourseRecord) -> Vec<String> {
        record.subjects.iter().flat_map(Self::check_group).collect()
    }

    fn reference_label(&self) -> Option<&'static str> {
        Some(LABEL_CATEGORY)
    }

    fn reference_name<'a>(&self, record: &'a CourseRecord) -> Option<&'a str> {
        Some(record.category.as_str())
    }

    fn attach_reference(&self, record: &mut CourseRecord, id: Option<i64>) {
        record.category_id = id;
    }

    fn unique_label(&self) -> &'static str {
        LABEL_CODE
    }

    fn unique_value<'a>(&self, record: &'a CourseRecord) -> Option<&'a str> {
        Some(record.code.as_str())
    }

    fn label(&self, record: &CourseRecord) -> String {
        format!("{} ({})", record.name.trim(), record.code.trim())
    }

    fn key_fields(&self, record: &CourseRecord) -> Vec<(String, String)> {
        vec![
            (LABEL_NAME.to_string(), record.name.clone()),
            (LABEL_CODE.to_string(), record.code.clone()),
            (LABEL_STUDY_MODE.to_string(), record.study_mode.clone()),
            ("科目数".to_string(), record.subjects.len().to_string()),
        ]
    }

    fn build_payload(&self, record: &CourseRecord) -> Result<CoursePayload, String> {
        let study_mode = StudyMode::from_token(&record.study_mode)
            .ok_or_else(|| format!("{}无效: {}", LABEL_STUDY_MODE, record.study_mode))?;
        let category_id = record
            .category_id
            .ok_or_else(|| format!("{}未解析: {}", LABEL_CATEGORY, record.category))?;
        let subjects = record
            .subjects
            .iter()
            .map(Self::subject_payload)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CoursePayload {
            name: record.name.trim().to_string(),
            code: record.code.trim().to_string(),
            study_mode,
            category_id,
            subjects,
        })
    }
}
