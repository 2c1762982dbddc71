// ==========================================
// 培训管理系统 - 导入记录模型
// ==========================================
// 职责: RawRow 按列布局解释后的领域记录 + 提交载荷
// 说明: 记录字段保留原始文本,允许人工修改后重新校验;
//       只有校验通过的记录才会转换为载荷
// ==========================================

use crate::domain::types::{Gender, StudyMode, SubjectKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ReferenceEntity - 引用实体（如课程类别）
// ==========================================
// 校验前一次性加载,流水线只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub id: i64,
    #[serde(alias = "name", alias = "displayName")]
    pub display_name: String,
}

impl ReferenceEntity {
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

// ==========================================
// BatchRecord - 班级批次
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub name: String,             // 批次名称（批内唯一）
    pub start_date: String,       // 开始日期
    pub duration: String,         // 时长（周）
    pub category: String,         // 类别名称
    pub description: String,      // 说明（可选）
    pub category_id: Option<i64>, // 类别 ID（引用解析后写入）
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchPayload {
    pub name: String,
    pub start_date: NaiveDate,
    pub duration_weeks: f64,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ==========================================
// CourseRecord - 课程（含科目子组）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: String,
    pub code: String,       // 课程编码（批内唯一）
    pub study_mode: String, // 学习模式
    pub category: String,
    pub category_id: Option<i64>,
    pub subjects: Vec<SubjectGroup>,
}

// ==========================================
// SubjectGroup - 科目子组
// ==========================================
// 理论组（学时+分值）与实践组（学时+分值）必须且只能填写其一
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectGroup {
    pub index: usize, // 子组序号（从 1 开始）
    pub name: String,
    pub code: String,
    pub theory_hours: String,
    pub theory_marks: String,
    pub practical_hours: String,
    pub practical_marks: String,
}

impl SubjectGroup {
    pub fn has_theory(&self) -> bool {
        !self.theory_hours.trim().is_empty() || !self.theory_marks.trim().is_empty()
    }

    pub fn has_practical(&self) -> bool {
        !self.practical_hours.trim().is_empty() || !self.practical_marks.trim().is_empty()
    }

    /// 已填写的那一类; 两类都填或都不填时返回 None
    pub fn kind(&self) -> Option<SubjectKind> {
        match (self.has_theory(), self.has_practical()) {
            (true, false) => Some(SubjectKind::Theory),
            (false, true) => Some(SubjectKind::Practical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePayload {
    pub name: String,
    pub code: String,
    pub study_mode: StudyMode,
    pub category_id: i64,
    pub subjects: Vec<SubjectPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub kind: SubjectKind,
    pub hours: f64,
    pub marks: f64,
}

// ==========================================
// ParticipantRecord - 研讨会学员
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    pub email: String, // 邮箱（批内唯一）
    pub phone: String,
    pub gender: String,
    pub organization: String, // 所在单位（可选）
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantPayload {
    pub workshop_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}
