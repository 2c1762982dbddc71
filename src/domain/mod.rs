// ==========================================
// 培训管理系统 - 领域模型层
// ==========================================
// 职责: 原始行、导入记录、校验结果、提交结果
// 红线: 不含解析/校验/提交逻辑
// ==========================================

pub mod record;
pub mod row;
pub mod submission;
pub mod types;
pub mod validation;

// 重导出核心类型
pub use record::{
    BatchPayload, BatchRecord, CoursePayload, CourseRecord, ParticipantPayload,
    ParticipantRecord, ReferenceEntity, SubjectGroup, SubjectPayload,
};
pub use row::{RawRow, TableSource};
pub use submission::{ImportOutcome, ImportSummary, SubmissionProgress, SubmissionReport};
pub use types::{FileKind, Gender, ImportKind, StudyMode, SubjectKind};
pub use validation::{ValidationCounts, ValidationResult, ValidationTableRow};
