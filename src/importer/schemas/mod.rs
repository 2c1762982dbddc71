// ==========================================
// 培训管理系统 - 导入类型列布局
// ==========================================
// 每种导入类型一个 RecordSchema 实现（不可变,由调用方注入流水线）
// ==========================================

pub mod batch;
pub mod course;
pub mod participant;

pub use batch::BatchSchema;
pub use course::{CourseSchema, SUBJECT_START_COLUMN, SUBJECT_STRIDE};
pub use participant::ParticipantSchema;
