// ==========================================
// 培训管理系统 - 批量表格导入核心库
// ==========================================
// 流程: 表格文件 → 原始行 → 行校验（引用目录）→ 串行提交 → 汇总
// 导入类型: 班级批次 / 课程（含科目子组）/ 研讨会学员
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 行、记录与结果
pub mod domain;

// 导入层 - 解析/校验/提交
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    FileKind, ImportKind, ImportOutcome, ImportSummary, RawRow, ReferenceEntity,
    SubmissionProgress, SubmissionReport, TableSource, ValidationResult, ValidationTableRow,
};

// 导入流水线
pub use importer::{
    BatchSchema, CourseSchema, ImportError, ImportPipeline, ImportResult, ParseError,
    ParticipantSchema, RecordSchema, RecordSink, ReferenceCatalog, ReferenceProvider,
    SubmitError, ValidationSession,
};

// 配置
pub use config::ImportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "培训管理系统";
