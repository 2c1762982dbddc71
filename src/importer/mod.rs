// ==========================================
// 培训管理系统 - 导入层
// ==========================================
// 职责: 表格文件 → 校验结果 → 远端逐条创建 → 汇总
// 支持: CSV（分隔符文本）、Excel/ODS（工作簿首个工作表）
// ==========================================

// 模块声明
pub mod batch_submitter;
pub mod conflict_handler;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod field_rules;
pub mod file_parser;
pub mod import_traits;
pub mod pipeline;
pub mod reference_catalog;
pub mod result_aggregator;
pub mod row_validator;
pub mod schemas;
pub mod template;
pub mod validation_session;

// 重导出核心类型
pub use batch_submitter::BatchSubmitter;
pub use conflict_handler::{ConflictHandler, Duplicate};
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult, ParseError, SubmitError};
pub use field_mapper::{FieldMapper, RawGroup};
pub use field_rules::{DateCheck, FieldRules, ACCEPTED_DATE_FORMATS};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use pipeline::ImportPipeline;
pub use reference_catalog::ReferenceCatalog;
pub use result_aggregator::ResultAggregator;
pub use row_validator::RowValidator;
pub use schemas::{BatchSchema, CourseSchema, ParticipantSchema};
pub use template::TemplateFile;
pub use validation_session::ValidationSession;

// 重导出 Trait 接口
pub use import_traits::{FileParser, RecordSchema, RecordSink, ReferenceProvider};
