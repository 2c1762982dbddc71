// ==========================================
// 培训管理系统 - 导入流水线 Trait
// ==========================================
// 职责: 定义解析/记录布局/引用数据/远端创建接口（不包含实现）
// ==========================================

use crate::domain::{ImportKind, RawRow, ReferenceEntity};
use crate::importer::error::{ParseError, SubmitError};
use crate::importer::template::TemplateFile;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件内容 → 原始行（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始行
    ///
    /// # 规则
    /// - 第一行为表头,不作为数据输出
    /// - 数据行行号从 2 开始
    /// - 完全空白的行跳过
    ///
    /// # 返回
    /// - Err(ParseError::NoDataRows): 表头之后没有数据
    fn parse_rows(&self, bytes: &[u8]) -> Result<Vec<RawRow>, ParseError>;
}

// ==========================================
// RecordSchema Trait
// ==========================================
// 用途: 某一导入类型的列布局、字段规则与载荷转换
// 实现者: BatchSchema, CourseSchema, ParticipantSchema
//
// 校验顺序（固定,保证错误列表稳定）:
// 1. check_required
// 2. check_format
// 3. check_groups
// 4. 引用解析（由 RowValidator 依据 reference_name 完成）
// 5. 批内唯一（由 RowValidator 依据 unique_value 完成）
pub trait RecordSchema: Send + Sync {
    type Record: Clone + Debug + Send + Sync;
    type Payload: Serialize + Send + Sync;

    /// 导入类型
    fn kind(&self) -> ImportKind;

    /// 下载模板（表头 + 一行示例）,表头按 locale 翻译
    fn template(&self, locale: &str) -> TemplateFile;

    /// 按列位置解释原始行
    fn interpret(&self, row: &RawRow) -> Self::Record;

    /// 必填字段校验（TRIM 后非空）
    fn check_required(&self, record: &Self::Record) -> Vec<String>;

    /// 格式校验（数字/日期/枚举等; 空值跳过,由必填校验负责）
    fn check_format(&self, record: &Self::Record) -> Vec<String>;

    /// 重复子组校验
    fn check_groups(&self, _record: &Self::Record) -> Vec<String> {
        Vec::new()
    }

    /// 引用字段列名; None 表示该类型无引用字段
    fn reference_label(&self) -> Option<&'static str> {
        None
    }

    /// 引用字段的显示名称
    fn reference_name<'a>(&self, _record: &'a Self::Record) -> Option<&'a str> {
        None
    }

    /// 写入引用解析结果（None = 未解析）
    fn attach_reference(&self, _record: &mut Self::Record, _id: Option<i64>) {}

    /// 批内唯一字段列名
    fn unique_label(&self) -> &'static str;

    /// 批内唯一字段取值
    fn unique_value<'a>(&self, record: &'a Self::Record) -> Option<&'a str>;

    /// 报告用标签
    fn label(&self, record: &Self::Record) -> String;

    /// 校验表格展示的关键字段
    fn key_fields(&self, record: &Self::Record) -> Vec<(String, String)>;

    /// 有效记录 → 提交载荷
    fn build_payload(&self, record: &Self::Record) -> Result<Self::Payload, String>;
}

// ==========================================
// ReferenceProvider Trait
// ==========================================
// 用途: 远端引用数据列表（校验前调用一次）
#[async_trait]
pub trait ReferenceProvider: Send + Sync {
    async fn list_reference_entities(&self) -> anyhow::Result<Vec<ReferenceEntity>>;
}

// ==========================================
// RecordSink Trait
// ==========================================
// 用途: 远端单条创建接口
// 约束: 调用方保证串行调用,上一条完成后才发起下一条
#[async_trait]
pub trait RecordSink<P: Send + Sync>: Send + Sync {
    async fn create_record(&self, payload: &P) -> Result<(), SubmitError>;
}
