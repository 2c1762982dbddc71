// ==========================================
// 培训管理系统 - 导入领域类型定义
// ==========================================
// 职责: 文件类型 / 导入类型 / 枚举型字段取值
// 红线: 枚举匹配不区分大小写,但只接受封闭集合内的取值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 文件类型 (File Kind)
// ==========================================
// 由调用方声明,或按扩展名推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileKind {
    DelimitedText, // 分隔符文本（CSV）
    Workbook,      // 工作簿（xlsx/xls/xlsb/ods）
}

impl FileKind {
    /// 按扩展名推断文件类型（不区分大小写）
    ///
    /// # 返回
    /// - Some(FileKind): 支持的扩展名
    /// - None: 不支持
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "csv" | "txt" => Some(FileKind::DelimitedText),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(FileKind::Workbook),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::DelimitedText => write!(f, "DELIMITED_TEXT"),
            FileKind::Workbook => write!(f, "WORKBOOK"),
        }
    }
}

// ==========================================
// 导入类型 (Import Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportKind {
    Batch,       // 班级批次
    Course,      // 课程（含科目子表）
    Participant, // 研讨会学员
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Batch => write!(f, "BATCH"),
            ImportKind::Course => write!(f, "COURSE"),
            ImportKind::Participant => write!(f, "PARTICIPANT"),
        }
    }
}

/// 枚举取值标准化: 小写,`-` 与空格统一为 `_`
fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

// ==========================================
// 学习模式 (Study Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    FullTime, // 全日制
    PartTime, // 非全日制
    Online,   // 线上
}

impl StudyMode {
    pub const TOKENS: [&'static str; 3] = ["full_time", "part_time", "online"];

    /// 解析取值（不区分大小写,允许 `Full-Time` / `full time` 写法）
    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_token(value).as_str() {
            "full_time" => Some(StudyMode::FullTime),
            "part_time" => Some(StudyMode::PartTime),
            "online" => Some(StudyMode::Online),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            StudyMode::FullTime => "full_time",
            StudyMode::PartTime => "part_time",
            StudyMode::Online => "online",
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const TOKENS: [&'static str; 3] = ["male", "female", "other"];

    pub fn from_token(value: &str) -> Option<Self> {
        match normalize_token(value).as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

// ==========================================
// 科目类型 (Subject Kind)
// ==========================================
// 科目子组二选一: 理论 XOR 实践
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Theory,
    Practical,
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Theory => write!(f, "theory"),
            SubjectKind::Practical => write!(f, "practical"),
        }
    }
}
