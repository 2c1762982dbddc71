// ==========================================
// 培训管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层:
// - ParseError: 文件级错误,整次导入终止
// - SubmitError: 远端单行创建失败,记入该行 ImportOutcome
// - ImportError: 流水线级错误（解析/引用加载/配置）
// 行级校验错误是数据（Vec<String>）,不走错误通道
// ==========================================

use thiserror::Error;

/// 文件解析错误
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.txt/.xlsx/.xlsm/.xls/.xlsb/.ods）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作簿解析失败: {0}")]
    WorkbookParseError(String),

    #[error("工作簿无工作表")]
    NoWorksheet,

    #[error("文件为空: 缺少表头")]
    MissingHeader,

    #[error("文件无数据行: 表头之后没有任何记录")]
    NoDataRows,
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        ParseError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ParseError {
    fn from(err: calamine::Error) -> Self {
        ParseError::WorkbookParseError(err.to_string())
    }
}

/// 远端创建失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// 远端明确拒绝并给出原因
    #[error("{0}")]
    Rejected(String),

    /// 网络/传输层失败
    #[error("请求失败: {0}")]
    Transport(String),

    /// 远端失败但未给出原因
    #[error("远端未返回失败原因")]
    Unspecified,
}

impl SubmitError {
    /// 远端给出的失败原因; 空白原因视为未给出
    pub fn reason(&self) -> Option<String> {
        match self {
            SubmitError::Rejected(reason) if !reason.trim().is_empty() => {
                Some(reason.trim().to_string())
            }
            SubmitError::Transport(_) => Some(self.to_string()),
            _ => None,
        }
    }
}

/// 导入流水线错误
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error(transparent)]
    Parse(#[from] ParseError),

    // ===== 引用数据错误 =====
    #[error("引用数据加载失败: {0}")]
    ReferenceLoadError(String),

    // ===== 会话错误 =====
    #[error("行号不存在: {0}")]
    RowNotFound(usize),

    // ===== 模板错误 =====
    #[error("模板生成失败: {0}")]
    TemplateError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (path: {path}): {message}")]
    ConfigError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
