// ==========================================
// 培训管理系统 - 导入配置
// ==========================================
// 职责: 导入流水线的不可变配置值,由调用方注入
// 来源: 默认值 / JSON 配置文件（用户配置目录）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "training-import";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "import_config.json";

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// CSV 分隔符（必须为 ASCII 字符）
    ///
    /// # 默认值
    /// - ','
    pub delimiter: char,

    /// 相邻两次提交之间的固定间隔（毫秒）,用于限制对远端的调用频率
    ///
    /// # 默认值
    /// - 100
    pub submit_interval_ms: u64,

    /// 远端未给出失败原因时使用的提示
    pub default_failure_message: String,

    /// 模板表头语言（"zh-CN" 或 "en"）
    pub locale: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            submit_interval_ms: 100,
            default_failure_message: "创建失败".to_string(),
            locale: "zh-CN".to_string(),
        }
    }
}

impl ImportConfig {
    /// 从 JSON 文件读取配置（缺省字段使用默认值）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: ImportConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 读取用户配置目录下的配置,文件不存在时使用默认值
    pub fn load_or_default() -> ImportResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_json_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> ImportResult<()> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ImportError::ConfigValueError {
                key: "delimiter".to_string(),
                value: self.delimiter.to_string(),
                message: "分隔符必须为 ASCII 字符,且不能是引号或换行".to_string(),
            });
        }
        if self.default_failure_message.trim().is_empty() {
            return Err(ImportError::ConfigValueError {
                key: "default_failure_message".to_string(),
                value: self.default_failure_message.clone(),
                message: "默认失败提示不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// CSV 分隔符字节（非 ASCII 时回退为逗号）
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    pub fn submit_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.submit_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ImportConfig::default();
        assert_eq!(config.delimiter_byte(), b',');
        assert_eq!(config.submit_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"delimiter": ";", "submit_interval_ms": 0}}"#).unwrap();

        let config = ImportConfig::from_json_file(temp_file.path()).unwrap();

        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.submit_interval_ms, 0);
        assert_eq!(config.default_failure_message, "创建失败");
    }

    #[test]
    fn test_from_json_file_malformed() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let result = ImportConfig::from_json_file(temp_file.path());
        assert!(matches!(result, Err(ImportError::ConfigError { .. })));
    }

    #[test]
    fn test_validate_rejects_quote_delimiter() {
        let config = ImportConfig {
            delimiter: '"',
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ImportError::ConfigValueError { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_line_break_delimiters() {
        for delimiter in ['\n', '\r'] {
            let config = ImportConfig {
                delimiter,
                ..Default::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ImportError::ConfigValueError { ref key, .. }) if key == "delimiter"
                ),
                "{:?}",
                delimiter
            );
        }
    }
}
