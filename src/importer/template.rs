// ==========================================
// 培训管理系统 - 导入模板
// ==========================================
// 职责: 生成与解析器列布局一致的下载模板（表头 + 一行示例）
// 说明: 解析器按列位置读取,表头文字仅作提示,可随语言变化
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFile {
    pub file_name: String,
    pub headers: Vec<String>,
    pub example: Vec<String>,
}

impl TemplateFile {
    pub fn new(file_name: impl Into<String>, headers: Vec<String>, example: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            headers,
            example,
        }
    }

    /// 渲染为 UTF-8 CSV（带 BOM,便于表格软件正确识别中文）
    pub fn to_csv_bytes(&self) -> ImportResult<Vec<u8>> {
        let mut buffer = vec![0xEF, 0xBB, 0xBF];
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            writer
                .write_record(&self.headers)
                .map_err(|e| ImportError::TemplateError(e.to_string()))?;
            writer
                .write_record(&self.example)
                .map_err(|e| ImportError::TemplateError(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| ImportError::TemplateError(e.to_string()))?;
        }
        Ok(buffer)
    }
}
