// ==========================================
// 培训管理系统 - 原始行模型
// ==========================================
// 职责: 文件解析产物（表头 → 原始单元格）
// 生命周期: 每次上传解析一次,之后不可变
// ==========================================

use crate::domain::types::FileKind;
use std::sync::Arc;

// ==========================================
// TableSource - 待解析的文件内容
// ==========================================
#[derive(Debug, Clone)]
pub struct TableSource {
    pub file_name: String, // 原始文件名（仅用于日志/报告）
    pub kind: FileKind,    // 声明的文件类型
    pub bytes: Vec<u8>,    // 文件内容
}

impl TableSource {
    pub fn new(file_name: impl Into<String>, kind: FileKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            bytes,
        }
    }

    /// 分隔符文本（CSV）来源
    pub fn csv(file_name: impl Into<String>, text: &str) -> Self {
        Self::new(file_name, FileKind::DelimitedText, text.as_bytes().to_vec())
    }
}

// ==========================================
// RawRow - 原始行
// ==========================================
// 行号从 2 开始（第 1 行为表头）
// 表头在同一文件的所有行间共享
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize,
    headers: Arc<[String]>,
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(row_number: usize, headers: Arc<[String]>, cells: Vec<String>) -> Self {
        Self {
            row_number,
            headers,
            cells,
        }
    }

    /// 按列位置读取原始单元格
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// 按列位置读取并去除首尾空白,缺失列视为空串
    pub fn text(&self, index: usize) -> &str {
        self.cell(index).map(str::trim).unwrap_or("")
    }

    /// 按表头文字读取（表头匹配忽略首尾空白与大小写）
    pub fn get(&self, header: &str) -> Option<&str> {
        let wanted = header.trim();
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
            .and_then(|idx| self.cell(idx))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// (表头, 单元格) 有序序列; 超出表头宽度的列表头为空串
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().enumerate().map(move |(idx, value)| {
            let header = self.headers.get(idx).map(String::as_str).unwrap_or("");
            (header, value.as_str())
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 所有单元格均为空白
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}
