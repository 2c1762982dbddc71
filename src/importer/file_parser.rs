// ==========================================
// 培训管理系统 - 文件解析器实现
// ==========================================
// 职责: 文件内容 → 原始行（阶段 0）
// 支持: CSV（分隔符可配置,支持引号内分隔符）/ 工作簿（仅读第一个工作表）
// ==========================================

use crate::config::ImportConfig;
use crate::domain::{FileKind, RawRow, TableSource};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ParseError;
use crate::importer::import_traits::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// UTF-8 BOM
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 数据行起始行号（第 1 行为表头）
const FIRST_DATA_ROW: usize = 2;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl FileParser for CsvParser {
    fn parse_rows(&self, bytes: &[u8]) -> Result<Vec<RawRow>, ParseError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .delimiter(self.delimiter)
            .from_reader(bytes);
        let mut records = reader.records();

        // 读取表头
        let header = records.next().ok_or(ParseError::MissingHeader)??;
        let headers: Arc<[String]> = header.iter().map(|h| h.trim().to_string()).collect();

        // 读取所有行
        // 行号取记录起始的物理行（csv 会跳过纯空行）
        let mut rows = Vec::new();
        for (idx, result) in records.enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + FIRST_DATA_ROW);
            let cells: Vec<String> = record.iter().map(str::to_string).collect();
            let row = RawRow::new(row_number, headers.clone(), cells);

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ParseError::NoDataRows);
        }
        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → 文本
    ///
    /// # 规则
    /// - 日期单元格换算为 YYYY-MM-DD,纪元（1900/1904）随工作簿
    /// - 整数值浮点不带小数部分
    /// - 空单元格/错误单元格为空串
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty | Data::Error(_) => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => DataCleaner::format_number(*f),
            Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(|d| d.date().format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| DataCleaner::format_number(dt.as_f64())),
            Data::DateTimeIso(s) => s.split('T').next().unwrap_or(s).to_string(),
            #[allow(unreachable_patterns)]
            other => other.to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_rows(&self, bytes: &[u8]) -> Result<Vec<RawRow>, ParseError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ParseError::NoWorksheet)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 区域宽度: 行尾空单元格同样输出为空串
        let width = range.width();
        // 区域从首个有值单元格开始,前导空行计入行号
        let start_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows.next().ok_or(ParseError::MissingHeader)?;
        let headers: Arc<[String]> = header_row
            .iter()
            .map(|cell| Self::cell_to_string(cell).trim().to_string())
            .collect();

        // 读取数据行
        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            let mut cells: Vec<String> = data_row.iter().map(Self::cell_to_string).collect();
            cells.resize(width, String::new());
            let row = RawRow::new(start_row + idx + FIRST_DATA_ROW, headers.clone(), cells);

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ParseError::NoDataRows);
        }
        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（按声明类型或扩展名选择）
// ==========================================
pub struct UniversalFileParser {
    csv: CsvParser,
    excel: ExcelParser,
}

impl UniversalFileParser {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            csv: CsvParser::new(config.delimiter_byte()),
            excel: ExcelParser,
        }
    }

    /// 按声明类型解析
    pub fn parse(&self, source: &TableSource) -> Result<Vec<RawRow>, ParseError> {
        match source.kind {
            FileKind::DelimitedText => self.csv.parse_rows(&source.bytes),
            FileKind::Workbook => self.excel.parse_rows(&source.bytes),
        }
    }

    /// 读取文件并按扩展名解析
    pub fn parse_path<P: AsRef<Path>>(&self, file_path: P) -> Result<Vec<RawRow>, ParseError> {
        let source = Self::read_source(file_path)?;
        self.parse(&source)
    }

    /// 读取文件内容并按扩展名推断类型
    pub fn read_source<P: AsRef<Path>>(file_path: P) -> Result<TableSource, ParseError> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ParseError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let kind = FileKind::from_extension(&ext).ok_or(ParseError::UnsupportedFormat(ext))?;

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(TableSource::new(file_name, kind, bytes))
    }
}
