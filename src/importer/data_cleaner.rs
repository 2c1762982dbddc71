// ==========================================
// 培训管理系统 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 表格日期序列号换算 / 数值格式化
// ==========================================

use chrono::{Days, NaiveDate};

/// 表格日期序列号上限（9999-12-31）
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM,可选 UPPER）
    pub fn clean_text(value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 表格日期序列号 → 日历日期
    ///
    /// # 规则
    /// - 第 0 天 = 1899-12-30（与表格软件一致,已包含 1900 闰年兼容偏移）
    /// - 小数部分（时刻）丢弃
    ///
    /// # 返回
    /// - None: 负数/非有限值/超出 9999-12-31
    pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 0.0 || serial > MAX_SERIAL_DAY {
            return None;
        }
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        epoch.checked_add_days(Days::new(serial.floor() as u64))
    }

    /// 纯数字文本按日期序列号解释,成功时返回 YYYY-MM-DD
    pub fn serial_text_to_iso(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        let serial: f64 = trimmed.parse().ok()?;
        Self::serial_to_date(serial).map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// 数值格式化: 整数值不带小数部分
    pub fn format_number(value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            value.to_string()
        }
    }

    /// 电话号码标准化: 去除空格、`-`、括号,保留开头的 `+`
    pub fn normalize_phone(value: &str) -> String {
        let trimmed = value.trim();
        let (prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };
        let digits: String = rest
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        format!("{}{}", prefix, digits)
    }
}
