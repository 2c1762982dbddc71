// ==========================================
// 培训管理系统 - 字段规则
// ==========================================
// 职责: 必填 / 数值 / 日期 / 枚举 / 邮箱 / 电话 校验
// 约定: 每条规则返回 Option<String>,Some 即错误描述;
//       格式规则遇到空值直接通过（空值由必填规则负责）
// ==========================================

use crate::importer::data_cleaner::DataCleaner;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// 支持的日期格式说明（用于错误提示）
pub const ACCEPTED_DATE_FORMATS: &str = "YYYY-MM-DD、YYYY/MM/DD、DD-MM-YYYY、DD/MM/YYYY";

// ==========================================
// DateCheck - 日期解析结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Valid(NaiveDate),
    BadFormat,   // 不符合任何支持的格式
    InvalidDate, // 格式匹配但日历上不存在（如 2024-02-30）
}

/// 日期格式: (文本模式, chrono 格式)
fn date_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"^\d{4}-\d{1,2}-\d{1,2}$", "%Y-%m-%d"),
            (r"^\d{4}/\d{1,2}/\d{1,2}$", "%Y/%m/%d"),
            (r"^\d{1,2}-\d{1,2}-\d{4}$", "%d-%m-%Y"),
            (r"^\d{1,2}/\d{1,2}/\d{4}$", "%d/%m/%Y"),
        ]
        .into_iter()
        .map(|(pattern, format)| (Regex::new(pattern).expect("日期正则非法"), format))
        .collect()
    })
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("邮箱正则非法"))
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?\d{7,15}$").expect("电话正则非法"))
}

pub struct FieldRules;

impl FieldRules {
    /// 必填（TRIM 后非空）
    pub fn required(label: &str, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            Some(format!("{}不能为空", label))
        } else {
            None
        }
    }

    /// 解析正数
    pub fn parse_positive(value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// 数值且严格大于 0
    pub fn positive_number(label: &str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if !v.is_finite() => Some(format!("{}必须为数字: {}", label, trimmed)),
            Ok(v) if v <= 0.0 => Some(format!("{}必须大于 0: {}", label, trimmed)),
            Ok(_) => None,
            Err(_) => Some(format!("{}必须为数字: {}", label, trimmed)),
        }
    }

    /// 解析日期（先匹配格式,再校验日历有效性）
    pub fn check_date(value: &str) -> DateCheck {
        let trimmed = value.trim();
        for (pattern, format) in date_patterns() {
            if pattern.is_match(trimmed) {
                return match NaiveDate::parse_from_str(trimmed, format) {
                    Ok(date) => DateCheck::Valid(date),
                    Err(_) => DateCheck::InvalidDate,
                };
            }
        }
        DateCheck::BadFormat
    }

    /// 日期格式 + 日历有效性
    pub fn date(label: &str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match Self::check_date(trimmed) {
            DateCheck::Valid(_) => None,
            DateCheck::BadFormat => Some(format!(
                "{}格式错误: {}（支持 {}）",
                label, trimmed, ACCEPTED_DATE_FORMATS
            )),
            DateCheck::InvalidDate => Some(format!("{}不是有效日期: {}", label, trimmed)),
        }
    }

    /// 枚举取值（由调用方完成不区分大小写的匹配）
    pub fn one_of(label: &str, value: &str, matched: bool, tokens: &[&str]) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || matched {
            return None;
        }
        Some(format!(
            "{}取值无效: {}（可选: {}）",
            label,
            trimmed,
            tokens.join("/")
        ))
    }

    /// 邮箱格式
    pub fn email(label: &str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || email_pattern().is_match(trimmed) {
            None
        } else {
            Some(format!("{}格式错误: {}", label, trimmed))
        }
    }

    /// 电话: 去除分隔符后为 7-15 位数字,可带开头的 `+`
    pub fn phone(label: &str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || phone_pattern().is_match(&DataCleaner::normalize_phone(trimmed)) {
            None
        } else {
            Some(format!("{}格式错误: {}", label, trimmed))
        }
    }
}
