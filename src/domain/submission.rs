// ==========================================
// 培训管理系统 - 提交结果模型
// ==========================================
// 红线: ImportOutcome 仅为实际提交过的行生成
//       每次提交运行生成新的汇总,不与旧汇总合并
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ImportOutcome - 单行提交结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub row: usize,            // 原始文件行号
    pub label: String,         // 报告用标签（如记录名称）
    pub error: Option<String>, // None = 成功
}

impl ImportOutcome {
    pub fn succeeded(row: usize, label: impl Into<String>) -> Self {
        Self {
            row,
            label: label.into(),
            error: None,
        }
    }

    pub fn failed(row: usize, label: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            row,
            label: label.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

// ==========================================
// ImportSummary - 提交汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub success_count: usize,
    pub failure_count: usize,
    pub failures: Vec<ImportOutcome>, // 按行号顺序
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

// ==========================================
// SubmissionProgress - 提交进度
// ==========================================
// 每提交完一行更新一次; 结束时 attempted == total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionProgress {
    pub attempted: usize,
    pub total: usize,
}

impl SubmissionProgress {
    pub fn is_complete(&self) -> bool {
        self.attempted >= self.total
    }

    /// 完成百分比（total 为 0 时视为 100）
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.attempted as f64 * 100.0 / self.total as f64
        }
    }
}

// ==========================================
// SubmissionReport - 一次提交运行的完整报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub run_id: String, // 运行 ID（UUID）
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<ImportOutcome>,
    pub summary: ImportSummary,
}

impl SubmissionReport {
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
