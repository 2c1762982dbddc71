// ==========================================
// 培训管理系统 - 结果汇总
// ==========================================
// 职责: 单行提交结果 → 汇总（纯归约,可随时由结果列表重算）
// ==========================================

use crate::domain::{ImportOutcome, ImportSummary};

pub struct ResultAggregator;

impl ResultAggregator {
    /// 汇总提交结果
    ///
    /// # 返回
    /// - success_count: error 为 None 的数量
    /// - failure_count: error 非 None 的数量
    /// - failures: 失败结果,保持输入顺序
    pub fn summarize(outcomes: &[ImportOutcome]) -> ImportSummary {
        let failures: Vec<ImportOutcome> = outcomes
            .iter()
            .filter(|o| !o.is_success())
            .cloned()
            .collect();

        ImportSummary {
            success_count: outcomes.len() - failures.len(),
            failure_count: failures.len(),
            failures,
        }
    }

    /// 单行文字描述: 成功 N 条,失败 M 条
    pub fn describe(summary: &ImportSummary) -> String {
        let mut text = format!(
            "成功 {} 条,失败 {} 条",
            summary.success_count, summary.failure_count
        );
        for failure in &summary.failures {
            text.push_str(&format!(
                "\n第 {} 行 {}: {}",
                failure.row,
                failure.label,
                failure.error.as_deref().unwrap_or_default()
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts_and_order() {
        let outcomes = vec![
            ImportOutcome::succeeded(2, "A"),
            ImportOutcome::failed(3, "B", "名称已存在"),
            ImportOutcome::succeeded(4, "C"),
            ImportOutcome::failed(5, "D", "创建失败"),
        ];

        let summary = ResultAggregator::summarize(&outcomes);

        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 2);
        assert_eq!(summary.total(), 4);
        assert_eq!(
            summary.failures.iter().map(|f| f.row).collect::<Vec<_>>(),
            vec![3, 5]
        );
    }

    #[test]
    fn test_summarize_empty() {
        let summary = ResultAggregator::summarize(&[]);
        assert_eq!(summary, ImportSummary::default());
    }

    #[test]
    fn test_describe() {
        let summary = ResultAggregator::summarize(&[
            ImportOutcome::succeeded(2, "A"),
            ImportOutcome::failed(3, "B", "名称已存在"),
        ]);

        let text = ResultAggregator::describe(&summary);

        assert!(text.starts_with("成功 1 条,失败 1 条"));
        assert!(text.contains("第 3 行 B: 名称已存在"));
    }
}
