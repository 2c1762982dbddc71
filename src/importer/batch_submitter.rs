// ==========================================
// 培训管理系统 - 批量提交器
// ==========================================
// 职责: 将校验通过的行逐条提交到远端创建接口
// 红线:
// - 严格按源文件顺序串行提交: 上一条完成（成功或失败）后才发起下一条
// - 单行失败不中断,之后的行照常提交; 不重试
// - 每提交完一行更新一次进度; 结束时 attempted == total
// - 只提交 errors 为空的行
// ==========================================

use crate::config::ImportConfig;
use crate::domain::{ImportOutcome, SubmissionProgress, SubmissionReport, ValidationResult};
use crate::importer::import_traits::{RecordSchema, RecordSink};
use crate::importer::result_aggregator::ResultAggregator;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct BatchSubmitter {
    interval: Duration,              // 相邻两次提交的间隔
    default_failure_message: String, // 远端未给出原因时的提示
    progress_tx: watch::Sender<SubmissionProgress>,
}

impl BatchSubmitter {
    pub fn new(config: &ImportConfig) -> Self {
        let (progress_tx, _) = watch::channel(SubmissionProgress::default());
        Self {
            interval: config.submit_interval(),
            default_failure_message: config.default_failure_message.clone(),
            progress_tx,
        }
    }

    /// 订阅进度（可在提交开始前订阅）
    pub fn subscribe(&self) -> watch::Receiver<SubmissionProgress> {
        self.progress_tx.subscribe()
    }

    /// 当前进度
    pub fn progress(&self) -> SubmissionProgress {
        *self.progress_tx.borrow()
    }

    /// 提交校验通过的行
    ///
    /// # 参数
    /// - schema: 记录 → 载荷转换
    /// - sink: 远端单条创建接口
    /// - results: 完整校验结果（本方法自行过滤出有效行）
    ///
    /// # 返回
    /// - SubmissionReport: 每个实际提交行一个结果,顺序与源文件一致
    #[instrument(skip_all, fields(run_id = tracing::field::Empty))]
    pub async fn submit<S, K>(
        &self,
        schema: &S,
        sink: &K,
        results: &[ValidationResult<S::Record>],
    ) -> SubmissionReport
    where
        S: RecordSchema,
        K: RecordSink<S::Payload> + ?Sized,
    {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        let started_at = Utc::now();

        let valid: Vec<&ValidationResult<S::Record>> =
            results.iter().filter(|r| r.is_valid()).collect();
        let total = valid.len();
        info!(kind = %schema.kind(), total = total, skipped = results.len() - total, "开始提交");

        self.progress_tx
            .send_replace(SubmissionProgress { attempted: 0, total });

        let mut outcomes = Vec::with_capacity(total);
        for (idx, result) in valid.into_iter().enumerate() {
            if idx > 0 && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }

            let label = schema.label(&result.data);
            let outcome = match schema.build_payload(&result.data) {
                Ok(payload) => match sink.create_record(&payload).await {
                    Ok(()) => {
                        debug!(row = result.row, "提交成功");
                        ImportOutcome::succeeded(result.row, label)
                    }
                    Err(e) => {
                        let reason = e
                            .reason()
                            .unwrap_or_else(|| self.default_failure_message.clone());
                        warn!(row = result.row, reason = %reason, "提交失败");
                        ImportOutcome::failed(result.row, label, reason)
                    }
                },
                Err(message) => {
                    warn!(row = result.row, error = %message, "载荷构造失败");
                    ImportOutcome::failed(result.row, label, message)
                }
            };
            outcomes.push(outcome);

            self.progress_tx.send_replace(SubmissionProgress {
                attempted: idx + 1,
                total,
            });
        }

        let summary = ResultAggregator::summarize(&outcomes);
        info!(
            success = summary.success_count,
            failed = summary.failure_count,
            "提交完成"
        );

        SubmissionReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
            summary,
        }
    }
}
