// ==========================================
// 培训管理系统 - 导入流水线
// ==========================================
// 流程: 文件 → 原始行 → 记录 → 校验（查引用目录）→ 串行提交 → 汇总
// 说明: 解析与校验为同步纯计算,全部完成后才开始提交
//       人工修改只回到校验阶段,不重新解析文件
// ==========================================

use crate::config::ImportConfig;
use crate::domain::{SubmissionProgress, SubmissionReport, TableSource};
use crate::importer::batch_submitter::BatchSubmitter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::import_traits::{RecordSchema, RecordSink, ReferenceProvider};
use crate::importer::reference_catalog::ReferenceCatalog;
use crate::importer::template::TemplateFile;
use crate::importer::validation_session::ValidationSession;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

pub struct ImportPipeline<S, K>
where
    S: RecordSchema,
    K: RecordSink<S::Payload>,
{
    schema: Arc<S>,
    sink: Arc<K>,
    config: ImportConfig,
    parser: UniversalFileParser,
    catalog: Arc<ReferenceCatalog>,
    submitter: BatchSubmitter,
}

impl<S, K> ImportPipeline<S, K>
where
    S: RecordSchema,
    K: RecordSink<S::Payload>,
{
    /// 创建流水线
    ///
    /// # 返回
    /// - Err(ImportError::ConfigValueError): 配置值非法
    pub fn new(schema: S, sink: Arc<K>, config: ImportConfig) -> ImportResult<Self> {
        config.validate()?;
        Ok(Self {
            schema: Arc::new(schema),
            sink,
            parser: UniversalFileParser::new(&config),
            catalog: Arc::new(ReferenceCatalog::default()),
            submitter: BatchSubmitter::new(&config),
            config,
        })
    }

    /// 加载引用目录（校验前调用一次）
    ///
    /// 该导入类型没有引用字段时不访问远端
    #[instrument(skip_all, fields(kind = %self.schema.kind()))]
    pub async fn load_catalog(
        &mut self,
        provider: &dyn ReferenceProvider,
    ) -> ImportResult<&ReferenceCatalog> {
        if self.schema.reference_label().is_none() {
            debug!("无引用字段,跳过引用数据加载");
            return Ok(self.catalog.as_ref());
        }

        let catalog = ReferenceCatalog::load(provider).await.map_err(|e| {
            error!(error = %e, "引用数据加载失败");
            e
        })?;
        info!(count = catalog.len(), "引用目录就绪");
        self.catalog = Arc::new(catalog);
        Ok(self.catalog.as_ref())
    }

    /// 解析并校验上传文件
    ///
    /// # 返回
    /// - Ok(ValidationSession): 每个数据行一个校验结果
    /// - Err(ImportError::Parse): 文件无法解析,不产生任何行
    #[instrument(skip_all, fields(kind = %self.schema.kind(), file = %source.file_name))]
    pub fn prepare(&self, source: &TableSource) -> ImportResult<ValidationSession<S>> {
        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let rows = self.parser.parse(source).map_err(|e| {
            error!(error = %e, "文件解析失败");
            ImportError::from(e)
        })?;
        info!(total_rows = rows.len(), "文件解析完成");

        // === 步骤 2: 解释 + 校验 ===
        debug!("步骤 2: 行校验");
        let session = ValidationSession::from_rows(self.schema.clone(), self.catalog.clone(), &rows);
        let counts = session.counts();
        info!(
            total = counts.total,
            valid = counts.valid,
            invalid = counts.invalid,
            "行校验完成"
        );

        Ok(session)
    }

    /// 按路径读取文件并校验（文件类型由扩展名推断）
    pub fn prepare_path<P: AsRef<Path>>(&self, path: P) -> ImportResult<ValidationSession<S>> {
        let source = UniversalFileParser::read_source(path)?;
        self.prepare(&source)
    }

    /// 串行提交会话中的有效行
    pub async fn submit(&self, session: &ValidationSession<S>) -> SubmissionReport {
        self.submitter
            .submit(self.schema.as_ref(), self.sink.as_ref(), session.results())
            .await
    }

    /// 下载模板（表头语言取自配置）
    pub fn template(&self) -> TemplateFile {
        self.schema.template(&self.config.locale)
    }

    /// 订阅提交进度
    pub fn progress(&self) -> watch::Receiver<SubmissionProgress> {
        self.submitter.subscribe()
    }

    pub fn submitter(&self) -> &BatchSubmitter {
        &self.submitter
    }

    pub fn catalog(&self) -> Arc<ReferenceCatalog> {
        self.catalog.clone()
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }
}
