// ==========================================
// 导入流水线集成测试
// ==========================================
// 测试目标: 文件 → 校验 → 串行提交 → 汇总 的完整流程
// ==========================================


use std::sync::Arc;
use test_helpers::{csv_source, write_temp_file, MockReferenceProvider, ScriptedSink};
use training_import::config::ImportConfig;
use training_import::domain::{BatchRecord, SubmissionProgress};
use training_import::importer::{
    BatchSchema, CourseSchema, ImportError, ImportPipeline, ParseError, ParticipantSchema,
    ReferenceCatalog, ResultAggregator, SubmitError,
};
use training_import::logging;
use training_import::ReferenceEntity;

const BATCH_HEADER: &str = "name,start_date,duration,category,description";

fn test_config() -> ImportConfig {
    ImportConfig {
        submit_interval_ms: 0,
        ..Default::default()
    }
}

async fn batch_pipeline(sink: Arc<ScriptedSink>) -> ImportPipeline<BatchSchema, ScriptedSink> {
    let mut pipeline = ImportPipeline::new(BatchSchema, sink, test_config()).unwrap();
    pipeline
        .load_catalog(&MockReferenceProvider::categories())
        .await
        .unwrap();
    pipeline
}

#[tokio::test]
async fn test_row_count_preservation() {
    logging::init_test();

    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "Alpha,2024-01-01,12,General,",
            "Beta,2024-02-30,12,General,",
            "Gamma,2024-03-01,0,Unknown,",
            "Delta,01/04/2024,4,data science,evening",
        ]))
        .unwrap();

    let counts = session.counts();
    assert_eq!(session.len(), 4);
    assert_eq!(counts.total, 4);
    assert_eq!(counts.valid + counts.invalid, 4);
    assert_eq!(counts.valid, 2);
    assert_eq!(
        session.results().iter().map(|r| r.row).collect::<Vec<_>>(),
        vec![2, 3, 4, 5]
    );
}

#[tokio::test]
async fn test_date_rejection_scenario() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[BATCH_HEADER, "Beta,2024-02-30,12,General,"]))
        .unwrap();

    let result = &session.results()[0];
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("不是有效日期"));
    assert!(result.errors[0].contains("2024-02-30"));
}

#[tokio::test]
async fn test_csv_quoting_scenario() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[
            "name,start_date,duration,category",
            "\"Acme, Inc.\",2024-01-01,12,General",
        ]))
        .unwrap();

    let result = &session.results()[0];
    assert!(result.is_valid(), "errors: {:?}", result.errors);
    assert_eq!(result.data.name, "Acme, Inc.");
    assert_eq!(result.data.category_id, Some(1));
}

#[tokio::test]
async fn test_deterministic_revalidation() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let source = csv_source(&[
        BATCH_HEADER,
        ",2024-13-01,abc,Unknown,",
        "Acme,2024-01-01,12,General,",
        "ACME,2024-01-01,12,General,",
    ]);

    let first = pipeline.prepare(&source).unwrap();
    let mut second = pipeline.prepare(&source).unwrap();
    second.revalidate();

    assert_eq!(first.results(), second.results());
}

#[tokio::test]
async fn test_first_occurrence_exemption() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "Acme,2024-01-01,12,General,",
            "Other,2024-01-01,12,General,",
            "acme,2024-01-01,12,General,",
            "ACME,2024-01-01,12,General,",
        ]))
        .unwrap();

    let results = session.results();
    assert!(results[0].is_valid());
    assert!(results[1].is_valid());
    assert_eq!(results[2].errors, vec!["批次名称与第 2 行重复: acme".to_string()]);
    assert_eq!(results[3].errors, vec!["批次名称与第 2 行重复: ACME".to_string()]);
}

#[tokio::test]
async fn test_duplicate_points_at_source_line_across_empty_lines() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "",
            "Acme,2024-01-01,12,General,",
            "",
            "acme,2024-01-01,12,General,",
        ]))
        .unwrap();

    let results = session.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].row, 3);
    assert_eq!(results[1].row, 5);
    assert_eq!(results[1].errors, vec!["批次名称与第 3 行重复: acme".to_string()]);
}

#[tokio::test]
async fn test_reference_resolution_round_trip() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "A,2024-01-01,12,DATA SCIENCE,",
            "B,2024-01-01,12,Data,",
        ]))
        .unwrap();

    let resolved = &session.results()[0];
    assert!(resolved.is_valid());
    assert_eq!(resolved.data.category_id, Some(2));

    let unresolved = &session.results()[1];
    let reference_errors: Vec<_> = unresolved
        .errors
        .iter()
        .filter(|e| e.starts_with("类别"))
        .collect();
    assert_eq!(reference_errors.len(), 1);
    assert!(reference_errors[0].contains("Data"));
    assert_eq!(unresolved.data.category_id, None);
}

#[tokio::test]
async fn test_mutual_exclusivity_in_course_upload() {
    let sink = Arc::new(ScriptedSink::new());
    let mut pipeline = ImportPipeline::new(CourseSchema::new(), sink, test_config()).unwrap();
    pipeline
        .load_catalog(&MockReferenceProvider::categories())
        .await
        .unwrap();

    let session = pipeline
        .prepare(&csv_source(&[
            "name,code,mode,category,s1,c1,th,tm,ph,pm",
            "Nursing,NUR-1,full_time,General,Anatomy,A1,40,100,,",
            "Pharmacy,PHA-1,online,General,Chemistry,C1,40,100,20,50",
            "Surgery,SUR-1,part_time,General,Theatre,T1,,,,",
            "Biology,BIO-1,Full-Time,General",
        ]))
        .unwrap();

    let results = session.results();
    assert!(results[0].is_valid(), "errors: {:?}", results[0].errors);
    assert!(results[1].errors[0].contains("只能填写其一"));
    assert!(results[2].errors[0].contains("须填写理论或实践"));
    assert!(results[3].is_valid());
    assert!(results[3].data.subjects.is_empty());
}

#[tokio::test]
async fn test_submission_ordering_and_independence() {
    logging::init_test();

    let sink = Arc::new(
        ScriptedSink::new().fail_on(3, SubmitError::Rejected("批次名称已存在".to_string())),
    );
    let pipeline = batch_pipeline(sink.clone()).await;
    sink.watch_progress(pipeline.progress());

    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "R1,2024-01-01,12,General,",
            "R2,2024-01-01,12,General,",
            "R3,2024-01-01,12,General,",
            "R4,2024-01-01,12,General,",
            "R5,2024-01-01,12,General,",
        ]))
        .unwrap();
    assert_eq!(session.counts().valid, 5);

    let report = pipeline.submit(&session).await;

    // 5 条全部尝试,顺序与源文件一致
    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(
        report.outcomes.iter().map(|o| o.row).collect::<Vec<_>>(),
        vec![2, 3, 4, 5, 6]
    );
    assert_eq!(report.outcomes[2].error.as_deref(), Some("批次名称已存在"));
    assert!(report.outcomes[3].is_success());
    assert!(report.outcomes[4].is_success());

    let calls = sink.calls();
    let names: Vec<_> = calls
        .iter()
        .map(|c| c.payload["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["R1", "R2", "R3", "R4", "R5"]);
    assert!(!sink.overlapped());

    // 每行提交前可观察到上一行完成后的进度
    for (idx, call) in calls.iter().enumerate() {
        assert_eq!(
            call.progress_seen,
            Some(SubmissionProgress {
                attempted: idx,
                total: 5
            })
        );
    }
    assert_eq!(
        *pipeline.progress().borrow(),
        SubmissionProgress {
            attempted: 5,
            total: 5
        }
    );

    assert_eq!(report.summary.success_count, 4);
    assert_eq!(report.summary.failure_count, 1);
    assert_eq!(report.summary.failures[0].row, 4);
    assert_eq!(report.summary, ResultAggregator::summarize(&report.outcomes));
}

#[tokio::test]
async fn test_invalid_rows_are_not_submitted() {
    let sink = Arc::new(ScriptedSink::new().fail_on(1, SubmitError::Unspecified));
    let pipeline = batch_pipeline(sink.clone()).await;
    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "Bad,2024-02-30,12,General,",
            "Good,2024-01-01,12,General,",
        ]))
        .unwrap();

    let report = pipeline.submit(&session).await;

    assert_eq!(sink.calls().len(), 1);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].row, 3);
    assert_eq!(report.outcomes[0].error.as_deref(), Some("创建失败"));
}

#[tokio::test]
async fn test_each_run_produces_new_report() {
    let sink = Arc::new(ScriptedSink::new());
    let pipeline = batch_pipeline(sink.clone()).await;
    let session = pipeline
        .prepare(&csv_source(&[BATCH_HEADER, "A,2024-01-01,12,General,"]))
        .unwrap();

    let first = pipeline.submit(&session).await;
    let second = pipeline.submit(&session).await;

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.summary.total(), 1);
    assert_eq!(second.summary.total(), 1);
}

#[tokio::test]
async fn test_edit_row_then_submit() {
    let sink = Arc::new(ScriptedSink::new());
    let pipeline = batch_pipeline(sink.clone()).await;
    let mut session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "Acme,2024-01-01,12,General,",
            "acme,2024-02-30,12,Unknown,",
        ]))
        .unwrap();
    assert_eq!(session.results()[1].errors.len(), 3);

    let edited = session
        .edit_row(
            3,
            BatchRecord {
                name: "Beta".to_string(),
                start_date: "2024-02-29".to_string(),
                duration: "6".to_string(),
                category: "general".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(edited.is_valid());
    assert_eq!(edited.data.category_id, Some(1));

    let report = pipeline.submit(&session).await;
    assert_eq!(report.summary.success_count, 2);
    assert_eq!(sink.calls()[1].payload["start_date"], "2024-02-29");
}

#[tokio::test]
async fn test_participant_upload_skips_catalog() {
    let provider = MockReferenceProvider::categories();
    let sink = Arc::new(ScriptedSink::new());
    let mut pipeline = ImportPipeline::new(ParticipantSchema::new(77), sink.clone(), test_config())
        .unwrap();
    pipeline.load_catalog(&provider).await.unwrap();
    assert_eq!(provider.calls(), 0);

    let session = pipeline
        .prepare(&csv_source(&[
            "name,email,phone,gender,organization",
            "Li Lei,li@example.com,+86 138 0013 8000,Male,",
            "Han Meimei,LI@example.com,13800138001,female,School",
            "Jim,jim@example,12,robot,",
        ]))
        .unwrap();

    let results = session.results();
    assert!(results[0].is_valid());
    assert_eq!(results[1].errors, vec!["邮箱与第 2 行重复: LI@example.com".to_string()]);
    assert_eq!(results[2].errors.len(), 3);

    pipeline.submit(&session).await;
    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload["workshop_id"], 77);
    assert_eq!(calls[0].payload["gender"], "male");
}

#[tokio::test]
async fn test_catalog_load_failure() {
    let mut pipeline =
        ImportPipeline::new(BatchSchema, Arc::new(ScriptedSink::new()), test_config()).unwrap();

    let result = pipeline
        .load_catalog(&MockReferenceProvider::failing("connection refused"))
        .await;

    assert!(matches!(result, Err(ImportError::ReferenceLoadError(msg)) if msg.contains("refused")));
}

#[tokio::test]
async fn test_replace_catalog_after_prepare() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let mut session = pipeline
        .prepare(&csv_source(&[BATCH_HEADER, "A,2024-01-01,12,Robotics,"]))
        .unwrap();
    assert!(!session.results()[0].is_valid());

    session.replace_catalog(Arc::new(ReferenceCatalog::from_entities(vec![
        ReferenceEntity::new(9, "Robotics"),
    ])));

    assert!(session.results()[0].is_valid());
    assert_eq!(session.results()[0].data.category_id, Some(9));
}

#[tokio::test]
async fn test_parse_errors_halt_pipeline() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;

    let header_only = pipeline.prepare(&csv_source(&[BATCH_HEADER]));
    assert!(matches!(
        header_only,
        Err(ImportError::Parse(ParseError::NoDataRows))
    ));

    let file = write_temp_file(".json", b"{}");
    let unsupported = pipeline.prepare_path(file.path());
    assert!(matches!(
        unsupported,
        Err(ImportError::Parse(ParseError::UnsupportedFormat(_)))
    ));
}

#[tokio::test]
async fn test_prepare_path_with_bom_and_blank_rows() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        format!("{}\nA,2024-01-01,12,General,\n,,,,\nB,45323,3,General,\n", BATCH_HEADER)
            .as_bytes(),
    );
    let file = write_temp_file(".csv", &bytes);

    let session = pipeline.prepare_path(file.path()).unwrap();

    assert_eq!(session.len(), 2);
    assert_eq!(session.results()[1].row, 4);
    assert_eq!(session.results()[1].data.start_date, "2024-02-01");
    assert!(session.results()[1].is_valid());
}

#[tokio::test]
async fn test_validation_table() {
    let pipeline = batch_pipeline(Arc::new(ScriptedSink::new())).await;
    let session = pipeline
        .prepare(&csv_source(&[
            BATCH_HEADER,
            "A,2024-01-01,12,General,",
            ",2024-01-01,12,General,",
        ]))
        .unwrap();

    let table = session.table();

    assert_eq!(table.len(), 2);
    assert!(table[0].valid);
    assert!(!table[1].valid);
    assert_eq!(table[1].row, 3);
    assert_eq!(table[1].errors, vec!["批次名称不能为空".to_string()]);
}
