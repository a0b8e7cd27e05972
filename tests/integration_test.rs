use article_image_dispatch::clients::CannedResponse;
use article_image_dispatch::{
    ArticleData, ArticleLayout, CannedImageClient, ChannelError, Config, ConfigError,
    CredentialPool, DispatchEvent, ImagePipeline, RecordingEventSink, Section,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn article(theme: Option<&str>, sections: Vec<Section>) -> ArticleData {
    ArticleData {
        title: "AI活用で失敗する企業の特徴".to_string(),
        slug: Some("ai-failure-patterns-test".to_string()),
        theme: theme.map(str::to_string),
        sections,
    }
}

fn numbered_sections(n: usize) -> Vec<Section> {
    (1..=n)
        .map(|i| Section::new(format!("セクション{}", i), format!("テストコンテンツ{}", i)))
        .collect()
}

fn config(keys: &[&str], cooldown_secs: u64) -> Config {
    Config {
        batch_cooldown_secs: cooldown_secs,
        ..Config::with_api_keys(keys.iter().copied())
    }
}

fn pipeline(
    config: Config,
    client: Arc<CannedImageClient>,
    sink: Arc<RecordingEventSink>,
) -> ImagePipeline {
    let pool = CredentialPool::from_config(&config).expect("凭据池创建失败");
    ImagePipeline::new(config, pool, client, sink).expect("管线创建失败")
}

fn layout(root: &Path) -> ArticleLayout {
    ArticleLayout::new(root, "20260101", "ai-failure-patterns-test")
}

#[tokio::test(start_paused = true)]
async fn ten_images_over_four_channels_run_in_two_batches() {
    let dir = tempfile::tempdir().unwrap();
    let client = Arc::new(CannedImageClient::succeeding(b"png".to_vec()));
    let sink = Arc::new(RecordingEventSink::new());
    let pipeline = pipeline(config(&["k1", "k2", "k3", "k4"], 3), client.clone(), sink.clone());

    let report = pipeline
        .generate_in(&article(Some("AI導入に失敗する企業のパターン分析"), numbered_sections(9)), layout(dir.path()))
        .await
        .unwrap();

    assert_eq!(report.total_images, 10);
    assert_eq!(report.successful_images, 10);
    assert_eq!(sink.distributions(), vec![vec![2, 2, 2, 2], vec![1, 1, 0, 0]]);
    assert_eq!(sink.cooldowns(), 1);
    assert!(report.total_time >= Duration::from_secs(3));

    let per_channel = client.calls_per_channel();
    assert_eq!(per_channel["channel-1"], 3);
    assert_eq!(per_channel["channel-2"], 3);
    assert_eq!(per_channel["channel-3"], 2);
    assert_eq!(per_channel["channel-4"], 2);

    // 第二批在第一批全部完成之后才开始
    let events = sink.events();
    let first_done = events
        .iter()
        .position(|e| matches!(e, DispatchEvent::BatchFinished { ordinal: 1, .. }))
        .unwrap();
    let second_start = events
        .iter()
        .position(|e| matches!(e, DispatchEvent::BatchStarted { ordinal: 2, .. }))
        .unwrap();
    assert!(first_done < second_start);
}

#[tokio::test(start_paused = true)]
async fn channels_run_in_parallel_and_tasks_within_a_channel_run_in_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let client = Arc::new(CannedImageClient::with_default(CannedResponse::Delayed(
        Duration::from_secs(10),
        b"png".to_vec(),
    )));
    let sink = Arc::new(RecordingEventSink::new());
    let pipeline = pipeline(config(&["k1", "k2", "k3", "k4"], 0), client.clone(), sink.clone());

    let report = pipeline
        .generate_in(&article(None, numbered_sections(8)), layout(dir.path()))
        .await
        .unwrap();

    assert_eq!(report.successful_images, 8);
    assert_eq!(sink.distributions(), vec![vec![2, 2, 2, 2]]);
    // 四个通道各串行两次 10 秒调用：并行约 20 秒，全部串行则为 80 秒
    assert!(report.total_time >= Duration::from_secs(20));
    assert!(report.total_time < Duration::from_secs(30));

    let peaks = client.peak_in_flight_per_channel();
    assert_eq!(peaks.len(), 4);
    assert!(peaks.values().all(|&n| n == 1));
    assert_eq!(client.peak_in_flight(), 4);
}

#[tokio::test]
async fn empty_article_is_a_trivial_success() {
    let dir = tempfile::tempdir().unwrap();
    let client = Arc::new(CannedImageClient::succeeding(b"png".to_vec()));
    let sink = Arc::new(RecordingEventSink::new());
    let pipeline = pipeline(config(&["k1"], 0), client.clone(), sink.clone());

    let report = tokio_test::assert_ok!(pipeline.generate_in(&article(None, vec![]), layout(dir.path())).await);

    assert_eq!(report.total_images, 0);
    assert_eq!(report.successful_images, 0);
    assert!(report.results.is_empty());
    assert!(client.calls().is_empty());
    assert!(sink.distributions().is_empty());
    assert!(report.images_directory.is_dir());
}

#[tokio::test]
async fn single_channel_with_two_failures_reports_three_of_five() {
    let dir = tempfile::tempdir().unwrap();
    let client = Arc::new(
        CannedImageClient::succeeding(b"png".to_vec())
            .respond_when("テストコンテンツ2", CannedResponse::Fail(ChannelError::Status { code: 429 }))
            .respond_when("テストコンテンツ4", CannedResponse::Fail(ChannelError::MissingPayload)),
    );
    let sink = Arc::new(RecordingEventSink::new());
    let pipeline = pipeline(config(&["only"], 0), client.clone(), sink.clone());

    let report = pipeline
        .generate_in(&article(None, numbered_sections(5)), layout(dir.path()))
        .await
        .unwrap();

    assert_eq!(report.total_images, 5);
    assert_eq!(report.successful_images, 3);
    assert_eq!(report.failed_images(), 2);
    assert_eq!(report.results.iter().map(|r| r.task_id).collect::<Vec<_>>(), [0, 1, 2, 3, 4]);

    let failed: Vec<usize> = report.failures().map(|r| r.task_id).collect();
    assert_eq!(failed, [1, 3]);
    assert_eq!(sink.distributions(), vec![vec![5]]);
    assert_eq!(client.calls_per_channel()["channel-1"], 5);
}

#[tokio::test]
async fn missing_credentials_abort_before_any_dispatch() {
    let err = CredentialPool::from_config(&Config::default()).unwrap_err();
    assert!(matches!(err, ConfigError::NoCredentials));

    let err = CredentialPool::from_config(&Config::with_api_keys(["", " "])).unwrap_err();
    assert!(matches!(err, ConfigError::NoCredentials));
}

#[tokio::test]
async fn invalid_batch_size_is_rejected_at_construction() {
    let config = Config {
        max_batch_size: 0,
        ..Config::with_api_keys(["k1"])
    };
    let pool = CredentialPool::from_config(&config).unwrap();
    let client = Arc::new(CannedImageClient::succeeding(b"png".to_vec()));

    let result = ImagePipeline::new(config, pool, client.clone(), Arc::new(RecordingEventSink::new()));

    assert!(result.is_err());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn duplicate_sections_share_one_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let client = Arc::new(CannedImageClient::succeeding(b"png".to_vec()));
    let sink = Arc::new(RecordingEventSink::new());
    let pipeline = pipeline(config(&["k1", "k2"], 0), client, sink);
    let section = Section::new("中小企業のDX", "FAXからの脱却");

    let report = pipeline
        .generate_in(&article(None, vec![section.clone(), section]), layout(dir.path()))
        .await
        .unwrap();

    assert_eq!(report.total_images, 2);
    assert_eq!(report.results[0].output_path, report.results[1].output_path);
    assert_eq!(
        report.results[0].output_path.as_deref(),
        Some(report.images_directory.join("business_tech_innovation.png").as_path())
    );
}

#[tokio::test]
async fn report_serialises_to_output_contract() {
    let dir = tempfile::tempdir().unwrap();
    let client = Arc::new(CannedImageClient::succeeding(b"png".to_vec()));
    let pipeline = pipeline(config(&["k1"], 0), client, Arc::new(RecordingEventSink::new()));

    let report = pipeline
        .generate_in(&article(Some("Excel自動化"), vec![]), layout(dir.path()))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    for key in [
        "article_directory",
        "images_directory",
        "total_images",
        "successful_images",
        "results",
        "total_time",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["results"][0]["success"], true);
    assert!(json["results"][0]["error"].is_null());
    assert_eq!(
        std::fs::read(report.results[0].output_path.as_ref().unwrap()).unwrap(),
        b"png"
    );
}

#[tokio::test]
async fn sample_article_plans_featured_plus_sections() {
    let article = article_image_dispatch::models::load_article(Path::new("demos/sample_article.toml"))
        .await
        .unwrap();
    let tasks = article_image_dispatch::TaskPlanner::default().plan(&article, Path::new("images"));

    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[0].title, "アイキャッチ");
    assert_eq!(tasks[2].filename, "excel_automation_business.png");
}
