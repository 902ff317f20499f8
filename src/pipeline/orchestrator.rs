use std::path::PathBuf;

use crate::config::Config;
use crate::error::AppError;
use crate::ingest::Ingestor;
use crate::llm::LlmClient;

use super::insights;
use super::materials::{self, MaterialStatus};
use super::report::ReportBuilder;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report_path: PathBuf,
    pub material_status: MaterialStatus,
}

#[tracing::instrument(
    name = "pipeline daily_report",
    skip(config, llm_client),
    fields(
        report.path,
        report.duration_ms,
    )
)]
pub async fn run(config: &Config, llm_client: &LlmClient) -> Result<RunOutcome, AppError> {
    let start = std::time::Instant::now();

    // Stage 1: Load and normalize the three sources
    let data = Ingestor::from_paths(&config.data_paths).process_data()?;

    // Stage 2: Narrative insights from the text-generation service
    let narrative = insights::generate_insights(
        llm_client,
        &config.azure_openai.model,
        &data.table,
        &data.lines,
        &data.images,
    )
    .await?;

    // Stage 3: Dated markdown document
    let report = ReportBuilder::new(&config.report_settings).create_report(&narrative);

    // Stage 4: Material tracking over the same inputs
    let material_status = materials::track_materials(&data.images, &data.lines);

    let report_path = config.report_path();
    std::fs::write(&report_path, report)?;

    let span = tracing::Span::current();
    span.record("report.path", report_path.display().to_string());
    span.record("report.duration_ms", start.elapsed().as_millis() as u64);

    tracing::info!(
        path = %report_path.display(),
        status = %material_status,
        "Report written"
    );

    Ok(RunOutcome {
        report_path,
        material_status,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Local;

    use super::*;
    use crate::ingest::images::tests::write_image;
    use crate::llm::client::tests::{CannedProvider, FailingProvider};

    fn config_for(root: &std::path::Path) -> Config {
        let raw = format!(
            r#"
data_paths:
  csv: {root}/daily.csv
  ocr: {root}/ocr.txt
  images: {root}/images
  output: {root}/out
azure_openai:
  api_key: test
  api_version: test
  endpoint: test
report_settings:
  format: markdown
"#,
            root = root.display()
        );
        Config::from_yaml(&raw).unwrap()
    }

    fn canned(content: &str) -> LlmClient {
        LlmClient::new(Arc::new(CannedProvider {
            content: content.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_empty_sources_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();
        let config = config_for(dir.path());

        let outcome = run(&config, &canned("Insight: use less steel."))
            .await
            .unwrap();

        let today = Local::now().date_naive().format("%Y-%m-%d");
        let written = std::fs::read_to_string(&outcome.report_path).unwrap();
        assert_eq!(
            written,
            format!("# Daily Insights Report - {today}\n\n## Key Insights\nInsight: use less steel.")
        );
        assert_eq!(
            outcome.report_path,
            dir.path().join("out").join("daily_report.md")
        );
        assert_eq!(
            outcome.material_status.to_string(),
            "Tracked 0 material images, 0 OCR mentions"
        );
    }

    #[tokio::test]
    async fn test_populated_sources_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("out")).unwrap();
        std::fs::create_dir(root.join("images")).unwrap();
        std::fs::write(root.join("daily.csv"), "site,tonnes\nnorth,4\nsouth,6\n").unwrap();
        std::fs::write(root.join("ocr.txt"), "Material A\nnone\nMATERIAL check\n").unwrap();
        for name in ["1.png", "2.png", "3.png"] {
            write_image(&root.join("images").join(name), 2, 2);
        }
        std::fs::write(root.join("images").join("thumbs.db"), "junk").unwrap();

        let outcome = run(&config_for(root), &canned("Keep it up.")).await.unwrap();

        assert_eq!(
            outcome.material_status.to_string(),
            "Tracked 3 material images, 2 OCR mentions"
        );
        let written = std::fs::read_to_string(&outcome.report_path).unwrap();
        assert!(written.ends_with("## Key Insights\nKeep it up."));
    }

    #[tokio::test]
    async fn test_existing_report_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();
        let config = config_for(dir.path());
        std::fs::write(config.report_path(), "stale report").unwrap();

        run(&config, &canned("fresh")).await.unwrap();

        let written = std::fs::read_to_string(config.report_path()).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.ends_with("fresh"));
    }

    #[tokio::test]
    async fn test_missing_output_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());

        let err = run(&config, &canned("X")).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_service_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();
        let config = config_for(dir.path());

        let err = run(&config, &LlmClient::new(Arc::new(FailingProvider)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert!(!config.report_path().exists());
    }
}
