use crate::error::AppError;
use crate::ingest::{ImageSet, TabularDataset, TextLines};
use crate::llm::{GenerateRequest, LlmClient};

pub const MAX_OUTPUT_TOKENS: u32 = 500;

pub fn table_summary(table: &TabularDataset) -> String {
    if table.is_empty() {
        "No CSV data".to_string()
    } else {
        table.describe()
    }
}

pub fn text_summary(lines: &TextLines) -> String {
    if lines.is_empty() {
        "No OCR data".to_string()
    } else {
        lines.join(" ")
    }
}

pub fn image_summary(images: &ImageSet) -> String {
    if images.is_empty() {
        "No image data".to_string()
    } else {
        format!("{} images processed", images.len())
    }
}

pub fn build_prompt(table: &TabularDataset, lines: &TextLines, images: &ImageSet) -> String {
    format!(
        "Generate actionable insights based on the following data:\n\
        - CSV Data Summary: {}\n\
        - OCR Extracted Text: {}\n\
        - Image Data: {}\n\
        Provide a concise report with 3-5 key insights.",
        table_summary(table),
        text_summary(lines),
        image_summary(images),
    )
}

#[tracing::instrument(
    name = "pipeline_stage insights",
    skip(llm_client, table, lines, images),
    fields(
        pipeline.stage = "insights",
        insights.prompt_chars,
        insights.narrative_chars,
    )
)]
pub async fn generate_insights(
    llm_client: &LlmClient,
    model: &str,
    table: &TabularDataset,
    lines: &TextLines,
    images: &ImageSet,
) -> Result<String, AppError> {
    let prompt = build_prompt(table, lines, images);

    let span = tracing::Span::current();
    span.record("insights.prompt_chars", prompt.chars().count());

    let resp = llm_client
        .generate(&GenerateRequest {
            model: model.to_string(),
            prompt,
            max_tokens: MAX_OUTPUT_TOKENS,
            stage: "insights".to_string(),
        })
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    span.record("insights.narrative_chars", resp.content.chars().count());

    Ok(resp.content)
}
