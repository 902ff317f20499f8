use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("daily-insights"));

// --- LLM client metrics ---

pub static GEN_AI_TOKEN_USAGE: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("gen_ai.client.token.usage")
        .with_description("Number of tokens used per LLM call")
        .with_unit("{token}")
        .build()
});

pub static GEN_AI_OPERATION_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("gen_ai.client.operation.duration")
        .with_description("Duration of LLM operations in seconds")
        .with_unit("s")
        .build()
});

pub static GEN_AI_ERROR_COUNT: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("gen_ai.client.error.count")
        .with_description("Number of LLM call errors")
        .with_unit("{error}")
        .build()
});

// --- Ingestion metrics ---

pub static INGEST_IMAGES_DECODED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("ingest.images.decoded")
        .with_description("Number of image files decoded to grayscale")
        .with_unit("{image}")
        .build()
});

pub static INGEST_IMAGES_SKIPPED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("ingest.images.skipped")
        .with_description("Number of image directory entries that could not be decoded")
        .with_unit("{file}")
        .build()
});

pub static INGEST_OCR_LINES: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("ingest.ocr.lines")
        .with_description("Number of OCR text lines read per run")
        .with_unit("{line}")
        .build()
});

pub static INGEST_TABLE_ROWS: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("ingest.table.rows")
        .with_description("Number of tabular rows loaded per run")
        .with_unit("{row}")
        .build()
});
