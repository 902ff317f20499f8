use std::fmt;

use crate::ingest::{ImageSet, TextLines};

const MATERIAL_KEYWORD: &str = "material";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialStatus {
    pub image_count: usize,
    pub ocr_mentions: usize,
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tracked {} material images, {} OCR mentions",
            self.image_count, self.ocr_mentions
        )
    }
}

pub fn track_materials(images: &ImageSet, lines: &TextLines) -> MaterialStatus {
    let ocr_mentions = lines
        .iter()
        .filter(|line| line.to_lowercase().contains(MATERIAL_KEYWORD))
        .count();

    MaterialStatus {
        image_count: images.len(),
        ocr_mentions,
    }
}
