use std::path::Path;

use crate::error::AppResult;

pub type TextLines = Vec<String>;

/// Reads OCR output one line per entry. `\r\n` and lone `\r` endings are
/// read as `\n`, and each line keeps its trailing newline; an absent file
/// yields no lines.
pub fn load_text_lines(path: &Path) -> AppResult<TextLines> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "text source absent");
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(path)?;
    Ok(split_lines(&raw))
}

fn split_lines(raw: &str) -> TextLines {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split_inclusive('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_newlines() {
        assert_eq!(
            split_lines("Material A\nnone\nlast"),
            vec!["Material A\n", "none\n", "last"]
        );
    }

    #[test]
    fn test_split_trailing_newline_adds_no_empty_line() {
        assert_eq!(split_lines("one\ntwo\n"), vec!["one\n", "two\n"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_translates_carriage_returns() {
        assert_eq!(
            split_lines("Material A\r\nnone\r\n"),
            vec!["Material A\n", "none\n"]
        );
        assert_eq!(split_lines("old\rmac\r"), vec!["old\n", "mac\n"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let lines = load_text_lines(Path::new("no/such/ocr.txt")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr.txt");
        std::fs::write(&path, "delivery: steel\nmaterial shortfall\n").unwrap();

        let lines = load_text_lines(&path).unwrap();
        assert_eq!(lines, vec!["delivery: steel\n", "material shortfall\n"]);
    }
}
