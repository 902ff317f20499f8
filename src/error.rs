use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Tabular source error: {0}")]
    Table(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = AppError::Config("data_paths.csv is required".to_string());
        assert_eq!(error.to_string(), "Config error: data_paths.csv is required");
    }

    #[test]
    fn test_llm_error() {
        let error = AppError::Llm("provider timeout".to_string());
        assert_eq!(error.to_string(), "LLM error: provider timeout");
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: AppError = io.into();
        assert!(matches!(error, AppError::Io(_)));
        assert_eq!(error.to_string(), "IO error: gone");
    }

    #[test]
    fn test_csv_error_is_not_double_prefixed() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\n1\n".as_bytes());
        let csv_err = reader.records().find_map(Result::err).unwrap();
        let expected = csv_err.to_string();
        let error: AppError = csv_err.into();
        assert_eq!(error.to_string(), expected);
        assert!(!error.to_string().starts_with("CSV error: CSV error:"));
    }

    #[test]
    fn test_table_error() {
        let error = AppError::Table("no columns to parse".to_string());
        assert_eq!(error.to_string(), "Tabular source error: no columns to parse");
    }

    #[test]
    fn test_app_result_ok() {
        fn returns_ok() -> AppResult<i32> {
            Ok(42)
        }
        let result = returns_ok();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_app_result_err() {
        fn returns_err() -> AppResult<i32> {
            Err(AppError::Llm("test".to_string()))
        }
        let result = returns_err();
        assert!(result.is_err());
    }
}
