use chrono::{Local, NaiveDate};

use crate::config::{DEFAULT_REPORT_FORMAT, ReportSettings};

#[derive(Debug, Clone)]
pub struct ReportBuilder {
    output_format: String,
}

impl ReportBuilder {
    pub fn new(settings: &ReportSettings) -> Self {
        if settings.format != DEFAULT_REPORT_FORMAT {
            tracing::warn!(
                format = %settings.format,
                "report format setting is not applied, writing markdown"
            );
        }
        Self {
            output_format: settings.format.clone(),
        }
    }

    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    /// Builds the report dated with the local clock.
    pub fn create_report(&self, insights: &str) -> String {
        render(insights, Local::now().date_naive())
    }
}

pub fn render(insights: &str, date: NaiveDate) -> String {
    format!(
        "# Daily Insights Report - {}\n\n## Key Insights\n{insights}",
        date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fixed_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = render("X", date);

        assert_eq!(report.lines().next(), Some("# Daily Insights Report - 2024-01-01"));
        assert!(report.ends_with("X"));
        assert_eq!(
            report,
            "# Daily Insights Report - 2024-01-01\n\n## Key Insights\nX"
        );
    }

    #[test]
    fn test_create_report_uses_today() {
        let builder = ReportBuilder::new(&ReportSettings::default());
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let report = builder.create_report("narrative");
        assert!(report.starts_with(&format!("# Daily Insights Report - {today}")));
    }

    #[test]
    fn test_format_setting_does_not_change_layout() {
        let builder = ReportBuilder::new(&ReportSettings {
            format: "html".to_string(),
        });
        assert_eq!(builder.output_format(), "html");
        let report = builder.create_report("body");
        assert!(report.contains("\n\n## Key Insights\nbody"));
        assert!(report.starts_with("# Daily Insights Report - "));
    }
}
