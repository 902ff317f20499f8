use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Cell spellings treated as missing values when coercing columns.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

const NUMERIC_STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
const TEXT_STAT_LABELS: [&str; 4] = ["count", "unique", "top", "freq"];

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// A CSV table with per-column type coercion applied at load time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularDataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl TabularDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn from_records(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&str> = rows
                    .iter()
                    .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                    .collect();
                Column {
                    name,
                    values: coerce_column(&cells),
                }
            })
            .collect();

        Self { columns, row_count }
    }

    /// Descriptive statistics rendered as an aligned text table.
    ///
    /// Numeric columns get count/mean/std/min/quartiles/max. When the table
    /// has no numeric column at all, text columns are described with
    /// count/unique/top/freq instead.
    pub fn describe(&self) -> String {
        let numeric: Vec<(&str, &[Option<f64>])> = self
            .columns
            .iter()
            .filter_map(|c| match &c.values {
                ColumnValues::Numeric(values) => Some((c.name.as_str(), values.as_slice())),
                ColumnValues::Text(_) => None,
            })
            .collect();

        if !numeric.is_empty() {
            let names: Vec<&str> = numeric.iter().map(|(name, _)| *name).collect();
            let stats: Vec<Vec<String>> = numeric.iter().map(|(_, v)| numeric_stats(v)).collect();
            return render_grid(&NUMERIC_STAT_LABELS, &names, &stats);
        }

        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        let stats: Vec<Vec<String>> = self
            .columns
            .iter()
            .filter_map(|c| match &c.values {
                ColumnValues::Text(values) => Some(text_stats(values)),
                ColumnValues::Numeric(_) => None,
            })
            .collect();
        render_grid(&TEXT_STAT_LABELS, &names, &stats)
    }
}

/// Parses a CSV file with a header row. A missing file is an empty table.
/// Short rows are padded with missing values; a file without a header or a
/// row wider than the header is an error.
pub fn load_table(path: &Path) -> AppResult<TabularDataset> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "tabular source absent");
        return Ok(TabularDataset::empty());
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return Err(AppError::Table(format!(
            "no columns to parse from {}",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(AppError::Table(format!(
                "expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            )));
        }
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(TabularDataset::from_records(headers, rows))
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

fn coerce_column(cells: &[&str]) -> ColumnValues {
    let numeric: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| {
            if is_missing(cell) {
                Some(None)
            } else {
                cell.trim().parse::<f64>().ok().map(Some)
            }
        })
        .collect();

    match numeric {
        Some(values) => ColumnValues::Numeric(values),
        None => ColumnValues::Text(
            cells
                .iter()
                .map(|cell| (!is_missing(cell)).then(|| cell.to_string()))
                .collect(),
        ),
    }
}

fn numeric_stats(values: &[Option<f64>]) -> Vec<String> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);

    let n = present.len();
    let mean = if n == 0 {
        f64::NAN
    } else {
        present.iter().sum::<f64>() / n as f64
    };
    let std = if n < 2 {
        f64::NAN
    } else {
        let var = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    };

    [
        n as f64,
        mean,
        std,
        quantile(&present, 0.0),
        quantile(&present, 0.25),
        quantile(&present, 0.5),
        quantile(&present, 0.75),
        quantile(&present, 1.0),
    ]
    .iter()
    .map(|v| format!("{v:.6}"))
    .collect()
}

/// Linear-interpolation quantile over sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn text_stats(values: &[Option<String>]) -> Vec<String> {
    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for &value in &present {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    // First-seen value wins ties.
    let top = order
        .iter()
        .fold(None::<(&str, usize)>, |best, &value| {
            let count = counts[value];
            match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((value, count)),
            }
        });

    let (top, freq) = match top {
        Some((value, count)) => (value.to_string(), count.to_string()),
        None => ("NaN".to_string(), "NaN".to_string()),
    };

    vec![
        present.len().to_string(),
        order.len().to_string(),
        top,
        freq,
    ]
}

fn render_grid(labels: &[&str], names: &[&str], stats: &[Vec<String>]) -> String {
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = names
        .iter()
        .zip(stats)
        .map(|(name, column)| {
            column
                .iter()
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(labels.len() + 1);

    let mut header = " ".repeat(label_width);
    for (name, width) in names.iter().zip(&widths) {
        header.push_str(&format!("  {name:>width$}"));
    }
    lines.push(header);

    for (row, label) in labels.iter().enumerate() {
        let mut line = format!("{label:<label_width$}");
        for (column, width) in stats.iter().zip(&widths) {
            line.push_str(&format!("  {:>width$}", column[row]));
        }
        lines.push(line);
    }

    lines.join("\n")
}
