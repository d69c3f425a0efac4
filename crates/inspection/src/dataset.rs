//! Dataset access: loads a CSV snapshot into a uniform in-memory table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{EngineError, Result};

/// The two dataset variants the dashboard knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataVariant {
    Preprocessed,
    Labeled,
}

impl DataVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataVariant::Preprocessed => "preprocessed",
            DataVariant::Labeled => "labeled",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DataVariant::Preprocessed => "preprocessed_data.csv",
            DataVariant::Labeled => "labeled_data.csv",
        }
    }

    /// Fields that must be fully populated for the variant to pass review.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DataVariant::Preprocessed => &["question", "answer"],
            DataVariant::Labeled => &["question", "answer", "is_ad", "is_fake"],
        }
    }
}

impl FromStr for DataVariant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "preprocessed" => Ok(DataVariant::Preprocessed),
            "labeled" => Ok(DataVariant::Labeled),
            other => Err(EngineError::InvalidVariant(other.to_string())),
        }
    }
}

impl std::fmt::Display for DataVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-in-time tabular snapshot. Empty cells are `None`.
#[derive(Clone, Debug)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn col_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Raw cell value; `None` for a missing column or a null cell.
    pub fn cell(&self, row: usize, col: &str) -> Option<&str> {
        let idx = self.col_index(col)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    pub fn int_cell(&self, row: usize, col: &str) -> Option<i64> {
        let raw = self.cell(row, col)?;
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().map(|v| v as i64))
    }

    pub fn float_cell(&self, row: usize, col: &str) -> Option<f64> {
        self.cell(row, col)?.parse::<f64>().ok()
    }

    pub fn bool_cell(&self, row: usize, col: &str) -> Option<bool> {
        parse_bool(self.cell(row, col)?)
    }

    /// Stable record id for a row, falling back to the row index when the
    /// snapshot carries no `id` column.
    pub fn row_id(&self, row: usize) -> i64 {
        self.int_cell(row, "id").unwrap_or(row as i64)
    }

    /// Index from record id to row position, built once per request.
    pub fn id_index(&self) -> HashMap<i64, usize> {
        let mut index = HashMap::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            index.entry(self.row_id(row)).or_insert(row);
        }
        index
    }

    /// Renders one row as a JSON object with per-cell type inference,
    /// matching what the frontend expects for record display.
    pub fn record_json(&self, row: usize) -> Value {
        let mut obj = Map::with_capacity(self.columns.len());
        if let Some(cells) = self.rows.get(row) {
            for (col, cell) in self.columns.iter().zip(cells.iter()) {
                obj.insert(col.clone(), infer_value(cell.as_deref()));
            }
        }
        Value::Object(obj)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "1.0" => Some(true),
        "false" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

fn infer_value(cell: Option<&str>) -> Value {
    let raw = match cell {
        Some(v) => v,
        None => return Value::Null,
    };
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

/// Per-variant entry in the dataset summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariantSummary {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub preprocessed: VariantSummary,
    pub labeled: VariantSummary,
}

/// Read-only accessor over the backing CSV files. No caching: every load
/// re-reads the file, so callers get a point-in-time snapshot.
#[derive(Clone, Debug)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, variant: DataVariant) -> PathBuf {
        self.data_dir.join(variant.file_name())
    }

    pub fn exists(&self, variant: DataVariant) -> bool {
        self.path_for(variant).exists()
    }

    pub fn load(&self, variant: DataVariant) -> Result<DataTable> {
        let path = self.path_for(variant);
        if !path.exists() {
            return Err(EngineError::NotFound(format!(
                "data file not found: {}",
                path.display()
            )));
        }
        read_csv(&path)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            preprocessed: self.variant_summary(DataVariant::Preprocessed),
            labeled: self.variant_summary(DataVariant::Labeled),
        }
    }

    fn variant_summary(&self, variant: DataVariant) -> VariantSummary {
        match self.load(variant) {
            Ok(table) => VariantSummary {
                exists: true,
                count: Some(table.len()),
                columns: Some(table.columns),
            },
            Err(_) => VariantSummary {
                exists: false,
                count: None,
                columns: None,
            },
        }
    }
}

fn read_csv(path: &Path) -> Result<DataTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    // Excel exports often carry a UTF-8 BOM on the first header.
    if let Some(first) = columns.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    let width = columns.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells: Vec<Option<String>> = record
            .iter()
            .take(width)
            .map(|field| {
                if field.is_empty() {
                    None
                } else {
                    Some(field.to_string())
                }
            })
            .collect();
        cells.resize(width, None);
        rows.push(cells);
    }

    Ok(DataTable { columns, rows })
}
