//! Sales dataset: typed rows of the `vgsales.csv` table, loaded once at startup.
//!
//! The loader validates the header set up front and deserializes each row into a
//! [`SaleRecord`]. Any missing column or malformed cell aborts the load; there is
//! no partial dataset.

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde::{de, Deserialize, Deserializer};
use std::{fs::File, io::BufReader, io::Read, path::Path};
use tracing::{debug, info};

/// Columns every source file must carry. Extra columns (e.g. `Rank`) are tolerated.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Publisher",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
    "Global_Sales",
];

/// Placeholder spellings the source uses for an absent value.
const MISSING_MARKERS: [&str; 4] = ["N/A", "NA", "NaN", "nan"];

/// One (game, platform) release row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Rank", default)]
    pub rank: Option<u32>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Year", deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Publisher", deserialize_with = "deserialize_nullable_text")]
    pub publisher: Option<String>,
    #[serde(rename = "NA_Sales", deserialize_with = "deserialize_sales")]
    pub na_sales: f64,
    #[serde(rename = "EU_Sales", deserialize_with = "deserialize_sales")]
    pub eu_sales: f64,
    #[serde(rename = "JP_Sales", deserialize_with = "deserialize_sales")]
    pub jp_sales: f64,
    #[serde(rename = "Other_Sales", deserialize_with = "deserialize_sales")]
    pub other_sales: f64,
    #[serde(rename = "Global_Sales", deserialize_with = "deserialize_sales")]
    pub global_sales: f64,
}

impl SaleRecord {
    /// Sales figure for one of the table's sales columns.
    pub fn sales(&self, column: SalesColumn) -> f64 {
        match column {
            SalesColumn::Na => self.na_sales,
            SalesColumn::Eu => self.eu_sales,
            SalesColumn::Jp => self.jp_sales,
            SalesColumn::Other => self.other_sales,
            SalesColumn::Global => self.global_sales,
        }
    }
}

/// The five sales columns, in source column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesColumn {
    Na,
    Eu,
    Jp,
    Other,
    Global,
}

impl SalesColumn {
    /// The four regional columns; `Global` is (approximately) their sum.
    pub const REGIONAL: [SalesColumn; 4] = [Self::Na, Self::Eu, Self::Jp, Self::Other];
    pub const ALL: [SalesColumn; 5] = [Self::Na, Self::Eu, Self::Jp, Self::Other, Self::Global];

    /// Header name as it appears in the CSV.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Na => "NA_Sales",
            Self::Eu => "EU_Sales",
            Self::Jp => "JP_Sales",
            Self::Other => "Other_Sales",
            Self::Global => "Global_Sales",
        }
    }
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || MISSING_MARKERS.contains(&raw)
}

fn deserialize_nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if is_missing(trimmed) {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Years arrive as `2006`, `2006.0` (float-typed exports) or a missing marker.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = deserialize_nullable_text(deserializer)? else {
        return Ok(None);
    };
    if let Ok(year) = raw.parse::<i32>() {
        return Ok(Some(year));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() < i32::MAX as f64 => Ok(Some(v as i32)),
        _ => Err(de::Error::custom(format!("invalid year {raw:?}"))),
    }
}

/// Sales cells must hold finite numbers; `NaN` and `inf` are rejected.
fn deserialize_sales<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::custom(format!("non-finite sales figure {value}")))
    }
}

/// The immutable in-memory table. Rows keep source order, which is the order
/// every stable tie-break in the aggregation layer falls back to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<SaleRecord>,
}

impl Dataset {
    /// Load the table from a CSV file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open sales dataset {}", path.display()))?;
        let dataset = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("load sales dataset {}", path.display()))?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            "sales dataset loaded"
        );
        Ok(dataset)
    }

    /// Load the table from any CSV byte source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().context("read csv header")?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !headers.iter().any(|h| h == **col))
        {
            return Err(anyhow!("required column {missing} missing from csv header"));
        }

        let mut records = Vec::with_capacity(16 * 1024);
        for (idx, row) in rdr.deserialize::<SaleRecord>().enumerate() {
            // +2: one for the header line, one for 1-based numbering.
            let record = row.with_context(|| format!("malformed csv row {}", idx + 2))?;
            records.push(record);
        }
        debug!(records = records.len(), "csv rows parsed");
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
