//! Movie dataset loading.
//!
//! Reads the annotated movie CSV into memory once at startup. The file is
//! comma-separated with an optional double-quoting of fields, and must carry
//! a header row naming all six required columns.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ReelError, ReelResult};

/// Header columns the loader refuses to run without.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Overview",
    "Sentiment_Score",
    "Valence_Score",
    "Arousal_Score",
    "Dominance_Score",
    "Tempo",
];

/// One parsed movie entry: description text plus five affect scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub text: String,
    pub sentiment: f64,
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
    pub tempo: f64,
}

/// Positions of the required columns within the header row.
struct ColumnIndex {
    overview: usize,
    sentiment: usize,
    valence: usize,
    arousal: usize,
    dominance: usize,
    tempo: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> ReelResult<Self> {
        let find = |name: &str| -> ReelResult<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReelError::missing_column(name))
        };

        Ok(Self {
            overview: find("Overview")?,
            sentiment: find("Sentiment_Score")?,
            valence: find("Valence_Score")?,
            arousal: find("Arousal_Score")?,
            dominance: find("Dominance_Score")?,
            tempo: find("Tempo")?,
        })
    }
}

/// Load the movie dataset from `path`, preserving row order.
///
/// Fails the whole load when the file is unreadable or any required column
/// is absent from the header. Rows that are too short or carry a
/// non-numeric score are skipped with a warning rather than aborting the
/// load or producing a partial record.
pub fn load_dataset(path: impl AsRef<Path>) -> ReelResult<Vec<MovieRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(io) => ReelError::io(format!("open {}", path.display()), io),
            kind => ReelError::internal(format!("cannot open {}: {kind:?}", path.display())),
        })?;

    let headers = reader.headers().map_err(|e| ReelError::csv("headers", e))?;
    let columns = ColumnIndex::from_headers(headers)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ReelError::csv(format!("row {}", row + 1), e))?;
        match parse_row(&record, &columns) {
            Ok(movie) => records.push(movie),
            Err(reason) => {
                warn!(row = row + 1, %reason, "skipping malformed dataset row");
            }
        }
    }

    Ok(records)
}

fn parse_row(record: &csv::StringRecord, columns: &ColumnIndex) -> Result<MovieRecord, String> {
    let field = |idx: usize, name: &str| -> Result<&str, String> {
        record
            .get(idx)
            .ok_or_else(|| format!("row is missing the {name} field"))
    };
    let score = |idx: usize, name: &str| -> Result<f64, String> {
        let raw = field(idx, name)?;
        raw.parse::<f64>()
            .map_err(|_| format!("{name} value {raw:?} is not numeric"))
    };

    Ok(MovieRecord {
        text: field(columns.overview, "Overview")?.to_string(),
        sentiment: score(columns.sentiment, "Sentiment_Score")?,
        valence: score(columns.valence, "Valence_Score")?,
        arousal: score(columns.arousal, "Arousal_Score")?,
        dominance: score(columns.dominance, "Dominance_Score")?,
        tempo: score(columns.tempo, "Tempo")?,
    })
}
