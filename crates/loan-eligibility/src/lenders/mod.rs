//! Static lender directory and score-based comparison.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const BUNDLED_LENDERS: &str = include_str!("../../fixtures/lenders.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LenderType {
    Bank,
    Fintech,
    NonBank,
    Broker,
}

impl LenderType {
    pub fn label(&self) -> &'static str {
        match self {
            LenderType::Bank => "bank",
            LenderType::Fintech => "fintech",
            LenderType::NonBank => "non-bank",
            LenderType::Broker => "broker",
        }
    }
}

/// One entry of the lender fixture. Rates and ranges are display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderRecord {
    pub name: String,
    #[serde(default)]
    pub logo: String,
    pub rate_from: String,
    pub rate_to: String,
    pub range: String,
    #[serde(default)]
    pub approval: String,
    pub url: String,
    #[serde(rename = "type")]
    pub lender_type: LenderType,
    pub eligibility_notes: String,
    pub min_score_needed: u8,
}

impl LenderRecord {
    pub fn accepts(&self, score: u8) -> bool {
        score >= self.min_score_needed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LenderDirectoryError {
    #[error("unable to read lender fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("lender fixture is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered lender list loaded once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LenderDirectory {
    lenders: Vec<LenderRecord>,
}

impl LenderDirectory {
    pub fn new(lenders: Vec<LenderRecord>) -> Self {
        Self { lenders }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LenderDirectoryError> {
        let lenders: Vec<LenderRecord> = serde_json::from_reader(reader)?;
        Ok(Self { lenders })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LenderDirectoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LenderDirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// The fixture shipped with the crate.
    pub fn bundled() -> Result<Self, LenderDirectoryError> {
        Self::from_reader(BUNDLED_LENDERS.as_bytes())
    }

    /// Loads `path` (or the bundled fixture), degrading to an empty directory on failure.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        };

        match loaded {
            Ok(directory) => {
                info!(lenders = directory.len(), "lender directory loaded");
                directory
            }
            Err(error) => {
                warn!(%error, "lender directory unavailable; comparison list will be empty");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lenders.is_empty()
    }

    pub fn all(&self) -> &[LenderRecord] {
        &self.lenders
    }

    /// Lenders to show for a stored score.
    ///
    /// Without a score every lender is returned in fixture order. With one, only lenders
    /// whose minimum is met are kept, most selective first; ties keep fixture order.
    pub fn eligible_for(&self, score: Option<u8>) -> Vec<&LenderRecord> {
        let Some(score) = score else {
            return self.lenders.iter().collect();
        };

        let mut eligible: Vec<&LenderRecord> = self
            .lenders
            .iter()
            .filter(|lender| lender.accepts(score))
            .collect();
        eligible.sort_by(|a, b| b.min_score_needed.cmp(&a.min_score_needed));
        eligible
    }
}

/// Writes a comparison list as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, lenders: &[&LenderRecord]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "name",
        "type",
        "rate_from",
        "rate_to",
        "range",
        "min_score_needed",
        "approval",
        "url",
    ])?;
    for lender in lenders {
        let min_score = lender.min_score_needed.to_string();
        out.write_record([
            lender.name.as_str(),
            lender.lender_type.label(),
            lender.rate_from.as_str(),
            lender.rate_to.as_str(),
            lender.range.as_str(),
            min_score.as_str(),
            lender.approval.as_str(),
            lender.url.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
