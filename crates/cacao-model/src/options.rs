//! Configuration options for the cleaning passes.
//!
//! Every default that the passes rely on lives here, so call sites state
//! which options they use instead of reaching for shared globals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};
use crate::schema;
use crate::table::ColumnType;

/// Characters stripped from the edges of text cells by default.
pub const DEFAULT_SPECIAL_CHARS: [char; 16] = [
    '#', '@', '$', '&', '*', '+', '=', '|', '\\', '/', '?', '!', '~', '`', '^', '°',
];

/// Country spellings kept verbatim by the country uniformizer.
pub const DEFAULT_COUNTRY_EXCEPTIONS: [&str; 6] = ["U.S.A.", "USA", "U.K.", "UK", "UAE", "U.A.E."];

/// Known mis-encoded substrings and their corrections, in application order.
pub const DEFAULT_ENCODING_FIXES: [(&str, &str); 9] = [
    ("Nave", "Naive"),
    ("Nve", "Naive"),
    ("Ã©", "é"),
    ("Ã ", "à"),
    ("Ã¨", "è"),
    ("Ã§", "ç"),
    ("Ã´", "ô"),
    ("Ã®", "î"),
    ("Ã¯", "ï"),
];

/// Options for the edge special-character trimmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialCharOptions {
    pub target_chars: Vec<char>,
}

impl Default for SpecialCharOptions {
    fn default() -> Self {
        Self {
            target_chars: DEFAULT_SPECIAL_CHARS.to_vec(),
        }
    }
}

impl SpecialCharOptions {
    pub fn with_target_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.target_chars = chars.into_iter().collect();
        self
    }

    pub fn is_target(&self, ch: char) -> bool {
        self.target_chars.contains(&ch)
    }
}

/// One substring substitution applied by the encoding corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingFix {
    pub wrong: String,
    pub correct: String,
}

impl EncodingFix {
    pub fn new(wrong: impl Into<String>, correct: impl Into<String>) -> Self {
        Self {
            wrong: wrong.into(),
            correct: correct.into(),
        }
    }
}

/// Options for the encoding-problem corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingOptions {
    /// Applied in order; later entries see the output of earlier ones.
    pub replacements: Vec<EncodingFix>,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            replacements: DEFAULT_ENCODING_FIXES
                .iter()
                .map(|(wrong, correct)| EncodingFix::new(*wrong, *correct))
                .collect(),
        }
    }
}

/// Options for the format normalizer sub-operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub percent_column: String,
    pub date_column: String,
    pub title_case_columns: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            percent_column: schema::COCOA_PERCENT.to_string(),
            date_column: schema::REVIEW_DATE.to_string(),
            title_case_columns: [
                schema::COMPANY,
                schema::COMPANY_LOCATION,
                schema::BEAN_TYPE,
                schema::BROAD_ORIGIN,
                schema::SPECIFIC_ORIGIN,
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

/// Options for the country-name uniformizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryOptions {
    pub columns: Vec<String>,
    /// Compared case-sensitively against the trimmed cell.
    pub exceptions: Vec<String>,
}

impl Default for CountryOptions {
    fn default() -> Self {
        Self {
            columns: vec![
                schema::COMPANY_LOCATION.to_string(),
                schema::BROAD_ORIGIN.to_string(),
            ],
            exceptions: DEFAULT_COUNTRY_EXCEPTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl CountryOptions {
    pub fn is_exception(&self, value: &str) -> bool {
        self.exceptions.iter().any(|exception| exception == value)
    }
}

/// How a cast treats values it cannot convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastMode {
    /// The first unconvertible value fails the whole call.
    Strict,
    /// Unconvertible values become missing and are counted.
    #[default]
    Coerce,
}

/// A single column cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastSpec {
    pub column: String,
    pub target: ColumnType,
}

impl CastSpec {
    pub fn new(column: impl Into<String>, target: ColumnType) -> Self {
        Self {
            column: column.into(),
            target,
        }
    }
}

/// Options for type casting and numeric coercion in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastOptions {
    pub mode: CastMode,
    /// Columns converted with the safe float converter.
    pub numeric_columns: Vec<String>,
    pub casts: Vec<CastSpec>,
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            mode: CastMode::default(),
            numeric_columns: vec![schema::RATING.to_string()],
            casts: vec![CastSpec::new(schema::REF, ColumnType::Integer)],
        }
    }
}

/// Fill strategy for a column with missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationStrategy {
    /// Fill with the modal observed value.
    Mode,
    /// Fill with the primary sentinel label ("Unknown").
    Sentinel,
    /// Fill with the alternate sentinel label ("Autre").
    AlternateSentinel,
}

impl ImputationStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Sentinel => "sentinel",
            Self::AlternateSentinel => "alternate sentinel",
        }
    }
}

impl std::fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for missingness analysis and imputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationOptions {
    pub columns: Vec<String>,
    /// Missing proportion at or below which the mode is used.
    pub mode_threshold: f64,
    /// Missing proportion above which the sentinel label is used.
    pub drop_threshold: f64,
    pub sentinel_label: String,
    pub alternate_label: String,
    /// Per-column strategies that replace the advisory decision.
    pub overrides: BTreeMap<String, ImputationStrategy>,
}

impl Default for ImputationOptions {
    fn default() -> Self {
        Self {
            columns: vec![
                schema::BEAN_TYPE.to_string(),
                schema::BROAD_ORIGIN.to_string(),
            ],
            mode_threshold: 0.1,
            drop_threshold: 0.5,
            sentinel_label: "Unknown".to_string(),
            alternate_label: "Autre".to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl ImputationOptions {
    #[must_use]
    pub fn with_thresholds(mut self, mode_threshold: f64, drop_threshold: f64) -> Self {
        self.mode_threshold = mode_threshold;
        self.drop_threshold = drop_threshold;
        self
    }

    #[must_use]
    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_override(mut self, column: impl Into<String>, strategy: ImputationStrategy) -> Self {
        self.overrides.insert(column.into(), strategy);
        self
    }

    /// Label written by a sentinel strategy; `None` for [`ImputationStrategy::Mode`].
    pub fn label_for(&self, strategy: ImputationStrategy) -> Option<&str> {
        match strategy {
            ImputationStrategy::Mode => None,
            ImputationStrategy::Sentinel => Some(&self.sentinel_label),
            ImputationStrategy::AlternateSentinel => Some(&self.alternate_label),
        }
    }

    /// Checks that both thresholds are proportions and correctly ordered.
    pub fn validate(&self) -> Result<()> {
        let in_range = |value: f64| (0.0..=1.0).contains(&value);
        if !in_range(self.mode_threshold) || !in_range(self.drop_threshold) {
            return Err(CleanError::InvalidConfig {
                reason: format!(
                    "thresholds must lie in [0, 1] (mode {}, drop {})",
                    self.mode_threshold, self.drop_threshold
                ),
            });
        }
        if self.mode_threshold > self.drop_threshold {
            return Err(CleanError::InvalidConfig {
                reason: format!(
                    "mode threshold {} exceeds drop threshold {}",
                    self.mode_threshold, self.drop_threshold
                ),
            });
        }
        if self.sentinel_label == self.alternate_label {
            return Err(CleanError::InvalidConfig {
                reason: format!(
                    "sentinel labels must differ (both '{}')",
                    self.sentinel_label
                ),
            });
        }
        Ok(())
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub special_chars: SpecialCharOptions,
    pub encoding: EncodingOptions,
    pub format: FormatOptions,
    pub countries: CountryOptions,
    pub casts: CastOptions,
    pub imputation: ImputationOptions,
    /// Numeric columns rescaled to [0, 1] after imputation.
    pub normalize_columns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        // Country columns go through the uniformizer instead of title-casing,
        // which would lowercase exception spellings such as "U.S.A.".
        let format = FormatOptions {
            title_case_columns: vec![
                schema::COMPANY.to_string(),
                schema::BEAN_TYPE.to_string(),
                schema::SPECIFIC_ORIGIN.to_string(),
            ],
            ..FormatOptions::default()
        };
        Self {
            special_chars: SpecialCharOptions::default(),
            encoding: EncodingOptions::default(),
            format,
            countries: CountryOptions::default(),
            casts: CastOptions::default(),
            imputation: ImputationOptions::default(),
            normalize_columns: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        self.imputation.validate()
    }
}
