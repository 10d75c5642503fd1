//! Formatter configuration.
//!
//! All layout constants live in [`FormatConfig`], which is passed explicitly
//! into the pipeline. Two named [`Profile`]s cover the observed input
//! variants; a YAML or JSON file can override any key of either.

use std::{fs, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::MosaicError;

/// Largest row shape the field inference understands: `[number, color, pattern]`.
pub const MAX_ROW_FIELDS: usize = 3;

/// Widest padding accepted for the row number and color columns.
pub const MAX_COLUMN_WIDTH: usize = 256;

/// Named presets for the two input variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Tab-separated fields; row number and color are optional.
    #[default]
    TabbedOptionalFields,
    /// Comma-separated fields; row number and color are always present.
    CsvFixedFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    Left,
    Right,
}

/// What the batch driver does with a row it cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Record the row as skipped and carry on.
    Skip,
    /// Stop the batch with a diagnostic.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FormatConfig {
    pub delimiter: String,
    pub min_fields: usize,
    pub max_fields: usize,
    /// Split into at most `max_fields` pieces so the pattern may contain the delimiter.
    pub split_limited: bool,
    pub row_number_width: usize,
    pub row_number_align: Align,
    pub row_number_suffix: String,
    pub color_width: usize,
    pub color_align: Align,
    pub color_suffix: String,
    pub border_stitch: String,
    pub output_suffix: String,
    pub on_unrecognized_shape: RowPolicy,
    pub on_malformed_segment: RowPolicy,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl FormatConfig {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::TabbedOptionalFields => Self {
                delimiter: "\t".into(),
                min_fields: 1,
                max_fields: MAX_ROW_FIELDS,
                split_limited: false,
                row_number_width: 5,
                row_number_align: Align::Right,
                row_number_suffix: ". ".into(),
                color_width: 10,
                color_align: Align::Left,
                color_suffix: " ".into(),
                border_stitch: "bs".into(),
                output_suffix: "_output".into(),
                on_unrecognized_shape: RowPolicy::Skip,
                on_malformed_segment: RowPolicy::Abort,
            },
            Profile::CsvFixedFields => Self {
                delimiter: ",".into(),
                min_fields: MAX_ROW_FIELDS,
                max_fields: MAX_ROW_FIELDS,
                split_limited: true,
                row_number_width: 4,
                row_number_align: Align::Left,
                row_number_suffix: " ".into(),
                color_width: 10,
                color_align: Align::Right,
                color_suffix: " ".into(),
                border_stitch: "bs".into(),
                output_suffix: "_output".into(),
                on_unrecognized_shape: RowPolicy::Skip,
                on_malformed_segment: RowPolicy::Abort,
            },
        }
    }

    /// Loads a config file (`.yaml`, `.yml` or `.json`).
    ///
    /// The file may name a `profile`; otherwise `base` is used. Keys present
    /// in the file replace that profile's values.
    pub fn load(path: &Path, base: Profile) -> Result<Self, MosaicError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path)
            .map_err(|e| MosaicError::config(origin.as_str(), e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let overrides: serde_json::Value = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .map_err(|e| MosaicError::config(origin.as_str(), e.to_string()))?,
            "json" => serde_json::from_str(&text)
                .map_err(|e| MosaicError::config(origin.as_str(), e.to_string()))?,
            other => {
                return Err(MosaicError::config(
                    origin,
                    format!("unsupported config extension '{other}', expected yaml, yml or json"),
                ))
            }
        };

        Self::from_overrides(overrides, base).map_err(|e| match e {
            MosaicError::Config { message, .. } => MosaicError::config(origin, message),
            other => other,
        })
    }

    /// Merges a parsed key/value document over a profile.
    pub fn from_overrides(overrides: serde_json::Value, base: Profile) -> Result<Self, MosaicError> {
        let origin = "overrides";
        let mut overrides = match overrides {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            _ => return Err(MosaicError::config(origin, "expected a mapping of keys")),
        };

        let profile = match overrides.remove("profile") {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| MosaicError::config(origin, e.to_string()))?,
            None => base,
        };

        let mut merged = serde_json::to_value(Self::for_profile(profile))
            .map_err(|e| MosaicError::config(origin, e.to_string()))?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }

        let config: Self =
            serde_json::from_value(merged).map_err(|e| MosaicError::config(origin, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MosaicError> {
        let origin = "validation";
        if self.delimiter.is_empty() {
            return Err(MosaicError::config(origin, "delimiter must not be empty"));
        }
        if self.border_stitch.is_empty() {
            return Err(MosaicError::config(origin, "border-stitch must not be empty"));
        }
        if self.min_fields == 0 || self.min_fields > self.max_fields {
            return Err(MosaicError::config(
                origin,
                format!(
                    "min-fields ({}) must be between 1 and max-fields ({})",
                    self.min_fields, self.max_fields
                ),
            ));
        }
        if self.max_fields > MAX_ROW_FIELDS {
            return Err(MosaicError::config(
                origin,
                format!("max-fields ({}) cannot exceed {MAX_ROW_FIELDS}", self.max_fields),
            ));
        }
        for (key, width) in [
            ("row-number-width", self.row_number_width),
            ("color-width", self.color_width),
        ] {
            if width > MAX_COLUMN_WIDTH {
                return Err(MosaicError::config(
                    origin,
                    format!("{key} ({width}) cannot exceed {MAX_COLUMN_WIDTH}"),
                ));
            }
        }
        Ok(())
    }

    pub fn accepts_field_count(&self, count: usize) -> bool {
        (self.min_fields..=self.max_fields).contains(&count)
    }

    /// Human-readable accepted range, used in shape diagnostics.
    pub fn expected_fields(&self) -> String {
        if self.min_fields == self.max_fields {
            self.min_fields.to_string()
        } else {
            format!("{} to {}", self.min_fields, self.max_fields)
        }
    }
}
