//! Input loading.
//!
//! Reads a pattern file and splits it into [`RawRow`]s. Every row keeps its
//! line number and the byte offsets of its fields so diagnostics can point
//! back into the file.

use std::{fs, path::Path, sync::Arc};

use miette::NamedSource;

use crate::{config::FormatConfig, errors::MosaicError};

/// The full text of one input file.
#[derive(Debug, Clone)]
pub struct InputSource {
    pub name: String,
    pub text: String,
}

/// One field of a raw row, with its absolute byte offset in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub text: String,
    pub offset: usize,
}

/// The delimited fields of one non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: usize,
    /// The line with surrounding whitespace stripped.
    pub content: String,
    /// Byte offset of `content` in the source.
    pub offset: usize,
    pub fields: Vec<Field>,
}

impl InputSource {
    /// Reads the whole file, failing with `MissingFile` when it cannot be opened.
    pub fn read(path: &Path) -> Result<Self, MosaicError> {
        let text = fs::read_to_string(path).map_err(|source| MosaicError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            name: path.display().to_string(),
            text,
        })
    }

    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.text.clone()))
    }

    /// Splits the source into rows, dropping lines that are blank once stripped.
    pub fn rows(&self, config: &FormatConfig) -> Vec<RawRow> {
        let mut rows = Vec::new();
        let mut line_start = 0;

        for (index, raw_line) in self.text.split_inclusive('\n').enumerate() {
            let content = raw_line.trim();
            if !content.is_empty() {
                let leading = raw_line.len() - raw_line.trim_start().len();
                let offset = line_start + leading;
                rows.push(RawRow {
                    line: index + 1,
                    content: content.to_string(),
                    offset,
                    fields: split_fields(content, offset, config),
                });
            }
            line_start += raw_line.len();
        }

        rows
    }
}

impl RawRow {
    pub fn field_texts(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.text.as_str()).collect()
    }

    /// The pattern is always the last field, whatever the row's shape.
    pub fn pattern_field(&self) -> Option<&Field> {
        self.fields.last()
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn split_fields(content: &str, offset: usize, config: &FormatConfig) -> Vec<Field> {
    let delimiter = config.delimiter.as_str();
    let pieces: Vec<&str> = if config.split_limited {
        content.splitn(config.max_fields, delimiter).collect()
    } else {
        content.split(delimiter).collect()
    };

    let mut cursor = offset;
    pieces
        .into_iter()
        .map(|piece| {
            let field = Field {
                text: piece.to_string(),
                offset: cursor,
            };
            cursor += piece.len() + delimiter.len();
            field
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;

    fn rows_of(text: &str, profile: Profile) -> Vec<RawRow> {
        InputSource::from_text("test", text).rows(&FormatConfig::for_profile(profile))
    }

    #[test]
    fn blank_lines_are_dropped_but_line_numbers_kept() {
        let rows = rows_of("5dc,6sc\n\n   \n\t\n2sc\n", Profile::TabbedOptionalFields);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 5);
        assert_eq!(rows[1].field_texts(), vec!["2sc"]);
    }

    #[test]
    fn strips_surrounding_whitespace_and_carriage_returns() {
        let rows = rows_of("  1\tred\t2sc  \r\n", Profile::TabbedOptionalFields);
        assert_eq!(rows[0].content, "1\tred\t2sc");
        assert_eq!(rows[0].offset, 2);
        assert_eq!(rows[0].field_texts(), vec!["1", "red", "2sc"]);
    }

    #[test]
    fn field_offsets_point_into_the_source() {
        let text = "1\tred\t2sc,3hdc\nblue\t4dc";
        let rows = rows_of(text, Profile::TabbedOptionalFields);

        for row in &rows {
            for field in &row.fields {
                assert_eq!(&text[field.offset..field.offset + field.text.len()], field.text);
            }
        }
        assert_eq!(rows[1].pattern_field().unwrap().offset, 20);
    }

    #[test]
    fn tabbed_profile_splits_every_tab() {
        let rows = rows_of("1\tred\t2sc\textra", Profile::TabbedOptionalFields);
        assert_eq!(rows[0].fields.len(), 4);
    }

    #[test]
    fn csv_profile_keeps_pattern_commas_in_last_field() {
        let rows = rows_of("1,red,2sc,3hdc,4dc", Profile::CsvFixedFields);
        assert_eq!(rows[0].field_texts(), vec!["1", "red", "2sc,3hdc,4dc"]);
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(rows_of("", Profile::TabbedOptionalFields).is_empty());
        assert!(rows_of("\n\n \n", Profile::CsvFixedFields).is_empty());
    }

    #[test]
    fn read_names_source_after_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"1sc\n").unwrap();

        let source = InputSource::read(file.path()).unwrap();
        assert_eq!(source.name, file.path().display().to_string());
        assert_eq!(source.text, "1sc\n");
        assert_eq!(source.to_named_source().name(), source.name);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = InputSource::read(Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, MosaicError::MissingFile { .. }));
    }
}
