//! Batch driver.
//!
//! Folds every raw row through inference, segment parsing and rendering,
//! applying the configured policies to rows that cannot be used.

use tracing::{debug, info, warn};

use crate::{
    config::{FormatConfig, RowPolicy},
    errors::MosaicError,
    infer::{infer, RowNumber},
    input::{InputSource, RawRow},
    render::render,
    segments::{parse_segments, Segment, SegmentError},
};

/// A fully parsed row, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub row_number: RowNumber,
    pub color: String,
    pub segments: Vec<Segment>,
}

impl ParsedRow {
    pub fn render(&self, config: &FormatConfig) -> String {
        render(&self.row_number, &self.color, &self.segments, config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnrecognizedShape { field_count: usize },
    MalformedSegment(SegmentError),
}

/// A row left out of the output under a `skip` policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub content: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedBatch {
    /// Rendered lines, in input order.
    pub lines: Vec<String>,
    pub skipped: Vec<SkippedRow>,
}

impl FormattedBatch {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Loads rows from `source` and formats them.
pub fn format_source(
    source: &InputSource,
    config: &FormatConfig,
) -> Result<FormattedBatch, MosaicError> {
    let rows = source.rows(config);
    format_rows(&rows, source, config)
}

/// Formats already-split rows.
///
/// The sequential row index is the row's 1-based position among non-blank
/// rows: every row advances it, including rows that end up skipped.
pub fn format_rows(
    rows: &[RawRow],
    source: &InputSource,
    config: &FormatConfig,
) -> Result<FormattedBatch, MosaicError> {
    config.validate()?;
    let mut batch = FormattedBatch::default();

    for (position, row) in rows.iter().enumerate() {
        let sequential_index = position + 1;
        let fields = row.field_texts();
        let inferred = if config.accepts_field_count(fields.len()) {
            infer(&fields, sequential_index)
        } else {
            None
        };

        let Some(inferred) = inferred else {
            match config.on_unrecognized_shape {
                RowPolicy::Abort => {
                    return Err(MosaicError::unrecognized_shape(
                        row,
                        config.expected_fields(),
                        source,
                    ))
                }
                RowPolicy::Skip => {
                    debug!(
                        line = row.line,
                        field_count = fields.len(),
                        "skipping row with unrecognized shape"
                    );
                    batch.skipped.push(SkippedRow {
                        line: row.line,
                        content: row.content.clone(),
                        reason: SkipReason::UnrecognizedShape {
                            field_count: fields.len(),
                        },
                    });
                    continue;
                }
            }
        };

        let segments = match parse_segments(inferred.pattern) {
            Ok(segments) => segments,
            Err(err) => match config.on_malformed_segment {
                RowPolicy::Abort => return Err(MosaicError::malformed_segment(row, &err, source)),
                RowPolicy::Skip => {
                    warn!(line = row.line, content = %row.content, "skipping row: {err}");
                    batch.skipped.push(SkippedRow {
                        line: row.line,
                        content: row.content.clone(),
                        reason: SkipReason::MalformedSegment(err),
                    });
                    continue;
                }
            },
        };

        let parsed = ParsedRow {
            row_number: inferred.row_number,
            color: inferred.color.into_owned(),
            segments,
        };
        debug!(
            line = row.line,
            row_number = %parsed.row_number,
            segments = parsed.segments.len(),
            "formatted row"
        );
        batch.lines.push(parsed.render(config));
    }

    info!(
        source = %source.name,
        rendered = batch.lines.len(),
        skipped = batch.skipped.len(),
        "batch formatted"
    );
    Ok(batch)
}
