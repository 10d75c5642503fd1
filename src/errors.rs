//! Overlay Mosaic error handling.
//!
//! Every failure the formatter can surface is a variant of [`MosaicError`].
//! Row-level variants carry the input file as miette source code so the CLI
//! can point at the offending token or line.

use std::{io, path::PathBuf, sync::Arc};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{
    input::{InputSource, RawRow},
    segments::{SegmentError, SegmentFault},
};

/// The single error type returned by the library.
#[derive(Error, Diagnostic, Debug)]
pub enum MosaicError {
    #[error("cannot open input file '{}'", .path.display())]
    #[diagnostic(
        code(mosaic::io::missing_file),
        help("check that the path exists and is readable")
    )]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("row at line {line}: malformed segment '{token}' in '{content}'")]
    #[diagnostic(
        code(mosaic::parse::malformed_segment),
        help("a segment is a stitch count followed by a two-character stitch type, e.g. `3sc`")
    )]
    MalformedSegment {
        line: usize,
        content: String,
        token: String,
        fault: SegmentFault,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("{fault}")]
        span: SourceSpan,
    },

    #[error("row at line {line} has {field_count} fields, expected {expected}")]
    #[diagnostic(code(mosaic::parse::row_shape))]
    UnrecognizedRowShape {
        line: usize,
        field_count: usize,
        expected: String,
        content: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("unrecognized row shape")]
        span: SourceSpan,
    },

    #[error("cannot write output to '{destination}'")]
    #[diagnostic(code(mosaic::io::write_output))]
    WriteOutput {
        destination: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration ({origin}): {message}")]
    #[diagnostic(code(mosaic::config::invalid))]
    Config { origin: String, message: String },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl MosaicError {
    /// Builds a malformed-segment diagnostic whose span covers the failing
    /// token inside the row's pattern field.
    pub fn malformed_segment(row: &RawRow, err: &SegmentError, source: &InputSource) -> Self {
        let pattern_offset = row.pattern_field().map_or(row.offset, |field| field.offset);
        let start = pattern_offset + err.offset;

        MosaicError::MalformedSegment {
            line: row.line,
            content: row.content.clone(),
            token: err.token.clone(),
            fault: err.fault.clone(),
            src: source.to_named_source(),
            span: (start..start + err.token.len()).into(),
        }
    }

    /// Builds a row-shape diagnostic spanning the whole stripped line.
    pub fn unrecognized_shape(row: &RawRow, expected: String, source: &InputSource) -> Self {
        MosaicError::UnrecognizedRowShape {
            line: row.line,
            field_count: row.fields.len(),
            expected,
            content: row.content.clone(),
            src: source.to_named_source(),
            span: (row.offset..row.offset + row.content.len()).into(),
        }
    }

    pub fn config(origin: impl Into<String>, message: impl Into<String>) -> Self {
        MosaicError::Config {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Stable diagnostic code, handy for assertions.
    pub fn code_str(&self) -> &'static str {
        match self {
            MosaicError::MissingFile { .. } => "mosaic::io::missing_file",
            MosaicError::MalformedSegment { .. } => "mosaic::parse::malformed_segment",
            MosaicError::UnrecognizedRowShape { .. } => "mosaic::parse::row_shape",
            MosaicError::WriteOutput { .. } => "mosaic::io::write_output",
            MosaicError::Config { .. } => "mosaic::config::invalid",
        }
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a MosaicError with full miette diagnostics on stderr.
pub fn print_error(error: MosaicError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
