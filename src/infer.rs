//! Field inference.
//!
//! Turns the fields of one raw row into a row number, a color and the
//! pattern text, filling in whatever the row leaves out.

use std::{borrow::Cow, fmt};

/// Color given to odd rows that name none.
pub const ODD_ROW_COLOR: &str = "A";
/// Color given to even rows that name none.
pub const EVEN_ROW_COLOR: &str = "B";

/// A row number is either taken verbatim from the input or assigned from the
/// row's position among non-blank rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowNumber {
    Sequential(usize),
    Given(String),
}

impl fmt::Display for RowNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowNumber::Sequential(n) => write!(f, "{n}"),
            RowNumber::Given(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredRow<'a> {
    pub row_number: RowNumber,
    pub color: Cow<'a, str>,
    pub pattern: &'a str,
}

/// Infers the row fields from one of the three known shapes:
/// `[pattern]`, `[color, pattern]` or `[number, color, pattern]`.
///
/// Returns `None` for any other field count.
pub fn infer<'a>(fields: &[&'a str], sequential_index: usize) -> Option<InferredRow<'a>> {
    match *fields {
        [number, color, pattern] => Some(InferredRow {
            row_number: RowNumber::Given(number.to_string()),
            color: Cow::Borrowed(color),
            pattern,
        }),
        [color, pattern] => Some(InferredRow {
            row_number: RowNumber::Sequential(sequential_index),
            color: Cow::Borrowed(color),
            pattern,
        }),
        [pattern] => Some(InferredRow {
            row_number: RowNumber::Sequential(sequential_index),
            color: Cow::Borrowed(default_color(sequential_index)),
            pattern,
        }),
        _ => None,
    }
}

/// `A` for odd rows, `B` for even ones.
pub fn default_color(row_number: usize) -> &'static str {
    if row_number % 2 == 1 {
        ODD_ROW_COLOR
    } else {
        EVEN_ROW_COLOR
    }
}
