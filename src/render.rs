//! Row renderer.
//!
//! Produces one annotated line per row:
//! `<row number><suffix><color><suffix>bs, [1] 2sc, [3] 3hdc, bs`.

use unicode_width::UnicodeWidthStr;

use crate::{
    config::{Align, FormatConfig},
    infer::RowNumber,
    segments::Segment,
};

const ITEM_SEPARATOR: &str = ", ";

/// Renders a complete output line.
pub fn render(
    row_number: &RowNumber,
    color: &str,
    segments: &[Segment],
    config: &FormatConfig,
) -> String {
    let mut line = String::new();
    line.push_str(&pad(
        &row_number.to_string(),
        config.row_number_width,
        config.row_number_align,
    ));
    line.push_str(&config.row_number_suffix);
    line.push_str(&pad(color, config.color_width, config.color_align));
    line.push_str(&config.color_suffix);
    line.push_str(&render_body(segments, &config.border_stitch));
    line
}

/// Renders the segment list bracketed by the border stitch.
pub fn render_body(segments: &[Segment], border_stitch: &str) -> String {
    let mut body = String::from(border_stitch);
    for segment in segments {
        body.push_str(ITEM_SEPARATOR);
        body.push_str(&render_segment(segment));
    }
    body.push_str(ITEM_SEPARATOR);
    body.push_str(border_stitch);
    body
}

pub fn render_segment(segment: &Segment) -> String {
    format!(
        "[{}] {}{}",
        segment.starting_stitch, segment.stitch_count, segment.stitch_type
    )
}

/// Pads to `width` terminal columns. Longer values are left untouched.
fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(value.width()));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}
