//! Segment parser.
//!
//! Splits compact pattern text such as `2sc,3hdc,4dc` into ordered
//! [`Segment`]s and numbers each one with the stitch it starts on.

use thiserror::Error;

/// Delimiter between segment tokens inside pattern text.
pub const SEGMENT_DELIMITER: char = ',';

/// Width of the stitch-type code at the end of every token.
const STITCH_TYPE_CHARS: usize = 2;

/// A run of stitches of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub stitch_count: u32,
    /// Stitch-type code, two or more characters (`sc`, `hdc`).
    pub stitch_type: String,
    /// 1-based index of this segment's first stitch within the row.
    pub starting_stitch: u32,
}

/// Why a token could not be read as a segment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentFault {
    #[error("needs a stitch count followed by a two-character stitch type")]
    TooShort,
    #[error("stitch count is not a base-10 number")]
    NotANumber,
    #[error("stitch count must be at least 1")]
    ZeroCount,
    #[error("stitch count is too large")]
    CountOverflow,
}

/// A token that failed to parse, with its position inside the pattern text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("segment {index} '{token}': {fault}")]
pub struct SegmentError {
    /// 0-based position of the token in the pattern.
    pub index: usize,
    pub token: String,
    /// Byte offset of the token within the pattern text.
    pub offset: usize,
    pub fault: SegmentFault,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses pattern text into segments, in source order.
///
/// Tokens are not trimmed: ` 2sc` is rejected because its count is ` 2`.
pub fn parse_segments(pattern: &str) -> Result<Vec<Segment>, SegmentError> {
    let mut segments = Vec::new();
    // Kept wide so the stitch after the last segment may exceed u32.
    let mut next_start: u64 = 1;
    let mut offset = 0;

    for (index, token) in pattern.split(SEGMENT_DELIMITER).enumerate() {
        let fail = |fault| SegmentError {
            index,
            token: token.to_string(),
            offset,
            fault,
        };

        let (stitch_count, stitch_type) = split_token(token).map_err(fail)?;
        let starting_stitch =
            u32::try_from(next_start).map_err(|_| fail(SegmentFault::CountOverflow))?;
        segments.push(Segment {
            stitch_count,
            stitch_type: stitch_type.to_string(),
            starting_stitch,
        });

        next_start += u64::from(stitch_count);
        offset += token.len() + SEGMENT_DELIMITER.len_utf8();
    }

    Ok(segments)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// Splits one token into its count and its trailing stitch-type code.
///
/// The code is the last two characters, extended left over any further
/// non-digit characters so that three-letter codes such as `hdc` stay whole.
fn split_token(token: &str) -> Result<(u32, &str), SegmentFault> {
    if token.chars().count() <= STITCH_TYPE_CHARS {
        return Err(SegmentFault::TooShort);
    }

    let mut split = token
        .char_indices()
        .rev()
        .nth(STITCH_TYPE_CHARS - 1)
        .map(|(i, _)| i)
        .ok_or(SegmentFault::TooShort)?;
    for (i, c) in token[..split].char_indices().rev() {
        if c.is_ascii_digit() {
            break;
        }
        split = i;
    }
    let (count_text, stitch_type) = token.split_at(split);

    if count_text.is_empty() || !count_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SegmentFault::NotANumber);
    }

    match count_text.parse::<u32>() {
        Ok(0) => Err(SegmentFault::ZeroCount),
        Ok(count) => Ok((count, stitch_type)),
        Err(_) => Err(SegmentFault::CountOverflow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(segments: &[Segment]) -> Vec<(u32, u32, &str)> {
        segments
            .iter()
            .map(|s| (s.starting_stitch, s.stitch_count, s.stitch_type.as_str()))
            .collect()
    }

    #[test]
    fn numbers_segments_by_running_total() {
        let segments = parse_segments("2sc,3hdc,4dc").unwrap();
        assert_eq!(
            triples(&segments),
            vec![(1, 2, "sc"), (3, 3, "hdc"), (6, 4, "dc")]
        );
    }

    #[test]
    fn stitch_type_keeps_every_trailing_letter() {
        let segments = parse_segments("3hdc,12ch,1sc").unwrap();
        assert_eq!(
            triples(&segments),
            vec![(1, 3, "hdc"), (4, 12, "ch"), (16, 1, "sc")]
        );
    }

    #[test]
    fn last_two_characters_are_the_type_even_when_one_is_a_digit() {
        let segments = parse_segments("12c").unwrap();
        assert_eq!(triples(&segments), vec![(1, 1, "2c")]);
    }

    #[test]
    fn counts_sum_to_last_stitch_index() {
        for pattern in ["5dc,6sc", "1sc", "10ch,1sc,7dc,3tr", "2sc,2sc,2sc,2sc"] {
            let segments = parse_segments(pattern).unwrap();
            assert_eq!(segments.len(), pattern.split(',').count());

            let total: u32 = segments.iter().map(|s| s.stitch_count).sum();
            let last = segments.last().unwrap();
            assert_eq!(total, last.starting_stitch + last.stitch_count - 1);

            assert_eq!(segments[0].starting_stitch, 1);
            assert!(segments
                .windows(2)
                .all(|w| w[0].starting_stitch < w[1].starting_stitch));
        }
    }

    #[test]
    fn two_character_token_is_too_short() {
        let err = parse_segments("sc").unwrap_err();
        assert_eq!(err.fault, SegmentFault::TooShort);
        assert_eq!(err.index, 0);
        assert_eq!(err.token, "sc");
    }

    #[test]
    fn empty_pattern_is_malformed() {
        let err = parse_segments("").unwrap_err();
        assert_eq!(err.fault, SegmentFault::TooShort);
    }

    #[test]
    fn reports_position_of_failing_token() {
        let err = parse_segments("2sc,xdc,4dc").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.offset, 4);
        assert_eq!(err.fault, SegmentFault::NotANumber);

        let err = parse_segments("2sc,4dc,xxdc").unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.offset, 8);
        assert_eq!(err.token, "xxdc");
        assert_eq!(err.fault, SegmentFault::NotANumber);
    }

    #[test]
    fn tokens_are_not_trimmed() {
        let err = parse_segments("2sc, 3dc").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.fault, SegmentFault::NotANumber);
    }

    #[test]
    fn signed_counts_are_rejected() {
        assert_eq!(
            parse_segments("+3sc").unwrap_err().fault,
            SegmentFault::NotANumber
        );
        assert_eq!(
            parse_segments("-3sc").unwrap_err().fault,
            SegmentFault::NotANumber
        );
    }

    #[test]
    fn zero_count_is_rejected() {
        assert_eq!(
            parse_segments("2sc,0dc").unwrap_err().fault,
            SegmentFault::ZeroCount
        );
    }

    #[test]
    fn oversized_counts_are_rejected() {
        assert_eq!(
            parse_segments("99999999999sc").unwrap_err().fault,
            SegmentFault::CountOverflow
        );
        let err = parse_segments("4294967295sc,1sc").unwrap_err();
        assert_eq!(err.fault, SegmentFault::CountOverflow);
        assert_eq!(err.index, 1);
    }

    #[test]
    fn largest_count_fits_as_last_segment() {
        let segments = parse_segments("4294967295sc").unwrap();
        assert_eq!(triples(&segments), vec![(1, 4294967295, "sc")]);

        let segments = parse_segments("1sc,4294967294dc").unwrap();
        assert_eq!(triples(&segments), vec![(1, 1, "sc"), (2, 4294967294, "dc")]);
    }

    #[test]
    fn stitch_type_is_measured_in_characters() {
        let segments = parse_segments("4né").unwrap();
        assert_eq!(triples(&segments), vec![(1, 4, "né")]);
    }
}
