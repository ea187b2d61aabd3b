use std::ops::Range;

use log::debug;

use crate::error::{Error, MarkerKind, Result};

/// Line opening the block that receives the help text.
pub const START_MARKER: &str = "```text\n";
/// Line closing the block.
pub const END_MARKER: &str = "```\n";

/// A pair of literal marker lines bounding the block to replace.
///
/// A line matches a marker when its text, without the trailing `\n` or
/// `\r\n`, equals the marker's text. Lines with no terminator never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    start: String,
    end: String,
}

impl Default for Fence {
    fn default() -> Self {
        Fence {
            start: START_MARKER.to_string(),
            end: END_MARKER.to_string(),
        }
    }
}

/// Indices of the start and end marker lines of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRegion {
    pub start: usize,
    pub end: usize,
}

impl TargetRegion {
    /// Lines strictly between the two markers.
    pub fn interior(&self) -> Range<usize> {
        self.start + 1..self.end
    }
}

impl Fence {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let start = start.into();
        let end = end.into();
        if marker_text(&start) == marker_text(&end) {
            return Err(Error::InvalidFence(start));
        }
        Ok(Fence { start, end })
    }

    /// Finds the first start marker and the first end marker at or after it.
    pub fn locate(&self, lines: &[&str]) -> Result<TargetRegion> {
        let start = lines
            .iter()
            .position(|line| is_marker(line, &self.start))
            .ok_or_else(|| Error::MarkerNotFound {
                kind: MarkerKind::Start,
                marker: self.start.clone(),
            })?;

        let end = lines[start..]
            .iter()
            .position(|line| is_marker(line, &self.end))
            .map(|offset| start + offset)
            .ok_or_else(|| Error::MarkerNotFound {
                kind: MarkerKind::End,
                marker: self.end.clone(),
            })?;

        debug!("Found block markers at lines {} and {}", start + 1, end + 1);
        Ok(TargetRegion { start, end })
    }
}

/// Text of a line without its terminator, or `None` for an unterminated line.
fn line_content(line: &str) -> Option<&str> {
    line.strip_suffix('\n')
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

fn marker_text(marker: &str) -> &str {
    line_content(marker).unwrap_or(marker)
}

fn is_marker(line: &str, marker: &str) -> bool {
    line_content(line).is_some_and(|text| text == marker_text(marker))
}
