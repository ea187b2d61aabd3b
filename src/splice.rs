use log::debug;

use crate::error::Result;
use crate::fence::Fence;

/// Splits text into lines, each keeping its terminator as read.
pub fn lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Replaces the interior of the first fenced block in `document` with
/// `replacement`. Marker lines and everything outside the block are kept
/// byte for byte.
pub fn replace_block(document: &str, replacement: &str, fence: &Fence) -> Result<String> {
    let doc_lines = lines(document);
    let new_lines = lines(replacement);
    let region = fence.locate(&doc_lines)?;

    debug!(
        "Replacing {} line(s) with {} line(s)",
        region.interior().len(),
        new_lines.len()
    );

    let mut output = String::with_capacity(document.len() + replacement.len());
    doc_lines[..=region.start]
        .iter()
        .chain(new_lines.iter())
        .chain(doc_lines[region.end..].iter())
        .for_each(|line| output.push_str(line));

    Ok(output)
}
