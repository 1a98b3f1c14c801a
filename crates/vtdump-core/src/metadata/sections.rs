//! Section header listing reader.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::numbers::parse_hex;
use crate::types::Section;

// `  [ 5] .data.rel.ro      PROGBITS        0000000000000000 000098 000048 00  WA  0   0  8`
static RE_SECTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[\s*(\d+)\]\s+(\S+)\s+(\S+)\s+([0-9a-fA-F]+)\s+([0-9a-fA-F]+)\s+([0-9a-fA-F]+)")
        .expect("valid section header regex")
});

/// Parse a section header listing into section records, in table order.
///
/// The null section (index 0) has no name and is skipped.
pub fn parse_sections(text: &str) -> Vec<Section>
{
    let mut sections = Vec::new();
    for line in text.lines() {
        let Some(caps) = RE_SECTION_LINE.captures(line) else {
            continue;
        };
        let Ok(id) = caps[1].parse::<u32>() else {
            continue;
        };
        if id == 0 {
            continue;
        }

        let (Some(address), Some(offset), Some(size)) = (parse_hex(&caps[4]), parse_hex(&caps[5]), parse_hex(&caps[6]))
        else {
            trace!(line, "skipping section line with unreadable numbers");
            continue;
        };

        sections.push(Section::new(
            &caps[2],
            id,
            &caps[3],
            address.saturating_add(offset),
            size,
        ));
    }
    sections
}
