//! Diagnostic collection
//!
//! Converts the byte-span errors collected during analysis into
//! editor-facing [`Diagnostic`]s with line/character ranges. Zero-width
//! spans (failures at end of input) are widened to one character so editors
//! have something visible to underline.

use crate::analysis::Analysis;
use crate::protocol::{Diagnostic, Severity};

pub fn collect(analysis: &Analysis) -> Vec<Diagnostic> {
    analysis
        .errors()
        .iter()
        .map(|error| {
            let mut range = analysis.line_index().range(error.span);
            if range.start == range.end {
                range.end.character += 1;
            }
            Diagnostic {
                severity: Severity::Error,
                message: error.message.clone(),
                range: (range.start, range.end),
                source: error.rule.to_string(),
            }
        })
        .collect()
}
