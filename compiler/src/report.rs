// report.rs — Uniform error documents for boundary diagnostics.
//
// Pure formatting: assembles the multi-section document shared by the wire
// type checker and the loopback classifier. No checking logic lives here;
// callers decide what failed, this module decides how it reads.
//
// Section order is fixed: declared type, offending subtype (when distinct
// from the root), caller-supplied detail blocks, accepted-shape catalogue.
//
// Preconditions: none.
// Postconditions: output is deterministic for given inputs.
// Failure modes: none.
// Side effects: none.

use crate::pretty::pretty;
use crate::types::CanonicalType;

const TYPE_INDENT: &str = "    ";

/// Build the headline and ordered note blocks of a boundary error document.
///
/// `category` reads like "Input port" or "Loopback"; `details` are already
/// formatted blocks (a one-line reason, or a multi-line explanation);
/// `accepted` is the accepted-shape catalogue, empty to omit the section.
pub fn document(
    category: &str,
    name: &str,
    root: &CanonicalType,
    offending: Option<&CanonicalType>,
    details: &[String],
    accepted: &[String],
) -> (String, Vec<String>) {
    let message = format!("{category} `{name}` has an invalid type");

    let mut notes = Vec::new();
    notes.push(format!("declared type:\n{TYPE_INDENT}{}", pretty(root)));

    if let Some(sub) = offending {
        if sub != root {
            notes.push(format!("offending subtype:\n{TYPE_INDENT}{}", pretty(sub)));
        }
    }

    notes.extend(details.iter().cloned());

    if !accepted.is_empty() {
        let mut block = String::from("accepted types:");
        for line in accepted {
            block.push('\n');
            block.push_str(TYPE_INDENT);
            block.push_str(line);
        }
        notes.push(block);
    }

    (message, notes)
}

/// Indent a block of example lines for use inside a detail note.
pub fn examples(intro: &str, lines: &[&str]) -> String {
    let mut block = String::from(intro);
    for line in lines {
        block.push('\n');
        block.push_str(TYPE_INDENT);
        block.push_str(line);
    }
    block
}

// ── Tests ───────────────────────────────────────────────────────────────────
