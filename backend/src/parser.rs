//! Turns free-form model output into attributed lines.
//!
//! Parsing is permissive: anything that is not `Name: text` for a known name
//! is dropped, never reported.

use shared::models::{Character, DialogueExchange};

/// Extract `Name: line` pairs whose speaker is one of `characters`.
///
/// Only the first colon separates speaker from line, and names are matched
/// exactly (case-sensitive). Output keeps the order of the input.
pub fn parse_dialogue(generated: &str, characters: &[Character]) -> Vec<DialogueExchange> {
    generated
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .filter_map(|(speaker, line)| {
            let speaker = speaker.trim();
            let line = line.trim();
            let known = characters.iter().any(|c| c.name == speaker);
            (known && !line.is_empty()).then(|| DialogueExchange::new(speaker, line))
        })
        .collect()
}

/// Write exchanges back in the canonical `Name: line` form, one per line.
pub fn render_script(exchanges: &[DialogueExchange]) -> String {
    exchanges
        .iter()
        .map(|e| format!("{}: {}\n", e.character, e.line))
        .collect()
}
