//! Renders a generation request into the instruction text sent to the model.

use shared::models::GenerationRequest;
use std::fmt::Write;

/// Persona given to every provider ahead of the instruction text.
pub const SYSTEM_PREAMBLE: &str = "You are a creative dialogue writer that specializes in creating authentic movie-like or anime-like dialogues. Create realistic exchanges between characters based on the described scenario and character traits.";

/// Line format the model is asked to follow.
pub const OUTPUT_FORMAT: &str = "CHARACTER_NAME: Their dialogue line here.";

/// Build the instruction for an already validated request. Text is inserted
/// verbatim, nothing is escaped.
pub fn build_dialogue_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::new();

    let _ = write!(prompt, "Scenario: {}\n\n", request.scenario);

    prompt.push_str("Characters:\n");
    for character in &request.characters {
        let _ = writeln!(
            prompt,
            "- {} (Type: {}, Traits: {})",
            character.name,
            character.r#type,
            character.traits.join(", ")
        );
    }

    if !request.style.is_empty() {
        let _ = writeln!(prompt, "\nStyle: {}", request.style);
    }
    if !request.emotional_tone.is_empty() {
        let _ = writeln!(prompt, "Emotional Tone: {}", request.emotional_tone);
    }

    let _ = writeln!(
        prompt,
        "\nPlease create a dialogue with {} exchanges between these characters in the given scenario. Format the dialogue as:",
        request.num_exchanges
    );
    prompt.push_str(OUTPUT_FORMAT);
    prompt.push('\n');

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Character;

    fn noir_request() -> GenerationRequest {
        let mut request = GenerationRequest::new(
            "A rainy stakeout",
            vec![
                Character::new("Detective Smith", "detective", ["cynical", "persistent"]),
                Character::new("The Suspect", "villain", ["nervous"]),
            ],
        );
        request.num_exchanges = 3;
        request
    }

    #[test]
    fn renders_full_layout() {
        let mut request = noir_request();
        request.style = "noir".to_string();
        request.emotional_tone = "tense".to_string();

        let expected = "Scenario: A rainy stakeout\n\
\n\
Characters:\n\
- Detective Smith (Type: detective, Traits: cynical, persistent)\n\
- The Suspect (Type: villain, Traits: nervous)\n\
\n\
Style: noir\n\
Emotional Tone: tense\n\
\n\
Please create a dialogue with 3 exchanges between these characters in the given scenario. Format the dialogue as:\n\
CHARACTER_NAME: Their dialogue line here.\n";

        assert_eq!(build_dialogue_prompt(&request), expected);
    }

    #[test]
    fn omits_empty_style_and_tone() {
        let prompt = build_dialogue_prompt(&noir_request());
        assert!(!prompt.contains("Style:"));
        assert!(!prompt.contains("Emotional Tone:"));
        assert!(prompt.contains("- The Suspect (Type: villain, Traits: nervous)\n\nPlease create"));
    }

    #[test]
    fn tone_without_style_has_no_blank_line() {
        let mut request = noir_request();
        request.emotional_tone = "bleak".to_string();
        let prompt = build_dialogue_prompt(&request);
        assert!(prompt.contains("Traits: nervous)\nEmotional Tone: bleak\n\nPlease"));
    }

    #[test]
    fn character_without_traits() {
        let mut request = noir_request();
        request.characters.push(Character::new("Extra", "", Vec::<String>::new()));
        assert!(build_dialogue_prompt(&request).contains("- Extra (Type: , Traits: )\n"));
    }

    #[test]
    fn is_deterministic() {
        let request = noir_request();
        assert_eq!(build_dialogue_prompt(&request), build_dialogue_prompt(&request));
    }
}
