use clap::Parser;
use shared::models::{Character, GenerationRequest};

#[derive(Parser, Debug)]
#[command(about = "Generate a movie dialogue through the screenplay API")]
pub struct Cli {
    /// The scenario for the dialogue
    #[arg(long, default_value = "")]
    pub scenario: String,
    /// The style of the dialogue (e.g. noir, comedy, drama)
    #[arg(long, default_value = "")]
    pub style: String,
    /// The emotional tone of the dialogue
    #[arg(long, default_value = "")]
    pub tone: String,
    /// Number of dialogue exchanges to generate
    #[arg(long, default_value_t = 5)]
    pub exchanges: i32,
    /// API base URL
    #[arg(long, env = "SCREENPLAY_API", default_value = "http://localhost:8080")]
    pub api: String,
    /// A character as `Name|type|trait1,trait2`; repeat for each one
    #[arg(long = "character", value_parser = parse_character)]
    pub characters: Vec<Character>,
}

impl Cli {
    pub fn request(&self) -> GenerationRequest {
        let characters = if self.characters.is_empty() {
            default_cast()
        } else {
            self.characters.clone()
        };
        GenerationRequest {
            scenario: self.scenario.clone(),
            characters,
            num_exchanges: self.exchanges,
            style: self.style.clone(),
            emotional_tone: self.tone.clone(),
        }
    }
}

pub fn default_cast() -> Vec<Character> {
    vec![
        Character::new(
            "Detective Smith",
            "detective",
            ["cynical", "intelligent", "persistent"],
        ),
        Character::new(
            "The Suspect",
            "villain",
            ["nervous", "calculating", "deceptive"],
        ),
    ]
}

fn parse_character(raw: &str) -> Result<Character, String> {
    let mut parts = raw.splitn(3, '|');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err("character name must not be empty".to_string());
    }
    let r#type = parts.next().unwrap_or_default().trim();
    let traits = parts
        .next()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty());
    Ok(Character::new(name, r#type, traits))
}
