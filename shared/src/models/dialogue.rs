use super::character::Character;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of exchanges asked for when the request leaves it unset or non-positive.
pub const DEFAULT_EXCHANGES: i32 = 5;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub scenario: String,
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Values of zero or below fall back to [`DEFAULT_EXCHANGES`]
    #[serde(default)]
    pub num_exchanges: i32,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub emotional_tone: String,
}

impl GenerationRequest {
    pub fn new(scenario: impl Into<String>, characters: Vec<Character>) -> Self {
        Self {
            scenario: scenario.into(),
            characters,
            num_exchanges: DEFAULT_EXCHANGES,
            style: String::new(),
            emotional_tone: String::new(),
        }
    }
}

/// One attributed line of dialogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueExchange {
    pub character: String,
    pub line: String,
}

impl DialogueExchange {
    pub fn new(character: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            line: line.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub scenario: String,
    pub exchanges: Vec<DialogueExchange>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveDialogueRequest {
    pub scenario: String,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub exchanges: Vec<DialogueExchange>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveDialogueResponse {
    pub id: Uuid,
    pub message: String,
}

/// A generated dialogue as kept in storage. Ids are time ordered (v7).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedDialogue {
    pub id: Uuid,
    pub scenario: String,
    pub characters: Vec<Character>,
    pub exchanges: Vec<DialogueExchange>,
    /// Missing in files written before it was recorded; reads as the epoch
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}
