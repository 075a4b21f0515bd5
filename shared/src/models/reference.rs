use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An example dialogue from an existing work, tagged for lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDialogue {
    pub id: Uuid,
    pub source: String,
    pub characters: Vec<String>,
    pub content: String,
    pub tags: Vec<String>,
}

impl ReferenceDialogue {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewReferenceDialogue {
    pub source: String,
    #[serde(default)]
    pub characters: Vec<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
