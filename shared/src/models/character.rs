use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of the cast as sent with a generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub traits: Vec<String>,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        r#type: impl Into<String>,
        traits: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
            traits: traits.into_iter().map(Into::into).collect(),
        }
    }
}

/// A character kept in the library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredCharacter {
    pub id: Uuid,
    pub name: String,
    pub r#type: String,
    pub traits: Vec<String>,
}

impl From<StoredCharacter> for Character {
    fn from(stored: StoredCharacter) -> Self {
        Self {
            name: stored.name,
            r#type: stored.r#type,
            traits: stored.traits,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateCharacterRequest {
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub traits: Vec<String>,
}
