use super::{Database, DbResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{ReferenceDialogue, SavedDialogue, StoredCharacter};
use std::path::PathBuf;
use tokio::sync::RwLock;

#[derive(Serialize, Deserialize, Default, Clone)]
struct LocalData {
    #[serde(default)]
    characters: Vec<StoredCharacter>,
    #[serde(default)]
    references: Vec<ReferenceDialogue>,
    #[serde(default)]
    dialogues: Vec<SavedDialogue>,
}

/// Single JSON file store, rewritten on every change.
pub struct LocalDatabase {
    path: PathBuf,
    data: RwLock<LocalData>,
}

impl LocalDatabase {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub async fn open(path: PathBuf) -> DbResult<Self> {
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LocalData::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    async fn save(&self, data: &LocalData) -> DbResult<()> {
        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl Database for LocalDatabase {
    async fn get_characters(&self) -> DbResult<Vec<StoredCharacter>> {
        Ok(self.data.read().await.characters.clone())
    }

    async fn create_character(&self, character: StoredCharacter) -> DbResult<()> {
        let mut db = self.data.write().await;
        db.characters.push(character);
        self.save(&db).await
    }

    async fn get_reference_dialogues(&self, tag: Option<&str>) -> DbResult<Vec<ReferenceDialogue>> {
        let db = self.data.read().await;
        Ok(match tag {
            Some(tag) => db
                .references
                .iter()
                .filter(|r| r.has_tag(tag))
                .cloned()
                .collect(),
            None => db.references.clone(),
        })
    }

    async fn add_reference_dialogue(&self, dialogue: ReferenceDialogue) -> DbResult<()> {
        let mut db = self.data.write().await;
        db.references.push(dialogue);
        self.save(&db).await
    }

    async fn save_generated_dialogue(&self, dialogue: SavedDialogue) -> DbResult<()> {
        let mut db = self.data.write().await;
        db.dialogues.push(dialogue);
        self.save(&db).await
    }

    async fn get_generated_dialogues(&self) -> DbResult<Vec<SavedDialogue>> {
        let db = self.data.read().await;
        Ok(db.dialogues.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{Character, DialogueExchange};
    use uuid::Uuid;

    fn reference(source: &str, tags: &[&str]) -> ReferenceDialogue {
        ReferenceDialogue {
            id: Uuid::now_v7(),
            source: source.to_string(),
            characters: vec!["Rick".to_string(), "Ilsa".to_string()],
            content: "Rick: Here's looking at you, kid.".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let db = LocalDatabase::open(path.clone()).await.unwrap();
        let character = StoredCharacter {
            id: Uuid::now_v7(),
            name: "Max".to_string(),
            r#type: "thief".to_string(),
            traits: vec!["reckless".to_string()],
        };
        db.create_character(character.clone()).await.unwrap();
        drop(db);

        let reopened = LocalDatabase::open(path).await.unwrap();
        assert_eq!(reopened.get_characters().await.unwrap(), vec![character]);
    }

    #[tokio::test]
    async fn filters_references_by_exact_tag() {
        let dir = tempfile::tempdir().unwrap();
        let db = LocalDatabase::open(dir.path().join("db.json")).await.unwrap();
        db.add_reference_dialogue(reference("Casablanca", &["romance", "classic"]))
            .await
            .unwrap();
        db.add_reference_dialogue(reference("Heat", &["crime"])).await.unwrap();

        let romance = db.get_reference_dialogues(Some("romance")).await.unwrap();
        assert_eq!(romance.len(), 1);
        assert_eq!(romance[0].source, "Casablanca");

        assert!(db.get_reference_dialogues(Some("Romance")).await.unwrap().is_empty());
        assert_eq!(db.get_reference_dialogues(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn lists_saved_dialogues_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = LocalDatabase::open(dir.path().join("db.json")).await.unwrap();

        for scenario in ["first", "second", "third"] {
            db.save_generated_dialogue(SavedDialogue {
                id: Uuid::now_v7(),
                scenario: scenario.to_string(),
                characters: vec![Character::new("Max", "", Vec::<String>::new())],
                exchanges: vec![DialogueExchange::new("Max", "Go.")],
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        let scenarios: Vec<String> = db
            .get_generated_dialogues()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.scenario)
            .collect();
        assert_eq!(scenarios, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(LocalDatabase::open(path).await.is_err());
    }
}
