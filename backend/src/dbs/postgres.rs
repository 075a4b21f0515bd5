use crate::dbs::{Database, DbResult};
use async_trait::async_trait;
use serde_json::Value;
use shared::models::{Character, DialogueExchange, ReferenceDialogue, SavedDialogue, StoredCharacter};
use sqlx::{Pool, Postgres, Row, postgres::PgPoolOptions, postgres::PgRow};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> DbResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS characters (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                traits JSONB NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS reference_dialogues (
                id UUID PRIMARY KEY,
                source TEXT NOT NULL,
                characters JSONB NOT NULL,
                content TEXT NOT NULL,
                tags TEXT[] NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // content holds the exchanges array as produced by /api/generate
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS dialogues (
                id UUID PRIMARY KEY,
                scenario TEXT NOT NULL,
                characters JSONB NOT NULL,
                content JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn reference_from_row(row: PgRow) -> DbResult<ReferenceDialogue> {
    let characters: Value = row.get("characters");
    Ok(ReferenceDialogue {
        id: row.get("id"),
        source: row.get("source"),
        characters: serde_json::from_value(characters)?,
        content: row.get("content"),
        tags: row.get("tags"),
    })
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn get_characters(&self) -> DbResult<Vec<StoredCharacter>> {
        let rows = sqlx::query("SELECT id, name, type, traits FROM characters")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| -> DbResult<StoredCharacter> {
                let traits: Value = row.get("traits");
                Ok(StoredCharacter {
                    id: row.get("id"),
                    name: row.get("name"),
                    r#type: row.get("type"),
                    traits: serde_json::from_value(traits)?,
                })
            })
            .collect()
    }

    async fn create_character(&self, character: StoredCharacter) -> DbResult<()> {
        let traits = serde_json::to_value(&character.traits)?;
        sqlx::query("INSERT INTO characters (id, name, type, traits) VALUES ($1, $2, $3, $4)")
            .bind(character.id)
            .bind(character.name)
            .bind(character.r#type)
            .bind(traits)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_reference_dialogues(&self, tag: Option<&str>) -> DbResult<Vec<ReferenceDialogue>> {
        let rows = if let Some(tag) = tag {
            sqlx::query(
                "SELECT id, source, characters, content, tags FROM reference_dialogues WHERE $1 = ANY(tags)",
            )
            .bind(tag)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query("SELECT id, source, characters, content, tags FROM reference_dialogues")
                .fetch_all(&self.pool)
                .await?
        };

        rows.into_iter().map(reference_from_row).collect()
    }

    async fn add_reference_dialogue(&self, dialogue: ReferenceDialogue) -> DbResult<()> {
        let characters = serde_json::to_value(&dialogue.characters)?;
        sqlx::query(
            "INSERT INTO reference_dialogues (id, source, characters, content, tags) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(dialogue.id)
        .bind(dialogue.source)
        .bind(characters)
        .bind(dialogue.content)
        .bind(dialogue.tags)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_generated_dialogue(&self, dialogue: SavedDialogue) -> DbResult<()> {
        let characters = serde_json::to_value(&dialogue.characters)?;
        let content = serde_json::to_value(&dialogue.exchanges)?;
        sqlx::query(
            "INSERT INTO dialogues (id, scenario, characters, content, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(dialogue.id)
        .bind(dialogue.scenario)
        .bind(characters)
        .bind(content)
        .bind(dialogue.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_generated_dialogues(&self) -> DbResult<Vec<SavedDialogue>> {
        let rows = sqlx::query(
            "SELECT id, scenario, characters, content, created_at FROM dialogues ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> DbResult<SavedDialogue> {
                let characters: Value = row.get("characters");
                let content: Value = row.get("content");
                Ok(SavedDialogue {
                    id: row.get("id"),
                    scenario: row.get("scenario"),
                    characters: serde_json::from_value::<Vec<Character>>(characters)?,
                    exchanges: serde_json::from_value::<Vec<DialogueExchange>>(content)?,
                    created_at: row.get("created_at"),
                })
            })
            .collect()
    }
}
