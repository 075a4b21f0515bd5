use async_trait::async_trait;
use shared::models::{ReferenceDialogue, SavedDialogue, StoredCharacter};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub mod local;
pub mod postgres;

pub use local::LocalDatabase;
pub use postgres::PostgresDatabase;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    Local { path: PathBuf },
    Postgres { url: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage for the character library, reference dialogues and saved results.
/// The generation pipeline itself never touches it.
#[async_trait]
pub trait Database: Send + Sync {
    async fn get_characters(&self) -> DbResult<Vec<StoredCharacter>>;
    async fn create_character(&self, character: StoredCharacter) -> DbResult<()>;
    /// `tag` keeps only dialogues carrying exactly that tag.
    async fn get_reference_dialogues(&self, tag: Option<&str>) -> DbResult<Vec<ReferenceDialogue>>;
    async fn add_reference_dialogue(&self, dialogue: ReferenceDialogue) -> DbResult<()>;
    async fn save_generated_dialogue(&self, dialogue: SavedDialogue) -> DbResult<()>;
    /// Newest first.
    async fn get_generated_dialogues(&self) -> DbResult<Vec<SavedDialogue>>;
}

pub async fn connect(config: &DatabaseConfig) -> DbResult<Arc<dyn Database>> {
    match config {
        DatabaseConfig::Local { path } => {
            tracing::info!("Using local database at {}", path.display());
            Ok(Arc::new(LocalDatabase::open(path.clone()).await?))
        }
        DatabaseConfig::Postgres { url } => {
            tracing::info!("Connecting to Postgres");
            Ok(Arc::new(PostgresDatabase::new(url).await?))
        }
    }
}
