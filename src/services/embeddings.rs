use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::error::{AppError, AppResult};

/// Precomputed ingredient embeddings, loaded once per process
///
/// The backing artifact is a JSON object mapping normalized ingredient keys
/// (lowercase, whitespace collapsed to `_`) to fixed-length float vectors.
/// The table is immutable after load; concurrent first callers race through
/// a `OnceCell` so the artifact is read at most once. A missing or malformed
/// artifact is a configuration error, never an empty table.
pub struct EmbeddingStore {
    path: PathBuf,
    table: OnceCell<EmbeddingTable>,
}

struct EmbeddingTable {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl EmbeddingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// Normalizes an ingredient name to the artifact's key convention:
    /// lowercase, with whitespace runs replaced by a single underscore.
    pub fn normalize_key(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Loads the artifact if it has not been loaded yet. Idempotent; safe to
    /// call from concurrent first requests.
    pub async fn load(&self) -> AppResult<()> {
        self.table().await.map(|_| ())
    }

    /// Number of ingredient vectors in the table
    pub async fn len(&self) -> AppResult<usize> {
        Ok(self.table().await?.vectors.len())
    }

    /// Shared dimensionality of every vector in the table
    pub async fn dimension(&self) -> AppResult<usize> {
        Ok(self.table().await?.dimension)
    }

    /// Looks up the embedding vector for an ingredient name.
    ///
    /// Lookup is case/whitespace-insensitive. A miss is not an error: it is
    /// logged and reported as `None`, and callers skip the ingredient.
    pub async fn lookup(&self, name: &str) -> AppResult<Option<&[f32]>> {
        let table = self.table().await?;
        let key = Self::normalize_key(name);
        match table.vectors.get(&key) {
            Some(vector) => Ok(Some(vector.as_slice())),
            None => {
                tracing::warn!(ingredient = %name, key = %key, "Ingredient embedding not found");
                Ok(None)
            }
        }
    }

    async fn table(&self) -> AppResult<&EmbeddingTable> {
        self.table
            .get_or_try_init(|| async { self.read_artifact().await })
            .await
    }

    async fn read_artifact(&self) -> AppResult<EmbeddingTable> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Configuration(format!(
                "Embedding artifact not readable at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let vectors: HashMap<String, Vec<f32>> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!(
                "Embedding artifact at {} is malformed: {}",
                self.path.display(),
                e
            ))
        })?;

        // All vectors in the table must share one dimensionality
        let dimension = vectors.values().next().map(Vec::len).unwrap_or(0);
        if let Some((key, vector)) = vectors.iter().find(|(_, v)| v.len() != dimension) {
            return Err(AppError::Configuration(format!(
                "Embedding artifact has inconsistent dimensions: '{}' has {} (expected {})",
                key,
                vector.len(),
                dimension
            )));
        }

        tracing::info!(
            ingredient_count = vectors.len(),
            dimension,
            path = %self.path.display(),
            "Loaded ingredient embeddings"
        );

        Ok(EmbeddingTable { vectors, dimension })
    }
}
