use std::collections::HashMap;

use uuid::Uuid;

use crate::{error::AppResult, services::similarity, stores::CatalogStore};

/// Term-frequency/inverse-document-frequency index over the recipe catalog
///
/// One document per recipe (title + description + instructions + tags +
/// ingredient names), added in catalog paging order. A text's vector has one
/// component per document: component `i` is the sum over the text's token
/// occurrences of tf(token, doc i) x idf(token), so two texts that overlap
/// the same documents point in the same direction. Built once at startup and
/// immutable afterwards.
pub struct LexicalIndex {
    docs: Vec<Document>,
    doc_freq: HashMap<String, u32>,
    recipe_vectors: HashMap<Uuid, Vec<f32>>,
}

struct Document {
    recipe_id: Uuid,
    term_counts: HashMap<String, f32>,
}

/// Lowercase alphanumeric tokens
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn term_counts(tokens: &[String]) -> HashMap<String, f32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    counts
}

impl LexicalIndex {
    /// Builds the index by streaming the catalog in fixed-size batches to
    /// bound peak memory. Document order follows paging order and is stable
    /// for the lifetime of the index.
    pub async fn build(catalog: &dyn CatalogStore, batch_size: usize) -> AppResult<Self> {
        let mut documents = Vec::new();
        let mut offset = 0;

        tracing::info!(batch_size, "Building lexical index");

        loop {
            let batch = catalog.list_recipes(offset, batch_size).await?;
            if batch.is_empty() {
                break;
            }
            offset += batch.len();
            for recipe in &batch {
                documents.push((recipe.id, recipe.document_text()));
            }
            tracing::debug!(processed = offset, "Indexed recipe batch");
        }

        let index = Self::from_documents(documents);
        tracing::info!(document_count = index.len(), "Lexical index built");
        Ok(index)
    }

    /// Builds the index from (recipe id, document text) pairs directly
    pub fn from_documents(documents: Vec<(Uuid, String)>) -> Self {
        let mut docs = Vec::with_capacity(documents.len());
        let mut doc_freq: HashMap<String, u32> = HashMap::new();

        for (recipe_id, text) in documents {
            let counts = term_counts(&tokenize(&text));
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            docs.push(Document {
                recipe_id,
                term_counts: counts,
            });
        }

        let mut index = Self {
            docs,
            doc_freq,
            recipe_vectors: HashMap::new(),
        };

        // Precompute each recipe's own document vector against the finished corpus
        let recipe_vectors: HashMap<Uuid, Vec<f32>> = index
            .docs
            .iter()
            .map(|doc| (doc.recipe_id, index.measure_vector(&doc.term_counts)))
            .collect();
        index.recipe_vectors = recipe_vectors;

        index
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// TF-IDF vector for arbitrary text, of length `self.len()`
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        self.measure_vector(&term_counts(&tokenize(text)))
    }

    /// Precomputed document vector for a recipe that was part of the build
    pub fn recipe_vector(&self, recipe_id: &Uuid) -> Option<&[f32]> {
        self.recipe_vectors.get(recipe_id).map(Vec::as_slice)
    }

    /// Cosine similarity between two TF-IDF vectors
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        similarity::cosine_similarity(a, b)
    }

    fn idf(&self, term: &str) -> f32 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0) as f32;
        (self.docs.len() as f32 / (1.0 + df)).ln() + 1.0
    }

    fn measure_vector(&self, query_counts: &HashMap<String, f32>) -> Vec<f32> {
        let mut vector = vec![0.0; self.docs.len()];
        for (term, query_count) in query_counts {
            let idf = self.idf(term);
            for (i, doc) in self.docs.iter().enumerate() {
                if let Some(tf) = doc.term_counts.get(term) {
                    vector[i] += query_count * tf * idf;
                }
            }
        }
        vector
    }
}
