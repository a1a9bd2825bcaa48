//! # Índice Invertido
//! src/search/index.rs
//!
//! Cada archivo de índice es un JSON `palabra → {documento → ocurrencias}`:
//!
//! ```json
//! {
//!   "hello": { "docs/a.txt": 3, "https://example.com/": 1 },
//!   "world": { "docs/a.txt": 2 }
//! }
//! ```
//!
//! Un documento coincide si contiene todos los términos dentro del mismo
//! índice; su rank es la suma de las ocurrencias. Los resultados de todos
//! los índices se concatenan y se ordenan por rank descendente.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::{QueryProcessor, QueryResult};
use crate::error::IndexError;

/// Índice cargado desde un archivo
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<String, u64>>,
}

impl InvertedIndex {
    /// Parsea un índice desde texto JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Carga un índice desde disco
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let text = fs::read_to_string(path).map_err(|e| IndexError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&text).map_err(|e| IndexError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Número de palabras distintas
    pub fn word_count(&self) -> usize {
        self.postings.len()
    }

    /// Documentos que contienen todos los términos, sin ordenar
    fn matching(&self, terms: &[String]) -> Vec<QueryResult> {
        let Some((first, rest)) = terms.split_first() else {
            return Vec::new();
        };
        let Some(first_postings) = self.postings.get(first) else {
            return Vec::new();
        };

        let mut candidates: BTreeMap<&str, u64> = first_postings
            .iter()
            .map(|(doc, count)| (doc.as_str(), *count))
            .collect();

        for term in rest {
            let Some(postings) = self.postings.get(term) else {
                return Vec::new();
            };
            candidates.retain(|doc, rank| match postings.get(*doc) {
                Some(count) => {
                    *rank += count;
                    true
                }
                None => false,
            });
        }

        candidates
            .into_iter()
            .map(|(doc, rank)| QueryResult::new(doc, rank))
            .collect()
    }
}

/// Conjunto de índices consultados juntos
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    indices: Vec<InvertedIndex>,
}

impl IndexSet {
    pub fn new(indices: Vec<InvertedIndex>) -> Self {
        Self { indices }
    }

    /// Carga todos los archivos de índice; falla con el primero inválido
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, IndexError> {
        let mut indices = Vec::with_capacity(paths.len());

        for path in paths {
            let path: PathBuf = path.as_ref().to_path_buf();
            let index = InvertedIndex::load(&path)?;
            info!(index = %path.display(), words = index.word_count(), "Índice cargado");
            indices.push(index);
        }

        Ok(Self::new(indices))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl QueryProcessor for IndexSet {
    fn process_query(&self, terms: &[String]) -> Vec<QueryResult> {
        let mut results: Vec<QueryResult> = self
            .indices
            .iter()
            .flat_map(|index| index.matching(terms))
            .collect();

        // sort_by es estable: a igual rank se mantiene el orden por índice y nombre
        results.sort_by(|a, b| b.rank.cmp(&a.rank));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn sample_index() -> InvertedIndex {
        InvertedIndex::from_json(
            r#"{
                "hello": { "a.txt": 3, "b.txt": 1, "https://example.com/": 5 },
                "world": { "a.txt": 2, "c.txt": 7 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_single_term_ordered_by_rank() {
        let set = IndexSet::new(vec![sample_index()]);

        let results = set.process_query(&terms(&["hello"]));

        assert_eq!(
            results,
            vec![
                QueryResult::new("https://example.com/", 5),
                QueryResult::new("a.txt", 3),
                QueryResult::new("b.txt", 1),
            ]
        );
    }

    #[test]
    fn test_all_terms_required() {
        let set = IndexSet::new(vec![sample_index()]);

        let results = set.process_query(&terms(&["hello", "world"]));

        assert_eq!(results, vec![QueryResult::new("a.txt", 5)]);
    }

    #[test]
    fn test_unknown_term_gives_no_results() {
        let set = IndexSet::new(vec![sample_index()]);

        assert!(set.process_query(&terms(&["hello", "nope"])).is_empty());
        assert!(set.process_query(&terms(&["nope"])).is_empty());
        assert!(set.process_query(&[]).is_empty());
    }

    #[test]
    fn test_results_merged_across_indices() {
        let other = InvertedIndex::from_json(r#"{ "hello": { "z.txt": 4 } }"#).unwrap();
        let set = IndexSet::new(vec![sample_index(), other]);

        let names: Vec<String> = set
            .process_query(&terms(&["hello"]))
            .into_iter()
            .map(|r| r.document_name)
            .collect();

        assert_eq!(names, vec!["https://example.com/", "z.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(InvertedIndex::from_json("[1, 2, 3]").is_err());
        assert!(InvertedIndex::from_json("{ \"a\": { \"doc\": -1 } }").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = IndexSet::load(&["/definitely/not/an/index.json"]);
        assert!(matches!(result, Err(IndexError::Io { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("search_server_index_{}.json", std::process::id()));
        fs::write(&path, r#"{ "rust": { "book.html": 9 } }"#).unwrap();

        let set = IndexSet::load(&[&path]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.process_query(&terms(&["rust"])),
            vec![QueryResult::new("book.html", 9)]
        );

        fs::remove_file(path).unwrap();
    }
}
