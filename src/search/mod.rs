//! # Búsqueda
//!
//! El router consulta el índice a través de `QueryProcessor`; no conoce
//! el formato del índice ni el algoritmo de ranking.

pub mod index;

pub use index::{IndexSet, InvertedIndex};

/// Un documento que coincide con la consulta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Nombre del documento (ruta relativa o URL absoluta)
    pub document_name: String,

    /// Mayor rank = más relevante
    pub rank: u64,
}

impl QueryResult {
    pub fn new(document_name: &str, rank: u64) -> Self {
        Self {
            document_name: document_name.to_string(),
            rank,
        }
    }
}

/// Procesador de consultas compartido por todos los workers
pub trait QueryProcessor: Send + Sync {
    /// Busca los documentos que contienen los términos (ya en minúsculas)
    ///
    /// El resultado viene ordenado por rank descendente; el llamador
    /// respeta ese orden.
    fn process_query(&self, terms: &[String]) -> Vec<QueryResult>;
}
