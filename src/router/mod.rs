//! # Enrutamiento de Requests
//! src/router/mod.rs
//!
//! ```text
//! Request → RequestRouter ─┬─ /static/...  → FileSource     → Response
//!                          └─ cualquier otro → QueryProcessor → Response
//! ```
//!
//! Ningún error de los colaboradores sale del router: un archivo que no se
//! puede servir se convierte en 404 y una búsqueda siempre responde 200.

pub mod pages;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::files::FileSource;
use crate::http::mime::content_type_for;
use crate::http::{Request, Response, StatusCode};
use crate::search::{QueryProcessor, QueryResult};
use pages::{escape_html, SEARCH_FOOTER, SEARCH_HEADER};

/// Prefijo de URI que se sirve como archivo estático
pub const STATIC_PREFIX: &str = "/static/";

/// Router compartido (vía `Arc`) por todos los workers
pub struct RequestRouter {
    /// Directorio base de los archivos estáticos
    static_dir: PathBuf,
    files: Arc<dyn FileSource>,
    queries: Arc<dyn QueryProcessor>,
}

impl RequestRouter {
    pub fn new(
        static_dir: impl Into<PathBuf>,
        files: Arc<dyn FileSource>,
        queries: Arc<dyn QueryProcessor>,
    ) -> Self {
        Self {
            static_dir: static_dir.into(),
            files,
            queries,
        }
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Produce la respuesta para un request
    pub fn route(&self, request: &Request) -> Response {
        match request.uri().strip_prefix(STATIC_PREFIX) {
            Some(file_part) => self.serve_file(file_part),
            None => self.serve_query(request),
        }
    }

    /// Rama de archivos estáticos; `file_part` es el URI sin el prefijo
    fn serve_file(&self, file_part: &str) -> Response {
        let file_name = file_part
            .split_once('?')
            .map_or(file_part, |(name, _)| name);

        match self.files.read_file(&self.static_dir, file_name) {
            Ok(contents) => Response::new(StatusCode::Ok)
                .with_content_type(content_type_for(file_name))
                .with_body_bytes(contents),
            Err(e) => {
                // No encontrado y fuera del directorio base se ven igual para el cliente
                debug!(file = file_name, error = %e, "Archivo no servido");

                let mut response =
                    Response::new(StatusCode::NotFound).with_content_type("text/html");
                response.append_str(&format!(
                    "<html><body>Couldn't find file \"{}\"</body></html>\n",
                    escape_html(file_name)
                ));
                response
            }
        }
    }

    /// Rama de búsqueda: encabezado fijo y, si hay términos, los resultados
    fn serve_query(&self, request: &Request) -> Response {
        let mut response = Response::new(StatusCode::Ok).with_content_type("text/html");
        response.append_str(SEARCH_HEADER);

        if let Some(raw_terms) = request.query_param("terms") {
            let query = raw_terms.to_lowercase();
            let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();

            if !terms.is_empty() {
                let results = self.queries.process_query(&terms);
                debug!(terms = ?terms, results = results.len(), "Búsqueda procesada");
                response.append_str(&render_results(&query, &results));
            }
        }

        response.append_str(SEARCH_FOOTER);
        response
    }
}

/// Línea con el conteo seguida de un link por resultado, en el orden recibido
fn render_results(query: &str, results: &[QueryResult]) -> String {
    let query = escape_html(query.trim());
    let mut html = String::new();

    if results.is_empty() {
        let _ = writeln!(html, "<div>No results found for <b>{}</b></div>", query);
        return html;
    }

    let noun = if results.len() == 1 { "result" } else { "results" };
    let _ = writeln!(
        html,
        "<div>{} {} found for <b>{}</b></div><br>",
        results.len(),
        noun,
        query
    );

    for result in results {
        let name = escape_html(&result.document_name);
        if is_absolute_url(&result.document_name) {
            let _ = writeln!(
                html,
                "<div><li><a href=\"{}\" target=\"_blank\">{}</a> [{}]</li></div>",
                name, name, result.rank
            );
        } else {
            let _ = writeln!(
                html,
                "<div><li><a href=\"{}{}\">{}</a> [{}]</li></div>",
                STATIC_PREFIX, name, name, result.rank
            );
        }
    }

    html
}

fn is_absolute_url(document_name: &str) -> bool {
    document_name.starts_with("http://") || document_name.starts_with("https://")
}
