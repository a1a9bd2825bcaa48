//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Convierte un bloque de headers crudo (los bytes hasta la línea vacía,
//! inclusive) en un `Request`. Es una función pura: no hace I/O ni usa
//! estado compartido.
//!
//! ## Formato del bloque
//!
//! ```text
//! GET /query?terms=hello+world HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Connection: close\r\n
//! \r\n
//! ```
//!
//! ## Política ante entradas malformadas
//!
//! El parser nunca falla:
//! - Sin segundo token en la primera línea, el URI es `"/"`
//! - Una línea de header sin `:` se descarta sin afectar a las demás
//! - Nombre y valor se recortan y pasan a minúsculas; un header repetido
//!   conserva el último valor
//!
//! Pasar el valor a minúsculas puede ser incorrecto para headers cuyo valor
//! distingue mayúsculas; se mantiene porque el único header que se consulta
//! es `connection`.

use std::collections::HashMap;

/// URI usado cuando la request line no trae uno reconocible
pub const DEFAULT_URI: &str = "/";

/// Representa un request HTTP parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// URI tal como llegó (ej: "/static/index.html?x=1"), nunca vacío
    uri: String,

    /// Headers con nombre y valor en minúsculas
    headers: HashMap<String, String>,
}

impl Request {
    /// Crea un request con el URI dado y sin headers
    pub fn new(uri: &str) -> Self {
        let uri = if uri.is_empty() { DEFAULT_URI } else { uri };
        Self {
            uri: uri.to_string(),
            headers: HashMap::new(),
        }
    }

    /// Parsea un bloque de headers
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use search_server::http::Request;
    ///
    /// let raw = b"GET /static/a.txt HTTP/1.1\r\nConnection: Close\r\n\r\n";
    /// let request = Request::parse(raw);
    ///
    /// assert_eq!(request.uri(), "/static/a.txt");
    /// assert_eq!(request.header("Connection"), Some("close"));
    /// ```
    pub fn parse(block: &[u8]) -> Self {
        let text = String::from_utf8_lossy(block);

        // Separar tanto por '\r' como por '\n'; las líneas vacías no tienen ':'
        // y se descartan solas
        let mut lines = text.split(['\r', '\n']);

        let uri = lines
            .next()
            .and_then(|request_line| request_line.split_whitespace().nth(1))
            .unwrap_or(DEFAULT_URI);

        let mut request = Self::new(uri);
        for line in lines {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            request.add_header(name, value);
        }

        request
    }

    /// Inserta un header normalizado (last-write-wins)
    fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(
            name.trim().to_ascii_lowercase(),
            value.trim().to_ascii_lowercase(),
        );
    }

    /// Obtiene el URI completo del request
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Obtiene el path del URI, sin la query string
    pub fn path(&self) -> &str {
        self.uri
            .split_once('?')
            .map_or(self.uri.as_str(), |(path, _)| path)
    }

    /// Obtiene la query string cruda, si existe
    pub fn query_string(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, query)| query)
    }

    /// Decodifica los query parameters (`+` y `%XX` incluidos)
    ///
    /// Si un parámetro se repite, gana el último.
    pub fn query_params(&self) -> HashMap<String, String> {
        self.query_string()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Obtiene un query parameter decodificado
    ///
    /// # Ejemplo
    /// ```
    /// use search_server::http::Request;
    ///
    /// let request = Request::parse(b"GET /query?terms=hello+world HTTP/1.1\r\n\r\n");
    /// assert_eq!(request.query_param("terms").as_deref(), Some("hello world"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_params().remove(name)
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header (el nombre no distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// El cliente pidió cerrar la conexión tras esta respuesta
    pub fn wants_close(&self) -> bool {
        self.header("connection") == Some("close")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let request = Request::parse(b"GET / HTTP/1.1\r\n\r\n");

        assert_eq!(request.uri(), "/");
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = b"GET /static/index.html HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: Test\r\n\r\n";
        let request = Request::parse(raw);

        assert_eq!(request.uri(), "/static/index.html");
        assert_eq!(request.header("host"), Some("localhost:8080"));
        assert_eq!(request.header("User-Agent"), Some("test"));
    }

    #[test]
    fn test_empty_block_defaults_uri() {
        assert_eq!(Request::parse(b"").uri(), "/");
    }

    #[test]
    fn test_request_line_without_uri() {
        assert_eq!(Request::parse(b"GET\r\n\r\n").uri(), "/");
        assert_eq!(Request::parse(b"   \r\nHost: x\r\n\r\n").uri(), "/");
    }

    #[test]
    fn test_non_utf8_block_does_not_fail() {
        let request = Request::parse(b"GET /\xff\xfe HTTP/1.1\r\nHost: x\r\n\r\n");

        assert!(!request.uri().is_empty());
        assert_eq!(request.header("host"), Some("x"));
    }

    #[test]
    fn test_malformed_header_is_skipped() {
        let raw = b"GET / HTTP/1.1\r\nHost: x\r\nthis line has no colon\r\nAccept: */*\r\n\r\n";
        let request = Request::parse(raw);

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header("host"), Some("x"));
        assert_eq!(request.header("accept"), Some("*/*"));
    }

    #[test]
    fn test_header_split_on_first_colon() {
        let request = Request::parse(b"GET / HTTP/1.1\r\nHost:  example.com:8080  \r\n\r\n");

        assert_eq!(request.header("host"), Some("example.com:8080"));
    }

    #[test]
    fn test_connection_close_is_case_insensitive() {
        let request = Request::parse(b"GET / HTTP/1.1\r\nConnection: Close\r\n\r\n");

        assert_eq!(request.header("connection"), Some("close"));
        assert!(request.wants_close());
    }

    #[test]
    fn test_keep_alive_does_not_close() {
        let request = Request::parse(b"GET / HTTP/1.1\r\nConnection: keep-alive\r\n\r\n");
        assert!(!request.wants_close());

        let request = Request::parse(b"GET / HTTP/1.1\r\n\r\n");
        assert!(!request.wants_close());
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let request = Request::parse(b"GET / HTTP/1.1\r\nX-A: one\r\nx-a: TWO\r\n\r\n");

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("x-a"), Some("two"));
    }

    #[test]
    fn test_bare_newlines() {
        let request = Request::parse(b"GET /query HTTP/1.1\nHost: x\n\n");

        assert_eq!(request.uri(), "/query");
        assert_eq!(request.header("host"), Some("x"));
    }

    #[test]
    fn test_path_and_query() {
        let request = Request::parse(b"GET /static/a.txt?v=2 HTTP/1.1\r\n\r\n");

        assert_eq!(request.path(), "/static/a.txt");
        assert_eq!(request.query_string(), Some("v=2"));
    }

    #[test]
    fn test_query_param_decoding() {
        let request = Request::parse(b"GET /query?terms=Hello%20World&x=a+b HTTP/1.1\r\n\r\n");

        assert_eq!(request.query_param("terms").as_deref(), Some("Hello World"));
        assert_eq!(request.query_param("x").as_deref(), Some("a b"));
    }

    #[test]
    fn test_no_query_string() {
        let request = Request::parse(b"GET /query HTTP/1.1\r\n\r\n");

        assert!(request.query_params().is_empty());
        assert_eq!(request.query_param("terms"), None);
    }
}
