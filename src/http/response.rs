//! # Construcción de Respuestas HTTP
//!
//! Una respuesta se arma con el protocolo, el código de estado y el
//! `Content-Type`; después el body solo crece (`append_body`) hasta que la
//! conexión la serializa con `to_bytes` y la descarta.
//!
//! ## Formato en el cable
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Server: search_server\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use search_server::http::{Response, StatusCode};
//!
//! let mut response = Response::new(StatusCode::Ok)
//!     .with_content_type("text/plain");
//! response.append_body(b"Hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::StatusCode;

/// Protocolo usado en todas las respuestas
pub const PROTOCOL: &str = "HTTP/1.1";

/// Valor del header `Server`
const SERVER_NAME: &str = "search_server";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Protocolo de la status line (ej: "HTTP/1.1")
    protocol: String,

    /// Código de estado HTTP (200, 404)
    status: StatusCode,

    /// Valor del header Content-Type
    content_type: String,

    /// Cuerpo de la respuesta
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta vacía con el código indicado
    ///
    /// El `Content-Type` por defecto es `text/html`.
    pub fn new(status: StatusCode) -> Self {
        Self {
            protocol: PROTOCOL.to_string(),
            status,
            content_type: "text/html".to_string(),
            body: Vec::new(),
        }
    }

    /// Establece el Content-Type
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Establece el body inicial desde bytes (archivos binarios, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Agrega bytes al final del body
    pub fn append_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Agrega texto al final del body
    pub fn append_str(&mut self, text: &str) {
        self.append_body(text.as_bytes());
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Content-Type`, `Content-Length`, `Server`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "{} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nServer: {}\r\n\r\n",
            self.protocol,
            self.status,
            self.content_type,
            self.body.len(),
            SERVER_NAME,
        );

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Texto de razón de la status line ("OK", "Not Found")
    pub fn status_message(&self) -> &'static str {
        self.status.reason_phrase()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
