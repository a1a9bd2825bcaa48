//! # Módulo HTTP
//!
//! Implementa la parte del protocolo HTTP/1.1 que necesita el servidor:
//!
//! - Framing de requests sobre un stream de bytes (`connection`)
//! - Parsing del bloque de headers (`request`)
//! - Construcción y serialización de respuestas (`response`, `status`)
//! - Inferencia de Content-Type (`mime`)
//!
//! Solo se modelan requests tipo GET: request line más headers, sin body.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! Varios requests pueden llegar seguidos en la misma lectura; la conexión
//! los entrega uno por uno, en orden.

pub mod connection;
pub mod mime;
pub mod request;
pub mod response;
pub mod status;

pub use connection::Connection;
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
