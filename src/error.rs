//! # Errores del Servidor
//! src/error.rs
//!
//! Tipos de error de cada capa. Solo los errores del socket de escucha son
//! fatales; los de una conexión cierran únicamente esa conexión y los de
//! los colaboradores (archivos) se convierten en respuestas HTTP.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errores del socket de escucha
#[derive(Debug, Error)]
pub enum SocketError {
    /// Ninguna dirección candidata permitió crear, configurar y hacer bind
    #[error("no se pudo hacer bind al puerto {port}: {source}")]
    Bind { port: u16, source: io::Error },

    /// `listen` falló sobre el socket ya enlazado
    #[error("listen falló: {0}")]
    Listen(io::Error),

    /// Error no recuperable en `accept`; detiene el loop de aceptación
    #[error("accept falló: {0}")]
    Accept(io::Error),

    /// Se llamó a `accept` antes de `bind_and_listen`
    #[error("el socket no está escuchando")]
    NotListening,

    /// Se pidió el cierre del socket de escucha
    #[error("socket de escucha cerrado")]
    Closed,
}

/// Errores de una conexión individual
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// El cliente cerró su extremo (read devolvió 0 bytes)
    #[error("el cliente cerró la conexión")]
    PeerClosed,

    #[error("error de lectura: {0}")]
    Read(io::Error),

    #[error("error de escritura: {0}")]
    Write(io::Error),

    /// El socket aceptó menos bytes que la respuesta serializada
    #[error("escritura incompleta: {written} de {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// Errores al leer un archivo estático
///
/// El router responde 404 a cualquiera de ellos, sin distinguir.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("archivo no encontrado: {0}")]
    NotFound(String),

    /// La ruta resuelta queda fuera del directorio base
    #[error("ruta fuera del directorio base: {0}")]
    OutsideBaseDir(String),

    #[error("error leyendo {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Errores al cargar un archivo de índice
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no se pudo leer el índice {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("índice {path} inválido: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errores de arranque del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Socket(#[from] SocketError),

    #[error(transparent)]
    Index(#[from] IndexError),

    /// No se pudieron lanzar los threads del pool
    #[error("no se pudieron lanzar los workers: {0}")]
    Workers(io::Error),

    #[error("configuración inválida: {0}")]
    Config(String),
}
