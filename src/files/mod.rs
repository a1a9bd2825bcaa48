//! # Lectura de Archivos Estáticos
//! src/files/mod.rs
//!
//! El router no lee el disco directamente: usa un `FileSource`. La
//! implementación por defecto, `FileReader`, garantiza que nunca se sirve
//! un archivo fuera del directorio base (`../`, rutas absolutas o symlinks
//! que escapan).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::FileError;

/// Fuente de archivos estáticos
///
/// Las implementaciones se comparten entre todos los workers.
pub trait FileSource: Send + Sync {
    /// Lee `relative` dentro de `base_dir`
    ///
    /// Debe retornar error (nunca el contenido) si la ruta resuelta queda
    /// fuera de `base_dir`.
    fn read_file(&self, base_dir: &Path, relative: &str) -> Result<Vec<u8>, FileError>;
}

/// Lector de archivos sobre el sistema de archivos local
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl FileSource for FileReader {
    fn read_file(&self, base_dir: &Path, relative: &str) -> Result<Vec<u8>, FileError> {
        let base = base_dir
            .canonicalize()
            .map_err(|_| FileError::NotFound(relative.to_string()))?;

        let requested = base.join(relative);
        let resolved = match requested.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FileError::NotFound(relative.to_string()))
            }
            Err(e) => {
                return Err(FileError::Io {
                    path: requested,
                    source: e,
                })
            }
        };

        // Comparación por componentes: "/srv/www2" no está dentro de "/srv/www"
        if !resolved.starts_with(&base) {
            return Err(FileError::OutsideBaseDir(relative.to_string()));
        }

        if !resolved.is_file() {
            return Err(FileError::NotFound(relative.to_string()));
        }

        fs::read(&resolved).map_err(|e| FileError::Io {
            path: resolved,
            source: e,
        })
    }
}
