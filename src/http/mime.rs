//! # Tipos MIME
//!
//! Inferencia del `Content-Type` a partir de la extensión del archivo.
//! La comparación no distingue mayúsculas y las extensiones desconocidas
//! se sirven como `text/plain`.

use std::path::Path;

/// Content-Type para extensiones que no están en la tabla
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Tabla extensión → tipo MIME
const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("txt", "text/plain"),
    ("js", "text/javascript"),
    ("css", "text/css"),
    ("xml", "application/xml"),
    ("json", "application/json"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("pdf", "application/pdf"),
];

/// Devuelve el Content-Type para un nombre de archivo
///
/// # Ejemplo
/// ```
/// use search_server::http::mime::content_type_for;
///
/// assert_eq!(content_type_for("index.HTML"), "text/html");
/// assert_eq!(content_type_for("data.bin"), "text/plain");
/// ```
pub fn content_type_for(file_name: &str) -> &'static str {
    let Some(extension) = Path::new(file_name).extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    MIME_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("index.htm"), "text/html");
        assert_eq!(content_type_for("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("dir/sub/logo.png"), "image/png");
        assert_eq!(content_type_for("app.js"), "text/javascript");
        assert_eq!(content_type_for("style.css"), "text/css");
        assert_eq!(content_type_for("feed.xml"), "application/xml");
        assert_eq!(content_type_for("anim.gif"), "image/gif");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(content_type_for("PHOTO.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("Readme.Txt"), "text/plain");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type_for("archive.tar.zst"), "text/plain");
        assert_eq!(content_type_for("Makefile"), "text/plain");
        assert_eq!(content_type_for(""), "text/plain");
    }
}
