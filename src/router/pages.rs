//! # Plantillas HTML
//!
//! Encabezado fijo de la página de búsqueda, pie de página y escape de
//! texto para insertarlo en HTML.

/// Encabezado con el título y el formulario de búsqueda
pub const SEARCH_HEADER: &str = "<html><head><title>search_server</title></head>\n\
<body>\n\
<center style=\"font-size:400%;\">\n\
<span style=\"color:steelblue;\">search</span><span style=\"color:darkorange;\">_server</span>\n\
</center>\n\
<p>\n\
<div style=\"height:20px;\"></div>\n\
<center>\n\
<form action=\"/query\" method=\"get\">\n\
<input type=\"text\" size=30 name=\"terms\" />\n\
<input type=\"submit\" value=\"Search\" />\n\
</form>\n\
</center><p>\n";

/// Cierra el documento abierto por `SEARCH_HEADER`
pub const SEARCH_FOOTER: &str = "</body>\n</html>\n";

/// Escapa `& < > " '` para insertar texto en HTML (contenido o atributos)
///
/// # Ejemplo
/// ```
/// use search_server::router::pages::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_chars() {
        assert_eq!(
            escape_html(r#"<script>alert('x & "y"')</script>"#),
            "&lt;script&gt;alert(&apos;x &amp; &quot;y&quot;&apos;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_html("hello world.txt"), "hello world.txt");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_header_has_search_form() {
        assert!(SEARCH_HEADER.contains("action=\"/query\""));
        assert!(SEARCH_HEADER.contains("name=\"terms\""));
    }
}
