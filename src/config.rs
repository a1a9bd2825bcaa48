//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./search_server --port 8080 \
//!   --static-dir ./static \
//!   --index ./indices/web.json,./indices/docs.json \
//!   --workers 100
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 INDEX_FILES=./indices/web.json ./search_server
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::server::AddressFamily;

/// Configuración del servidor de búsqueda
#[derive(Debug, Clone, Parser)]
#[command(name = "search_server")]
#[command(about = "Servidor HTTP/1.1 concurrente de archivos estáticos y búsquedas")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Familia de direcciones (unspecified = IPv6 dual-stack con respaldo IPv4)
    #[arg(long, value_enum, default_value = "unspecified", env = "HTTP_FAMILY")]
    pub family: AddressFamily,

    /// Directorio base servido bajo /static/
    #[arg(long = "static-dir", default_value = "./static", env = "STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Archivos JSON de índice invertido
    #[arg(long = "index", value_delimiter = ',', env = "INDEX_FILES")]
    pub index_files: Vec<PathBuf>,

    // === Workers ===
    /// Número de threads que atienden conexiones
    #[arg(long, default_value = "100", env = "WORKERS")]
    pub workers: usize,

    // === Logging ===
    /// Nivel máximo de log (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: Level,

    /// No resolver nombres DNS de los extremos de cada conexión
    #[arg(long = "no-reverse-dns", env = "NO_REVERSE_DNS")]
    pub no_reverse_dns: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.static_dir.as_os_str().is_empty() {
            return Err("Static dir must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║               search_server Configuration                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Port:         {}", self.port);
        println!("   Family:       {}", self.family);
        println!(
            "   Reverse DNS:  {}",
            if self.no_reverse_dns { "disabled" } else { "enabled" }
        );
        println!();
        println!("📁 Content:");
        println!("   Static dir:   {}", self.static_dir.display());
        if self.index_files.is_empty() {
            println!("   Indices:      (none)");
        } else {
            for index in &self.index_files {
                println!("   Index:        {}", index.display());
            }
        }
        println!();
        println!("👷 Workers:      {}", self.workers);
        println!("📝 Log level:    {}", self.log_level);
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            family: AddressFamily::Unspecified,
            static_dir: PathBuf::from("./static"),
            index_files: Vec::new(),
            workers: 100,
            log_level: Level::INFO,
            no_reverse_dns: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.family, AddressFamily::Unspecified);
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert!(config.index_files.is_empty());
        assert_eq!(config.workers, 100);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_workers() {
        let mut config = Config::default();
        config.workers = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Workers"));
    }

    #[test]
    fn test_validate_empty_static_dir() {
        let mut config = Config::default();
        config.static_dir = PathBuf::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Static dir"));
    }

    // ==================== CLI ====================

    #[test]
    fn test_parse_cli_flags() {
        let config = Config::try_parse_from([
            "search_server",
            "-p",
            "9000",
            "--family",
            "ipv4",
            "--static-dir",
            "/srv/static",
            "--index",
            "a.json,b.json",
            "--index",
            "c.json",
            "--workers",
            "8",
            "--log-level",
            "debug",
            "--no-reverse-dns",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.family, AddressFamily::Ipv4);
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(
            config.index_files,
            vec![
                PathBuf::from("a.json"),
                PathBuf::from("b.json"),
                PathBuf::from("c.json")
            ]
        );
        assert_eq!(config.workers, 8);
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(config.no_reverse_dns);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_invalid_family() {
        let result = Config::try_parse_from(["search_server", "--family", "ipx"]);
        assert!(result.is_err());
    }

    // ==================== Print Summary ====================

    #[test]
    fn test_config_print_summary() {
        let mut config = Config::default();
        config.index_files = vec![PathBuf::from("web.json")];
        // Should not panic
        config.print_summary();
    }
}
