//! # Search Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente que sirve archivos estáticos y responde
//! búsquedas sobre índices invertidos. Un thread acepta conexiones y un
//! pool fijo de workers las atiende, cada una con sus requests en orden
//! (keep-alive y pipelining).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests, framing por conexión y serialización de respuestas
//! - `server`: Socket de escucha, loop de aceptación, pool de workers y sesiones
//! - `router`: Despacho entre archivos estáticos y búsquedas, y páginas HTML
//! - `files`: Lectura de archivos restringida al directorio base
//! - `search`: Índices invertidos y ranking de resultados
//! - `config`: Configuración por CLI y variables de entorno
//! - `error`: Tipos de error de cada capa
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use std::sync::Arc;
//! use search_server::config::Config;
//! use search_server::files::FileReader;
//! use search_server::router::RequestRouter;
//! use search_server::search::IndexSet;
//! use search_server::server::Server;
//!
//! let config = Config::default();
//! let index = IndexSet::load(&config.index_files).expect("índices inválidos");
//! let router = RequestRouter::new(config.static_dir.clone(), Arc::new(FileReader), Arc::new(index));
//!
//! let mut server = Server::new(config, router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod router;
pub mod search;
pub mod server;
