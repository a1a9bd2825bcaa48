//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (`socket`)
//! 2. Acepta conexiones entrantes y las encola (`tcp`)
//! 3. Reparte las conexiones entre un número fijo de workers (`pool`)
//! 4. Atiende en cada worker todos los requests de su conexión (`session`)

pub mod pool;
pub mod session;
pub mod socket;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use pool::WorkerPool;
pub use session::{serve_connection, CloseReason, ConnectionJob, SessionSummary};
pub use socket::{AcceptedConnection, AddressFamily, ListeningSocket, ShutdownHandle};
pub use tcp::Server;
