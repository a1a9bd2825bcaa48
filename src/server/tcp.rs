//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! El loop de aceptación corre en el thread que llama a `run`: acepta cada
//! conexión y la entrega al pool de workers como un `ConnectionJob`. Nunca
//! lee ni escribe sobre un socket de cliente.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use super::pool::WorkerPool;
use super::session::ConnectionJob;
use super::socket::{ListeningSocket, ShutdownHandle};
use crate::config::Config;
use crate::error::{ServerError, SocketError};
use crate::router::RequestRouter;

/// Servidor HTTP/1.1 con pool de workers
pub struct Server {
    config: Config,
    router: Arc<RequestRouter>,
    socket: ListeningSocket,
}

impl Server {
    pub fn new(config: Config, router: RequestRouter) -> Self {
        let socket = ListeningSocket::new(config.port).with_reverse_dns(!config.no_reverse_dns);

        Self {
            config,
            router: Arc::new(router),
            socket,
        }
    }

    /// Abre el socket de escucha; retorna la dirección efectiva
    pub fn bind(&mut self) -> Result<SocketAddr, ServerError> {
        Ok(self.socket.bind_and_listen(self.config.family)?)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr()
    }

    /// Handle para detener `run` desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.socket.shutdown_handle()
    }

    /// Acepta conexiones hasta que se pide el cierre o `accept` falla
    ///
    /// Hace bind si todavía no se hizo. Las conexiones en curso no se
    /// esperan: los workers terminan lo pendiente por su cuenta.
    pub fn run(&mut self) -> Result<(), ServerError> {
        if self.socket.local_addr().is_none() {
            self.bind()?;
        }

        let pool = WorkerPool::new(self.config.workers).map_err(ServerError::Workers)?;
        info!(workers = pool.size(), "Servidor aceptando conexiones");

        loop {
            match self.socket.accept() {
                Ok(accepted) => {
                    info!(
                        client = %accepted.client_addr,
                        port = accepted.client_port,
                        dns = %accepted.client_dns,
                        server = %accepted.server_addr,
                        "Nueva conexión"
                    );

                    let job = ConnectionJob::new(accepted, Arc::clone(&self.router));
                    pool.dispatch(move || job.run());
                }
                Err(SocketError::Closed) => {
                    info!("Cierre solicitado, deteniendo el loop de aceptación");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Accept falló, deteniendo el servidor");
                    break;
                }
            }
        }

        self.socket.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileReader;
    use crate::search::IndexSet;
    use crate::server::AddressFamily;
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::thread;

    fn test_server() -> Server {
        let mut config = Config::default();
        config.port = 0;
        config.family = AddressFamily::Ipv4;
        config.workers = 2;
        config.no_reverse_dns = true;

        let router = RequestRouter::new(
            std::env::temp_dir(),
            Arc::new(FileReader),
            Arc::new(IndexSet::default()),
        );
        Server::new(config, router)
    }

    #[test]
    fn test_bind_reports_ephemeral_port() {
        let mut server = test_server();
        assert!(server.local_addr().is_none());

        let addr = server.bind().unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(server.local_addr(), Some(addr));
    }

    #[test]
    fn test_run_serves_then_shuts_down() {
        let mut server = test_server();
        let port = server.bind().unwrap().port();
        let handle = server.shutdown_handle();

        let runner = thread::spawn(move || server.run());

        let mut client = TcpStream::connect(("127.0.0.1", port)).unwrap();
        client
            .write_all(b"GET / HTTP/1.1\r\nConnection: close\r\n\r\n")
            .unwrap();
        let mut text = String::new();
        client.read_to_string(&mut text).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));

        handle.shutdown();
        assert!(runner.join().unwrap().is_ok());
    }
}
