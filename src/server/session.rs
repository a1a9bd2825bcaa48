//! # Sesión de una Conexión
//! src/server/session.rs
//!
//! ```text
//! AwaitingRequest ──request──▶ Routing ──▶ Responding ──┬──▶ AwaitingRequest
//!        │                                              │
//!        └──────────── error / Connection: close ───────┴──▶ Closed
//! ```
//!
//! Un worker atiende todos los requests de una conexión, en orden, hasta
//! que el cliente cierra, pide cerrar o falla una lectura/escritura.

use std::io::{Read, Write};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::socket::AcceptedConnection;
use crate::error::ConnectionError;
use crate::http::{Connection, Request, Response};
use crate::router::RequestRouter;

/// Estado de la sesión
enum SessionState {
    AwaitingRequest,
    Routing(Request),
    Responding { response: Response, close_after: bool },
    Closed(CloseReason),
}

/// Motivo por el que terminó una sesión
#[derive(Debug)]
pub enum CloseReason {
    /// El cliente envió `Connection: close`
    ClientRequested,
    /// Lectura o escritura fallida, incluido el cierre del cliente
    Connection(ConnectionError),
}

impl CloseReason {
    /// Cierre normal del lado del cliente (no amerita un warning)
    pub fn is_clean(&self) -> bool {
        matches!(
            self,
            CloseReason::ClientRequested | CloseReason::Connection(ConnectionError::PeerClosed)
        )
    }
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseReason::ClientRequested => f.write_str("cliente pidió cerrar"),
            CloseReason::Connection(e) => write!(f, "{}", e),
        }
    }
}

/// Resultado de atender una conexión completa
#[derive(Debug)]
pub struct SessionSummary {
    pub requests: usize,
    pub reason: CloseReason,
}

/// Atiende requests sobre `connection` hasta que la sesión se cierra
///
/// No cierra el socket; eso ocurre cuando el dueño destruye la conexión.
pub fn serve_connection<S: Read + Write>(
    connection: &mut Connection<S>,
    router: &RequestRouter,
) -> SessionSummary {
    let mut requests = 0;
    let mut state = SessionState::AwaitingRequest;

    loop {
        state = match state {
            SessionState::AwaitingRequest => match connection.next_request() {
                Ok(request) => SessionState::Routing(request),
                Err(e) => SessionState::Closed(CloseReason::Connection(e)),
            },
            SessionState::Routing(request) => {
                let started = Instant::now();
                let response = router.route(&request);
                debug!(
                    uri = request.uri(),
                    status = response.status().as_u16(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "Request atendido"
                );
                SessionState::Responding {
                    response,
                    close_after: request.wants_close(),
                }
            }
            SessionState::Responding {
                response,
                close_after,
            } => match connection.write_response(&response) {
                Ok(()) => {
                    requests += 1;
                    if close_after {
                        SessionState::Closed(CloseReason::ClientRequested)
                    } else {
                        SessionState::AwaitingRequest
                    }
                }
                Err(e) => SessionState::Closed(CloseReason::Connection(e)),
            },
            SessionState::Closed(reason) => return SessionSummary { requests, reason },
        };
    }
}

/// Tarea que el thread de aceptación entrega al pool por cada conexión
pub struct ConnectionJob {
    accepted: AcceptedConnection,
    router: Arc<RequestRouter>,
}

impl ConnectionJob {
    pub fn new(accepted: AcceptedConnection, router: Arc<RequestRouter>) -> Self {
        Self { accepted, router }
    }

    pub fn client_addr(&self) -> IpAddr {
        self.accepted.client_addr
    }

    /// Atiende la conexión y registra cómo terminó
    pub fn run(self) {
        let AcceptedConnection {
            stream,
            client_addr,
            client_port,
            client_dns,
            ..
        } = self.accepted;

        let mut connection = Connection::new(stream);
        let summary = serve_connection(&mut connection, &self.router);
        drop(connection);

        if summary.reason.is_clean() {
            info!(
                client = %client_addr,
                port = client_port,
                dns = %client_dns,
                requests = summary.requests,
                reason = %summary.reason,
                "Conexión cerrada"
            );
        } else {
            warn!(
                client = %client_addr,
                port = client_port,
                dns = %client_dns,
                requests = summary.requests,
                reason = %summary.reason,
                "Conexión cerrada con error"
            );
        }
    }
}
