//! # Socket de Escucha
//! src/server/socket.rs
//!
//! Crea el socket TCP de escucha sobre la dirección comodín del puerto y
//! acepta conexiones. Con familia `Unspecified` intenta primero IPv6
//! dual-stack (acepta también clientes IPv4) y, si falla, IPv4.
//!
//! Cada paso (socket, SO_REUSEADDR, bind, listen) es una llamada separada
//! para poder distinguir un error de bind de uno de listen.

use std::io::{self, ErrorKind};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tracing::{info, warn};

use crate::error::SocketError;

/// Largo de la cola de conexiones pendientes del kernel
const LISTEN_BACKLOG: i32 = 1024;

/// Tiempo máximo para la conexión que despierta a `accept` al cerrar
const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Familia de direcciones pedida para el bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AddressFamily {
    /// IPv6 dual-stack con respaldo en IPv4
    Unspecified,
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Familias a probar, en orden
    fn candidates(self) -> &'static [AddressFamily] {
        match self {
            AddressFamily::Unspecified => &[AddressFamily::Ipv6, AddressFamily::Ipv4],
            AddressFamily::Ipv4 => &[AddressFamily::Ipv4],
            AddressFamily::Ipv6 => &[AddressFamily::Ipv6],
        }
    }
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AddressFamily::Unspecified => "unspecified",
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        };
        f.write_str(name)
    }
}

/// Conexión recién aceptada junto con los datos de ambos extremos
#[derive(Debug)]
pub struct AcceptedConnection {
    /// Socket del cliente; quien lo posea lo cierra al destruirlo
    pub stream: TcpStream,
    pub client_addr: IpAddr,
    pub client_port: u16,
    /// Nombre DNS del cliente, o su IP si no hay DNS inverso
    pub client_dns: String,
    pub server_addr: IpAddr,
    pub server_dns: String,
}

/// Permite cerrar el socket de escucha desde otro thread
///
/// Marca el socket como cerrado y se conecta a él para que el `accept`
/// bloqueado retorne y vea la marca.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    closed: Arc<AtomicBool>,
    local_addr: Arc<OnceLock<SocketAddr>>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(addr) = self.local_addr.get() {
            for ip in [IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)] {
                let wake = SocketAddr::new(ip, addr.port());
                if TcpStream::connect_timeout(&wake, WAKE_TIMEOUT).is_ok() {
                    break;
                }
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Socket de escucha del servidor
pub struct ListeningSocket {
    port: u16,
    listener: Option<TcpListener>,
    /// Familia con la que se logró el bind
    family: Option<AddressFamily>,
    resolve_names: bool,
    closed: Arc<AtomicBool>,
    local_addr: Arc<OnceLock<SocketAddr>>,
}

impl ListeningSocket {
    /// Crea el socket para `port` (0 = puerto efímero); todavía no hace bind
    pub fn new(port: u16) -> Self {
        Self {
            port,
            listener: None,
            family: None,
            resolve_names: true,
            closed: Arc::new(AtomicBool::new(false)),
            local_addr: Arc::new(OnceLock::new()),
        }
    }

    /// Activa o desactiva el DNS inverso de los extremos al aceptar
    pub fn with_reverse_dns(mut self, enabled: bool) -> Self {
        self.resolve_names = enabled;
        self
    }

    /// Hace bind y listen sobre la dirección comodín
    ///
    /// Retorna la dirección local efectiva (útil con el puerto 0).
    pub fn bind_and_listen(&mut self, requested: AddressFamily) -> Result<SocketAddr, SocketError> {
        let mut last_error = None;
        let mut bound = None;

        for &family in requested.candidates() {
            match bind_wildcard(family, self.port) {
                Ok(socket) => {
                    bound = Some((family, socket));
                    break;
                }
                Err(e) => {
                    warn!(family = %family, port = self.port, error = %e, "Bind falló");
                    last_error = Some(e);
                }
            }
        }

        let Some((family, socket)) = bound else {
            return Err(SocketError::Bind {
                port: self.port,
                source: last_error
                    .unwrap_or_else(|| io::Error::new(ErrorKind::AddrNotAvailable, "sin candidatos")),
            });
        };

        // Si listen falla, `socket` se cierra al salir
        socket.listen(LISTEN_BACKLOG).map_err(SocketError::Listen)?;

        let listener: TcpListener = socket.into();
        let local_addr = listener.local_addr().map_err(SocketError::Listen)?;

        info!(family = %family, addr = %local_addr, "Socket escuchando");

        let _ = self.local_addr.set(local_addr);
        self.family = Some(family);
        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Bloquea hasta que llega un cliente
    ///
    /// Reintenta ante interrupciones. Cualquier otro error, o un cierre
    /// pedido con `ShutdownHandle`, significa que el loop de aceptación termina.
    pub fn accept(&self) -> Result<AcceptedConnection, SocketError> {
        let listener = self.listener.as_ref().ok_or(SocketError::NotListening)?;

        let (stream, peer) = loop {
            match listener.accept() {
                Ok(pair) => break pair,
                Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) => {
                    continue
                }
                Err(_) if self.is_closed() => return Err(SocketError::Closed),
                Err(e) => return Err(SocketError::Accept(e)),
            }
        };

        // La conexión que despierta al accept se descarta aquí mismo
        if self.is_closed() {
            return Err(SocketError::Closed);
        }

        let local = stream.local_addr().map_err(SocketError::Accept)?;

        let client_addr = peer.ip().to_canonical();
        let server_addr = local.ip().to_canonical();

        Ok(AcceptedConnection {
            client_dns: self.dns_name(client_addr),
            client_addr,
            client_port: peer.port(),
            server_dns: self.dns_name(server_addr),
            server_addr,
            stream,
        })
    }

    /// Nombre DNS de una IP o, si no hay, la IP en texto
    fn dns_name(&self, ip: IpAddr) -> String {
        if !self.resolve_names {
            return ip.to_string();
        }
        dns_lookup::lookup_addr(&ip).unwrap_or_else(|_| ip.to_string())
    }

    /// Handle para cerrar el socket desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            closed: Arc::clone(&self.closed),
            local_addr: Arc::clone(&self.local_addr),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Libera el socket de escucha
    pub fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        self.listener = None;
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn family(&self) -> Option<AddressFamily> {
        self.family
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }
}

/// Crea un socket TCP con SO_REUSEADDR y lo enlaza a la dirección comodín
fn bind_wildcard(family: AddressFamily, port: u16) -> io::Result<Socket> {
    let (domain, addr) = match family {
        AddressFamily::Ipv4 => (
            Domain::IPV4,
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
        ),
        AddressFamily::Ipv6 | AddressFamily::Unspecified => (
            Domain::IPV6,
            SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port),
        ),
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if domain == Domain::IPV6 {
        // Dual-stack: clientes IPv4 llegan como ::ffff:a.b.c.d
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    Ok(socket)
}
