//! # Conexión con un Cliente
//! src/http/connection.rs
//!
//! Una `Connection` es dueña exclusiva de un socket aceptado y de su buffer
//! de lectura. El buffer puede contener varios requests completos (pipelining):
//! cada llamada a `next_request` consume exactamente uno y deja el resto para
//! la siguiente llamada.
//!
//! El socket se cierra una sola vez, cuando la `Connection` se destruye.

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

use crate::error::ConnectionError;
use crate::http::{Request, Response};

/// Línea vacía que termina el bloque de headers
pub const HEADER_END: &[u8] = b"\r\n\r\n";

/// Tamaño del buffer local de cada lectura
const READ_CHUNK: usize = 2048;

/// Conexión HTTP con un cliente
pub struct Connection<S = TcpStream> {
    stream: S,

    /// Bytes recibidos que todavía no forman parte de un request consumido
    buffer: Vec<u8>,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(READ_CHUNK),
        }
    }

    /// Lee y parsea el siguiente request
    ///
    /// Bloquea hasta que el buffer contiene un bloque de headers completo.
    /// Si el cliente cierra o la lectura falla, retorna error y el llamador
    /// debe cerrar la conexión.
    pub fn next_request(&mut self) -> Result<Request, ConnectionError> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut search_from = 0;

        loop {
            if let Some(end) = find_header_end(&self.buffer, search_from) {
                let frame_len = end + HEADER_END.len();
                let request = Request::parse(&self.buffer[..frame_len]);

                // Conservar lo que venga después (siguiente request)
                self.buffer.drain(..frame_len);
                return Ok(request);
            }

            // El terminador puede quedar partido entre dos lecturas
            search_from = self.buffer.len().saturating_sub(HEADER_END.len() - 1);

            let bytes_read = match self.stream.read(&mut chunk) {
                Ok(0) => return Err(ConnectionError::PeerClosed),
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ConnectionError::Read(e)),
            };

            self.buffer.extend_from_slice(&chunk[..bytes_read]);
        }
    }

    /// Serializa y escribe la respuesta completa
    ///
    /// Si el socket deja de aceptar bytes antes de terminar, retorna
    /// `ShortWrite`; no se reintenta.
    pub fn write_response(&mut self, response: &Response) -> Result<(), ConnectionError> {
        let bytes = response.to_bytes();
        let mut written = 0;

        while written < bytes.len() {
            match self.stream.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(ConnectionError::ShortWrite {
                        written,
                        expected: bytes.len(),
                    })
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ConnectionError::Write(e)),
            }
        }

        self.stream.flush().map_err(ConnectionError::Write)
    }

    /// Bytes recibidos pendientes de consumir
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }
}

/// Busca `\r\n\r\n` a partir de `from` y retorna su posición
fn find_header_end(buffer: &[u8], from: usize) -> Option<usize> {
    buffer
        .get(from..)?
        .windows(HEADER_END.len())
        .position(|window| window == HEADER_END)
        .map(|pos| pos + from)
}
