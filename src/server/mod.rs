use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Mutex;

use tracing::{info, warn};

use crate::catalog::{CatalogResolver, CatalogSource};
use crate::roster::ProfileSnapshot;

pub mod api;
pub mod routes;

/// Snapshot computed once at startup; the resolver is only used for lazy pair
/// and portrait lookups on the detail route.
pub struct AppState<S> {
    pub snapshot: ProfileSnapshot,
    pub resolver: Mutex<CatalogResolver<S>>,
}

pub fn run_server<S: CatalogSource>(bind_addr: &str, state: &AppState<S>) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    info!("runeview server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, state) {
                    warn!("request error: {err}");
                }
            }
            Err(err) => warn!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection<S: CatalogSource>(
    stream: &mut TcpStream,
    state: &AppState<S>,
) -> std::io::Result<()> {
    let mut buffer = [0_u8; 8_192];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(state, method, path);
    info!(method, path, status = response.status_code, "request");
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}
