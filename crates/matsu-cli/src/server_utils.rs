use axum::{body::Body, http::Uri, response::Response};
use colored::Colorize;
use local_ip_address::local_ip;
use std::{
    io,
    net::{IpAddr, SocketAddr},
    time::{Duration, Instant},
};
use tokio::net::TcpSocket;
use tower_http::trace::OnResponse;
use tracing::{Span, debug, info};

use crate::logging::{FormatElapsedTimeOptions, format_elapsed_time};

pub fn log_server_start(start_time: Instant, host: bool, addr: SocketAddr, base: Option<&str>) {
    info!(name: "SKIP_FORMAT", "");
    let elapsed_time = format_elapsed_time(
        start_time.elapsed(),
        &FormatElapsedTimeOptions::server_start(),
    );
    info!(name: "SKIP_FORMAT", "{} {}", "matsu".bold().bright_magenta(), format!("preview server started in {}", elapsed_time));
    info!(name: "SKIP_FORMAT", "");

    let port = addr.port();
    let path = base.unwrap_or("");
    let url = format!("http://localhost:{port}{path}/").bold().underline().bright_blue();
    let network_url = match (host, local_ip()) {
        (true, Ok(local_ip)) => format!("http://{local_ip}:{port}{path}/")
            .bold()
            .underline()
            .bright_magenta(),
        (true, Err(_)) => "Could not determine the local network address".dimmed(),
        (false, _) => "Use --host to expose the server to your network".dimmed(),
    };
    info!(name: "SKIP_FORMAT", "  {}    {}", "Local".bold(), url);
    info!(name: "SKIP_FORMAT", "  {}  {}", "Network".bold(), network_url);
    info!(name: "SKIP_FORMAT", "");

    info!(name: "server", "{}", "waiting for requests...".dimmed());
}

#[derive(Clone, Debug)]
pub struct CustomOnResponse;

impl OnResponse<Body> for CustomOnResponse {
    fn on_response(self, response: &Response<Body>, latency: Duration, _span: &Span) {
        let status = response.status();

        if status.is_informational() {
            return;
        }

        let status = if status.is_server_error() {
            status.to_string().red()
        } else if status.is_client_error() {
            status.to_string().yellow()
        } else {
            status.to_string().green()
        };

        let uri = response
            .extensions()
            .get::<Uri>()
            .map(|uri| uri.to_string())
            .unwrap_or_default()
            .bold();

        let latency = format_elapsed_time(latency, &FormatElapsedTimeOptions::default());

        info!(name: "", "{} {} {}", status, uri, latency);
    }
}

/// Finds the first port from `starting_port` upwards that can be bound on `address`.
pub fn find_open_port(address: &IpAddr, starting_port: u16) -> io::Result<u16> {
    for port in starting_port..=u16::MAX {
        let socket = TcpSocket::new_v4()?;
        match socket.bind(SocketAddr::new(*address, port)) {
            Ok(_) => {
                debug!(name: "server", "Found open port: {}", port);
                return Ok(port);
            }
            Err(_) => {
                debug!(name: "server", "Port {} is already in use or failed to bind, trying next one", port);
            }
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AddrInUse,
        format!("no open port found from {}", starting_port),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_open_port_skips_used_ports() {
        let address = IpAddr::from([127, 0, 0, 1]);
        let taken = tokio::net::TcpListener::bind(SocketAddr::new(address, 0))
            .await
            .unwrap();
        let taken_port = taken.local_addr().unwrap().port();

        let port = find_open_port(&address, taken_port).unwrap();

        assert_ne!(port, taken_port);
        assert!(port > taken_port);
    }
}
