//! TCP server exposing the data access layer
//!
//! Each connection is served by its own task. Requests from all
//! connections are applied one at a time through a single service lock, so
//! two clients racing for the last seat cannot both succeed.

use std::net::SocketAddr;
use std::sync::Arc;

use campus_core::CampusService;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::frame::{read_frame, write_frame};
use crate::handler::dispatch;
use crate::protocol::Request;

/// Campus server handle
pub struct Server {
    addr: SocketAddr,
    service: Arc<Mutex<CampusService>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Server {
    /// Bind `addr` and start accepting connections
    pub async fn start(addr: SocketAddr, service: CampusService) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let bound_addr = listener.local_addr()?;

        info!(addr = %bound_addr, "Server started");

        let (shutdown_tx, _) = broadcast::channel(1);
        let service = Arc::new(Mutex::new(service));

        tokio::spawn(accept_loop(
            listener,
            service.clone(),
            shutdown_tx.clone(),
        ));

        Ok(Server {
            addr: bound_addr,
            service,
            shutdown_tx,
        })
    }

    /// Get the server's bound address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared handle to the service, for in-process callers
    pub fn service(&self) -> Arc<Mutex<CampusService>> {
        self.service.clone()
    }

    /// Stop accepting connections and close open ones
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
        info!("Server shutdown initiated");
    }
}

/// Accept incoming connections
async fn accept_loop(
    listener: TcpListener,
    service: Arc<Mutex<CampusService>>,
    shutdown_tx: broadcast::Sender<()>,
) {
    let mut shutdown_rx = shutdown_tx.subscribe();
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        debug!(addr = %addr, "New connection");
                        tokio::spawn(handle_connection(
                            stream,
                            addr,
                            service.clone(),
                            shutdown_tx.subscribe(),
                        ));
                    }
                    Err(e) => {
                        error!(error = %e, "Accept failed");
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Accept loop shutting down");
                break;
            }
        }
    }
}

/// Serve requests from one client until it disconnects
async fn handle_connection(
    mut stream: TcpStream,
    addr: SocketAddr,
    service: Arc<Mutex<CampusService>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        let request: Request = tokio::select! {
            result = read_frame::<_, Request>(&mut stream) => {
                match result {
                    Ok(request) => request,
                    Err(Error::ConnectionClosed) => {
                        debug!(addr = %addr, "Connection closed");
                        break;
                    }
                    Err(e) => {
                        warn!(addr = %addr, error = %e, "Read error");
                        break;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                debug!(addr = %addr, "Closing connection for shutdown");
                break;
            }
        };

        let response = {
            let mut service = service.lock().await;
            dispatch(&mut service, request)
        };

        if let Err(e) = write_frame(&mut stream, &response).await {
            debug!(addr = %addr, error = %e, "Write failed");
            break;
        }
    }
}
