//! Application startup state

use std::net::SocketAddr;

use campus_core::{CampusConfig, CampusService, Error, Result};
use tracing::{info, warn};

/// Resolved configuration and the service it opened
pub struct AppState {
    pub config: CampusConfig,
    pub bind: SocketAddr,
    pub service: CampusService,
}

impl AppState {
    pub fn new(config: CampusConfig) -> Result<Self> {
        let bind = config.server.bind.parse::<SocketAddr>().map_err(|e| {
            Error::Config(format!(
                "invalid bind address '{}': {}",
                config.server.bind, e
            ))
        })?;

        let mut service = config.open_service()?;
        audit_on_startup(&mut service)?;

        Ok(Self {
            config,
            bind,
            service,
        })
    }
}

/// Seed the collections and report any inconsistency left by earlier runs
fn audit_on_startup(service: &mut CampusService) -> Result<()> {
    let violations = service.check_consistency()?;
    if violations.is_empty() {
        info!("Collections consistent");
    } else {
        warn!(count = violations.len(), "Collections inconsistent at startup");
    }
    Ok(())
}
