use crate::cli::ServeArgs;
use crate::error::{CliError, Result};
use crate::server::{jobs::JobStore, routes::build_router};
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 8787;

/// Picks the listen address: an explicit `--bind`, else all interfaces on
/// `$PORT`, else all interfaces on the default port.
fn resolve_bind_addr(bind: Option<SocketAddr>, port_env: Option<&str>) -> Result<SocketAddr> {
    if let Some(addr) = bind {
        return Ok(addr);
    }
    let port = match port_env.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p
            .parse::<u16>()
            .map_err(|_| CliError::Argument(format!("Invalid PORT value: '{}'", p)))?,
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let port_env = std::env::var("PORT").ok();
    let addr = resolve_bind_addr(args.bind, port_env.as_deref())?;

    if !args.web_dir.is_dir() {
        warn!(
            "Static directory {:?} does not exist; only the API will respond.",
            &args.web_dir
        );
    }

    let app = build_router(JobStore::new(), &args.web_dir);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Docking service listening on http://{}", listener.local_addr()?);
    println!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
