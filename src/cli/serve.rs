//! Web service command (`movies serve`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use clap::Args;
use moviedb::AppContext;

/// Arguments for `movies serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,
    /// Port to listen on.
    #[arg(short = 'p', long, default_value_t = 8080)]
    pub port: u16,
}

/// Serve the catalog until interrupted.
pub async fn handle(args: ServeArgs, ctx: AppContext) -> Result<()> {
    let addr = SocketAddr::new(args.host, args.port);
    println!("Serving movie catalog on http://{}", addr);
    moviedb::serve(ctx, addr)
        .await
        .with_context(|| format!("failed to serve on {}", addr))
}
