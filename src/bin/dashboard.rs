// Video game sales dashboard server
// Loads the CSV once, renders the static plots, then serves the pages.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vgsales_dashboard::api::DashboardServer;
use vgsales_dashboard::config::DashboardConfig;
use vgsales_dashboard::logging;
use vgsales_dashboard::util::env as env_util;

#[derive(Parser, Debug)]
#[command(name = "dashboard", version, about = "Video game sales dashboard")]
struct Args {
    /// Sales CSV (overrides VGSALES_CSV)
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Bind host (overrides DASHBOARD_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Bind port (overrides DASHBOARD_PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Static asset directory served under /static (overrides STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Where the startup PNGs are written (overrides PLOTS_DIR)
    #[arg(long)]
    plots_dir: Option<PathBuf>,
    /// actix worker threads (overrides DASHBOARD_WORKERS)
    #[arg(long)]
    workers: Option<usize>,
}

impl Args {
    fn apply(self, config: &mut DashboardConfig) {
        if let Some(csv) = self.csv {
            config.csv_path = csv;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if self.plots_dir.is_some() {
            config.plots_dir = self.plots_dir;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_util::init_env();
    logging::init_tracing(logging::DEFAULT_FILTER)?;

    let args = Args::parse();
    let mut config = DashboardConfig::from_env()?;
    args.apply(&mut config);
    tracing::info!(csv = %config.csv_path.display(), "Initializing vgsales dashboard");

    let server = DashboardServer::new(config);
    let dashboard = server.prepare().await?;
    server.run(dashboard).await?;

    Ok(())
}
