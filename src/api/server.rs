// Dashboard HTTP server using actix-web

use crate::api::{middleware, routes};
use crate::chart::images;
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::pages::Dashboard;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::path::Path;

/// Load the dataset, write the static chart images and assemble every page.
///
/// Blocking; run it off the async executor. Any error here means the process
/// should not start.
pub fn prepare_dashboard(csv_path: &Path, plots_dir: &Path) -> Result<Dashboard> {
    let dataset = Dataset::from_path(csv_path)?;
    images::render_static_images(&dataset, plots_dir)?;
    Ok(Dashboard::build(&dataset))
}

pub struct DashboardServer {
    config: DashboardConfig,
}

impl DashboardServer {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Run [`prepare_dashboard`] on the blocking pool.
    pub async fn prepare(&self) -> Result<Dashboard> {
        let csv_path = self.config.csv_path.clone();
        let plots_dir = self.config.plots_dir();
        tokio::task::spawn_blocking(move || prepare_dashboard(&csv_path, &plots_dir))
            .await
            .context("dashboard startup task panicked")?
    }

    /// Start the HTTP server
    pub async fn run(self, dashboard: Dashboard) -> Result<()> {
        let bind_addr = self.config.bind_addr();

        tracing::info!(
            bind = %bind_addr,
            records = dashboard.records(),
            static_dir = %self.config.static_dir.display(),
            "Starting vgsales dashboard"
        );

        let dashboard = web::Data::new(dashboard);
        let static_dir = self.config.static_dir.clone();
        let plots_dir = self.config.plots_dir();

        let mut server = HttpServer::new(move || {
            let (logger, compress, normalize) = middleware::setup_middleware();

            App::new()
                .app_data(dashboard.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(normalize)
                .configure(routes::configure_routes)
                .configure(|cfg| routes::configure_static(cfg, &static_dir, &plots_dir))
        });
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        server
            .bind(&bind_addr)
            .with_context(|| format!("Failed to bind to {}", bind_addr))?
            .run()
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
