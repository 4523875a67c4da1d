use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Filter used when `RUST_LOG` is unset: our own spans plus the actix access log.
pub const DEFAULT_FILTER: &str = "info,vgsales_dashboard=info,actix_web=info";

fn filter_or(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the global compact fmt subscriber.
///
/// `default_filter` applies only when `RUST_LOG` is not set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    SubscriberBuilder::default()
        .with_env_filter(filter_or(default_filter))
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
