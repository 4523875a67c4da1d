//! Environment helpers: centralized dotenv loading and ergonomic getters.
//! Call `init_env()` once early in the binary (or rely on lazy Once).
use std::str::FromStr;
use std::sync::Once;

static INIT: Once = Once::new();

/// Load .env exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        if dotenv::dotenv().is_err() {
            // Fallback to the crate root when started from elsewhere
            let candidate = format!("{}/.env", env!("CARGO_MANIFEST_DIR"));
            let _ = dotenv::from_filename(candidate);
        }
    });
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Parsed value; unset is `Ok(None)`, set-but-invalid is an error.
pub fn env_parse_strict<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {key}={raw:?}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_helpers() {
        std::env::set_var("VGSALES_TEST_ENV_NUM", " 42 ");
        std::env::set_var("VGSALES_TEST_ENV_BAD", "forty-two");
        std::env::set_var("VGSALES_TEST_ENV_EMPTY", "  ");

        assert_eq!(env_opt("VGSALES_TEST_ENV_EMPTY"), None);

        assert_eq!(env_parse_strict::<u16>("VGSALES_TEST_ENV_NUM").unwrap(), Some(42));
        assert_eq!(env_parse_strict::<u16>("VGSALES_TEST_ENV_UNSET").unwrap(), None);
        let err = env_parse_strict::<u16>("VGSALES_TEST_ENV_BAD").unwrap_err();
        assert!(err.to_string().contains("VGSALES_TEST_ENV_BAD"));
    }
}
