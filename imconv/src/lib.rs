pub mod config;
pub mod diagnostics;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, Args};
pub use pipeline::{ConversionReport, run};

/// Install the stderr fmt subscriber. `RUST_LOG` wins, `info` otherwise.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load .env from multiple candidate paths, returning the one that loaded.
///
/// Runs before [`init_tracing`] so `RUST_LOG` from the file takes effect.
pub fn load_dotenv() -> Option<&'static str> {
    load_dotenv_from([".env", "../.env"])
}

fn load_dotenv_from<P>(candidates: impl IntoIterator<Item = P>) -> Option<P>
where
    P: AsRef<std::path::Path>,
{
    candidates
        .into_iter()
        .find(|path| dotenvy::from_path(path).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_dotenv_takes_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.env");
        let present = dir.path().join(".env");
        std::fs::write(&present, "IMCONV_DOTENV_CHECK=loaded\n").unwrap();

        let loaded = load_dotenv_from([missing, present.clone()]);

        assert_eq!(loaded, Some(present));
        assert_eq!(std::env::var("IMCONV_DOTENV_CHECK").unwrap(), "loaded");
    }

    #[test]
    fn test_load_dotenv_none_when_nothing_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_dotenv_from([dir.path().join(".env")]), None);
    }
}
