use std::fs::File;
use std::sync::Mutex;

use bs_core::BlockSeqError;
use tracing_subscriber::EnvFilter;

use crate::map_cli_log_file;

pub(crate) const LOG_ENV: &str = "BLOCKSEQ_LOG";
const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogTarget {
    Stderr,
    File(String),
    // The full-screen board without --log-file; stderr would tear the screen.
    Off,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub(crate) fn init_logging(target: LogTarget) -> Result<(), BlockSeqError> {
    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = File::create(&path).map_err(map_cli_log_file)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
    Ok(())
}
