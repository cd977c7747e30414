//! Logger bootstrap. stdout carries IPC frames, so all diagnostics go to
//! stderr; the host shell decides where that ends up.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

// Keeps the handle alive for the life of the process; dropping it would shut
// the logger down.
static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

const LOG_SPEC_ENV: &str = "ROSTERD_LOG";

/// Initializes stderr logging once. Never fails the daemon: a broken log
/// spec just means running without logs.
pub fn init() {
    if LOGGER.get().is_some() {
        return;
    }
    let spec = std::env::var(LOG_SPEC_ENV).unwrap_or_else(|_| "info".to_string());
    match Logger::try_with_str(&spec).map(|l| l.log_to_stderr().start()) {
        Ok(Ok(handle)) => {
            let _ = LOGGER.set(handle);
        }
        Ok(Err(e)) => eprintln!("rosterd: logging disabled: {e}"),
        Err(e) => eprintln!("rosterd: invalid {LOG_SPEC_ENV} value `{spec}`: {e}"),
    }
}
