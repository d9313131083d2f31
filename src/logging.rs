use std::io;
use std::sync::Once;

use structured_logger::json::new_writer;
use structured_logger::Builder;

static INIT: Once = Once::new();

/// Sends JSON log lines to stdout. Only the first call has any effect.
pub fn setup_logging(level: &str) {
    INIT.call_once(|| {
        Builder::with_level(level)
            .with_target_writer("*", new_writer(io::stdout()))
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_up_twice_is_harmless() {
        setup_logging("debug");
        setup_logging("info");
        log::info!(test = "logging"; "Logger is live");
    }
}
