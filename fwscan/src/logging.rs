//! Leveled logging on stderr, kept strictly separate from the match-report
//! stream on stdout so redirecting stdout to a file captures only matches.
//! Grounded on this workspace's test-helper logging setup, generalised to a
//! real log level and always-on target display.

use log::LevelFilter;

/// Configures the global logger. `verbose` selects `Debug` over the
/// default `Info`; match/string-search lines never go through this
/// logger, only diagnostics (warnings, the scan-start/termination lines).
pub fn init(verbose: bool) {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:5}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(log_level)
        .chain(std::io::stderr())
        .apply()
        .expect("logging already initialized");
}
