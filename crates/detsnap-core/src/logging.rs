//! Logging setup for the detsnap binaries.

/// Initialize env_logger with a level derived from CLI verbosity flags.
///
/// Default level is `info`; `--verbose` lowers it to `debug`, `--quiet`
/// raises it to `warn` (verbose wins if both are given). `RUST_LOG`
/// overrides the derived default entirely.
pub fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}
