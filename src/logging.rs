use color_eyre::eyre::{Result, eyre};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `-v` count → default level. Warnings always show.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber writing to stderr. `RUST_LOG` overrides the
/// level picked from `verbose`.
pub fn init_tracing(verbose: u8, json: bool) -> Result<()> {
    let default_level = level_for_verbosity(verbose);
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}
