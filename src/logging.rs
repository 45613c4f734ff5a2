use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `verbose` overrides the configured
/// filter with `debug`. Calling this twice is harmless.
pub fn init(filter: &str, verbose: bool) {
  let filter = if verbose { "debug" } else { filter };
  let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}
