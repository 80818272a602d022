use thiserror::Error;
use tracing_core::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug)]
pub struct TracingConfig {
    pub package: &'static str,
    pub version: &'static str,
    /// Used when `RUST_LOG` is unset or unparsable.
    #[builder(default = LevelFilter::INFO)]
    pub default_level: LevelFilter,
    /// Log lines go to stderr so command output on stdout stays clean.
    #[builder(default = true)]
    pub stderr: bool,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

fn env_filter(default_level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

pub fn setup(config: TracingConfig) -> Result<(), Error> {
    let filter = env_filter(config.default_level);
    let registry = tracing_subscriber::registry().with(filter);
    if config.stderr {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    ::tracing::debug!(package = config.package, version = config.version, "Tracing initialized");
    Ok(())
}
