// # dm-resolverd - Endpoint Watch Daemon
//
// A thin integration layer over dm-resolver. All resolution, diffing and
// watching lives in the library; this binary only:
// 1. Reads configuration from environment variables
// 2. Initializes logging and the runtime
// 3. Starts a resolver with a logging sink and change listener
// 4. Shuts it down on SIGINT/SIGTERM
//
// ## Configuration
//
// - `DMR_ADDRESS`: IP literal or hostname to resolve (required)
// - `DMR_PORT`: Port appended to every endpoint (required)
// - `DMR_WATCH`: Refresh periodically (true/false, default true)
// - `DMR_REFRESH_INTERVAL_SECS`: Refresh interval in seconds (default 30)
// - `DMR_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export DMR_ADDRESS=svc.internal
// export DMR_PORT=443
// export DMR_REFRESH_INTERVAL_SECS=10
//
// dm-resolverd
// ```

use anyhow::Result;
use dm_resolver::config::MAX_INTERVAL_SECS;
use dm_resolver::{DomainResolver, EndpointSet, ResolverConfig};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Daemon configuration
struct Config {
    address: String,
    port: String,
    watch: bool,
    refresh_interval_secs: u64,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let watch = match env::var("DMR_WATCH") {
            Ok(value) => parse_bool("DMR_WATCH", &value)?,
            Err(_) => true,
        };

        let refresh_interval_secs = match env::var("DMR_REFRESH_INTERVAL_SECS") {
            Ok(value) => value.trim().parse().map_err(|_| {
                anyhow::anyhow!("DMR_REFRESH_INTERVAL_SECS must be a number. Got: {}", value)
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            address: env::var("DMR_ADDRESS").map_err(|_| {
                anyhow::anyhow!("DMR_ADDRESS is required. Set it via: export DMR_ADDRESS=svc.internal")
            })?,
            port: env::var("DMR_PORT").map_err(|_| {
                anyhow::anyhow!("DMR_PORT is required. Set it via: export DMR_PORT=443")
            })?,
            watch,
            refresh_interval_secs,
            log_level: env::var("DMR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.port.trim().parse::<u16>().is_err() {
            anyhow::bail!("DMR_PORT must be a port number (0-65535). Got: {}", self.port);
        }

        if self.watch && !(1..=MAX_INTERVAL_SECS).contains(&self.refresh_interval_secs) {
            anyhow::bail!(
                "DMR_REFRESH_INTERVAL_SECS must be between 1 and {} seconds. Got: {}",
                MAX_INTERVAL_SECS,
                self.refresh_interval_secs
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DMR_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.resolver_config().validate()?;
        Ok(())
    }

    /// Library configuration for this daemon configuration
    fn resolver_config(&self) -> ResolverConfig {
        let config = ResolverConfig::new(self.address.trim(), self.port.trim());
        if self.watch {
            config.with_watch(Duration::from_secs(self.refresh_interval_secs))
        } else {
            config.without_watch()
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{} must be true or false. Got: {}", name, value),
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return DaemonExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DaemonExitCode::ConfigError.into();
    }

    info!("Starting dm-resolverd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DaemonExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {}", e);
            DaemonExitCode::RuntimeError
        } else {
            DaemonExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let sink = Arc::new(|endpoints: &EndpointSet| {
        info!("Publishing {} endpoint(s): {}", endpoints.len(), endpoints);
    });
    let (change_tx, mut change_rx) = mpsc::channel(16);

    let mut resolver = DomainResolver::with_system_lookup(config.resolver_config())?
        .with_sink(sink)
        .with_change_listener(change_tx);

    resolver.start().await?;

    if !resolver.needs_lookup() {
        info!("{} is an IP literal, nothing to watch", config.address);
    } else if resolver.is_watching() {
        info!(
            "Watching {} every {}s",
            config.address, config.refresh_interval_secs
        );
    }

    let received = tokio::select! {
        received = wait_for_shutdown() => received?,
        _ = count_changes(&mut change_rx) => {
            warn!("Change listener closed");
            wait_for_shutdown().await?
        }
    };

    info!("Received shutdown signal: {}", received);
    resolver.shutdown().await;
    info!("Final endpoints: {}", resolver.current_endpoints());

    Ok(())
}

/// Drain change signals, logging a running count
async fn count_changes(change_rx: &mut mpsc::Receiver<()>) {
    let mut changes: u64 = 0;
    while change_rx.recv().await.is_some() {
        changes += 1;
        info!("Endpoint set changed ({} change(s) so far)", changes);
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// The name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
