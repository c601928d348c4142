//! Resolver lifecycle
//!
//! [`DomainResolver`] owns the target, the endpoint store and, in lookup mode
//! with watching enabled, the watch task.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ NameLookup  │◄── resolve (no lock held)
//! └─────────────┘
//!        │ EndpointSet
//!        ▼
//! ┌──────────────┐   try_accept    ┌───────────────┐
//! │   Watcher    │───────────────► │ EndpointStore │◄── current_endpoints()
//! └──────────────┘                 └───────────────┘
//!        │ accepted
//!        ├────────────────► EndpointSink::publish()
//!        └────────────────► change listener (mpsc)
//! ```
//!
//! ## Lifecycle
//!
//! 1. Create with [`DomainResolver::new()`]
//! 2. Attach a sink and/or change listener
//! 3. [`start()`](DomainResolver::start) resolves once and spawns the watch task
//! 4. [`stop()`](DomainResolver::stop) or [`shutdown()`](DomainResolver::shutdown)
//!    cancels it; dropping the resolver does too
//!
//! Literal IP targets never spawn a watch task, whatever the configuration says.

mod watch;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::{ResolverConfig, WatchConfig};
use crate::endpoint::EndpointSet;
use crate::error::{Error, Result};
use crate::lookup::SystemLookup;
use crate::state::EndpointStore;
use crate::target::Target;
use crate::traits::{EndpointSink, NameLookup};

use watch::Watcher;

/// Resolves a target into endpoints and keeps them fresh
///
/// ## Threading
///
/// `start`, `stop` and the first sink push run on the caller's task. The
/// watch task is the only writer afterwards;
/// [`current_endpoints()`](DomainResolver::current_endpoints) can be called
/// from anywhere and returns a consistent snapshot.
pub struct DomainResolver {
    target: Target,
    watch: WatchConfig,
    lookup: Arc<dyn NameLookup>,
    store: Arc<EndpointStore>,
    sink: Option<Arc<dyn EndpointSink>>,
    listener: Option<mpsc::Sender<()>>,
    started: bool,
    cancel_tx: Option<oneshot::Sender<()>>,
    watch_handle: Option<JoinHandle<()>>,
}

impl DomainResolver {
    /// Create a resolver
    ///
    /// # Parameters
    ///
    /// - `config`: Target and watch configuration
    /// - `lookup`: Name lookup used for hostname targets
    ///
    /// # Returns
    ///
    /// - `Ok(DomainResolver)`: A resolver that has not started yet
    /// - `Err(Error::Config)`: If the configuration is invalid
    pub fn new(config: ResolverConfig, lookup: Arc<dyn NameLookup>) -> Result<Self> {
        config.validate()?;

        let target = Target::new(config.address, config.port);
        if !target.needs_lookup() && config.watch.enabled {
            debug!("{} is an IP literal, watching disabled", target.address());
        }

        Ok(Self {
            target,
            watch: config.watch,
            lookup,
            store: Arc::new(EndpointStore::new()),
            sink: None,
            listener: None,
            started: false,
            cancel_tx: None,
            watch_handle: None,
        })
    }

    /// Create a resolver backed by the operating system resolver
    pub fn with_system_lookup(config: ResolverConfig) -> Result<Self> {
        Self::new(config, Arc::new(SystemLookup::new()))
    }

    /// Attach the consumer that receives every published endpoint set
    pub fn with_sink(mut self, sink: Arc<dyn EndpointSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attach a listener signaled after every accepted change
    ///
    /// The send is awaited on the watch task: while the channel is full, the
    /// next refresh waits. Size the channel for the reader you have.
    pub fn with_change_listener(mut self, listener: mpsc::Sender<()>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Resolve the target for the first time and start watching
    ///
    /// Literal targets store their single endpoint. Hostnames are resolved
    /// once and the result is stored as-is, even when empty; the watch task
    /// is spawned only if watching is enabled. Either way the sink, if any,
    /// receives the stored set.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Started
    /// - `Err(Error::AlreadyStarted)`: `start` was already called
    pub async fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(Error::AlreadyStarted);
        }
        self.started = true;

        let endpoints = match self.target.literal_endpoint() {
            Some(endpoint) => EndpointSet::from_unsorted(vec![endpoint]),
            None => crate::resolve(self.lookup.as_ref(), &self.target).await,
        };

        self.store.replace(endpoints.clone());
        info!("Initial endpoints for {}: {}", self.target.address(), endpoints);

        if let Some(sink) = &self.sink {
            sink.publish(&endpoints);
        }

        if self.target.needs_lookup() && self.watch.enabled {
            let watcher = Watcher {
                target: self.target.clone(),
                lookup: Arc::clone(&self.lookup),
                store: Arc::clone(&self.store),
                sink: self.sink.clone(),
                listener: self.listener.clone(),
            };
            let (cancel_tx, cancel_rx) = oneshot::channel();
            let period = self.watch.interval();

            self.cancel_tx = Some(cancel_tx);
            self.watch_handle = Some(tokio::spawn(watcher.run(period, cancel_rx)));
        }

        Ok(())
    }

    /// Cancel the watch task
    ///
    /// Returns once the signal is delivered, not once the task has exited;
    /// a refresh in flight completes first. A no-op when no task was spawned
    /// or it was already stopped.
    pub fn stop(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            if cancel_tx.send(()).is_err() {
                debug!("Watch task for {} already exited", self.target.address());
            }
            info!("Stop requested for {}", self.target.address());
        }
    }

    /// Cancel the watch task and wait for it to exit
    pub async fn shutdown(&mut self) {
        self.stop();

        if let Some(handle) = self.watch_handle.take()
            && let Err(e) = handle.await
        {
            error!("Watch task for {} failed: {}", self.target.address(), e);
        }
    }

    /// Manual refresh hook, intentionally a no-op
    ///
    /// The refresh interval is the only refresh cadence. Kept for callers that
    /// expect a "resolve now" entry point.
    pub fn trigger_refresh_now(&self) {
        debug!(
            "Refresh requested for {}, waiting for next tick",
            self.target.address()
        );
    }

    /// Snapshot of the current endpoint set
    pub fn current_endpoints(&self) -> EndpointSet {
        self.store.current_set()
    }

    /// Time the endpoint set last changed
    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        self.store.last_changed()
    }

    /// Whether the endpoint set has gone unchanged for longer than `max_age`
    pub fn is_stale(&self, max_age: chrono::Duration) -> bool {
        self.store.is_stale(max_age)
    }

    /// Whether the target is a hostname
    pub fn needs_lookup(&self) -> bool {
        self.target.needs_lookup()
    }

    /// Whether a watch task is running and has not been asked to stop
    pub fn is_watching(&self) -> bool {
        self.cancel_tx.is_some()
    }

    /// The resolution target
    pub fn target(&self) -> &Target {
        &self.target
    }
}
