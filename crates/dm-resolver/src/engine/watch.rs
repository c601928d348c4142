//! Periodic watch loop
//!
//! One task per resolver. Each tick resolves the target and offers the result
//! to the store; accepted sets are pushed to the sink and signaled on the
//! change listener. The loop exits for good when the cancellation channel
//! fires or its sender is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, info, warn};

use crate::resolve::resolve;
use crate::state::{AcceptOutcome, EndpointStore};
use crate::target::Target;
use crate::traits::{EndpointSink, NameLookup};

/// Everything a refresh needs, cloned out of the resolver at spawn time
pub(crate) struct Watcher {
    pub(crate) target: Target,
    pub(crate) lookup: Arc<dyn NameLookup>,
    pub(crate) store: Arc<EndpointStore>,
    pub(crate) sink: Option<Arc<dyn EndpointSink>>,
    pub(crate) listener: Option<mpsc::Sender<()>>,
}

impl Watcher {
    /// Resolve once and publish if the store accepts the result
    pub(crate) async fn refresh(&self) -> AcceptOutcome {
        let candidate = resolve(self.lookup.as_ref(), &self.target).await;

        let outcome = self.store.try_accept(candidate);
        match &outcome {
            AcceptOutcome::Accepted(endpoints) => {
                info!("Endpoints for {} changed: {}", self.target.address(), endpoints);

                if let Some(sink) = &self.sink {
                    sink.publish(endpoints);
                }

                // Awaited: a full listener channel holds up the next tick
                if let Some(listener) = &self.listener
                    && listener.send(()).await.is_err()
                {
                    warn!("Change listener for {} is closed", self.target.address());
                }
            }
            AcceptOutcome::RejectedEmpty => {
                debug!(
                    "Empty result for {}, keeping known endpoints",
                    self.target.address()
                );
            }
            AcceptOutcome::RejectedUnchanged => {
                debug!("Endpoints for {} unchanged", self.target.address());
            }
        }

        outcome
    }

    /// Run until cancelled
    ///
    /// The first tick fires one full `period` after the call.
    pub(crate) async fn run(self, period: Duration, mut cancel_rx: oneshot::Receiver<()>) {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(interval);

        info!("Watching {} every {:?}", self.target.address(), period);

        loop {
            tokio::select! {
                biased;

                _ = &mut cancel_rx => {
                    info!("Stopped watching {}", self.target.address());
                    break;
                }

                Some(_) = ticks.next() => {
                    self.refresh().await;
                }
            }
        }
    }
}
