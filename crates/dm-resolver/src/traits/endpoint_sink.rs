// # Endpoint Sink Trait
//
// Defines the push-only interface to the consumer of endpoint sets, e.g. a
// connection manager or a load balancer.

use crate::endpoint::EndpointSet;

/// Consumer of published endpoint sets
///
/// `publish` is called once when the resolver starts and then once per
/// accepted change. It is never called with an empty set after the first
/// successful resolution, and never twice in a row with the same set.
///
/// # Blocking
///
/// `publish` runs on the watch task. It should hand the set off and return;
/// a slow sink delays the next refresh. Failures are the sink's own concern
/// and are not retried.
pub trait EndpointSink: Send + Sync {
    /// Receive the current endpoint set
    fn publish(&self, endpoints: &EndpointSet);
}

impl<F> EndpointSink for F
where
    F: Fn(&EndpointSet) + Send + Sync,
{
    fn publish(&self, endpoints: &EndpointSet) {
        self(endpoints)
    }
}
