// # dm-resolver
//
// Resolves a configured target into a live set of connectable endpoints.
//
// ## Architecture Overview
//
// - **Target**: Classifies the configured address as an IP literal or a hostname
// - **NameLookup**: Trait for the name-resolution primitive (hostname → IPs)
// - **EndpointSink**: Trait for the consumer that receives published endpoint sets
// - **EndpointStore**: Mutex-guarded holder of the current sorted endpoint set
// - **DomainResolver**: Lifecycle controller and periodic watch loop
//
// ## Design Principles
//
// 1. **Single Writer**: Only the watch loop mutates the endpoint set after start
// 2. **No Spurious Churn**: Empty and unchanged results are never published
// 3. **Deterministic Ordering**: Stored sets are always sorted
// 4. **Library-First**: The daemon is a thin layer over this crate

pub mod config;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod resolve;
pub mod state;
pub mod target;
pub mod traits;

// Re-export core types for convenience
pub use config::{ResolverConfig, WatchConfig};
pub use endpoint::{EndpointSet, format_endpoint};
pub use engine::DomainResolver;
pub use error::{Error, Result};
pub use lookup::SystemLookup;
pub use resolve::resolve;
pub use state::{AcceptOutcome, EndpointStore};
pub use target::Target;
pub use traits::{EndpointSink, NameLookup};
