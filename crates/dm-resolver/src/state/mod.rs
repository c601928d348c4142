// # Endpoint State
//
// Holds the endpoint set shared between the watch task and readers.

pub mod store;

pub use store::{AcceptOutcome, EndpointStore};
