// # Name Lookup Implementations

pub mod system;

pub use system::SystemLookup;
