pub mod registry;

pub use registry::{HttpRegistryClient, RegistryError, RegistryLookup};
