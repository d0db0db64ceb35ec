//! Browser services: the injected provider binding and platform seams

pub mod ethereum;
pub mod platform;

pub use ethereum::{Eip1193Client, InjectedProviderDetector};
pub use platform::{LeptosSpawner, LocalStorageStore, LocationReloader};
