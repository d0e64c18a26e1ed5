//! Asset store implementations.

mod local;

pub use local::LocalAssetStore;
