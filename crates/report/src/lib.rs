//! wgmesh report library
//!
//! Joins a live WireGuard device snapshot with the static mesh configuration
//! to produce a point-in-time health report for every configured peer, and
//! persists that report as indented JSON with schema validation on reload.

pub mod bytes;
pub mod error;
pub mod report;
pub mod status;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use report::{MeshReport, PeerReport};
pub use status::{Status, Thresholds};
pub use store::ReportStore;
pub use types::{MeshConfig, PeerConfig, PeerTelemetry, Snapshot};

/// wgmesh version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
