//! Input types supplied by the external collaborators
//!
//! The mesh configuration comes from the configuration store; the snapshot
//! comes from the WireGuard device query. Both are read-only per report
//! cycle.

use chrono::{DateTime, Utc};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

/// One configured peer, in mesh configuration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerConfig {
    /// WireGuard public key, base64
    pub public_key: String,
    /// Used to update DNS; unique across the mesh
    pub hostname: String,
    /// Username of the person running this host/router
    pub owner: String,
    /// What the host is and/or does
    pub description: String,
    /// Date the peer was added to the mesh configuration
    pub added: DateTime<Utc>,
    /// Internal VPN address
    pub ip: IpAddr,
    /// Additional networks routed through this peer
    #[serde(default)]
    pub networks: Vec<IpNetwork>,
}

/// Static mesh configuration for this node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    pub external_ip: IpAddr,
    pub interface_name: String,
    pub listen_port: u16,
    /// Domain to append to hostnames. Relies on a separate DNS server for
    /// resolution. Informational only.
    pub domain: String,
    /// This node's mesh address
    pub ip: IpAddr,
    /// Network from which peer addresses are allocated
    pub network: IpNetwork,
    pub dns: IpAddr,
    pub peers: Vec<PeerConfig>,
}

/// Live telemetry for one peer as reported by the WireGuard device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeerTelemetry {
    /// None means the peer has never completed a handshake
    pub last_handshake: Option<DateTime<Utc>>,
    /// Cumulative per-session counters; reset to zero on interface reload
    pub receive_bytes: i64,
    pub transmit_bytes: i64,
    /// Last known remote endpoint
    pub endpoint: Option<SocketAddr>,
}

/// Point-in-time device snapshot, keyed by peer public key.
///
/// May be missing configured peers that have never connected, and may carry
/// peers that are no longer configured.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub peers: HashMap<String, PeerTelemetry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, public_key: impl Into<String>, telemetry: PeerTelemetry) {
        self.peers.insert(public_key.into(), telemetry);
    }

    pub fn get(&self, public_key: &str) -> Option<&PeerTelemetry> {
        self.peers.get(public_key)
    }
}
