//! Report generation
//!
//! Joins the device snapshot with the mesh configuration, classifies each
//! configured peer and aggregates the online/total counts. Pure
//! transformation; persistence lives in [`crate::store`].

use chrono::{DateTime, Utc};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

use crate::bytes;
use crate::status::{Status, Thresholds};
use crate::types::{MeshConfig, Snapshot};

/// Health report for one configured peer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerReport {
    pub hostname: String,
    pub owner: String,
    pub description: String,
    /// Date the peer was added to the mesh configuration
    pub added: DateTime<Utc>,
    /// Internal VPN address
    pub ip: IpAddr,
    /// Last known external address; unspecified when never seen
    pub external_ip: IpAddr,
    pub status: Status,
    /// Additional networks routed through this peer
    pub networks: Vec<IpNetwork>,
    /// None means the peer has never completed a handshake
    pub last_handshake_time: Option<DateTime<Utc>>,
    pub receive_bytes: i64,
    pub transmit_bytes: i64,
    /// Display forms, always recomputed from the raw counters
    pub receive_bytes_si: String,
    pub transmit_bytes_si: String,
}

/// Aggregate mesh health report, peers in configuration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshReport {
    pub external_ip: IpAddr,
    pub interface_name: String,
    pub listen_port: u16,
    /// Domain to append to hostnames. Informational only.
    pub domain: String,
    /// This node's mesh address
    pub ip: IpAddr,
    /// Network from which peer addresses are allocated
    pub network: IpNetwork,
    pub dns: IpAddr,
    pub peers_online: usize,
    pub peers_total: usize,
    pub peers: Vec<PeerReport>,
}

impl MeshReport {
    /// Generate a fresh report from the configuration and a device snapshot.
    ///
    /// Peers appear exactly once, in configuration order. Configured peers
    /// absent from the snapshot classify as [`Status::Unknown`] with zero
    /// counters; snapshot peers absent from the configuration are excluded
    /// (orphan detection happens elsewhere).
    pub fn generate(
        config: &MeshConfig,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
        thresholds: &Thresholds,
    ) -> MeshReport {
        let mut peers = Vec::with_capacity(config.peers.len());
        let mut peers_online = 0;

        for peer in &config.peers {
            let telemetry = snapshot.get(&peer.public_key);
            let known = telemetry.is_some();
            let telemetry = telemetry.cloned().unwrap_or_default();

            let status = Status::classify(known, telemetry.last_handshake, now, thresholds);
            if status == Status::Online {
                peers_online += 1;
            }

            let external_ip = telemetry
                .endpoint
                .map(|endpoint| endpoint.ip())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

            peers.push(PeerReport {
                hostname: peer.hostname.clone(),
                owner: peer.owner.clone(),
                description: peer.description.clone(),
                added: peer.added,
                ip: peer.ip,
                external_ip,
                status,
                networks: peer.networks.clone(),
                last_handshake_time: telemetry.last_handshake,
                receive_bytes: telemetry.receive_bytes,
                transmit_bytes: telemetry.transmit_bytes,
                receive_bytes_si: bytes::to_si(telemetry.receive_bytes),
                transmit_bytes_si: bytes::to_si(telemetry.transmit_bytes),
            });
        }

        debug!(
            online = peers_online,
            total = peers.len(),
            interface = %config.interface_name,
            "generated mesh report"
        );

        MeshReport {
            external_ip: config.external_ip,
            interface_name: config.interface_name.clone(),
            listen_port: config.listen_port,
            domain: config.domain.clone(),
            ip: config.ip,
            network: config.network,
            dns: config.dns,
            peers_online,
            peers_total: peers.len(),
            peers,
        }
    }

    /// Schema validation for a report parsed from disk.
    ///
    /// Rejects the report wholesale; a partially valid report is never
    /// accepted.
    pub fn validate(&self) -> crate::Result<()> {
        if self.interface_name.is_empty() {
            return Err(crate::Error::InvalidReport(
                "interface_name is empty".to_string(),
            ));
        }
        if self.listen_port == 0 {
            return Err(crate::Error::InvalidReport(
                "listen_port is zero".to_string(),
            ));
        }
        for (i, peer) in self.peers.iter().enumerate() {
            if peer.hostname.is_empty() {
                return Err(crate::Error::InvalidReport(format!(
                    "peer {} has an empty hostname",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Recompute the derived fields from the peer sequence.
    ///
    /// Loaded reports never trust persisted aggregates or display strings;
    /// both are functions of the raw peer data.
    pub fn rederive(&mut self) {
        self.peers_total = self.peers.len();
        self.peers_online = self
            .peers
            .iter()
            .filter(|p| p.status == Status::Online)
            .count();
        for peer in &mut self.peers {
            peer.receive_bytes_si = bytes::to_si(peer.receive_bytes);
            peer.transmit_bytes_si = bytes::to_si(peer.transmit_bytes);
        }
    }
}
