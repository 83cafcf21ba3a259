//! Live device snapshot via `wg show <iface> dump`
//!
//! Dump format: one tab-separated interface line (private key, public key,
//! listen port, fwmark) followed by one line per peer (public key, preshared
//! key, endpoint, allowed ips, latest handshake epoch, rx bytes, tx bytes,
//! keepalive). A handshake epoch of 0 means the peer never handshook.

use anyhow::{bail, Context};
use chrono::DateTime;
use std::process::Command;
use tracing::debug;

use wgmesh_report::{PeerTelemetry, Snapshot};

/// Query the kernel for the current state of a WireGuard interface.
pub fn snapshot(interface: &str) -> anyhow::Result<Snapshot> {
    let output = Command::new("wg")
        .args(["show", interface, "dump"])
        .output()
        .context("failed to run `wg`; is wireguard-tools installed?")?;

    if !output.status.success() {
        bail!(
            "`wg show {} dump` failed: {}",
            interface,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8(output.stdout).context("`wg` produced non-UTF-8 output")?;
    let snapshot = parse_dump(&stdout)?;
    debug!(interface, peers = snapshot.peers.len(), "device snapshot taken");
    Ok(snapshot)
}

/// Parse `wg show <iface> dump` output into a snapshot.
fn parse_dump(dump: &str) -> anyhow::Result<Snapshot> {
    let mut snapshot = Snapshot::new();

    // First line describes the interface itself.
    for line in dump.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            bail!("malformed wg dump peer line: {:?}", line);
        }

        let endpoint = match fields[2] {
            "(none)" => None,
            addr => Some(
                addr.parse()
                    .with_context(|| format!("bad endpoint in wg dump: {:?}", addr))?,
            ),
        };

        let handshake_epoch: i64 = fields[4]
            .parse()
            .with_context(|| format!("bad handshake epoch in wg dump: {:?}", fields[4]))?;
        let last_handshake = if handshake_epoch == 0 {
            None
        } else {
            DateTime::from_timestamp(handshake_epoch, 0)
        };

        snapshot.insert(
            fields[0],
            PeerTelemetry {
                last_handshake,
                receive_bytes: fields[5]
                    .parse()
                    .with_context(|| format!("bad rx bytes in wg dump: {:?}", fields[5]))?,
                transmit_bytes: fields[6]
                    .parse()
                    .with_context(|| format!("bad tx bytes in wg dump: {:?}", fields[6]))?,
                endpoint,
            },
        );
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
private\tifacepub\t51820\toff
peer-a\t(none)\t203.0.113.9:51820\t10.11.0.2/32\t1717243200\t4096\t1024\t25
peer-b\t(none)\t(none)\t10.11.0.3/32\t0\t0\t0\toff
";

    #[test]
    fn test_parse_dump_skips_interface_line() {
        let snapshot = parse_dump(DUMP).unwrap();
        assert_eq!(snapshot.peers.len(), 2);
        assert!(snapshot.get("ifacepub").is_none());
    }

    #[test]
    fn test_parse_dump_peer_fields() {
        let snapshot = parse_dump(DUMP).unwrap();

        let a = snapshot.get("peer-a").unwrap();
        assert_eq!(a.endpoint, Some("203.0.113.9:51820".parse().unwrap()));
        assert_eq!(a.receive_bytes, 4096);
        assert_eq!(a.transmit_bytes, 1024);
        assert_eq!(a.last_handshake.unwrap().timestamp(), 1717243200);

        let b = snapshot.get("peer-b").unwrap();
        assert!(b.endpoint.is_none());
        assert!(b.last_handshake.is_none());
    }

    #[test]
    fn test_parse_dump_rejects_garbage() {
        assert!(parse_dump("iface line\nnot a peer line\n").is_err());
    }
}
