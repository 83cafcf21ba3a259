//! Mesh configuration loading

use anyhow::Context;
use std::path::Path;
use tracing::debug;

use wgmesh_report::MeshConfig;

/// Load the mesh configuration from its JSON file.
pub fn load(path: &Path) -> anyhow::Result<MeshConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mesh config {}", path.display()))?;
    let config: MeshConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse mesh config {}", path.display()))?;

    debug!(
        interface = %config.interface_name,
        peers = config.peers.len(),
        "loaded mesh config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_parses_peers_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wgmesh.json");
        std::fs::write(
            &path,
            r#"{
                "external_ip": "198.51.100.7",
                "interface_name": "wg0",
                "listen_port": 51820,
                "domain": "mesh.internal",
                "ip": "10.11.0.1",
                "network": "10.11.0.0/24",
                "dns": "10.11.0.1",
                "peers": [
                    {
                        "public_key": "k2",
                        "hostname": "beta",
                        "owner": "ops",
                        "description": "",
                        "added": "2024-01-01T00:00:00Z",
                        "ip": "10.11.0.3"
                    },
                    {
                        "public_key": "k1",
                        "hostname": "alpha",
                        "owner": "ops",
                        "description": "",
                        "added": "2024-01-01T00:00:00Z",
                        "ip": "10.11.0.2"
                    }
                ]
            }"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.interface_name, "wg0");
        let hostnames: Vec<_> = config.peers.iter().map(|p| p.hostname.as_str()).collect();
        assert_eq!(hostnames, ["beta", "alpha"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load(Path::new("/nonexistent/wgmesh.json")).is_err());
    }
}
