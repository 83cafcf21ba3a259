//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use wgmesh_report::{MeshReport, PeerReport, Status};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

const PEER_HEADERS: [&str; 7] = [
    "hostname", "owner", "ip", "external ip", "status", "last handshake", "rx / tx",
];

fn peer_row(peer: &PeerReport) -> Vec<String> {
    let status = match peer.status {
        Status::Online => peer.status.to_string().green().to_string(),
        Status::Offline => peer.status.to_string().red().to_string(),
        Status::Dormant => peer.status.to_string().yellow().to_string(),
        Status::Unknown => peer.status.to_string().dimmed().to_string(),
    };
    let handshake = peer
        .last_handshake_time
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    vec![
        peer.hostname.clone(),
        peer.owner.clone(),
        peer.ip.to_string(),
        peer.external_ip.to_string(),
        status,
        handshake,
        format!("{} / {}", peer.receive_bytes_si, peer.transmit_bytes_si),
    ]
}

/// Print a full mesh report
pub fn print_report(report: &MeshReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!(
                "{} on {} port {}, {}/{} peers online",
                report.domain.bold(),
                report.interface_name,
                report.listen_port,
                report.peers_online,
                report.peers_total
            );

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(PEER_HEADERS);
            for peer in &report.peers {
                table.add_row(peer_row(peer));
            }
            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
        }
        OutputFormat::Plain => {
            for (i, peer) in report.peers.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                for (header, value) in PEER_HEADERS.iter().zip(peer_row(peer)) {
                    println!("{}: {}", header, value);
                }
            }
        }
    }
}
