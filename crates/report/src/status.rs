//! Peer connectivity status classification

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Classification thresholds for peer connectivity
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Handshake within this window means the peer is online
    pub online_window: Duration,
    /// No handshake for this long means the peer may be abandoned
    pub expiry_window: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            online_window: Duration::minutes(3),
            expiry_window: Duration::days(28),
        }
    }
}

/// Peer connectivity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Peer has not been loaded into the WireGuard device yet
    Unknown,
    /// No recent handshake
    Offline,
    /// Handshake within the online window
    Online,
    /// No handshake for longer than the expiry window; peer may be removed
    Dormant,
}

impl Status {
    /// Classify a peer from its runtime liveness and last handshake.
    ///
    /// Rules are evaluated top to bottom, first match wins:
    /// 1. never observed by the runtime -> `Unknown`
    /// 2. handshake within the online window -> `Online`
    /// 3. handshake exists but is older than the expiry window -> `Dormant`
    /// 4. anything else -> `Offline`
    ///
    /// A known peer that has never handshaken lands in `Offline`: it has no
    /// handshake age to measure, so it must not be `Dormant`.
    pub fn classify(
        known: bool,
        last_handshake: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        thresholds: &Thresholds,
    ) -> Status {
        if !known {
            return Status::Unknown;
        }
        match last_handshake {
            Some(at) if now - at < thresholds.online_window => Status::Online,
            Some(at) if now - at > thresholds.expiry_window => Status::Dormant,
            _ => Status::Offline,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Unknown => write!(f, "unknown"),
            Status::Offline => write!(f, "offline"),
            Status::Online => write!(f, "online"),
            Status::Dormant => write!(f, "dormant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_unknown_ignores_handshake() {
        let t = Thresholds::default();
        assert_eq!(
            Status::classify(false, Some(now() - Duration::seconds(30)), now(), &t),
            Status::Unknown
        );
        assert_eq!(Status::classify(false, None, now(), &t), Status::Unknown);
    }

    #[test]
    fn test_recent_handshake_is_online() {
        let t = Thresholds::default();
        let status = Status::classify(true, Some(now() - Duration::minutes(1)), now(), &t);
        assert_eq!(status, Status::Online);
    }

    #[test]
    fn test_known_without_handshake_is_offline() {
        // No handshake age to measure, so never dormant.
        let t = Thresholds::default();
        assert_eq!(Status::classify(true, None, now(), &t), Status::Offline);
    }

    #[test]
    fn test_stale_handshake_is_dormant() {
        let t = Thresholds::default();
        let status = Status::classify(true, Some(now() - Duration::days(40)), now(), &t);
        assert_eq!(status, Status::Dormant);
    }

    #[test]
    fn test_middle_ground_is_offline() {
        let t = Thresholds::default();
        let status = Status::classify(true, Some(now() - Duration::hours(2)), now(), &t);
        assert_eq!(status, Status::Offline);
    }

    #[test]
    fn test_display_matches_serialized_form() {
        for (status, expect) in [
            (Status::Unknown, "unknown"),
            (Status::Offline, "offline"),
            (Status::Online, "online"),
            (Status::Dormant, "dormant"),
        ] {
            assert_eq!(status.to_string(), expect);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", expect)
            );
        }
    }
}
