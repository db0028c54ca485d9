use std::{io::ErrorKind, path::PathBuf};

use md5::{Digest, Md5};
use serde::Serialize;
use tokio::fs;

use crate::*;

/// Only the newest lines of a log are inspected.
const SCAN_LINES: usize = 20;

/// Directory the tunnel runner writes `tunnel_<log id>.log` files into.
pub struct TunnelLogs {
    dir: PathBuf,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Connected,
    Disconnected,
    Error,
    Unknown,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TunnelStatus {
    #[serde(flatten)]
    pub tunnel: Tunnel,
    pub log_id: String,
    pub status: Status,
    pub last_update: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub struct LogReport {
    pub status: Status,
    pub last_update: String,
    pub message: String,
}

impl LogReport {
    fn new(status: Status, last_update: String, message: impl Into<String>) -> Self {
        Self {
            status,
            last_update,
            message: message.into(),
        }
    }

    /// Walks the newest lines backwards and stops at the first one that
    /// says something definite about the connection.
    pub fn from_lines(lines: &[&str]) -> Self {
        if lines.is_empty() {
            return Self::new(Status::Disconnected, String::new(), "Log file is empty");
        }

        let mut last_update = String::new();

        for line in lines.iter().rev().take(SCAN_LINES) {
            if let (Some(start), Some(end)) = (line.find('['), line.find(']')) {
                if end > start {
                    last_update = line[start + 1..end].to_string();
                }
            }

            if line.contains("Starting tunnel") {
                return Self::new(Status::Connected, last_update, "Tunnel running");
            }
            if line.contains("Connection established") || line.contains("Authenticated to") {
                return Self::new(Status::Connected, last_update, "Connected");
            }
            if line.contains("Connection closed") || line.contains("Connection reset") {
                return Self::new(Status::Disconnected, last_update, "Disconnected");
            }
            if line.contains("Permission denied")
                || line.contains("Connection refused")
                || line.contains("Could not resolve hostname")
            {
                return Self::new(Status::Error, last_update, *line);
            }
        }

        if last_update.is_empty() {
            Self::new(Status::Unknown, last_update, "No log data available")
        } else {
            Self::new(Status::Connected, last_update, "Tunnel running")
        }
    }
}

/// Short id the tunnel runner names its log after: the first 8 hex digits of
/// the MD5 of `remote_host:remote_port:local_port:direction`.
pub fn log_id(tunnel: &Tunnel) -> String {
    fn field(value: Option<impl ToString>) -> String {
        value.map(|value| value.to_string()).unwrap_or_default()
    }

    let key = format!(
        "{}:{}:{}:{}",
        field(tunnel.remote_host.as_ref()),
        field(tunnel.remote_port.as_ref()),
        field(tunnel.local_port.as_ref()),
        field(tunnel.direction.as_ref()),
    );

    let digest = format!("{:x}", Md5::digest(key.as_bytes()));
    digest[..8].to_string()
}

impl TunnelLogs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn log_path(&self, log_id: &str) -> PathBuf {
        self.dir.join(format!("tunnel_{log_id}.log"))
    }

    pub async fn report(&self, log_id: &str) -> LogReport {
        match fs::read(self.log_path(log_id)).await {
            Ok(content) => {
                let content = String::from_utf8_lossy(&content);
                let lines = content.lines().collect::<Vec<_>>();
                LogReport::from_lines(&lines)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => LogReport::new(
                Status::Disconnected,
                String::new(),
                "Log file not found - tunnel may not be running",
            ),
            Err(e) => LogReport::new(
                Status::Error,
                String::new(),
                format!("Failed to read log: {e}"),
            ),
        }
    }

    pub async fn status(&self, tunnel: Tunnel) -> TunnelStatus {
        let log_id = log_id(&tunnel);
        let LogReport {
            status,
            last_update,
            message,
        } = self.report(&log_id).await;

        TunnelStatus {
            tunnel,
            log_id,
            status,
            last_update,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn tunnel(host: &str, remote: i64, local: i64, direction: Direction) -> Tunnel {
        Tunnel {
            name: Some("t".to_string()),
            remote_host: Some(host.to_string()),
            remote_port: Some(Port::Number(remote)),
            local_port: Some(Port::Number(local)),
            direction: Some(direction),
        }
    }

    #[test]
    fn log_id_hashes_endpoint_fields() {
        assert_eq!(
            log_id(&tunnel("example.com", 22, 8080, Direction::RemoteToLocal)),
            "5ba5f638"
        );
        assert_eq!(
            log_id(&tunnel("db.internal", 5432, 15432, Direction::LocalToRemote)),
            "9cb20235"
        );
    }

    #[test]
    fn log_id_ignores_name_and_uses_blank_for_missing() {
        let mut named = tunnel("example.com", 22, 8080, Direction::RemoteToLocal);
        named.name = Some("renamed".to_string());
        assert_eq!(log_id(&named), "5ba5f638");

        let bare = Tunnel {
            direction: Some(Direction::RemoteToLocal),
            ..Default::default()
        };
        assert_eq!(log_id(&bare), "2637502c");
    }

    #[test]
    fn text_ports_hash_like_numbers() {
        let mut text = tunnel("example.com", 0, 0, Direction::RemoteToLocal);
        text.remote_port = Some(Port::Text("22".to_string()));
        text.local_port = Some(Port::Text("8080".to_string()));
        assert_eq!(log_id(&text), "5ba5f638");
    }

    #[test]
    fn empty_log_is_disconnected() {
        let report = LogReport::from_lines(&[]);
        assert_eq!(report.status, Status::Disconnected);
        assert_eq!(report.message, "Log file is empty");
    }

    #[test]
    fn newest_indicator_wins() {
        let report = LogReport::from_lines(&[
            "[2024-03-09 10:00:00] Connection closed",
            "[2024-03-09 10:05:00] Authenticated to example.com",
        ]);
        assert_eq!(report.status, Status::Connected);
        assert_eq!(report.message, "Connected");
        assert_eq!(report.last_update, "2024-03-09 10:05:00");
    }

    #[test]
    fn error_lines_become_the_message() {
        let line = "[2024-03-09 10:00:00] ssh: connect to host x port 22: Connection refused";
        let report = LogReport::from_lines(&["noise", line]);
        assert_eq!(report.status, Status::Error);
        assert_eq!(report.message, line);
    }

    #[test]
    fn timestamp_without_indicator_counts_as_running() {
        let report = LogReport::from_lines(&["[10:00] heartbeat", "[10:01] heartbeat"]);
        assert_eq!(report.status, Status::Connected);
        assert_eq!(report.message, "Tunnel running");
        assert_eq!(report.last_update, "10:00");
    }

    #[test]
    fn no_signal_is_unknown() {
        let report = LogReport::from_lines(&["nothing here", "] backwards ["]);
        assert_eq!(report.status, Status::Unknown);
        assert_eq!(report.message, "No log data available");
    }

    #[test]
    fn only_recent_lines_are_scanned() {
        let mut lines = vec!["Connection established"];
        lines.extend(std::iter::repeat("noise").take(SCAN_LINES));
        assert_eq!(LogReport::from_lines(&lines).status, Status::Unknown);
    }

    #[tokio::test]
    async fn missing_log_is_disconnected() {
        let dir = tempdir().unwrap();
        let logs = TunnelLogs::new(dir.path());

        let report = logs.report("deadbeef").await;
        assert_eq!(report.status, Status::Disconnected);
        assert_eq!(
            report.message,
            "Log file not found - tunnel may not be running"
        );
    }

    #[tokio::test]
    async fn status_reads_log_for_tunnel() {
        let dir = tempdir().unwrap();
        let logs = TunnelLogs::new(dir.path());
        let tunnel = tunnel("example.com", 22, 8080, Direction::RemoteToLocal);
        fs::write(
            logs.log_path("5ba5f638"),
            "[2024-03-09 10:00:00] Starting tunnel\n",
        )
        .await
        .unwrap();

        let status = logs.status(tunnel.clone()).await;
        assert_eq!(status.tunnel, tunnel);
        assert_eq!(status.log_id, "5ba5f638");
        assert_eq!(status.status, Status::Connected);
        assert_eq!(status.last_update, "2024-03-09 10:00:00");
    }
}
