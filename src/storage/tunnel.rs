use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::*;

/// Root document of `config.yaml`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TunnelConfig {
    #[serde(default)]
    pub tunnels: Vec<Tunnel>,
}

/// One forwarding rule.
///
/// Field declaration order is the canonical on-disk order. Absent fields stay
/// absent when written back, and keys outside this set are dropped when read.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Tunnel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_port: Option<Port>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_port: Option<Port>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    RemoteToLocal,
    LocalToRemote,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteToLocal => "remote_to_local",
            Self::LocalToRemote => "local_to_remote",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port as the caller wrote it. The browser form may submit text, which is
/// kept verbatim rather than rejected.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Port {
    Number(i64),
    Text(String),
}

impl Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(port) => write!(f, "{port}"),
            Self::Text(port) => f.write_str(port),
        }
    }
}

impl TunnelConfig {
    /// Parses a YAML document. Blank documents are an empty config.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str::<Option<Self>>(content)?.unwrap_or_default())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Fills in `direction` on every tunnel that lacks one.
    pub fn apply_defaults(&mut self) {
        for tunnel in self.tunnels.iter_mut() {
            tunnel.direction.get_or_insert(Direction::default());
        }
    }
}

/// Body of a write request. `tunnels` must be present.
#[derive(Deserialize)]
pub struct ConfigUpdate {
    pub tunnels: Option<Vec<Tunnel>>,
}

impl ConfigUpdate {
    pub fn parse(body: &[u8]) -> Result<TunnelConfig> {
        let update: Self = serde_json::from_slice(body).map_err(|_| Error::InvalidData)?;

        update
            .tunnels
            .map(|tunnels| TunnelConfig { tunnels })
            .ok_or(Error::InvalidData)
    }
}
