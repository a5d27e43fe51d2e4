use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Content store backend types
///
/// Defined in core because configuration selects it before the storage crate is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// GitHub repository contents API
    GitHub,
    /// Process-local map; contents vanish on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(StoreBackend::GitHub),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreBackend::GitHub => write!(f, "github"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}
