use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HISTORY_PATH: &str = "history.json";
const DEFAULT_STATIC_ROOT: &str = ".";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_path: PathBuf,
    pub static_root: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let history_path = lookup("HISTORY_PATH").unwrap_or_else(|| DEFAULT_HISTORY_PATH.into());
        let static_root = lookup("STATIC_ROOT").unwrap_or_else(|| DEFAULT_STATIC_ROOT.into());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("invalid BIND_ADDR {bind_addr:?}"))?;

        Ok(Self {
            history_path: history_path.into(),
            static_root: static_root.into(),
            bind_addr,
        })
    }
}
