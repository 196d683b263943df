use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Which filter criteria are switched on, and what the value-based ones
/// compare against. Everything is off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub filter_allow_only: bool,
    pub filter_block_only: bool,
    pub filter_inbound_only: bool,
    pub filter_outbound_only: bool,
    pub filter_source_port: bool,
    pub filter_source_ip: bool,
    pub filter_destination_port: bool,
    pub filter_destination_ip: bool,

    pub source_port: Option<u16>,
    pub source_ip: Option<String>,
    pub destination_port: Option<u16>,
    pub destination_ip: Option<String>,
}

impl FilterConfig {
    pub fn from_toml_str(content: &str) -> Result<FilterConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<FilterConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        FilterConfig::from_toml_str(&content)
    }

    pub fn source_port(mut self, port: u16) -> FilterConfig {
        self.filter_source_port = true;
        self.source_port = Some(port);
        self
    }

    pub fn source_ip<S: Into<String>>(mut self, ip: S) -> FilterConfig {
        self.filter_source_ip = true;
        self.source_ip = Some(ip.into());
        self
    }

    pub fn destination_port(mut self, port: u16) -> FilterConfig {
        self.filter_destination_port = true;
        self.destination_port = Some(port);
        self
    }

    pub fn destination_ip<S: Into<String>>(mut self, ip: S) -> FilterConfig {
        self.filter_destination_ip = true;
        self.destination_ip = Some(ip.into());
        self
    }
}
