//! Configuration for adsbridge
//!
//! Centralized configuration with sensible defaults.

use crate::events::Verbosity;

/// Main configuration for an adsbridge instance
///
/// The codec and processor themselves are configuration-free; these settings
/// describe the controller route a gateway implementation connects to and how
/// chatty the observability sink should be.
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Controller Route
    // -------------------------------------------------------------------------
    /// AMS net id of the target controller, e.g. "192.168.0.1.1.1"
    /// (as defined in the controller project's route table)
    pub ams_net_id: String,

    /// ADS port of the target runtime (normally 851 or 852)
    pub ads_port: u16,

    // -------------------------------------------------------------------------
    // Observability
    // -------------------------------------------------------------------------
    /// Minimum verbosity forwarded to the event sink
    pub verbosity: Verbosity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ams_net_id: "127.0.0.1.1.1".to_string(),
            ads_port: 851,
            verbosity: Verbosity::Important,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the AMS net id of the target controller
    pub fn ams_net_id(mut self, id: impl Into<String>) -> Self {
        self.config.ams_net_id = id.into();
        self
    }

    /// Set the ADS port of the target runtime
    pub fn ads_port(mut self, port: u16) -> Self {
        self.config.ads_port = port;
        self
    }

    /// Set the minimum verbosity forwarded to the event sink
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
