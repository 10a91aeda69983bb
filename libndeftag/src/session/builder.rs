// libndeftag/src/session/builder.rs

//! Builder for [`Reader`](crate::session::Reader).

use std::time::Duration;

use crate::config::ReaderConfig;
use crate::driver::Driver;
use crate::session::handle::{DriverFactory, Reader};
use crate::types::{KeyType, SectorKey};
use crate::{Error, Result};

/// Helper to construct a Reader with optional configuration.
#[derive(Default)]
pub struct ReaderBuilder {
    driver: Option<Box<dyn Driver>>,
    factory: Option<DriverFactory>,
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// Builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already-created driver (e.g. MockDriver)
    pub fn with_driver(mut self, driver: Box<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Build drivers on demand; takes precedence over `with_driver`
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn Driver>> + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Key presented to every sector
    pub fn key(mut self, key: SectorKey, key_type: KeyType) -> Self {
        self.config.key = key;
        self.config.key_type = key_type;
        self
    }

    /// First data block and exclusive scan limit
    pub fn block_range(mut self, first_data_block: u8, block_limit: u8) -> Self {
        self.config.first_data_block = first_data_block;
        self.config.block_limit = block_limit;
        self
    }

    /// Length of one presence probe
    pub fn presence_timeout(mut self, timeout: Duration) -> Self {
        self.config.presence_timeout = timeout;
        self
    }

    /// Pause after a tag leaves
    pub fn removal_cooldown(mut self, cooldown: Duration) -> Self {
        self.config.removal_cooldown = cooldown;
        self
    }

    /// Allowed primary URI prefixes
    pub fn uri_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.uri_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Consume the builder. Fails with `InvalidConfig` when neither a driver
    /// nor a factory was supplied, or when the configuration is invalid.
    pub fn build(self) -> Result<Reader> {
        match (self.factory, self.driver) {
            (Some(factory), _) => Reader::with_factory(factory, self.config),
            (None, Some(driver)) => Reader::new(driver, self.config),
            (None, None) => Err(Error::InvalidConfig("no driver supplied".into())),
        }
    }
}
