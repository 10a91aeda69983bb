// libndeftag/src/session/handle.rs

//! The [`Reader`] handle.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, warn};

use crate::config::ReaderConfig;
use crate::driver::Driver;
use crate::error::FrameError;
use crate::session::{RecreateReason, SessionEvent, SessionState};
use crate::tag;
use crate::{Error, Result};

/// Builds a fresh driver handle when the session is recreated.
pub type DriverFactory = Box<dyn FnMut() -> Result<Box<dyn Driver>>>;

/// Owner of the reader hardware. Tracks the session lifecycle and rebuilds
/// the driver when a failure leaves the reader state unreliable.
pub struct Reader {
    driver: Box<dyn Driver>,
    factory: Option<DriverFactory>,
    config: ReaderConfig,
    state: SessionState,
    events: Vec<SessionEvent>,
}

impl Reader {
    /// Create a reader from an existing driver. Without a factory,
    /// recreation reinitializes the same handle.
    pub fn new(driver: Box<dyn Driver>, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            driver,
            factory: None,
            config,
            state: SessionState::Idle,
            events: Vec::new(),
        })
    }

    /// Create a reader whose driver is (re)built by `factory`.
    pub fn with_factory(mut factory: DriverFactory, config: ReaderConfig) -> Result<Self> {
        let driver = factory()?;
        let mut reader = Self::new(driver, config)?;
        reader.factory = Some(factory);
        Ok(reader)
    }

    /// Configuration the reader was built with
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Lifecycle position between operations: `Idle` while waiting or
    /// after a recreate, `Requested` once presence was seen, `Closed`
    /// after a read or write released the tag. `Selected` and
    /// `Authenticated` only exist while an operation holds its
    /// [`TagSession`](crate::session::TagSession).
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drain recorded side-channel events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// One presence probe: reset the reader, arm the IRQ and wait for a
    /// single `presence_timeout`.
    pub fn poll_presence(&mut self) -> Result<bool> {
        self.driver.reinitialize()?;
        self.driver.presence_irq_clear();
        let present = self.driver.presence_irq_wait(self.config.presence_timeout);
        self.driver.presence_irq_clear();
        self.driver.reinitialize()?;
        Ok(present)
    }

    /// Single probe that reports absence as `PresenceTimeout`.
    pub fn await_presence(&mut self) -> Result<()> {
        if self.poll_presence()? {
            self.state = SessionState::Requested;
            Ok(())
        } else {
            Err(Error::PresenceTimeout)
        }
    }

    /// Block until a tag shows up or `keep_running` is cleared.
    pub fn wait_for_tag(&mut self, keep_running: &AtomicBool) -> Result<()> {
        while keep_running.load(Ordering::SeqCst) {
            match self.await_presence() {
                Ok(()) => return Ok(()),
                Err(Error::PresenceTimeout) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(Error::Cancelled)
    }

    /// Read the NDEF payload of the tag in the field.
    pub fn read_ndef(&mut self) -> Result<Vec<u8>> {
        let result = tag::read_ndef(&mut *self.driver, &self.config);
        self.settle(result)
    }

    /// Write `payload` as the NDEF payload of the tag in the field.
    ///
    /// Oversized payloads are rejected before the tag is selected and
    /// leave the session untouched.
    pub fn write_ndef(&mut self, payload: &[u8]) -> Result<()> {
        let frame = tag::prepare_frame(&self.config, payload)?;
        debug!("writing {} byte payload", payload.len());
        let result = tag::write_prepared(&mut *self.driver, &self.config, &frame);
        self.settle(result)
    }

    // Every failure past the handshake leaves the driver in an unknown
    // crypto state, so the next attempt starts from a rebuilt handle.
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        let Err(e) = &result else {
            self.state = SessionState::Closed;
            return result;
        };

        if matches!(e, Error::NoTagSelected) {
            self.state = SessionState::Idle;
            return result;
        }

        self.state = SessionState::Closed;
        let reason = match e {
            Error::Frame(FrameError::Truncated { .. }) => RecreateReason::Truncated,
            e if e.requires_recreate() => RecreateReason::AuthFailure,
            _ => RecreateReason::OperationFailure,
        };
        if let Err(re) = self.recreate(reason) {
            error!("session recreate after '{}' failed: {}", e, re);
        }
        result
    }

    /// Tear the driver down and bring up a fresh one.
    pub fn recreate(&mut self, reason: RecreateReason) -> Result<()> {
        info!("recreating reader session ({:?})", reason);
        self.release();
        if let Some(factory) = self.factory.as_mut() {
            self.driver = factory()?;
        }
        self.driver.reinitialize()?;
        self.state = SessionState::Idle;
        self.events.push(SessionEvent::Recreated { reason });
        Ok(())
    }

    fn release(&mut self) {
        if let Err(e) = self.driver.deauthenticate() {
            warn!("deauthenticate failed: {}", e);
        }
        if let Err(e) = self.driver.cleanup() {
            warn!("reader cleanup failed: {}", e);
        }
    }

    /// Best-effort release of the hardware before exit.
    pub fn shutdown(mut self) {
        debug!("shutting down reader");
        self.release();
    }
}
