// libndeftag/src/worker.rs

//! The tag loop: wait for a tag, read and validate its message, hand it to
//! the application, keep the last-played pointer on the tag up to date
//! while the tag stays in the field, then start over with a fresh session.
//!
//! The loop runs on one thread and owns the reader for its whole lifetime.
//! It stops only when the shared keep-running flag is cleared; the flag is
//! checked between presence probes, never in the middle of a block
//! operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use log::{debug, error, info, warn};

use crate::error::FrameError;
use crate::record::{NdefCodec, RecordCodec, TagMessage, parse_records};
use crate::session::{Reader, RecreateReason};
use crate::{Error, Result};

/// Application side of the loop.
pub trait TagHandler {
    /// Called once per tag presence with the validated message.
    fn on_tag(&mut self, message: &TagMessage) -> Result<()>;

    /// URI currently playing, polled while the tag is present. A value
    /// different from the stored last-played record is written back.
    fn now_playing(&mut self) -> Option<String> {
        None
    }

    /// Called once the tag left the field.
    fn on_removed(&mut self) {}
}

/// A now-playing URI whose message can never be stored on this tag.
fn never_fits(e: &Error) -> bool {
    matches!(
        e,
        Error::Frame(FrameError::TooLarge { .. }) | Error::TagCapacity { .. } | Error::Record(_)
    )
}

/// Owns the reader and drives the tag loop for one handler.
pub struct Worker<H: TagHandler> {
    reader: Reader,
    codec: Box<dyn RecordCodec>,
    handler: H,
    rejected: Option<String>,
}

impl<H: TagHandler> Worker<H> {
    /// Worker with the built-in NDEF codec
    pub fn new(reader: Reader, handler: H) -> Self {
        Self {
            reader,
            codec: Box::new(NdefCodec),
            handler,
            rejected: None,
        }
    }

    /// Swap in another record codec
    pub fn with_codec(mut self, codec: Box<dyn RecordCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Reader driven by the loop
    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// Application handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Run until `keep_running` is cleared, then release the reader and
    /// hand the handler back.
    pub fn run(mut self, keep_running: &AtomicBool) -> H {
        info!("tag loop started");
        while keep_running.load(Ordering::SeqCst) {
            match self.cycle(keep_running) {
                Ok(()) => {}
                Err(Error::Cancelled) => debug!("tag loop cancelled"),
                Err(e) if e.is_routine() => debug!("no tag handled: {}", e),
                Err(e) => warn!("ignoring failed tag cycle: {}", e),
            }

            if let Err(e) = self.reader.recreate(RecreateReason::LoopReentry) {
                error!("session recreate failed: {}", e);
                thread::sleep(self.reader.config().removal_cooldown);
            }
        }

        info!("tag loop stopped");
        let Worker {
            reader, handler, ..
        } = self;
        reader.shutdown();
        handler
    }

    /// One presence event, from detection to removal.
    pub fn cycle(&mut self, keep_running: &AtomicBool) -> Result<()> {
        self.reader.wait_for_tag(keep_running)?;
        self.rejected = None;

        let bytes = self.reader.read_ndef()?;
        let mut message = parse_records(
            self.codec.as_ref(),
            &bytes,
            &self.reader.config().uri_prefixes,
        )?;
        info!("tag links to {}", message.primary_uri());
        self.handler.on_tag(&message)?;

        while self.reader.poll_presence()? {
            if !keep_running.load(Ordering::SeqCst) {
                return Err(Error::Cancelled);
            }
            message = self.sync_last_played(message);
        }

        info!("tag removed");
        self.handler.on_removed();
        thread::sleep(self.reader.config().removal_cooldown);
        Ok(())
    }

    fn sync_last_played(&mut self, message: TagMessage) -> TagMessage {
        let Some(current) = self.handler.now_playing() else {
            return message;
        };
        if message.last_played().as_deref() == Some(current.as_str())
            || self.rejected.as_deref() == Some(current.as_str())
        {
            return message;
        }

        let updated = message.clone().with_last_played(&current);
        let stored = updated
            .encode(self.codec.as_ref())
            .and_then(|bytes| self.reader.write_ndef(&bytes));
        match stored {
            Ok(()) => {
                info!("stored last played {}", current);
                updated
            }
            Err(e) if never_fits(&e) => {
                warn!("last played {} does not fit the tag: {}", current, e);
                self.rejected = Some(current);
                message
            }
            Err(e) => {
                // non-fatal, retried on the next presence probe
                warn!("could not store last played {}: {}", current, e);
                message
            }
        }
    }
}
