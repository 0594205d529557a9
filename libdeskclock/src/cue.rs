//! Audible cues
//!
//! The core never plays sound itself. It asks a [`CueSink`] provided by the
//! shell to signal a cue and moves on; whatever the sink does with it
//! (terminal bell, sound file, nothing) cannot fail the caller.

use crossbeam_channel::{Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How strong a cue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueStrength {
    /// Per-second tick while an alarm is ringing
    Single,
    /// Hourly chime
    Double,
    /// Alarm fired or timer expired
    Triple,
}

impl CueStrength {
    /// Number of beeps the shell should produce
    pub fn beeps(&self) -> usize {
        match self {
            CueStrength::Single => 1,
            CueStrength::Double => 2,
            CueStrength::Triple => 3,
        }
    }
}

/// Capability for emitting audible cues
pub trait CueSink {
    fn signal(&self, strength: CueStrength);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn signal(&self, _strength: CueStrength) {}
}

impl CueSink for Sender<CueStrength> {
    fn signal(&self, strength: CueStrength) {
        match self.try_send(strength) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) | Err(TrySendError::Disconnected(dropped)) => {
                trace!(cue = ?dropped, "cue dropped");
            }
        }
    }
}
