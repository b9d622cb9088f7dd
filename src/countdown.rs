use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Emitted by [`CountdownSession::advance`] on the tick that reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownSignal {
    Finished,
}

/// A whole-second countdown driven by an external 1 second tick.
///
/// The session never looks at the wall clock: every call to `advance`
/// counts exactly one second, so a host that stops delivering ticks while
/// paused gets no catch-up on resume.
#[derive(Debug, Clone)]
pub struct CountdownSession {
    configured_secs: u64,
    remaining_secs: u64,
    status: Status,
}

impl CountdownSession {
    pub fn new() -> Self {
        Self {
            configured_secs: 0,
            remaining_secs: 0,
            status: Status::Idle,
        }
    }

    /// Start a countdown of `hours:minutes:seconds`.
    ///
    /// A zero total leaves the session untouched and returns
    /// [`Error::InvalidConfiguration`]; callers stay in their setting phase.
    pub fn configure(&mut self, hours: u32, minutes: u32, seconds: u32) -> Result<()> {
        if matches!(self.status, Status::Running | Status::Paused) {
            return Err(Error::SessionActive);
        }

        let total = hours as u64 * 3600 + minutes as u64 * 60 + seconds as u64;
        if total == 0 {
            debug!("refusing zero-length countdown");
            return Err(Error::InvalidConfiguration);
        }

        self.configured_secs = total;
        self.remaining_secs = total;
        self.status = Status::Running;
        debug!(total_secs = total, "countdown started");
        Ok(())
    }

    /// Count one elapsed second. Returns the completion signal exactly once,
    /// on the call that brings the remaining time to zero.
    pub fn advance(&mut self) -> Option<CountdownSignal> {
        if self.status != Status::Running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = Status::Finished;
            info!(total_secs = self.configured_secs, "countdown finished");
            return Some(CountdownSignal::Finished);
        }

        None
    }

    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
            debug!(remaining_secs = self.remaining_secs, "countdown paused");
        }
    }

    pub fn resume(&mut self) {
        if self.status == Status::Paused && self.remaining_secs > 0 {
            self.status = Status::Running;
            debug!(remaining_secs = self.remaining_secs, "countdown resumed");
        }
    }

    pub fn toggle(&mut self) {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            Status::Idle | Status::Finished => {}
        }
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.remaining_secs = 0;
        self.configured_secs = 0;
    }

    /// Fraction of the countdown already elapsed, in `0.0..=1.0`; 0 when
    /// nothing is configured.
    pub fn progress(&self) -> f64 {
        if self.configured_secs == 0 {
            return 0.0;
        }
        1.0 - self.remaining_fraction()
    }

    /// Fraction still to go; drives the dial arc.
    pub fn remaining_fraction(&self) -> f64 {
        self.remaining_secs as f64 / self.configured_secs.max(1) as f64
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn configured_secs(&self) -> u64 {
        self.configured_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}

impl Default for CountdownSession {
    fn default() -> Self {
        Self::new()
    }
}
