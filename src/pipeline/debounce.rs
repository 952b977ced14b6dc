// src/pipeline/debounce.rs
//
// Temporal hysteresis for discrete gestures, plus the stability counter
// that gates commands to any downstream actuator.

use crate::types::DriveCommand;

/// Frame-count debounce with hysteresis. The counter rises while the raw
/// predicate holds (capped at the threshold) and drains by one per tick
/// otherwise, so a gesture must be seen for N consecutive frames to
/// activate and survives a few frames of dropout before deactivating.
#[derive(Debug, Clone)]
pub struct GestureLatch {
    threshold: u32,
    count: u32,
    active: bool,
}

impl GestureLatch {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            count: 0,
            active: false,
        }
    }

    /// Advance one tick. Activation only at the cap, deactivation only
    /// at zero; everything in between latches the previous state.
    pub fn update(&mut self, raw: bool) -> bool {
        if raw {
            self.count = (self.count + 1).min(self.threshold);
        } else {
            self.count = self.count.saturating_sub(1);
        }

        if self.count == self.threshold {
            self.active = true;
        } else if self.count == 0 {
            self.active = false;
        }
        self.active
    }

    /// One tick of decay with no observation (hand lost).
    pub fn decay(&mut self) -> bool {
        self.update(false)
    }

    /// Drop straight to inactive.
    pub fn clear(&mut self) {
        self.count = 0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Counts consecutive ticks that produced the same command label. The
/// label is only exposed once the run reaches the threshold, which
/// throttles command-sending to a physical vehicle and prevents
/// oscillation.
#[derive(Debug, Clone)]
pub struct CommandStability {
    threshold: u32,
    last: Option<DriveCommand>,
    run: u32,
}

impl CommandStability {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            last: None,
            run: 0,
        }
    }

    /// Record this tick's label; returns it once stable.
    pub fn observe(&mut self, command: DriveCommand) -> Option<DriveCommand> {
        if self.last == Some(command) {
            self.run += 1;
        } else {
            self.last = Some(command);
            self.run = 1;
        }
        (self.run >= self.threshold).then_some(command)
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.run = 0;
    }
}
