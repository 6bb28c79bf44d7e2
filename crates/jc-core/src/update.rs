//! Per-tick information handed to every system by the scheduler.

use crate::units::{Time, as_secs, s};

/// Snapshot of the simulation clock for one tick.
///
/// `dt` is signed: a backward seek produces a negative step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateInfo {
    /// Simulation time at the end of this tick.
    pub sim_time: Time,
    /// Elapsed simulation time since the previous tick.
    pub dt: Time,
    /// Number of unpaused ticks executed so far.
    pub iterations: u64,
    /// True while the simulation is paused.
    pub paused: bool,
}

impl Default for UpdateInfo {
    fn default() -> Self {
        Self {
            sim_time: s(0.0),
            dt: s(0.0),
            iterations: 0,
            paused: false,
        }
    }
}

impl UpdateInfo {
    /// Tick with the given step size, starting at t=0.
    pub fn with_dt(dt: Time) -> Self {
        Self {
            sim_time: dt,
            dt,
            ..Self::default()
        }
    }

    /// True when the clock jumped backwards.
    pub fn is_rewind(&self) -> bool {
        as_secs(self.dt) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unpaused_zero_tick() {
        let info = UpdateInfo::default();
        assert!(!info.paused);
        assert_eq!(as_secs(info.dt), 0.0);
        assert!(!info.is_rewind());
    }

    #[test]
    fn negative_dt_is_rewind() {
        let info = UpdateInfo::with_dt(s(-0.5));
        assert!(info.is_rewind());
    }
}
