//! PID regulator.
//!
//! Converts an error signal and the elapsed tick time into a bounded command.
//! The regulator includes:
//! - Integral anti-windup by hard clamping the accumulator
//! - Output clamping
//! - Derivative hold on zero-length ticks

use jc_core::{Time, as_secs, clamp_ordered};
use serde::{Deserialize, Serialize};

/// PID gains and limits.
///
/// A limit pair whose max is below its min disables that clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain.
    pub p_gain: f64,
    /// Integral gain.
    pub i_gain: f64,
    /// Derivative gain.
    pub d_gain: f64,
    /// Upper bound of the integral term.
    pub i_max: f64,
    /// Lower bound of the integral term.
    pub i_min: f64,
    /// Upper bound of the output.
    pub cmd_max: f64,
    /// Lower bound of the output.
    pub cmd_min: f64,
    /// Constant added to the output before clamping.
    pub cmd_offset: f64,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            p_gain: 1.0,
            i_gain: 0.0,
            d_gain: 0.0,
            i_max: 1.0,
            i_min: -1.0,
            cmd_max: 1000.0,
            cmd_min: -1000.0,
            cmd_offset: 0.0,
        }
    }
}

/// PID state carried between updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidState {
    /// Integral term (already scaled by `i_gain`), within `[i_min, i_max]`.
    pub integral: f64,
    /// Error seen by the last derivative update.
    pub last_error: f64,
    /// Last computed error rate, reused on zero-length ticks.
    pub error_rate: f64,
    /// Last output.
    pub output: f64,
}

/// PID regulator owning its state.
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    config: PidConfig,
    state: PidState,
}

impl Pid {
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            state: PidState::default(),
        }
    }

    pub fn config(&self) -> &PidConfig {
        &self.config
    }

    pub fn state(&self) -> &PidState {
        &self.state
    }

    /// Last error, integral term and error rate.
    pub fn errors(&self) -> (f64, f64, f64) {
        (
            self.state.last_error,
            self.state.integral,
            self.state.error_rate,
        )
    }

    /// Last computed command.
    pub fn output(&self) -> f64 {
        self.state.output
    }

    /// Compute the command for `error` after `dt` has elapsed.
    ///
    /// Output is `p_gain * error + integral + d_gain * rate + cmd_offset`,
    /// clamped to `[cmd_min, cmd_max]`. A zero `dt` keeps the previous error
    /// rate. `dt` may be negative and is used as given.
    pub fn update(&mut self, error: f64, dt: Time) -> f64 {
        let dt = as_secs(dt);
        let cfg = &self.config;
        let state = &mut self.state;

        let p_term = cfg.p_gain * error;

        let integral = state.integral + cfg.i_gain * error * dt;
        state.integral = clamp_ordered(integral, cfg.i_min, cfg.i_max);

        if dt != 0.0 {
            state.error_rate = (error - state.last_error) / dt;
            state.last_error = error;
        }
        let d_term = cfg.d_gain * state.error_rate;

        let output_raw = p_term + state.integral + d_term + cfg.cmd_offset;
        state.output = clamp_ordered(output_raw, cfg.cmd_min, cfg.cmd_max);
        state.output
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use jc_core::s;
    use proptest::prelude::*;

    fn config() -> impl Strategy<Value = PidConfig> {
        (
            -1e3_f64..1e3,
            -1e3_f64..1e3,
            -1e3_f64..1e3,
            0.0_f64..50.0,
            0.0_f64..50.0,
            0.0_f64..5e3,
            0.0_f64..5e3,
        )
            .prop_map(|(p, i, d, i_hi, i_lo, c_hi, c_lo)| PidConfig {
                p_gain: p,
                i_gain: i,
                d_gain: d,
                i_max: i_hi,
                i_min: -i_lo,
                cmd_max: c_hi,
                cmd_min: -c_lo,
                cmd_offset: 0.0,
            })
    }

    proptest! {
        #[test]
        fn zero_error_gives_zero_output(cfg in config(), dt in 1e-4_f64..1.0) {
            let mut pid = Pid::new(cfg);
            prop_assert_eq!(pid.update(0.0, s(dt)), 0.0);
        }

        #[test]
        fn integral_and_output_stay_bounded(
            cfg in config(),
            steps in prop::collection::vec((-1e4_f64..1e4, -1.0_f64..1.0), 1..50),
        ) {
            let mut pid = Pid::new(cfg);
            for (error, dt) in steps {
                let out = pid.update(error, s(dt));
                prop_assert!(pid.state().integral >= cfg.i_min);
                prop_assert!(pid.state().integral <= cfg.i_max);
                prop_assert!(out >= cfg.cmd_min);
                prop_assert!(out <= cfg.cmd_max);
            }
        }
    }
}
