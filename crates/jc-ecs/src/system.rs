//! Hooks a scheduler drives once per tick.

use jc_core::UpdateInfo;

use crate::manager::EntityComponentManager;

/// A unit of per-tick behavior.
///
/// The scheduler calls, in order, `pre_update` on every system, then `update`,
/// then `post_update`. Hooks are never re-entered.
pub trait System: Send {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Write commands for this tick.
    fn pre_update(&mut self, _info: &UpdateInfo, _ecm: &mut EntityComponentManager) {}

    /// Advance physical state.
    fn update(&mut self, _info: &UpdateInfo, _ecm: &mut EntityComponentManager) {}

    /// Observe the result of the tick.
    fn post_update(&mut self, _info: &UpdateInfo, _ecm: &EntityComponentManager) {}
}
