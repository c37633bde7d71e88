//! Bounded vitality value with alive/dead derivation and change notifications.

use tracing::{debug, info};

use crate::config::VitalityConfig;
use crate::error::VitalityError;
use crate::observer::{Observers, SubscriptionId};

/// Vitality of a single actor.
///
/// The value always stays within `0..=max_value`. Being alive is derived
/// from the value, never stored. Every mutation that actually changes the
/// value notifies value-changed observers first, then death or revive
/// observers if the alive state flipped.
///
/// Inputs that cannot apply (non-positive amounts, healing or damaging the
/// dead, reviving the living, killing the dead) are silent no-ops.
#[derive(Debug)]
pub struct VitalityState {
    current: i32,
    max: i32,
    value_changed: Observers<i32>,
    death: Observers<()>,
    revive: Observers<()>,
}

impl VitalityState {
    /// Builds a state with `starting_value` clamped into `0..=max_value`.
    pub fn new(max_value: i32, starting_value: i32) -> Result<Self, VitalityError> {
        if max_value <= 0 {
            return Err(VitalityError::NonPositiveMax(max_value));
        }
        Ok(Self {
            current: starting_value.clamp(0, max_value),
            max: max_value,
            value_changed: Observers::new(),
            death: Observers::new(),
            revive: Observers::new(),
        })
    }

    pub fn from_config(config: &VitalityConfig) -> Result<Self, VitalityError> {
        Self::new(config.vitality.max_value, config.vitality.starting_value())
    }

    pub fn value(&self) -> i32 {
        self.current
    }

    pub fn max_value(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn damage(&mut self, amount: i32) {
        if !self.is_alive() || amount <= 0 {
            return;
        }
        self.set_value(self.current.saturating_sub(amount));
    }

    /// Heals a living actor. The dead must go through [`Self::revive`].
    pub fn heal(&mut self, amount: i32) {
        if !self.is_alive() || amount <= 0 {
            return;
        }
        self.set_value(self.current.saturating_add(amount));
    }

    pub fn kill(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.set_value(0);
    }

    /// Brings a dead actor back with half its max value, never less than 1.
    pub fn revive(&mut self) {
        if self.is_alive() {
            return;
        }
        self.set_value(revive_value(self.max));
    }

    pub fn on_value_changed(&mut self, callback: impl FnMut(&i32) + 'static) -> SubscriptionId {
        self.value_changed.subscribe(callback)
    }

    pub fn remove_value_changed(&mut self, id: SubscriptionId) -> bool {
        self.value_changed.unsubscribe(id)
    }

    pub fn on_death(&mut self, mut callback: impl FnMut() + 'static) -> SubscriptionId {
        self.death.subscribe(move |_| callback())
    }

    pub fn remove_death(&mut self, id: SubscriptionId) -> bool {
        self.death.unsubscribe(id)
    }

    pub fn on_revive(&mut self, mut callback: impl FnMut() + 'static) -> SubscriptionId {
        self.revive.subscribe(move |_| callback())
    }

    pub fn remove_revive(&mut self, id: SubscriptionId) -> bool {
        self.revive.unsubscribe(id)
    }

    fn set_value(&mut self, proposed: i32) {
        let clamped = proposed.clamp(0, self.max);
        if clamped == self.current {
            return;
        }

        let previous = self.current;
        let was_alive = self.is_alive();
        self.current = clamped;
        let alive = self.is_alive();

        debug!(
            target: "vitality.state",
            previous,
            current = self.current,
            max = self.max,
            "vitality updated"
        );
        self.value_changed.notify(&self.current);

        if was_alive && !alive {
            info!(target: "vitality.state", previous, "actor died");
            self.death.notify(&());
        } else if !was_alive && alive {
            info!(target: "vitality.state", current = self.current, "actor revived");
            self.revive.notify(&());
        }
    }
}

fn revive_value(max: i32) -> i32 {
    (max / 2).max(1)
}
