//! Field-effect power-up lifecycle
//!
//! Activation, per-second countdown and expiry. While the effect runs every
//! entity on the field, including ones spawned later, is flagged affected.

use super::state::{Entity, PowerUp, SimEvent};
use crate::consts::FIELD_EFFECT_SECONDS;

#[derive(Debug, Clone, PartialEq)]
struct ActiveEffect {
    power_up: PowerUp,
    remaining_seconds: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PowerUpController {
    active: Option<ActiveEffect>,
    /// Round time of the most recent activation
    last_activation_ms: Option<u64>,
}

impl PowerUpController {
    /// Controller with no effect running
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.last_activation_ms = None;
    }

    /// Whether the field effect is running
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Seconds of effect left (0 when inactive)
    pub fn remaining_seconds(&self) -> u32 {
        self.active.as_ref().map_or(0, |a| a.remaining_seconds)
    }

    pub fn last_activation_ms(&self) -> Option<u64> {
        self.last_activation_ms
    }

    /// The consumed power-up currently in effect
    pub fn active_power_up(&self) -> Option<&PowerUp> {
        self.active.as_ref().map(|a| &a.power_up)
    }

    /// Start the effect from a collected power-up
    pub fn activate(&mut self, mut power_up: PowerUp, now_ms: u64, entities: &mut [Entity]) {
        power_up.active = true;
        log::info!(
            "Field effect activated by power-up #{} for {}s",
            power_up.id,
            FIELD_EFFECT_SECONDS
        );
        self.active = Some(ActiveEffect {
            power_up,
            remaining_seconds: FIELD_EFFECT_SECONDS,
        });
        self.last_activation_ms = Some(now_ms);
        for entity in entities.iter_mut() {
            entity.affected = true;
            entity.has_reacted = false;
        }
    }

    /// Flag a newly spawned entity if the effect is running
    pub fn on_spawn(&self, entity: &mut Entity) {
        if self.is_active() {
            entity.affected = true;
            entity.has_reacted = false;
        }
    }

    /// Count down one round-clock second. Expiry clears the flags on every
    /// entity; velocities are left as they are.
    pub fn tick_second(&mut self, entities: &mut [Entity], events: &mut Vec<SimEvent>) {
        let Some(effect) = self.active.as_mut() else {
            return;
        };
        effect.remaining_seconds = effect.remaining_seconds.saturating_sub(1);
        if effect.remaining_seconds > 0 {
            return;
        }

        self.active = None;
        for entity in entities.iter_mut() {
            entity.affected = false;
            entity.has_reacted = false;
        }
        events.push(SimEvent::FieldEffectExpired);
        log::info!("Field effect expired");
    }
}
