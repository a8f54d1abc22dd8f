//! Tap hit resolution
//!
//! A tap resolves at most one target. The live power-up is tested first;
//! then entities from the most recently spawned to the oldest, so where
//! entities overlap the one drawn on top wins.

use glam::Vec2;

use super::state::{Entity, PowerUp, ScoringEvent};
use crate::within_radius;

/// What a tap removed from the field
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    PowerUp(PowerUp),
    Entity(Entity),
    Miss,
}

impl TapOutcome {
    pub fn scoring_event(&self) -> ScoringEvent {
        match self {
            TapOutcome::PowerUp(_) => ScoringEvent::PowerUpCollected,
            TapOutcome::Entity(e) => ScoringEvent::EntityHit(e.kind),
            TapOutcome::Miss => ScoringEvent::Miss,
        }
    }
}

/// Resolve a tap and remove whatever it hit
pub fn resolve_tap(
    point: Vec2,
    power_up: &mut Option<PowerUp>,
    entities: &mut Vec<Entity>,
) -> TapOutcome {
    if let Some(taken) = power_up.take_if(|p| within_radius(point, p.pos, p.hit_radius())) {
        return TapOutcome::PowerUp(taken);
    }

    // Entities are kept in spawn order
    let hit = entities
        .iter()
        .rposition(|e| within_radius(point, e.pos, e.hit_radius()));
    match hit {
        Some(idx) => TapOutcome::Entity(entities.remove(idx)),
        None => TapOutcome::Miss,
    }
}
