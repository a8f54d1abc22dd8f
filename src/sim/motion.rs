//! Entity motion integration
//!
//! One integration step per tick. Under the field effect, affected entities
//! pick up the external acceleration before they move.

use glam::Vec2;

use super::state::{Difficulty, Entity, RoundConfig, SimEvent};
use crate::consts::{FIELD_EFFECT_GAIN, REACTION_THRESHOLD};
use crate::in_field;

/// Per-tick motion parameters
#[derive(Debug, Clone, Copy)]
pub struct MotionIntegrator {
    /// speed multiplier x difficulty factor
    step_scale: f32,
}

impl MotionIntegrator {
    pub fn new(config: &RoundConfig, difficulty: Difficulty) -> Self {
        Self {
            step_scale: config.speed_multiplier * difficulty.speed_factor(),
        }
    }

    /// Advance every entity one step and cull the ones that left the field.
    ///
    /// `acceleration` is only applied when `field_effect_active` and the
    /// entity is flagged affected.
    pub fn advance(
        &self,
        entities: &mut Vec<Entity>,
        field_effect_active: bool,
        acceleration: Vec2,
        events: &mut Vec<SimEvent>,
    ) {
        for entity in entities.iter_mut() {
            if field_effect_active && entity.affected {
                let old_vy = entity.vel.y;
                entity.vel += acceleration * FIELD_EFFECT_GAIN;

                if !entity.has_reacted && entity.vel.y > old_vy + REACTION_THRESHOLD {
                    entity.has_reacted = true;
                    events.push(SimEvent::EntityReacted { id: entity.id });
                }
            }
            entity.pos += entity.vel * self.step_scale;
        }

        entities.retain(|e| {
            let keep = in_field(e.pos);
            if !keep {
                events.push(SimEvent::EntityEscaped { id: e.id });
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;

    fn integrator(speed: f32, level: u8) -> MotionIntegrator {
        let config = RoundConfig {
            speed_multiplier: speed,
            ..Default::default()
        };
        MotionIntegrator::new(&config, Difficulty::new(level).unwrap())
    }

    fn entity(id: u32, pos: Vec2, vel: Vec2) -> Entity {
        Entity::new(id, EntityKind::Benign, pos, vel)
    }

    #[test]
    fn test_position_scaled_by_speed_and_difficulty() {
        // speed 2.0, difficulty 3 => factor 1.0 => step scale 2.0
        let m = integrator(2.0, 3);
        let mut es = vec![entity(1, Vec2::new(100.0, 100.0), Vec2::new(1.0, -0.5))];
        let mut events = Vec::new();
        m.advance(&mut es, false, Vec2::ZERO, &mut events);
        assert_eq!(es[0].pos, Vec2::new(102.0, 99.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_acceleration_ignored_without_field_effect() {
        let m = integrator(1.0, 3);
        let mut es = vec![entity(1, Vec2::new(100.0, 100.0), Vec2::ZERO)];
        es[0].affected = true;
        let mut events = Vec::new();
        m.advance(&mut es, false, Vec2::new(0.0, 5.0), &mut events);
        assert_eq!(es[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_acceleration_only_for_affected() {
        let m = integrator(1.0, 3);
        let mut es = vec![
            entity(1, Vec2::new(100.0, 100.0), Vec2::ZERO),
            entity(2, Vec2::new(200.0, 100.0), Vec2::ZERO),
        ];
        es[0].affected = true;
        let mut events = Vec::new();
        m.advance(&mut es, true, Vec2::new(0.5, 1.0), &mut events);
        assert_eq!(es[0].vel, Vec2::new(1.0, 2.0));
        assert_eq!(es[1].vel, Vec2::ZERO);
    }

    #[test]
    fn test_reaction_fires_once() {
        let m = integrator(1.0, 1);
        let mut es = vec![entity(7, Vec2::new(500.0, 100.0), Vec2::ZERO)];
        es[0].affected = true;
        let mut events = Vec::new();

        m.advance(&mut es, true, Vec2::new(0.0, 1.0), &mut events);
        assert_eq!(events, vec![SimEvent::EntityReacted { id: 7 }]);
        assert!(es[0].has_reacted);

        events.clear();
        m.advance(&mut es, true, Vec2::new(0.0, 1.0), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_small_vertical_change_does_not_react() {
        let m = integrator(1.0, 1);
        let mut es = vec![entity(7, Vec2::new(500.0, 100.0), Vec2::ZERO)];
        es[0].affected = true;
        let mut events = Vec::new();
        // 0.4 * gain 2.0 = 0.8 vertical increase, below threshold
        m.advance(&mut es, true, Vec2::new(3.0, 0.4), &mut events);
        assert!(!es[0].has_reacted);
        assert!(events.is_empty());
    }

    #[test]
    fn test_entities_leaving_field_are_culled() {
        let m = integrator(1.0, 3);
        let mut es = vec![
            entity(1, Vec2::new(-49.0, 10.0), Vec2::new(-2.0, 0.0)),
            entity(2, Vec2::new(500.0, 500.0), Vec2::new(1.0, 1.0)),
            entity(3, Vec2::new(10.0, 999.0), Vec2::new(0.0, 2.0)),
        ];
        let mut events = Vec::new();
        m.advance(&mut es, false, Vec2::ZERO, &mut events);
        assert_eq!(es.len(), 1);
        assert_eq!(es[0].id, 2);
        assert_eq!(
            events,
            vec![SimEvent::EntityEscaped { id: 1 }, SimEvent::EntityEscaped { id: 3 }]
        );
    }
}
