//! Entity and power-up spawning
//!
//! Decides when something new appears and where. Timing is measured in
//! round milliseconds from the round clock, never wall time.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Difficulty, Entity, EntityKind, PowerUp, PowerUpKind, RoundConfig};
use crate::consts::*;

/// Spawn scheduler owning the round's random source and id allocation
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    rng: R,
    /// Round time of the last entity spawn (None before the first)
    last_spawn_ms: Option<u64>,
    next_id: u32,
}

impl<R: RandomSource> Spawner<R> {
    /// Spawner drawing every roll from `rng`
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            last_spawn_ms: None,
            next_id: 1,
        }
    }

    /// Forget spawn timing; ids keep increasing across rounds
    pub fn reset(&mut self) {
        self.last_spawn_ms = None;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Spawn an entity if the cap and the spawn delay allow it.
    ///
    /// The first spawn of a round happens on the first tick.
    pub fn maybe_spawn_entity(
        &mut self,
        now_ms: u64,
        config: &RoundConfig,
        difficulty: Difficulty,
        live_entities: usize,
    ) -> Option<Entity> {
        if live_entities >= config.max_entities as usize {
            return None;
        }
        if let Some(last) = self.last_spawn_ms {
            let since = now_ms.saturating_sub(last) as f32;
            if since < config.spawn_delay_ms(difficulty) {
                return None;
            }
        }

        let Some((kind, pos, vel)) = self.roll_entity(difficulty) else {
            log::warn!("Random source failed, skipping entity spawn");
            return None;
        };

        self.last_spawn_ms = Some(now_ms);
        let entity = Entity::new(self.next_entity_id(), kind, pos, vel);
        log::debug!("Spawned {:?} #{} at {:?}", entity.kind, entity.id, entity.pos);
        Some(entity)
    }

    fn roll_entity(&mut self, difficulty: Difficulty) -> Option<(EntityKind, Vec2, Vec2)> {
        let kind = if self.rng.percent()? < difficulty.tier().hazard_percent() {
            EntityKind::Hazard
        } else {
            EntityKind::Benign
        };
        let pos = Vec2::new(
            self.rng.range(0.0, ENTITY_SPAWN_WIDTH)?,
            self.rng.range(0.0, ENTITY_SPAWN_HEIGHT)?,
        );
        let vel = Vec2::new(
            self.rng.range(-ENTITY_MAX_AXIS_SPEED, ENTITY_MAX_AXIS_SPEED)?,
            self.rng.range(-ENTITY_MAX_AXIS_SPEED, ENTITY_MAX_AXIS_SPEED)?,
        );
        Some((kind, pos, vel))
    }

    /// Spawn a power-up once per interval, counted from round start or the
    /// last activation, and only while no power-up is on the field or in effect.
    pub fn maybe_spawn_power_up(
        &mut self,
        now_ms: u64,
        config: &RoundConfig,
        last_activation_ms: Option<u64>,
        occupied: bool,
    ) -> Option<PowerUp> {
        if occupied {
            return None;
        }
        let since = now_ms.saturating_sub(last_activation_ms.unwrap_or(0));
        if since < config.power_up_interval_ms() {
            return None;
        }

        let Some(pos) = self.roll_power_up_pos() else {
            log::warn!("Random source failed, skipping power-up spawn");
            return None;
        };

        let power_up = PowerUp::new(self.next_entity_id(), PowerUpKind::FieldEffect, pos);
        log::debug!("Spawned power-up #{} at {:?}", power_up.id, power_up.pos);
        Some(power_up)
    }

    fn roll_power_up_pos(&mut self) -> Option<Vec2> {
        Some(Vec2::new(
            self.rng.range(0.0, POWER_UP_SPAWN_WIDTH)? + POWER_UP_SPAWN_MARGIN,
            self.rng.range(0.0, POWER_UP_SPAWN_HEIGHT)? + POWER_UP_SPAWN_MARGIN,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{FailingSource, PcgSource, ScriptedSource};

    fn d(level: u8) -> Difficulty {
        Difficulty::new(level).unwrap()
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let mut spawner = Spawner::new(PcgSource::new(1));
        let config = RoundConfig::default();
        assert!(spawner.maybe_spawn_entity(0, &config, d(5), 0).is_some());
    }

    #[test]
    fn test_spawn_delay_respected() {
        let mut spawner = Spawner::new(PcgSource::new(1));
        let config = RoundConfig::default();
        // Difficulty 5 at speed 1.0 => 2200 ms between spawns
        assert!(spawner.maybe_spawn_entity(100, &config, d(5), 0).is_some());
        assert!(spawner.maybe_spawn_entity(2299, &config, d(5), 1).is_none());
        assert!(spawner.maybe_spawn_entity(2300, &config, d(5), 1).is_some());
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut spawner = Spawner::new(PcgSource::new(1));
        let config = RoundConfig {
            max_entities: 2,
            ..Default::default()
        };
        assert!(spawner.maybe_spawn_entity(0, &config, d(1), 2).is_none());
        assert!(spawner.maybe_spawn_entity(0, &config, d(1), 1).is_some());
    }

    #[test]
    fn test_hazard_roll_uses_tier() {
        let config = RoundConfig::default();
        // percent 15: hazard at tier Medium (20%), benign at tier Easy (10%)
        let script = vec![0.15, 0.5, 0.5, 0.5, 0.5];
        let mut easy = Spawner::new(ScriptedSource::new(script.clone()));
        let mut medium = Spawner::new(ScriptedSource::new(script));
        let e = easy.maybe_spawn_entity(0, &config, d(2), 0).unwrap();
        let m = medium.maybe_spawn_entity(0, &config, d(5), 0).unwrap();
        assert_eq!(e.kind, EntityKind::Benign);
        assert_eq!(m.kind, EntityKind::Hazard);
    }

    #[test]
    fn test_spawn_placement_and_velocity() {
        let config = RoundConfig::default();
        let mut spawner = Spawner::new(ScriptedSource::new(vec![0.9, 0.5, 0.25, 0.0, 0.75]));
        let e = spawner.maybe_spawn_entity(0, &config, d(1), 0).unwrap();
        assert_eq!(e.pos, Vec2::new(400.0, 150.0));
        assert_eq!(e.vel, Vec2::new(-2.0, 1.0));
        assert!(!e.affected);
        assert!(!e.has_reacted);
    }

    #[test]
    fn test_ids_unique() {
        let mut spawner = Spawner::new(PcgSource::new(3));
        let config = RoundConfig::default();
        let a = spawner.maybe_spawn_entity(0, &config, d(10), 0).unwrap();
        let p = spawner.maybe_spawn_power_up(30_000, &config, None, false).unwrap();
        let b = spawner.maybe_spawn_entity(10_000, &config, d(10), 1).unwrap();
        assert_ne!(a.id, p.id);
        assert_ne!(a.id, b.id);
        assert_ne!(p.id, b.id);
    }

    #[test]
    fn test_power_up_interval_from_round_start() {
        let mut spawner = Spawner::new(PcgSource::new(9));
        let config = RoundConfig::default(); // 30 s
        assert!(spawner.maybe_spawn_power_up(29_999, &config, None, false).is_none());
        let p = spawner.maybe_spawn_power_up(30_000, &config, None, false).unwrap();
        assert!(!p.active);
        assert!(p.pos.x >= 50.0 && p.pos.x < 750.0);
        assert!(p.pos.y >= 50.0 && p.pos.y < 550.0);
    }

    #[test]
    fn test_power_up_interval_from_last_activation() {
        let mut spawner = Spawner::new(PcgSource::new(9));
        let config = RoundConfig::default();
        assert!(spawner.maybe_spawn_power_up(45_000, &config, Some(20_000), false).is_none());
        assert!(spawner.maybe_spawn_power_up(50_000, &config, Some(20_000), false).is_some());
    }

    #[test]
    fn test_power_up_exclusive() {
        let mut spawner = Spawner::new(PcgSource::new(9));
        let config = RoundConfig::default();
        assert!(spawner.maybe_spawn_power_up(60_000, &config, None, true).is_none());
    }

    #[test]
    fn test_failed_source_skips_spawn() {
        let mut spawner = Spawner::new(FailingSource);
        let config = RoundConfig::default();
        assert!(spawner.maybe_spawn_entity(0, &config, d(5), 0).is_none());
        assert!(spawner.maybe_spawn_power_up(60_000, &config, None, false).is_none());
        // Timing is not consumed by a failed attempt
        assert!(spawner.last_spawn_ms.is_none());
    }
}
