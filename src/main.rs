//! Beetle Tap headless runner
//!
//! Plays one round in simulated time with a simple autoplayer and prints the
//! leaderboard. Usage: `beetle-tap [settings.json]`

use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use beetle_tap::sim::{EntityKind, ScoringEvent, SimEvent, SimulationEngine};
use beetle_tap::players::BirthDate;
use beetle_tap::{GameSettings, HighScores, Players};

/// Autoplayer taps once every this many ticks
const TAP_EVERY_TICKS: u32 = 12;

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match GameSettings::load_or_default(&path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameSettings::default(),
    }
    .clamped();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Beetle Tap (headless) starting with seed {seed}");

    let mut engine = SimulationEngine::with_seed(seed);
    let finished = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&finished);
    engine.on_round_over(move |summary| {
        if let Ok(mut slot) = sink.lock() {
            *slot = Some(summary);
        }
    });

    if let Err(e) = engine.start(settings.round_config(), settings.difficulty) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    let period_ms = engine.config().tick_period_ms().round().max(1.0) as u32;
    let wall = Instant::now();
    let mut ticks: u32 = 0;
    let mut hits = [0u32; 3];

    loop {
        // Gentle downward tilt, as if the device were held upright
        let snap = engine.tick(period_ms, Vec2::new(0.0, 0.1));
        ticks += 1;
        for event in &snap.events {
            match event {
                SimEvent::PowerUpSpawned { id } => log::debug!("Power-up #{id} appeared"),
                SimEvent::EntityReacted { id } => log::debug!("Beetle #{id} screams"),
                _ => {}
            }
        }
        if !snap.phase.has_field() {
            break;
        }

        if ticks % TAP_EVERY_TICKS == 0 {
            let target = snap.power_up.as_ref().map(|p| p.pos).or_else(|| {
                snap.entities
                    .iter()
                    .find(|e| e.kind == EntityKind::Benign)
                    .map(|e| e.pos)
            });
            match engine.tap(target.unwrap_or(Vec2::new(990.0, 990.0))) {
                Some(ScoringEvent::EntityHit(EntityKind::Benign)) => hits[0] += 1,
                Some(ScoringEvent::PowerUpCollected) => hits[1] += 1,
                Some(ScoringEvent::Miss) => hits[2] += 1,
                _ => {}
            }
        }
    }

    let summary = finished.lock().ok().and_then(|slot| *slot);
    let Some(summary) = summary else {
        log::error!("Round ended without a result");
        return ExitCode::FAILURE;
    };
    log::info!(
        "Simulated {ticks} ticks in {:.1} ms: {} beetles, {} power-ups, {} misses",
        wall.elapsed().as_secs_f64() * 1000.0,
        hits[0],
        hits[1],
        hits[2]
    );

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut players = Players::new();
    let registered = match BirthDate::new(1, 1, 2000) {
        Ok(born) => players.register("Autoplayer", "n/a", 1, born, now_ms),
        Err(e) => Err(e),
    };
    let player = match registered {
        Ok(p) => p,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let level = engine.difficulty().level();
    let mut scores = HighScores::new();
    let rank = scores.submit(player, level, summary, now_ms);

    println!(
        "Final score: {} (difficulty {level}, {}s round, rank {rank})",
        summary.final_score, summary.duration_seconds
    );
    for (i, entry) in scores.top(10).iter().enumerate() {
        println!("{:>2}. {:<12} {:>5}", i + 1, entry.player_name, entry.score);
    }
    ExitCode::SUCCESS
}
