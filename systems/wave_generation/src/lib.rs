#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic squadron generation system.
//!
//! Every wave draws from its own ChaCha stream whose seed is derived from the
//! session seed and the wave index, so the layout of a wave never depends on
//! how earlier waves were played.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use squadron_core::{
    arena::{
        ENTRANCE_SPAWN_Y, FORMATION_COLUMN_SPACING, FORMATION_ORIGIN_X, FORMATION_ORIGIN_Y,
        FORMATION_ROW_SPACING,
    },
    config::{DifficultyConfig, DifficultyCurve, EnemyConfig},
    policy::uniform_inclusive,
    Command, EnemyKind, EnemySeed, WaveIndex, WaveParameters,
};

const RNG_STREAM_SQUADRON: &str = "squadron";

/// Pure system that builds the squadron of a wave.
#[derive(Clone, Copy, Debug)]
pub struct WaveGeneration {
    session_seed: u64,
}

impl WaveGeneration {
    /// Creates a generator bound to the provided session seed.
    #[must_use]
    pub const fn new(session_seed: u64) -> Self {
        Self { session_seed }
    }

    /// Emits the [`Command::SpawnWave`] that starts `wave`.
    pub fn handle(&self, wave: WaveIndex, config: &DifficultyConfig, out: &mut Vec<Command>) {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.session_seed, wave));
        let parameters = wave_parameters(wave, &config.enemy);
        let enemies = generate_squadron(wave, parameters, config, &mut rng);
        out.push(Command::SpawnWave {
            wave,
            parameters,
            enemies,
        });
    }
}

/// Formation dimensions of `wave`.
#[must_use]
pub fn wave_parameters(wave: WaveIndex, enemy: &EnemyConfig) -> WaveParameters {
    let w = wave.get();
    WaveParameters {
        columns: enemy.base_cols.saturating_add(w / 2).min(enemy.max_cols),
        rows: enemy.base_rows.saturating_add(w % 3).min(enemy.max_rows),
    }
}

/// Archetype occupying column `column`, row `row` of `wave`.
#[must_use]
pub fn enemy_kind(wave: WaveIndex, column: u32, row: u32) -> EnemyKind {
    if row > 0 {
        return EnemyKind::Basic;
    }
    let boss_spacing = 4 - (wave.get() / 3).min(2);
    if column % boss_spacing == 0 {
        EnemyKind::Boss
    } else {
        EnemyKind::Mid
    }
}

/// Builds every enemy of the wave, column by column and top to bottom within a column.
pub fn generate_squadron<R: Rng + ?Sized>(
    wave: WaveIndex,
    parameters: WaveParameters,
    config: &DifficultyConfig,
    rng: &mut R,
) -> Vec<EnemySeed> {
    let capacity = usize::try_from(parameters.columns.saturating_mul(parameters.rows)).unwrap_or(0);
    let mut enemies = Vec::with_capacity(capacity);
    for column in 0..parameters.columns {
        for row in 0..parameters.rows {
            let kind = enemy_kind(wave, column, row);
            let slot = Vec2::new(
                FORMATION_ORIGIN_X + column as f32 * FORMATION_COLUMN_SPACING,
                FORMATION_ORIGIN_Y + row as f32 * FORMATION_ROW_SPACING,
            );
            let curve = &config.difficulty;
            let dive_speed = draw_dive_speed(wave, curve, rng);
            let dive_cooldown = draw_cooldown(
                rng,
                wave,
                curve.dive_cooldown,
                curve.dive_cooldown_per_wave,
                curve.dive_cooldown_reduction_cap,
                curve.min_dive_cooldown,
            );
            let tractor_cooldown = match kind {
                EnemyKind::Boss => Some(draw_cooldown(
                    rng,
                    wave,
                    curve.tractor_cooldown,
                    curve.tractor_cooldown_per_wave,
                    curve.tractor_cooldown_reduction_cap,
                    curve.min_tractor_cooldown,
                )),
                EnemyKind::Basic | EnemyKind::Mid => None,
            };
            enemies.push(EnemySeed {
                kind,
                hp: hit_points(wave, kind, &config.enemy),
                score: score_value(wave, kind, &config.enemy),
                slot,
                position: Vec2::new(slot.x, ENTRANCE_SPAWN_Y),
                dive_speed,
                dive_cooldown,
                tractor_cooldown,
            });
        }
    }
    enemies
}

/// Hit points of `kind` during `wave`.
#[must_use]
pub fn hit_points(wave: WaveIndex, kind: EnemyKind, enemy: &EnemyConfig) -> u32 {
    let base = match kind {
        EnemyKind::Boss => enemy.boss_hp,
        EnemyKind::Mid => enemy.mid_hp,
        EnemyKind::Basic => enemy.basic_hp,
    };
    let bonus = wave.get().checked_div(enemy.hp_wave_divisor).unwrap_or(0);
    base.saturating_add(bonus).max(1)
}

/// Score awarded for destroying `kind` during `wave`.
#[must_use]
pub fn score_value(wave: WaveIndex, kind: EnemyKind, enemy: &EnemyConfig) -> u32 {
    let base = match kind {
        EnemyKind::Boss => enemy.boss_score,
        EnemyKind::Mid => enemy.mid_score,
        EnemyKind::Basic => enemy.basic_score,
    };
    base.saturating_add(wave.get().saturating_mul(enemy.score_per_wave))
}

fn draw_dive_speed<R: Rng + ?Sized>(wave: WaveIndex, curve: &DifficultyCurve, rng: &mut R) -> f32 {
    let w = wave.get() as f32;
    let floor = curve.dive_speed_floor
        + curve
            .dive_speed_floor_bonus_cap
            .min(curve.dive_speed_floor_per_wave * w);
    let ceiling = curve
        .max_dive_speed
        .min(curve.dive_speed + w * curve.dive_speed_per_wave);
    let draw: f32 = rng.gen();
    (floor + draw * (ceiling - floor)).min(curve.max_dive_speed)
}

fn draw_cooldown<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    base: u32,
    per_wave: u32,
    reduction_cap: u32,
    min: u32,
) -> u32 {
    let reduction = reduction_cap.min(wave.get().saturating_mul(per_wave));
    let upper = base.saturating_sub(reduction).max(min);
    let lower = upper.saturating_sub(upper / 4).max(min);
    uniform_inclusive(rng, lower, upper)
}

fn derive_wave_seed(session_seed: u64, wave: WaveIndex) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(session_seed.to_le_bytes());
    hasher.update(RNG_STREAM_SQUADRON.as_bytes());
    hasher.update(wave.get().to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes)
}
