//! Named probability and timing policies.
//!
//! Every random decision the engine makes goes through one of these
//! functions. Each takes the random source explicitly so a seeded generator
//! reproduces a session exactly.

use rand::{seq::SliceRandom, Rng};

use crate::{
    config::{DifficultyCurve, ItemConfig},
    DivePattern, ItemKind, WaveIndex,
};

const BASIC_PATTERNS: [DivePattern; 2] = [DivePattern::Curve, DivePattern::Zigzag];
const ALL_PATTERNS: [DivePattern; 3] = [
    DivePattern::Curve,
    DivePattern::Zigzag,
    DivePattern::Spiral,
];
const ITEM_KINDS: [ItemKind; 4] = [
    ItemKind::DoubleFire,
    ItemKind::Shield,
    ItemKind::Bomb,
    ItemKind::Score,
];

/// Per-tick probability that an in-formation enemy with an elapsed cooldown starts a dive.
#[must_use]
pub fn dive_probability(wave: WaveIndex, curve: &DifficultyCurve) -> f64 {
    scaled(
        curve.dive_chance_base,
        curve.dive_chance_per_wave,
        curve.max_dive_chance,
        wave,
    )
}

/// Decides whether an in-formation enemy leaves for a dive this tick.
pub fn dive_trigger<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    curve: &DifficultyCurve,
) -> bool {
    roll(rng, dive_probability(wave, curve))
}

/// Decides whether a Boss with an elapsed beam cooldown activates its tractor beam.
pub fn tractor_trigger<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    curve: &DifficultyCurve,
) -> bool {
    let chance = scaled(
        curve.tractor_chance_base,
        curve.tractor_chance_per_wave,
        curve.max_tractor_chance,
        wave,
    );
    roll(rng, chance)
}

/// Largest number of enemy bullets allowed on the playfield at once.
#[must_use]
pub fn enemy_bullet_capacity(wave: WaveIndex, curve: &DifficultyCurve) -> usize {
    let capacity = u64::from(curve.max_missiles) + u64::from(wave.get());
    usize::try_from(capacity).unwrap_or(usize::MAX)
}

/// Decides whether a diving Boss or Mid fires this tick.
pub fn dive_missile_trigger<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    curve: &DifficultyCurve,
    live_enemy_bullets: usize,
) -> bool {
    if live_enemy_bullets >= enemy_bullet_capacity(wave, curve) {
        return false;
    }
    let chance = scaled(
        curve.missile_base_chance,
        curve.missile_per_wave,
        curve.max_missile_chance,
        wave,
    );
    roll(rng, chance)
}

/// Decides whether any enemy outside formation fires a stray shot this tick.
pub fn stray_missile_trigger<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    curve: &DifficultyCurve,
    live_enemy_bullets: usize,
) -> bool {
    if live_enemy_bullets >= enemy_bullet_capacity(wave, curve) {
        return false;
    }
    roll(rng, curve.missile_base_chance.min(curve.max_missile_chance))
}

/// Picks the path of a new dive. The spiral unlocks at `spiral_from_wave`.
pub fn choose_dive_pattern<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    curve: &DifficultyCurve,
) -> DivePattern {
    let patterns: &[DivePattern] = if wave.get() >= curve.spiral_from_wave {
        &ALL_PATTERNS
    } else {
        &BASIC_PATTERNS
    };
    patterns.choose(rng).copied().unwrap_or(DivePattern::Curve)
}

/// Cooldown an enemy observes after returning from a dive.
pub fn dive_cooldown_after_return<R: Rng + ?Sized>(
    rng: &mut R,
    wave: WaveIndex,
    curve: &DifficultyCurve,
) -> u32 {
    let drawn = uniform_inclusive(rng, curve.dive_rearm_min, curve.dive_rearm_max);
    let reduction = wave.get().saturating_mul(curve.dive_cooldown_per_wave);
    drawn.saturating_sub(reduction).max(curve.dive_rearm_floor)
}

/// Cooldown a Boss observes after activating its tractor beam.
pub fn tractor_cooldown_after_beam<R: Rng + ?Sized>(rng: &mut R, curve: &DifficultyCurve) -> u32 {
    uniform_inclusive(rng, curve.tractor_rearm_min, curve.tractor_rearm_max)
}

/// Rolls the item dropped by a destroyed enemy, if any.
pub fn item_drop<R: Rng + ?Sized>(rng: &mut R, items: &ItemConfig) -> Option<ItemKind> {
    if !roll(rng, items.drop_rate) {
        return None;
    }
    ITEM_KINDS.choose(rng).copied()
}

/// Decides whether a bomb damages one particular on-screen enemy.
pub fn bomb_hit<R: Rng + ?Sized>(rng: &mut R, items: &ItemConfig) -> bool {
    roll(rng, items.bomb_hit_chance)
}

/// Vertical speed of enemy bullets fired during `wave`.
#[must_use]
pub fn enemy_bullet_speed(wave: WaveIndex, curve: &DifficultyCurve) -> f32 {
    let speed = curve.enemy_bullet_speed + curve.enemy_bullet_speed_per_wave * wave.get() as f32;
    speed.min(curve.max_enemy_bullet_speed)
}

/// Draws uniformly from `min..=max`, collapsing inverted ranges onto `min`.
pub fn uniform_inclusive<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

fn scaled(base: f64, per_wave: f64, max: f64, wave: WaveIndex) -> f64 {
    (base + per_wave * f64::from(wave.get())).min(max)
}

fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.gen::<f64>() < chance
}
