//! Resolved difficulty configuration consumed by the engine.
//!
//! The engine never reads files. A loader resolves a [`DifficultyConfig`]
//! once, validates it and hands it over as an immutable value. All sections
//! use `#[serde(default)]`, so a document only needs to name the values it
//! overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::{FORMATION_COLUMN_SPACING, FORMATION_ORIGIN_X, FORMATION_RIGHT};

/// Complete tuning surface of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Squadron sizing, hit points and score values.
    pub enemy: EnemyConfig,
    /// Item drop and pickup tuning.
    pub item: ItemConfig,
    /// Wave-scaled behavior curves.
    pub difficulty: DifficultyCurve,
}

/// Squadron sizing, hit points and score values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Formation columns of wave zero.
    pub base_cols: u32,
    /// Upper bound on formation columns.
    pub max_cols: u32,
    /// Formation rows of wave zero.
    pub base_rows: u32,
    /// Upper bound on formation rows.
    pub max_rows: u32,
    /// Base hit points of a Boss.
    pub boss_hp: u32,
    /// Base hit points of a Mid.
    pub mid_hp: u32,
    /// Base hit points of a Basic.
    pub basic_hp: u32,
    /// Waves needed for every enemy to gain one extra hit point.
    pub hp_wave_divisor: u32,
    /// Base score of a Boss.
    pub boss_score: u32,
    /// Base score of a Mid.
    pub mid_score: u32,
    /// Base score of a Basic.
    pub basic_score: u32,
    /// Score added to every enemy per wave.
    pub score_per_wave: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            base_cols: 8,
            max_cols: 12,
            base_rows: 3,
            max_rows: 5,
            boss_hp: 3,
            mid_hp: 2,
            basic_hp: 1,
            hp_wave_divisor: 3,
            boss_score: 300,
            mid_score: 150,
            basic_score: 100,
            score_per_wave: 10,
        }
    }
}

/// Item drop and pickup tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Probability that a destroyed enemy drops an item.
    pub drop_rate: f64,
    /// Probability that a bomb damages each on-screen enemy.
    pub bomb_hit_chance: f64,
    /// Flat score awarded once a bomb resolves.
    pub bomb_bonus: u32,
    /// Score awarded by a score item.
    pub score_bonus: u32,
    /// Ticks a shield item protects the player.
    pub shield_ticks: u32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            drop_rate: 0.2,
            bomb_hit_chance: 0.7,
            bomb_bonus: 200,
            score_bonus: 300,
            shield_ticks: 240,
        }
    }
}

/// Wave-scaled behavior curves with their clamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Dive speed ceiling at wave zero.
    pub dive_speed: f32,
    /// Growth of the dive speed ceiling per wave.
    pub dive_speed_per_wave: f32,
    /// Dive speed floor at wave zero.
    pub dive_speed_floor: f32,
    /// Growth of the dive speed floor per wave.
    pub dive_speed_floor_per_wave: f32,
    /// Largest total growth of the dive speed floor.
    pub dive_speed_floor_bonus_cap: f32,
    /// Absolute upper bound on any dive speed.
    pub max_dive_speed: f32,
    /// Dive cooldown at wave zero, in ticks.
    pub dive_cooldown: u32,
    /// Reduction of the dive cooldown per wave.
    pub dive_cooldown_per_wave: u32,
    /// Largest total reduction of the dive cooldown.
    pub dive_cooldown_reduction_cap: u32,
    /// Lower bound on the initial dive cooldown.
    pub min_dive_cooldown: u32,
    /// Smallest cooldown drawn after a dive completes, before wave scaling.
    pub dive_rearm_min: u32,
    /// Largest cooldown drawn after a dive completes, before wave scaling.
    pub dive_rearm_max: u32,
    /// Lower bound on the cooldown after a dive completes.
    pub dive_rearm_floor: u32,
    /// Tractor beam cooldown at wave zero, in ticks.
    pub tractor_cooldown: u32,
    /// Reduction of the tractor cooldown per wave.
    pub tractor_cooldown_per_wave: u32,
    /// Largest total reduction of the tractor cooldown.
    pub tractor_cooldown_reduction_cap: u32,
    /// Lower bound on the initial tractor cooldown.
    pub min_tractor_cooldown: u32,
    /// Smallest cooldown drawn after a beam fires.
    pub tractor_rearm_min: u32,
    /// Largest cooldown drawn after a beam fires.
    pub tractor_rearm_max: u32,
    /// Per-tick dive probability at wave zero once the cooldown elapsed.
    pub dive_chance_base: f64,
    /// Growth of the dive probability per wave.
    pub dive_chance_per_wave: f64,
    /// Upper bound on the dive probability.
    pub max_dive_chance: f64,
    /// Per-tick beam probability at wave zero once the cooldown elapsed.
    pub tractor_chance_base: f64,
    /// Growth of the beam probability per wave.
    pub tractor_chance_per_wave: f64,
    /// Upper bound on the beam probability.
    pub max_tractor_chance: f64,
    /// Per-tick shot probability of an enemy outside formation.
    pub missile_base_chance: f64,
    /// Growth of the diving shot probability per wave.
    pub missile_per_wave: f64,
    /// Upper bound on any shot probability.
    pub max_missile_chance: f64,
    /// Concurrent enemy bullets allowed at wave zero; one more per wave.
    pub max_missiles: u32,
    /// Enemy bullet speed at wave zero.
    pub enemy_bullet_speed: f32,
    /// Growth of the enemy bullet speed per wave.
    pub enemy_bullet_speed_per_wave: f32,
    /// Upper bound on the enemy bullet speed.
    pub max_enemy_bullet_speed: f32,
    /// First wave in which the spiral dive may be chosen.
    pub spiral_from_wave: u32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            dive_speed: 0.05,
            dive_speed_per_wave: 0.003,
            dive_speed_floor: 0.03,
            dive_speed_floor_per_wave: 0.005,
            dive_speed_floor_bonus_cap: 0.02,
            max_dive_speed: 0.08,
            dive_cooldown: 800,
            dive_cooldown_per_wave: 20,
            dive_cooldown_reduction_cap: 300,
            min_dive_cooldown: 300,
            dive_rearm_min: 300,
            dive_rearm_max: 800,
            dive_rearm_floor: 100,
            tractor_cooldown: 1200,
            tractor_cooldown_per_wave: 30,
            tractor_cooldown_reduction_cap: 400,
            min_tractor_cooldown: 600,
            tractor_rearm_min: 900,
            tractor_rearm_max: 1800,
            dive_chance_base: 0.01,
            dive_chance_per_wave: 0.003,
            max_dive_chance: 0.2,
            tractor_chance_base: 0.01,
            tractor_chance_per_wave: 0.002,
            max_tractor_chance: 0.1,
            missile_base_chance: 0.005,
            missile_per_wave: 0.0005,
            max_missile_chance: 0.05,
            max_missiles: 10,
            enemy_bullet_speed: 3.0,
            enemy_bullet_speed_per_wave: 0.3,
            max_enemy_bullet_speed: 6.0,
            spiral_from_wave: 3,
        }
    }
}

/// Reasons a configuration value is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A base dimension exceeds its bound or a bound is zero.
    #[error("{axis}: base {base} must not exceed max {max}, and max must be positive")]
    FormationBounds {
        /// Either `cols` or `rows`.
        axis: &'static str,
        /// Configured base value.
        base: u32,
        /// Configured upper bound.
        max: u32,
    },
    /// The widest formation would put slots beyond the sway band.
    #[error("max_cols = {max_cols} puts the last slot at x = {last_slot_x}, beyond {right}")]
    FormationTooWide {
        /// Configured column bound.
        max_cols: u32,
        /// Center of the rightmost slot of the widest formation.
        last_slot_x: f32,
        /// Right edge of the sway band.
        right: f32,
    },
    /// An enemy kind would spawn without hit points.
    #[error("{kind} hit points must be positive")]
    ZeroHitPoints {
        /// Name of the offending enemy kind.
        kind: &'static str,
    },
    /// The hit point wave divisor is zero.
    #[error("hp_wave_divisor must be positive")]
    ZeroDivisor,
    /// A probability lies outside `[0, 1]`.
    #[error("{name} = {value} is not a probability")]
    Probability {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A speed that must be positive is not.
    #[error("{name} = {value} must be positive")]
    NonPositiveSpeed {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A minimum exceeds its maximum.
    #[error("{name}: min {min} exceeds max {max}")]
    InvertedRange {
        /// Name of the offending range.
        name: &'static str,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

impl DifficultyConfig {
    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let enemy = &self.enemy;
        check_bounds("cols", enemy.base_cols, enemy.max_cols)?;
        check_bounds("rows", enemy.base_rows, enemy.max_rows)?;
        check_formation_width(enemy.max_cols)?;
        for (kind, hp) in [
            ("boss", enemy.boss_hp),
            ("mid", enemy.mid_hp),
            ("basic", enemy.basic_hp),
        ] {
            if hp == 0 {
                return Err(ConfigError::ZeroHitPoints { kind });
            }
        }
        if enemy.hp_wave_divisor == 0 {
            return Err(ConfigError::ZeroDivisor);
        }

        let item = &self.item;
        check_probability("drop_rate", item.drop_rate)?;
        check_probability("bomb_hit_chance", item.bomb_hit_chance)?;

        let curve = &self.difficulty;
        check_probability("dive_chance_base", curve.dive_chance_base)?;
        check_probability("max_dive_chance", curve.max_dive_chance)?;
        check_probability("tractor_chance_base", curve.tractor_chance_base)?;
        check_probability("max_tractor_chance", curve.max_tractor_chance)?;
        check_probability("missile_base_chance", curve.missile_base_chance)?;
        check_probability("max_missile_chance", curve.max_missile_chance)?;

        check_positive("dive_speed", curve.dive_speed)?;
        check_positive("dive_speed_floor", curve.dive_speed_floor)?;
        check_positive("max_dive_speed", curve.max_dive_speed)?;
        check_positive("enemy_bullet_speed", curve.enemy_bullet_speed)?;
        check_positive("max_enemy_bullet_speed", curve.max_enemy_bullet_speed)?;

        check_range(
            "dive_speed_floor..max_dive_speed",
            f64::from(curve.dive_speed_floor),
            f64::from(curve.max_dive_speed),
        )?;
        check_range(
            "dive_rearm",
            f64::from(curve.dive_rearm_min),
            f64::from(curve.dive_rearm_max),
        )?;
        check_range(
            "tractor_rearm",
            f64::from(curve.tractor_rearm_min),
            f64::from(curve.tractor_rearm_max),
        )?;
        Ok(())
    }
}

fn check_bounds(axis: &'static str, base: u32, max: u32) -> Result<(), ConfigError> {
    if max == 0 || base > max {
        return Err(ConfigError::FormationBounds { axis, base, max });
    }
    Ok(())
}

fn check_formation_width(max_cols: u32) -> Result<(), ConfigError> {
    let last_slot_x = FORMATION_ORIGIN_X + (max_cols - 1) as f32 * FORMATION_COLUMN_SPACING;
    if last_slot_x > FORMATION_RIGHT {
        return Err(ConfigError::FormationTooWide {
            max_cols,
            last_slot_x,
            right: FORMATION_RIGHT,
        });
    }
    Ok(())
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Probability { name, value });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ConfigError::NonPositiveSpeed { name, value });
    }
    Ok(())
}

fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}
