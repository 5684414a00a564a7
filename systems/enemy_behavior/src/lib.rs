#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-enemy behavior state machine.
//!
//! Each tick every enemy advances through exactly one of its behavior states
//! in identifier order: entering, holding formation, diving along one of the
//! scripted paths, or flying back to its slot. The system only reads
//! snapshots and describes the outcome as commands.

mod paths;

use glam::Vec2;
use rand::Rng;
use squadron_core::{
    arena::{
        Rect, BULLET_SIZE, EDGE_INSET, ENEMY_SIZE, ENTRANCE_SPEED, EXIT_MARGIN, MAX_DIVE_STEP,
        MAX_DIVE_TIME, MIN_DIVE_STEP, PLAYER_BAND_TOP, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
        RETURN_CLIMB, RETURN_SPEED, SAFETY_LINE,
    },
    config::DifficultyCurve,
    policy, Command, DiveState, EnemyBehavior, EnemyKind, EnemyMotion, EnemySnapshot, EnemyView,
    WaveIndex,
};

pub use paths::dive_position;

/// Vertical distance used to scale the detour around the player band.
const DETOUR_RISE: f32 = 50.0;
/// Distance from the safety line at which a diver counts as having reached it.
const SAFETY_LINE_SLACK: f32 = 0.5;

/// Tick-wide facts every enemy decision depends on.
#[derive(Clone, Copy, Debug)]
pub struct Situation<'a> {
    /// Wave being fought.
    pub wave: WaveIndex,
    /// Whether the wave's startup grace period is running.
    pub startup_grace: bool,
    /// Enemy bullets currently on the playfield.
    pub live_enemy_bullets: usize,
    /// Wave-scaled behavior tuning.
    pub curve: &'a DifficultyCurve,
}

/// Pure system that advances every enemy by one tick.
#[derive(Debug, Default)]
pub struct Behavior;

impl Behavior {
    /// Emits the motion of every enemy together with any beam or bullet it spawns.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        situation: &Situation<'_>,
        enemies: &EnemyView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        let mut live_bullets = situation.live_enemy_bullets;
        for enemy in enemies.iter() {
            let motion = match enemy.behavior {
                EnemyBehavior::Entrance => enter(enemy),
                EnemyBehavior::InFormation => hold(enemy, situation, rng, out),
                EnemyBehavior::Diving(dive) => {
                    if situation.startup_grace {
                        enemy.motion(EnemyBehavior::InFormation, enemy.slot)
                    } else {
                        dive_step(enemy, dive, situation, &mut live_bullets, rng, out)
                    }
                }
                EnemyBehavior::Returning => return_step(enemy),
            };

            if !situation.startup_grace
                && matches!(
                    enemy.behavior,
                    EnemyBehavior::Diving(_) | EnemyBehavior::Returning
                )
                && policy::stray_missile_trigger(rng, situation.wave, situation.curve, live_bullets)
            {
                fire(motion.position, situation, out);
                live_bullets += 1;
            }

            out.push(Command::UpdateEnemy {
                enemy: enemy.id,
                motion,
            });
        }
    }
}

fn enter(enemy: &EnemySnapshot) -> EnemyMotion {
    let y = enemy.position.y + ENTRANCE_SPEED;
    if y >= enemy.slot.y {
        return enemy.motion(EnemyBehavior::InFormation, enemy.slot);
    }
    enemy.motion(EnemyBehavior::Entrance, Vec2::new(enemy.slot.x, y))
}

fn hold<R: Rng + ?Sized>(
    enemy: &EnemySnapshot,
    situation: &Situation<'_>,
    rng: &mut R,
    out: &mut Vec<Command>,
) -> EnemyMotion {
    let mut motion = enemy.motion(EnemyBehavior::InFormation, enemy.slot);
    if situation.startup_grace {
        return motion;
    }

    let curve = situation.curve;
    let mut beam_opened = false;
    if let Some(cooldown) = enemy.tractor_cooldown {
        let mut cooldown = cooldown.saturating_sub(1);
        if cooldown == 0
            && !enemy.beam_active
            && policy::tractor_trigger(rng, situation.wave, curve)
        {
            out.push(Command::ActivateTractorBeam { owner: enemy.id });
            cooldown = policy::tractor_cooldown_after_beam(rng, curve);
            beam_opened = true;
        }
        motion.tractor_cooldown = Some(cooldown);
    }

    motion.dive_cooldown = enemy.dive_cooldown.saturating_sub(1);
    if beam_opened || motion.dive_cooldown > 0 {
        return motion;
    }
    if policy::dive_trigger(rng, situation.wave, curve) {
        motion.behavior = EnemyBehavior::Diving(DiveState {
            pattern: policy::choose_dive_pattern(rng, situation.wave, curve),
            center: enemy.position,
            elapsed: 0.0,
        });
    }
    motion
}

fn dive_step<R: Rng + ?Sized>(
    enemy: &EnemySnapshot,
    mut dive: DiveState,
    situation: &Situation<'_>,
    live_bullets: &mut usize,
    rng: &mut R,
    out: &mut Vec<Command>,
) -> EnemyMotion {
    dive.elapsed += enemy.dive_speed.clamp(MIN_DIVE_STEP, MAX_DIVE_STEP);
    let position = dive_position(dive.pattern, dive.center, dive.elapsed);

    if matches!(enemy.kind, EnemyKind::Boss | EnemyKind::Mid)
        && policy::dive_missile_trigger(rng, situation.wave, situation.curve, *live_bullets)
    {
        fire(position, situation, out);
        *live_bullets += 1;
    }

    let mut motion = enemy.motion(EnemyBehavior::Diving(dive), position);
    let bounds = Rect::from_center(position, ENEMY_SIZE);
    let finished = dive.elapsed > MAX_DIVE_TIME
        || bounds.top() > PLAYFIELD_HEIGHT
        || bounds.bottom() < -EXIT_MARGIN
        || bounds.left() < -EXIT_MARGIN
        || bounds.right() > PLAYFIELD_WIDTH + EXIT_MARGIN
        || position.y >= SAFETY_LINE - SAFETY_LINE_SLACK;
    if finished {
        motion.behavior = EnemyBehavior::Returning;
        motion.dive_cooldown =
            policy::dive_cooldown_after_return(rng, situation.wave, situation.curve);
        if enemy.beam_active {
            out.push(Command::DeactivateTractorBeam { owner: enemy.id });
        }
    }
    motion
}

fn return_step(enemy: &EnemySnapshot) -> EnemyMotion {
    let offset = enemy.slot - enemy.position;
    let distance = offset.length();
    if distance < RETURN_SPEED {
        return enemy.motion(EnemyBehavior::InFormation, enemy.slot);
    }

    let mut position = enemy.position;
    if position.y > PLAYER_BAND_TOP {
        let edge_x = if position.x < PLAYFIELD_WIDTH / 2.0 {
            EDGE_INSET
        } else {
            PLAYFIELD_WIDTH - EDGE_INSET
        };
        let dx = edge_x - position.x;
        let detour = Vec2::new(dx, DETOUR_RISE).length();
        position.x += dx * RETURN_SPEED / detour;
        position.y -= RETURN_CLIMB;
    } else {
        position += offset * (RETURN_SPEED / distance);
    }
    enemy.motion(EnemyBehavior::Returning, position)
}

fn fire(position: Vec2, situation: &Situation<'_>, out: &mut Vec<Command>) {
    let bottom = Rect::from_center(position, ENEMY_SIZE).bottom();
    out.push(Command::SpawnEnemyBullet {
        origin: Vec2::new(position.x, bottom + BULLET_SIZE.y / 2.0),
        velocity: Vec2::new(
            0.0,
            policy::enemy_bullet_speed(situation.wave, situation.curve),
        ),
    });
}
