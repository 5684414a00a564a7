#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared left/right sway of the enemies holding formation.

use squadron_core::{
    arena::{FORMATION_LEFT, FORMATION_RIGHT, SWAY_STEP},
    Command, EnemyState, EnemyView, SwayDirection,
};

/// Pure system that advances the formation sway once per tick.
#[derive(Debug, Default)]
pub struct Formation;

impl Formation {
    /// Emits either a sway step or a direction flip for the in-formation enemies.
    pub fn handle(
        &mut self,
        enemies: &EnemyView,
        direction: SwayDirection,
        out: &mut Vec<Command>,
    ) {
        let Some((min_x, max_x)) = slot_extent(enemies) else {
            return;
        };

        let blocked = match direction {
            SwayDirection::Right => max_x + SWAY_STEP > FORMATION_RIGHT,
            SwayDirection::Left => min_x - SWAY_STEP < FORMATION_LEFT,
        };
        if blocked {
            out.push(Command::ReverseFormation);
        } else {
            out.push(Command::ShiftFormation {
                dx: SWAY_STEP * direction.sign(),
            });
        }
    }
}

fn slot_extent(enemies: &EnemyView) -> Option<(f32, f32)> {
    enemies
        .iter()
        .filter(|enemy| enemy.state() == EnemyState::InFormation)
        .map(|enemy| enemy.slot.x)
        .fold(None, |extent, x| match extent {
            None => Some((x, x)),
            Some((min_x, max_x)) => Some((min_x.min(x), max_x.max(x))),
        })
}
