//! Headless pilot that plays a session without a human at the keyboard.

use squadron_core::{arena::PLAYER_SPEED, EnemyState, FrameSnapshot, SessionStatus};
use squadron_simulation::Intents;

/// Horizontal distance within which a falling bullet counts as a threat.
const THREAT_WIDTH: f32 = 28.0;
/// Vertical distance above the ship within which a falling bullet counts as a threat.
const THREAT_HEIGHT: f32 = 160.0;

/// Chooses intents from the visible frame.
#[derive(Debug)]
pub(crate) struct Autopilot {
    max_waves: u32,
    waves_cleared: u32,
}

impl Autopilot {
    pub(crate) const fn new(max_waves: u32) -> Self {
        Self {
            max_waves,
            waves_cleared: 0,
        }
    }

    /// Waves the pilot has seen cleared so far.
    pub(crate) const fn waves_cleared(&self) -> u32 {
        self.waves_cleared
    }

    /// Returns `None` once the session is over for the pilot.
    pub(crate) fn decide(&mut self, frame: &FrameSnapshot) -> Option<Intents> {
        match frame.hud.status {
            SessionStatus::GameOver => None,
            SessionStatus::WaveCleared => {
                self.waves_cleared += 1;
                (self.waves_cleared < self.max_waves).then(|| Intents {
                    next_wave: true,
                    ..Intents::default()
                })
            }
            SessionStatus::Playing => Some(self.fly(frame)),
        }
    }

    fn fly(&self, frame: &FrameSnapshot) -> Intents {
        let ship = frame.player.position;
        let mut intents = Intents {
            fire: true,
            ..Intents::default()
        };

        let threat = frame.enemy_bullets.iter().find(|bullet| {
            (bullet.position.x - ship.x).abs() < THREAT_WIDTH
                && bullet.position.y < ship.y
                && ship.y - bullet.position.y < THREAT_HEIGHT
        });
        if let Some(bullet) = threat {
            if bullet.position.x > ship.x {
                intents.move_left = true;
            } else {
                intents.move_right = true;
            }
            return intents;
        }

        // Chase the lowest enemy still holding formation, or any enemy at all.
        let target = frame
            .enemies
            .iter()
            .filter(|enemy| enemy.state() == EnemyState::InFormation)
            .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
            .or_else(|| frame.enemies.iter().next());
        if let Some(enemy) = target {
            let dx = enemy.position.x - ship.x;
            if dx > PLAYER_SPEED {
                intents.move_right = true;
            } else if dx < -PLAYER_SPEED {
                intents.move_left = true;
            }
        }
        intents
    }
}
