//! Authoritative player ship state.

use glam::Vec2;
use squadron_core::{
    arena::{
        player_spawn_point, PLAYER_SIZE, PLAYER_SPEED, PLAYFIELD_WIDTH, START_INVINCIBILITY_TICKS,
        STARTING_LIVES,
    },
    PlayerSnapshot, Steer,
};

/// Ship controlled by the player.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) position: Vec2,
    pub(crate) velocity_x: f32,
    pub(crate) lives: u32,
    pub(crate) fire_cooldown: u32,
    pub(crate) invincibility_ticks: u32,
    pub(crate) shield_ticks: u32,
    pub(crate) double_fire: bool,
    pub(crate) captured: bool,
}

impl Player {
    /// Ship of a brand new session.
    pub(crate) fn fresh() -> Self {
        Self {
            position: player_spawn_point(),
            velocity_x: 0.0,
            lives: STARTING_LIVES,
            fire_cooldown: 0,
            invincibility_ticks: START_INVINCIBILITY_TICKS,
            shield_ticks: 0,
            double_fire: false,
            captured: false,
        }
    }

    /// Restores a full ship for a new wave: lives, position and timers reset,
    /// power-ups are lost.
    pub(crate) fn prepare_for_wave(&mut self) {
        *self = Self::fresh();
    }

    /// Counts down every timer. Returns `true` when the shield ran out during this tick.
    pub(crate) fn tick_timers(&mut self) -> bool {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.invincibility_ticks = self.invincibility_ticks.saturating_sub(1);
        if self.shield_ticks == 0 {
            return false;
        }
        self.shield_ticks -= 1;
        self.shield_ticks == 0
    }

    pub(crate) fn steer(&mut self, steer: Steer) {
        if self.captured {
            self.velocity_x = 0.0;
            return;
        }
        self.velocity_x = steer.velocity(PLAYER_SPEED);
        let half_width = PLAYER_SIZE.x / 2.0;
        self.position.x =
            (self.position.x + self.velocity_x).clamp(half_width, PLAYFIELD_WIDTH - half_width);
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            velocity_x: self.velocity_x,
            lives: self.lives,
            fire_cooldown: self.fire_cooldown,
            invincibility_ticks: self.invincibility_ticks,
            shield_ticks: self.shield_ticks,
            double_fire: self.double_fire,
            captured: self.captured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steering_clamps_to_playfield() {
        let mut player = Player::fresh();
        for _ in 0..200 {
            player.steer(Steer::Right);
        }
        assert_eq!(player.position.x, PLAYFIELD_WIDTH - PLAYER_SIZE.x / 2.0);
        for _ in 0..200 {
            player.steer(Steer::Left);
        }
        assert_eq!(player.position.x, PLAYER_SIZE.x / 2.0);
    }

    #[test]
    fn captured_player_ignores_steering() {
        let mut player = Player::fresh();
        player.captured = true;
        let before = player.position;
        player.steer(Steer::Left);
        assert_eq!(player.position, before);
        assert_eq!(player.velocity_x, 0.0);
    }

    #[test]
    fn shield_expiry_is_reported_once() {
        let mut player = Player::fresh();
        player.shield_ticks = 2;
        assert!(!player.tick_timers());
        assert!(player.tick_timers());
        assert!(!player.tick_timers());
    }
}
