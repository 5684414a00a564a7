#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Squadron.

mod entities;
mod player;

use glam::Vec2;
use squadron_core::{
    arena::{
        Rect, BOMB_FLASH_TICKS, BULLET_SIZE, DOUBLE_FIRE_OFFSET, EXPLOSION_TICKS,
        FIRE_COOLDOWN_TICKS, HIT_INVINCIBILITY_TICKS, ITEM_FALL_SPEED, ITEM_SIZE,
        PLAYER_BULLET_SPEED, PLAYFIELD_HEIGHT, STARTUP_GRACE_TICKS, TRACTOR_BEAM_TICKS,
    },
    BulletId, BulletOwner, Command, EffectKind, EnemyBehavior, EnemyId, EnemyKind, EnemyMotion,
    EnemySeed, EnemyState, Event, ItemId, PowerUp, SessionStatus, SwayDirection, WaveIndex,
    WaveParameters, WELCOME_BANNER,
};

use crate::{
    entities::{Bullet, Effect, Enemy, Item, TractorBeam},
    player::Player,
};

/// Describes the wave currently being fought.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveRecord {
    index: WaveIndex,
    spawned: u32,
    parameters: WaveParameters,
}

impl WaveRecord {
    const fn empty(index: WaveIndex) -> Self {
        Self {
            index,
            spawned: 0,
            parameters: WaveParameters {
                columns: 0,
                rows: 0,
            },
        }
    }

    /// Index of the wave.
    #[must_use]
    pub const fn index(&self) -> WaveIndex {
        self.index
    }

    /// Number of enemies the wave spawned.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Dimensions used to build the squadron.
    #[must_use]
    pub const fn parameters(&self) -> WaveParameters {
        self.parameters
    }
}

/// Represents the authoritative Squadron world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tick_index: u64,
    wave_tick: u64,
    wave: WaveRecord,
    status: SessionStatus,
    paused: bool,
    score: u64,
    high_score: u64,
    player: Player,
    enemies: Vec<Enemy>,
    player_bullets: Vec<Bullet>,
    enemy_bullets: Vec<Bullet>,
    items: Vec<Item>,
    beams: Vec<TractorBeam>,
    effects: Vec<Effect>,
    formation_direction: SwayDirection,
    next_enemy_id: u32,
    next_bullet_id: u32,
    next_item_id: u32,
}

impl World {
    /// Creates an empty world with a fresh player and no squadron.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            tick_index: 0,
            wave_tick: 0,
            wave: WaveRecord::empty(WaveIndex::FIRST),
            status: SessionStatus::Playing,
            paused: false,
            score: 0,
            high_score: 0,
            player: Player::fresh(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            items: Vec::new(),
            beams: Vec::new(),
            effects: Vec::new(),
            formation_direction: SwayDirection::Right,
            next_enemy_id: 0,
            next_bullet_id: 0,
            next_item_id: 0,
        }
    }

    /// Seeds the best score known from earlier sessions.
    #[must_use]
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    fn clear_entities(&mut self) {
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.items.clear();
        self.beams.clear();
        self.effects.clear();
        self.formation_direction = SwayDirection::Right;
    }

    fn spawn_wave(&mut self, wave: WaveIndex, parameters: WaveParameters, seeds: &[EnemySeed]) {
        self.clear_entities();
        for seed in seeds {
            let id = EnemyId::new(self.next_enemy_id);
            self.next_enemy_id = self.next_enemy_id.saturating_add(1);
            self.enemies.push(Enemy::from_seed(id, seed));
        }
        self.wave = WaveRecord {
            index: wave,
            spawned: u32::try_from(seeds.len()).unwrap_or(u32::MAX),
            parameters,
        };
        self.wave_tick = 0;
        self.status = SessionStatus::Playing;
        self.player.prepare_for_wave();
    }

    fn allocate_bullet_id(&mut self) -> BulletId {
        let id = BulletId::new(self.next_bullet_id);
        self.next_bullet_id = self.next_bullet_id.wrapping_add(1);
        id
    }

    fn allocate_item_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_item_id);
        self.next_item_id = self.next_item_id.wrapping_add(1);
        id
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|candidate| candidate.id == enemy)
    }

    fn in_startup_grace(&self) -> bool {
        self.wave_tick < STARTUP_GRACE_TICKS
    }

    fn spawn_effect(&mut self, kind: EffectKind, position: Vec2, lifetime: u32) {
        if lifetime == 0 {
            return;
        }
        self.effects.push(Effect {
            kind,
            position,
            remaining_ticks: lifetime,
        });
    }

    fn award_score(&mut self, points: u32, out_events: &mut Vec<Event>) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(u64::from(points));
        out_events.push(Event::ScoreChanged { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            out_events.push(Event::HighScoreBeaten {
                score: self.high_score,
            });
        }
    }

    fn close_beam(&mut self, owner: EnemyId, out_events: &mut Vec<Event>) {
        let before = self.beams.len();
        self.beams.retain(|beam| beam.owner != owner);
        if self.beams.len() != before {
            out_events.push(Event::TractorBeamDeactivated { owner });
        }
    }

    fn remove_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) -> Option<Enemy> {
        let index = self.enemy_index(enemy)?;
        let removed = self.enemies.remove(index);
        self.close_beam(enemy, out_events);
        Some(removed)
    }

    fn damage_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };
        let target = &mut self.enemies[index];
        target.hp = target.hp.saturating_sub(1);
        if target.hp > 0 {
            out_events.push(Event::EnemyDamaged {
                enemy,
                remaining_hp: target.hp,
            });
            return;
        }

        let Some(destroyed) = self.remove_enemy(enemy, out_events) else {
            return;
        };
        self.spawn_effect(EffectKind::Explosion, destroyed.position, EXPLOSION_TICKS);
        out_events.push(Event::EnemyDestroyed {
            enemy,
            kind: destroyed.kind,
            position: destroyed.position,
            score: destroyed.score,
        });
        self.award_score(destroyed.score, out_events);
    }

    fn update_enemy(
        &mut self,
        enemy: EnemyId,
        motion: EnemyMotion,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };
        let target = &mut self.enemies[index];
        let previous = target.behavior.state();
        target.apply_motion(motion);
        match (previous, motion.behavior) {
            (EnemyState::InFormation, EnemyBehavior::Diving(dive)) => {
                out_events.push(Event::EnemyDove {
                    enemy,
                    pattern: dive.pattern,
                });
            }
            (EnemyState::Returning, EnemyBehavior::InFormation) => {
                out_events.push(Event::EnemyRegrouped { enemy });
            }
            _ => {}
        }
    }

    fn fire_player(&mut self, out_events: &mut Vec<Event>) {
        if self.in_startup_grace() || self.player.captured || self.player.fire_cooldown > 0 {
            return;
        }
        let muzzle_y = self.player.snapshot().bounds().top() - BULLET_SIZE.y / 2.0;
        let x = self.player.position.x;
        let offsets: &[f32] = if self.player.double_fire {
            &[-DOUBLE_FIRE_OFFSET, DOUBLE_FIRE_OFFSET]
        } else {
            &[0.0]
        };
        for offset in offsets {
            let id = self.allocate_bullet_id();
            self.player_bullets.push(Bullet {
                id,
                owner: BulletOwner::Player,
                position: Vec2::new(x + offset, muzzle_y),
                velocity: Vec2::new(0.0, PLAYER_BULLET_SPEED),
            });
        }
        self.player.fire_cooldown = FIRE_COOLDOWN_TICKS;
        out_events.push(Event::PlayerFired {
            bullets: u32::try_from(offsets.len()).unwrap_or(1),
        });
    }

    fn activate_beam(&mut self, owner: EnemyId, out_events: &mut Vec<Event>) {
        if self.beams.iter().any(|beam| beam.owner == owner) {
            return;
        }
        let Some(index) = self.enemy_index(owner) else {
            return;
        };
        let boss = &self.enemies[index];
        if boss.kind != EnemyKind::Boss || boss.behavior.state() != EnemyState::InFormation {
            return;
        }
        self.beams.push(TractorBeam::below(boss, TRACTOR_BEAM_TICKS));
        out_events.push(Event::TractorBeamActivated { owner });
    }

    fn advance_entities(&mut self, out_events: &mut Vec<Event>) {
        for bullet in &mut self.player_bullets {
            bullet.position += bullet.velocity;
        }
        self.player_bullets
            .retain(|bullet| bullet.snapshot().bounds().bottom() >= 0.0);

        for bullet in &mut self.enemy_bullets {
            bullet.position += bullet.velocity;
        }
        self.enemy_bullets
            .retain(|bullet| bullet.snapshot().bounds().top() <= PLAYFIELD_HEIGHT);

        for item in &mut self.items {
            item.position.y += ITEM_FALL_SPEED;
        }
        self.items
            .retain(|item| Rect::from_center(item.position, ITEM_SIZE).top() <= PLAYFIELD_HEIGHT);

        let mut closed = Vec::new();
        for beam in &mut self.beams {
            let owner = self
                .enemies
                .iter()
                .find(|enemy| enemy.id == beam.owner)
                .filter(|enemy| enemy.behavior.state() == EnemyState::InFormation);
            match owner {
                Some(owner) => beam.follow(owner),
                None => {
                    beam.remaining_ticks = 0;
                    closed.push(beam.owner);
                    continue;
                }
            }
            beam.remaining_ticks = beam.remaining_ticks.saturating_sub(1);
            if beam.remaining_ticks == 0 {
                closed.push(beam.owner);
            }
        }
        for owner in closed {
            self.close_beam(owner, out_events);
        }

        let player_position = self.player.position;
        for effect in &mut self.effects {
            if effect.kind == EffectKind::ShieldGlow {
                effect.position = player_position;
            }
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
        }
        self.effects.retain(|effect| effect.remaining_ticks > 0);
    }

    fn lose_life(&mut self, out_events: &mut Vec<Event>) {
        if self.status == SessionStatus::GameOver || self.player.lives == 0 {
            return;
        }
        self.player.lives -= 1;
        self.spawn_effect(EffectKind::Explosion, self.player.position, EXPLOSION_TICKS);
        out_events.push(Event::PlayerHit {
            lives_remaining: self.player.lives,
        });
        if self.player.lives > 0 {
            self.player.invincibility_ticks = HIT_INVINCIBILITY_TICKS;
        } else {
            self.status = SessionStatus::GameOver;
            out_events.push(Event::GameOver { score: self.score });
        }
    }

    fn enable_power_up(&mut self, power: PowerUp) {
        match power {
            PowerUp::DoubleFire => self.player.double_fire = true,
            PowerUp::Shield { ticks } => {
                if self.player.captured || ticks == 0 {
                    return;
                }
                self.player.shield_ticks = ticks;
                self.effects
                    .retain(|effect| effect.kind != EffectKind::ShieldGlow);
                self.spawn_effect(EffectKind::ShieldGlow, self.player.position, ticks);
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResetSession => {
            world.clear_entities();
            world.player = Player::fresh();
            world.score = 0;
            world.status = SessionStatus::Playing;
            world.paused = false;
            world.wave = WaveRecord::empty(WaveIndex::FIRST);
            world.wave_tick = 0;
            out_events.push(Event::SessionReset);
        }
        Command::SpawnWave {
            wave,
            parameters,
            enemies,
        } => {
            world.spawn_wave(wave, parameters, &enemies);
            out_events.push(Event::WaveStarted {
                wave,
                enemies: world.wave.spawned,
            });
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.wave_tick = world.wave_tick.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
            if world.player.tick_timers() {
                world
                    .effects
                    .retain(|effect| effect.kind != EffectKind::ShieldGlow);
                out_events.push(Event::ShieldExpired);
            }
        }
        Command::SetPaused { paused } => {
            if world.paused != paused {
                world.paused = paused;
                out_events.push(Event::PauseChanged { paused });
            }
        }
        Command::SteerPlayer { steer } => world.player.steer(steer),
        Command::FirePlayer => world.fire_player(out_events),
        Command::ShiftFormation { dx } => {
            for enemy in world
                .enemies
                .iter_mut()
                .filter(|enemy| enemy.behavior.state() == EnemyState::InFormation)
            {
                enemy.slot.x += dx;
                enemy.position = enemy.slot;
            }
        }
        Command::ReverseFormation => {
            world.formation_direction = world.formation_direction.reversed();
        }
        Command::UpdateEnemy { enemy, motion } => world.update_enemy(enemy, motion, out_events),
        Command::SpawnEnemyBullet { origin, velocity } => {
            let id = world.allocate_bullet_id();
            world.enemy_bullets.push(Bullet {
                id,
                owner: BulletOwner::Enemy,
                position: origin,
                velocity,
            });
            out_events.push(Event::EnemyFired { origin });
        }
        Command::ActivateTractorBeam { owner } => world.activate_beam(owner, out_events),
        Command::DeactivateTractorBeam { owner } => world.close_beam(owner, out_events),
        Command::AdvanceEntities => world.advance_entities(out_events),
        Command::RemovePlayerBullet { bullet } => {
            world.player_bullets.retain(|candidate| candidate.id != bullet);
        }
        Command::RemoveEnemyBullet { bullet } => {
            world.enemy_bullets.retain(|candidate| candidate.id != bullet);
        }
        Command::DamageEnemy { enemy } => world.damage_enemy(enemy, out_events),
        Command::RemoveEnemy { enemy } => {
            let _ = world.remove_enemy(enemy, out_events);
        }
        Command::AwardScore { points } => world.award_score(points, out_events),
        Command::SpawnItem { kind, position } => {
            let item = world.allocate_item_id();
            world.items.push(Item {
                id: item,
                kind,
                position,
            });
            out_events.push(Event::ItemDropped { item, kind });
        }
        Command::CollectItem { item } => {
            if let Some(index) = world.items.iter().position(|candidate| candidate.id == item) {
                let collected = world.items.remove(index);
                out_events.push(Event::ItemCollected {
                    kind: collected.kind,
                });
            }
        }
        Command::SpawnEffect { kind, position } => {
            let lifetime = match kind {
                EffectKind::Explosion => EXPLOSION_TICKS,
                EffectKind::BombFlash => BOMB_FLASH_TICKS,
                EffectKind::ShieldGlow => world.player.shield_ticks,
            };
            world.spawn_effect(kind, position, lifetime);
        }
        Command::EnablePowerUp { power } => world.enable_power_up(power),
        Command::LoseLife => world.lose_life(out_events),
        Command::CapturePlayer => {
            let player = &mut world.player;
            if player.captured || player.shield_ticks > 0 {
                return;
            }
            player.captured = true;
            player.double_fire = false;
            player.velocity_x = 0.0;
            out_events.push(Event::PlayerCaptured);
        }
        Command::DriftPlayer { dy } => {
            if world.player.captured {
                world.player.position.y += dy;
            }
        }
        Command::RespawnPlayer => {
            let player = &mut world.player;
            player.position = squadron_core::arena::player_spawn_point();
            player.velocity_x = 0.0;
            player.captured = false;
            player.double_fire = false;
            out_events.push(Event::PlayerRespawned);
        }
        Command::MarkWaveCleared => {
            if world.status == SessionStatus::Playing && world.enemies.is_empty() {
                world.status = SessionStatus::WaveCleared;
                out_events.push(Event::WaveCleared {
                    wave: world.wave.index,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{WaveRecord, World};
    use squadron_core::{
        BeamSnapshot, BulletSnapshot, EffectSnapshot, EnemyView, FrameSnapshot, Hud,
        ItemSnapshot, PlayerSnapshot, SessionStatus, SwayDirection, WaveIndex,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of ticks simulated since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Number of ticks simulated since the current wave started.
    #[must_use]
    pub fn wave_tick(world: &World) -> u64 {
        world.wave_tick
    }

    /// Reports whether enemies must still hold formation and the player may not fire.
    #[must_use]
    pub fn in_startup_grace(world: &World) -> bool {
        world.in_startup_grace()
    }

    /// Index of the wave being fought.
    #[must_use]
    pub fn wave(world: &World) -> WaveIndex {
        world.wave.index
    }

    /// Details of the wave being fought.
    #[must_use]
    pub fn wave_record(world: &World) -> WaveRecord {
        world.wave
    }

    /// Coarse state of the session.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        world.status
    }

    /// Reports whether the simulation is frozen.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Score of the session.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Best score known to the session.
    #[must_use]
    pub fn high_score(world: &World) -> u64 {
        world.high_score
    }

    /// Direction the formation sways in.
    #[must_use]
    pub fn formation_direction(world: &World) -> SwayDirection {
        world.formation_direction
    }

    /// Captures the player ship.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a read-only view of the squadron.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .map(|enemy| {
                let beam_active = world.beams.iter().any(|beam| beam.owner == enemy.id);
                enemy.snapshot(beam_active)
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures the bullets fired by the player in firing order.
    #[must_use]
    pub fn player_bullets(world: &World) -> Vec<BulletSnapshot> {
        world.player_bullets.iter().map(|bullet| bullet.snapshot()).collect()
    }

    /// Captures the bullets fired by enemies in firing order.
    #[must_use]
    pub fn enemy_bullets(world: &World) -> Vec<BulletSnapshot> {
        world.enemy_bullets.iter().map(|bullet| bullet.snapshot()).collect()
    }

    /// Captures the falling items in drop order.
    #[must_use]
    pub fn items(world: &World) -> Vec<ItemSnapshot> {
        world.items.iter().map(|item| item.snapshot()).collect()
    }

    /// Captures the active tractor beams.
    #[must_use]
    pub fn beams(world: &World) -> Vec<BeamSnapshot> {
        world.beams.iter().map(|beam| beam.snapshot()).collect()
    }

    /// Captures the cosmetic effects.
    #[must_use]
    pub fn effects(world: &World) -> Vec<EffectSnapshot> {
        world.effects.iter().map(|effect| effect.snapshot()).collect()
    }

    /// Values shown by the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> Hud {
        Hud {
            score: world.score,
            high_score: world.high_score,
            lives: world.player.lives,
            wave: world.wave.index,
            status: world.status,
            paused: world.paused,
            startup_grace: world.in_startup_grace(),
        }
    }

    /// Captures everything the presentation layer draws for one frame.
    #[must_use]
    pub fn frame_snapshot(world: &World) -> FrameSnapshot {
        FrameSnapshot {
            hud: hud(world),
            player: player(world),
            enemies: enemy_view(world),
            player_bullets: player_bullets(world),
            enemy_bullets: enemy_bullets(world),
            items: items(world),
            beams: beams(world),
            effects: effects(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadron_core::{
        arena::{player_spawn_point, STARTING_LIVES, START_INVINCIBILITY_TICKS},
        DivePattern, DiveState, ItemKind, Steer,
    };

    fn seed(kind: EnemyKind, hp: u32, x: f32) -> EnemySeed {
        EnemySeed {
            kind,
            hp,
            score: 100,
            slot: Vec2::new(x, 56.0),
            position: Vec2::new(x, 56.0),
            dive_speed: 0.05,
            dive_cooldown: 500,
            tractor_cooldown: (kind == EnemyKind::Boss).then_some(600),
        }
    }

    fn world_with(enemies: Vec<EnemySeed>) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnWave {
                wave: WaveIndex::FIRST,
                parameters: WaveParameters {
                    columns: 8,
                    rows: 4,
                },
                enemies,
            },
            &mut events,
        );
        world
    }

    fn settle(world: &mut World, enemy: EnemyId) {
        let snapshot = *query::enemy_view(world)
            .get(enemy)
            .expect("enemy exists");
        let mut events = Vec::new();
        apply(
            world,
            Command::UpdateEnemy {
                enemy,
                motion: snapshot.motion(EnemyBehavior::InFormation, snapshot.slot),
            },
            &mut events,
        );
    }

    fn skip_grace(world: &mut World) {
        let mut events = Vec::new();
        for _ in 0..STARTUP_GRACE_TICKS {
            apply(world, Command::Tick, &mut events);
        }
    }

    #[test]
    fn spawn_wave_replaces_previous_entities() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnItem {
                kind: ItemKind::Score,
                position: Vec2::new(50.0, 50.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnWave {
                wave: WaveIndex::new(2),
                parameters: WaveParameters {
                    columns: 9,
                    rows: 5,
                },
                enemies: vec![
                    seed(EnemyKind::Boss, 3, 46.0),
                    seed(EnemyKind::Mid, 2, 81.0),
                ],
            },
            &mut events,
        );

        assert!(query::items(&world).is_empty());
        assert_eq!(query::enemy_view(&world).len(), 2);
        assert_eq!(query::wave_record(&world).spawned(), 2);
        assert_eq!(query::wave(&world), WaveIndex::new(2));
        assert!(events.contains(&Event::WaveStarted {
            wave: WaveIndex::new(2),
            enemies: 2,
        }));
        assert!(query::enemy_view(&world)
            .iter()
            .all(|enemy| enemy.state() == EnemyState::Entrance));
    }

    #[test]
    fn next_wave_restores_a_full_ship() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(&mut world, Command::LoseLife, &mut events);
        apply(
            &mut world,
            Command::EnablePowerUp {
                power: PowerUp::DoubleFire,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::EnablePowerUp {
                power: PowerUp::Shield { ticks: 240 },
            },
            &mut events,
        );
        apply(&mut world, Command::SteerPlayer { steer: Steer::Left }, &mut events);
        assert_eq!(query::player(&world).lives, 2);

        apply(
            &mut world,
            Command::SpawnWave {
                wave: WaveIndex::new(2),
                parameters: WaveParameters {
                    columns: 1,
                    rows: 1,
                },
                enemies: vec![seed(EnemyKind::Basic, 1, 100.0)],
            },
            &mut events,
        );

        let player = query::player(&world);
        assert_eq!(player.lives, STARTING_LIVES);
        assert!(!player.double_fire);
        assert_eq!(player.shield_ticks, 0);
        assert_eq!(player.position, player_spawn_point());
        assert_eq!(player.invincibility_ticks, START_INVINCIBILITY_TICKS);
    }

    #[test]
    fn killing_blow_awards_score_and_explosion() {
        let mut world = world_with(vec![seed(EnemyKind::Mid, 2, 100.0)]);
        let enemy = query::enemy_view(&world).iter().next().expect("enemy").id;
        let mut events = Vec::new();

        apply(&mut world, Command::DamageEnemy { enemy }, &mut events);
        assert_eq!(
            events,
            vec![Event::EnemyDamaged {
                enemy,
                remaining_hp: 1,
            }]
        );
        assert_eq!(query::score(&world), 0);

        events.clear();
        apply(&mut world, Command::DamageEnemy { enemy }, &mut events);
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::score(&world), 100);
        assert!(events.contains(&Event::ScoreChanged { score: 100 }));
        assert!(events.contains(&Event::HighScoreBeaten { score: 100 }));
        assert!(query::effects(&world)
            .iter()
            .any(|effect| effect.kind == EffectKind::Explosion));
    }

    #[test]
    fn high_score_is_only_reported_when_exceeded() {
        let mut world = World::new().with_high_score(1_000);
        let mut events = Vec::new();
        apply(&mut world, Command::AwardScore { points: 300 }, &mut events);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::HighScoreBeaten { .. })));
        apply(&mut world, Command::AwardScore { points: 800 }, &mut events);
        assert!(events.contains(&Event::HighScoreBeaten { score: 1_100 }));
        assert_eq!(query::high_score(&world), 1_100);
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(&mut world, Command::LoseLife, &mut events);
        assert_eq!(query::player(&world).lives, 2);
        assert_eq!(
            query::player(&world).invincibility_ticks,
            HIT_INVINCIBILITY_TICKS
        );
        apply(&mut world, Command::LoseLife, &mut events);
        apply(&mut world, Command::LoseLife, &mut events);
        apply(&mut world, Command::LoseLife, &mut events);

        assert_eq!(query::player(&world).lives, 0);
        assert_eq!(query::status(&world), SessionStatus::GameOver);
        let hits = events
            .iter()
            .filter(|event| matches!(event, Event::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 3);
        assert!(events.contains(&Event::GameOver { score: 0 }));
    }

    #[test]
    fn firing_waits_for_grace_and_cooldown() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(&mut world, Command::FirePlayer, &mut events);
        assert!(query::player_bullets(&world).is_empty());

        skip_grace(&mut world);
        apply(&mut world, Command::FirePlayer, &mut events);
        apply(&mut world, Command::FirePlayer, &mut events);
        assert_eq!(query::player_bullets(&world).len(), 1);
        assert_eq!(
            query::player(&world).fire_cooldown,
            FIRE_COOLDOWN_TICKS
        );

        for _ in 0..FIRE_COOLDOWN_TICKS {
            apply(&mut world, Command::Tick, &mut events);
        }
        apply(
            &mut world,
            Command::EnablePowerUp {
                power: PowerUp::DoubleFire,
            },
            &mut events,
        );
        apply(&mut world, Command::FirePlayer, &mut events);
        let bullets = query::player_bullets(&world);
        assert_eq!(bullets.len(), 3);
        let spawn_x = player_spawn_point().x;
        assert_eq!(bullets[1].position.x, spawn_x - DOUBLE_FIRE_OFFSET);
        assert_eq!(bullets[2].position.x, spawn_x + DOUBLE_FIRE_OFFSET);
        assert!(events.contains(&Event::PlayerFired { bullets: 2 }));
    }

    #[test]
    fn shift_moves_only_in_formation_slots() {
        let mut world = world_with(vec![
            seed(EnemyKind::Basic, 1, 100.0),
            seed(EnemyKind::Basic, 1, 135.0),
        ]);
        let ids: Vec<EnemyId> = query::enemy_view(&world).iter().map(|e| e.id).collect();
        settle(&mut world, ids[0]);

        let mut events = Vec::new();
        apply(&mut world, Command::ShiftFormation { dx: 2.0 }, &mut events);
        let view = query::enemy_view(&world);
        let settled = view.get(ids[0]).expect("first");
        let entering = view.get(ids[1]).expect("second");
        assert_eq!(settled.slot.x, 102.0);
        assert_eq!(settled.position.x, 102.0);
        assert_eq!(entering.slot.x, 135.0);
    }

    #[test]
    fn dive_and_regroup_are_announced() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let enemy = query::enemy_view(&world).iter().next().expect("enemy").id;
        settle(&mut world, enemy);
        let snapshot = *query::enemy_view(&world).get(enemy).expect("enemy");
        let mut events = Vec::new();

        let dive = EnemyBehavior::Diving(DiveState {
            pattern: DivePattern::Zigzag,
            center: snapshot.position,
            elapsed: 0.0,
        });
        apply(
            &mut world,
            Command::UpdateEnemy {
                enemy,
                motion: snapshot.motion(dive, snapshot.position),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::UpdateEnemy {
                enemy,
                motion: snapshot.motion(EnemyBehavior::Returning, snapshot.position),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::UpdateEnemy {
                enemy,
                motion: EnemyMotion {
                    behavior: EnemyBehavior::InFormation,
                    position: snapshot.slot,
                    dive_cooldown: 321,
                    tractor_cooldown: None,
                },
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::EnemyDove {
                    enemy,
                    pattern: DivePattern::Zigzag,
                },
                Event::EnemyRegrouped { enemy },
            ]
        );
        assert_eq!(
            query::enemy_view(&world).get(enemy).expect("enemy").dive_cooldown,
            321
        );
    }

    #[test]
    fn beam_requires_settled_boss_and_expires() {
        let mut world = world_with(vec![
            seed(EnemyKind::Boss, 3, 100.0),
            seed(EnemyKind::Mid, 2, 135.0),
        ]);
        let ids: Vec<EnemyId> = query::enemy_view(&world).iter().map(|e| e.id).collect();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::ActivateTractorBeam { owner: ids[0] },
            &mut events,
        );
        assert!(query::beams(&world).is_empty(), "entering boss has no beam");

        settle(&mut world, ids[0]);
        settle(&mut world, ids[1]);
        apply(
            &mut world,
            Command::ActivateTractorBeam { owner: ids[1] },
            &mut events,
        );
        assert!(query::beams(&world).is_empty(), "mids never project beams");

        apply(
            &mut world,
            Command::ActivateTractorBeam { owner: ids[0] },
            &mut events,
        );
        assert_eq!(query::beams(&world).len(), 1);
        assert!(query::enemy_view(&world).get(ids[0]).expect("boss").beam_active);

        for _ in 0..TRACTOR_BEAM_TICKS {
            apply(&mut world, Command::AdvanceEntities, &mut events);
        }
        assert!(query::beams(&world).is_empty());
        assert!(events.contains(&Event::TractorBeamDeactivated { owner: ids[0] }));
    }

    #[test]
    fn beam_closes_when_owner_dies() {
        let mut world = world_with(vec![seed(EnemyKind::Boss, 1, 100.0)]);
        let boss = query::enemy_view(&world).iter().next().expect("boss").id;
        settle(&mut world, boss);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ActivateTractorBeam { owner: boss },
            &mut events,
        );
        apply(&mut world, Command::DamageEnemy { enemy: boss }, &mut events);
        assert!(query::beams(&world).is_empty());
        assert!(events.contains(&Event::TractorBeamDeactivated { owner: boss }));
    }

    #[test]
    fn bullets_leave_through_their_edge() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemyBullet {
                origin: Vec2::new(100.0, PLAYFIELD_HEIGHT - 2.0),
                velocity: Vec2::new(0.0, 6.0),
            },
            &mut events,
        );
        apply(&mut world, Command::AdvanceEntities, &mut events);
        assert_eq!(query::enemy_bullets(&world).len(), 1);
        apply(&mut world, Command::AdvanceEntities, &mut events);
        apply(&mut world, Command::AdvanceEntities, &mut events);
        assert!(query::enemy_bullets(&world).is_empty());
    }

    #[test]
    fn shield_expires_with_its_glow() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::EnablePowerUp {
                power: PowerUp::Shield { ticks: 3 },
            },
            &mut events,
        );
        assert!(query::player(&world).is_shielded());
        for _ in 0..3 {
            apply(&mut world, Command::Tick, &mut events);
        }
        assert!(!query::player(&world).is_shielded());
        assert!(events.contains(&Event::ShieldExpired));
        assert!(query::effects(&world)
            .iter()
            .all(|effect| effect.kind != EffectKind::ShieldGlow));
    }

    #[test]
    fn capture_is_blocked_by_shield() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::EnablePowerUp {
                power: PowerUp::Shield { ticks: 30 },
            },
            &mut events,
        );
        apply(&mut world, Command::CapturePlayer, &mut events);
        assert!(!query::player(&world).captured);
    }

    #[test]
    fn capture_clears_double_fire_and_respawn_restores_position() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::EnablePowerUp {
                power: PowerUp::DoubleFire,
            },
            &mut events,
        );
        apply(&mut world, Command::CapturePlayer, &mut events);
        apply(
            &mut world,
            Command::SteerPlayer { steer: Steer::Left },
            &mut events,
        );
        apply(&mut world, Command::DriftPlayer { dy: -3.0 }, &mut events);

        let captured = query::player(&world);
        assert!(captured.captured);
        assert!(!captured.double_fire);
        assert_eq!(captured.position.x, player_spawn_point().x);
        assert_eq!(captured.position.y, player_spawn_point().y - 3.0);

        apply(&mut world, Command::RespawnPlayer, &mut events);
        let respawned = query::player(&world);
        assert!(!respawned.captured);
        assert_eq!(respawned.position, player_spawn_point());
    }

    #[test]
    fn wave_clear_requires_empty_squadron() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let enemy = query::enemy_view(&world).iter().next().expect("enemy").id;
        let mut events = Vec::new();
        apply(&mut world, Command::MarkWaveCleared, &mut events);
        assert_eq!(query::status(&world), SessionStatus::Playing);

        apply(&mut world, Command::RemoveEnemy { enemy }, &mut events);
        apply(&mut world, Command::MarkWaveCleared, &mut events);
        assert_eq!(query::status(&world), SessionStatus::WaveCleared);
        assert_eq!(query::score(&world), 0);
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut world = world_with(vec![seed(EnemyKind::Basic, 1, 100.0)]);
        let mut events = Vec::new();
        apply(&mut world, Command::AwardScore { points: 500 }, &mut events);
        apply(&mut world, Command::LoseLife, &mut events);
        apply(&mut world, Command::ResetSession, &mut events);

        let hud = query::hud(&world);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.high_score, 500);
        assert_eq!(hud.lives, 3);
        assert_eq!(
            query::player(&world).invincibility_ticks,
            START_INVINCIBILITY_TICKS
        );
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn pause_changes_are_reported_once() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        assert_eq!(events, vec![Event::PauseChanged { paused: true }]);
        assert!(query::is_paused(&world));
    }
}
