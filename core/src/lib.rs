#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Squadron engine.
//!
//! This crate defines the message surface that connects the simulation
//! driver, the authoritative world, and pure systems. Systems read immutable
//! snapshots, decide what should happen, and describe it as [`Command`]
//! values. The world executes those commands via its `apply` entry point and
//! broadcasts [`Event`] values describing what actually changed. Events double
//! as presentation requests: the audio collaborator maps them through
//! [`Event::sound_cue`] and the persistence collaborator watches for
//! [`Event::HighScoreBeaten`].

pub mod arena;
pub mod config;
pub mod policy;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::{Rect, BEAM_WIDTH, BULLET_SIZE, ENEMY_SIZE, ITEM_SIZE, PLAYER_SIZE};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Squadron.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Restores a fresh player, clears every entity and zeroes the score.
    ResetSession,
    /// Replaces the current squadron and every transient entity with a new wave.
    SpawnWave {
        /// Index of the wave being started.
        wave: WaveIndex,
        /// Difficulty-derived dimensions used to build the squadron.
        parameters: WaveParameters,
        /// Enemies composing the squadron, in spawn order.
        enemies: Vec<EnemySeed>,
    },
    /// Advances the simulation clock by one step and counts down player timers.
    Tick,
    /// Freezes or resumes the simulation.
    SetPaused {
        /// Whether the session should be paused afterwards.
        paused: bool,
    },
    /// Applies the horizontal steering intent for this tick.
    SteerPlayer {
        /// Requested steering direction.
        steer: Steer,
    },
    /// Fires a player volley if the weapon has cooled down.
    FirePlayer,
    /// Moves every in-formation slot horizontally.
    ShiftFormation {
        /// Signed horizontal displacement applied to each slot.
        dx: f32,
    },
    /// Flips the shared sway direction without moving.
    ReverseFormation,
    /// Stores the outcome of one enemy behavior step.
    UpdateEnemy {
        /// Enemy being updated.
        enemy: EnemyId,
        /// New behavior, position and timers.
        motion: EnemyMotion,
    },
    /// Launches a bullet from an enemy.
    SpawnEnemyBullet {
        /// Center of the bullet at launch.
        origin: Vec2,
        /// Displacement per tick.
        velocity: Vec2,
    },
    /// Opens a tractor beam below the provided Boss.
    ActivateTractorBeam {
        /// Boss projecting the beam.
        owner: EnemyId,
    },
    /// Closes the tractor beam owned by the provided Boss, if any.
    DeactivateTractorBeam {
        /// Boss whose beam should close.
        owner: EnemyId,
    },
    /// Moves bullets and items, ages effects and beams, and drops expired entities.
    AdvanceEntities,
    /// Removes a player bullet that hit something.
    RemovePlayerBullet {
        /// Bullet to remove.
        bullet: BulletId,
    },
    /// Removes an enemy bullet that hit something.
    RemoveEnemyBullet {
        /// Bullet to remove.
        bullet: BulletId,
    },
    /// Deals one point of damage; a kill awards score and spawns an explosion.
    DamageEnemy {
        /// Enemy receiving the damage.
        enemy: EnemyId,
    },
    /// Removes an enemy without awarding score.
    RemoveEnemy {
        /// Enemy to remove.
        enemy: EnemyId,
    },
    /// Adds points to the session score.
    AwardScore {
        /// Points to add.
        points: u32,
    },
    /// Drops a falling item.
    SpawnItem {
        /// Kind of item dropped.
        kind: ItemKind,
        /// Center of the item at launch.
        position: Vec2,
    },
    /// Consumes an item touched by the player.
    CollectItem {
        /// Item being collected.
        item: ItemId,
    },
    /// Spawns a cosmetic effect.
    SpawnEffect {
        /// Kind of effect.
        kind: EffectKind,
        /// Center of the effect.
        position: Vec2,
    },
    /// Grants a power-up to the player.
    EnablePowerUp {
        /// Power-up being granted.
        power: PowerUp,
    },
    /// Removes one life, spawns an explosion and either grants grace or ends the game.
    LoseLife,
    /// Locks the player inside a tractor beam.
    CapturePlayer,
    /// Moves the player vertically while captured.
    DriftPlayer {
        /// Signed vertical displacement.
        dy: f32,
    },
    /// Returns the player to the spawn point with capture and double fire cleared.
    RespawnPlayer,
    /// Marks the current wave as cleared.
    MarkWaveCleared,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A fresh session replaced the previous one.
    SessionReset,
    /// A new squadron entered the playfield.
    WaveStarted {
        /// Index of the wave.
        wave: WaveIndex,
        /// Number of enemies spawned.
        enemies: u32,
    },
    /// The simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// The session was paused or resumed.
    PauseChanged {
        /// Whether the session is paused now.
        paused: bool,
    },
    /// The player fired a volley.
    PlayerFired {
        /// Number of bullets in the volley.
        bullets: u32,
    },
    /// An enemy fired a bullet.
    EnemyFired {
        /// Center of the bullet at launch.
        origin: Vec2,
    },
    /// An enemy left formation for a dive.
    EnemyDove {
        /// Enemy that dove.
        enemy: EnemyId,
        /// Path the dive follows.
        pattern: DivePattern,
    },
    /// An enemy rejoined the formation after a dive.
    EnemyRegrouped {
        /// Enemy that regrouped.
        enemy: EnemyId,
    },
    /// An enemy lost hit points but survived.
    EnemyDamaged {
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Hit points left.
        remaining_hp: u32,
    },
    /// An enemy was destroyed by the player.
    EnemyDestroyed {
        /// Enemy that was destroyed.
        enemy: EnemyId,
        /// Kind of the destroyed enemy.
        kind: EnemyKind,
        /// Center of the enemy when destroyed.
        position: Vec2,
        /// Points awarded for the kill.
        score: u32,
    },
    /// A Boss opened its tractor beam.
    TractorBeamActivated {
        /// Boss projecting the beam.
        owner: EnemyId,
    },
    /// A tractor beam closed.
    TractorBeamDeactivated {
        /// Boss that owned the beam.
        owner: EnemyId,
    },
    /// An item started falling.
    ItemDropped {
        /// Identifier allocated to the item.
        item: ItemId,
        /// Kind of item.
        kind: ItemKind,
    },
    /// The player picked up an item.
    ItemCollected {
        /// Kind of the collected item.
        kind: ItemKind,
    },
    /// The player's shield ran out.
    ShieldExpired,
    /// The session score changed.
    ScoreChanged {
        /// New total score.
        score: u64,
    },
    /// The session score exceeded the best known score.
    HighScoreBeaten {
        /// New best score.
        score: u64,
    },
    /// The player lost a life.
    PlayerHit {
        /// Lives left after the hit.
        lives_remaining: u32,
    },
    /// A tractor beam captured the player.
    PlayerCaptured,
    /// The player returned to the spawn point.
    PlayerRespawned,
    /// The last life was lost.
    GameOver {
        /// Final score of the session.
        score: u64,
    },
    /// Every enemy of the wave was destroyed.
    WaveCleared {
        /// Index of the cleared wave.
        wave: WaveIndex,
    },
}

impl Event {
    /// Sound the audio collaborator should play for this event, if any.
    #[must_use]
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::PlayerFired { .. } => Some(SoundCue::Shoot),
            Self::EnemyDestroyed { .. } => Some(SoundCue::Explosion),
            Self::ItemCollected {
                kind: ItemKind::Bomb,
            } => Some(SoundCue::Bomb),
            Self::ItemCollected { .. } => Some(SoundCue::Item),
            Self::GameOver { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}

/// Sounds the engine requests from the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The player fired.
    Shoot,
    /// An enemy exploded.
    Explosion,
    /// An item was collected.
    Item,
    /// A bomb went off.
    Bomb,
    /// The game ended.
    GameOver,
}

/// One-based index of a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveIndex(u32);

impl WaveIndex {
    /// The opening wave.
    pub const FIRST: Self = Self(1);

    /// Creates a wave index, raising zero to the first wave.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index of the following wave.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bullet of either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a falling item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Enemy archetypes composing a squadron.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Rank-and-file enemy filling every row below the first.
    Basic,
    /// Escort sharing the first row with the Bosses.
    Mid,
    /// Commander able to project a tractor beam.
    Boss,
}

/// Behavior tag of an enemy, without per-state data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyState {
    /// Descending into its formation slot.
    Entrance,
    /// Holding its slot and swaying with the formation.
    InFormation,
    /// Following a scripted dive path.
    Diving,
    /// Flying back to its slot.
    Returning,
}

/// Parametric dive paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DivePattern {
    /// Circular arc around the dive center.
    Curve,
    /// Horizontal sine sweep with a linear descent.
    Zigzag,
    /// Arc with an outward-growing radius.
    Spiral,
}

/// Progress of an ongoing dive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiveState {
    /// Path being followed.
    pub pattern: DivePattern,
    /// Position the path is anchored at.
    pub center: Vec2,
    /// Path time accumulated since the dive started.
    pub elapsed: f32,
}

/// Complete behavior state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyBehavior {
    /// Descending into its formation slot.
    Entrance,
    /// Holding its slot and swaying with the formation.
    InFormation,
    /// Following a scripted dive path.
    Diving(DiveState),
    /// Flying back to its slot.
    Returning,
}

impl EnemyBehavior {
    /// Tag of the behavior.
    #[must_use]
    pub const fn state(&self) -> EnemyState {
        match self {
            Self::Entrance => EnemyState::Entrance,
            Self::InFormation => EnemyState::InFormation,
            Self::Diving(_) => EnemyState::Diving,
            Self::Returning => EnemyState::Returning,
        }
    }
}

/// Outcome of one behavior step for a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyMotion {
    /// Behavior after the step.
    pub behavior: EnemyBehavior,
    /// Center after the step.
    pub position: Vec2,
    /// Ticks left before the enemy may dive.
    pub dive_cooldown: u32,
    /// Ticks left before a Boss may open its beam; `None` for other kinds.
    pub tractor_cooldown: Option<u32>,
}

/// Blueprint of an enemy produced by wave generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySeed {
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Starting hit points.
    pub hp: u32,
    /// Points awarded when destroyed.
    pub score: u32,
    /// Formation slot center.
    pub slot: Vec2,
    /// Center at spawn time.
    pub position: Vec2,
    /// Dive time advanced per tick.
    pub dive_speed: f32,
    /// Initial dive cooldown in ticks.
    pub dive_cooldown: u32,
    /// Initial tractor cooldown for Bosses.
    pub tractor_cooldown: Option<u32>,
}

/// Difficulty-derived dimensions of a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaveParameters {
    /// Formation columns.
    pub columns: u32,
    /// Formation rows.
    pub rows: u32,
}

/// Items enemies may drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Fires two bullets per volley.
    DoubleFire,
    /// Temporary protection against contact.
    Shield,
    /// Probabilistic damage to every on-screen enemy.
    Bomb,
    /// Flat score bonus.
    Score,
}

/// Power-ups the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUp {
    /// Two bullets per volley until captured.
    DoubleFire,
    /// Contact protection for a number of ticks.
    Shield {
        /// Duration of the shield.
        ticks: u32,
    },
}

/// Cosmetic effects handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Short burst where something blew up.
    Explosion,
    /// Glow around the shielded player.
    ShieldGlow,
    /// Full-screen flash of a bomb.
    BombFlash,
}

/// Side that fired a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletOwner {
    /// Fired upwards by the player.
    Player,
    /// Fired downwards by an enemy.
    Enemy,
}

/// Horizontal steering intent of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Steer {
    /// No horizontal movement.
    #[default]
    Idle,
    /// Move towards decreasing x.
    Left,
    /// Move towards increasing x.
    Right,
}

impl Steer {
    /// Horizontal velocity produced by the intent.
    #[must_use]
    pub fn velocity(self, speed: f32) -> f32 {
        match self {
            Self::Idle => 0.0,
            Self::Left => -speed,
            Self::Right => speed,
        }
    }
}

/// Shared sway direction of the formation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwayDirection {
    /// Slots move towards decreasing x.
    Left,
    /// Slots move towards increasing x.
    #[default]
    Right,
}

impl SwayDirection {
    /// Sign applied to the sway step.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Coarse state of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// The wave is being fought.
    #[default]
    Playing,
    /// Every enemy of the wave was destroyed; waiting for the next wave.
    WaveCleared,
    /// The player ran out of lives.
    GameOver,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Center of the ship.
    pub position: Vec2,
    /// Horizontal velocity applied during the last tick.
    pub velocity_x: f32,
    /// Lives left.
    pub lives: u32,
    /// Ticks until the weapon may fire again.
    pub fire_cooldown: u32,
    /// Ticks of invincibility left.
    pub invincibility_ticks: u32,
    /// Ticks of shield left.
    pub shield_ticks: u32,
    /// Whether volleys fire two bullets.
    pub double_fire: bool,
    /// Whether a tractor beam holds the ship.
    pub captured: bool,
}

impl PlayerSnapshot {
    /// Collision bounds of the ship.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, PLAYER_SIZE)
    }

    /// Whether a post-hit or start-of-wave grace window is active.
    #[must_use]
    pub const fn is_invincible(&self) -> bool {
        self.invincibility_ticks > 0
    }

    /// Whether a shield protects the ship.
    #[must_use]
    pub const fn is_shielded(&self) -> bool {
        self.shield_ticks > 0
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Hit points left.
    pub hp: u32,
    /// Points awarded when destroyed.
    pub score: u32,
    /// Formation slot center.
    pub slot: Vec2,
    /// Current center.
    pub position: Vec2,
    /// Current behavior.
    pub behavior: EnemyBehavior,
    /// Dive time advanced per tick.
    pub dive_speed: f32,
    /// Ticks left before the enemy may dive.
    pub dive_cooldown: u32,
    /// Ticks left before a Boss may open its beam.
    pub tractor_cooldown: Option<u32>,
    /// Whether the enemy currently projects a tractor beam.
    pub beam_active: bool,
}

impl EnemySnapshot {
    /// Behavior tag of the enemy.
    #[must_use]
    pub const fn state(&self) -> EnemyState {
        self.behavior.state()
    }

    /// Collision bounds of the enemy.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, ENEMY_SIZE)
    }

    /// Timers carried over unchanged into a motion at `position`.
    #[must_use]
    pub const fn motion(&self, behavior: EnemyBehavior, position: Vec2) -> EnemyMotion {
        EnemyMotion {
            behavior,
            position,
            dive_cooldown: self.dive_cooldown,
            tractor_cooldown: self.tractor_cooldown,
        }
    }
}

/// Read-only snapshot describing every enemy of the squadron.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the squadron is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a bullet used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier assigned to the bullet.
    pub id: BulletId,
    /// Side that fired the bullet.
    pub owner: BulletOwner,
    /// Current center.
    pub position: Vec2,
    /// Displacement per tick.
    pub velocity: Vec2,
}

impl BulletSnapshot {
    /// Collision bounds of the bullet.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, BULLET_SIZE)
    }
}

/// Immutable representation of a falling item used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSnapshot {
    /// Unique identifier assigned to the item.
    pub id: ItemId,
    /// Kind of item.
    pub kind: ItemKind,
    /// Current center.
    pub position: Vec2,
}

impl ItemSnapshot {
    /// Collision bounds of the item.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, ITEM_SIZE)
    }
}

/// Immutable representation of an active tractor beam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamSnapshot {
    /// Boss projecting the beam.
    pub owner: EnemyId,
    /// Column the beam is centered on.
    pub column_x: f32,
    /// Top edge of the beam, at the owner's lower edge.
    pub top: f32,
    /// Ticks before the beam closes on its own.
    pub remaining_ticks: u32,
}

impl BeamSnapshot {
    /// Collision bounds of the beam, extending down the playfield.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_top(
            self.column_x,
            self.top,
            Vec2::new(BEAM_WIDTH, arena::PLAYFIELD_HEIGHT),
        )
    }
}

/// Immutable representation of a cosmetic effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSnapshot {
    /// Kind of effect.
    pub kind: EffectKind,
    /// Center of the effect.
    pub position: Vec2,
    /// Ticks before the effect disappears.
    pub remaining_ticks: u32,
}

/// Values shown by the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Session score.
    pub score: u64,
    /// Best score known to the session.
    pub high_score: u64,
    /// Lives left.
    pub lives: u32,
    /// Wave being fought.
    pub wave: WaveIndex,
    /// Coarse session state.
    pub status: SessionStatus,
    /// Whether the simulation is frozen.
    pub paused: bool,
    /// Whether the wave's startup grace period is running.
    pub startup_grace: bool,
}

/// Stable snapshot of everything the presentation layer draws.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Heads-up display values.
    pub hud: Hud,
    /// Player ship.
    pub player: PlayerSnapshot,
    /// Squadron.
    pub enemies: EnemyView,
    /// Bullets fired by the player.
    pub player_bullets: Vec<BulletSnapshot>,
    /// Bullets fired by enemies.
    pub enemy_bullets: Vec<BulletSnapshot>,
    /// Falling items.
    pub items: Vec<ItemSnapshot>,
    /// Active tractor beams.
    pub beams: Vec<BeamSnapshot>,
    /// Cosmetic effects.
    pub effects: Vec<EffectSnapshot>,
}
