//! Playfield geometry, fixed timings and entity extents.
//!
//! Every duration is counted in simulation ticks. The engine assumes
//! [`TICKS_PER_SECOND`] ticks per second of game time, so a value of `180`
//! corresponds to three seconds.

use glam::Vec2;

/// Number of fixed simulation steps per second of game time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Width of the playfield in world units.
pub const PLAYFIELD_WIDTH: f32 = 480.0;
/// Height of the playfield in world units. The y axis grows downwards.
pub const PLAYFIELD_HEIGHT: f32 = 640.0;

/// Leftmost slot x any in-formation enemy may occupy.
pub const FORMATION_LEFT: f32 = 40.0;
/// Rightmost slot x any in-formation enemy may occupy.
pub const FORMATION_RIGHT: f32 = PLAYFIELD_WIDTH - 40.0;
/// Horizontal distance covered by one formation sway step.
pub const SWAY_STEP: f32 = 2.0;
/// Slot x of the first formation column.
pub const FORMATION_ORIGIN_X: f32 = 46.0;
/// Slot y of the first formation row.
pub const FORMATION_ORIGIN_Y: f32 = 56.0;
/// Horizontal spacing between formation columns.
pub const FORMATION_COLUMN_SPACING: f32 = 35.0;
/// Vertical spacing between formation rows.
pub const FORMATION_ROW_SPACING: f32 = 32.0;
/// Height above the playfield at which entering enemies appear.
pub const ENTRANCE_SPAWN_Y: f32 = -24.0;
/// Vertical distance covered per tick while entering.
pub const ENTRANCE_SPEED: f32 = 4.0;

/// Lowest y a diving enemy's path may reach.
pub const SAFETY_LINE: f32 = PLAYFIELD_HEIGHT - 150.0;
/// Top of the horizontal band reserved for the player ship.
pub const PLAYER_BAND_TOP: f32 = PLAYFIELD_HEIGHT - 120.0;
/// Distance beyond the playfield edges an enemy may travel before it aborts a dive.
pub const EXIT_MARGIN: f32 = 50.0;
/// Longest dive, measured in path time units.
pub const MAX_DIVE_TIME: f32 = 12.0;
/// Smallest advance of dive time per tick.
pub const MIN_DIVE_STEP: f32 = 0.01;
/// Largest advance of dive time per tick.
pub const MAX_DIVE_STEP: f32 = 0.08;
/// Distance covered per tick while returning to formation.
pub const RETURN_SPEED: f32 = 5.0;
/// Climb per tick while detouring around the player band.
pub const RETURN_CLIMB: f32 = 7.0;
/// Distance from the side walls used as the detour column.
pub const EDGE_INSET: f32 = 20.0;

/// Ticks after a wave starts during which enemies hold formation and the player cannot fire.
pub const STARTUP_GRACE_TICKS: u64 = 180;
/// Invincibility granted when a game or wave starts.
pub const START_INVINCIBILITY_TICKS: u32 = 300;
/// Invincibility granted after losing a life.
pub const HIT_INVINCIBILITY_TICKS: u32 = 180;
/// Minimum ticks between two player volleys.
pub const FIRE_COOLDOWN_TICKS: u32 = 15;
/// Lifetime of an activated tractor beam.
pub const TRACTOR_BEAM_TICKS: u32 = 120;
/// Lifetime of an explosion effect.
pub const EXPLOSION_TICKS: u32 = 10;
/// Lifetime of the full-screen bomb flash.
pub const BOMB_FLASH_TICKS: u32 = 30;

/// Lives a fresh player starts with.
pub const STARTING_LIVES: u32 = 3;
/// Horizontal player speed per tick while steering.
pub const PLAYER_SPEED: f32 = 5.0;
/// Upward drift per tick while the player is captured.
pub const CAPTURE_DRIFT: f32 = 3.0;
/// Horizontal offset of each bullet of a double-fire volley.
pub const DOUBLE_FIRE_OFFSET: f32 = 8.0;
/// Vertical speed of player bullets (negative is upwards).
pub const PLAYER_BULLET_SPEED: f32 = -10.0;
/// Vertical speed of falling items.
pub const ITEM_FALL_SPEED: f32 = 3.0;

/// Extent of the player ship.
pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
/// Extent of every enemy.
pub const ENEMY_SIZE: Vec2 = Vec2::new(32.0, 32.0);
/// Extent of bullets fired by either side.
pub const BULLET_SIZE: Vec2 = Vec2::new(4.0, 12.0);
/// Extent of falling items.
pub const ITEM_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// Width of a tractor beam column.
pub const BEAM_WIDTH: f32 = 20.0;

/// Center of the player ship when it (re)spawns.
#[must_use]
pub fn player_spawn_point() -> Vec2 {
    Vec2::new(
        PLAYFIELD_WIDTH / 2.0,
        PLAYFIELD_HEIGHT - 10.0 - PLAYER_SIZE.y / 2.0,
    )
}

/// Axis-aligned rectangle described by its center and full size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    center: Vec2,
    size: Vec2,
}

impl Rect {
    /// Creates a rectangle centered on `center` spanning `size`.
    #[must_use]
    pub const fn from_center(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Creates a rectangle whose top edge is at `top`, centered on `center_x`.
    #[must_use]
    pub fn from_top(center_x: f32, top: f32, size: Vec2) -> Self {
        Self {
            center: Vec2::new(center_x, top + size.y / 2.0),
            size,
        }
    }

    /// Center of the rectangle.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Smallest x covered by the rectangle.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    /// Largest x covered by the rectangle.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    /// Smallest y covered by the rectangle.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    /// Largest y covered by the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Reports whether the two rectangles share any interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Reports whether a point lies inside the visible playfield, edges included.
#[must_use]
pub fn on_screen(point: Vec2) -> bool {
    (0.0..=PLAYFIELD_WIDTH).contains(&point.x) && (0.0..=PLAYFIELD_HEIGHT).contains(&point.y)
}
