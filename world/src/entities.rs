//! Enemies, projectiles and cosmetic entities stored inside the world.

use glam::Vec2;
use squadron_core::{
    arena::{Rect, ENEMY_SIZE},
    BeamSnapshot, BulletId, BulletOwner, BulletSnapshot, EffectKind, EffectSnapshot, EnemyBehavior,
    EnemyId, EnemyKind, EnemyMotion, EnemySeed, EnemySnapshot, ItemId, ItemKind, ItemSnapshot,
};

/// Member of the squadron.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) hp: u32,
    pub(crate) score: u32,
    pub(crate) slot: Vec2,
    pub(crate) position: Vec2,
    pub(crate) behavior: EnemyBehavior,
    pub(crate) dive_speed: f32,
    pub(crate) dive_cooldown: u32,
    pub(crate) tractor_cooldown: Option<u32>,
}

impl Enemy {
    pub(crate) fn from_seed(id: EnemyId, seed: &EnemySeed) -> Self {
        Self {
            id,
            kind: seed.kind,
            hp: seed.hp.max(1),
            score: seed.score,
            slot: seed.slot,
            position: seed.position,
            behavior: EnemyBehavior::Entrance,
            dive_speed: seed.dive_speed,
            dive_cooldown: seed.dive_cooldown,
            tractor_cooldown: match seed.kind {
                EnemyKind::Boss => Some(seed.tractor_cooldown.unwrap_or(0)),
                EnemyKind::Basic | EnemyKind::Mid => None,
            },
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::from_center(self.position, ENEMY_SIZE)
    }

    /// Stores a behavior step. Cooldowns only apply to kinds that carry them.
    pub(crate) fn apply_motion(&mut self, motion: EnemyMotion) {
        self.behavior = motion.behavior;
        self.position = motion.position;
        self.dive_cooldown = motion.dive_cooldown;
        if self.tractor_cooldown.is_some() {
            self.tractor_cooldown = motion.tractor_cooldown.or(self.tractor_cooldown);
        }
    }

    pub(crate) fn snapshot(&self, beam_active: bool) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            hp: self.hp,
            score: self.score,
            slot: self.slot,
            position: self.position,
            behavior: self.behavior,
            dive_speed: self.dive_speed,
            dive_cooldown: self.dive_cooldown,
            tractor_cooldown: self.tractor_cooldown,
            beam_active,
        }
    }
}

/// Bullet fired by either side.
#[derive(Clone, Debug)]
pub(crate) struct Bullet {
    pub(crate) id: BulletId,
    pub(crate) owner: BulletOwner,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
}

impl Bullet {
    pub(crate) fn snapshot(&self) -> BulletSnapshot {
        BulletSnapshot {
            id: self.id,
            owner: self.owner,
            position: self.position,
            velocity: self.velocity,
        }
    }
}

/// Item falling towards the player.
#[derive(Clone, Debug)]
pub(crate) struct Item {
    pub(crate) id: ItemId,
    pub(crate) kind: ItemKind,
    pub(crate) position: Vec2,
}

impl Item {
    pub(crate) fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
        }
    }
}

/// Active tractor beam. The owner is referenced by id only.
#[derive(Clone, Debug)]
pub(crate) struct TractorBeam {
    pub(crate) owner: EnemyId,
    pub(crate) column_x: f32,
    pub(crate) top: f32,
    pub(crate) remaining_ticks: u32,
}

impl TractorBeam {
    pub(crate) fn below(owner: &Enemy, lifetime: u32) -> Self {
        let bounds = owner.bounds();
        Self {
            owner: owner.id,
            column_x: bounds.center().x,
            top: bounds.bottom(),
            remaining_ticks: lifetime,
        }
    }

    pub(crate) fn follow(&mut self, owner: &Enemy) {
        let bounds = owner.bounds();
        self.column_x = bounds.center().x;
        self.top = bounds.bottom();
    }

    pub(crate) fn snapshot(&self) -> BeamSnapshot {
        BeamSnapshot {
            owner: self.owner,
            column_x: self.column_x,
            top: self.top,
            remaining_ticks: self.remaining_ticks,
        }
    }
}

/// Short-lived cosmetic effect.
#[derive(Clone, Debug)]
pub(crate) struct Effect {
    pub(crate) kind: EffectKind,
    pub(crate) position: Vec2,
    pub(crate) remaining_ticks: u32,
}

impl Effect {
    pub(crate) fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            kind: self.kind,
            position: self.position,
            remaining_ticks: self.remaining_ticks,
        }
    }
}
