#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision and scoring resolution.
//!
//! The resolver runs once per tick after every position update. It reads a
//! single [`FrameSnapshot`] and keeps a local ledger of the enemies it has
//! already destroyed, so an entity removed early in the tick never takes part
//! in a later check.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use squadron_core::{
    arena::{on_screen, CAPTURE_DRIFT, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH},
    config::ItemConfig,
    policy, Command, EffectKind, EnemyId, FrameSnapshot, ItemKind, PowerUp,
};

/// Pure system that turns overlaps into score, life and spawn commands.
#[derive(Debug, Default)]
pub struct Collision {
    hit_points: BTreeMap<EnemyId, u32>,
}

impl Collision {
    /// Resolves every overlap of the frame in a fixed order.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        frame: &FrameSnapshot,
        items: &ItemConfig,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        self.hit_points.clear();
        self.hit_points
            .extend(frame.enemies.iter().map(|enemy| (enemy.id, enemy.hp)));

        self.resolve_player_bullets(frame, items, rng, out);

        let player = frame.player;
        let mut shielded = player.is_shielded();
        if !player.captured {
            shielded |= self.resolve_items(frame, items, rng, out);
        }
        let hit = !player.captured && self.resolve_contacts(frame, shielded, out);
        self.resolve_capture(frame, shielded || hit, out);

        if self.hit_points.is_empty() {
            out.push(Command::MarkWaveCleared);
        }
    }

    fn resolve_player_bullets<R: Rng + ?Sized>(
        &mut self,
        frame: &FrameSnapshot,
        items: &ItemConfig,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        for bullet in &frame.player_bullets {
            let bounds = bullet.bounds();
            let target = frame.enemies.iter().find(|enemy| {
                self.hit_points.contains_key(&enemy.id) && enemy.bounds().overlaps(&bounds)
            });
            let Some(target) = target else {
                continue;
            };
            out.push(Command::RemovePlayerBullet { bullet: bullet.id });
            if self.damage(target.id, out) {
                if let Some(kind) = policy::item_drop(rng, items) {
                    out.push(Command::SpawnItem {
                        kind,
                        position: target.position,
                    });
                }
            }
        }
    }

    /// Returns `true` when a shield was picked up.
    fn resolve_items<R: Rng + ?Sized>(
        &mut self,
        frame: &FrameSnapshot,
        items: &ItemConfig,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> bool {
        let ship = frame.player.bounds();
        let mut shield_gained = false;
        for item in frame.items.iter().filter(|item| item.bounds().overlaps(&ship)) {
            out.push(Command::CollectItem { item: item.id });
            match item.kind {
                ItemKind::DoubleFire => out.push(Command::EnablePowerUp {
                    power: PowerUp::DoubleFire,
                }),
                ItemKind::Shield => {
                    out.push(Command::EnablePowerUp {
                        power: PowerUp::Shield {
                            ticks: items.shield_ticks,
                        },
                    });
                    shield_gained = items.shield_ticks > 0;
                }
                ItemKind::Bomb => self.detonate(frame, items, rng, out),
                ItemKind::Score => out.push(Command::AwardScore {
                    points: items.score_bonus,
                }),
            }
        }
        shield_gained
    }

    fn detonate<R: Rng + ?Sized>(
        &mut self,
        frame: &FrameSnapshot,
        items: &ItemConfig,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        out.push(Command::SpawnEffect {
            kind: EffectKind::BombFlash,
            position: Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0),
        });
        for enemy in frame.enemies.iter() {
            if !self.hit_points.contains_key(&enemy.id) || !on_screen(enemy.position) {
                continue;
            }
            if policy::bomb_hit(rng, items) {
                let _ = self.damage(enemy.id, out);
            }
        }
        out.push(Command::AwardScore {
            points: items.bomb_bonus,
        });
    }

    /// Returns `true` when the player lost a life.
    fn resolve_contacts(
        &mut self,
        frame: &FrameSnapshot,
        shielded: bool,
        out: &mut Vec<Command>,
    ) -> bool {
        let ship = frame.player.bounds();
        let bullets: Vec<_> = frame
            .enemy_bullets
            .iter()
            .filter(|bullet| bullet.bounds().overlaps(&ship))
            .map(|bullet| bullet.id)
            .collect();
        let rammers: Vec<EnemyId> = frame
            .enemies
            .iter()
            .filter(|enemy| {
                self.hit_points.contains_key(&enemy.id) && enemy.bounds().overlaps(&ship)
            })
            .map(|enemy| enemy.id)
            .collect();

        if !shielded && frame.player.is_invincible() {
            out.extend(
                bullets
                    .into_iter()
                    .map(|bullet| Command::RemoveEnemyBullet { bullet }),
            );
            return false;
        }

        let hit = !shielded && !(bullets.is_empty() && rammers.is_empty());
        out.extend(
            bullets
                .into_iter()
                .map(|bullet| Command::RemoveEnemyBullet { bullet }),
        );
        for enemy in rammers {
            let _ = self.hit_points.remove(&enemy);
            out.push(Command::RemoveEnemy { enemy });
        }
        if hit {
            out.push(Command::LoseLife);
        }
        hit
    }

    fn resolve_capture(&self, frame: &FrameSnapshot, protected: bool, out: &mut Vec<Command>) {
        let player = frame.player;
        if player.captured {
            out.push(Command::DriftPlayer { dy: -CAPTURE_DRIFT });
            if player.bounds().bottom() - CAPTURE_DRIFT < 0.0 {
                out.push(Command::LoseLife);
                out.push(Command::RespawnPlayer);
            }
            return;
        }
        if protected {
            return;
        }
        let ship = player.bounds();
        let caught = frame.beams.iter().any(|beam| {
            self.hit_points.contains_key(&beam.owner) && beam.bounds().overlaps(&ship)
        });
        if caught {
            out.push(Command::CapturePlayer);
        }
    }

    /// Deals one point of damage. Returns `true` when the enemy dies.
    fn damage(&mut self, enemy: EnemyId, out: &mut Vec<Command>) -> bool {
        let Some(hp) = self.hit_points.get_mut(&enemy) else {
            return false;
        };
        out.push(Command::DamageEnemy { enemy });
        *hp = hp.saturating_sub(1);
        if *hp > 0 {
            return false;
        }
        let _ = self.hit_points.remove(&enemy);
        true
    }
}
