use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use squadron_core::{
    arena::{player_spawn_point, START_INVINCIBILITY_TICKS, STARTING_LIVES},
    config::ItemConfig,
    Command, EffectKind, EnemyBehavior, EnemyKind, EnemySeed, Event, ItemKind, PowerUp,
    SessionStatus, WaveIndex, WaveParameters,
};
use squadron_system_collision::Collision;
use squadron_world::{self as world, query, World};

fn seed(kind: EnemyKind, hp: u32, position: Vec2) -> EnemySeed {
    EnemySeed {
        kind,
        hp,
        score: 100,
        slot: position,
        position,
        dive_speed: 0.05,
        dive_cooldown: 500,
        tractor_cooldown: None,
    }
}

fn world_with(enemies: Vec<EnemySeed>) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnWave {
            wave: WaveIndex::FIRST,
            parameters: WaveParameters {
                columns: 1,
                rows: 1,
            },
            enemies,
        },
        &mut events,
    );
    world
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn expire_invincibility(world: &mut World) {
    let ticks = vec![Command::Tick; START_INVINCIBILITY_TICKS as usize];
    let _ = apply_all(world, ticks);
    assert!(!query::player(world).is_invincible());
}

fn settle(world: &mut World) {
    let commands = query::enemy_view(world)
        .iter()
        .map(|enemy| Command::UpdateEnemy {
            enemy: enemy.id,
            motion: enemy.motion(EnemyBehavior::InFormation, enemy.slot),
        })
        .collect();
    let _ = apply_all(world, commands);
}

fn resolve(
    world: &mut World,
    items: &ItemConfig,
    rng: &mut ChaCha8Rng,
) -> (Vec<Command>, Vec<Event>) {
    let mut commands = Vec::new();
    Collision::default().handle(&query::frame_snapshot(world), items, rng, &mut commands);
    let events = apply_all(world, commands.clone());
    (commands, events)
}

fn count_damage(commands: &[Command]) -> usize {
    commands
        .iter()
        .filter(|command| matches!(command, Command::DamageEnemy { .. }))
        .count()
}

fn spawn_item_on_player(world: &mut World, kind: ItemKind) {
    let _ = apply_all(
        world,
        vec![Command::SpawnItem {
            kind,
            position: player_spawn_point(),
        }],
    );
}

fn no_drops() -> ItemConfig {
    ItemConfig {
        drop_rate: 0.0,
        ..ItemConfig::default()
    }
}

#[test]
fn bullet_strikes_lowest_identifier_first() {
    let mut world = world_with(vec![
        seed(EnemyKind::Basic, 1, Vec2::new(230.0, 300.0)),
        seed(EnemyKind::Basic, 1, Vec2::new(250.0, 300.0)),
    ]);
    let ids: Vec<_> = query::enemy_view(&world).iter().map(|enemy| enemy.id).collect();
    let _ = apply_all(&mut world, vec![Command::Tick; 200]);
    let mut events = Vec::new();
    world::apply(&mut world, Command::FirePlayer, &mut events);
    while query::player_bullets(&world)
        .first()
        .is_some_and(|bullet| bullet.position.y > 300.0)
    {
        world::apply(&mut world, Command::AdvanceEntities, &mut events);
    }
    let bullet = query::player_bullets(&world)[0];
    for enemy in query::enemy_view(&world).iter() {
        assert!(enemy.bounds().overlaps(&bullet.bounds()));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (commands, events) = resolve(&mut world, &no_drops(), &mut rng);
    assert_eq!(
        commands,
        vec![
            Command::RemovePlayerBullet { bullet: bullet.id },
            Command::DamageEnemy { enemy: ids[0] },
        ]
    );
    assert!(events.contains(&Event::ScoreChanged { score: 100 }));
    assert_eq!(query::enemy_view(&world).len(), 1);
    assert!(query::player_bullets(&world).is_empty());
}

#[test]
fn certain_drop_leaves_an_item_where_the_enemy_died() {
    let position = Vec2::new(240.0, 300.0);
    let mut world = world_with(vec![
        seed(EnemyKind::Basic, 1, position),
        seed(EnemyKind::Basic, 1, Vec2::new(60.0, 60.0)),
    ]);
    let _ = apply_all(&mut world, vec![Command::Tick; 200]);
    let mut events = Vec::new();
    world::apply(&mut world, Command::FirePlayer, &mut events);
    while query::player_bullets(&world)
        .first()
        .is_some_and(|bullet| bullet.position.y > position.y)
    {
        world::apply(&mut world, Command::AdvanceEntities, &mut events);
    }

    let items = ItemConfig {
        drop_rate: 1.0,
        ..ItemConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let (_, events) = resolve(&mut world, &items, &mut rng);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ItemDropped { .. })));
    let dropped = query::items(&world);
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].position, position);
}

#[test]
fn bomb_damages_about_seventy_percent_of_visible_enemies() {
    let mut enemies = Vec::new();
    for index in 0..400u16 {
        let x = 20.0 + f32::from(index % 20) * 22.0;
        let y = 40.0 + f32::from(index / 20) * 20.0;
        enemies.push(seed(EnemyKind::Basic, 5, Vec2::new(x, y)));
    }
    for _ in 0..20 {
        enemies.push(seed(EnemyKind::Basic, 5, Vec2::new(240.0, -200.0)));
    }
    let mut world = world_with(enemies);
    let offscreen: Vec<_> = query::enemy_view(&world)
        .iter()
        .filter(|enemy| enemy.position.y < 0.0)
        .map(|enemy| enemy.id)
        .collect();
    spawn_item_on_player(&mut world, ItemKind::Bomb);

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let (commands, events) = resolve(&mut world, &ItemConfig::default(), &mut rng);

    let damaged = count_damage(&commands);
    assert!((230..=330).contains(&damaged), "damaged {damaged} of 400");
    assert!(!commands.iter().any(|command| matches!(
        command,
        Command::DamageEnemy { enemy } if offscreen.contains(enemy)
    )));
    assert!(events.contains(&Event::ItemCollected {
        kind: ItemKind::Bomb
    }));
    assert_eq!(query::score(&world), 200);
    assert!(query::effects(&world)
        .iter()
        .any(|effect| effect.kind == EffectKind::BombFlash));
}

#[test]
fn bomb_kills_score_like_shots() {
    let mut world = world_with(vec![
        seed(EnemyKind::Basic, 1, Vec2::new(100.0, 100.0)),
        seed(EnemyKind::Basic, 1, Vec2::new(300.0, 100.0)),
    ]);
    spawn_item_on_player(&mut world, ItemKind::Bomb);
    let items = ItemConfig {
        bomb_hit_chance: 1.0,
        ..no_drops()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let (commands, _) = resolve(&mut world, &items, &mut rng);

    assert_eq!(count_damage(&commands), 2);
    assert_eq!(commands.last(), Some(&Command::MarkWaveCleared));
    assert_eq!(query::score(&world), 100 + 100 + 200);
    assert_eq!(query::status(&world), SessionStatus::WaveCleared);
}

#[test]
fn score_and_power_items_apply_on_pickup() {
    let mut world = world_with(vec![seed(EnemyKind::Basic, 1, Vec2::new(100.0, 100.0))]);
    spawn_item_on_player(&mut world, ItemKind::Score);
    spawn_item_on_player(&mut world, ItemKind::DoubleFire);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let (commands, _) = resolve(&mut world, &ItemConfig::default(), &mut rng);

    assert!(commands.contains(&Command::EnablePowerUp {
        power: PowerUp::DoubleFire
    }));
    assert_eq!(query::score(&world), 300);
    assert!(query::player(&world).double_fire);
    assert!(query::items(&world).is_empty());
}

#[test]
fn shield_absorbs_bullets_and_rammers_without_score() {
    let mut world = world_with(vec![
        seed(EnemyKind::Basic, 1, Vec2::new(100.0, 100.0)),
        seed(EnemyKind::Mid, 2, player_spawn_point()),
    ]);
    expire_invincibility(&mut world);
    let _ = apply_all(
        &mut world,
        vec![
            Command::EnablePowerUp {
                power: PowerUp::Shield { ticks: 240 },
            },
            Command::SpawnEnemyBullet {
                origin: player_spawn_point(),
                velocity: Vec2::new(0.0, 3.0),
            },
        ],
    );

    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let (commands, events) = resolve(&mut world, &no_drops(), &mut rng);

    assert!(!commands.contains(&Command::LoseLife));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ScoreChanged { .. })));
    assert_eq!(query::player(&world).lives, STARTING_LIVES);
    assert_eq!(query::enemy_view(&world).len(), 1);
    assert!(query::enemy_bullets(&world).is_empty());
}

#[test]
fn shield_picked_up_this_tick_already_protects() {
    let mut world = world_with(vec![
        seed(EnemyKind::Basic, 1, Vec2::new(100.0, 100.0)),
        seed(EnemyKind::Basic, 1, player_spawn_point()),
    ]);
    expire_invincibility(&mut world);
    spawn_item_on_player(&mut world, ItemKind::Shield);

    let items = no_drops();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (commands, _) = resolve(&mut world, &items, &mut rng);
    assert!(!commands.contains(&Command::LoseLife));
    assert!(query::player(&world).is_shielded());
    assert_eq!(query::enemy_view(&world).len(), 1);

    let elapsed = 100;
    let _ = apply_all(&mut world, vec![Command::Tick; elapsed as usize]);
    let _ = apply_all(
        &mut world,
        vec![Command::SpawnEnemyBullet {
            origin: player_spawn_point(),
            velocity: Vec2::new(0.0, 3.0),
        }],
    );
    let (commands, _) = resolve(&mut world, &items, &mut rng);
    assert!(!commands.contains(&Command::LoseLife));
    assert!(query::enemy_bullets(&world).is_empty());
    let player = query::player(&world);
    assert_eq!(player.lives, STARTING_LIVES);
    assert_eq!(player.shield_ticks, items.shield_ticks - elapsed);

    let mut ticks = 0;
    loop {
        let events = apply_all(&mut world, vec![Command::Tick]);
        ticks += 1;
        if events.contains(&Event::ShieldExpired) {
            break;
        }
        assert!(query::player(&world).is_shielded());
        assert!(ticks < items.shield_ticks, "shield never expired");
    }
    assert_eq!(ticks, items.shield_ticks - elapsed);
    assert!(!query::player(&world).is_shielded());
    assert_eq!(query::player(&world).lives, STARTING_LIVES);
}

#[test]
fn invincible_player_only_clears_bullets() {
    let mut world = world_with(vec![seed(EnemyKind::Basic, 1, player_spawn_point())]);
    let _ = apply_all(
        &mut world,
        vec![Command::SpawnEnemyBullet {
            origin: player_spawn_point(),
            velocity: Vec2::new(0.0, 3.0),
        }],
    );
    assert!(query::player(&world).is_invincible());

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let (commands, _) = resolve(&mut world, &no_drops(), &mut rng);
    assert!(!commands.contains(&Command::LoseLife));
    assert!(query::enemy_bullets(&world).is_empty());
    assert_eq!(query::enemy_view(&world).len(), 1);
    assert_eq!(query::player(&world).lives, STARTING_LIVES);
}

#[test]
fn simultaneous_contacts_cost_a_single_life() {
    let mut world = world_with(vec![
        seed(EnemyKind::Basic, 1, Vec2::new(100.0, 100.0)),
        seed(EnemyKind::Basic, 1, player_spawn_point()),
    ]);
    expire_invincibility(&mut world);
    let _ = apply_all(
        &mut world,
        vec![
            Command::SpawnEnemyBullet {
                origin: player_spawn_point(),
                velocity: Vec2::new(0.0, 3.0),
            },
            Command::SpawnEnemyBullet {
                origin: player_spawn_point() + Vec2::new(6.0, 0.0),
                velocity: Vec2::new(0.0, 3.0),
            },
        ],
    );

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let (commands, events) = resolve(&mut world, &no_drops(), &mut rng);
    let losses = commands
        .iter()
        .filter(|command| **command == Command::LoseLife)
        .count();
    assert_eq!(losses, 1);
    assert!(events.contains(&Event::PlayerHit {
        lives_remaining: STARTING_LIVES - 1
    }));
    assert!(query::player(&world).is_invincible());
    assert!(query::enemy_bullets(&world).is_empty());
    assert_eq!(query::enemy_view(&world).len(), 1);
    assert_eq!(query::score(&world), 0);
}

#[test]
fn repeated_hits_end_the_game() {
    let mut world = world_with(vec![seed(EnemyKind::Basic, 1, Vec2::new(100.0, 100.0))]);
    let mut rng = ChaCha8Rng::seed_from_u64(10);

    for expected in (0..STARTING_LIVES).rev() {
        while query::player(&world).is_invincible() {
            let _ = apply_all(&mut world, vec![Command::Tick]);
        }
        let _ = apply_all(
            &mut world,
            vec![Command::SpawnEnemyBullet {
                origin: player_spawn_point(),
                velocity: Vec2::new(0.0, 3.0),
            }],
        );
        let _ = resolve(&mut world, &no_drops(), &mut rng);
        assert_eq!(query::player(&world).lives, expected);
    }
    assert_eq!(query::status(&world), SessionStatus::GameOver);
}

#[test]
fn captured_player_drifts_up_and_returns_with_one_life_less() {
    let mut boss = seed(EnemyKind::Boss, 4, Vec2::new(240.0, 56.0));
    boss.tractor_cooldown = Some(900);
    let mut world = world_with(vec![boss]);
    settle(&mut world);
    expire_invincibility(&mut world);
    let owner = query::enemy_view(&world).iter().next().map(|enemy| enemy.id);
    let owner = owner.expect("boss present");
    let _ = apply_all(
        &mut world,
        vec![
            Command::EnablePowerUp {
                power: PowerUp::DoubleFire,
            },
            Command::ActivateTractorBeam { owner },
        ],
    );
    assert_eq!(query::beams(&world).len(), 1);

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let (commands, events) = resolve(&mut world, &no_drops(), &mut rng);
    assert_eq!(commands, vec![Command::CapturePlayer]);
    assert!(events.contains(&Event::PlayerCaptured));
    assert!(query::player(&world).captured);
    assert!(!query::player(&world).double_fire);

    let start_y = query::player(&world).position.y;
    let mut ticks = 0;
    while query::player(&world).captured {
        let _ = resolve(&mut world, &no_drops(), &mut rng);
        ticks += 1;
        assert!(ticks < 400, "capture never resolved");
    }
    assert!(ticks as f32 * 3.0 >= start_y);

    let player = query::player(&world);
    assert_eq!(player.lives, STARTING_LIVES - 1);
    assert_eq!(player.position, player_spawn_point());
    assert!(player.is_invincible());
}

#[test]
fn shielded_player_ignores_beams() {
    let mut boss = seed(EnemyKind::Boss, 4, Vec2::new(240.0, 56.0));
    boss.tractor_cooldown = Some(900);
    let mut world = world_with(vec![boss]);
    settle(&mut world);
    let owner = query::enemy_view(&world).iter().next().map(|enemy| enemy.id);
    let owner = owner.expect("boss present");
    let _ = apply_all(
        &mut world,
        vec![
            Command::EnablePowerUp {
                power: PowerUp::Shield { ticks: 240 },
            },
            Command::ActivateTractorBeam { owner },
        ],
    );

    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let (commands, _) = resolve(&mut world, &no_drops(), &mut rng);
    assert!(commands.is_empty());
    assert!(!query::player(&world).captured);
}
