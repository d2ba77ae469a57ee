use std::time::Duration;

use siege_core::{
    CellCoord, Command, EnemyId, EnemyKind, Event, Position, ProjectileId, ProjectileOutcome,
    TowerId, TowerKind,
};
use siege_system_projectiles::Projectiles;
use siege_world::{self as world, query, World};

const FRAME: Duration = Duration::from_micros(16_670);

fn step(world: &mut World, projectiles: &mut Projectiles) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);

    let mut commands = Vec::new();
    projectiles.handle(
        &events,
        query::status(world),
        &query::projectile_view(world),
        &query::enemy_view(world),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn world_with_shot_fired() -> (World, EnemyId) {
    let mut world = World::default();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Basic,
            cell: CellCoord::new(1, 3),
        },
        &mut events,
    );
    world::apply(&mut world, Command::StartWave, &mut events);
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Heavy,
        },
        &mut events,
    );
    let enemy = query::enemy_view(&world)
        .iter()
        .next()
        .map(|enemy| enemy.id)
        .expect("enemy spawned");
    world::apply(
        &mut world,
        Command::AdvanceEnemy {
            enemy,
            position: Position::new(60.0, 200.0),
            path_index: 0,
            effects: Vec::new(),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::FireProjectile {
            tower: TowerId::new(0),
            target: enemy,
        },
        &mut events,
    );
    assert_eq!(query::projectile_view(&world).len(), 1);
    (world, enemy)
}

#[test]
fn projectile_reaches_and_damages_its_target() {
    let (mut world, enemy) = world_with_shot_fired();
    let mut projectiles = Projectiles::new();

    let mut damaged = None;
    let mut outcome = None;
    for _ in 0..100 {
        for event in step(&mut world, &mut projectiles) {
            match event {
                Event::EnemyDamaged {
                    enemy: hit, amount, ..
                } => damaged = Some((hit, amount)),
                Event::ProjectileResolved { outcome: result, .. } => outcome = Some(result),
                _ => {}
            }
        }
        if outcome.is_some() {
            break;
        }
    }

    assert_eq!(outcome, Some(ProjectileOutcome::Hit));
    assert_eq!(damaged, Some((enemy, 23)));
    assert!(query::projectile_view(&world).is_empty());
}

#[test]
fn projectile_misses_once_its_target_is_gone() {
    let (mut world, enemy) = world_with_shot_fired();
    let mut projectiles = Projectiles::new();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DamageEnemy {
            enemy,
            damage: 100_000,
            effect: None,
            source: None,
        },
        &mut events,
    );

    let events = step(&mut world, &mut projectiles);
    assert!(events.contains(&Event::ProjectileResolved {
        projectile: ProjectileId::new(0),
        outcome: ProjectileOutcome::Miss,
    }));
    assert!(query::projectile_view(&world).is_empty());
}
