use std::time::Duration;

use siege_core::{CellCoord, Command, EnemyKind, Event, TowerId, TowerKind};
use siege_system_tower_combat::TowerCombat;
use siege_world::{self as world, query, World};

fn fire(world: &mut World, combat: &mut TowerCombat) -> Vec<Event> {
    let mut commands = Vec::new();
    combat.handle(
        query::status(world),
        &query::tower_view(world),
        query::clock(world),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn count_fired(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::ProjectileFired { .. }))
        .count()
}

fn armed_world() -> World {
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
        Command::AssignTarget {
            tower: TowerId::new(0),
            target: Some(enemy),
        },
        &mut events,
    );
    world
}

#[test]
fn tower_fires_once_per_attack_interval() {
    let mut world = armed_world();
    let mut combat = TowerCombat::new();
    let mut events = Vec::new();

    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(1_000),
        },
        &mut events,
    );
    assert_eq!(count_fired(&fire(&mut world, &mut combat)), 1);
    assert_eq!(query::projectile_view(&world).len(), 1);

    let mut fired = 0;
    for _ in 0..19 {
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
            &mut events,
        );
        fired += count_fired(&fire(&mut world, &mut combat));
    }
    assert_eq!(fired, 0);

    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(50),
        },
        &mut events,
    );
    assert_eq!(count_fired(&fire(&mut world, &mut combat)), 1);

    let tower = query::tower_view(&world)
        .get(TowerId::new(0))
        .copied()
        .expect("tower exists");
    assert_eq!(tower.last_attack, Duration::from_millis(2_000));
}
