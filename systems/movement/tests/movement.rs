use std::time::Duration;

use siege_core::{Command, EnemyKind, Event, GameStatus};
use siege_system_movement::Movement;
use siege_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(50);

fn step(world: &mut World, movement: &mut Movement) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);

    let mut commands = Vec::new();
    movement.handle(
        &events,
        query::status(world),
        &query::enemy_view(world),
        &query::level(world).path,
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn playing_world_with(kind: EnemyKind) -> World {
    let mut world = World::default();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartWave, &mut events);
    world::apply(&mut world, Command::SpawnEnemy { kind }, &mut events);
    world
}

#[test]
fn enemies_follow_waypoints_in_order() {
    let mut world = playing_world_with(EnemyKind::Fast);
    let mut movement = Movement::default();
    let waypoints = query::level(&world).path.waypoints().to_vec();

    let mut last_index = 0;
    for _ in 0..200 {
        let _ = step(&mut world, &mut movement);
        let enemies = query::enemy_view(&world);
        let Some(enemy) = enemies.iter().next() else {
            break;
        };
        assert!(enemy.path_index >= last_index, "path index went backwards");
        if enemy.path_index > last_index {
            assert_eq!(enemy.position, waypoints[enemy.path_index]);
        }
        last_index = enemy.path_index;
    }
    assert!(last_index >= 2);
}

#[test]
fn escaping_enemy_costs_one_life() {
    let mut world = playing_world_with(EnemyKind::Fast);
    let mut movement = Movement::default();

    let mut breaches = 0;
    for _ in 0..2_000 {
        let events = step(&mut world, &mut movement);
        breaches += events
            .iter()
            .filter(|event| matches!(event, Event::EnemyBreached { .. }))
            .count();
        if query::enemy_view(&world).is_empty() {
            break;
        }
    }

    assert_eq!(breaches, 1);
    assert_eq!(query::lives(&world), 24);
    assert_eq!(query::status(&world), GameStatus::Playing);
}

#[test]
fn paused_enemies_hold_position() {
    let mut world = playing_world_with(EnemyKind::Basic);
    let mut movement = Movement::default();
    let _ = step(&mut world, &mut movement);

    let mut events = Vec::new();
    world::apply(&mut world, Command::TogglePause, &mut events);
    let before = query::enemy_view(&world).into_vec();
    for _ in 0..20 {
        let _ = step(&mut world, &mut movement);
    }
    assert_eq!(query::enemy_view(&world).into_vec(), before);
}
