use siege_core::{Command, EnemyKind, Event, GameStatus};
use siege_system_progression::Progression;
use siege_world::{self as world, query, Config, World};

fn resolve(world: &mut World) -> Vec<Event> {
    let mut commands = Vec::new();
    Progression::new().handle(
        query::status(world),
        query::lives(world),
        query::enemy_view(world).len(),
        query::current_wave(world),
        query::spawn_cursor(world),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn playing(config: Config) -> World {
    let mut world = World::new(config);
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartWave, &mut events);
    world
}

#[test]
fn cleared_wave_returns_to_preparation() {
    let mut world = playing(Config::default());
    let groups = query::current_wave(&world)
        .map(|wave| wave.groups().len())
        .expect("first wave exists");

    assert!(resolve(&mut world).is_empty());

    let mut events = Vec::new();
    for _ in 0..groups {
        world::apply(&mut world, Command::AdvanceSpawnGroup, &mut events);
    }

    let events = resolve(&mut world);
    assert!(events.contains(&Event::WaveCompleted {
        wave: 1,
        reward: 75,
    }));
    assert_eq!(query::status(&world), GameStatus::Preparing);
    assert_eq!(query::game_snapshot(&world).wave, 2);
}

#[test]
fn losing_the_last_life_ends_the_game() {
    let mut world = playing(Config {
        starting_lives: 1,
        ..Config::default()
    });

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Basic,
        },
        &mut events,
    );
    world::apply(&mut world, Command::SpawnEnemy { kind: EnemyKind::Fast }, &mut events);
    let first = query::enemy_view(&world)
        .iter()
        .next()
        .map(|enemy| enemy.id)
        .expect("enemy spawned");
    world::apply(&mut world, Command::BreachEnemy { enemy: first }, &mut events);
    assert_eq!(query::lives(&world), 0);

    let _ = resolve(&mut world);
    assert_eq!(query::status(&world), GameStatus::GameOver);
}
