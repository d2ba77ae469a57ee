use siege_core::EnemyKind;
use siege_system_level_generation::{generate_level, wave_count};

#[test]
fn wave_count_grows_then_caps() {
    assert_eq!(wave_count(1), 8);
    assert_eq!(wave_count(2), 9);
    assert_eq!(wave_count(13), 14);
    assert_eq!(wave_count(14), 15);
    assert_eq!(wave_count(40), 15);
}

#[test]
fn generation_is_deterministic() {
    for level in 1..=25 {
        assert_eq!(generate_level(level), generate_level(level));
    }
}

#[test]
fn boss_wave_closes_every_third_level() {
    for level in 1..=30 {
        let config = generate_level(level);
        let boss_waves: Vec<usize> = config
            .waves
            .iter()
            .enumerate()
            .filter(|(_, wave)| wave.is_boss_wave())
            .map(|(index, _)| index)
            .collect();

        if level % 3 == 0 {
            assert_eq!(boss_waves, vec![config.waves.len() - 1], "level {level}");
        } else {
            assert!(boss_waves.is_empty(), "level {level}");
        }
    }
}

#[test]
fn boss_wave_schedules_bosses_then_heavies() {
    let config = generate_level(12);
    let finale = config.waves.last().expect("level has waves");
    let groups = finale.groups();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].kind(), EnemyKind::Boss);
    assert_eq!(groups[0].count(), 2);
    assert_eq!(groups[0].delay().as_millis(), 3_000);
    assert_eq!(groups[1].kind(), EnemyKind::Heavy);
    assert_eq!(groups[1].count(), 5);
    assert_eq!(groups[1].delay().as_millis(), 1_500);
}

#[test]
fn roster_widens_with_level() {
    let first = generate_level(1);
    let kinds: Vec<EnemyKind> = first.waves[0]
        .groups()
        .iter()
        .map(|group| group.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Heavy]
    );

    let late = generate_level(13);
    assert_eq!(late.waves[0].groups().len(), 7);
    assert_eq!(
        late.waves[0].groups().last().map(|group| group.kind()),
        Some(EnemyKind::Swarm)
    );
}

#[test]
fn spawn_delays_never_drop_below_floor() {
    for level in 1..=30 {
        for wave in &generate_level(level).waves {
            for group in wave.groups() {
                assert!(group.delay().as_millis() >= 300, "level {level}");
                assert!(group.count() >= 1);
            }
        }
    }
}

#[test]
fn wave_rewards_follow_wave_and_level() {
    let config = generate_level(2);
    let rewards: Vec<u32> = config.waves.iter().map(|wave| wave.reward()).collect();
    assert_eq!(rewards[0], 85);
    assert_eq!(rewards[1], 100);
    assert_eq!(config.wave(9).map(|wave| wave.reward()), Some(205));
}

#[test]
fn extreme_level_ids_saturate_instead_of_overflowing() {
    let config = generate_level(u32::MAX);
    assert_eq!(config.id, u32::MAX);
    assert_eq!(config.experience_reward, u32::MAX);
    assert_eq!(config.unlock_requirement, u32::MAX);
    assert_eq!(config.waves.len(), 15);
    assert!(config.waves.iter().all(|wave| wave.reward() == u32::MAX));
}
