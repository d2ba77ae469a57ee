#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that flies projectiles toward their targets and resolves impacts.

use std::time::Duration;

use siege_core::{
    travel_distance, Command, EnemySnapshot, EnemyView, Event, GameStatus, ProjectileOutcome,
    ProjectileSnapshot, ProjectileView,
};

/// Distance to the target at which a projectile detonates.
const IMPACT_RADIUS: f32 = 15.0;

/// Radius around the target that receives splash damage.
const SPLASH_RADIUS: f32 = 60.0;

/// Radius around the projectile that receives piercing damage.
const PIERCE_RADIUS: f32 = 20.0;

/// Projectile flight system.
#[derive(Debug, Default)]
pub struct Projectiles;

impl Projectiles {
    /// Creates a new projectile system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Consumes time events and the current views to emit flight and impact commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        status: GameStatus,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Playing {
            return;
        }

        let mut dt = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt: step, .. } = event {
                dt = dt.saturating_add(*step);
            }
        }

        if dt.is_zero() {
            return;
        }

        for projectile in projectiles.iter() {
            let Some(target) = enemies.get(projectile.target) else {
                out.push(Command::ResolveProjectile {
                    projectile: projectile.id,
                    outcome: ProjectileOutcome::Miss,
                });
                continue;
            };

            if projectile.position.distance(target.position) < IMPACT_RADIUS {
                impact(projectile, target, enemies, out);
            } else {
                let step = travel_distance(projectile.speed, dt);
                out.push(Command::MoveProjectile {
                    projectile: projectile.id,
                    position: projectile.position.step_toward(target.position, step),
                });
            }
        }
    }
}

fn impact(
    projectile: &ProjectileSnapshot,
    target: &EnemySnapshot,
    enemies: &EnemyView,
    out: &mut Vec<Command>,
) {
    let effect = projectile.kind.on_hit_effect();
    let source = Some(projectile.tower);

    out.push(Command::DamageEnemy {
        enemy: target.id,
        damage: projectile.damage,
        effect,
        source,
    });

    if projectile.splash {
        let damage = projectile.damage / 2;
        for enemy in enemies.iter().filter(|enemy| enemy.id != target.id) {
            if enemy.position.distance(target.position) <= SPLASH_RADIUS {
                out.push(Command::DamageEnemy {
                    enemy: enemy.id,
                    damage,
                    effect,
                    source,
                });
            }
        }
    }

    if projectile.piercing {
        let damage = u32::try_from(u64::from(projectile.damage) * 7 / 10).unwrap_or(u32::MAX);
        for enemy in enemies.iter().filter(|enemy| enemy.id != target.id) {
            if enemy.position.distance(projectile.position) <= PIERCE_RADIUS {
                out.push(Command::DamageEnemy {
                    enemy: enemy.id,
                    damage,
                    effect,
                    source,
                });
            }
        }
    }

    out.push(Command::ResolveProjectile {
        projectile: projectile.id,
        outcome: ProjectileOutcome::Hit,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::{EnemyId, EnemyKind, Position, ProjectileId, ProjectileKind, TowerId};

    const FRAME: Duration = Duration::from_micros(16_670);

    fn tick() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: FRAME,
            now: FRAME,
        }]
    }

    fn projectile(kind: ProjectileKind, position: Position, target: u32) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: ProjectileId::new(0),
            tower: TowerId::new(3),
            kind,
            position,
            target: EnemyId::new(target),
            damage: 25,
            speed: 6.0,
            piercing: kind == ProjectileKind::Laser,
            splash: matches!(kind, ProjectileKind::Cannonball | ProjectileKind::Missile),
        }
    }

    fn enemy(id: u32, position: Position) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Basic,
            position,
            health: 100,
            max_health: 100,
            speed: 1.0,
            reward: 12,
            path_index: 0,
            effects: Vec::new(),
            armor: 0,
            flying: false,
        }
    }

    fn run(
        events: &[Event],
        projectiles: Vec<ProjectileSnapshot>,
        enemies: Vec<EnemySnapshot>,
    ) -> Vec<Command> {
        let mut out = Vec::new();
        Projectiles::new().handle(
            events,
            GameStatus::Playing,
            &ProjectileView::from_snapshots(projectiles),
            &EnemyView::from_snapshots(enemies),
            &mut out,
        );
        out
    }

    #[test]
    fn projectile_without_target_misses() {
        let out = run(
            &tick(),
            vec![projectile(ProjectileKind::Bullet, Position::new(0.0, 0.0), 9)],
            Vec::new(),
        );
        assert_eq!(
            out,
            vec![Command::ResolveProjectile {
                projectile: ProjectileId::new(0),
                outcome: ProjectileOutcome::Miss,
            }]
        );
    }

    #[test]
    fn distant_projectile_homes_in() {
        let out = run(
            &tick(),
            vec![projectile(ProjectileKind::Bullet, Position::new(0.0, 0.0), 1)],
            vec![enemy(1, Position::new(100.0, 0.0))],
        );
        let [Command::MoveProjectile { position, .. }] = out.as_slice() else {
            panic!("expected a single move, got {out:?}");
        };
        assert!((position.x() - 6.0).abs() < 1e-3);
        assert_eq!(position.y(), 0.0);
    }

    #[test]
    fn close_projectile_hits_target() {
        let out = run(
            &tick(),
            vec![projectile(ProjectileKind::Ice, Position::new(0.0, 0.0), 1)],
            vec![enemy(1, Position::new(10.0, 0.0))],
        );
        assert_eq!(
            out,
            vec![
                Command::DamageEnemy {
                    enemy: EnemyId::new(1),
                    damage: 25,
                    effect: ProjectileKind::Ice.on_hit_effect(),
                    source: Some(TowerId::new(3)),
                },
                Command::ResolveProjectile {
                    projectile: ProjectileId::new(0),
                    outcome: ProjectileOutcome::Hit,
                },
            ]
        );
    }

    #[test]
    fn splash_damages_neighbours_of_target() {
        let out = run(
            &tick(),
            vec![projectile(
                ProjectileKind::Cannonball,
                Position::new(0.0, 0.0),
                1,
            )],
            vec![
                enemy(1, Position::new(10.0, 0.0)),
                enemy(2, Position::new(70.0, 0.0)),
                enemy(3, Position::new(71.0, 0.0)),
            ],
        );
        let splashed: Vec<(EnemyId, u32)> = out
            .iter()
            .filter_map(|command| match command {
                Command::DamageEnemy { enemy, damage, .. } => Some((*enemy, *damage)),
                _ => None,
            })
            .collect();
        assert_eq!(splashed, vec![(EnemyId::new(1), 25), (EnemyId::new(2), 12)]);
    }

    #[test]
    fn piercing_damages_enemies_near_projectile() {
        let out = run(
            &tick(),
            vec![projectile(ProjectileKind::Laser, Position::new(0.0, 0.0), 1)],
            vec![
                enemy(1, Position::new(10.0, 0.0)),
                enemy(2, Position::new(0.0, 20.0)),
                enemy(3, Position::new(0.0, 25.0)),
            ],
        );
        let pierced: Vec<(EnemyId, u32)> = out
            .iter()
            .filter_map(|command| match command {
                Command::DamageEnemy { enemy, damage, .. } => Some((*enemy, *damage)),
                _ => None,
            })
            .collect();
        assert_eq!(pierced, vec![(EnemyId::new(1), 25), (EnemyId::new(2), 17)]);
    }

    #[test]
    fn piercing_share_of_huge_damage_does_not_overflow() {
        let mut laser = projectile(ProjectileKind::Laser, Position::new(0.0, 0.0), 1);
        laser.damage = 700_000_000;
        let out = run(
            &tick(),
            vec![laser],
            vec![
                enemy(1, Position::new(10.0, 0.0)),
                enemy(2, Position::new(0.0, 5.0)),
            ],
        );
        assert!(out.contains(&Command::DamageEnemy {
            enemy: EnemyId::new(2),
            damage: 490_000_000,
            effect: None,
            source: Some(TowerId::new(3)),
        }));
    }

    #[test]
    fn zero_elapsed_time_is_inert() {
        let events = vec![Event::TimeAdvanced {
            dt: Duration::ZERO,
            now: Duration::ZERO,
        }];
        let out = run(
            &events,
            vec![projectile(ProjectileKind::Bullet, Position::new(0.0, 0.0), 9)],
            Vec::new(),
        );
        assert!(out.is_empty());
    }
}
