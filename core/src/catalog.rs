//! Immutable base statistics for towers and enemies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration applied by tower on-hit effects.
pub const ON_HIT_EFFECT_DURATION: Duration = Duration::from_millis(3_000);

/// Types of towers that can be constructed along the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fast, reliable tower with steady damage.
    Basic,
    /// Slow tower whose shells splash onto nearby enemies.
    Cannon,
    /// Anti-air beam that pierces enemies along its flight.
    Laser,
    /// Frost tower that slows whatever it hits.
    Ice,
    /// Toxic tower that poisons whatever it hits.
    Poison,
    /// Anti-air tower that sets its targets alight.
    Lightning,
    /// Anti-air launcher with large splash damage.
    Missile,
    /// Rapid-fire electric tower.
    Tesla,
}

/// Base statistics shared by every tower of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerStats {
    /// Damage dealt by a single projectile before armor.
    pub damage: u32,
    /// Targeting radius measured in world units.
    pub range: u32,
    /// Minimum time between two attacks, in milliseconds.
    pub attack_interval_ms: u32,
    /// Base placement cost before dynamic pricing.
    pub cost: u32,
    /// Base upgrade cost per current tower level before dynamic pricing.
    pub upgrade_cost: u32,
    /// Player level at which the kind becomes available.
    pub unlock_level: u32,
}

impl TowerKind {
    /// Every tower kind in catalog order.
    pub const ALL: [TowerKind; 8] = [
        TowerKind::Basic,
        TowerKind::Cannon,
        TowerKind::Laser,
        TowerKind::Ice,
        TowerKind::Poison,
        TowerKind::Lightning,
        TowerKind::Missile,
        TowerKind::Tesla,
    ];

    /// Tower kinds available before the player gains any level.
    pub const STARTER: [TowerKind; 2] = [TowerKind::Basic, TowerKind::Cannon];

    /// Base statistics for the kind.
    #[must_use]
    pub const fn stats(self) -> TowerStats {
        match self {
            Self::Basic => TowerStats {
                damage: 25,
                range: 80,
                attack_interval_ms: 1_000,
                cost: 20,
                upgrade_cost: 15,
                unlock_level: 1,
            },
            Self::Cannon => TowerStats {
                damage: 60,
                range: 100,
                attack_interval_ms: 2_000,
                cost: 45,
                upgrade_cost: 30,
                unlock_level: 1,
            },
            Self::Laser => TowerStats {
                damage: 35,
                range: 120,
                attack_interval_ms: 500,
                cost: 65,
                upgrade_cost: 40,
                unlock_level: 3,
            },
            Self::Ice => TowerStats {
                damage: 20,
                range: 90,
                attack_interval_ms: 1_200,
                cost: 35,
                upgrade_cost: 25,
                unlock_level: 2,
            },
            Self::Poison => TowerStats {
                damage: 15,
                range: 85,
                attack_interval_ms: 800,
                cost: 55,
                upgrade_cost: 35,
                unlock_level: 5,
            },
            Self::Lightning => TowerStats {
                damage: 80,
                range: 110,
                attack_interval_ms: 2_500,
                cost: 85,
                upgrade_cost: 50,
                unlock_level: 7,
            },
            Self::Missile => TowerStats {
                damage: 120,
                range: 150,
                attack_interval_ms: 3_000,
                cost: 120,
                upgrade_cost: 70,
                unlock_level: 10,
            },
            Self::Tesla => TowerStats {
                damage: 45,
                range: 95,
                attack_interval_ms: 600,
                cost: 95,
                upgrade_cost: 55,
                unlock_level: 12,
            },
        }
    }

    /// Human readable name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic Tower",
            Self::Cannon => "Cannon Tower",
            Self::Laser => "Laser Tower",
            Self::Ice => "Ice Tower",
            Self::Poison => "Poison Tower",
            Self::Lightning => "Lightning Tower",
            Self::Missile => "Missile Tower",
            Self::Tesla => "Tesla Tower",
        }
    }

    /// Reports whether the kind may target flying enemies.
    #[must_use]
    pub const fn is_anti_air(self) -> bool {
        matches!(self, Self::Laser | Self::Missile | Self::Lightning)
    }

    /// Reports whether projectiles fired by the kind splash on impact.
    #[must_use]
    pub const fn splashes(self) -> bool {
        matches!(self, Self::Cannon | Self::Missile)
    }

    /// Reports whether projectiles fired by the kind pierce along their flight.
    #[must_use]
    pub const fn pierces(self) -> bool {
        matches!(self, Self::Laser)
    }

    /// Flight speed of the kind's projectiles in units per reference frame.
    #[must_use]
    pub const fn projectile_speed(self) -> f32 {
        match self {
            Self::Missile => 8.0,
            Self::Laser => 12.0,
            _ => 6.0,
        }
    }

    /// Projectile fired by the kind.
    #[must_use]
    pub const fn projectile_kind(self) -> ProjectileKind {
        match self {
            Self::Basic => ProjectileKind::Bullet,
            Self::Cannon => ProjectileKind::Cannonball,
            Self::Laser => ProjectileKind::Laser,
            Self::Ice => ProjectileKind::Ice,
            Self::Poison => ProjectileKind::Poison,
            Self::Lightning => ProjectileKind::Lightning,
            Self::Missile => ProjectileKind::Missile,
            Self::Tesla => ProjectileKind::Tesla,
        }
    }
}

/// Visual and behavioural family of a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired by basic towers.
    Bullet,
    /// Fired by cannon towers.
    Cannonball,
    /// Fired by laser towers.
    Laser,
    /// Fired by ice towers.
    Ice,
    /// Fired by poison towers.
    Poison,
    /// Fired by lightning towers.
    Lightning,
    /// Fired by missile towers.
    Missile,
    /// Fired by tesla towers.
    Tesla,
}

impl ProjectileKind {
    /// Status effect inflicted on every enemy the projectile damages.
    #[must_use]
    pub const fn on_hit_effect(self) -> Option<EffectApplication> {
        match self {
            Self::Ice => Some(EffectApplication::new(
                EffectKind::Slow,
                ON_HIT_EFFECT_DURATION,
                0.5,
            )),
            Self::Poison => Some(EffectApplication::new(
                EffectKind::Poison,
                ON_HIT_EFFECT_DURATION,
                10.0,
            )),
            Self::Lightning => Some(EffectApplication::new(
                EffectKind::Burn,
                ON_HIT_EFFECT_DURATION,
                10.0,
            )),
            _ => None,
        }
    }
}

/// Status effects that can be attached to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Multiplies movement speed by the effect strength.
    Slow,
    /// Deals periodic damage equal to the effect strength.
    Burn,
    /// Multiplies movement speed by the effect strength.
    Freeze,
    /// Deals periodic damage equal to the effect strength.
    Poison,
}

impl EffectKind {
    /// Reports whether the effect scales movement speed.
    #[must_use]
    pub const fn scales_speed(self) -> bool {
        matches!(self, Self::Slow | Self::Freeze)
    }

    /// Reports whether the effect deals damage over time.
    #[must_use]
    pub const fn deals_damage(self) -> bool {
        matches!(self, Self::Burn | Self::Poison)
    }
}

/// Average time between two damage-over-time ticks.
pub const DAMAGE_TICK_PERIOD: Duration = Duration::from_micros(166_700);

/// Chance per simulation step that a damage-over-time effect ticks.
pub const DAMAGE_TICK_CHANCE: f64 = 0.1;

/// How burn and poison effects convert elapsed time into damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageOverTimeModel {
    /// One tick per [`DAMAGE_TICK_PERIOD`] of accumulated time.
    #[default]
    Periodic,
    /// One tick with probability [`DAMAGE_TICK_CHANCE`] every step.
    Stochastic,
}

/// Request to attach or refresh a status effect on an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectApplication {
    /// Kind of effect to apply.
    pub kind: EffectKind,
    /// Duration the effect should last at least.
    pub duration: Duration,
    /// Strength used when the effect is newly attached.
    pub strength: f32,
}

impl EffectApplication {
    /// Creates a new effect application.
    #[must_use]
    pub const fn new(kind: EffectKind, duration: Duration, strength: f32) -> Self {
        Self {
            kind,
            duration,
            strength,
        }
    }
}

/// Types of enemies that traverse the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline enemy.
    Basic,
    /// Fragile but quick.
    Fast,
    /// Slow and armored.
    Heavy,
    /// Only anti-air towers can target it.
    Flying,
    /// Heavily armored.
    Armored,
    /// Lightly armored and quick.
    Stealth,
    /// Massive health and armor.
    Boss,
    /// Weak enemy that comes in large groups.
    Swarm,
}

/// Base statistics shared by every enemy of a kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Health before level scaling.
    pub health: u32,
    /// Distance travelled per reference frame.
    pub speed: f32,
    /// Gold granted on death before the level multiplier.
    pub reward: u32,
    /// Flat damage reduction applied to every hit.
    pub armor: u32,
    /// Whether only anti-air towers may target the enemy.
    pub flying: bool,
}

impl EnemyKind {
    /// Base statistics for the kind.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Basic => EnemyStats {
                health: 100,
                speed: 1.0,
                reward: 12,
                armor: 0,
                flying: false,
            },
            Self::Fast => EnemyStats {
                health: 60,
                speed: 2.2,
                reward: 18,
                armor: 0,
                flying: false,
            },
            Self::Heavy => EnemyStats {
                health: 250,
                speed: 0.6,
                reward: 30,
                armor: 2,
                flying: false,
            },
            Self::Flying => EnemyStats {
                health: 80,
                speed: 1.8,
                reward: 25,
                armor: 0,
                flying: true,
            },
            Self::Armored => EnemyStats {
                health: 180,
                speed: 1.2,
                reward: 35,
                armor: 4,
                flying: false,
            },
            Self::Stealth => EnemyStats {
                health: 90,
                speed: 1.5,
                reward: 40,
                armor: 1,
                flying: false,
            },
            Self::Boss => EnemyStats {
                health: 800,
                speed: 0.8,
                reward: 150,
                armor: 5,
                flying: false,
            },
            Self::Swarm => EnemyStats {
                health: 30,
                speed: 1.8,
                reward: 8,
                armor: 0,
                flying: false,
            },
        }
    }

    /// Experience granted when an enemy of the kind is destroyed.
    #[must_use]
    pub const fn experience(self) -> u32 {
        match self {
            Self::Boss => 50,
            _ => 10,
        }
    }
}
