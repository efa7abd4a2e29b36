//! Compiled-in level layouts.

use log::warn;

use crate::entities::PickupKind::{self, Ammo, Health};
use crate::entities::{Platform, GROUND_PLATFORM_ID};

/// Number of hand-built layouts.
pub const LEVEL_COUNT: u32 = 3;
pub const LEVEL_HEIGHT: f32 = 500.0;

const GROUND_Y: f32 = 480.0;
const PLATFORM_THICKNESS: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub platform_id: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSpawn {
    pub x: f32,
    pub y: f32,
    pub kind: PickupKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    pub width: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<EnemySpawn>,
    pub pickups: Vec<PickupSpawn>,
}

pub fn level_width(level: u32) -> f32 {
    2000.0 + 400.0 * level as f32
}

/// Build the layout for `level`. The ground platform is always appended last.
/// Indices outside `1..=LEVEL_COUNT` produce only the ground.
pub fn generate(level: u32) -> LevelLayout {
    let width = level_width(level);

    let (platforms, enemies, pickups): (&[PlatformRow], &[EnemyRow], &[PickupRow]) = match level {
        1 => (LEVEL_1_PLATFORMS, LEVEL_1_ENEMIES, LEVEL_1_PICKUPS),
        2 => (LEVEL_2_PLATFORMS, LEVEL_2_ENEMIES, LEVEL_2_PICKUPS),
        3 => (LEVEL_3_PLATFORMS, LEVEL_3_ENEMIES, LEVEL_3_PICKUPS),
        _ => {
            warn!("no layout for level {level}; generating ground only");
            Default::default()
        }
    };

    let mut platforms: Vec<Platform> = platforms
        .iter()
        .map(|&(x, y, w, id)| Platform::new(x, y, w, PLATFORM_THICKNESS, id))
        .collect();
    platforms.push(Platform::new(0.0, GROUND_Y, width, PLATFORM_THICKNESS, GROUND_PLATFORM_ID));

    LevelLayout {
        width,
        platforms,
        enemies: enemies
            .iter()
            .map(|&(x, y, platform_id)| EnemySpawn { x, y, platform_id })
            .collect(),
        pickups: pickups
            .iter()
            .map(|&(x, y, kind)| PickupSpawn { x, y, kind })
            .collect(),
    }
}

// ── Layout tables ─────────────────────────────────────────────────────────────

/// (x, y, width, id)
type PlatformRow = (f32, f32, f32, u32);
/// (x, y, platform id)
type EnemyRow = (f32, f32, u32);
/// (x, y, kind)
type PickupRow = (f32, f32, PickupKind);

const LEVEL_1_PLATFORMS: &[PlatformRow] = &[
    (0.0, 450.0, 400.0, 1),
    (450.0, 400.0, 300.0, 2),
    (800.0, 350.0, 250.0, 3),
    (1100.0, 300.0, 300.0, 4),
    (1500.0, 400.0, 300.0, 5),
    (1900.0, 350.0, 200.0, 6),
];

const LEVEL_1_ENEMIES: &[EnemyRow] = &[
    (500.0, 380.0, 2),
    (850.0, 330.0, 3),
    (1200.0, 280.0, 4),
    (1600.0, 380.0, 5),
];

const LEVEL_1_PICKUPS: &[PickupRow] = &[
    (420.0, 370.0, Health),
    (700.0, 320.0, Ammo),
    (1250.0, 270.0, Health),
    (1700.0, 370.0, Ammo),
];

const LEVEL_2_PLATFORMS: &[PlatformRow] = &[
    (0.0, 450.0, 350.0, 1),
    (400.0, 400.0, 300.0, 2),
    (750.0, 350.0, 280.0, 3),
    (1080.0, 300.0, 320.0, 4),
    (1450.0, 250.0, 250.0, 5),
    (1750.0, 400.0, 200.0, 6),
    (2000.0, 350.0, 180.0, 7),
    (2230.0, 300.0, 170.0, 8),
];

const LEVEL_2_ENEMIES: &[EnemyRow] = &[
    (450.0, 380.0, 2),
    (800.0, 330.0, 3),
    (1150.0, 280.0, 4),
    (1550.0, 230.0, 5),
    (1850.0, 380.0, 6),
    (2100.0, 330.0, 7),
];

const LEVEL_2_PICKUPS: &[PickupRow] = &[
    (380.0, 370.0, Ammo),
    (900.0, 270.0, Health),
    (1300.0, 220.0, Ammo),
    (1650.0, 170.0, Health),
    (1950.0, 320.0, Ammo),
    (2300.0, 270.0, Health),
];

const LEVEL_3_PLATFORMS: &[PlatformRow] = &[
    (0.0, 450.0, 300.0, 1),
    (350.0, 420.0, 280.0, 2),
    (680.0, 390.0, 260.0, 3),
    (990.0, 360.0, 240.0, 4),
    (1280.0, 330.0, 220.0, 5),
    (1550.0, 400.0, 200.0, 6),
    (1800.0, 280.0, 180.0, 7),
    (2030.0, 250.0, 160.0, 8),
    (2240.0, 350.0, 140.0, 9),
    (2430.0, 300.0, 120.0, 10),
    (2600.0, 400.0, 100.0, 11),
];

const LEVEL_3_ENEMIES: &[EnemyRow] = &[
    (400.0, 400.0, 2),
    (730.0, 370.0, 3),
    (1040.0, 340.0, 4),
    (1350.0, 310.0, 5),
    (1650.0, 380.0, 6),
    (1900.0, 260.0, 7),
    (2130.0, 230.0, 8),
    (2340.0, 330.0, 9),
];

const LEVEL_3_PICKUPS: &[PickupRow] = &[
    (320.0, 370.0, Health),
    (600.0, 310.0, Ammo),
    (950.0, 280.0, Health),
    (1250.0, 250.0, Ammo),
    (1600.0, 320.0, Health),
    (1850.0, 200.0, Ammo),
    (2100.0, 150.0, Health),
    (2400.0, 250.0, Ammo),
];
