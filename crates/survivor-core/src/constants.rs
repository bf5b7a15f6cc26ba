//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Side length of the square arena (world units).
pub const MAP_SIZE: f64 = 1500.0;

/// Number of obstacles generated per map.
pub const OBSTACLE_COUNT: usize = 30;

/// Obstacle top-left corners are drawn from `[OBSTACLE_MARGIN, MAP_SIZE - OBSTACLE_MARGIN]`.
pub const OBSTACLE_MARGIN: f64 = 50.0;

/// Minimum obstacle side length.
pub const OBSTACLE_MIN_SIDE: f64 = 30.0;

/// Maximum obstacle side length.
pub const OBSTACLE_MAX_SIDE: f64 = 80.0;

/// Exit region side length. The exit sits in the bottom-right corner.
pub const EXIT_SIZE: f64 = 80.0;

/// Distance from the far map edges to the exit's top-left corner.
pub const EXIT_INSET: f64 = 100.0;

// --- Player ---

pub const PLAYER_START_X: f64 = 100.0;
pub const PLAYER_START_Y: f64 = 100.0;
pub const PLAYER_SPEED: f64 = 5.0;
pub const PLAYER_SIZE: f64 = 20.0;
pub const PLAYER_MAX_HEALTH: u32 = 5;

/// Number of weapon slots.
pub const WEAPON_SLOTS: usize = 2;

/// Global cooldown between hostile contact hits (ms).
pub const CONTACT_DAMAGE_COOLDOWN_MS: u64 = 1000;

/// Contact reach added to a hostile's size for player-contact checks.
pub const CONTACT_REACH: f64 = 20.0;

// --- Hostiles ---

pub const STANDARD_SPEED: f64 = 3.0;
pub const STANDARD_SIZE: f64 = 18.0;
pub const STANDARD_HEALTH: f64 = 3.0;

pub const FAST_SPEED: f64 = 4.0;
pub const FAST_SIZE: f64 = 16.0;
pub const FAST_HEALTH: f64 = 2.0;

pub const BOSS_SPEED: f64 = 2.0;
pub const BOSS_SIZE: f64 = 36.0;
pub const BOSS_HEALTH: f64 = 150.0;

/// Damage at or above this value is the insta-kill sentinel.
pub const INSTA_KILL_DAMAGE: f64 = 9999.0;

/// Divisor applied to sentinel damage against the boss.
pub const BOSS_INSTA_KILL_DIVISOR: f64 = 200.0;

// --- Movement ladder ---

/// Stuck score above which a hostile arms avoidance mode.
pub const STUCK_THRESHOLD: u32 = 30;

/// Ticks an armed avoidance heading stays in force.
pub const AVOIDANCE_DURATION: u32 = 60;

/// Minimum displacement counted as real progress.
pub const STUCK_EPSILON: f64 = 0.5;

/// Heading offsets tried by the wall-slide step (radians).
pub const WALL_SLIDE_OFFSETS: [f64; 8] = [
    0.3,
    -0.3,
    0.6,
    -0.6,
    0.9,
    -0.9,
    std::f64::consts::FRAC_PI_2,
    -std::f64::consts::FRAC_PI_2,
];

/// Speed fraction used while wall sliding.
pub const WALL_SLIDE_SPEED_FACTOR: f64 = 0.8;

/// Random headings tried by the jitter step.
pub const JITTER_ATTEMPTS: usize = 8;

/// Speed fraction used while jittering.
pub const JITTER_SPEED_FACTOR: f64 = 0.5;

/// Hostile-to-hostile proximity is `(size_a + size_b) * CLUSTER_FACTOR`...
pub const CLUSTER_FACTOR: f64 = 0.6;

/// ...capped at this absolute distance.
pub const CLUSTER_CUTOFF: f64 = 20.0;

// --- Projectiles ---

pub const PROJECTILE_SIZE: f64 = 5.0;

/// Ticks a homing projectile keeps retargeting.
pub const HOMING_WINDOW_TICKS: u32 = 90;

/// Number of pellets per shotgun blast (odd, so one flies dead centre).
pub const SHOTGUN_PELLETS: usize = 5;

/// Angular step between adjacent shotgun pellets (radians).
pub const SHOTGUN_PELLET_STEP: f64 = 0.2;

// --- Weapons ---
// Damage, cooldown (ms), projectile speed (units/tick), max ammo, reload (ms).

pub const PISTOL_DAMAGE: f64 = 1.0;
pub const PISTOL_COOLDOWN_MS: u64 = 300;
pub const PISTOL_SPEED: f64 = 10.0;
pub const PISTOL_MAX_AMMO: u32 = 12;
pub const PISTOL_RELOAD_MS: u64 = 2000;

pub const SHOTGUN_DAMAGE: f64 = 3.0;
pub const SHOTGUN_COOLDOWN_MS: u64 = 500;
pub const SHOTGUN_SPEED: f64 = 8.0;
pub const SHOTGUN_MAX_AMMO: u32 = 5;
/// Per shell.
pub const SHOTGUN_RELOAD_MS: u64 = 1000;

pub const MACHINE_GUN_DAMAGE: f64 = 2.0;
pub const MACHINE_GUN_COOLDOWN_MS: u64 = 100;
pub const MACHINE_GUN_SPEED: f64 = 12.0;
pub const MACHINE_GUN_MAX_AMMO: u32 = 30;
pub const MACHINE_GUN_RELOAD_MS: u64 = 3000;

pub const MINIGUN_DAMAGE: f64 = 2.0;
pub const MINIGUN_COOLDOWN_MS: u64 = 50;
pub const MINIGUN_SPEED: f64 = 14.0;
pub const MINIGUN_MAX_AMMO: u32 = 100;
pub const MINIGUN_RELOAD_MS: u64 = 4000;

pub const GRENADE_DAMAGE: f64 = 5.0;
pub const GRENADE_COOLDOWN_MS: u64 = 1500;
pub const GRENADE_SPEED: f64 = 6.0;
pub const GRENADE_EXPLOSION_RADIUS: f64 = 80.0;

// --- Ordnance ---

pub const ORDNANCE_SIZE: f64 = 8.0;

/// Flight ticks before auto-detonation.
pub const ORDNANCE_MAX_FLIGHT_TICKS: u32 = 90;

/// Ticks a detonated charge stays visible before removal.
pub const EXPLOSION_WINDOW_TICKS: u32 = 20;

// --- Scoring / abilities ---

pub const STANDARD_KILL_SCORE: u64 = 10;
pub const FAST_KILL_SCORE: u64 = 15;
pub const BOSS_KILL_SCORE: u64 = 500;

/// Ability charge (percent) gained per kill.
pub const ABILITY_CHARGE_PER_KILL: f64 = 5.0;

/// Full charge.
pub const ABILITY_CHARGE_MAX: f64 = 100.0;

/// Barrage window length (ms).
pub const BARRAGE_DURATION_MS: u64 = 10_000;

/// Kill streak milestone spacing.
pub const STREAK_MILESTONE: u32 = 10;

/// Bonus points per streak unit at each milestone.
pub const STREAK_BONUS_PER_KILL: u64 = 50;

// --- Pickups ---

pub const WEAPON_PICKUP_SIZE: f64 = 15.0;

/// Extra reach added to the weapon pickup size for collection.
pub const WEAPON_PICKUP_REACH: f64 = 20.0;

pub const POWERUP_PICKUP_RADIUS: f64 = 20.0;

/// Insta-kill power-up window (ms).
pub const INSTA_KILL_DURATION_MS: u64 = 10_000;

/// Pickup placement inset from the map edges.
pub const PICKUP_MARGIN: f64 = 100.0;

/// Placement attempts per pickup.
pub const PICKUP_PLACEMENT_ATTEMPTS: usize = 50;

// --- Wave spawning ---

/// Interval between waves (ms).
pub const WAVE_INTERVAL_MS: u64 = 5000;

/// Hostiles per wave.
pub const WAVE_SIZE: u32 = 7;

/// Total hostiles the director will ever spawn.
pub const MAX_HOSTILES: u32 = 100;

/// Wave index at which the boss enters.
pub const BOSS_WAVE: u32 = 4;

/// Fast fraction in waves 0 and 1.
pub const EARLY_FAST_CHANCE: f64 = 0.15;

/// Fast fraction in waves 2 and 3.
pub const MID_FAST_CHANCE: f64 = 0.30;

/// Spawn points are drawn from `[SPAWN_MARGIN, MAP_SIZE - SPAWN_MARGIN]`.
pub const SPAWN_MARGIN: f64 = 50.0;

/// Minimum spawn distance from the player.
pub const MIN_SPAWN_DISTANCE: f64 = 200.0;

/// Placement attempts per hostile.
pub const SPAWN_PLACEMENT_ATTEMPTS: usize = 100;

// --- Display ---

/// How long a skill-bonus notification stays relevant (ms).
pub const SKILL_BONUS_DISPLAY_MS: u64 = 3000;
