//! Enemy spawning
//!
//! Two independent timers drive a run:
//! - the level timer, which bumps the level every `LEVEL_LENGTH_MS` and
//!   sends a "LEVEL n" banner across the screen
//! - the spawn timer, whose interval shrinks with `sqrt(level)`, and which
//!   scores a point and spawns a pair of numbers each time it fires
//!
//! Behaviour variants unlock by level and are rolled per enemy, so the
//! pattern never repeats exactly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::kinematics::{self, Heading, Movement};
use super::state::{Enemy, EnemyLabel, Rotation, Tint};
use crate::average_enemy_speed;
use crate::consts::*;

/// Aimed enemies appear from this level on
pub const AIMED_FROM_LEVEL: u32 = 2;
/// Rotated enemies appear from this level on
pub const ROTATED_FROM_LEVEL: u32 = 2;
/// Left-edge enemies may turn erratic from this level on
pub const LEFT_ERRATIC_FROM_LEVEL: u32 = 3;
/// Right-edge enemies may turn erratic from this level on
pub const RIGHT_ERRATIC_FROM_LEVEL: u32 = 4;

/// Spawn interval for a level: base delay over the square root of the level
pub fn spawn_interval(level: u32) -> f32 {
    ENEMY_SPAWN_DELAY_MS / (level.max(1) as f32).sqrt()
}

/// Roll a 1-in-`n` chance
fn one_in(rng: &mut Pcg32, n: u32) -> bool {
    rng.random_range(1..=n) == 1
}

/// Level and spawn timers of a run
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Milliseconds until the next level
    pub time_until_level: f32,
    /// Milliseconds accumulated toward the next spawn cycle
    pub spawn_time: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            time_until_level: LEVEL_LENGTH_MS,
            spawn_time: 0.0,
        }
    }

    /// Count down the level timer. Returns true when a new level starts.
    ///
    /// The timer restarts at full length; overshoot is not carried over.
    pub fn advance_level_timer(&mut self, elapsed_ms: f32) -> bool {
        self.time_until_level -= elapsed_ms;
        if self.time_until_level <= 0.0 {
            self.time_until_level = LEVEL_LENGTH_MS;
            true
        } else {
            false
        }
    }

    /// Accumulate frame time. Returns true when a spawn cycle fires.
    ///
    /// At most one cycle fires per frame; the remainder past the interval
    /// carries into the next cycle.
    pub fn advance_spawn_timer(&mut self, elapsed_ms: f32, level: u32) -> bool {
        self.spawn_time += elapsed_ms;
        let interval = spawn_interval(level);
        if self.spawn_time >= interval {
            self.spawn_time -= interval;
            true
        } else {
            false
        }
    }
}

/// The red "LEVEL n" enemy announcing a new level
pub fn level_banner(level: u32, rng: &mut Pcg32) -> Enemy {
    let y = rng.random_range(BANNER_MARGIN..=SCREEN_HEIGHT - BANNER_MARGIN);
    Enemy::spawn(
        Vec2::new(SCREEN_WIDTH - SPAWN_INSET, y),
        ENEMY_MAX_SPEED,
        EnemyLabel::new(format!("LEVEL {}", level), BANNER_GLYPH_SIZE),
        Movement::linear(),
        Rotation::None,
        &[],
        rng,
    )
    .with_tint(Tint::Red)
}

/// One spawn cycle: a number from the right edge and one from the left.
///
/// The right-edge number rolls for aimed, erratic and rotated variants
/// depending on the level. The left-edge number shows the running score,
/// moves at the average enemy speed and turns erratic half of the time from
/// `LEFT_ERRATIC_FROM_LEVEL` on.
pub fn number_pair(level: u32, score: u64, targets: &[Vec2], rng: &mut Pcg32) -> [Enemy; 2] {
    let y = rng.random_range(0.0..=SCREEN_HEIGHT);
    let speed = rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);
    let text = rng.random_range(1..=1024u32).to_string();

    let erratic = level >= RIGHT_ERRATIC_FROM_LEVEL && one_in(rng, 10);
    let aimed = level >= AIMED_FROM_LEVEL && one_in(rng, 10);
    let rotated = level >= ROTATED_FROM_LEVEL && one_in(rng, 4);

    let rotation = if rotated {
        match rng.random_range(0..3) {
            0 => Rotation::Quarter,
            1 => Rotation::Half,
            _ => Rotation::ThreeQuarter,
        }
    } else {
        Rotation::None
    };

    // Both numbers of a pair share a glyph size
    let glyph_size = rng.random_range(20..=30) as f32;

    let heading = if aimed { Heading::Aimed } else { Heading::Linear };
    let right = Enemy::spawn(
        Vec2::new(SCREEN_WIDTH - SPAWN_INSET, y),
        speed,
        EnemyLabel::new(text, glyph_size),
        Movement { heading, erratic },
        rotation,
        targets,
        rng,
    );

    let y = rng.random_range(0.0..=SCREEN_HEIGHT);
    let erratic = level >= LEFT_ERRATIC_FROM_LEVEL && one_in(rng, 2);
    let left = Enemy::spawn(
        Vec2::new(SPAWN_INSET, y),
        average_enemy_speed(),
        EnemyLabel::new(score.to_string(), glyph_size),
        Movement::linear().with_erratic(erratic),
        Rotation::None,
        targets,
        rng,
    );

    [right, left]
}

/// Numbers scrolling behind the main menu
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    pub enemies: Vec<Enemy>,
    spawn_time: f32,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn on the base delay and move everything one frame
    pub fn update(&mut self, elapsed_ms: f32, rng: &mut Pcg32) {
        self.spawn_time += elapsed_ms;
        if self.spawn_time >= ENEMY_SPAWN_DELAY_MS {
            self.spawn_time -= ENEMY_SPAWN_DELAY_MS;
            let y = rng.random_range(0.0..=SCREEN_HEIGHT);
            let speed = rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);
            let text = rng.random_range(1..=1024u32).to_string();
            let glyph_size = rng.random_range(20..=50) as f32;
            self.enemies.push(Enemy::spawn(
                Vec2::new(SCREEN_WIDTH - SPAWN_INSET, y),
                speed,
                EnemyLabel::new(text, glyph_size),
                Movement::linear(),
                Rotation::None,
                &[],
                rng,
            ));
        }

        self.enemies
            .retain_mut(|enemy| kinematics::update_enemy(enemy, elapsed_ms, rng));
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.spawn_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_interval_scaling() {
        assert_eq!(spawn_interval(1), ENEMY_SPAWN_DELAY_MS);
        assert_eq!(spawn_interval(4), ENEMY_SPAWN_DELAY_MS / 2.0);
        assert!(spawn_interval(9) < spawn_interval(4));
    }

    #[test]
    fn test_spawn_timer_fires_once_and_carries() {
        let mut spawner = Spawner::new();
        assert!(!spawner.advance_spawn_timer(499.0, 1));
        assert!(spawner.advance_spawn_timer(3.0, 1));
        assert!((spawner.spawn_time - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_spawn_timer_one_cycle_per_frame() {
        let mut spawner = Spawner::new();
        // A long frame still only fires once
        assert!(spawner.advance_spawn_timer(1200.0, 1));
        assert!((spawner.spawn_time - 700.0).abs() < 1e-3);
        assert!(spawner.advance_spawn_timer(0.0, 1));
        assert!(!spawner.advance_spawn_timer(0.0, 1));
    }

    #[test]
    fn test_level_timer_resets_without_carry() {
        let mut spawner = Spawner::new();
        assert!(!spawner.advance_level_timer(LEVEL_LENGTH_MS - 1.0));
        assert!(spawner.advance_level_timer(50.0));
        assert_eq!(spawner.time_until_level, LEVEL_LENGTH_MS);
    }

    #[test]
    fn test_level_banner() {
        let mut rng = Pcg32::seed_from_u64(5);
        let banner = level_banner(3, &mut rng);
        assert_eq!(banner.label.text, "LEVEL 3");
        assert_eq!(banner.tint, Tint::Red);
        assert_eq!(banner.vel, Vec2::new(-ENEMY_MAX_SPEED, 0.0));
        assert!(banner.pos.y >= BANNER_MARGIN);
        assert!(banner.pos.y <= SCREEN_HEIGHT - BANNER_MARGIN);
    }

    #[test]
    fn test_pair_origins() {
        let mut rng = Pcg32::seed_from_u64(5);
        let [right, left] = number_pair(1, 12, &[Vec2::new(320.0, 240.0)], &mut rng);
        assert_eq!(right.pos.x, SCREEN_WIDTH - SPAWN_INSET);
        assert_eq!(left.pos.x, SPAWN_INSET);
        assert_eq!(left.label.text, "12");
        assert_eq!(left.speed, average_enemy_speed());
        assert_eq!(right.label.glyph_size, left.label.glyph_size);
    }

    #[test]
    fn test_level_one_has_no_variants() {
        let mut rng = Pcg32::seed_from_u64(17);
        let targets = [Vec2::new(320.0, 240.0)];
        for _ in 0..500 {
            let [right, left] = number_pair(1, 0, &targets, &mut rng);
            assert_eq!(right.movement, Movement::linear());
            assert_eq!(right.rotation, Rotation::None);
            assert!(!left.movement.erratic);
            assert!(right.speed >= ENEMY_MIN_SPEED && right.speed <= ENEMY_MAX_SPEED);
        }
    }

    #[test]
    fn test_variants_unlock_by_level() {
        let mut rng = Pcg32::seed_from_u64(23);
        let targets = [Vec2::new(320.0, 240.0)];

        let mut aimed = 0;
        let mut rotated = 0;
        let mut right_erratic = 0;
        let mut left_erratic = 0;
        for _ in 0..2_000 {
            let [right, left] = number_pair(2, 0, &targets, &mut rng);
            aimed += (right.movement.heading == Heading::Aimed) as u32;
            rotated += (right.rotation != Rotation::None) as u32;
            right_erratic += right.movement.erratic as u32;
            left_erratic += left.movement.erratic as u32;
        }
        assert!(aimed > 0);
        assert!(rotated > aimed);
        assert_eq!(right_erratic, 0);
        assert_eq!(left_erratic, 0);

        let mut right_erratic = 0;
        let mut left_erratic = 0;
        for _ in 0..2_000 {
            let [right, left] = number_pair(4, 0, &targets, &mut rng);
            right_erratic += right.movement.erratic as u32;
            left_erratic += left.movement.erratic as u32;
        }
        // Roughly 1/10 and 1/2
        assert!(right_erratic > 100 && right_erratic < 300);
        assert!(left_erratic > 800 && left_erratic < 1200);
    }

    #[test]
    fn test_backdrop_spawns_on_delay() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut backdrop = Backdrop::new();
        backdrop.update(ENEMY_SPAWN_DELAY_MS - 1.0, &mut rng);
        assert!(backdrop.enemies.is_empty());
        backdrop.update(1.0, &mut rng);
        assert_eq!(backdrop.enemies.len(), 1);
        assert!(!backdrop.enemies[0].movement.erratic);
        backdrop.clear();
        assert!(backdrop.enemies.is_empty());
    }
}
