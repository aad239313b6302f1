//! Entity kinematics
//!
//! Players accelerate from held input and coast to a stop under
//! exponential friction. Enemies move at a constant speed picked at spawn,
//! steered by a `Heading` and optionally shaken by `Erratic`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::intent::Intent;
use super::rect::Rect;
use super::state::{Enemy, Player};
use crate::consts::*;

/// Decay a velocity by `(1 - friction)^elapsed_ms` on each axis.
///
/// Components that end up below `VELOCITY_SNAP` in magnitude become exactly
/// zero so a coasting player actually stops.
pub fn apply_friction(vel: Vec2, elapsed_ms: f32, friction: f32) -> Vec2 {
    let decay = (1.0 - friction).powf(elapsed_ms);
    let snap = |v: f32| if v.abs() < VELOCITY_SNAP { 0.0 } else { v };
    let decayed = vel * decay;
    Vec2::new(snap(decayed.x), snap(decayed.y))
}

/// Add held input to a velocity
pub fn accelerate(vel: Vec2, intent: Intent, elapsed_ms: f32) -> Vec2 {
    vel + Vec2::new(intent.axis_x(), intent.axis_y()) * PLAYER_SPEED * elapsed_ms
}

/// Move a box by `delta`, one axis at a time.
///
/// Each axis step is kept only if the moved box is still inside `bounds`,
/// so pushing into a wall on one axis still lets the other axis slide.
pub fn move_within(rect: Rect, delta: Vec2, bounds: &Rect) -> Vec2 {
    let mut pos = rect.pos;

    let moved_x = Vec2::new(pos.x + delta.x, pos.y);
    if bounds.contains(&rect.at(moved_x)) {
        pos = moved_x;
    }

    let moved_y = Vec2::new(pos.x, pos.y + delta.y);
    if bounds.contains(&rect.at(moved_y)) {
        pos = moved_y;
    }

    pos
}

/// Advance a player by one frame.
///
/// Velocity is a per-frame displacement: friction and input scale with the
/// frame time, the position step itself does not.
pub fn update_player(player: &mut Player, elapsed_ms: f32, bounds: &Rect) {
    player.vel = apply_friction(player.vel, elapsed_ms, FRICTION);
    player.vel = accelerate(player.vel, player.intent, elapsed_ms);
    player.pos = move_within(player.rect(), player.vel, bounds);
}

/// Advance an enemy by one frame.
///
/// Returns false once the enemy has left through the left edge and should be
/// dropped; its position is not advanced in that case.
pub fn update_enemy(enemy: &mut Enemy, elapsed_ms: f32, rng: &mut Pcg32) -> bool {
    if enemy.movement.erratic {
        let mut ctx = SteerContext {
            pos: enemy.pos,
            speed: enemy.speed,
            targets: &[],
            rng,
        };
        enemy.vel = Erratic.compute_velocity(enemy.vel, &mut ctx);
    }

    let new_pos = enemy.pos + enemy.vel * elapsed_ms;
    if new_pos.x + enemy.size.x > ENEMY_DESPAWN_EDGE {
        enemy.pos = new_pos;
        true
    } else {
        false
    }
}

/// What a steering strategy can see
pub struct SteerContext<'a> {
    /// Position of the steered enemy
    pub pos: Vec2,
    /// Its fixed speed
    pub speed: f32,
    /// Player positions, for strategies that aim
    pub targets: &'a [Vec2],
    pub rng: &'a mut Pcg32,
}

/// A rule producing an enemy velocity
pub trait Steering {
    fn compute_velocity(&self, current: Vec2, ctx: &mut SteerContext<'_>) -> Vec2;
}

/// Direction an enemy is launched in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    /// Straight to the left
    #[default]
    Linear,
    /// Toward a randomly picked player
    Aimed,
}

impl Steering for Heading {
    fn compute_velocity(&self, _current: Vec2, ctx: &mut SteerContext<'_>) -> Vec2 {
        let leftward = Vec2::new(-ctx.speed, 0.0);
        match self {
            Heading::Linear => leftward,
            Heading::Aimed => {
                if ctx.targets.is_empty() {
                    return leftward;
                }
                let target = ctx.targets[ctx.rng.random_range(0..ctx.targets.len())];
                // Sitting on the target gives no direction to aim in
                match (target - ctx.pos).try_normalize() {
                    Some(dir) => dir * ctx.speed,
                    None => leftward,
                }
            }
        }
    }
}

/// Random vertical kick every frame.
///
/// The kicks are not damped, so vertical speed random-walks for the
/// enemy's whole life.
#[derive(Debug, Clone, Copy, Default)]
pub struct Erratic;

impl Steering for Erratic {
    fn compute_velocity(&self, current: Vec2, ctx: &mut SteerContext<'_>) -> Vec2 {
        let kick = ctx.rng.random_range(-ENEMY_MIN_SPEED..=ENEMY_MIN_SPEED);
        Vec2::new(current.x, current.y + kick)
    }
}

/// How an enemy moves: a launch heading plus the optional erratic modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Movement {
    pub heading: Heading,
    pub erratic: bool,
}

impl Movement {
    pub fn linear() -> Self {
        Self::default()
    }

    pub fn with_erratic(mut self, erratic: bool) -> Self {
        self.erratic = erratic;
        self
    }
}
