//! Per-frame simulation step
//!
//! Order within a frame:
//! 1. copy input into player intents
//! 2. level timer (may spawn a banner)
//! 3. spawn timer (may score and spawn a pair)
//! 4. move players and enemies
//! 5. collisions, removal of hit players, game over check

use super::collision::{player_hitbox, player_touching_enemy};
use super::intent::TickInput;
use super::kinematics::{update_enemy, update_player};
use super::rect::Rect;
use super::spawner::{level_banner, number_pair};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one frame of `elapsed_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.elapsed_ms += elapsed_ms as f64;

    for player in &mut state.players {
        player.intent = input.intent_for(player.controls);
    }

    // New level
    if state.spawner.advance_level_timer(elapsed_ms) {
        state.level += 1;
        log::info!("Level {}", state.level);
        let banner = level_banner(state.level, &mut state.rng);
        state.enemies.push(banner);
    }

    // Spawn cycle
    if state.spawner.advance_spawn_timer(elapsed_ms, state.level) {
        state.score += 1;
        let targets = state.player_positions();
        let pair = number_pair(state.level, state.score, &targets, &mut state.rng);
        state.enemies.extend(pair);
    }

    let screen = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
    for player in &mut state.players {
        update_player(player, elapsed_ms, &screen);
    }

    let rng = &mut state.rng;
    state
        .enemies
        .retain_mut(|enemy| update_enemy(enemy, elapsed_ms, rng));

    let enemies = &state.enemies;
    let events = &mut state.events;
    state.players.retain(|player| {
        let hit = player_touching_enemy(&player_hitbox(player), enemies);
        if hit {
            log::info!("Player {} was hit", player.slot);
            events.push(GameEvent::PlayerDown { slot: player.slot });
        }
        !hit
    });

    if state.players.is_empty() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} at level {}",
            state.score,
            state.level
        );
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::intent::{ControlScheme, Controls, Intent};
    use crate::sim::kinematics::{Heading, Movement};
    use crate::sim::state::{Enemy, EnemyLabel, Rotation};
    use glam::Vec2;

    /// Enemy parked on top of a spot, not moving
    fn parked_enemy(state: &mut GameState, pos: Vec2) -> Enemy {
        let mut enemy = Enemy::spawn(
            pos,
            0.0,
            EnemyLabel::new("8", 20.0),
            Movement::linear(),
            Rotation::None,
            &[],
            &mut state.rng,
        );
        enemy.vel = Vec2::ZERO;
        enemy
    }

    #[test]
    fn test_first_spawn_cycle() {
        let mut state = GameState::single(42);
        // Keep the player clear of anything that spawns
        state.players[0].pos = Vec2::new(300.0, 0.0);
        let input = TickInput::default();

        tick(&mut state, &input, 250.0);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());

        tick(&mut state, &input, 250.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies[0].pos.x > SCREEN_WIDTH / 2.0);
        assert!(state.enemies[1].pos.x < SCREEN_WIDTH / 2.0);
        assert_eq!(state.enemies[1].label.text, "1");
    }

    #[test]
    fn test_spawn_after_base_delay_in_small_frames() {
        let mut state = GameState::single(42);
        state.players[0].pos = Vec2::new(300.0, 0.0);
        for _ in 0..49 {
            tick(&mut state, &TickInput::default(), 10.0);
        }
        assert_eq!(state.score, 0);
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_level_up_spawns_banner() {
        let mut state = GameState::single(3);
        state.spawner.time_until_level = 10.0;
        state.spawner.spawn_time = -1_000.0;

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].label.text, "LEVEL 2");
        assert_eq!(state.spawner.time_until_level, LEVEL_LENGTH_MS);
    }

    #[test]
    fn test_input_reaches_matching_player() {
        let controls = [
            Controls::Scheme(ControlScheme::Wasd),
            Controls::Scheme(ControlScheme::Arrows),
        ];
        let mut state = GameState::new(1, &controls);
        let mut input = TickInput::default();
        input.set(
            ControlScheme::Arrows,
            Intent {
                left: true,
                ..Default::default()
            },
        );

        tick(&mut state, &input, 16.0);
        assert_eq!(state.players[0].vel, Vec2::ZERO);
        assert!(state.players[1].vel.x < 0.0);
    }

    #[test]
    fn test_hit_player_is_removed() {
        let controls = [
            Controls::Scheme(ControlScheme::Wasd),
            Controls::Scheme(ControlScheme::Arrows),
        ];
        let mut state = GameState::new(1, &controls);
        state.players[1].pos = Vec2::new(20.0, 20.0);
        let target = state.players[0].pos;
        let enemy = parked_enemy(&mut state, target);
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].slot, 2);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.events.contains(&GameEvent::PlayerDown { slot: 1 }));
    }

    #[test]
    fn test_last_player_hit_ends_run() {
        let mut state = GameState::single(1);
        let target = state.players[0].pos;
        let enemy = parked_enemy(&mut state, target);
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), 1.0);
        assert!(state.players.is_empty());
        assert!(state.is_over());
        assert!(state.events.contains(&GameEvent::GameOver { score: 0, level: 1 }));

        // Further ticks are ignored
        let elapsed = state.elapsed_ms;
        tick(&mut state, &TickInput::default(), 500.0);
        assert_eq!(state.elapsed_ms, elapsed);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_offscreen_enemies_are_dropped() {
        let mut state = GameState::single(1);
        let mut enemy = parked_enemy(&mut state, Vec2::new(-20.0, 10.0));
        enemy.size = Vec2::new(10.0, 20.0);
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), 1.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_aimed_enemy_keeps_velocity_after_target_dies() {
        let controls = [
            Controls::Scheme(ControlScheme::Wasd),
            Controls::Scheme(ControlScheme::Arrows),
        ];
        let mut state = GameState::new(1, &controls);
        state.players[1].pos = Vec2::new(20.0, 20.0);
        state.spawner.spawn_time = -10_000.0;

        let targets = [state.players[0].pos];
        let mut aimed = Enemy::spawn(
            Vec2::new(600.0, 400.0),
            0.1,
            EnemyLabel::new("3", 20.0),
            Movement {
                heading: Heading::Aimed,
                erratic: false,
            },
            Rotation::None,
            &targets,
            &mut state.rng,
        );
        aimed.size = Vec2::new(1.0, 1.0);
        let launch_vel = aimed.vel;
        state.enemies.push(aimed);

        let killer = parked_enemy(&mut state, targets[0]);
        state.enemies.push(killer);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.players.len(), 1);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.enemies[0].vel, launch_vel);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::single(99_999);
        let mut state2 = GameState::single(99_999);

        let mut input = TickInput::default();
        input.set(
            ControlScheme::Wasd,
            Intent {
                up: true,
                ..Default::default()
            },
        );

        for _ in 0..600 {
            tick(&mut state1, &input, 16.0);
            tick(&mut state2, &input, 16.0);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.players.len(), state2.players.len());
    }
}
