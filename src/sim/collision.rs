//! Collision detection between players and enemies
//!
//! Player hitboxes are smaller than the sprite so grazing a number does not
//! count. There is no broad phase: a run keeps tens of enemies on screen.

use super::rect::Rect;
use super::state::{Enemy, Player};
use crate::consts::HITBOX_SHRINK;

/// The forgiving box used for a player's collisions
pub fn player_hitbox(player: &Player) -> Rect {
    player.rect().inflate(-HITBOX_SHRINK, -HITBOX_SHRINK)
}

/// Check a hitbox against every enemy, stopping at the first overlap
pub fn player_touching_enemy(hitbox: &Rect, enemies: &[Enemy]) -> bool {
    enemies.iter().any(|enemy| hitbox.intersects(&enemy.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::intent::Controls;
    use crate::sim::kinematics::Movement;
    use crate::sim::state::{EnemyLabel, Rotation};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(x: f32, y: f32, w: f32, h: f32) -> Enemy {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut enemy = Enemy::spawn(
            Vec2::new(x, y),
            0.1,
            EnemyLabel::new("1", h),
            Movement::linear(),
            Rotation::None,
            &[],
            &mut rng,
        );
        enemy.size = Vec2::new(w, h);
        enemy
    }

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(1, Controls::All);
        player.pos = Vec2::new(x, y);
        player
    }

    #[test]
    fn test_hitbox_is_shrunk_on_each_side() {
        let player = player_at(100.0, 100.0);
        let hitbox = player_hitbox(&player);
        assert_eq!(hitbox, Rect::new(107.0, 107.0, 18.0, 18.0));
    }

    #[test]
    fn test_overlap_hits() {
        let player = player_at(100.0, 100.0);
        let enemies = [enemy(110.0, 110.0, 20.0, 20.0)];
        assert!(player_touching_enemy(&player_hitbox(&player), &enemies));
    }

    #[test]
    fn test_disjoint_misses() {
        let player = player_at(100.0, 100.0);
        let enemies = [enemy(300.0, 300.0, 20.0, 20.0)];
        assert!(!player_touching_enemy(&player_hitbox(&player), &enemies));
    }

    #[test]
    fn test_sprite_graze_outside_hitbox_misses() {
        // Overlaps the 32px sprite but not the shrunk 18px hitbox
        let player = player_at(100.0, 100.0);
        let enemies = [enemy(128.0, 100.0, 20.0, 20.0)];
        assert!(player.rect().intersects(&enemies[0].rect()));
        assert!(!player_touching_enemy(&player_hitbox(&player), &enemies));
    }

    #[test]
    fn test_any_enemy_counts() {
        let player = player_at(100.0, 100.0);
        let enemies = [
            enemy(500.0, 10.0, 20.0, 20.0),
            enemy(0.0, 400.0, 20.0, 20.0),
            enemy(115.0, 115.0, 5.0, 5.0),
        ];
        assert!(player_touching_enemy(&player_hitbox(&player), &enemies));
    }

    #[test]
    fn test_no_enemies_no_hit() {
        let player = player_at(100.0, 100.0);
        assert!(!player_touching_enemy(&player_hitbox(&player), &[]));
    }
}
