// Shell flight, hit detection and the enemy respawn policy

use super::entities::{Enemy, Shell, ENEMY_COUNT};
use super::tuning::Tuning;
use crate::core::math::{spawn_bounds, within_open};
use glam::Vec3;
use rand::Rng;

/// Move a flying shell one tick forward, or despawn it if it already flew out
/// of range
///
/// The range is checked before moving, so the last position tested for hits
/// may lie up to one step past the range. Returns whether the shell is still
/// in flight.
pub fn advance_shell(shell: &mut Shell, player_z: f32, tuning: &Tuning) -> bool {
    if !shell.visible {
        return false;
    }

    if shell.position.z > player_z + tuning.shell_range {
        shell.visible = false;
        return false;
    }
    shell.position.z += tuning.shell_speed;
    true
}

/// Test the shell against every visible enemy in index order
///
/// The first enemy whose window contains the shell is destroyed together with
/// the shell and its index returned. At most one enemy is hit per call.
pub fn check_hit(shell: &mut Shell, enemies: &mut [Enemy], tuning: &Tuning) -> Option<usize> {
    if !shell.visible {
        return None;
    }

    let hit = enemies.iter().position(|enemy| {
        enemy.visible
            && within_open(
                shell.position.z,
                enemy.position.z - tuning.hit_z_behind,
                enemy.position.z + tuning.hit_z_ahead,
            )
            && within_open(
                shell.position.x,
                enemy.position.x - tuning.hit_half_width,
                enemy.position.x + tuning.hit_half_width,
            )
    })?;

    enemies[hit].visible = false;
    shell.visible = false;
    Some(hit)
}

/// Whether a kill total completes a wave
pub fn wave_complete(kills: u32, tuning: &Tuning) -> bool {
    kills > 0 && kills % tuning.respawn_every == 0
}

/// Pick a spawn point ahead of the player, in whole units
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, player_z: f32, tuning: &Tuning) -> Vec3 {
    let (x_low, x_high) = spawn_bounds(tuning.spawn_x_min, tuning.spawn_x_max);
    let (z_low, z_high) = spawn_bounds(player_z + tuning.spawn_min_ahead, tuning.spawn_z_max);

    let x = rng.gen_range(x_low..=x_high);
    let z = rng.gen_range(z_low..=z_high);
    Vec3::new(x as f32, 0.0, z as f32)
}

/// Relocate every enemy ahead of the player and reveal them all at once
pub fn respawn_wave<R: Rng + ?Sized>(
    enemies: &mut [Enemy; ENEMY_COUNT],
    player_z: f32,
    rng: &mut R,
    tuning: &Tuning,
) {
    for enemy in enemies.iter_mut() {
        enemy.position = spawn_position(rng, player_z, tuning);
        enemy.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId, ModelHandle};
    use crate::game::tuning::TUNING;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn handle(name: &str) -> ModelHandle {
        AssetHandle::new(AssetId::from_path(name))
    }

    fn enemies_at(positions: [Vec3; ENEMY_COUNT]) -> [Enemy; ENEMY_COUNT] {
        positions.map(|p| Enemy::new(handle("tank.obj"), p))
    }

    fn flying_shell(position: Vec3) -> Shell {
        let mut shell = Shell::new(handle("bullet.obj"));
        shell.launch(position);
        shell
    }

    #[test]
    fn test_advance_moves_along_z() {
        let mut shell = flying_shell(Vec3::new(-0.3, 2.35, 6.4));
        assert!(advance_shell(&mut shell, 0.0, &TUNING));
        assert_relative_eq!(shell.position.z, 7.4);
        assert_eq!(shell.position.x, -0.3);
    }

    #[test]
    fn test_advance_ignores_hidden_shell() {
        let mut shell = Shell::new(handle("bullet.obj"));
        assert!(!advance_shell(&mut shell, 0.0, &TUNING));
        assert_eq!(shell.position, Vec3::ZERO);
    }

    #[test]
    fn test_shell_despawns_past_range() {
        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 50.5));
        assert!(!advance_shell(&mut shell, 0.0, &TUNING));
        assert!(!shell.visible);
        assert_relative_eq!(shell.position.z, 50.5);

        // Range is measured from the player, not from the origin
        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 50.5));
        assert!(advance_shell(&mut shell, 10.0, &TUNING));
    }

    #[test]
    fn test_shell_steps_past_range_once() {
        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 49.5));
        assert!(advance_shell(&mut shell, 0.0, &TUNING));
        assert_relative_eq!(shell.position.z, 50.5);

        assert!(!advance_shell(&mut shell, 0.0, &TUNING));
    }

    #[test]
    fn test_hit_inside_window() {
        let mut enemies = enemies_at([
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(40.0, 0.0, 50.0),
            Vec3::new(-40.0, 0.0, 50.0),
        ]);
        let mut shell = flying_shell(Vec3::new(-0.3, 2.35, 9.4));

        assert_eq!(check_hit(&mut shell, &mut enemies, &TUNING), Some(0));
        assert!(!enemies[0].visible);
        assert!(enemies[1].visible && enemies[2].visible);
        assert!(!shell.visible);
    }

    #[test]
    fn test_window_edges_are_open() {
        let mut enemies = enemies_at([Vec3::new(0.0, 0.0, 10.0); ENEMY_COUNT]);

        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 9.0));
        assert_eq!(check_hit(&mut shell, &mut enemies, &TUNING), None);

        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 15.0));
        assert_eq!(check_hit(&mut shell, &mut enemies, &TUNING), None);

        let mut shell = flying_shell(Vec3::new(2.0, 0.0, 12.0));
        assert_eq!(check_hit(&mut shell, &mut enemies, &TUNING), None);

        assert!(enemies.iter().all(|e| e.visible));
    }

    #[test]
    fn test_only_lowest_index_is_hit() {
        let mut enemies = enemies_at([Vec3::new(0.0, 0.0, 10.0); ENEMY_COUNT]);
        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 11.0));

        assert_eq!(check_hit(&mut shell, &mut enemies, &TUNING), Some(0));
        assert_eq!(enemies.iter().filter(|e| e.visible).count(), 2);
    }

    #[test]
    fn test_hidden_enemies_are_skipped() {
        let mut enemies = enemies_at([Vec3::new(0.0, 0.0, 10.0); ENEMY_COUNT]);
        enemies[0].visible = false;
        let mut shell = flying_shell(Vec3::new(0.0, 0.0, 11.0));

        assert_eq!(check_hit(&mut shell, &mut enemies, &TUNING), Some(1));
    }

    #[test]
    fn test_wave_complete_every_third_kill() {
        assert!(!wave_complete(0, &TUNING));
        assert!(!wave_complete(1, &TUNING));
        assert!(!wave_complete(2, &TUNING));
        assert!(wave_complete(3, &TUNING));
        assert!(!wave_complete(4, &TUNING));
        assert!(wave_complete(6, &TUNING));
    }

    #[test]
    fn test_respawn_places_enemies_ahead() {
        let mut rng = StdRng::seed_from_u64(7);
        for player_z in [0.0, 12.3, -20.0] {
            let mut enemies = enemies_at([Vec3::ZERO; ENEMY_COUNT]);
            enemies[0].visible = false;
            enemies[2].visible = false;

            respawn_wave(&mut enemies, player_z, &mut rng, &TUNING);

            for enemy in &enemies {
                assert!(enemy.visible);
                assert!(enemy.position.x >= -50.0 && enemy.position.x <= 80.0);
                assert!(enemy.position.z >= player_z + 30.0);
                assert!(enemy.position.z <= 80.0);
                assert_eq!(enemy.position.y, 0.0);
                assert_eq!(enemy.position.x.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_spawn_past_far_edge_stays_ahead() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let pos = spawn_position(&mut rng, 60.0, &TUNING);
            assert_eq!(pos.z, 90.0);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let a = spawn_position(&mut StdRng::seed_from_u64(3), 0.0, &TUNING);
        let b = spawn_position(&mut StdRng::seed_from_u64(3), 0.0, &TUNING);
        assert_eq!(a, b);
    }
}
