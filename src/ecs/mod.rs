use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use crate::render::particles::ParticleSystem;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[derive(Resource)]
pub struct Time {
    pub delta_seconds: f32,
    pub elapsed_seconds: f64,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            delta_seconds: 0.0,
            elapsed_seconds: 0.0,
        }
    }
}

impl Time {
    /// 推进一帧
    pub fn advance(&mut self, delta_seconds: f32) {
        self.delta_seconds = delta_seconds;
        self.elapsed_seconds += delta_seconds as f64;
    }
}

/// 粒子系统更新系统
///
/// 更新失败（未初始化、未设置相机）只记录警告，不中断调度。
pub fn particle_system_update_system(
    time: Res<Time>,
    mut systems: Query<(Entity, &mut ParticleSystem)>,
) {
    let delta = time.delta_seconds;

    for (entity, mut system) in systems.iter_mut() {
        if let Err(e) = system.update(delta) {
            tracing::warn!(target: "particles", ?entity, "Particle system update failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParticleSystemConfig;
    use crate::render::Camera;

    #[test]
    fn test_time_advance() {
        let mut time = Time::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.delta_seconds, 0.25);
        assert!((time.elapsed_seconds - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_particle_system_update_system() {
        let mut world = World::default();
        let mut time = Time::default();
        time.advance(0.01);
        world.insert_resource(time);

        let mut system = ParticleSystem::with_seed(7);
        system
            .initialize(ParticleSystemConfig {
                max_particles: 4,
                min_particle_per_emit: 2,
                max_particle_per_emit: 3,
                min_life_time: 1.0,
                max_life_time: 1.0,
                min_time_between_emit: 10.0,
                max_time_between_emit: 10.0,
                ..Default::default()
            })
            .unwrap();
        system.set_camera(Camera::default().into_handle());
        let entity = world.spawn(system).id();

        // 未初始化的系统只产生警告
        world.spawn(ParticleSystem::with_seed(1));

        let mut schedule = Schedule::default();
        schedule.add_systems(particle_system_update_system);
        schedule.run(&mut world);

        let system = world.get::<ParticleSystem>(entity).unwrap();
        assert_eq!(system.active_count(), 2);
    }
}
