//! 粒子系统属性测试
//!
//! 使用proptest验证粒子池、渲染顺序和插值的不变量

#[cfg(test)]
mod tests {
    use crate::config::ParticleSystemConfig;
    use crate::render::particles::{
        draw_emit_count, Particle, ParticleActivateData, ParticleSystem,
    };
    use crate::render::Camera;
    use glam::{Vec3, Vec4};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn finite_f32() -> impl Strategy<Value = f32> {
        (-100.0f32..100.0).prop_filter("must be finite", |&x| x.is_finite())
    }

    fn valid_vec3() -> impl Strategy<Value = Vec3> {
        (finite_f32(), finite_f32(), finite_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn unit_color() -> impl Strategy<Value = Vec4> {
        (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0)
            .prop_map(|(r, g, b, a)| Vec4::new(r, g, b, a))
    }

    fn emitting_config() -> impl Strategy<Value = ParticleSystemConfig> {
        (1usize..24, 0u32..6, 0u32..8, 0.0f32..0.2, 0.0f32..1.5, 0.1f32..3.0)
            .prop_map(|(capacity, min_emit, extra, interval, angle, life)| ParticleSystemConfig {
                max_particles: capacity,
                min_particle_per_emit: min_emit,
                max_particle_per_emit: min_emit + extra,
                min_time_between_emit: interval,
                max_time_between_emit: interval * 2.0,
                min_spawn_angle: 0.0,
                max_spawn_angle: angle,
                min_speed: 0.5,
                max_speed: 4.0,
                min_life_time: life,
                max_life_time: life * 2.0,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn pool_never_grows_and_order_is_permutation(
            config in emitting_config(),
            seed in any::<u64>(),
            camera in valid_vec3(),
            steps in prop::collection::vec(0.001f32..0.2, 1..40)
        ) {
            let capacity = config.max_particles;
            let mut system = ParticleSystem::with_seed(seed);
            system.initialize(config).unwrap();
            system.set_camera(Camera::new(camera).into_handle());

            for dt in steps {
                system.update(dt).unwrap();
                prop_assert_eq!(system.capacity(), capacity);
                prop_assert!(system.active_count() <= capacity);
                prop_assert!(system.next_available_index() < capacity);

                let mut sorted = system.particle_indexes().to_vec();
                sorted.sort_unstable();
                prop_assert_eq!(sorted, (0..capacity).collect::<Vec<_>>());

                let distances: Vec<f32> = system
                    .particle_indexes()
                    .iter()
                    .map(|&i| system.particles()[i].transform().position.distance_squared(camera))
                    .collect();
                prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
            }
        }

        #[test]
        fn emit_count_stays_below_max(
            min in 0u32..50,
            extra in 0u32..50,
            seed in any::<u64>()
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let max = min + extra;
            for _ in 0..32 {
                let count = draw_emit_count(&mut rng, min, max);
                if extra == 0 {
                    prop_assert_eq!(count, min);
                } else {
                    prop_assert!(count >= min && count < max);
                }
            }
        }

        #[test]
        fn interpolation_hits_endpoints(
            start_color in unit_color(),
            end_color in unit_color(),
            start_scale in valid_vec3(),
            end_scale in valid_vec3(),
            life_time in 0.1f32..10.0
        ) {
            let mut particle = Particle::new();
            particle.activate(ParticleActivateData {
                life_time,
                start_color,
                end_color,
                start_scale,
                end_scale,
                ..Default::default()
            });
            let info = particle.current_info();
            prop_assert_eq!(info.current_color, start_color);
            prop_assert_eq!(info.current_scale, start_scale);

            particle.update(life_time);
            prop_assert!(!particle.is_active());
            let info = particle.current_info();
            prop_assert_eq!(info.current_color, end_color);
            prop_assert_eq!(info.current_scale, end_scale);
        }

        #[test]
        fn particle_active_until_life_time_elapsed(
            life_time in 0.1f32..5.0,
            fraction in 0.0f32..0.99
        ) {
            let mut particle = Particle::new();
            particle.activate(ParticleActivateData { life_time, ..Default::default() });
            particle.update(life_time * fraction);
            prop_assert!(particle.is_active());
            particle.update(life_time);
            prop_assert!(!particle.is_active());
        }
    }
}
