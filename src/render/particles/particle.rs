//! 单个粒子
//!
//! 粒子在池中原地复用：`activate` 会覆盖之前的全部状态。
//! 剩余生命周期大于零即为活跃，非活跃粒子的颜色与缩放是过期数据，不应渲染。

use crate::ecs::Transform;
use crate::physics::ParticleBody;
use glam::{Vec3, Vec4};
use std::ops::{Add, Mul};

/// 粒子激活参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleActivateData {
    /// 生命周期（秒），<= 0 时粒子不会被激活
    pub life_time: f32,
    pub start_color: Vec4,
    pub end_color: Vec4,
    pub start_scale: Vec3,
    pub end_scale: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Default for ParticleActivateData {
    fn default() -> Self {
        Self {
            life_time: 0.0,
            start_color: Vec4::ONE,
            end_color: Vec4::ONE,
            start_scale: Vec3::ONE,
            end_scale: Vec3::ONE,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }
}

/// 粒子当前的视觉状态
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleInfo {
    pub current_color: Vec4,
    pub current_scale: Vec3,
}

impl Default for ParticleInfo {
    fn default() -> Self {
        Self {
            current_color: Vec4::ONE,
            current_scale: Vec3::ONE,
        }
    }
}

/// 线性插值，t = 0 与 t = 1 时精确返回端点
pub fn lerp<T>(a: T, b: T, t: f32) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    a * (1.0 - t) + b * t
}

#[derive(Default)]
pub struct Particle {
    transform: Transform,
    body: Option<ParticleBody>,
    data: ParticleActivateData,
    info: ParticleInfo,
    life_time: f32,
}

impl Particle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建物理占位体
    pub fn initialize(&mut self) {
        self.body = Some(ParticleBody::new(self.transform.position));
    }

    /// 释放物理占位体
    pub fn terminate(&mut self) {
        self.body = None;
        self.life_time = 0.0;
    }

    pub fn activate(&mut self, data: ParticleActivateData) {
        self.data = data;
        self.life_time = data.life_time;
        self.transform.position = data.position;
        self.info = ParticleInfo {
            current_color: data.start_color,
            current_scale: data.start_scale,
        };
        if let Some(body) = self.body.as_mut() {
            body.set_position(data.position);
        }
    }

    pub fn update(&mut self, delta_time: f32) {
        if !self.is_active() {
            return;
        }

        self.life_time -= delta_time;
        self.transform.position += self.data.velocity * delta_time;
        if let Some(body) = self.body.as_mut() {
            body.set_position(self.transform.position);
        }

        let t = (1.0 - self.life_time / self.data.life_time).clamp(0.0, 1.0);
        self.info = ParticleInfo {
            current_color: lerp(self.data.start_color, self.data.end_color, t),
            current_scale: lerp(self.data.start_scale, self.data.end_scale, t),
        };
    }

    pub fn is_active(&self) -> bool {
        self.life_time > 0.0
    }

    /// 当前颜色与缩放，调用前应先检查 `is_active`
    pub fn current_info(&self) -> ParticleInfo {
        self.info
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// 剩余生命周期（秒）
    pub fn remaining_life_time(&self) -> f32 {
        self.life_time
    }

    /// 最近一次激活使用的参数
    pub fn activate_data(&self) -> &ParticleActivateData {
        &self.data
    }

    pub fn body(&self) -> Option<&ParticleBody> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ParticleActivateData {
        ParticleActivateData {
            life_time: 1.0,
            start_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            end_color: Vec4::new(0.0, 0.0, 1.0, 0.0),
            start_scale: Vec3::splat(2.0),
            end_scale: Vec3::new(0.0, 1.0, 4.0),
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec3::new(0.0, 4.0, 0.0),
        }
    }

    #[test]
    fn test_new_particle_is_inactive() {
        let mut particle = Particle::new();
        assert!(!particle.is_active());
        particle.update(1.0);
        assert!(!particle.is_active());
        assert_eq!(particle.transform().position, Vec3::ZERO);
    }

    #[test]
    fn test_initialize_and_terminate() {
        let mut particle = Particle::new();
        particle.initialize();
        assert!(particle.body().is_some());
        particle.activate(sample_data());
        assert_eq!(particle.body().unwrap().position(), Vec3::new(1.0, 2.0, 3.0));
        particle.terminate();
        assert!(particle.body().is_none());
        assert!(!particle.is_active());
    }

    #[test]
    fn test_activate_sets_start_state() {
        let mut particle = Particle::new();
        particle.activate(sample_data());
        assert!(particle.is_active());
        assert_eq!(particle.transform().position, Vec3::new(1.0, 2.0, 3.0));
        let info = particle.current_info();
        assert_eq!(info.current_color, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(info.current_scale, Vec3::splat(2.0));
    }

    #[test]
    fn test_non_positive_life_time_stays_inactive() {
        let mut particle = Particle::new();
        particle.activate(ParticleActivateData {
            life_time: 0.0,
            ..sample_data()
        });
        assert!(!particle.is_active());
        particle.update(0.1);
        assert_eq!(particle.transform().position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_lifetime_boundary() {
        let mut particle = Particle::new();
        particle.activate(sample_data());
        for _ in 0..3 {
            particle.update(0.25);
            assert!(particle.is_active());
        }
        particle.update(0.25);
        assert!(!particle.is_active());

        // 到达终点时颜色和缩放精确等于结束值
        let info = particle.current_info();
        assert_eq!(info.current_color, Vec4::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(info.current_scale, Vec3::new(0.0, 1.0, 4.0));
    }

    #[test]
    fn test_update_moves_and_interpolates() {
        let mut particle = Particle::new();
        particle.initialize();
        particle.activate(sample_data());
        particle.update(0.5);

        assert!((particle.transform().position - Vec3::new(1.0, 4.0, 3.0)).length() < 1e-6);
        assert_eq!(particle.body().unwrap().position(), particle.transform().position);
        let info = particle.current_info();
        assert!((info.current_color - Vec4::new(0.5, 0.0, 0.5, 0.5)).length() < 1e-6);
        assert!((info.current_scale - Vec3::new(1.0, 1.5, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_reactivation_overwrites_in_flight_state() {
        let mut particle = Particle::new();
        particle.activate(sample_data());
        particle.update(0.5);
        particle.activate(ParticleActivateData {
            life_time: 3.0,
            position: Vec3::ZERO,
            ..sample_data()
        });
        assert_eq!(particle.remaining_life_time(), 3.0);
        assert_eq!(particle.transform().position, Vec3::ZERO);
        assert_eq!(particle.current_info().current_scale, Vec3::splat(2.0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec4::new(0.1, 0.2, 0.3, 0.4);
        let b = Vec4::new(0.9, 0.7, 0.5, 0.3);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(2.0_f32, 6.0, 0.5), 4.0);
    }
}
