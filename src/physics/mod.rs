//! 粒子物理占位体
//!
//! 每个粒子持有一个 rapier3d 运动学刚体和球形碰撞体，只用来携带位置，
//! 不加入物理世界，也不做碰撞响应。

use glam::Vec3;
use rapier3d::prelude::*;

/// 粒子碰撞体默认半径
pub const PARTICLE_COLLIDER_RADIUS: f32 = 0.05;

pub struct ParticleBody {
    rigid_body: RigidBody,
    collider: Collider,
}

impl ParticleBody {
    pub fn new(position: Vec3) -> Self {
        let translation = vector![position.x, position.y, position.z];
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(translation)
            .build();
        let collider = ColliderBuilder::ball(PARTICLE_COLLIDER_RADIUS)
            .translation(translation)
            .sensor(true)
            .build();
        Self {
            rigid_body,
            collider,
        }
    }

    pub fn position(&self) -> Vec3 {
        let t = self.rigid_body.translation();
        Vec3::new(t.x, t.y, t.z)
    }

    pub fn set_position(&mut self, position: Vec3) {
        let translation = vector![position.x, position.y, position.z];
        self.rigid_body.set_translation(translation, false);
        self.collider.set_translation(translation);
    }

    pub fn radius(&self) -> f32 {
        self.collider
            .shape()
            .as_ball()
            .map(|ball| ball.radius)
            .unwrap_or(PARTICLE_COLLIDER_RADIUS)
    }

    pub fn rigid_body(&self) -> &RigidBody {
        &self.rigid_body
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_tracks_position() {
        let mut body = ParticleBody::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(body.rigid_body().is_kinematic());

        body.set_position(Vec3::new(-4.0, 0.5, 9.0));
        assert_eq!(body.position(), Vec3::new(-4.0, 0.5, 9.0));
        let c = body.collider().translation();
        assert_eq!(Vec3::new(c.x, c.y, c.z), Vec3::new(-4.0, 0.5, 9.0));
        assert!((body.radius() - PARTICLE_COLLIDER_RADIUS).abs() < f32::EPSILON);
    }
}
