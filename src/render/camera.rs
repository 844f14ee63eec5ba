//! 相机
//!
//! 粒子系统只读取相机的世界坐标用于距离排序。相机通过 `CameraHandle`
//! 共享，调用方可以在帧与帧之间移动它。

use glam::{Quat, Vec3};
use std::sync::{Arc, RwLock};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// 共享相机句柄
pub type CameraHandle = Arc<RwLock<Camera>>;

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// 朝向（-Z 为前方）
    pub fn direction(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// 让相机看向目标点
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(forward) = (target - self.position).try_normalize() {
            self.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, forward);
        }
    }

    /// 包装成共享句柄
    pub fn into_handle(self) -> CameraHandle {
        Arc::new(RwLock::new(self))
    }
}
