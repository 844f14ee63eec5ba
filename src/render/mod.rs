//! 渲染协作接口
//!
//! 粒子系统本身不做绘制，只决定提交什么、按什么顺序提交。

pub mod camera;
pub mod mesh;
pub mod particles;

use crate::ecs::Transform;
use glam::Vec4;
use std::sync::Arc;

pub use camera::{Camera, CameraHandle};
pub use mesh::{MeshBuilder, MeshData, VertexPX};
pub use particles::{
    Inspector, Particle, ParticleActivateData, ParticleInfo, ParticleSystem, ParticleSystemState,
    ParticleSystemStats,
};

/// 贴图标识，由外部资源系统分配
pub type TextureId = u32;

/// 可绘制对象：网格、贴图和变换
#[derive(Clone, Debug)]
pub struct RenderObject {
    pub transform: Transform,
    pub mesh: Arc<MeshData>,
    pub diffuse_map_id: TextureId,
}

impl RenderObject {
    pub fn new(mesh: MeshData, diffuse_map_id: TextureId) -> Self {
        Self {
            transform: Transform::default(),
            mesh: Arc::new(mesh),
            diffuse_map_id,
        }
    }
}

/// 渲染效果（绘制接收端）
pub trait Renderer {
    fn render(&mut self, object: &RenderObject, color: Vec4);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, object: &RenderObject, color: Vec4) {
        (**self).render(object, color);
    }
}
