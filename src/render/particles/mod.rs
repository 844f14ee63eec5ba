//! CPU 粒子系统模块
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    ParticleSystem                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Emission                                             │
//! │     - 发射计时器到期时发射一批粒子                         │
//! │     - 环形游标选择槽位，随机化方向、速度、生命周期、颜色     │
//! │                                                          │
//! │  2. Simulation                                           │
//! │     - 生命周期倒计时、速度积分                             │
//! │     - 颜色/缩放随生命周期线性插值                          │
//! │                                                          │
//! │  3. Rendering                                            │
//! │     - 按到相机的距离重排索引                               │
//! │     - 共享四边形逐个提交给 Renderer                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut system = ParticleSystem::with_seed(7);
//! system.initialize(ParticlePreset::Fire.to_config())?;
//! system.set_camera(camera.clone());
//!
//! // 每帧
//! system.update(delta_time)?;
//! system.render(&mut renderer);
//! ```

pub mod inspector;
pub mod particle;
mod property_tests;
pub mod system;

pub use inspector::Inspector;
pub use particle::{lerp, Particle, ParticleActivateData, ParticleInfo};
pub use system::{
    draw_emit_count, perturb_direction, random_range, ParticleSystem, ParticleSystemState,
    ParticleSystemStats,
};
