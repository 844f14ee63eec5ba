//! 统一错误处理模块
//!
//! 粒子系统的调用约定（先初始化、先设置相机、容量大于零等）在这里以错误值返回，
//! 而不是在违反时直接崩溃。退化配置（范围颠倒等）不算错误，只会产生退化输出。

use crate::config::ConfigError;
use thiserror::Error;

/// 粒子系统错误类型
#[derive(Error, Debug)]
pub enum ParticleError {
    #[error("Particle system is not initialized")]
    NotInitialized,

    #[error("Particle system is already initialized, terminate it first")]
    AlreadyInitialized,

    #[error("Invalid particle capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    #[error("No camera set, distance sorting needs one")]
    CameraNotSet,

    #[error("Camera lock poisoned")]
    CameraPoisoned,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type ParticleResult<T> = Result<T, ParticleError>;
