use super::{ConfigError, ConfigResult};
use crate::impl_default;
use crate::render::TextureId;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// 粒子系统配置
///
/// 在 `ParticleSystem::initialize` 之后只允许通过调试面板修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSystemConfig {
    /// 发射位置
    pub spawn_position: Vec3,
    /// 发射方向（单位向量）
    pub spawn_direction: Vec3,
    /// 首次发射前的延迟（秒）
    pub spawn_delay: f32,
    /// 每次发射的最少粒子数
    pub min_particle_per_emit: u32,
    /// 每次发射的粒子数上界（不含）
    pub max_particle_per_emit: u32,
    /// 两次发射之间的最短时间（秒）
    pub min_time_between_emit: f32,
    /// 两次发射之间的最长时间（秒）
    pub max_time_between_emit: f32,
    /// 发射锥最小偏转角（弧度）
    pub min_spawn_angle: f32,
    /// 发射锥最大偏转角（弧度），0 表示不偏转
    pub max_spawn_angle: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// 粒子生命周期范围（秒）
    pub min_life_time: f32,
    pub max_life_time: f32,
    /// 系统生命周期（秒），<= 0 表示无限
    pub system_life_time: f32,
    pub min_start_color: Vec4,
    pub max_start_color: Vec4,
    pub min_end_color: Vec4,
    pub max_end_color: Vec4,
    pub min_start_scale: Vec3,
    pub max_start_scale: Vec3,
    pub min_end_scale: Vec3,
    pub max_end_scale: Vec3,
    /// 粒子池容量
    pub max_particles: usize,
    /// 粒子贴图
    pub particle_texture_id: TextureId,
}

impl_default!(ParticleSystemConfig {
    spawn_position: Vec3::ZERO,
    spawn_direction: Vec3::Y,
    spawn_delay: 0.0,
    min_particle_per_emit: 0,
    max_particle_per_emit: 0,
    min_time_between_emit: 0.0,
    max_time_between_emit: 0.0,
    min_spawn_angle: 0.0,
    max_spawn_angle: 0.0,
    min_speed: 0.0,
    max_speed: 0.0,
    min_life_time: 0.0,
    max_life_time: 0.0,
    system_life_time: 0.0,
    min_start_color: Vec4::ONE,
    max_start_color: Vec4::ONE,
    min_end_color: Vec4::ONE,
    max_end_color: Vec4::ONE,
    min_start_scale: Vec3::ONE,
    max_start_scale: Vec3::ONE,
    min_end_scale: Vec3::ONE,
    max_end_scale: Vec3::ONE,
    max_particles: 100,
    particle_texture_id: 0,
});

/// 调试面板中每次发射粒子数的上限
pub const MAX_PARTICLE_PER_EMIT_LIMIT: u32 = 10;
/// 调试面板中发射间隔的上限（秒）
pub const MAX_TIME_BETWEEN_EMIT_LIMIT: f32 = 10.0;
/// 调试面板中发射锥角度的上限（弧度）
pub const MAX_SPAWN_ANGLE_LIMIT: f32 = 3.0;
/// 调试面板中速度的上限
pub const MAX_SPEED_LIMIT: f32 = 100.0;
/// 调试面板中粒子生命周期的上限（秒）
pub const MAX_LIFE_TIME_LIMIT: f32 = 10.0;

impl ParticleSystemConfig {
    /// 验证配置
    ///
    /// 只有容量为零会让 `initialize` 失败，其余检查供需要严格配置的调用方使用。
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_particles == 0 {
            return Err(ConfigError::ValidationError(
                "max_particles must be greater than zero".to_string(),
            ));
        }
        if self.max_particle_per_emit <= self.min_particle_per_emit {
            return Err(ConfigError::ValidationError(format!(
                "max_particle_per_emit ({}) must exceed min_particle_per_emit ({})",
                self.max_particle_per_emit, self.min_particle_per_emit
            )));
        }
        check_range("time_between_emit", self.min_time_between_emit, self.max_time_between_emit)?;
        check_range("spawn_angle", self.min_spawn_angle, self.max_spawn_angle)?;
        check_range("speed", self.min_speed, self.max_speed)?;
        check_range("life_time", self.min_life_time, self.max_life_time)?;
        if self.min_life_time <= 0.0 {
            return Err(ConfigError::ValidationError(
                "min_life_time must be positive".to_string(),
            ));
        }
        if self.spawn_direction.try_normalize().is_none() {
            return Err(ConfigError::ValidationError(
                "spawn_direction must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// 应用调试面板的输入约束：每个最大值不小于对应的最小值
    pub fn clamp_ranges(&mut self) {
        self.max_particle_per_emit = self
            .max_particle_per_emit
            .max(self.min_particle_per_emit.saturating_add(1));
        self.max_time_between_emit = self.max_time_between_emit.max(self.min_time_between_emit);
        self.max_spawn_angle = self.max_spawn_angle.max(self.min_spawn_angle);
        self.max_speed = self.max_speed.max(self.min_speed);
        self.max_life_time = self.max_life_time.max(self.min_life_time);
    }
}

fn check_range(name: &str, min: f32, max: f32) -> ConfigResult<()> {
    if !(min.is_finite() && max.is_finite()) || max < min {
        return Err(ConfigError::ValidationError(format!(
            "invalid {name} range: {min}..{max}"
        )));
    }
    Ok(())
}

/// 粒子系统预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticlePreset {
    Fire,
    Smoke,
    Explosion,
    Rain,
    Snow,
    Magic,
}

impl ParticlePreset {
    pub const ALL: [ParticlePreset; 6] = [
        ParticlePreset::Fire,
        ParticlePreset::Smoke,
        ParticlePreset::Explosion,
        ParticlePreset::Rain,
        ParticlePreset::Snow,
        ParticlePreset::Magic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParticlePreset::Fire => "Fire",
            ParticlePreset::Smoke => "Smoke",
            ParticlePreset::Explosion => "Explosion",
            ParticlePreset::Rain => "Rain",
            ParticlePreset::Snow => "Snow",
            ParticlePreset::Magic => "Magic",
        }
    }

    /// 按名称查找预设（忽略大小写）
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn to_config(&self) -> ParticleSystemConfig {
        match self {
            ParticlePreset::Fire => ParticleSystemConfig {
                min_particle_per_emit: 2,
                max_particle_per_emit: 5,
                min_time_between_emit: 0.02,
                max_time_between_emit: 0.06,
                min_spawn_angle: 0.1,
                max_spawn_angle: 0.4,
                min_speed: 1.5,
                max_speed: 2.5,
                min_life_time: 0.7,
                max_life_time: 1.3,
                min_start_color: Vec4::new(1.0, 0.4, 0.0, 1.0),
                max_start_color: Vec4::new(1.0, 0.7, 0.1, 1.0),
                min_end_color: Vec4::new(0.8, 0.0, 0.0, 0.0),
                max_end_color: Vec4::new(1.0, 0.1, 0.0, 0.0),
                min_start_scale: Vec3::splat(0.4),
                max_start_scale: Vec3::splat(0.6),
                min_end_scale: Vec3::ZERO,
                max_end_scale: Vec3::splat(0.1),
                max_particles: 500,
                ..Default::default()
            },
            ParticlePreset::Smoke => ParticleSystemConfig {
                min_particle_per_emit: 1,
                max_particle_per_emit: 3,
                min_time_between_emit: 0.05,
                max_time_between_emit: 0.1,
                min_spawn_angle: 0.0,
                max_spawn_angle: 0.3,
                min_speed: 0.5,
                max_speed: 1.0,
                min_life_time: 2.5,
                max_life_time: 3.5,
                min_start_color: Vec4::new(0.5, 0.5, 0.5, 0.8),
                max_start_color: Vec4::new(0.6, 0.6, 0.6, 0.8),
                min_end_color: Vec4::new(0.3, 0.3, 0.3, 0.0),
                max_end_color: Vec4::new(0.4, 0.4, 0.4, 0.0),
                min_start_scale: Vec3::splat(0.4),
                max_start_scale: Vec3::splat(0.6),
                min_end_scale: Vec3::splat(1.5),
                max_end_scale: Vec3::splat(2.5),
                max_particles: 300,
                ..Default::default()
            },
            ParticlePreset::Explosion => ParticleSystemConfig {
                min_particle_per_emit: 80,
                max_particle_per_emit: 120,
                min_time_between_emit: 5.0,
                max_time_between_emit: 5.0,
                min_spawn_angle: 0.0,
                max_spawn_angle: MAX_SPAWN_ANGLE_LIMIT,
                min_speed: 3.0,
                max_speed: 8.0,
                min_life_time: 0.3,
                max_life_time: 0.7,
                system_life_time: 1.0,
                min_start_color: Vec4::new(1.0, 0.8, 0.0, 1.0),
                max_start_color: Vec4::new(1.0, 1.0, 0.3, 1.0),
                min_end_color: Vec4::new(0.5, 0.0, 0.0, 0.0),
                max_end_color: Vec4::new(0.6, 0.1, 0.0, 0.0),
                min_start_scale: Vec3::splat(0.5),
                max_start_scale: Vec3::splat(1.5),
                min_end_scale: Vec3::ZERO,
                max_end_scale: Vec3::ZERO,
                max_particles: 1000,
                ..Default::default()
            },
            ParticlePreset::Rain => ParticleSystemConfig {
                spawn_position: Vec3::new(0.0, 10.0, 0.0),
                spawn_direction: Vec3::NEG_Y,
                min_particle_per_emit: 5,
                max_particle_per_emit: 10,
                min_time_between_emit: 0.01,
                max_time_between_emit: 0.03,
                min_spawn_angle: 0.0,
                max_spawn_angle: 0.05,
                min_speed: 9.0,
                max_speed: 11.0,
                min_life_time: 1.7,
                max_life_time: 2.3,
                min_start_color: Vec4::new(0.5, 0.5, 1.0, 0.8),
                max_start_color: Vec4::new(0.5, 0.5, 1.0, 0.8),
                min_end_color: Vec4::new(0.5, 0.5, 1.0, 0.5),
                max_end_color: Vec4::new(0.5, 0.5, 1.0, 0.5),
                min_start_scale: Vec3::new(0.05, 0.2, 0.05),
                max_start_scale: Vec3::new(0.05, 0.3, 0.05),
                min_end_scale: Vec3::new(0.05, 0.2, 0.05),
                max_end_scale: Vec3::new(0.05, 0.3, 0.05),
                max_particles: 1000,
                ..Default::default()
            },
            ParticlePreset::Snow => ParticleSystemConfig {
                spawn_position: Vec3::new(0.0, 10.0, 0.0),
                spawn_direction: Vec3::NEG_Y,
                min_particle_per_emit: 1,
                max_particle_per_emit: 4,
                min_time_between_emit: 0.02,
                max_time_between_emit: 0.05,
                min_spawn_angle: 0.1,
                max_spawn_angle: 0.6,
                min_speed: 0.7,
                max_speed: 1.3,
                min_life_time: 4.0,
                max_life_time: 6.0,
                min_start_color: Vec4::ONE,
                max_start_color: Vec4::ONE,
                min_end_color: Vec4::new(1.0, 1.0, 1.0, 0.8),
                max_end_color: Vec4::new(1.0, 1.0, 1.0, 0.8),
                min_start_scale: Vec3::splat(0.1),
                max_start_scale: Vec3::splat(0.3),
                min_end_scale: Vec3::splat(0.1),
                max_end_scale: Vec3::splat(0.3),
                max_particles: 500,
                ..Default::default()
            },
            ParticlePreset::Magic => ParticleSystemConfig {
                min_particle_per_emit: 2,
                max_particle_per_emit: 4,
                min_time_between_emit: 0.03,
                max_time_between_emit: 0.08,
                min_spawn_angle: 0.5,
                max_spawn_angle: 2.5,
                min_speed: 0.5,
                max_speed: 2.0,
                min_life_time: 1.0,
                max_life_time: 2.0,
                min_start_color: Vec4::new(0.5, 0.0, 1.0, 1.0),
                max_start_color: Vec4::new(0.8, 0.2, 1.0, 1.0),
                min_end_color: Vec4::new(0.0, 1.0, 1.0, 0.0),
                max_end_color: Vec4::new(0.2, 1.0, 0.8, 0.0),
                min_start_scale: Vec3::splat(0.2),
                max_start_scale: Vec3::splat(0.4),
                min_end_scale: Vec3::ZERO,
                max_end_scale: Vec3::ZERO,
                max_particles: 300,
                ..Default::default()
            },
        }
    }
}
