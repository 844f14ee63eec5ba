/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖和预设
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod particles;

pub use particles::{ParticlePreset, ParticleSystemConfig};

use crate::impl_default;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 演示程序的主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 粒子系统配置
    #[serde(default)]
    pub particles: ParticleSystemConfig,

    /// 模拟配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    ///
    /// `PARTICLES_PRESET` 先于其它变量生效，整体替换粒子配置。
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("PARTICLES_PRESET") {
            if let Some(preset) = ParticlePreset::from_name(&val) {
                self.particles = preset.to_config();
            }
        }
        if let Ok(val) = env::var("PARTICLES_MAX") {
            if let Ok(max) = val.parse() {
                self.particles.max_particles = max;
            }
        }
        if let Ok(val) = env::var("PARTICLES_SEED") {
            if let Ok(seed) = val.parse() {
                self.simulation.seed = Some(seed);
            }
        }
        if let Ok(val) = env::var("PARTICLES_FRAMES") {
            if let Ok(frames) = val.parse() {
                self.simulation.frames = frames;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.particles.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./particles.toml
    /// 2. ./particles.json
    /// 3. 使用默认配置（火焰预设）
    pub fn load_or_default() -> (Self, ConfigSource) {
        let toml_path = PathBuf::from("particles.toml");
        if let Ok(config) = Self::from_toml_file(&toml_path) {
            return (config, ConfigSource::File(toml_path));
        }

        let json_path = PathBuf::from("particles.json");
        if let Ok(config) = Self::from_json_file(&json_path) {
            return (config, ConfigSource::File(json_path));
        }

        let config = Self {
            particles: ParticlePreset::Fire.to_config(),
            ..Self::default()
        };
        (config, ConfigSource::Default)
    }
}

/// 无头模拟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 模拟帧数
    pub frames: u32,
    /// 每帧时间步长（秒）
    pub delta_time: f32,
    /// 随机种子，None 时使用系统熵
    pub seed: Option<u64>,
    /// 相机位置
    pub camera_position: Vec3,
}

impl_default!(SimulationConfig {
    frames: 300,
    delta_time: 1.0 / 60.0,
    seed: None,
    camera_position: Vec3::new(0.0, 2.0, 10.0),
});

impl SimulationConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.delta_time > 0.0 && self.delta_time.is_finite()) {
            return Err(ConfigError::ValidationError(
                "Invalid simulation delta_time".to_string(),
            ));
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_simulation_config() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig {
            particles: ParticlePreset::Smoke.to_config(),
            ..AppConfig::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = AppConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.particles, config.particles);
    }

    #[test]
    fn test_json_partial() {
        let parsed = AppConfig::from_json_str(
            r#"{ "particles": { "max_particles": 12 }, "logging": { "level": "Debug" } }"#,
        )
        .unwrap();
        assert_eq!(parsed.particles.max_particles, 12);
        assert_eq!(parsed.logging.level, LogLevel::Debug);
        assert_eq!(parsed.simulation.frames, 300);
    }

    #[test]
    fn test_parse_error() {
        let err = AppConfig::from_toml_str("particles = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("spring_particles_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("particles.toml");

        let config = AppConfig {
            particles: ParticlePreset::Rain.to_config(),
            ..AppConfig::default()
        };
        config.save_toml(&path).unwrap();
        let loaded = AppConfig::from_toml_file(&path).unwrap();
        assert_eq!(loaded.particles, config.particles);

        fs::remove_dir_all(&dir).unwrap();
    }
}
