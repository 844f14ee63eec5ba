//! 粒子系统
//!
//! 固定容量的粒子池 + 发射器 + 渲染顺序。
//!
//! - 粒子池在 `initialize` 时分配，之后不再改变大小
//! - 新粒子总是占用环形游标指向的槽位，游标每次前进一格，
//!   槽位上仍然活跃的粒子会被直接覆盖
//! - 每次更新后按到相机的距离（由近到远）重排渲染索引

use super::inspector::{bounded, Inspector};
use super::particle::{lerp, Particle, ParticleActivateData};
use crate::config::particles::{
    MAX_LIFE_TIME_LIMIT, MAX_PARTICLE_PER_EMIT_LIMIT, MAX_SPAWN_ANGLE_LIMIT, MAX_SPEED_LIMIT,
    MAX_TIME_BETWEEN_EMIT_LIMIT,
};
use crate::config::ParticleSystemConfig;
use crate::core::error::{ParticleError, ParticleResult};
use crate::render::{CameraHandle, MeshBuilder, RenderObject, Renderer};
use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 粒子系统状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleSystemState {
    Uninitialized,
    Running,
    /// 系统生命周期耗尽：不再发射、不再更新，也不再提交绘制
    Expired,
}

/// 粒子系统统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParticleSystemStats {
    /// 总发射数
    pub total_emitted: u64,
    /// 本帧发射数
    pub frame_emitted: u32,
    /// 覆盖仍然活跃的粒子的次数
    pub recycled_active: u64,
}

#[derive(Component)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    particle_indexes: Vec<usize>,

    render_object: Option<RenderObject>,
    camera: Option<CameraHandle>,

    config: ParticleSystemConfig,
    state: ParticleSystemState,
    next_available_index: usize,
    next_spawn_time: f32,
    /// None 表示无限生命周期
    life_time: Option<f32>,

    rng: StdRng,
    stats: ParticleSystemStats,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleSystem {
    /// 使用系统熵作为随机种子
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 固定随机种子，结果可复现
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            particle_indexes: Vec::new(),
            render_object: None,
            camera: None,
            config: ParticleSystemConfig::default(),
            state: ParticleSystemState::Uninitialized,
            next_available_index: 0,
            next_spawn_time: 0.0,
            life_time: None,
            rng,
            stats: ParticleSystemStats::default(),
        }
    }

    /// 分配粒子池并准备共享的四边形绘制对象
    ///
    /// # 错误
    ///
    /// - 已初始化且未 `terminate` 时返回 [`ParticleError::AlreadyInitialized`]
    /// - `max_particles` 为零时返回 [`ParticleError::InvalidCapacity`]
    pub fn initialize(&mut self, config: ParticleSystemConfig) -> ParticleResult<()> {
        if self.state != ParticleSystemState::Uninitialized {
            return Err(ParticleError::AlreadyInitialized);
        }
        if config.max_particles == 0 {
            return Err(ParticleError::InvalidCapacity(config.max_particles));
        }

        let capacity = config.max_particles;
        self.particles = (0..capacity)
            .map(|_| {
                let mut particle = Particle::new();
                particle.initialize();
                particle
            })
            .collect();
        self.particle_indexes = (0..capacity).collect();
        self.next_available_index = 0;
        self.next_spawn_time = config.spawn_delay;
        self.life_time = (config.system_life_time > 0.0).then_some(config.system_life_time);
        self.render_object = Some(RenderObject::new(
            MeshBuilder::screen_quad(),
            config.particle_texture_id,
        ));
        self.stats = ParticleSystemStats::default();
        self.config = config;
        self.state = ParticleSystemState::Running;

        tracing::info!(
            target: "particles",
            capacity,
            texture = self.config.particle_texture_id,
            life_time = ?self.life_time,
            "Particle system initialized"
        );
        Ok(())
    }

    /// 释放绘制对象和粒子池，之后可以重新 `initialize`
    pub fn terminate(&mut self) {
        if self.state == ParticleSystemState::Uninitialized {
            return;
        }
        self.render_object = None;
        for particle in &mut self.particles {
            particle.terminate();
        }
        self.particles.clear();
        self.particle_indexes.clear();
        self.state = ParticleSystemState::Uninitialized;

        tracing::info!(
            target: "particles",
            total_emitted = self.stats.total_emitted,
            "Particle system terminated"
        );
    }

    pub fn set_camera(&mut self, camera: CameraHandle) {
        self.camera = Some(camera);
    }

    fn camera_position(&self) -> ParticleResult<Vec3> {
        let camera = self.camera.as_ref().ok_or(ParticleError::CameraNotSet)?;
        let camera = camera.read().map_err(|_| ParticleError::CameraPoisoned)?;
        Ok(camera.position())
    }

    /// 推进一帧
    ///
    /// 系统过期后直接返回；生命周期在本帧耗尽时，本帧仍完整执行。
    /// 相机缺失时在修改任何状态之前返回错误。
    pub fn update(&mut self, delta_time: f32) -> ParticleResult<()> {
        match self.state {
            ParticleSystemState::Uninitialized => return Err(ParticleError::NotInitialized),
            ParticleSystemState::Expired => return Ok(()),
            ParticleSystemState::Running => {}
        }
        let camera_position = self.camera_position()?;

        if let Some(life_time) = self.life_time.as_mut() {
            *life_time -= delta_time;
        }
        self.next_spawn_time -= delta_time;
        self.stats.frame_emitted = 0;
        if self.next_spawn_time <= 0.0 {
            self.spawn_particles();
        }

        for particle in &mut self.particles {
            particle.update(delta_time);
        }
        self.sort_by_distance(camera_position);

        if self.life_time.is_some_and(|life_time| life_time <= 0.0) {
            self.state = ParticleSystemState::Expired;
            tracing::debug!(
                target: "particles",
                active = self.active_count(),
                "Particle system expired"
            );
        }
        Ok(())
    }

    /// 按渲染顺序提交活跃粒子，返回提交的绘制次数
    ///
    /// 共享绘制对象的变换取自粒子，缩放替换为粒子当前缩放。
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> usize {
        if self.state != ParticleSystemState::Running {
            return 0;
        }
        let Some(render_object) = self.render_object.as_ref() else {
            return 0;
        };

        let mut object = render_object.clone();
        let mut drawn = 0;
        for &index in &self.particle_indexes {
            let particle = &self.particles[index];
            if !particle.is_active() {
                continue;
            }
            let info = particle.current_info();
            object.transform = *particle.transform();
            object.transform.scale = info.current_scale;
            renderer.render(&object, info.current_color);
            drawn += 1;
        }
        drawn
    }

    /// 调试面板：编辑配置后统一钳制范围
    pub fn debug_ui(&mut self, inspector: &mut dyn Inspector) {
        let config = &mut self.config;
        inspector.section("ParticleSystem", &mut |ui: &mut dyn Inspector| {
            edit_config(config, ui)
        });
        self.config.clamp_ranges();
    }

    fn spawn_particles(&mut self) {
        let count = draw_emit_count(
            &mut self.rng,
            self.config.min_particle_per_emit,
            self.config.max_particle_per_emit,
        );
        for _ in 0..count {
            self.spawn_particle();
        }
        self.stats.frame_emitted += count;
        self.stats.total_emitted += u64::from(count);

        self.next_spawn_time = random_range(
            &mut self.rng,
            self.config.min_time_between_emit,
            self.config.max_time_between_emit,
        );
        tracing::debug!(
            target: "particles",
            count,
            next_spawn_time = self.next_spawn_time,
            "Emitted particles"
        );
    }

    /// 激活环形游标指向的槽位，返回槽位索引
    fn spawn_particle(&mut self) -> usize {
        let index = self.next_available_index;
        self.next_available_index = (index + 1) % self.particles.len();

        let config = &self.config;
        let rng = &mut self.rng;

        let direction = perturb_direction(
            rng,
            config.spawn_direction,
            config.min_spawn_angle,
            config.max_spawn_angle,
        );
        let speed = random_range(rng, config.min_speed, config.max_speed);
        let life_time = random_range(rng, config.min_life_time, config.max_life_time);
        let start_color = lerp(config.min_start_color, config.max_start_color, rng.gen());
        let end_color = lerp(config.min_end_color, config.max_end_color, rng.gen());
        let start_scale = lerp(config.min_start_scale, config.max_start_scale, rng.gen());
        let end_scale = lerp(config.min_end_scale, config.max_end_scale, rng.gen());

        let data = ParticleActivateData {
            life_time,
            start_color,
            end_color,
            start_scale,
            end_scale,
            position: config.spawn_position,
            velocity: direction * speed,
        };

        let particle = &mut self.particles[index];
        if particle.is_active() {
            self.stats.recycled_active += 1;
            tracing::trace!(
                target: "particles",
                index,
                remaining = particle.remaining_life_time(),
                "Recycling active particle"
            );
        }
        particle.activate(data);
        index
    }

    fn sort_by_distance(&mut self, camera_position: Vec3) {
        let particles = &self.particles;
        self.particle_indexes.sort_by(|&a, &b| {
            let dist_a = particles[a]
                .transform()
                .position
                .distance_squared(camera_position);
            let dist_b = particles[b]
                .transform()
                .position
                .distance_squared(camera_position);
            dist_a.total_cmp(&dist_b)
        });
    }

    pub fn state(&self) -> ParticleSystemState {
        self.state
    }

    pub fn config(&self) -> &ParticleSystemConfig {
        &self.config
    }

    pub fn stats(&self) -> ParticleSystemStats {
        self.stats
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// 当前渲染顺序（粒子索引）
    pub fn particle_indexes(&self) -> &[usize] {
        &self.particle_indexes
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    pub fn next_available_index(&self) -> usize {
        self.next_available_index
    }

    pub fn next_spawn_time(&self) -> f32 {
        self.next_spawn_time
    }

    /// 剩余系统生命周期，None 表示无限
    pub fn remaining_life_time(&self) -> Option<f32> {
        self.life_time
    }

    pub fn render_object(&self) -> Option<&RenderObject> {
        self.render_object.as_ref()
    }
}

fn edit_config(config: &mut ParticleSystemConfig, ui: &mut dyn Inspector) {
    ui.drag_vec3("SpawnPosition", &mut config.spawn_position, 0.1);
    let previous_direction = config.spawn_direction;
    if ui.drag_vec3("SpawnDirection", &mut config.spawn_direction, 0.1) {
        config.spawn_direction = config
            .spawn_direction
            .try_normalize()
            .unwrap_or(previous_direction);
    }

    ui.drag_int("MinPerEmit", &mut config.min_particle_per_emit, 1.0, None);
    let max_per_emit_range = bounded(
        config.min_particle_per_emit.saturating_add(1),
        MAX_PARTICLE_PER_EMIT_LIMIT.max(config.max_particle_per_emit),
    );
    ui.drag_int(
        "MaxPerEmit",
        &mut config.max_particle_per_emit,
        1.0,
        Some(max_per_emit_range),
    );

    ui.drag_float("MinTime", &mut config.min_time_between_emit, 0.1, None);
    let max_time_range = bounded(
        config.min_time_between_emit,
        MAX_TIME_BETWEEN_EMIT_LIMIT.max(config.max_time_between_emit),
    );
    ui.drag_float(
        "MaxTime",
        &mut config.max_time_between_emit,
        0.1,
        Some(max_time_range),
    );

    ui.drag_float("MinAngle", &mut config.min_spawn_angle, 0.1, None);
    let max_angle_range = bounded(
        config.min_spawn_angle,
        MAX_SPAWN_ANGLE_LIMIT.max(config.max_spawn_angle),
    );
    ui.drag_float(
        "MaxAngle",
        &mut config.max_spawn_angle,
        0.1,
        Some(max_angle_range),
    );

    ui.drag_float("MinSpeed", &mut config.min_speed, 1.0, None);
    let max_speed_range = bounded(config.min_speed, MAX_SPEED_LIMIT.max(config.max_speed));
    ui.drag_float("MaxSpeed", &mut config.max_speed, 1.0, Some(max_speed_range));

    ui.drag_float("MinLifeTime", &mut config.min_life_time, 0.1, None);
    let max_life_range = bounded(
        config.min_life_time,
        MAX_LIFE_TIME_LIMIT.max(config.max_life_time),
    );
    ui.drag_float(
        "MaxLifeTime",
        &mut config.max_life_time,
        0.1,
        Some(max_life_range),
    );

    ui.color_edit("MinStartColor", &mut config.min_start_color);
    ui.color_edit("MaxStartColor", &mut config.max_start_color);
    ui.color_edit("MinEndColor", &mut config.min_end_color);
    ui.color_edit("MaxEndColor", &mut config.max_end_color);
    ui.drag_vec3("MinStartScale", &mut config.min_start_scale, 0.1);
    ui.drag_vec3("MaxStartScale", &mut config.max_start_scale, 0.1);
    ui.drag_vec3("MinEndScale", &mut config.min_end_scale, 0.1);
    ui.drag_vec3("MaxEndScale", &mut config.max_end_scale, 0.1);
}

/// `min + r * (max - min)`，r 在 [0, 1) 内均匀分布
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// 每次发射的粒子数
///
/// 在 `[min, max - 1]` 内均匀分布，永远取不到 `max`；`max <= min` 时返回 `min`。
pub fn draw_emit_count<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let span = max.saturating_sub(min);
    if span == 0 {
        min
    } else {
        min + rng.gen_range(0..span)
    }
}

/// 在发射方向附近随机偏转
///
/// 先绕轴 A、再绕轴 B 旋转同一个随机角度，两轴都垂直于发射方向。
/// 结果与发射方向的夹角 φ 满足 cos φ = cos² θ，不是立体角均匀的圆锥分布。
pub fn perturb_direction<R: Rng + ?Sized>(
    rng: &mut R,
    direction: Vec3,
    min_angle: f32,
    max_angle: f32,
) -> Vec3 {
    if max_angle <= 0.0 {
        return direction;
    }
    let angle = random_range(rng, min_angle, max_angle);

    // 方向接近 Y 轴时改用 X 轴求叉积
    let reference = if direction.dot(Vec3::Y).abs() > 0.99 {
        Vec3::X
    } else {
        Vec3::Y
    };
    let Some(axis_a) = direction.cross(reference).try_normalize() else {
        return direction;
    };
    let Some(axis_b) = direction.cross(axis_a).try_normalize() else {
        return direction;
    };

    let rotation = Quat::from_axis_angle(axis_b, angle) * Quat::from_axis_angle(axis_a, angle);
    rotation * direction
}
