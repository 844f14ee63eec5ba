use glam::Vec4;
use spring_particles::config::{AppConfig, ConfigSource};
use spring_particles::core::{initialize_logging, ParticleResult};
use spring_particles::render::{Camera, ParticleSystem, RenderObject, Renderer};

/// 只统计绘制次数的渲染器
#[derive(Default)]
struct CountingRenderer {
    draws: u64,
    peak_frame_draws: usize,
    alpha_sum: f64,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _object: &RenderObject, color: Vec4) {
        self.draws += 1;
        self.alpha_sum += color.w as f64;
    }
}

fn run() -> ParticleResult<()> {
    let (mut config, source) = AppConfig::load_or_default();
    config.apply_env_overrides();
    initialize_logging(&config.logging);

    match &source {
        ConfigSource::File(path) => tracing::info!(target: "particles", ?path, "Loaded config"),
        ConfigSource::Default => tracing::info!(target: "particles", "Using default configuration"),
    }
    config.simulation.validate()?;
    if let Err(e) = config.particles.validate() {
        tracing::warn!(target: "particles", "Degenerate particle config: {}", e);
    }

    let mut camera = Camera::new(config.simulation.camera_position);
    camera.look_at(config.particles.spawn_position);
    let camera = camera.into_handle();

    let mut system = match config.simulation.seed {
        Some(seed) => ParticleSystem::with_seed(seed),
        None => ParticleSystem::new(),
    };
    system.initialize(config.particles.clone())?;
    system.set_camera(camera);

    let mut renderer = CountingRenderer::default();
    let delta_time = config.simulation.delta_time;
    for frame in 0..config.simulation.frames {
        system.update(delta_time)?;
        let drawn = system.render(&mut renderer);
        renderer.peak_frame_draws = renderer.peak_frame_draws.max(drawn);
        tracing::trace!(target: "particles", frame, drawn, "Frame rendered");
    }

    let stats = system.stats();
    let mean_alpha = if renderer.draws > 0 {
        renderer.alpha_sum / renderer.draws as f64
    } else {
        0.0
    };
    tracing::info!(
        target: "particles",
        frames = config.simulation.frames,
        state = ?system.state(),
        emitted = stats.total_emitted,
        recycled = stats.recycled_active,
        draws = renderer.draws,
        peak_frame_draws = renderer.peak_frame_draws,
        mean_alpha,
        "Simulation finished"
    );

    system.terminate();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Particle demo failed: {}", e);
        std::process::exit(1);
    }
}
