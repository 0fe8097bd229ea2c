//! Single-owner viewer: tessellates once, then redraws on input and animation ticks.

use cornu_core::Result;
use cornu_math::{Point3, Transform};
use cornu_mesh::{light_indicator, velocity_path, TessellationStats};
use tracing::{debug, info, trace};

use crate::animation::{AnimationDriver, AnimationState, FrameScheduler, TaskHandle};
use crate::backend::RenderBackend;
use crate::controls::{self, Control, Effect};
use crate::pipeline::{FrameParams, Renderer};
use crate::scene::{SceneConfig, SurfaceUniforms};

pub struct Viewer<B: RenderBackend, S: FrameScheduler> {
    backend: B,
    scheduler: S,
    renderer: Renderer,
    config: SceneConfig,
    driver: AnimationDriver,
    rotation: Transform,
    stats: TessellationStats,
    frames: u64,
}

impl<B: RenderBackend, S: FrameScheduler> Viewer<B, S> {
    /// Tessellate the surface, set up the backend, and draw the first frame.
    pub fn new(mut backend: B, scheduler: S, config: SceneConfig) -> Result<Self> {
        cornu_core::Validate::validate(&config)?;

        let surface = config.surface();
        let (mesh, stats) = config.tessellator().tessellate(&surface)?;
        info!(
            vertices = mesh.vertex_count(),
            recovered = stats.recovered_normals,
            "surface tessellated"
        );

        let animation = AnimationState::new(&config);
        let light = light_indicator(Point3::ZERO, animation.light_position);
        let path = velocity_path(animation.velocity_dir, config.model_radius);
        let renderer = Renderer::init(&mut backend, &mesh, &light, &path)?;

        let mut viewer = Self {
            backend,
            scheduler,
            renderer,
            config,
            driver: AnimationDriver::new(animation),
            rotation: Transform::identity(),
            stats,
            frames: 0,
        };
        viewer.draw();
        Ok(viewer)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn animation(&self) -> &AnimationState {
        &self.driver.animation
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn stats(&self) -> TessellationStats {
        self.stats
    }

    /// Frames drawn so far, including redraws triggered by input.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Orientation from the trackball collaborator.
    pub fn set_rotation(&mut self, rotation: Transform) {
        self.rotation = rotation;
        self.draw();
    }

    /// Apply one input. Returns whether a redraw happened.
    pub fn handle(&mut self, control: Control) -> bool {
        match controls::apply(&self.config, control) {
            Effect::Ignored => false,
            Effect::Redraw(config) => {
                debug!(?control, "control applied");
                self.config = config;
                self.draw();
                true
            }
            Effect::ToggleAnimation => {
                self.toggle_animation();
                self.driver.is_running()
            }
        }
    }

    /// Start or stop the animation. Starting requests an immediate frame.
    pub fn toggle_animation(&mut self) {
        self.driver.toggle(&mut self.scheduler);
        let elapsed_ms = self.driver.animation.elapsed_ms;
        if self.driver.is_running() {
            info!(elapsed_ms, "animation started");
        } else {
            info!(elapsed_ms, "animation stopped");
        }
    }

    /// Scheduler callback. Stale handles from cancelled frames are ignored.
    pub fn on_frame(&mut self, handle: TaskHandle) -> bool {
        if !self.driver.accepts(handle) {
            trace!(?handle, "ignoring stale frame");
            return false;
        }
        self.tick();
        true
    }

    fn tick(&mut self) {
        if !self.driver.is_running() {
            return;
        }
        let light = self.driver.animation.update_light(self.config.model_radius);
        let line = light_indicator(Point3::ZERO, light);
        self.renderer.update_light_line(&mut self.backend, &line);
        self.draw();
        self.driver.animation.advance_clock();
        self.driver.rearm(&mut self.scheduler);
        trace!(?light, "tick");
    }

    /// Redraw with the current configuration; never re-tessellates.
    pub fn draw(&mut self) {
        let uniforms = SurfaceUniforms::new(&self.config, &self.driver.animation, &self.rotation);
        let view_projection = self.config.camera().view_projection().as_mat4().to_cols_array();
        let frame = FrameParams {
            view_projection,
            surface: &uniforms,
            show_path: self.config.show_path,
        };
        self.renderer.draw(&mut self.backend, &frame);
        self.frames += 1;
    }
}
