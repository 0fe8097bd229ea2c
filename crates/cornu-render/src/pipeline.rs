//! Programs, buffers and draw order for the surface and its indicator lines.

use cornu_core::Result;
use cornu_math::{DVec3, Transform};
use cornu_mesh::{LineMesh, SurfaceMesh};
use tracing::{debug, info};

use crate::backend::{
    BufferId, BufferUsage, Capability, FrontFace, Primitive, ProgramId, RenderBackend, UniformValue,
};
use crate::scene::SurfaceUniforms;

pub const SURFACE_VERTEX_SHADER: &str = include_str!("../shaders/surface.vert");
pub const SURFACE_FRAGMENT_SHADER: &str = include_str!("../shaders/surface.frag");
pub const LINE_VERTEX_SHADER: &str = include_str!("../shaders/line.vert");
pub const LINE_FRAGMENT_SHADER: &str = include_str!("../shaders/line.frag");

/// Attribute and uniform names shared with the shader sources.
pub mod names {
    pub const VERTEX: &str = "vertex";
    pub const NORMAL: &str = "normal";
    pub const MODEL_VIEW_PROJECTION: &str = "ModelViewProjectionMatrix";
    pub const WORLD_INVERSE_TRANSPOSE: &str = "WorldInverseTranspose";
    pub const MAT_AMBIENT: &str = "matAmbientColor";
    pub const MAT_DIFFUSE: &str = "matDiffuseColor";
    pub const MAT_SPECULAR: &str = "matSpecularColor";
    pub const MAT_SHININESS: &str = "matShininess";
    pub const LS_AMBIENT: &str = "lsAmbientColor";
    pub const LS_DIFFUSE: &str = "lsDiffuseColor";
    pub const LS_SPECULAR: &str = "lsSpecularColor";
    pub const LIGHT_DIRECTION: &str = "LightDirection";
    pub const CAM_WORLD_POSITION: &str = "CamWorldPosition";
    pub const COLOR: &str = "color";
}

pub const LINE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Placement of the velocity path above the surface.
pub const PATH_OFFSET: DVec3 = DVec3::new(0.0, 2.0, 0.0);

/// Uploaded surface streams.
#[derive(Debug, Clone, Copy)]
pub struct GpuSurface {
    pub positions: BufferId,
    pub normals: BufferId,
    pub count: usize,
}

/// Uploaded line strip.
#[derive(Debug, Clone, Copy)]
pub struct GpuLine {
    pub buffer: BufferId,
    pub count: usize,
}

/// Per-frame inputs to [`Renderer::draw`].
pub struct FrameParams<'a> {
    pub view_projection: [f32; 16],
    pub surface: &'a SurfaceUniforms,
    pub show_path: bool,
}

/// Owns backend handles; geometry is handed over at upload and not kept.
#[derive(Debug)]
pub struct Renderer {
    surface_program: ProgramId,
    line_program: ProgramId,
    surface: GpuSurface,
    light_line: GpuLine,
    path_line: GpuLine,
}

impl Renderer {
    /// Compile both programs and upload the static geometry.
    ///
    /// Shader failures are returned as-is; nothing is retried.
    pub fn init(
        backend: &mut dyn RenderBackend,
        surface: &SurfaceMesh,
        light_line: &LineMesh,
        path_line: &LineMesh,
    ) -> Result<Self> {
        backend.ensure_available()?;
        let surface_program = backend.create_program(SURFACE_VERTEX_SHADER, SURFACE_FRAGMENT_SHADER)?;
        let line_program = backend.create_program(LINE_VERTEX_SHADER, LINE_FRAGMENT_SHADER)?;
        info!("shader programs linked");

        let positions = backend.create_buffer();
        let normals = backend.create_buffer();
        backend.upload(positions, &surface.flat_positions(), BufferUsage::Static);
        backend.upload(normals, &surface.flat_normals(), BufferUsage::Static);
        let surface = GpuSurface {
            positions,
            normals,
            count: surface.vertex_count(),
        };
        info!(vertices = surface.count, "surface uploaded");

        let light_line = upload_line(backend, light_line, BufferUsage::Stream);
        let path_line = upload_line(backend, path_line, BufferUsage::Static);

        backend.enable(Capability::DepthTest);
        backend.enable(Capability::CullFace);
        // Shading normals are t_v × t_u while triangles wind along t_u × t_v.
        backend.front_face(FrontFace::Clockwise);

        Ok(Self {
            surface_program,
            line_program,
            surface,
            light_line,
            path_line,
        })
    }

    pub fn surface_program(&self) -> ProgramId {
        self.surface_program
    }

    pub fn line_program(&self) -> ProgramId {
        self.line_program
    }

    pub fn surface(&self) -> GpuSurface {
        self.surface
    }

    /// Replace the light-indicator stream; called once per animation tick.
    pub fn update_light_line(&mut self, backend: &mut dyn RenderBackend, line: &LineMesh) {
        backend.upload(self.light_line.buffer, &line.flat_positions(), BufferUsage::Stream);
        self.light_line.count = line.vertex_count();
    }

    /// Clear, then draw the light line, the optional path, and the surface.
    pub fn draw(&self, backend: &mut dyn RenderBackend, frame: &FrameParams<'_>) {
        backend.clear(CLEAR_COLOR);

        self.draw_line(backend, &self.light_line, frame.view_projection);
        if frame.show_path {
            let offset = Transform::from_translation(PATH_OFFSET).to_cols_array_f32();
            let mvp = multiply_cols(&frame.view_projection, &offset);
            self.draw_line(backend, &self.path_line, mvp);
        }

        let p = self.surface_program;
        backend.use_program(p);
        apply_surface_uniforms(backend, p, frame.surface);
        backend.bind_attribute(p, names::VERTEX, self.surface.positions, 3);
        backend.bind_attribute(p, names::NORMAL, self.surface.normals, 3);
        backend.draw_arrays(Primitive::Triangles, self.surface.count);
        debug!(show_path = frame.show_path, "frame drawn");
    }

    fn draw_line(&self, backend: &mut dyn RenderBackend, line: &GpuLine, mvp: [f32; 16]) {
        let p = self.line_program;
        backend.use_program(p);
        backend.set_uniform(p, names::MODEL_VIEW_PROJECTION, UniformValue::Mat4(mvp));
        backend.set_uniform(p, names::COLOR, UniformValue::Vec4(LINE_COLOR));
        backend.bind_attribute(p, names::VERTEX, line.buffer, 3);
        backend.draw_arrays(Primitive::LineStrip, line.count);
    }
}

fn upload_line(backend: &mut dyn RenderBackend, line: &LineMesh, usage: BufferUsage) -> GpuLine {
    let buffer = backend.create_buffer();
    backend.upload(buffer, &line.flat_positions(), usage);
    GpuLine {
        buffer,
        count: line.vertex_count(),
    }
}

fn apply_surface_uniforms(backend: &mut dyn RenderBackend, p: ProgramId, u: &SurfaceUniforms) {
    use UniformValue::{Float, Mat4, Vec3};

    backend.set_uniform(p, names::MODEL_VIEW_PROJECTION, Mat4(u.model_view_projection));
    backend.set_uniform(p, names::WORLD_INVERSE_TRANSPOSE, Mat4(u.world_inverse_transpose));
    backend.set_uniform(p, names::MAT_AMBIENT, Vec3(u.mat_ambient));
    backend.set_uniform(p, names::MAT_DIFFUSE, Vec3(u.mat_diffuse));
    backend.set_uniform(p, names::MAT_SPECULAR, Vec3(u.mat_specular));
    backend.set_uniform(p, names::MAT_SHININESS, Float(u.mat_shininess));
    backend.set_uniform(p, names::LS_AMBIENT, Vec3(u.ls_ambient));
    backend.set_uniform(p, names::LS_DIFFUSE, Vec3(u.ls_diffuse));
    backend.set_uniform(p, names::LS_SPECULAR, Vec3(u.ls_specular));
    backend.set_uniform(p, names::LIGHT_DIRECTION, Vec3(u.light_direction));
    backend.set_uniform(p, names::CAM_WORLD_POSITION, Vec3(u.cam_world_position));
}

/// Product of two column-major 4x4 matrices.
fn multiply_cols(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let a = cornu_math::Mat4::from_cols_array(a);
    let b = cornu_math::Mat4::from_cols_array(b);
    (a * b).to_cols_array()
}
