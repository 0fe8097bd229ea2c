//! The seam between the geometry core and a graphics device.

use std::collections::HashMap;

use cornu_core::{CornuError, Result, ShaderStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    LineStrip,
}

/// Upload hint: written once or replaced every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    Static,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    DepthTest,
    CullFace,
}

/// Which winding counts as front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    CounterClockwise,
    Clockwise,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([f32; 16]),
}

/// Graphics device operations used by the renderer.
///
/// Only the availability check and program creation can fail; other calls
/// are fire-and-forget sinks.
pub trait RenderBackend {
    /// Fails with [`CornuError::UnsupportedEnvironment`] when no usable device
    /// context exists.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Compile and link a program from vertex and fragment source.
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<ProgramId>;

    fn create_buffer(&mut self) -> BufferId;

    /// Replace the contents of `buffer`.
    fn upload(&mut self, buffer: BufferId, data: &[f32], usage: BufferUsage);

    fn use_program(&mut self, program: ProgramId);

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue);

    /// Bind `buffer` to the named vertex attribute with `components` floats per vertex.
    fn bind_attribute(&mut self, program: ProgramId, name: &str, buffer: BufferId, components: u32);

    fn draw_arrays(&mut self, primitive: Primitive, count: usize);

    fn clear(&mut self, color: [f32; 4]);

    fn enable(&mut self, capability: Capability);

    fn front_face(&mut self, face: FrontFace);
}

/// One recorded draw call with the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub program: Option<ProgramId>,
    pub primitive: Primitive,
    pub count: usize,
}

/// Headless backend that keeps everything it is given.
///
/// "Compilation" only checks that each stage defines `main`, which is enough
/// to surface typed shader errors without a device.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    current_program: Option<ProgramId>,
    pub programs: Vec<ProgramId>,
    pub buffers: HashMap<BufferId, Vec<f32>>,
    pub uploads: usize,
    pub uniforms: HashMap<(ProgramId, String), UniformValue>,
    pub attributes: HashMap<(ProgramId, String), BufferId>,
    pub draws: Vec<DrawCall>,
    pub clears: usize,
    pub capabilities: Vec<Capability>,
    pub front_face: Option<FrontFace>,
    /// Forces the next link to fail with this log.
    pub fail_link: Option<String>,
    /// Reports the environment as unsupported with this reason.
    pub unavailable: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn uniform(&self, program: ProgramId, name: &str) -> Option<UniformValue> {
        self.uniforms.get(&(program, name.to_string())).copied()
    }

    /// Draw calls issued since the last clear.
    pub fn frame_draws(&self) -> &[DrawCall] {
        &self.draws
    }
}

fn check_stage(stage: ShaderStage, src: &str) -> Result<()> {
    if src.contains("void main") {
        Ok(())
    } else {
        Err(CornuError::ShaderCompile {
            stage,
            log: "missing entry point `void main()`".to_string(),
        })
    }
}

impl RenderBackend for RecordingBackend {
    fn ensure_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(CornuError::UnsupportedEnvironment(reason.clone())),
            None => Ok(()),
        }
    }

    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<ProgramId> {
        check_stage(ShaderStage::Vertex, vertex_src)?;
        check_stage(ShaderStage::Fragment, fragment_src)?;
        if let Some(log) = self.fail_link.take() {
            return Err(CornuError::ShaderLink(log));
        }
        let id = ProgramId(self.next());
        self.programs.push(id);
        Ok(id)
    }

    fn create_buffer(&mut self) -> BufferId {
        let id = BufferId(self.next());
        self.buffers.insert(id, Vec::new());
        id
    }

    fn upload(&mut self, buffer: BufferId, data: &[f32], _usage: BufferUsage) {
        self.buffers.insert(buffer, data.to_vec());
        self.uploads += 1;
    }

    fn use_program(&mut self, program: ProgramId) {
        self.current_program = Some(program);
    }

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue) {
        self.uniforms.insert((program, name.to_string()), value);
    }

    fn bind_attribute(&mut self, program: ProgramId, name: &str, buffer: BufferId, _components: u32) {
        self.attributes.insert((program, name.to_string()), buffer);
    }

    fn draw_arrays(&mut self, primitive: Primitive, count: usize) {
        self.draws.push(DrawCall {
            program: self.current_program,
            primitive,
            count,
        });
    }

    fn clear(&mut self, _color: [f32; 4]) {
        self.clears += 1;
        self.draws.clear();
    }

    fn enable(&mut self, capability: Capability) {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
    }

    fn front_face(&mut self, face: FrontFace) {
        self.front_face = Some(face);
    }
}
