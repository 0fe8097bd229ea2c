//! Immutable scene configuration and the per-draw uniform values derived from it.

use std::path::Path;

use cornu_core::{CornuError, Result, Validate};
use cornu_geometry::{CornucopiaSurface, Differentiator, NormalEstimator, ParameterDomain, ShapeParams};
use cornu_math::{to_f32_array, DVec3, Point3, Transform, Vector3};
use cornu_mesh::GridTessellator;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationState;
use crate::camera::Camera;

/// Surface material colors and shininess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.7, 0.7, 0.1],
            specular: [0.97, 0.97, 0.97],
            shininess: 12,
        }
    }
}

/// Everything a draw needs that is not animation state.
///
/// Values are replaced wholesale by controls, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub shape: ShapeParams,
    pub turns: f64,
    pub subdivisions: usize,
    pub differentiator: Differentiator,
    pub material: Material,
    pub light_intensity: f32,
    pub translation: DVec3,
    pub zoom: f64,
    pub camera_position: Point3,
    pub initial_light: Point3,
    pub model_radius: f64,
    pub velocity: Vector3,
    pub show_path: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: ShapeParams::default(),
            turns: CornucopiaSurface::DEFAULT_TURNS,
            subdivisions: ParameterDomain::DEFAULT_SUBDIVISIONS,
            differentiator: Differentiator::default(),
            material: Material::default(),
            light_intensity: 1.0,
            translation: DVec3::ZERO,
            zoom: 1.0,
            camera_position: Point3::new(0.0, 0.0, -10.0),
            initial_light: Point3::new(0.0, 0.0, 5.0),
            model_radius: 1.0,
            velocity: Vector3::new(1.0, 1.0, 0.0),
            show_path: false,
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CornuError::InvalidConfig(e.to_string()))
    }

    pub fn surface(&self) -> CornucopiaSurface {
        CornucopiaSurface::new(self.shape).with_turns(self.turns)
    }

    /// Tessellator over the configured surface domain.
    pub fn tessellator(&self) -> GridTessellator {
        let surface = self.surface();
        GridTessellator::new(
            ParameterDomain::for_surface(&surface, self.subdivisions, self.subdivisions),
            NormalEstimator::new(self.differentiator, Default::default()),
        )
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_position, self.zoom)
    }
}

impl Validate for SceneConfig {
    fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        if !(self.turns.is_finite() && self.turns > 0.0) {
            return Err(CornuError::InvalidConfig(format!("turns must be positive, got {}", self.turns)));
        }
        if !(1..=ParameterDomain::MAX_SUBDIVISIONS).contains(&self.subdivisions) {
            return Err(CornuError::InvalidConfig(format!(
                "subdivisions must be within [1, {}], got {}",
                ParameterDomain::MAX_SUBDIVISIONS,
                self.subdivisions
            )));
        }
        if !(self.differentiator.delta.is_finite() && self.differentiator.delta > 0.0) {
            return Err(CornuError::InvalidConfig(format!(
                "difference step must be positive, got {}",
                self.differentiator.delta
            )));
        }
        if !(0.0..=2.0).contains(&self.zoom) {
            return Err(CornuError::InvalidConfig(format!("zoom must be within [0, 2], got {}", self.zoom)));
        }
        if !(self.model_radius.is_finite() && self.model_radius > 0.0) {
            return Err(CornuError::InvalidConfig(format!(
                "model radius must be positive, got {}",
                self.model_radius
            )));
        }
        if !self.light_intensity.is_finite() || self.light_intensity < 0.0 {
            return Err(CornuError::InvalidConfig(format!(
                "light intensity must be non-negative, got {}",
                self.light_intensity
            )));
        }
        let vectors = [self.translation, self.camera_position, self.initial_light, self.velocity];
        if vectors.iter().any(|v| !v.is_finite()) {
            return Err(CornuError::InvalidConfig("vectors must be finite".to_string()));
        }
        Ok(())
    }
}

/// Values for the lit-surface program, one field per named uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceUniforms {
    pub model_view_projection: [f32; 16],
    pub world_inverse_transpose: [f32; 16],
    pub mat_ambient: [f32; 3],
    pub mat_diffuse: [f32; 3],
    pub mat_specular: [f32; 3],
    pub mat_shininess: f32,
    pub ls_ambient: [f32; 3],
    pub ls_diffuse: [f32; 3],
    pub ls_specular: [f32; 3],
    pub light_direction: [f32; 3],
    pub cam_world_position: [f32; 3],
}

impl SurfaceUniforms {
    pub const LIGHT_AMBIENT: [f32; 3] = [0.1, 0.1, 0.1];
    pub const LIGHT_SPECULAR: [f32; 3] = [1.0, 1.0, 1.0];

    /// `rotation` is the trackball orientation supplied by the input layer.
    pub fn new(config: &SceneConfig, state: &AnimationState, rotation: &Transform) -> Self {
        let model = model_transform(config, rotation);
        let mvp = config.camera().view_projection() * model.to_mat4();
        let i = config.light_intensity;

        Self {
            model_view_projection: mvp.as_mat4().to_cols_array(),
            world_inverse_transpose: model.inverse_transpose().to_cols_array_f32(),
            mat_ambient: config.material.ambient,
            mat_diffuse: config.material.diffuse,
            mat_specular: config.material.specular,
            mat_shininess: config.material.shininess as f32,
            ls_ambient: Self::LIGHT_AMBIENT,
            ls_diffuse: [i, i, i],
            ls_specular: Self::LIGHT_SPECULAR,
            light_direction: to_f32_array(light_direction(state.light_position)),
            cam_world_position: to_f32_array(config.camera_position),
        }
    }
}

/// Model matrix: trackball rotation, then the configured translation.
pub fn model_transform(config: &SceneConfig, rotation: &Transform) -> Transform {
    rotation.then(&Transform::from_translation(config.translation))
}

/// Direction the light travels: from the light position toward the origin.
pub fn light_direction(light: Point3) -> Vector3 {
    -light.normalize_or_zero()
}
