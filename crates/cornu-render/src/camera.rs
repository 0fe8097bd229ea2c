use cornu_math::{DMat4, Point3, Vector3};

/// Smallest vertical field of view accepted by the projection.
const MIN_FOV: f64 = 1e-3;

/// A fixed perspective camera looking at the origin.
///
/// The field of view doubles as the zoom control.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Point3,       // camera position
    pub target: Point3,    // look-at target
    pub up: Vector3,       // up vector
    pub fov_y: f64,        // vertical FOV in radians
    pub aspect: f64,       // width/height
    pub near: f64,         // near clip plane
    pub far: f64,          // far clip plane
    pub yaw: f64,          // extra rotation about +Y applied before the view, radians
}

impl Camera {
    pub const DEFAULT_YAW: f64 = 179.0;

    /// Viewer camera: eye at `eye`, looking at the origin, aspect 2, depth `[1, 40]`.
    pub fn new(eye: Point3, fov_y: f64) -> Self {
        Self {
            eye,
            target: Point3::ZERO,
            up: Vector3::Y,
            fov_y,
            aspect: 2.0,
            near: 1.0,
            far: 40.0,
            yaw: Self::DEFAULT_YAW,
        }
    }

    /// Right-handed look-at view matrix.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style perspective projection (NDC z in `[-1, 1]`).
    pub fn projection_matrix(&self) -> DMat4 {
        let fov = self.fov_y.clamp(MIN_FOV, std::f64::consts::PI - MIN_FOV);
        DMat4::perspective_rh_gl(fov, self.aspect, self.near, self.far)
    }

    /// `projection · view · yaw`, the matrix every draw starts from.
    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix() * DMat4::from_rotation_y(self.yaw)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, -10.0), 1.0)
    }
}
