//! Flat rectangular receivers.

use umbra_math::{PlaneFrame, Vec3};
use umbra_render::{Drawable, Geometry, GraphicsContext};
use umbra_types::constants::DEFAULT_PLANE_ALPHA_DEG;

/// A `width × depth` quad in its local XZ plane, facing local -Y,
/// placed in the world by a [`PlaneFrame`].
#[derive(Debug, Clone)]
pub struct Plane {
    label: String,
    frame: PlaneFrame,
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: [u32; 6],
}

impl Plane {
    pub fn new(label: impl Into<String>, width: f32, depth: f32, frame: PlaneFrame) -> Self {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        let corners = [
            Vec3::new(-hw, 0.0, -hd),
            Vec3::new(-hw, 0.0, hd),
            Vec3::new(hw, 0.0, hd),
            Vec3::new(hw, 0.0, -hd),
        ];
        let positions = corners.iter().flat_map(|c| c.to_array()).collect();
        let normals = std::iter::repeat(Vec3::NEG_Y.to_array())
            .take(4)
            .flatten()
            .collect();
        Self {
            label: label.into(),
            frame,
            positions,
            normals,
            // Counter-clockwise seen from -Y.
            indices: [0, 2, 1, 0, 3, 2],
        }
    }

    /// The 2 × 2 ground receiver: `T(-1.25, 0.7, 0.05) · S(1) · R_z(alpha)`.
    pub fn ground(alpha_deg: f32) -> Self {
        let frame = PlaneFrame::tilted(Vec3::new(-1.25, 0.7, 0.05), 1.0, alpha_deg.to_radians());
        Self::new("ground", 2.0, 2.0, frame)
    }

    /// The 20 × 10 backdrop: rotated -90° about X, then moved 3 along local Y.
    pub fn wall() -> Self {
        let frame = PlaneFrame::rotated_then_translated(
            Vec3::X,
            -std::f32::consts::FRAC_PI_2,
            Vec3::new(0.0, 3.0, 0.0),
        );
        Self::new("wall", 20.0, 10.0, frame)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn frame(&self) -> PlaneFrame {
        self.frame
    }

    /// World-space normal of the visible side.
    pub fn normal(&self) -> Vec3 {
        self.frame.direction(Vec3::NEG_Y)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::ground(DEFAULT_PLANE_ALPHA_DEG)
    }
}

impl Drawable for Plane {
    fn draw(&self, ctx: &mut dyn GraphicsContext) {
        ctx.push_transform(self.frame.transform());
        ctx.draw(Geometry::indexed(
            &self.label,
            &self.positions,
            &self.normals,
            &self.indices,
        ));
        ctx.pop_transform();
    }
}
