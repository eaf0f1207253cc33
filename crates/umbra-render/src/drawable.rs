//! Drawable capabilities.

use umbra_math::Vec3;

use crate::context::GraphicsContext;
use crate::state::CullMode;

/// Anything that can submit its geometry to a graphics context.
pub trait Drawable {
    fn draw(&self, ctx: &mut dyn GraphicsContext);
}

/// A drawable that also casts a shadow volume.
pub trait ShadowCaster: Drawable {
    /// Rebuilds the shadow volume for a light at `light`.
    ///
    /// Returns the number of volume triangles.
    fn create_volume(&mut self, light: Vec3) -> usize;

    /// Draws the current shadow volume culling `cull` faces.
    ///
    /// With `translucent` set the volume is blended over the scene for
    /// inspection instead of being drawn into the stencil.
    fn draw_volume(&self, ctx: &mut dyn GraphicsContext, cull: CullMode, translucent: bool);

    /// Triangles in the current shadow volume.
    fn volume_triangles(&self) -> usize;
}
