//! Articulated casters.

use std::path::Path;

use umbra_math::Vec3;
use umbra_render::{CullMode, Drawable, GraphicsContext, ShadowCaster, ShadowMesh};
use umbra_types::UmbraResult;

/// An object posed once per frame before it is drawn.
pub trait Articulated {
    /// Aims the object at `target`, approaching along `normal`.
    fn resolve(&mut self, target: Vec3, normal: Vec3);

    /// Advances internal animation by `dt` seconds.
    fn update(&mut self, dt: f32);
}

/// A rigid set of shadow meshes drawn and shadowed as one object.
///
/// Parts do not move: `resolve` only records the requested pose and
/// `update` only advances the clock.
pub struct MeshGroup {
    parts: Vec<ShadowMesh>,
    target: Option<(Vec3, Vec3)>,
    clock: f32,
}

impl MeshGroup {
    pub fn new(parts: Vec<ShadowMesh>) -> Self {
        Self {
            parts,
            target: None,
            clock: 0.0,
        }
    }

    /// Loads every part file with the given extrusion factor.
    pub fn load<P: AsRef<Path>>(paths: &[P], extrusion_factor: f32) -> UmbraResult<Self> {
        let parts = paths
            .iter()
            .map(|p| Ok(ShadowMesh::load(p)?.with_extrusion_factor(extrusion_factor)))
            .collect::<UmbraResult<Vec<_>>>()?;
        tracing::debug!(parts = parts.len(), "mesh group loaded");
        Ok(Self::new(parts))
    }

    pub fn parts(&self) -> &[ShadowMesh] {
        &self.parts
    }

    /// Last pose passed to [`Articulated::resolve`], as `(target, normal)`.
    pub fn target(&self) -> Option<(Vec3, Vec3)> {
        self.target
    }

    /// Seconds accumulated through [`Articulated::update`].
    pub fn clock(&self) -> f32 {
        self.clock
    }
}

impl Drawable for MeshGroup {
    fn draw(&self, ctx: &mut dyn GraphicsContext) {
        for part in &self.parts {
            part.draw(ctx);
        }
    }
}

impl ShadowCaster for MeshGroup {
    fn create_volume(&mut self, light: Vec3) -> usize {
        self.parts.iter_mut().map(|p| p.create_volume(light)).sum()
    }

    fn draw_volume(&self, ctx: &mut dyn GraphicsContext, cull: CullMode, translucent: bool) {
        for part in &self.parts {
            part.draw_volume(ctx, cull, translucent);
        }
    }

    fn volume_triangles(&self) -> usize {
        self.parts.iter().map(|p| p.volume_triangles()).sum()
    }
}

impl Articulated for MeshGroup {
    fn resolve(&mut self, target: Vec3, normal: Vec3) {
        self.target = Some((target, normal));
    }

    fn update(&mut self, dt: f32) {
        self.clock += dt;
    }
}
