//! A mesh that draws itself and casts a shadow volume.
//!
//! Owns the static topology, its face normals, the flattened corner
//! arrays handed to the context and the shadow-volume arena that is
//! rebuilt every frame.

use std::path::Path;

use umbra_math::Vec3;
use umbra_mesh::{FaceNormalCache, MeshTopology};
use umbra_shadow::{ShadowVolume, ShadowVolumeBuilder};
use umbra_types::UmbraResult;

use crate::context::{Geometry, GraphicsContext};
use crate::drawable::{Drawable, ShadowCaster};
use crate::state::{BlendFunc, CullMode};

pub struct ShadowMesh {
    name: String,
    volume_label: String,
    topology: MeshTopology,
    normals: FaceNormalCache,
    builder: ShadowVolumeBuilder,
    volume: ShadowVolume,
    positions: Vec<f32>,
    corner_normals: Vec<f32>,
}

impl ShadowMesh {
    /// Wraps an already validated topology.
    pub fn new(name: impl Into<String>, topology: MeshTopology) -> Self {
        let name = name.into();
        let normals = FaceNormalCache::compute(&topology);
        let volume = ShadowVolume::for_mesh(&topology);
        Self {
            volume_label: format!("{name}/volume"),
            name,
            positions: topology.corner_positions(),
            corner_normals: topology.corner_normals(),
            normals,
            builder: ShadowVolumeBuilder::default(),
            volume,
            topology,
        }
    }

    /// Loads a mesh file, naming the mesh after the file stem.
    pub fn load(path: impl AsRef<Path>) -> UmbraResult<Self> {
        let path = path.as_ref();
        let topology = umbra_io::load_mesh(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());
        Ok(Self::new(name, topology))
    }

    pub fn with_extrusion_factor(mut self, factor: f32) -> Self {
        self.builder = ShadowVolumeBuilder::new(factor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label used for volume draws.
    pub fn volume_label(&self) -> &str {
        &self.volume_label
    }

    pub fn topology(&self) -> &MeshTopology {
        &self.topology
    }

    pub fn face_normals(&self) -> &FaceNormalCache {
        &self.normals
    }

    pub fn volume(&self) -> &ShadowVolume {
        &self.volume
    }

    pub fn builder(&self) -> &ShadowVolumeBuilder {
        &self.builder
    }
}

impl Drawable for ShadowMesh {
    fn draw(&self, ctx: &mut dyn GraphicsContext) {
        ctx.draw(Geometry::indexed(
            &self.name,
            &self.positions,
            &self.corner_normals,
            &self.topology.indices,
        ));
    }
}

impl ShadowCaster for ShadowMesh {
    fn create_volume(&mut self, light: Vec3) -> usize {
        self.builder
            .build(&self.topology, &self.normals, light, &mut self.volume)
    }

    fn draw_volume(&self, ctx: &mut dyn GraphicsContext, cull: CullMode, translucent: bool) {
        if self.volume.is_empty() {
            return;
        }
        if translucent {
            ctx.push_state();
            ctx.set_stencil_test(false);
            ctx.set_blend(Some(BlendFunc::TRANSLUCENT_VOLUME));
        }
        ctx.set_cull_mode(cull);
        ctx.draw(Geometry::soup(&self.volume_label, self.volume.as_slice()));
        if translucent {
            ctx.pop_state();
        }
    }

    fn volume_triangles(&self) -> usize {
        self.volume.triangle_count()
    }
}
