//! Scene document model
//!
//! A scene is a handful of typed global blocks (integrator, sampler,
//! camera) plus an ordered, named collection of object subtrees. The
//! globals are structured fields rather than raw tags so that mutators
//! like `set_resolution` address them by name instead of by child
//! position; the positional layout only appears at serialization time,
//! where the wire format requires it.

use super::tag::{serialize_document, TagNode};
use super::{SceneError, SceneResult};

/// Sampler block: sampling strategy plus samples per pixel.
#[derive(Debug, Clone)]
pub struct Sampler {
    pub kind: String,
    pub sample_count: u32,
}

impl Sampler {
    pub fn new(kind: impl Into<String>, sample_count: u32) -> Self {
        Self {
            kind: kind.into(),
            sample_count,
        }
    }

    /// Wire layout: the count is the sampler's first child.
    fn to_tag(&self) -> TagNode {
        let mut sampler = TagNode::new("sampler").with_attr("type", self.kind.as_str());
        sampler.add_child(
            TagNode::new("integer")
                .with_attr("name", "sampleCount")
                .with_attr("value", self.sample_count.to_string()),
        );
        sampler
    }
}

/// Perspective camera block.
///
/// `to_world` holds the world transform as raw transform-op tags (`scale`,
/// `matrix`, `translate`, ...) since those pass through to the renderer
/// untyped.
#[derive(Debug, Clone)]
pub struct Camera {
    pub kind: String,
    pub fov: f64,
    pub to_world: Vec<TagNode>,
    pub width: u32,
    pub height: u32,
    pub rfilter: Option<String>,
}

impl Camera {
    /// Wire layout, in child order: fov, transform, width, height, rfilter.
    fn to_tag(&self) -> TagNode {
        let mut camera = TagNode::new("camera").with_attr("type", self.kind.as_str());
        camera.add_child(
            TagNode::new("float")
                .with_attr("name", "fov")
                .with_attr("value", self.fov.to_string()),
        );
        let mut transform = TagNode::new("transform").with_attr("name", "toWorld");
        for op in &self.to_world {
            transform.add_child(op.clone());
        }
        camera.add_child(transform);
        camera.add_child(
            TagNode::new("integer")
                .with_attr("name", "width")
                .with_attr("value", self.width.to_string()),
        );
        camera.add_child(
            TagNode::new("integer")
                .with_attr("name", "height")
                .with_attr("value", self.height.to_string()),
        );
        if let Some(rfilter) = &self.rfilter {
            camera.add_child(TagNode::new("rfilter").with_attr("type", rfilter.as_str()));
        }
        camera
    }
}

/// A complete scene description: global render blocks plus named objects.
///
/// Cloning produces a fully independent scene; registering the same
/// template many times with small variations relies on that.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    integrator: String,
    sampler: Sampler,
    camera: Camera,
    objects: Vec<(String, TagNode)>,
}

impl Scene {
    pub fn new(name: impl Into<String>, integrator: impl Into<String>, sampler: Sampler, camera: Camera) -> Self {
        Self {
            name: name.into(),
            integrator: integrator.into(),
            sampler,
            camera,
            objects: Vec::new(),
        }
    }

    pub fn integrator(&self) -> &str {
        &self.integrator
    }

    pub fn set_integrator(&mut self, kind: impl Into<String>) {
        self.integrator = kind.into();
    }

    pub fn sampler_kind(&self) -> &str {
        &self.sampler.kind
    }

    pub fn spp(&self) -> u32 {
        self.sampler.sample_count
    }

    pub fn set_spp(&mut self, spp: u32) {
        self.sampler.sample_count = spp;
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.camera.width, self.camera.height)
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.camera.width = width;
        self.camera.height = height;
    }

    pub fn fov(&self) -> f64 {
        self.camera.fov
    }

    pub fn set_fov(&mut self, fov: f64) {
        self.camera.fov = fov;
    }

    /// Apply one of the named quality presets.
    ///
    /// - `"l"`: 256×256 at 16 spp
    /// - `"m"`: 512×512 at 32 spp
    /// - `"h"`: 512×512 at 512 spp
    /// - `"final"` / `"report"`: 1024×1024 at 1024 spp
    pub fn set_quality(&mut self, quality: &str) -> SceneResult<()> {
        match quality {
            "l" => {
                self.set_spp(16);
                self.set_resolution(256, 256);
            }
            "m" => {
                self.set_spp(32);
                self.set_resolution(512, 512);
            }
            "h" => {
                self.set_spp(512);
                self.set_resolution(512, 512);
            }
            "final" | "report" => {
                self.set_spp(1024);
                self.set_resolution(1024, 1024);
            }
            other => {
                return Err(SceneError::UnknownQuality {
                    quality: other.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Register an object subtree under a unique identifier.
    pub fn add_object(&mut self, name: impl Into<String>, object: TagNode) -> SceneResult<()> {
        let name = name.into();
        if self.objects.iter().any(|(n, _)| *n == name) {
            return Err(SceneError::DuplicateObject { name });
        }
        self.objects.push((name, object));
        Ok(())
    }

    pub fn remove_object(&mut self, name: &str) -> SceneResult<()> {
        let index = self
            .objects
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| SceneError::ObjectNotFound {
                name: name.to_string(),
            })?;
        self.objects.remove(index);
        Ok(())
    }

    pub fn get_object(&self, name: &str) -> SceneResult<&TagNode> {
        self.objects
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tag)| tag)
            .ok_or_else(|| SceneError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    pub fn get_object_mut(&mut self, name: &str) -> SceneResult<&mut TagNode> {
        self.objects
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, tag)| tag)
            .ok_or_else(|| SceneError::ObjectNotFound {
                name: name.to_string(),
            })
    }

    /// Replace the object's BSDF. The object ends up with exactly one
    /// `bsdf` child regardless of prior state.
    pub fn set_bsdf(&mut self, object: &str, bsdf: TagNode) -> SceneResult<()> {
        let object = self.get_object_mut(object)?;
        object.remove_child("bsdf");
        object.add_child(bsdf);
        Ok(())
    }

    /// Replace the object's emitter with an area emitter of the given
    /// radiance.
    pub fn set_emission(&mut self, object: &str, radiance: [f64; 3]) -> SceneResult<()> {
        let object = self.get_object_mut(object)?;
        object.remove_child("emitter");
        let mut emitter = TagNode::new("emitter").with_attr("type", "area");
        emitter.add_child(
            TagNode::new("color")
                .with_attr("name", "radiance")
                .with_attr("value", format!("{} {} {}", radiance[0], radiance[1], radiance[2])),
        );
        object.add_child(emitter);
        Ok(())
    }

    /// Serialize the full document in the Nori dialect.
    pub fn generate(&self) -> SceneResult<String> {
        let mut root = TagNode::new("scene");
        root.add_child(TagNode::new("integrator").with_attr("type", self.integrator.as_str()));
        root.add_child(self.sampler.to_tag());
        root.add_child(self.camera.to_tag());
        for (_, object) in &self.objects {
            root.add_child(object.clone());
        }
        serialize_document(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::builders::make_cbox_scene;
    use crate::scene::make_material;

    #[test]
    fn test_quality_presets() {
        let mut scene = make_cbox_scene("cbox", Default::default());

        scene.set_quality("l").unwrap();
        assert_eq!(scene.resolution(), (256, 256));
        assert_eq!(scene.spp(), 16);

        scene.set_quality("m").unwrap();
        assert_eq!(scene.resolution(), (512, 512));
        assert_eq!(scene.spp(), 32);

        scene.set_quality("h").unwrap();
        assert_eq!(scene.resolution(), (512, 512));
        assert_eq!(scene.spp(), 512);

        for preset in ["final", "report"] {
            scene.set_quality("l").unwrap();
            scene.set_quality(preset).unwrap();
            assert_eq!(scene.resolution(), (1024, 1024));
            assert_eq!(scene.spp(), 1024);
        }
    }

    #[test]
    fn test_unknown_quality_is_rejected() {
        let mut scene = make_cbox_scene("cbox", Default::default());
        let err = scene.set_quality("x").unwrap_err();
        assert!(matches!(err, SceneError::UnknownQuality { ref quality } if quality == "x"));
        // A rejected preset leaves the scene untouched.
        assert_eq!(scene.resolution(), (512, 512));
        assert_eq!(scene.spp(), 32);
    }

    #[test]
    fn test_duplicate_object_is_rejected() {
        let mut scene = make_cbox_scene("cbox", Default::default());
        let err = scene.add_object("ball", TagNode::new("mesh")).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateObject { ref name } if name == "ball"));
    }

    #[test]
    fn test_missing_object_is_rejected() {
        let mut scene = make_cbox_scene("cbox", Default::default());
        assert!(matches!(
            scene.remove_object("teapot").unwrap_err(),
            SceneError::ObjectNotFound { .. }
        ));
        assert!(matches!(
            scene.get_object("teapot").unwrap_err(),
            SceneError::ObjectNotFound { .. }
        ));

        scene.remove_object("ball").unwrap();
        assert!(scene.get_object("ball").is_err());
    }

    #[test]
    fn test_set_bsdf_replaces_instead_of_accumulating() {
        let mut scene = make_cbox_scene("cbox", Default::default());

        scene.set_bsdf("ball", make_material("mirror", &[])).unwrap();
        scene
            .set_bsdf("ball", make_material("diffuse", &[("albedo", [0.5, 0.5, 0.5].into())]))
            .unwrap();

        let ball = scene.get_object("ball").unwrap();
        let bsdfs: Vec<_> = ball.children().iter().filter(|c| c.name() == "bsdf").collect();
        assert_eq!(bsdfs.len(), 1);
        assert_eq!(bsdfs[0].attr("type"), Some("diffuse"));
    }

    #[test]
    fn test_set_emission_replaces_emitter() {
        let mut scene = make_cbox_scene("cbox", Default::default());
        scene.set_emission("emitter", [5.0, 5.0, 5.0]).unwrap();
        scene.set_emission("emitter", [2.0, 3.0, 4.0]).unwrap();

        let object = scene.get_object("emitter").unwrap();
        let emitters: Vec<_> = object
            .children()
            .iter()
            .filter(|c| c.name() == "emitter")
            .collect();
        assert_eq!(emitters.len(), 1);
        assert_eq!(emitters[0].attr("type"), Some("area"));
        assert_eq!(
            emitters[0].child("color").unwrap().attr("value"),
            Some("2 3 4")
        );
    }

    #[test]
    fn test_clone_does_not_alias() {
        let original = make_cbox_scene("cbox", Default::default());
        let mut copy = original.clone();

        copy.set_resolution(64, 64);
        copy.set_bsdf("ball", make_material("mirror", &[])).unwrap();

        assert_eq!(original.resolution(), (512, 512));
        let ball = original.get_object("ball").unwrap();
        assert_eq!(ball.child("bsdf").unwrap().attr("type"), Some("diffuse"));
    }
}
