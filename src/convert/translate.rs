use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::debug;

use crate::scene::{serialize_document, TagNode};

use super::maps::{lookup, value_table, INTEGRATOR_MAP, TAG_MAP};
use super::{ConvertError, ConvertResult};

/// Cross-cutting render settings pulled out of a Nori document before the
/// element-by-element rewrite. Only lives for the duration of one
/// translation.
#[derive(Debug)]
struct SceneMetadata {
    integrator: String,
    sampler: String,
    sample_count: String,
    fov: String,
    width: String,
    height: String,
    rfilter: Option<String>,
    /// Transform ops in document order: (op name, attributes).
    transform: Vec<(String, Vec<(String, String)>)>,
}

fn malformed(reason: impl Into<String>) -> ConvertError {
    ConvertError::MalformedDocument {
        reason: reason.into(),
    }
}

fn find_child<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn required_attr<'a>(node: Node<'a, 'a>, attr: &str) -> ConvertResult<&'a str> {
    node.attribute(attr).ok_or_else(|| {
        malformed(format!(
            "element {} is missing attribute {}",
            node.tag_name().name(),
            attr
        ))
    })
}

fn extract_metadata(root: Node) -> ConvertResult<SceneMetadata> {
    let integrator = find_child(root, "integrator")
        .ok_or_else(|| malformed("scene has no integrator element"))?;
    let integrator = required_attr(integrator, "type")?.to_string();

    let sampler_tag =
        find_child(root, "sampler").ok_or_else(|| malformed("scene has no sampler element"))?;
    let sampler = required_attr(sampler_tag, "type")?.to_string();
    let count_tag = find_child(sampler_tag, "integer")
        .ok_or_else(|| malformed("sampler has no integer sample count child"))?;
    let sample_count = required_attr(count_tag, "value")?.to_string();

    let camera_tag =
        find_child(root, "camera").ok_or_else(|| malformed("scene has no camera element"))?;
    let fov_tag = find_child(camera_tag, "float")
        .ok_or_else(|| malformed("camera has no float field-of-view child"))?;
    let fov = required_attr(fov_tag, "value")?.to_string();

    let mut width = None;
    let mut height = None;
    for tag in camera_tag
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "integer")
    {
        match tag.attribute("name") {
            Some("width") => width = Some(required_attr(tag, "value")?.to_string()),
            Some("height") => height = Some(required_attr(tag, "value")?.to_string()),
            _ => {}
        }
    }
    let width = width.ok_or_else(|| malformed("camera has no width integer child"))?;
    let height = height.ok_or_else(|| malformed("camera has no height integer child"))?;

    let rfilter = match find_child(camera_tag, "rfilter") {
        Some(tag) => Some(required_attr(tag, "type")?.to_string()),
        None => None,
    };

    let transform_tag = find_child(camera_tag, "transform")
        .ok_or_else(|| malformed("camera has no world transform"))?;
    let transform = transform_tag
        .children()
        .filter(|n| n.is_element())
        .map(|op| {
            (
                op.tag_name().name().to_string(),
                op.attributes()
                    .map(|a| (a.name().to_string(), a.value().to_string()))
                    .collect(),
            )
        })
        .collect();

    Ok(SceneMetadata {
        integrator,
        sampler,
        sample_count,
        fov,
        width,
        height,
        rfilter,
        transform,
    })
}

/// Rebuild the camera world transform for Mitsuba's handedness: an
/// explicit axis scale gets its first component negated and is consumed;
/// without one, a default `-1,1,1` flip is synthesized. Every other op
/// passes through in encounter order.
fn build_to_world(mut transform: Vec<(String, Vec<(String, String)>)>) -> ConvertResult<TagNode> {
    let mut to_world = TagNode::new("transform").with_attr("name", "to_world");

    let scale = match transform.iter().position(|(name, _)| name == "scale") {
        Some(index) => {
            let (_, attrs) = transform.remove(index);
            let raw = attrs
                .iter()
                .find(|(key, _)| key == "value")
                .map(|(_, value)| value.as_str())
                .ok_or_else(|| malformed("camera scale op has no value"))?;
            let mut components = raw
                .split(',')
                .map(|part| part.trim().parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|_| malformed(format!("camera scale is not numeric: {}", raw)))?;
            components[0] = -components[0];
            components
        }
        None => vec![-1.0, 1.0, 1.0],
    };
    let scale = scale
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    to_world.add_child(TagNode::new("scale").with_attr("value", scale));

    for (name, attrs) in transform {
        let mut op = TagNode::new(name);
        for (key, value) in attrs {
            op.set_attr(key, value);
        }
        to_world.add_child(op);
    }

    Ok(to_world)
}

/// Rewrite one remaining source element and its subtree: tag names through
/// the tag table, `type`/`name` attribute values through their scoped
/// value tables. The substitution is unconditional string replacement, not
/// context-aware.
fn convert_element(node: Node) -> TagNode {
    let mut tag = TagNode::new(lookup(node.tag_name().name(), TAG_MAP));
    for attr in node.attributes() {
        let value = match value_table(attr.name()) {
            Some(table) => lookup(attr.value(), table),
            None => attr.value(),
        };
        tag.set_attr(attr.name(), value);
    }
    for child in node.children().filter(|n| n.is_element()) {
        tag.add_child(convert_element(child));
    }
    tag
}

/// Translate a Nori scene document into a Mitsuba scene document.
///
/// Single pass, no retained state: metadata extraction either fully
/// succeeds or the translation fails with no output.
pub fn translate_scene(nori_xml: &str) -> ConvertResult<String> {
    let document = Document::parse(nori_xml)?;
    let nori_root = document.root_element();

    let metadata = extract_metadata(nori_root)?;

    let mut mitsuba_root = TagNode::new("scene").with_attr("version", "0.5.0");

    mitsuba_root.add_child(
        TagNode::new("integrator")
            .with_attr("type", lookup(&metadata.integrator, INTEGRATOR_MAP)),
    );

    let mut sensor = TagNode::new("sensor").with_attr("type", "perspective");
    sensor.add_child(
        TagNode::new("float")
            .with_attr("name", "fov")
            .with_attr("value", metadata.fov.as_str()),
    );
    sensor.add_child(build_to_world(metadata.transform)?);

    let mut film = TagNode::new("film").with_attr("type", "hdrfilm");
    film.add_child(
        TagNode::new("integer")
            .with_attr("name", "width")
            .with_attr("value", metadata.width.as_str()),
    );
    film.add_child(
        TagNode::new("integer")
            .with_attr("name", "height")
            .with_attr("value", metadata.height.as_str()),
    );
    if let Some(rfilter) = &metadata.rfilter {
        film.add_child(TagNode::new("rfilter").with_attr("type", rfilter.as_str()));
    }
    sensor.add_child(film);

    let mut sampler = TagNode::new("sampler").with_attr("type", metadata.sampler.as_str());
    sampler.add_child(
        TagNode::new("integer")
            .with_attr("name", "sample_count")
            .with_attr("value", metadata.sample_count.as_str()),
    );
    sensor.add_child(sampler);

    mitsuba_root.add_child(sensor);

    // The first integrator/sampler/camera are already reconstructed above;
    // everything else is rewritten through the vocabulary tables.
    let mut seen_integrator = false;
    let mut seen_sampler = false;
    let mut seen_camera = false;
    for child in nori_root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "integrator" if !seen_integrator => seen_integrator = true,
            "sampler" if !seen_sampler => seen_sampler = true,
            "camera" if !seen_camera => seen_camera = true,
            _ => mitsuba_root.add_child(convert_element(child)),
        }
    }

    Ok(serialize_document(&mitsuba_root)?)
}

/// Translate a Nori scene file on disk. When no output path is given it is
/// derived from the input path (`nori` → `mitsuba`, or a `_mitsuba.xml`
/// suffix). Returns the path written.
pub fn convert_scene_file(nori_file: &Path, mitsuba_file: Option<&Path>) -> ConvertResult<PathBuf> {
    let mitsuba_file = match mitsuba_file {
        Some(path) => path.to_path_buf(),
        None => {
            let name = nori_file.to_string_lossy();
            if name.contains("nori") {
                PathBuf::from(name.replace("nori", "mitsuba"))
            } else {
                PathBuf::from(name.replace(".xml", "_mitsuba.xml"))
            }
        }
    };

    let nori_xml = fs::read_to_string(nori_file)?;
    let mitsuba_xml = translate_scene(&nori_xml)?;
    fs::write(&mitsuba_file, mitsuba_xml)?;
    debug!("Converted {} -> {}", nori_file.display(), mitsuba_file.display());

    Ok(mitsuba_file)
}
