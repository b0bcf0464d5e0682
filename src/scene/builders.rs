//! Baseline scene factories
//!
//! Two rigs cover most validation runs: an enclosed box room with a movable
//! sphere, and a single-mesh material preview lit by a fixed three-point
//! sphere rig. Both come back as fully wired scenes that callers tweak
//! through the model's mutators before registering.

use super::model::{Camera, Sampler, Scene};
use super::tag::TagNode;

/// Geometry files referenced by the builders, resolved by the renderer
/// relative to the generated scene file (three levels below the run root).
const MESH_DIR: &str = "../../../assets/meshes";

/// Row-major world matrix for the box-room camera (backs the camera off
/// the open face of the room).
const CBOX_CAMERA_MATRIX: &str = "1.0,0.0,0.0,0.0,0.0,-1.6292068494294654e-07,-1.0,-4.0,0.0,1.0,-1.6292068494294654e-07,0.0,0.0,0.0,0.0,1.0";

/// Same orientation, twice the distance, for the material preview rig.
const MAT_PREV_CAMERA_MATRIX: &str = "1.0,0.0,0.0,0.0,0.0,-1.6292068494294654e-07,-1.0,-8.0,0.0,1.0,-1.6292068494294654e-07,0.0,0.0,0.0,0.0,1.0";

const CBOX_FOV: f64 = 36.797756851565;
const MAT_PREV_FOV: f64 = 20.0;

/// Wall and object albedos (plus emitter radiance) for the box room.
#[derive(Debug, Clone)]
pub struct CboxColors {
    pub main_walls: [f64; 3],
    pub left_wall: [f64; 3],
    pub right_wall: [f64; 3],
    pub emitter: [f64; 3],
    pub cuboid: [f64; 3],
    pub ball: [f64; 3],
}

impl Default for CboxColors {
    fn default() -> Self {
        Self {
            main_walls: [1.0, 1.0, 1.0],
            left_wall: [0.9, 0.1, 0.1],
            right_wall: [0.1, 0.9, 0.1],
            emitter: [10.0, 10.0, 10.0],
            cuboid: [1.0, 1.0, 1.0],
            ball: [1.0, 1.0, 1.0],
        }
    }
}

fn rgb_attr(color: [f64; 3]) -> String {
    format!("{}, {}, {}", color[0], color[1], color[2])
}

fn default_camera(fov: f64, matrix: &str) -> Camera {
    Camera {
        kind: "perspective".to_string(),
        fov,
        to_world: vec![
            TagNode::new("scale").with_attr("value", "1,1,-1"),
            TagNode::new("matrix").with_attr("value", matrix),
        ],
        width: 512,
        height: 512,
        rfilter: Some("box".to_string()),
    }
}

fn diffuse_bsdf(albedo: [f64; 3]) -> TagNode {
    let mut bsdf = TagNode::new("bsdf").with_attr("type", "diffuse");
    bsdf.add_child(
        TagNode::new("color")
            .with_attr("name", "albedo")
            .with_attr("value", rgb_attr(albedo)),
    );
    bsdf
}

fn area_emitter(radiance: [f64; 3]) -> TagNode {
    let mut emitter = TagNode::new("emitter").with_attr("type", "area");
    emitter.add_child(
        TagNode::new("color")
            .with_attr("name", "radiance")
            .with_attr("value", rgb_attr(radiance)),
    );
    emitter
}

fn obj_mesh(filename: &str) -> TagNode {
    let mut mesh = TagNode::new("mesh").with_attr("type", "obj");
    mesh.add_child(
        TagNode::new("string")
            .with_attr("name", "filename")
            .with_attr("value", format!("{}/{}", MESH_DIR, filename)),
    );
    mesh
}

fn sphere(center: &str, radius: f64) -> TagNode {
    let mut sphere = TagNode::new("mesh").with_attr("type", "sphere");
    sphere.add_child(
        TagNode::new("point")
            .with_attr("name", "center")
            .with_attr("value", center),
    );
    sphere.add_child(
        TagNode::new("float")
            .with_attr("name", "radius")
            .with_attr("value", radius.to_string()),
    );
    sphere
}

/// Build the enclosed box room: three wall meshes, an area light, an
/// interior cuboid and a sphere, each diffuse except the light.
pub fn make_cbox_scene(name: &str, colors: CboxColors) -> Scene {
    let mut scene = Scene::new(
        name,
        "path_mis",
        Sampler::new("independent", 32),
        default_camera(CBOX_FOV, CBOX_CAMERA_MATRIX),
    );

    let walls = [
        ("main_walls", "main_walls.obj", colors.main_walls),
        ("left_wall", "left_wall.obj", colors.left_wall),
        ("right_wall", "right_wall.obj", colors.right_wall),
    ];
    for (id, filename, albedo) in walls {
        let mut mesh = obj_mesh(filename);
        mesh.add_child(diffuse_bsdf(albedo));
        scene
            .add_object(id, mesh)
            .expect("builder object identifiers are unique");
    }

    let mut emitter = obj_mesh("emitter.obj");
    emitter.add_child(area_emitter(colors.emitter));
    scene
        .add_object("emitter", emitter)
        .expect("builder object identifiers are unique");

    let mut cuboid = obj_mesh("cuboid.obj");
    cuboid.add_child(diffuse_bsdf(colors.cuboid));
    scene
        .add_object("cuboid", cuboid)
        .expect("builder object identifiers are unique");

    let mut ball = sphere("0.35 -0.3 -0.6", 0.4);
    ball.add_child(diffuse_bsdf(colors.ball));
    scene
        .add_object("ball", ball)
        .expect("builder object identifiers are unique");

    scene
}

/// Build the material preview rig: one mesh with a white diffuse BSDF and
/// a fixed key/fill/rim trio of sphere lights.
pub fn make_mat_prev_scene(name: &str) -> Scene {
    let mut scene = Scene::new(
        name,
        "path_mis",
        Sampler::new("independent", 32),
        default_camera(MAT_PREV_FOV, MAT_PREV_CAMERA_MATRIX),
    );

    let mut preview = obj_mesh("suzanne.obj");
    preview.add_child(diffuse_bsdf([1.0, 1.0, 1.0]));
    scene
        .add_object("material_preview", preview)
        .expect("builder object identifiers are unique");

    let lights = [
        ("keylight", "-3 -2 2", 1.0, [10.0, 10.0, 10.0]),
        ("filllight", "0 50 0", 15.0, [0.4, 0.6, 0.8]),
        ("rimlight", "7 0 -4", 1.0, [2.0, 2.0, 2.0]),
    ];
    for (id, center, radius, radiance) in lights {
        let mut light = sphere(center, radius);
        light.add_child(area_emitter(radiance));
        scene
            .add_object(id, light)
            .expect("builder object identifiers are unique");
    }

    scene
}
