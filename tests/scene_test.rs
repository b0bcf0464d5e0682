use nori_validate::scene::{make_cbox_scene, make_mat_prev_scene, make_material, CboxColors};

fn element_children<'a>(
    node: roxmltree::Node<'a, 'a>,
) -> Vec<roxmltree::Node<'a, 'a>> {
    node.children().filter(|n| n.is_element()).collect()
}

#[test]
fn test_generated_document_wire_layout() {
    let scene = make_cbox_scene("cbox", CboxColors::default());
    let xml = scene.generate().unwrap();

    let document = roxmltree::Document::parse(&xml).unwrap();
    let root = document.root_element();
    assert_eq!(root.tag_name().name(), "scene");

    let children = element_children(root);
    // Global blocks precede the objects, in fixed order.
    assert_eq!(children[0].tag_name().name(), "integrator");
    assert_eq!(children[0].attribute("type"), Some("path_mis"));
    assert_eq!(children[1].tag_name().name(), "sampler");
    assert_eq!(children[2].tag_name().name(), "camera");
    // Six objects follow.
    assert_eq!(children.len(), 3 + 6);

    // The sampler's first child carries the sample count.
    let sampler_children = element_children(children[1]);
    assert_eq!(sampler_children[0].tag_name().name(), "integer");
    assert_eq!(sampler_children[0].attribute("name"), Some("sampleCount"));
    assert_eq!(sampler_children[0].attribute("value"), Some("32"));

    // Camera children by position: fov, transform, width, height, rfilter.
    let camera_children = element_children(children[2]);
    assert_eq!(camera_children.len(), 5);
    assert_eq!(camera_children[0].tag_name().name(), "float");
    assert_eq!(camera_children[0].attribute("name"), Some("fov"));
    assert_eq!(
        camera_children[0].attribute("value"),
        Some("36.797756851565")
    );
    assert_eq!(camera_children[1].tag_name().name(), "transform");
    assert_eq!(camera_children[1].attribute("name"), Some("toWorld"));
    assert_eq!(camera_children[2].attribute("name"), Some("width"));
    assert_eq!(camera_children[2].attribute("value"), Some("512"));
    assert_eq!(camera_children[3].attribute("name"), Some("height"));
    assert_eq!(camera_children[4].tag_name().name(), "rfilter");
    assert_eq!(camera_children[4].attribute("type"), Some("box"));

    // The transform carries the axis flip then the world matrix.
    let transform_ops = element_children(camera_children[1]);
    assert_eq!(transform_ops[0].tag_name().name(), "scale");
    assert_eq!(transform_ops[0].attribute("value"), Some("1,1,-1"));
    assert_eq!(transform_ops[1].tag_name().name(), "matrix");
}

#[test]
fn test_mutations_are_reflected_on_the_wire() {
    let mut scene = make_mat_prev_scene("mat_prev");
    scene.set_quality("l").unwrap();
    scene.set_fov(45.0);
    scene
        .set_bsdf(
            "material_preview",
            make_material("microfacet", &[("alpha", 0.25.into())]),
        )
        .unwrap();

    let xml = scene.generate().unwrap();
    let document = roxmltree::Document::parse(&xml).unwrap();
    let root = document.root_element();

    let camera = element_children(root)[2];
    let camera_children = element_children(camera);
    assert_eq!(camera_children[0].attribute("value"), Some("45"));
    assert_eq!(camera_children[2].attribute("value"), Some("256"));
    assert_eq!(camera_children[3].attribute("value"), Some("256"));

    let sampler = element_children(root)[1];
    assert_eq!(
        element_children(sampler)[0].attribute("value"),
        Some("16")
    );

    let preview = element_children(root)
        .into_iter()
        .find(|n| {
            n.tag_name().name() == "mesh"
                && element_children(*n)
                    .iter()
                    .any(|c| c.attribute("value") == Some("../../../assets/meshes/suzanne.obj"))
        })
        .expect("material preview mesh serialized");
    let bsdfs: Vec<_> = element_children(preview)
        .into_iter()
        .filter(|n| n.tag_name().name() == "bsdf")
        .collect();
    assert_eq!(bsdfs.len(), 1);
    assert_eq!(bsdfs[0].attribute("type"), Some("microfacet"));
}

#[test]
fn test_registered_copies_do_not_alias_the_template() {
    let template = make_cbox_scene("cbox", CboxColors::default());

    let mut first = template.clone();
    first.set_resolution(128, 128);
    let mut second = template.clone();
    second.set_resolution(64, 64);

    assert_eq!(template.resolution(), (512, 512));
    assert_eq!(first.resolution(), (128, 128));
    assert_eq!(second.resolution(), (64, 64));
}
