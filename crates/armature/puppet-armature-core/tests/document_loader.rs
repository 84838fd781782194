use puppet_armature_core::{
    animate, draw,
    config::AnimateOptions,
    data::IkTarget,
    document::parse_armature_json,
    error::ArmatureError,
    math::Vec2,
    sampling::frame_at_time,
    TrackState,
};

/// it should decode the fixture document into the full entity set
#[test]
fn parses_waver_fixture() {
    let json = puppet_test_fixtures::armatures::json("waver").unwrap();
    let armature = parse_armature_json(&json).unwrap();

    assert_eq!(armature.bones.len(), 5);
    assert_eq!(armature.ik_families.len(), 1);
    assert_eq!(armature.animations.len(), 1);
    assert_eq!(armature.styles.len(), 1);

    assert_eq!(armature.bones[1].name, "arm.upper");
    assert_eq!(armature.bones[1].parent, Some(0));
    assert_eq!(armature.bones[4].tex_region, None);
    assert_eq!(armature.ik_families[0].target, IkTarget::Bone(4));
    assert_eq!(armature.animations[0].last_frame(), 60);
}

/// it should bring keyframes into frame order on load
#[test]
fn keyframes_sorted_on_load() {
    let json = puppet_test_fixtures::armatures::json("waver").unwrap();
    let armature = parse_armature_json(&json).unwrap();

    let frames: Vec<i32> = armature.animations[0]
        .keyframes
        .iter()
        .map(|k| k.frame)
        .collect();
    let mut sorted = frames.clone();
    sorted.sort();
    assert_eq!(frames, sorted);
}

/// it should fill absent fields with rest defaults
#[test]
fn minimal_document_defaults() {
    let json = puppet_test_fixtures::armatures::json("minimal").unwrap();
    let armature = parse_armature_json(&json).unwrap();

    let root = &armature.bones[0];
    assert_eq!(root.parent, None);
    assert_eq!(root.scale, Vec2::ONE);
    assert_eq!(root.rot, 0.0);
    assert_eq!(root.tex_region, None);
    assert!(armature.ik_families.is_empty());
    assert!(armature.animations.is_empty());
}

/// it should animate and composite a loaded document end to end
#[test]
fn fixture_end_to_end() {
    let json = puppet_test_fixtures::armatures::json("waver").unwrap();
    let armature = parse_armature_json(&json).unwrap();

    let clip = &armature.animations[0];
    let frame = frame_at_time(clip, 0.25);
    let props = animate(
        &armature,
        &[TrackState::looping(0, frame)],
        &AnimateOptions::default(),
    )
    .unwrap();
    assert_eq!(props.len(), armature.bones.len());

    let commands = draw(&props, &armature.styles[0]).unwrap();
    // The reach target carries no texture region; everything else draws.
    assert_eq!(commands.len(), 4);
}

fn doc(body: &str) -> Result<puppet_armature_core::data::Armature, ArmatureError> {
    parse_armature_json(body)
}

/// it should reject a parent index past the bone array
#[test]
fn rejects_missing_parent() {
    let err = doc(r#"{ "bones": [ { "name": "a", "parent": 9 } ] }"#).unwrap_err();
    assert_eq!(err, ArmatureError::MissingParent { bone: 0, parent: 9 });
}

/// it should reject a parent that does not precede its bone
#[test]
fn rejects_unordered_parent() {
    let err = doc(
        r#"{ "bones": [
            { "name": "a", "parent": 1 },
            { "name": "b" }
        ] }"#,
    )
    .unwrap_err();
    assert_eq!(err, ArmatureError::ParentOutOfOrder { bone: 0, parent: 1 });
}

/// it should reject IK chains and targets naming missing bones
#[test]
fn rejects_bad_ik_references() {
    let err = doc(
        r#"{
            "bones": [ { "name": "a" } ],
            "ik_families": [ { "name": "arm", "bones": [0, 4], "target": { "type": "Point", "data": { "x": 0.0, "y": 0.0 } } } ]
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ArmatureError::IkChainBoneOutOfRange {
            family: "arm".to_string(),
            bone: 4
        }
    );

    let err = doc(
        r#"{
            "bones": [ { "name": "a" } ],
            "ik_families": [ { "name": "arm", "bones": [0], "target": { "type": "Bone", "data": 3 } } ]
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ArmatureError::IkTargetOutOfRange {
            family: "arm".to_string(),
            bone: 3
        }
    );
}

/// it should reject keyframes addressing missing bones and a zero frame rate
#[test]
fn rejects_bad_animation_data() {
    let err = doc(
        r#"{
            "bones": [ { "name": "a" } ],
            "animations": [ { "name": "walk", "fps": 60, "keyframes": [
                { "frame": 0, "bone": 2, "element": "Rotation", "value": 0.0 }
            ] } ]
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ArmatureError::KeyframeBoneOutOfRange {
            animation: "walk".to_string(),
            index: 0,
            bone: 2
        }
    );

    let err = doc(
        r#"{
            "bones": [ { "name": "a" } ],
            "animations": [ { "name": "walk", "fps": 0, "keyframes": [] } ]
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ArmatureError::InvalidFps {
            animation: "walk".to_string()
        }
    );
}

/// it should reject a bone texture region outside every style's table
#[test]
fn rejects_bad_texture_region() {
    let err = doc(
        r#"{
            "bones": [ { "name": "a", "tex": 5 } ],
            "styles": [ { "name": "default", "textures": [
                { "name": "a", "size": { "x": 8.0, "y": 8.0 } }
            ] } ]
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ArmatureError::TextureRegionOutOfBounds {
            style: "default".to_string(),
            region: 5,
            count: 1
        }
    );
}

/// it should surface JSON syntax problems as document errors
#[test]
fn rejects_malformed_json() {
    let err = doc("{ not json").unwrap_err();
    assert!(matches!(err, ArmatureError::Document { .. }));
}
