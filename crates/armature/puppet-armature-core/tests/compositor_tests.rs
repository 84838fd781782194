use puppet_armature_core::{
    compositor::composite,
    config::AnimateOptions,
    data::{Style, TextureRegion},
    error::ArmatureError,
    hierarchy::Prop,
    math::Vec2,
    normalize::normalize_prop,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn prop(zindex: i32, tex_region: Option<usize>) -> Prop {
    Prop {
        pos: Vec2::new(100.0, 50.0),
        rot: 0.0,
        scale: Vec2::ONE,
        zindex,
        tex_region,
    }
}

fn style(regions: &[(&str, f32, f32)]) -> Style {
    Style {
        name: "default".to_string(),
        textures: regions
            .iter()
            .map(|&(name, w, h)| TextureRegion {
                name: name.to_string(),
                offset: Vec2::ZERO,
                size: Vec2::new(w, h),
            })
            .collect(),
    }
}

/// it should sort ascending by z-index and keep original order on ties
#[test]
fn zorder_stable_sort() {
    let props = vec![
        prop(1, Some(0)),
        prop(0, Some(1)),
        prop(1, Some(2)),
        prop(0, Some(3)),
    ];
    let style = style(&[("a", 8.0, 8.0), ("b", 8.0, 8.0), ("c", 8.0, 8.0), ("d", 8.0, 8.0)]);

    let commands = composite(&props, &style).unwrap();
    let order: Vec<&str> = commands.iter().map(|c| c.region.name.as_str()).collect();
    assert_eq!(order, vec!["b", "d", "a", "c"]);
}

/// it should emit nothing for props without a texture region
#[test]
fn invisible_props_are_skipped() {
    let props = vec![prop(0, None)];
    let style = style(&[("a", 8.0, 8.0)]);

    let commands = composite(&props, &style).unwrap();
    assert!(commands.is_empty());
}

/// it should fail fast on a texture-region index outside the style
#[test]
fn out_of_bounds_region_is_an_error() {
    let props = vec![prop(0, Some(7))];
    let style = style(&[("a", 8.0, 8.0)]);

    let err = composite(&props, &style).unwrap_err();
    assert_eq!(
        err,
        ArmatureError::TextureRegionOutOfBounds {
            style: "default".to_string(),
            region: 7,
            count: 1
        }
    );
}

/// it should silently drop degenerate regions and zero scales
#[test]
fn degenerate_geometry_contributes_nothing() {
    let props = vec![prop(0, Some(0))];
    let empty = style(&[("a", 0.0, 16.0)]);
    assert!(composite(&props, &empty).unwrap().is_empty());

    let mut flat = prop(0, Some(0));
    flat.scale = Vec2::new(0.0, 1.0);
    let style = style(&[("a", 8.0, 8.0)]);
    assert!(composite(&[flat], &style).unwrap().is_empty());
}

/// it should scale by absolute values and flip on negative components
#[test]
fn negative_scale_becomes_flip() {
    let mut mirrored = prop(0, Some(0));
    mirrored.scale = Vec2::new(-2.0, 3.0);
    let style = style(&[("a", 16.0, 10.0)]);

    let commands = composite(&[mirrored], &style).unwrap();
    assert_eq!(commands.len(), 1);
    let command = &commands[0];
    approx(command.size.x, 32.0, 1e-6);
    approx(command.size.y, 30.0, 1e-6);
    assert!(command.flip_x);
    assert!(!command.flip_y);
}

/// it should place the region center at the prop position
#[test]
fn command_centering() {
    let props = vec![prop(0, Some(0))];
    let style = style(&[("a", 20.0, 10.0)]);

    let commands = composite(&props, &style).unwrap();
    let command = &commands[0];
    assert_eq!(command.pos, Vec2::new(100.0, 50.0));
    assert_eq!(command.top_left(), Vec2::new(90.0, 45.0));
}

/// it should negate rotation for a single-axis mirror and leave a double
/// mirror alone before the compositor sees the prop
#[test]
fn mirror_rotation_correction_pairs_with_flip() {
    let theta = 0.6f32;

    let mut single = prop(0, Some(0));
    single.rot = theta;
    normalize_prop(
        &mut single,
        &AnimateOptions {
            scale: Vec2::new(-1.0, 1.0),
            ..AnimateOptions::default()
        },
    );
    approx(single.rot, -theta, 1e-6);

    let style = style(&[("a", 8.0, 8.0)]);
    let commands = composite(&[single], &style).unwrap();
    assert!(commands[0].flip_x);
    approx(commands[0].rotation, -theta, 1e-6);

    let mut double = prop(0, Some(0));
    double.rot = theta;
    normalize_prop(
        &mut double,
        &AnimateOptions {
            scale: Vec2::new(-1.0, -1.0),
            ..AnimateOptions::default()
        },
    );
    approx(double.rot, theta, 1e-6);
}
