//! Parse and validate every WGSL shader with naga, and check that the
//! entry points the pipelines reference actually exist.

use naga::valid::{Capabilities, ValidationFlags, Validator};

const SHADERS: [(&str, &str); 3] = [
    ("border.wgsl", include_str!("../assets/shaders/border.wgsl")),
    (
        "particles.wgsl",
        include_str!("../assets/shaders/particles.wgsl"),
    ),
    (
        "particle_discs.wgsl",
        include_str!("../assets/shaders/particle_discs.wgsl"),
    ),
];

fn parse_and_validate(name: &str, source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{name}: {}", e.emit_to_string(source)));

    let mut validator =
        Validator::new(ValidationFlags::all(), Capabilities::default());
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name}: {e:?}"));

    module
}

#[test]
fn all_shaders_parse_and_validate() {
    for (name, source) in SHADERS {
        let _ = parse_and_validate(name, source);
    }
}

#[test]
fn all_shaders_expose_expected_entry_points() {
    for (name, source) in SHADERS {
        let module = parse_and_validate(name, source);
        let entry_points: Vec<&str> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();

        assert!(
            entry_points.contains(&"vs_main"),
            "{name} missing vs_main (has {entry_points:?})"
        );
        assert!(
            entry_points.contains(&"fs_main"),
            "{name} missing fs_main (has {entry_points:?})"
        );
    }
}

#[test]
fn billboard_shaders_bind_particles_and_colors() {
    for (name, source) in
        [SHADERS[1], SHADERS[2]]
    {
        let module = parse_and_validate(name, source);

        let mut storage_bindings: Vec<(u32, u32)> = module
            .global_variables
            .iter()
            .filter(|(_, var)| {
                matches!(
                    var.space,
                    naga::AddressSpace::Storage { .. }
                )
            })
            .filter_map(|(_, var)| var.binding.as_ref())
            .map(|b| (b.group, b.binding))
            .collect();
        storage_bindings.sort_unstable();

        assert_eq!(
            storage_bindings,
            vec![(1, 0), (1, 1)],
            "{name} storage bindings"
        );
    }
}

#[test]
fn border_shader_binds_camera_and_particles_only() {
    let module = parse_and_validate(SHADERS[0].0, SHADERS[0].1);

    let mut bindings: Vec<(u32, u32)> = module
        .global_variables
        .iter()
        .filter_map(|(_, var)| var.binding.as_ref())
        .map(|b| (b.group, b.binding))
        .collect();
    bindings.sort_unstable();

    assert_eq!(bindings, vec![(0, 0), (1, 0)]);
}
