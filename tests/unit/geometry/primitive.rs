use super::*;

fn mesh_of(kind: PrimitiveKind, dims: &[f64]) -> LocalMesh {
    Primitive::from_dimensions(kind, dims).unwrap().mesh()
}

fn assert_close(a: DVec3, b: DVec3) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

fn all_faces_point_outward(m: &LocalMesh) -> bool {
    m.triangles.iter().all(|&t| {
        let [a, b, c] = m.triangle(t);
        (b - a).cross(c - a).dot((a + b + c) / 3.0) >= 0.0
    })
}

#[test]
fn cube_is_an_exact_box() {
    let m = mesh_of(PrimitiveKind::Cube, &[2.0, 4.0, 6.0]);
    assert_eq!(m.vertex_count(), 8);
    assert_eq!(m.triangle_count(), 12);
    let b = m.bounds().unwrap();
    assert_close(b.min, DVec3::new(-1.0, -2.0, -3.0));
    assert_close(b.max, DVec3::new(1.0, 2.0, 3.0));
    assert!(all_faces_point_outward(&m));
}

#[test]
fn single_dimension_sphere_uses_it_as_radius() {
    let m = mesh_of(PrimitiveKind::Sphere, &[2.0]);
    assert_eq!(m.vertex_count(), 642);
    assert_eq!(m.triangle_count(), 1280);
    assert!(m.positions.iter().all(|p| (p.length() - 2.0).abs() < 1e-9));
    assert!(all_faces_point_outward(&m));
}

#[test]
fn three_dimension_sphere_is_a_scaled_unit_sphere() {
    let m = mesh_of(PrimitiveKind::Sphere, &[1.0, 2.0, 0.5]);
    let b = m.bounds().unwrap();
    assert_close(b.max, DVec3::new(1.0, 2.0, 0.5));
    assert_close(b.min, DVec3::new(-1.0, -2.0, -0.5));
}

#[test]
fn cylinder_height_comes_from_the_third_dimension() {
    let p = Primitive::from_dimensions(PrimitiveKind::Cylinder, &[1.0, 1.0, 3.0]).unwrap();
    assert_eq!(
        p,
        Primitive::Cylinder {
            radius: 1.0,
            height: 3.0
        }
    );
    let m = p.mesh();
    assert_eq!(m.vertex_count(), 2 * 64 + 2);
    assert_eq!(m.triangle_count(), 4 * 64);
    let b = m.bounds().unwrap();
    assert!((b.min.z + 1.5).abs() < 1e-12 && (b.max.z - 1.5).abs() < 1e-12);
    assert!(all_faces_point_outward(&m));
}

#[test]
fn two_dimension_cylinder_uses_the_second_as_height() {
    let p = Primitive::from_dimensions(PrimitiveKind::Cylinder, &[0.5, 2.0]).unwrap();
    assert_eq!(
        p,
        Primitive::Cylinder {
            radius: 0.5,
            height: 2.0
        }
    );
}

#[test]
fn cylinder_build_is_deterministic() {
    let kind = ObjectKind::from("cylinder");
    let a = build(&kind, &[1.0, 1.0, 3.0]).unwrap().unwrap();
    let b = build(&kind, &[1.0, 1.0, 3.0]).unwrap().unwrap();
    assert_eq!(a, b);
    let bits = |m: &LocalMesh| -> Vec<u64> {
        m.positions
            .iter()
            .flat_map(|p| p.to_array().map(f64::to_bits))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn cone_apex_points_up() {
    let m = mesh_of(PrimitiveKind::Cone, &[0.8, 1.8, 0.8]);
    assert_eq!(m.vertex_count(), 64 + 2);
    assert_eq!(m.triangle_count(), 2 * 64);
    let top = m.positions.iter().fold(f64::MIN, |acc, p| acc.max(p.z));
    let apexes: Vec<_> = m.positions.iter().filter(|p| p.z == top).collect();
    assert_eq!(apexes.len(), 1);
    assert_close(*apexes[0], DVec3::new(0.0, 0.0, 0.4));
    assert!(all_faces_point_outward(&m));
}

#[test]
fn plane_is_a_thin_box() {
    let m = mesh_of(PrimitiveKind::Plane, &[10.0, 6.0]);
    let size = m.bounds().unwrap().size();
    assert_close(size, DVec3::new(10.0, 6.0, MIN_PLANE_THICKNESS));

    let explicit = Primitive::from_dimensions(PrimitiveKind::Plane, &[1.0, 1.0, 0.2]).unwrap();
    assert!(matches!(explicit, Primitive::Plane { thickness, .. } if thickness == 0.2));
}

#[test]
fn torus_radii_and_counts() {
    let p = Primitive::from_dimensions(PrimitiveKind::Torus, &[2.0, 2.0, 0.6]).unwrap();
    let Primitive::Torus {
        major_radius,
        minor_radius,
    } = p
    else {
        panic!("expected torus, got {p:?}");
    };
    assert!((major_radius - 1.0).abs() < 1e-12);
    assert!((minor_radius - 0.3).abs() < 1e-12);

    let m = p.mesh();
    assert_eq!(m.vertex_count(), 64 * 32);
    assert_eq!(m.triangle_count(), 64 * 32 * 2);
    assert!(m.triangles.iter().flatten().all(|&i| (i as usize) < m.vertex_count()));
    let b = m.bounds().unwrap();
    assert!((b.max.x - 1.3).abs() < 1e-9);
    assert!((b.max.z - 0.3).abs() < 1e-9);
}

#[test]
fn torus_without_thickness_derives_a_tube() {
    let p = Primitive::from_dimensions(PrimitiveKind::Torus, &[3.0]).unwrap();
    let Primitive::Torus {
        major_radius,
        minor_radius,
    } = p
    else {
        panic!("expected torus, got {p:?}");
    };
    assert_eq!(major_radius, 1.5);
    assert!((minor_radius - 0.3).abs() < 1e-12);
    let thin = Primitive::from_dimensions(PrimitiveKind::Torus, &[0.2, 0.2]).unwrap();
    assert!(matches!(thin, Primitive::Torus { minor_radius, .. } if minor_radius == 0.05));
}

#[test]
fn torus_faces_point_away_from_the_tube_axis() {
    let m = mesh_of(PrimitiveKind::Torus, &[2.0, 2.0, 0.6]);
    for &t in &m.triangles {
        let [a, b, c] = m.triangle(t);
        let centroid = (a + b + c) / 3.0;
        let axis = DVec3::new(centroid.x, centroid.y, 0.0).normalize() * 1.0;
        assert!((b - a).cross(c - a).dot(centroid - axis) > 0.0);
    }
}

#[test]
fn too_few_dimensions_is_a_validation_error() {
    let err = Primitive::from_dimensions(PrimitiveKind::Cylinder, &[1.0]).unwrap_err();
    assert!(matches!(err, PrimkitError::Validation(_)));
    assert!(Primitive::from_dimensions(PrimitiveKind::Sphere, &[1.0, 2.0]).is_err());
    assert!(Primitive::from_dimensions(PrimitiveKind::Cube, &[]).is_err());
}

#[test]
fn non_finite_dimensions_are_geometry_errors() {
    let err = Primitive::from_dimensions(PrimitiveKind::Cube, &[1.0, f64::NAN, 1.0]).unwrap_err();
    assert!(matches!(err, PrimkitError::Geometry(_)));
}

#[test]
fn unsupported_kinds_build_nothing() {
    let kind = ObjectKind::from("teapot");
    assert!(build(&kind, &[1.0, 1.0, 1.0]).unwrap().is_none());
}

#[test]
fn kind_round_trips_through_the_variant() {
    for kind in PrimitiveKind::ALL {
        let p = Primitive::from_dimensions(kind, &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(p.kind(), kind);
    }
}
