use glam::{Mat4, Vec2, Vec3};
use viewport_camera::math::{Box2, Box3, Matrix4};

fn corners(b: &Box3) -> [Vec3; 8] {
    let mut out = [Vec3::ZERO; 8];
    for (i, c) in out.iter_mut().enumerate() {
        *c = Vec3::new(
            if i & 4 == 0 { b.min.x } else { b.max.x },
            if i & 2 == 0 { b.min.y } else { b.max.y },
            if i & 1 == 0 { b.min.z } else { b.max.z },
        );
    }
    out
}

#[cfg(test)]
mod bounds_tests {
    use super::*;

    #[test]
    fn test_union_creates_bounding_box() {
        let b1 = Box3::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        let b2 = Box3::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(15.0, 15.0, 15.0));

        let union = b1.union(&b2);

        assert_eq!(union.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(15.0, 15.0, 15.0));
    }

    #[test]
    fn test_union_with_negative_coords() {
        let b1 = Box3::new(Vec3::new(-10.0, -10.0, -10.0), Vec3::new(0.0, 0.0, 0.0));
        let b2 = Box3::new(Vec3::new(-5.0, -5.0, -5.0), Vec3::new(5.0, 5.0, 5.0));

        let union = b1.union(&b2);

        assert_eq!(union.min, Vec3::new(-10.0, -10.0, -10.0));
        assert_eq!(union.max, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_union_with_empty_is_unchanged() {
        let b = Box3::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(b.union(&Box3::empty()), b);
        assert_eq!(Box3::empty().union(&b), b);
    }

    #[test]
    fn test_extend_by_points_from_empty() {
        let mut b = Box2::default();
        for p in [Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0), Vec2::new(0.0, 0.0)] {
            b.extend_by(p);
        }
        assert_eq!(b.min, Vec2::new(-2.0, -1.0));
        assert_eq!(b.max, Vec2::new(3.0, 4.0));
        assert_eq!(b.size(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_empty_box_has_zero_size() {
        assert!(Box2::empty().is_empty());
        assert_eq!(Box2::empty().size(), Vec2::ZERO);
    }

    #[test]
    fn test_affine_transform_encloses_corners() {
        let b = Box3::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 1.0, 5.0));
        let mut m = Matrix4::from_translation(Vec3::new(4.0, -2.0, 1.0));
        m.rotate(Vec3::new(0.4, 1.3, -0.2));
        m.scale(Vec3::new(1.5, 2.0, 0.5));

        let t = b.transformed(&m);
        for c in corners(&b) {
            let p = m.transform_point(c);
            assert!(t.contains(p) || (p - p.clamp(t.min, t.max)).length() < 1e-4);
        }

        // Tight: each face of the result touches a transformed corner.
        let moved: Vec<Vec3> = corners(&b).iter().map(|c| m.transform_point(*c)).collect();
        let min = moved.iter().fold(Vec3::splat(f32::MAX), |a, p| a.min(*p));
        let max = moved.iter().fold(Vec3::splat(-f32::MAX), |a, p| a.max(*p));
        assert!((t.min - min).length() < 1e-4);
        assert!((t.max - max).length() < 1e-4);
    }

    #[test]
    fn test_affine_in_place_matches_transform() {
        let b = Box3::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let m = Matrix4::from_axis_angle(Vec3::Z, 0.5);
        let mut a = b;
        a.affine(&m);
        assert_eq!(a, b.transformed(&m));
    }

    #[test]
    fn test_projective_transform_divides_by_w() {
        let proj = Matrix4::from(Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 10.0));
        let b = Box3::new(Vec3::new(-1.0, -1.0, -2.0), Vec3::new(1.0, 1.0, -1.0));
        let t = b.transformed(&proj);
        // x at the near face: 1 / 1, at the far face: 1 / 2
        assert!((t.max.x - 1.0).abs() < 1e-5);
        assert!((t.min.x + 1.0).abs() < 1e-5);
        assert!(t.max.z <= 1.0 && t.min.z >= -1.0 - 1e-5);
    }

    #[test]
    fn test_infinite_box_survives_transform() {
        let mut b = Box3::infinite();
        b.transform(&Matrix4::from_scale(Vec3::splat(2.0)));
        assert!(b.is_infinite());
    }
}
