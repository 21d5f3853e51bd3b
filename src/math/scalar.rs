use glam::IVec2;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Inverse of [`lerp`]: how far `m` lies between `a` and `b`.
/// Returns 0 when the range collapses and the division would overflow.
pub fn lerp_factor(m: f32, a: f32, b: f32) -> f32 {
    let d = b - a;
    let n = m - a;
    if d.abs() > 1.0 || n.abs() < f32::MAX * d.abs() {
        return n / d;
    }
    0.0
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Tangent of half the given full field of view in degrees.
pub fn tan_half_fov(fov_degrees: f32) -> f32 {
    (degrees_to_radians(fov_degrees) * 0.5).tan()
}

/// Width over height of a pixel size.
pub fn aspect_ratio(size: IVec2) -> f32 {
    size.x as f32 / size.y as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert!((lerp(2.0, 6.0, 0.25) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_factor_inverts_lerp() {
        let t = lerp_factor(lerp(-3.0, 5.0, 0.7), -3.0, 5.0);
        assert!((t - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_factor_reversed_range() {
        let t = lerp_factor(0.5, 1.0, -1.0);
        assert!((t - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_factor_collapsed_range() {
        assert_eq!(lerp_factor(3.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_tan_half_fov_ninety() {
        assert!((tan_half_fov(90.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((aspect_ratio(IVec2::new(1280, 720)) - 16.0 / 9.0).abs() < 1e-6);
        assert!((aspect_ratio(IVec2::new(640, 720)) - 640.0 / 720.0).abs() < 1e-6);
    }
}
