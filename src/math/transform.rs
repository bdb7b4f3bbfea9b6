//! Pixel space has its origin at the top-left corner with Y growing downward,
//! while normalized device coordinates are centered with Y growing upward.

use cgmath::Vector2;

/// Maps a pixel coordinate along one axis into [-1, 1]. Values outside of
/// `[0, dimension]` map outside of [-1, 1] and are left to the rasterizer to clip.
#[inline]
pub fn to_normalized(pixel: f32, dimension: f32) -> f32 {
    2.0 * pixel / dimension - 1.0
}

/// Maps a point in pixel space into normalized device coordinates of a surface
/// with `dimensions`.
#[inline]
pub fn pixel_to_ndc(point: Vector2<f32>, dimensions: Vector2<u32>) -> Vector2<f32> {
    Vector2::new(
        to_normalized(point.x, dimensions.x as f32),
        -to_normalized(point.y, dimensions.y as f32),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn corners() {
        let dims = Vector2::new(600, 600);
        assert_eq!(pixel_to_ndc(Vector2::new(0.0, 0.0), dims), Vector2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(Vector2::new(600.0, 600.0), dims), Vector2::new(1.0, -1.0));
        assert_eq!(pixel_to_ndc(Vector2::new(300.0, 300.0), dims), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn out_of_bounds() {
        assert_eq!(to_normalized(900.0, 600.0), 2.0);
        assert_eq!(to_normalized(-300.0, 600.0), -2.0);
    }

    #[test]
    fn non_square() {
        let p = pixel_to_ndc(Vector2::new(200.0, 100.0), Vector2::new(800, 400));
        assert_eq!(p, Vector2::new(-0.5, 0.5));
    }
}
