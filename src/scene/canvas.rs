use image::{RgbaImage, imageops};

/// A surface actors are composited onto.
pub trait Canvas {
    /// Draws `surface` with its top-left corner at `(x, y)`. Parts outside
    /// the canvas are clipped.
    fn blit(&mut self, surface: &RgbaImage, x: i32, y: i32);
}

impl Canvas for RgbaImage {
    fn blit(&mut self, surface: &RgbaImage, x: i32, y: i32) {
        imageops::overlay(self, surface, i64::from(x), i64::from(y));
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_blit_clips_at_edges() {
        let mut screen = RgbaImage::new(4, 4);
        let red = Rgba([255, 0, 0, 255]);
        let square = RgbaImage::from_pixel(2, 2, red);

        screen.blit(&square, -1, 3);

        assert_eq!(*screen.get_pixel(0, 3), red);
        assert_eq!(*screen.get_pixel(1, 3), Rgba([0, 0, 0, 0]));
        assert_eq!(*screen.get_pixel(0, 2), Rgba([0, 0, 0, 0]));
    }
}
