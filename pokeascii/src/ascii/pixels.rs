// ABOUTME: Read access to decoded rasters as 16-bit, alpha-premultiplied RGBA
// ABOUTME: Transparent pixels read as black so blank sprite rows elide regardless of hidden color

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};

/// A raster the renderer can sample.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// `[r, g, b, a]` in `[0, 65535]`, premultiplied by alpha.
    /// Coordinates outside the raster read as transparent.
    fn rgba16(&self, x: u32, y: u32) -> [u16; 4];
}

/// Widen an 8-bit channel to 16 bits (`0xAB -> 0xABAB`).
#[inline]
fn widen(channel: u8) -> u32 {
    channel as u32 * 257
}

#[inline]
fn premultiply(channel: u32, alpha: u32) -> u16 {
    (channel * alpha / 0xFFFF) as u16
}

fn premultiplied8(Rgba([r, g, b, a]): Rgba<u8>) -> [u16; 4] {
    let alpha = widen(a);
    [
        premultiply(widen(r), alpha),
        premultiply(widen(g), alpha),
        premultiply(widen(b), alpha),
        alpha as u16,
    ]
}

fn premultiplied16(Rgba([r, g, b, a]): Rgba<u16>) -> [u16; 4] {
    let alpha = a as u32;
    [
        premultiply(r as u32, alpha),
        premultiply(g as u32, alpha),
        premultiply(b as u32, alpha),
        a,
    ]
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn rgba16(&self, x: u32, y: u32) -> [u16; 4] {
        self.get_pixel_checked(x, y)
            .map(|px| premultiplied8(*px))
            .unwrap_or([0; 4])
    }
}

impl PixelSource for ImageBuffer<Rgba<u16>, Vec<u16>> {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn rgba16(&self, x: u32, y: u32) -> [u16; 4] {
        self.get_pixel_checked(x, y)
            .map(|px| premultiplied16(*px))
            .unwrap_or([0; 4])
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn rgba16(&self, x: u32, y: u32) -> [u16; 4] {
        if !self.in_bounds(x, y) {
            return [0; 4];
        }
        match self {
            DynamicImage::ImageRgba16(buf) => premultiplied16(*buf.get_pixel(x, y)),
            other => premultiplied8(other.get_pixel(x, y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_pixels_are_widened() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 128, 0, 255]));

        assert_eq!(img.rgba16(0, 0), [65535, 128 * 257, 0, 65535]);
    }

    #[test]
    fn test_transparent_pixels_read_black() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 0]));

        assert_eq!(img.rgba16(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_half_alpha_halves_color() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 128]));

        let [r, _, _, a] = img.rgba16(0, 0);
        assert_eq!(a, 128 * 257);
        assert_eq!(r, 128 * 257);
    }

    #[test]
    fn test_out_of_bounds_is_transparent() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        assert_eq!(img.rgba16(2, 0), [0; 4]);
        assert_eq!(img.rgba16(0, 5), [0; 4]);

        let dynamic = DynamicImage::ImageRgba8(img);
        assert_eq!(dynamic.rgba16(1, 1), [65535; 4]);
        assert_eq!(dynamic.rgba16(9, 9), [0; 4]);
    }

    #[test]
    fn test_dynamic_rgba16_keeps_precision() {
        let buf = ImageBuffer::from_pixel(1, 1, Rgba([1000u16, 2000, 3000, 65535]));
        let dynamic = DynamicImage::ImageRgba16(buf);

        assert_eq!(dynamic.rgba16(0, 0), [1000, 2000, 3000, 65535]);
    }

    #[test]
    fn test_dynamic_grayscale_is_expanded() {
        let gray = image::GrayImage::from_pixel(1, 1, image::Luma([255]));
        let dynamic = DynamicImage::ImageLuma8(gray);

        assert_eq!(dynamic.rgba16(0, 0), [65535; 4]);
        assert_eq!(PixelSource::width(&dynamic), 1);
    }
}
