use image::imageops::FilterType;

/// Largest texture edge uploaded; matches the WebGL2 downlevel limit.
pub const MAX_TEXTURE_DIMENSION: u32 = 2048;

/// Tightly packed RGBA8 pixels, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decode a JPEG or PNG, shrinking it to fit `max_dimension` on both axes.
    pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Self, image::ImageError> {
        let mut img = image::load_from_memory(bytes)?;
        let max_dimension = max_dimension.max(1);
        if img.width() > max_dimension || img.height() > max_dimension {
            img = img.resize(max_dimension, max_dimension, FilterType::Triangle);
        }
        let rgba = img.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    /// 1x1 stand-in used when an image is missing or undecodable.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Placeholder ocean color for the day map.
    pub fn day_placeholder() -> Self {
        Self::solid([24, 52, 96, 255])
    }

    /// Zero height everywhere.
    pub fn flat_displacement() -> Self {
        Self::solid([0, 0, 0, 255])
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::TextureImage;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(pixel));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let tex = TextureImage::decode(&png_bytes(4, 2, [10, 20, 30, 255]), 2048).expect("decode");
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.rgba.len(), 4 * 2 * 4);
        assert_eq!(&tex.rgba[..4], &[10, 20, 30, 255]);
        assert_eq!(tex.bytes_per_row(), 16);
    }

    #[test]
    fn top_image_row_is_uploaded_first() {
        // North (top) is red, south (bottom) is blue; v = 0 samples row 0.
        let mut img = RgbaImage::from_pixel(1, 2, Rgba([0, 0, 255, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");

        let tex = TextureImage::decode(&out.into_inner(), 2048).expect("decode");
        assert_eq!(&tex.rgba[..4], &[255, 0, 0, 255]);
        assert_eq!(&tex.rgba[4..], &[0, 0, 255, 255]);
    }

    #[test]
    fn oversized_images_are_shrunk_keeping_aspect() {
        let tex = TextureImage::decode(&png_bytes(64, 32, [255, 255, 255, 255]), 16).expect("decode");
        assert_eq!((tex.width, tex.height), (16, 8));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(TextureImage::decode(b"not an image", 2048).is_err());
    }

    #[test]
    fn placeholders_are_single_pixels() {
        let tex = TextureImage::flat_displacement();
        assert_eq!((tex.width, tex.height, tex.rgba.len()), (1, 1, 4));
    }
}
