//! PNG snapshots of frames.
//!
//! Frames are only ever encoded in memory; nothing is written to disk.

use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// PNG encoder for framebuffer snapshots.
pub struct PngEncoder;

impl PngEncoder {
    /// Encode a framebuffer to PNG bytes (8-bit RGB).
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut buffer, fb.width(), fb.height());
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(fb.pixels())?;
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_png_to_bytes() {
        let fb = Framebuffer::filled(10, 10, Rgb::RED).unwrap();

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let mut fb = Framebuffer::filled(4, 3, Rgb::WHITE).unwrap();
        fb.set_pixel(1, 2, Rgb::new(10, 20, 30));
        let bytes = PngEncoder::to_bytes(&fb).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!((info.width, info.height), (4, 3));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[..info.buffer_size()], fb.pixels());
    }
}
