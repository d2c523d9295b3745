use image::GenericImageView;

const MIN_BYTES: usize = 100;
const MAX_BYTES: usize = 50_000_000;
const MIN_SIDE: u32 = 10;
const MAX_SIDE: u32 = 10_000;

/// Validate that downloaded bytes decode to an image with reasonable dimensions.
///
/// Returns a human-readable reason on failure.
pub fn validate_image(bytes: &[u8]) -> Result<(), String> {
    // Check for minimum and maximum reasonable payload sizes
    if bytes.len() < MIN_BYTES {
        return Err("Image data too small, likely corrupted".to_string());
    }

    if bytes.len() > MAX_BYTES {
        return Err("Image data too large, possibly corrupted or invalid".to_string());
    }

    // Attempt to decode the image to check for corruption
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Image validation failed: {}", e))?;

    let (width, height) = img.dimensions();
    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(format!(
            "Image dimensions too small ({}x{}), likely corrupted",
            width, height
        ));
    }

    if width > MAX_SIDE || height > MAX_SIDE {
        return Err(format!(
            "Image dimensions unreasonably large ({}x{})",
            width, height
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn accepts_a_card_sized_jpeg() {
        let bytes = encode(63, 88, ImageFormat::Jpeg);
        assert!(validate_image(&bytes).is_ok());
    }

    #[test]
    fn rejects_html_error_page() {
        let bytes = "<html><body>404 Not Found</body></html>".repeat(10);
        let reason = validate_image(bytes.as_bytes()).unwrap_err();
        assert!(reason.starts_with("Image validation failed"));
    }

    #[test]
    fn rejects_tiny_payload() {
        assert!(validate_image(b"\xFF\xD8\xFF").is_err());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let bytes = encode(400, 4, ImageFormat::Png);
        let reason = validate_image(&bytes).unwrap_err();
        assert!(reason.contains("too small"));
    }
}
