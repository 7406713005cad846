// ABOUTME: Sprite payload validation and PNG decoding
// ABOUTME: PNG is the only format PokeAPI serves, so it is the only one accepted

use crate::error::PokeError;
use image::{DynamicImage, ImageFormat};

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode a PNG sprite from raw bytes.
pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage, PokeError> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(PokeError::Decode(
            "payload is not a PNG image".to_string(),
        ));
    }

    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?)
}
