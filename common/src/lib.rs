//! Common utilities for the orrery viewer
//!
//! This crate provides the rendering-library glue the simulation sits on:
//! window and GPU setup, an orbital camera with damping, sphere meshes and
//! texture loading.

pub mod camera;
pub mod error;
pub mod graphics;
pub mod mesh;
pub mod texture;

pub use camera::*;
pub use error::GraphicsError;
pub use graphics::*;
pub use mesh::*;
pub use texture::*;

/// Unpack a `0xRRGGBB` colour into sRGB-encoded bytes, as stored in an sRGB texture
pub fn srgb8_from_hex(hex: u32) -> [u8; 3] {
    [
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    ]
}

/// Decode a `0xRRGGBB` sRGB colour to linear `[r, g, b]` for lighting maths
pub fn linear_rgb_from_hex(hex: u32) -> [f32; 3] {
    srgb8_from_hex(hex).map(|c| srgb_to_linear(c as f32 / 255.0))
}

/// sRGB transfer function, inverse
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb8_from_hex() {
        assert_eq!(srgb8_from_hex(0xAAAAAA), [0xAA, 0xAA, 0xAA]);
        assert_eq!(srgb8_from_hex(0xFF8000), [255, 128, 0]);
    }

    #[test]
    fn test_linear_rgb_from_hex_endpoints() {
        assert_eq!(linear_rgb_from_hex(0xFFFFFF), [1.0, 1.0, 1.0]);
        assert_eq!(linear_rgb_from_hex(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mid_grey_is_darker_in_linear() {
        // 0x88 = 136 decodes to roughly 0.246 linear, well below 136 / 255
        let grey = linear_rgb_from_hex(0x888888);
        assert!((grey[0] - 0.2462).abs() < 1e-3, "{}", grey[0]);
        assert!(grey[0] < 136.0 / 255.0);
        assert_eq!(grey[0], grey[1]);
        assert_eq!(grey[1], grey[2]);
    }

    #[test]
    fn test_srgb_to_linear_low_segment() {
        assert!((srgb_to_linear(0.04) - 0.04 / 12.92).abs() < 1e-7);
    }
}
