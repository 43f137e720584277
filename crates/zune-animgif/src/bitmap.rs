/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The surface decoded frames are written into
//!
//! Pixels are `u32` values holding the bytes `R, G, B, A` in
//! memory order, i.e. casting the pixel slice to bytes yields
//! an RGBA raster.

use alloc::vec::Vec;

/// Pack an RGBA quadruple into a pixel
#[inline(always)]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_ne_bytes([r, g, b, a])
}

/// Extract the alpha channel of a pixel
#[inline(always)]
pub const fn alpha(pixel: u32) -> u8 {
    pixel.to_ne_bytes()[3]
}

/// A pixel buffer the decoder composes frames into
///
/// Implement this to have frames decoded directly into
/// a renderer owned surface. The buffer is dropped when the
/// animation is dropped or when a frame declares a larger canvas.
pub trait GifBitmap: Sized {
    /// Allocate a zeroed (fully transparent) bitmap
    ///
    /// Returns `None` if the allocation fails
    fn create(width: usize, height: usize) -> Option<Self>;

    /// Row major pixels, `width * height` entries
    fn pixels(&self) -> &[u32];

    fn pixels_mut(&mut self) -> &mut [u32];

    /// Scan the pixels and report whether every one has full alpha
    fn test_opaque(&self) -> bool {
        self.pixels().iter().all(|pixel| alpha(*pixel) == 0xFF)
    }

    /// Record whether the bitmap is fully opaque
    fn set_opaque(&mut self, opaque: bool);

    /// Called after the decoder has changed the pixels
    fn modified(&mut self) {}
}

/// A heap backed RGBA bitmap
#[derive(Clone, Debug)]
pub struct RgbaBitmap {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
    opaque: bool
}

impl RgbaBitmap {
    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// The opacity last recorded by the decoder
    pub const fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// The raster as `width * height * 4` RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl GifBitmap for RgbaBitmap {
    fn create(width: usize, height: usize) -> Option<Self> {
        let size = width.checked_mul(height)?;
        let mut pixels = Vec::new();

        pixels.try_reserve_exact(size).ok()?;
        pixels.resize(size, 0);

        Some(RgbaBitmap {
            width,
            height,
            pixels,
            opaque: false
        })
    }

    fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    fn set_opaque(&mut self, opaque: bool) {
        self.opaque = opaque;
    }
}

#[cfg(test)]
mod tests {
    use crate::bitmap::{alpha, rgba, GifBitmap, RgbaBitmap};

    #[test]
    fn pixels_are_rgba_in_memory() {
        let mut bitmap = RgbaBitmap::create(2, 1).unwrap();

        bitmap.pixels_mut()[1] = rgba(1, 2, 3, 0xFF);

        assert_eq!(bitmap.as_bytes(), &[0, 0, 0, 0, 1, 2, 3, 0xFF]);
        assert_eq!(alpha(bitmap.pixels()[1]), 0xFF);
        assert!(!bitmap.test_opaque());

        bitmap.pixels_mut()[0] = rgba(9, 9, 9, 0xFF);
        assert!(bitmap.test_opaque());
    }
}
