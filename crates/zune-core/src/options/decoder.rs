/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

fn decoder_strict_mode() -> DecoderFlags {
    DecoderFlags {
        gif_fix_screen_dimensions:   false,
        gif_merge_zero_delay_images: false
    }
}

/// Tolerant options
///
/// Apply the compatibility heuristics for files
/// written by broken encoders
fn tolerant_options() -> DecoderFlags {
    DecoderFlags {
        gif_fix_screen_dimensions:   true,
        gif_merge_zero_delay_images: true
    }
}

/// Decoder options that are flags
///
/// NOTE: When you extend this, add true or false to
/// all options above that return a `DecoderFlag`
#[derive(Copy, Debug, Clone, Default)]
pub struct DecoderFlags {
    /// Whether the gif decoder should treat a logical screen
    /// matching a common monitor resolution as bogus and size
    /// the canvas from the frames instead
    gif_fix_screen_dimensions:   bool,
    /// Whether image blocks following a zero delay graphic control
    /// extension are merged into one frame
    gif_merge_zero_delay_images: bool
}

/// Decoder options
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Whether the decoder rejects non-conforming
    /// input instead of warning about it
    ///
    /// - Default value: false
    strict_mode: bool,
    /// Boolean flags that influence decoding
    flags:       DecoderFlags
}

/// Initializers
impl DecoderOptions {
    /// Create decoder options that reject non-conforming
    /// files and disable all compatibility heuristics
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default()
            .set_strict_mode(true)
            .set_decoder_flags(decoder_strict_mode())
    }

    /// Create the decoder with options suited for command line
    /// inspection
    ///
    /// - Lift the dimension limits
    /// - Keep the compatibility heuristics
    pub fn new_cmd() -> DecoderOptions {
        DecoderOptions::default()
            .set_max_width(usize::MAX)
            .set_max_height(usize::MAX)
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoders and invalid
    /// headers will be rejected by the decoder
    ///
    /// # Arguments
    ///
    /// * `yes`:
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// GIF specific options
impl DecoderOptions {
    /// Whether logical screens that match a common monitor
    /// resolution (or are zero sized/over 2048 pixels) should be
    /// replaced by a 1x1 screen, letting the frames size the canvas
    ///
    /// Some broken encoders write the monitor size into the
    /// logical screen descriptor.
    pub const fn gif_get_fix_screen_dimensions(&self) -> bool {
        self.flags.gif_fix_screen_dimensions
    }

    /// Set whether the screen dimension heuristic should run
    pub fn gif_set_fix_screen_dimensions(mut self, yes: bool) -> Self {
        self.flags.gif_fix_screen_dimensions = yes;
        self
    }

    /// Whether image blocks following a graphic control extension
    /// with a zero delay are merged into the next logical frame
    pub const fn gif_get_merge_zero_delay_images(&self) -> bool {
        self.flags.gif_merge_zero_delay_images
    }

    /// Set whether zero delay image blocks are merged into one frame
    pub fn gif_set_merge_zero_delay_images(mut self, yes: bool) -> Self {
        self.flags.gif_merge_zero_delay_images = yes;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false,
            flags:       tolerant_options()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::DecoderOptions;

    #[test]
    fn strict_options_disable_heuristics() {
        let options = DecoderOptions::new_strict();

        assert!(options.get_strict_mode());
        assert!(!options.gif_get_fix_screen_dimensions());
        assert!(!options.gif_get_merge_zero_delay_images());

        let options = DecoderOptions::default();

        assert!(!options.get_strict_mode());
        assert!(options.gif_get_fix_screen_dimensions());
        assert!(options.gif_get_merge_zero_delay_images());
        assert_eq!(options.get_max_width(), 16384);
    }
}
