/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use zune_core::bytestream::ZByteReader;
use zune_core::log::{debug, trace, warn};
use zune_core::options::DecoderOptions;

use crate::bitmap::{rgba, GifBitmap, RgbaBitmap};
use crate::constants::{
    GIF_COLOUR_TABLE_MASK, GIF_COLOUR_TABLE_SIZE_MASK, GIF_HEADER_SIZE, GIF_MAX_COLOURS,
    GIF_SUSPICIOUS_MAX_DIMENSION, GIF_SUSPICIOUS_SCREEN_SIZES
};
use crate::enums::ParseState;
use crate::errors::GifDecoderErrors;
use crate::frame::GifFrame;
use crate::lzw::LzwContext;

/// An incrementally decoded GIF animation
///
/// The animation does not own the GIF bytes, every call takes the
/// caller's buffer instead. The buffer may grow between calls but
/// must always start with the same bytes.
///
/// Usage is in two steps, [`index`](Self::index) walks the stream
/// and records where frames start, and
/// [`decode_frame`](Self::decode_frame) composes a frame into the
/// frame buffer.
///
/// # Example
/// ```no_run
/// use zune_animgif::GifAnimation;
///
/// let data = std::fs::read("animation.gif").unwrap();
/// let mut animation = GifAnimation::new();
///
/// animation.index(&data).unwrap();
///
/// for frame in 0..animation.frame_count() {
///     animation.decode_frame(&data, frame).unwrap();
///     let pixels = animation.pixels().unwrap();
/// }
/// ```
pub struct GifAnimation<B: GifBitmap = RgbaBitmap> {
    pub(crate) options:                  DecoderOptions,
    pub(crate) state:                    ParseState,
    pub(crate) width:                    usize,
    pub(crate) height:                   usize,
    pub(crate) background_index:         u8,
    pub(crate) aspect_ratio:             u8,
    pub(crate) loop_count:               u16,
    pub(crate) global_colour_table_size: usize,
    pub(crate) global_colour_table:      Vec<u32>,
    pub(crate) local_colour_table:       Vec<u32>,
    pub(crate) frames:                   Vec<GifFrame>,
    pub(crate) frame_count:              usize,
    pub(crate) buffer_position:          usize,
    pub(crate) frame_image:              Option<B>,
    pub(crate) decoded_frame:            Option<usize>,
    pub(crate) dirty_frame:              Option<usize>,
    pub(crate) lzw:                      LzwContext
}

impl GifAnimation<RgbaBitmap> {
    /// Create an animation decoding into an [`RgbaBitmap`]
    /// with default options
    pub fn new() -> GifAnimation<RgbaBitmap> {
        GifAnimation::new_with_options(DecoderOptions::default())
    }
}

impl Default for GifAnimation<RgbaBitmap> {
    fn default() -> Self {
        GifAnimation::new()
    }
}

impl<B: GifBitmap> GifAnimation<B> {
    /// Create an animation with custom options and bitmap type
    pub fn new_with_options(options: DecoderOptions) -> GifAnimation<B> {
        GifAnimation {
            options,
            state: ParseState::Header,
            width: 0,
            height: 0,
            background_index: 0,
            aspect_ratio: 0,
            loop_count: 1,
            global_colour_table_size: 0,
            global_colour_table: vec![0; GIF_MAX_COLOURS],
            local_colour_table: vec![0; GIF_MAX_COLOURS],
            frames: Vec::new(),
            frame_count: 0,
            buffer_position: 0,
            frame_image: None,
            decoded_frame: None,
            dirty_frame: None,
            lzw: LzwContext::new()
        }
    }

    /// Index as much of `data` as possible
    ///
    /// Already indexed bytes are not scanned again, so calling this
    /// each time more of the file arrives is cheap.
    ///
    /// # Returns
    /// - `Ok(())`: the trailer was reached, every frame is indexed
    /// - [`InsufficientData`](GifDecoderErrors::InsufficientData): the
    ///   buffer ends at a frame boundary, call again with more data
    /// - [`InsufficientFrameData`](GifDecoderErrors::InsufficientFrameData):
    ///   the buffer ends inside a frame, call again with more data
    ///
    /// Any other error is fatal for the remainder of the stream, frames
    /// indexed before it stay usable.
    pub fn index(&mut self, data: &[u8]) -> Result<(), GifDecoderErrors> {
        if data.len() < self.buffer_position {
            return Err(GifDecoderErrors::DataError(
                "Buffer is shorter than the already indexed data"
            ));
        }
        let result = self.index_inner(data);

        self.repair_redraw_areas();

        result
    }

    fn index_inner(&mut self, data: &[u8]) -> Result<(), GifDecoderErrors> {
        if self.state == ParseState::Header {
            self.parse_header(data)?;
        }
        if self.state == ParseState::GlobalColourTable {
            self.parse_global_colour_table(data)?;
        }
        while self.state == ParseState::Frames {
            self.index_frame(data)?;
        }
        Ok(())
    }

    fn parse_header(&mut self, data: &[u8]) -> Result<(), GifDecoderErrors> {
        if data.len() < GIF_HEADER_SIZE {
            return Err(GifDecoderErrors::InsufficientData);
        }
        let mut stream = ZByteReader::new(data);

        let signature = stream.read_fixed_bytes_or_error::<3>()?;

        if &signature != b"GIF" {
            return Err(GifDecoderErrors::NotAGif);
        }
        let version = stream.read_fixed_bytes_or_error::<3>()?;

        if &version != b"87a" && &version != b"89a" {
            if self.options.get_strict_mode() {
                return Err(GifDecoderErrors::DataError("Unsupported gif version"));
            }
            warn!("Unsupported gif version {:?}, continuing", version);
        }

        let mut width = usize::from(stream.get_u16_le_err()?);
        let mut height = usize::from(stream.get_u16_le_err()?);
        let flags = stream.get_u8_err()?;

        self.background_index = stream.get_u8_err()?;
        self.aspect_ratio = stream.get_u8_err()?;

        trace!("Image width  :{}", width);
        trace!("Image height :{}", height);
        trace!("Background   :{}", self.background_index);
        trace!("Ratio        :{}", self.aspect_ratio);

        if self.options.gif_get_fix_screen_dimensions() && is_suspicious_screen(width, height) {
            warn!(
                "Screen size {}x{} looks like a monitor resolution, sizing from frames",
                width, height
            );
            width = 1;
            height = 1;
        }

        if (flags & GIF_COLOUR_TABLE_MASK) != 0 {
            self.global_colour_table_size = 2 << (flags & GIF_COLOUR_TABLE_SIZE_MASK);
        }
        self.ensure_canvas(width, height)?;

        self.buffer_position = stream.position();
        self.state = ParseState::GlobalColourTable;

        Ok(())
    }

    fn parse_global_colour_table(&mut self, data: &[u8]) -> Result<(), GifDecoderErrors> {
        let mut stream = ZByteReader::new_at(data, self.buffer_position)?;

        let table = stream
            .read_slice(self.global_colour_table_size * 3)
            .map_err(|_| GifDecoderErrors::InsufficientData)?;

        if self.global_colour_table_size == 0 {
            self.global_colour_table[0] = rgba(0x00, 0x00, 0x00, 0xFF);
            self.global_colour_table[1] = rgba(0xFF, 0xFF, 0xFF, 0xFF);
        } else {
            for (entry, rgb) in self
                .global_colour_table
                .iter_mut()
                .zip(table.chunks_exact(3))
            {
                *entry = rgba(rgb[0], rgb[1], rgb[2], 0xFF);
            }
        }
        trace!("Global colour table entries: {}", self.global_colour_table_size);

        self.buffer_position = stream.position();
        self.state = ParseState::Frames;

        Ok(())
    }

    /// Make sure the frame buffer covers `width` x `height`
    ///
    /// The canvas only ever grows, growing it drops the current
    /// frame buffer contents.
    pub(crate) fn ensure_canvas(&mut self, width: usize, height: usize) -> Result<(), GifDecoderErrors> {
        if self.frame_image.is_some() && width <= self.width && height <= self.height {
            return Ok(());
        }
        let width = width.max(self.width);
        let height = height.max(self.height);

        if width > self.options.get_max_width() {
            return Err(GifDecoderErrors::TooLargeDimensions(
                "width",
                self.options.get_max_width(),
                width
            ));
        }
        if height > self.options.get_max_height() {
            return Err(GifDecoderErrors::TooLargeDimensions(
                "height",
                self.options.get_max_height(),
                height
            ));
        }
        let image = B::create(width, height).ok_or(GifDecoderErrors::MemoryError(
            width.saturating_mul(height).saturating_mul(4)
        ))?;

        if self.frame_image.is_some() {
            debug!(
                "Growing canvas from {}x{} to {}x{}",
                self.width, self.height, width, height
            );
        }
        self.width = width;
        self.height = height;
        self.frame_image = Some(image);
        self.decoded_frame = None;
        self.dirty_frame = None;

        for frame in &mut self.frames {
            frame.opaque = None;
        }

        Ok(())
    }

    /// Canvas width, may grow while indexing
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Canvas height, may grow while indexing
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of completely indexed frames
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Number of frames including one whose data is still arriving
    pub fn frame_count_partial(&self) -> usize {
        self.frames.len()
    }

    /// Index records, the last one is partial if
    /// [`frame_count_partial`](Self::frame_count_partial) exceeds
    /// [`frame_count`](Self::frame_count)
    pub fn frames(&self) -> &[GifFrame] {
        &self.frames
    }

    pub fn frame(&self, frame: usize) -> Option<&GifFrame> {
        self.frames.get(frame)
    }

    /// How many times the animation plays, `0` means forever
    pub const fn loop_count(&self) -> u16 {
        self.loop_count
    }

    pub const fn background_index(&self) -> u8 {
        self.background_index
    }

    /// The background index resolved through the global colour table
    pub fn background_colour(&self) -> u32 {
        self.global_colour_table[usize::from(self.background_index)]
    }

    /// Raw pixel aspect ratio byte of the logical screen descriptor
    pub const fn aspect_ratio(&self) -> u8 {
        self.aspect_ratio
    }

    /// The global colour table, empty if the stream has none
    pub fn global_colour_table(&self) -> &[u32] {
        &self.global_colour_table[..self.global_colour_table_size]
    }

    /// The frame buffer, `None` until the header is parsed
    pub const fn frame_image(&self) -> Option<&B> {
        self.frame_image.as_ref()
    }

    /// Pixels of the frame buffer as packed RGBA
    pub fn pixels(&self) -> Option<&[u32]> {
        self.frame_image.as_ref().map(|image| image.pixels())
    }

    /// Whether the trailer has been reached
    pub fn is_complete(&self) -> bool {
        self.state == ParseState::Complete
    }

    /// Offset of the first byte not yet indexed
    pub const fn buffer_position(&self) -> usize {
        self.buffer_position
    }

    /// The frame currently held in the frame buffer
    pub const fn decoded_frame(&self) -> Option<usize> {
        self.decoded_frame
    }

    pub const fn options(&self) -> &DecoderOptions {
        &self.options
    }
}

/// Screen sizes broken encoders write instead of the image size
fn is_suspicious_screen(width: usize, height: usize) -> bool {
    width == 0
        || height == 0
        || width > GIF_SUSPICIOUS_MAX_DIMENSION
        || height > GIF_SUSPICIOUS_MAX_DIMENSION
        || GIF_SUSPICIOUS_SCREEN_SIZES.contains(&(width, height))
}
