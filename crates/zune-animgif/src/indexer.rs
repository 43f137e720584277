/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Structural indexing of frames
//!
//! Walks extensions and image descriptors without decompressing
//! anything, recording where each frame's data lives.

use core::mem::size_of;

use zune_core::bytestream::{ZByteIoError, ZByteReader};
use zune_core::log::{error, trace};

use crate::bitmap::GifBitmap;
use crate::constants::{
    GIF_COLOUR_TABLE_MASK, GIF_COLOUR_TABLE_SIZE_MASK, GIF_DISPOSAL_MASK,
    GIF_EXTENSION_APPLICATION, GIF_EXTENSION_GRAPHIC_CONTROL, GIF_EXTENSION_INTRODUCER,
    GIF_IMAGE_DESCRIPTOR_SIZE, GIF_IMAGE_SEPARATOR, GIF_INTERLACE_MASK, GIF_LOOP_EXTENSIONS,
    GIF_MAX_FRAMES, GIF_MAX_LZW_BITS, GIF_TRAILER, GIF_TRANSPARENCY_MASK
};
use crate::decoder::GifAnimation;
use crate::enums::{DisposalMethod, ParseState};
use crate::errors::GifDecoderErrors;
use crate::frame::{GifFrame, ImageBlock, Rect};

/// Graphic control values applying to the next image block
#[derive(Copy, Clone, Default)]
struct GraphicControl {
    transparent_index: Option<u8>,
    zero_delay:        bool
}

/// Running out of bytes inside a frame
fn truncated(_: ZByteIoError) -> GifDecoderErrors {
    GifDecoderErrors::InsufficientFrameData
}

/// Read one sub-block, `None` once the terminator is consumed
fn read_sub_block<'a>(stream: &mut ZByteReader<'a>) -> Result<Option<&'a [u8]>, GifDecoderErrors> {
    let length = usize::from(stream.get_u8_err().map_err(truncated)?);

    if length == 0 {
        return Ok(None);
    }
    stream.read_slice(length).map(Some).map_err(truncated)
}

/// Skip sub-blocks up to and including the terminator
fn skip_sub_blocks(stream: &mut ZByteReader) -> Result<(), GifDecoderErrors> {
    while read_sub_block(stream)?.is_some() {}
    Ok(())
}

impl<B: GifBitmap> GifAnimation<B> {
    /// Index the frame starting at `buffer_position`
    pub(crate) fn index_frame(&mut self, data: &[u8]) -> Result<(), GifDecoderErrors> {
        let start = self.buffer_position;

        match data.get(start) {
            None => return Err(GifDecoderErrors::InsufficientData),
            Some(&GIF_TRAILER) => {
                trace!("Trailer reached after {} frames", self.frame_count);
                self.buffer_position = start + 1;
                self.state = ParseState::Complete;
                return Ok(());
            }
            Some(_) => ()
        }
        if self.frame_count >= GIF_MAX_FRAMES {
            error!("More than {} frames, refusing to index further", GIF_MAX_FRAMES);
            return Err(GifDecoderErrors::DataError("Too many frames"));
        }

        let mut frame = GifFrame::new(start);
        let mut stream = ZByteReader::new_at(data, start)?;

        match self.parse_frame(&mut stream, &mut frame) {
            Ok(()) if frame.blocks.is_empty() => {
                // extensions directly followed by the trailer
                self.buffer_position = stream.position();
                Ok(())
            }
            Ok(()) => {
                trace!(
                    "Frame {}: offset {}, delay {}, disposal {:?}, rect {:?}",
                    self.frame_count,
                    frame.offset,
                    frame.delay,
                    frame.disposal,
                    frame.image_rect
                );
                self.store_frame(frame)?;
                self.frame_count += 1;
                self.buffer_position = stream.position();

                Ok(())
            }
            Err(GifDecoderErrors::InsufficientFrameData) => {
                if frame.blocks.is_empty() {
                    self.frames.truncate(self.frame_count);
                } else {
                    self.store_frame(frame)?;
                }
                Err(GifDecoderErrors::InsufficientFrameData)
            }
            Err(err) => {
                self.frames.truncate(self.frame_count);
                Err(err)
            }
        }
    }

    /// Place a record at `frame_count`, replacing an earlier partial one
    fn store_frame(&mut self, frame: GifFrame) -> Result<(), GifDecoderErrors> {
        if let Some(existing) = self.frames.get_mut(self.frame_count) {
            *existing = frame;
            return Ok(());
        }
        self.frames
            .try_reserve(1)
            .map_err(|_| GifDecoderErrors::MemoryError(size_of::<GifFrame>()))?;
        self.frames.push(frame);

        Ok(())
    }

    /// Parse extensions and image blocks making up one logical frame
    ///
    /// On success the stream is positioned at the start of the next frame
    /// (or at the trailer).
    fn parse_frame(
        &mut self, stream: &mut ZByteReader, frame: &mut GifFrame
    ) -> Result<(), GifDecoderErrors> {
        loop {
            let mut control = GraphicControl::default();

            while stream.peek_u8() == Some(GIF_EXTENSION_INTRODUCER) {
                self.parse_extension(stream, frame, &mut control)?;
            }
            let marker = stream
                .peek_u8()
                .ok_or(GifDecoderErrors::InsufficientFrameData)?;

            if marker == GIF_TRAILER {
                return Ok(());
            }
            if marker != GIF_IMAGE_SEPARATOR {
                error!("Expected image separator, found {:#04X}", marker);
                return Err(GifDecoderErrors::FrameDataError(
                    "Expected an image descriptor"
                ));
            }
            stream.skip(1).map_err(truncated)?;

            self.parse_image_block(stream, frame, control)?;

            if !(control.zero_delay && self.options.gif_get_merge_zero_delay_images()) {
                return Ok(());
            }
            match stream.peek_u8() {
                None => return Err(GifDecoderErrors::InsufficientFrameData),
                Some(GIF_EXTENSION_INTRODUCER | GIF_IMAGE_SEPARATOR) => {
                    trace!("Zero delay, merging next image into frame");
                }
                Some(_) => return Ok(())
            }
        }
    }

    fn parse_extension(
        &mut self, stream: &mut ZByteReader, frame: &mut GifFrame, control: &mut GraphicControl
    ) -> Result<(), GifDecoderErrors> {
        let [_, label] = stream
            .read_fixed_bytes_or_error::<2>()
            .map_err(truncated)?;

        match label {
            GIF_EXTENSION_GRAPHIC_CONTROL => {
                let Some(block) = read_sub_block(stream)? else {
                    return Ok(());
                };
                if block.len() >= 4 {
                    let flags = block[0];
                    let delay = u16::from_le_bytes([block[1], block[2]]);

                    frame.delay = delay;
                    frame.disposal = DisposalMethod::from_flags((flags & GIF_DISPOSAL_MASK) >> 2);

                    control.zero_delay = delay == 0;
                    control.transparent_index =
                        ((flags & GIF_TRANSPARENCY_MASK) != 0).then_some(block[3]);
                }
                skip_sub_blocks(stream)
            }
            GIF_EXTENSION_APPLICATION => {
                let Some(identifier) = read_sub_block(stream)? else {
                    return Ok(());
                };
                if GIF_LOOP_EXTENSIONS
                    .iter()
                    .any(|name| identifier == name.as_slice())
                {
                    let Some(block) = read_sub_block(stream)? else {
                        return Ok(());
                    };
                    if block.len() >= 3 && block[0] == 1 {
                        self.loop_count = u16::from_le_bytes([block[1], block[2]]);
                        trace!("Loop count: {}", self.loop_count);
                    }
                }
                skip_sub_blocks(stream)
            }
            _ => skip_sub_blocks(stream)
        }
    }

    fn parse_image_block(
        &mut self, stream: &mut ZByteReader, frame: &mut GifFrame, control: GraphicControl
    ) -> Result<(), GifDecoderErrors> {
        let descriptor = stream
            .read_fixed_bytes_or_error::<GIF_IMAGE_DESCRIPTOR_SIZE>()
            .map_err(truncated)?;

        let field = |i: usize| usize::from(u16::from_le_bytes([descriptor[i], descriptor[i + 1]]));
        let rect = Rect::new(field(0), field(2), field(4), field(6));
        let flags = descriptor[8];

        let local_colour_table = if (flags & GIF_COLOUR_TABLE_MASK) != 0 {
            let entries = 2 << (flags & GIF_COLOUR_TABLE_SIZE_MASK);
            let offset = stream.position();

            stream.skip(entries * 3).map_err(truncated)?;

            Some((offset, entries))
        } else {
            None
        };
        let data_offset = stream.position();
        let min_code_size = stream.get_u8_err().map_err(truncated)?;

        if min_code_size >= GIF_MAX_LZW_BITS {
            error!("Invalid LZW minimum code size {}", min_code_size);
            return Err(GifDecoderErrors::DataError("Invalid LZW minimum code size"));
        }
        self.ensure_canvas(rect.right(), rect.bottom())?;

        frame.push_block(ImageBlock {
            rect,
            interlaced: (flags & GIF_INTERLACE_MASK) != 0,
            local_colour_table,
            transparent_index: control.transparent_index,
            data_offset
        });

        skip_sub_blocks(stream)
    }

    /// Widen redraw areas over the previous frame when it is restored
    ///
    /// Recomputed from the image rectangles on every pass so repeated
    /// indexing settles on the same result.
    pub(crate) fn repair_redraw_areas(&mut self) {
        for i in (1..self.frames.len()).rev() {
            let (before, after) = self.frames.split_at_mut(i);
            let previous = &before[i - 1];
            let current = &mut after[0];

            current.redraw_rect = if previous.disposal.requires_restore() {
                current.image_rect.union(&previous.image_rect)
            } else {
                current.image_rect
            };
        }
    }
}
