/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Composing indexed frames into the frame buffer

use zune_core::log::{error, trace};

use crate::bitmap::{rgba, GifBitmap};
use crate::decoder::GifAnimation;
use crate::enums::CompositeMode;
use crate::errors::GifDecoderErrors;
use crate::frame::{ImageBlock, Rect};
use crate::lzw::{LzwContext, LzwDecoder, LzwStatus};

/// Map the `y`th decoded row of an interlaced image to its
/// position in an image `height` rows tall
///
/// Rows arrive in four passes, every 8th row starting at 0,
/// every 8th starting at 4, every 4th starting at 2 and
/// finally every 2nd starting at 1.
pub(crate) const fn interlaced_row(mut y: usize, height: usize) -> usize {
    if y * 8 < height {
        return y * 8;
    }
    y -= (height + 7) / 8;

    if y * 8 + 4 < height {
        return y * 8 + 4;
    }
    y -= (height + 3) / 8;

    if y * 4 + 2 < height {
        return y * 4 + 2;
    }
    y -= (height + 1) / 4;

    y * 2 + 1
}

/// Fill a local colour table from the stream, unused entries
/// become transparent black
fn load_colour_table(
    table: &mut [u32], data: &[u8], offset: usize, entries: usize
) -> Result<(), GifDecoderErrors> {
    let raw = data
        .get(offset..offset + entries * 3)
        .ok_or(GifDecoderErrors::InsufficientFrameData)?;

    table.fill(0);

    for (entry, rgb) in table.iter_mut().zip(raw.chunks_exact(3)) {
        *entry = rgba(rgb[0], rgb[1], rgb[2], 0xFF);
    }
    Ok(())
}

fn clear_rect(pixels: &mut [u32], stride: usize, rect: Rect) {
    for y in rect.y..rect.bottom() {
        let start = y * stride + rect.x;

        if let Some(row) = pixels.get_mut(start..start + rect.width) {
            row.fill(0);
        }
    }
}

/// Decompress one image block into the canvas
fn decode_block(
    lzw: &mut LzwContext, data: &[u8], block: &ImageBlock, colours: &[u32], pixels: &mut [u32],
    stride: usize
) -> Result<(), GifDecoderErrors> {
    let min_code_size = *data
        .get(block.data_offset)
        .ok_or(GifDecoderErrors::InsufficientFrameData)?;

    let mut decoder = LzwDecoder::new(lzw, data, block.data_offset + 1, min_code_size)?;
    let rect = block.rect;

    for y in 0..rect.height {
        let row = if block.interlaced {
            interlaced_row(y, rect.height)
        } else {
            y
        };
        let start = (rect.y + row) * stride + rect.x;

        let output = pixels
            .get_mut(start..start + rect.width)
            .ok_or(GifDecoderErrors::DataError("Image block outside the canvas"))?;

        let mut written = 0;

        while written < output.len() {
            if decoder.is_empty() && decoder.fill()? == LzwStatus::EndOfImage {
                trace!("Image data ended {} pixels early", output.len() - written);
                return Ok(());
            }
            written += decoder.burst(&mut output[written..], colours, block.transparent_index);
        }
    }
    Ok(())
}

impl<B: GifBitmap> GifAnimation<B> {
    /// Compose frame `frame` into the frame buffer
    ///
    /// `data` must be the buffer (or a longer version of it) the
    /// animation was indexed from.
    ///
    /// Decoding the frame directly after the one currently held is
    /// incremental, any other request replays the animation from
    /// the first frame. Asking for the frame already held does
    /// nothing.
    ///
    /// A frame whose data is still arriving can be decoded, the
    /// available rows are drawn and
    /// [`InsufficientFrameData`](GifDecoderErrors::InsufficientFrameData)
    /// is returned.
    ///
    /// # Errors
    /// - [`InsufficientData`](GifDecoderErrors::InsufficientData) if the
    ///   frame has not been seen by [`index`](Self::index) yet
    /// - [`DataError`](GifDecoderErrors::DataError) for corrupt image data
    pub fn decode_frame(&mut self, data: &[u8], frame: usize) -> Result<(), GifDecoderErrors> {
        if frame >= self.frames.len() {
            return Err(GifDecoderErrors::InsufficientData);
        }
        if self.decoded_frame == Some(frame) {
            return Ok(());
        }
        let start = match self.decoded_frame {
            Some(decoded) if decoded < frame => decoded + 1,
            _ => {
                self.clear_canvas();
                0
            }
        };
        for idx in start..=frame {
            self.composite(data, idx, CompositeMode::Decode)?;
        }
        Ok(())
    }

    fn clear_canvas(&mut self) {
        if let Some(image) = self.frame_image.as_mut() {
            image.pixels_mut().fill(0);
            image.modified();
        }
        self.decoded_frame = None;
        self.dirty_frame = None;
    }

    fn composite(
        &mut self, data: &[u8], idx: usize, mode: CompositeMode
    ) -> Result<(), GifDecoderErrors> {
        if mode == CompositeMode::Decode {
            if let Some(dirty) = self.dirty_frame {
                if self.decoded_frame == Some(dirty) {
                    self.composite(data, dirty, CompositeMode::ClearOnly)?;
                }
            }
            self.dirty_frame = None;
            self.decoded_frame = None;
        }

        let image = self
            .frame_image
            .as_mut()
            .ok_or(GifDecoderErrors::InsufficientData)?;
        let stride = self.width;
        let frame = &self.frames[idx];

        if mode == CompositeMode::ClearOnly {
            for block in &frame.blocks {
                clear_rect(image.pixels_mut(), stride, block.rect);
            }
            return Ok(());
        }

        let mut result = Ok(());

        for block in &frame.blocks {
            let colours: &[u32] = match block.local_colour_table {
                Some((offset, entries)) => {
                    if let Err(err) =
                        load_colour_table(&mut self.local_colour_table, data, offset, entries)
                    {
                        result = Err(err);
                        break;
                    }
                    &self.local_colour_table
                }
                None => &self.global_colour_table
            };
            result = decode_block(
                &mut self.lzw,
                data,
                block,
                colours,
                image.pixels_mut(),
                stride
            );
            if result.is_err() {
                break;
            }
        }
        let complete = idx < self.frame_count;

        if result.is_ok() && complete {
            let frame = &mut self.frames[idx];
            let opaque = *frame.opaque.get_or_insert_with(|| image.test_opaque());

            image.set_opaque(opaque);
        }
        image.modified();

        if let Err(err) = result {
            if !err.is_recoverable() {
                error!("Frame {} failed to decode: {:?}", idx, err);
            }
            return Err(err);
        }
        if !complete {
            return Err(GifDecoderErrors::InsufficientFrameData);
        }
        self.decoded_frame = Some(idx);

        if self.frames[idx].disposal.requires_restore() {
            self.dirty_frame = Some(idx);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::compositor::interlaced_row;

    #[test]
    fn interlaced_rows_follow_the_four_passes() {
        let rows: Vec<usize> = (0..10).map(|y| interlaced_row(y, 10)).collect();

        assert_eq!(rows, [0, 8, 4, 2, 6, 1, 3, 5, 7, 9]);
    }

    #[test]
    fn interlaced_rows_are_a_permutation() {
        for height in 1..40 {
            let mut seen: Vec<usize> = (0..height).map(|y| interlaced_row(y, height)).collect();
            seen.sort_unstable();

            assert_eq!(seen, (0..height).collect::<Vec<_>>(), "height {height}");
        }
    }
}
