/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! GIF flavoured LZW decompression
//!
//! Codes are packed least significant bit first into a chain of
//! length prefixed sub-blocks. The code width starts at
//! `min_code_size + 1` bits and grows each time the dictionary
//! fills the current width, up to 12 bits.
//!
//! The dictionary is stored as two parallel arrays indexed by code,
//! the code the entry extends (`prefix`) and the palette index it
//! appends (`suffix`). Expanding a code walks the prefix chain which
//! yields indices back to front, so they are pushed onto a stack and
//! popped off in display order.

use alloc::vec;
use alloc::vec::Vec;

use zune_core::log::{debug, trace};

use crate::constants::GIF_MAX_LZW_BITS;
use crate::errors::GifDecoderErrors;

pub(crate) const LZW_TABLE_SIZE: usize = 1 << GIF_MAX_LZW_BITS;

const LZW_STACK_SIZE: usize = LZW_TABLE_SIZE * 2;

/// Scratch tables for LZW decoding
///
/// Owned by an animation and reused for every frame it decodes,
/// so decoding does not allocate.
pub(crate) struct LzwContext {
    prefix: Vec<u16>,
    suffix: Vec<u8>,
    stack:  Vec<u8>
}

impl LzwContext {
    pub fn new() -> LzwContext {
        LzwContext {
            prefix: vec![0; LZW_TABLE_SIZE],
            suffix: vec![0; LZW_TABLE_SIZE],
            stack:  Vec::with_capacity(LZW_STACK_SIZE)
        }
    }
}

/// Result of asking the decoder for more pixels
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum LzwStatus {
    /// Pixels were pushed onto the stack
    Pixels,
    /// The end code or the sub-block terminator was reached
    EndOfImage
}

/// Pulls variable width codes out of the sub-block chain
pub(crate) struct CodeReader<'a> {
    data:            &'a [u8],
    position:        usize,
    block_remaining: usize,
    bits:            u32,
    num_bits:        u8,
    zero_data_block: bool
}

impl<'a> CodeReader<'a> {
    /// Start reading sub-blocks at `position`
    pub fn new(data: &'a [u8], position: usize) -> CodeReader<'a> {
        CodeReader {
            data,
            position,
            block_remaining: 0,
            bits: 0,
            num_bits: 0,
            zero_data_block: false
        }
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Result<u8, GifDecoderErrors> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(GifDecoderErrors::InsufficientFrameData)?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a code `code_size` bits wide
    ///
    /// Returns `None` when the zero length terminator block is reached,
    /// reading on after that is an error.
    pub fn next_code(&mut self, code_size: u8) -> Result<Option<u16>, GifDecoderErrors> {
        while self.num_bits < code_size {
            if self.block_remaining == 0 {
                if self.zero_data_block {
                    return Err(GifDecoderErrors::DataError(
                        "LZW code read past the end of the image data"
                    ));
                }
                let length = self.next_byte()?;

                if length == 0 {
                    self.zero_data_block = true;
                    return Ok(None);
                }
                self.block_remaining = usize::from(length);
            }
            let byte = self.next_byte()?;

            self.block_remaining -= 1;
            self.bits |= u32::from(byte) << self.num_bits;
            self.num_bits += 8;
        }
        let code = (self.bits & ((1 << code_size) - 1)) as u16;

        self.bits >>= code_size;
        self.num_bits -= code_size;

        Ok(Some(code))
    }

    /// Skip whatever is left of the sub-block chain
    ///
    /// Returns false if the terminator has not arrived yet.
    pub fn skip_remaining_blocks(&mut self) -> bool {
        if self.zero_data_block {
            return true;
        }
        self.position += self.block_remaining;
        self.block_remaining = 0;

        loop {
            match self.data.get(self.position) {
                None => return false,
                Some(0) => {
                    self.position += 1;
                    self.zero_data_block = true;
                    return true;
                }
                Some(length) => self.position += 1 + usize::from(*length)
            }
        }
    }
}

/// Decoding session for one image block
///
/// All per block state lives here, the tables are borrowed
/// from the animation's [`LzwContext`].
pub(crate) struct LzwDecoder<'a> {
    ctx:           &'a mut LzwContext,
    reader:        CodeReader<'a>,
    min_code_size: u8,
    clear_code:    u16,
    end_code:      u16,
    code_size:     u8,
    next_code:     u16,
    max_code:      u16,
    old_code:      Option<u16>,
    first_index:   u8
}

impl<'a> LzwDecoder<'a> {
    /// Create a decoder for the sub-blocks starting at `position`
    ///
    /// # Errors
    /// If the clear code does not fit the 12 bit dictionary
    pub fn new(
        ctx: &'a mut LzwContext, data: &'a [u8], position: usize, min_code_size: u8
    ) -> Result<LzwDecoder<'a>, GifDecoderErrors> {
        if min_code_size >= GIF_MAX_LZW_BITS {
            return Err(GifDecoderErrors::DataError(
                "LZW clear code does not fit the dictionary"
            ));
        }
        let clear_code = 1_u16 << min_code_size;

        ctx.stack.clear();

        let mut decoder = LzwDecoder {
            ctx,
            reader: CodeReader::new(data, position),
            min_code_size,
            clear_code,
            end_code: clear_code + 1,
            code_size: 0,
            next_code: 0,
            max_code: 0,
            old_code: None,
            first_index: 0
        };
        decoder.reset();

        Ok(decoder)
    }

    /// Restore the dictionary to the literal codes
    fn reset(&mut self) {
        self.code_size = self.min_code_size + 1;
        self.next_code = self.clear_code + 2;
        self.max_code = 1 << self.code_size;
        self.old_code = None;

        for code in 0..self.clear_code {
            self.ctx.prefix[usize::from(code)] = 0;
            self.ctx.suffix[usize::from(code)] = code as u8;
        }
    }

    /// Whether every decoded pixel has been handed out
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.ctx.stack.is_empty()
    }

    /// Decode the next code and push its expansion onto the stack
    pub fn fill(&mut self) -> Result<LzwStatus, GifDecoderErrors> {
        loop {
            let code = match self.reader.next_code(self.code_size)? {
                Some(code) => code,
                None => {
                    debug!("LZW data ended before an end code");
                    return Ok(LzwStatus::EndOfImage);
                }
            };

            if code == self.clear_code {
                self.reset();
                continue;
            }
            if code == self.end_code {
                if !self.reader.skip_remaining_blocks() {
                    trace!("End code seen, sub-block terminator not yet buffered");
                }
                return Ok(LzwStatus::EndOfImage);
            }

            let old_code = match self.old_code {
                Some(old_code) => old_code,
                None => {
                    if code > self.clear_code {
                        return Err(GifDecoderErrors::DataError(
                            "LZW stream starts with a dictionary code"
                        ));
                    }
                    self.first_index = self.ctx.suffix[usize::from(code)];
                    self.ctx.stack.push(self.first_index);
                    self.old_code = Some(code);

                    return Ok(LzwStatus::Pixels);
                }
            };

            let mut current = code;

            if code >= self.next_code {
                if code > self.next_code {
                    return Err(GifDecoderErrors::DataError("LZW code not in dictionary"));
                }
                // code being defined right now, it is the old string plus
                // its own first index
                self.ctx.stack.push(self.first_index);
                current = old_code;
            }

            while current >= self.clear_code {
                if self.ctx.stack.len() >= LZW_STACK_SIZE {
                    return Err(GifDecoderErrors::DataError("LZW stack overflow"));
                }
                self.ctx.stack.push(self.ctx.suffix[usize::from(current)]);
                current = self.ctx.prefix[usize::from(current)];
            }
            self.first_index = self.ctx.suffix[usize::from(current)];
            self.ctx.stack.push(self.first_index);

            if usize::from(self.next_code) < LZW_TABLE_SIZE {
                self.ctx.prefix[usize::from(self.next_code)] = old_code;
                self.ctx.suffix[usize::from(self.next_code)] = self.first_index;
                self.next_code += 1;

                if self.next_code >= self.max_code && self.code_size < GIF_MAX_LZW_BITS {
                    self.code_size += 1;
                    self.max_code <<= 1;
                }
            }
            self.old_code = Some(code);

            return Ok(LzwStatus::Pixels);
        }
    }

    /// Pop up to `row.len()` pixels off the stack, mapping them
    /// through `colours`
    ///
    /// Pixels equal to `transparent` leave the destination untouched.
    /// Returns the number of pixels consumed.
    #[inline]
    pub fn burst(&mut self, row: &mut [u32], colours: &[u32], transparent: Option<u8>) -> usize {
        let stack = &mut self.ctx.stack;
        let count = row.len().min(stack.len());
        let start = stack.len() - count;

        for (pixel, index) in row[..count].iter_mut().zip(stack[start..].iter().rev()) {
            if Some(*index) != transparent {
                *pixel = colours[usize::from(*index)];
            }
        }
        stack.truncate(start);

        count
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use nanorand::Rng;

    use crate::errors::GifDecoderErrors;
    use crate::lzw::{CodeReader, LzwContext, LzwDecoder, LzwStatus};

    /// Split a code stream into sub-blocks of at most `block` bytes
    fn into_sub_blocks(min_code_size: u8, stream: &[u8], block: usize) -> Vec<u8> {
        let mut out = vec![min_code_size];
        for chunk in stream.chunks(block) {
            out.push(chunk.len() as u8);
            out.extend_from_slice(chunk);
        }
        out.push(0);
        out
    }

    fn compress(min_code_size: u8, indices: &[u8], block: usize) -> Vec<u8> {
        let stream = weezl::encode::Encoder::new(weezl::BitOrder::Lsb, min_code_size)
            .encode(indices)
            .unwrap();
        into_sub_blocks(min_code_size, &stream, block)
    }

    /// Decode everything, using the index as the colour
    fn decompress(data: &[u8], expected: usize) -> Result<Vec<u8>, GifDecoderErrors> {
        let colours: Vec<u32> = (0..256).collect();
        let mut ctx = LzwContext::new();
        let mut decoder = LzwDecoder::new(&mut ctx, data, 1, data[0])?;
        let mut out = vec![0_u32; expected];
        let mut written = 0;

        while written < expected {
            if decoder.is_empty() && decoder.fill()? == LzwStatus::EndOfImage {
                break;
            }
            written += decoder.burst(&mut out[written..], &colours, None);
        }
        Ok(out[..written].iter().map(|x| *x as u8).collect())
    }

    #[test]
    fn code_reader_crosses_sub_blocks() {
        // 0b101 then 0b110 packed lsb first, split over two blocks
        let data = [1, 0b0011_0101, 1, 0, 0];
        let mut reader = CodeReader::new(&data, 0);

        assert_eq!(reader.next_code(3).unwrap(), Some(0b101));
        assert_eq!(reader.next_code(3).unwrap(), Some(0b110));
        assert_eq!(reader.next_code(12).unwrap(), None);
        assert_eq!(reader.position, 5);
        assert!(matches!(
            reader.next_code(3),
            Err(GifDecoderErrors::DataError(_))
        ));
    }

    #[test]
    fn code_reader_reports_missing_bytes() {
        let data = [3, 0xFF];
        let mut reader = CodeReader::new(&data, 0);

        assert_eq!(reader.next_code(8).unwrap(), Some(0xFF));
        assert!(matches!(
            reader.next_code(8),
            Err(GifDecoderErrors::InsufficientFrameData)
        ));
    }

    #[test]
    fn skip_remaining_blocks_finds_terminator() {
        let data = [2, 0xAA, 0xBB, 1, 0xCC, 0, 0x3B];
        let mut reader = CodeReader::new(&data, 0);

        assert_eq!(reader.next_code(4).unwrap(), Some(0xA));
        assert!(reader.skip_remaining_blocks());
        assert_eq!(reader.position, 6);

        let mut reader = CodeReader::new(&data[..4], 0);
        assert!(!reader.skip_remaining_blocks());
    }

    #[test]
    fn decode_random_indices() {
        let mut rand = nanorand::WyRand::new_seed(0x5EED);

        for (min_code_size, block) in [(2_u8, 255), (4, 7), (8, 255), (8, 1)] {
            let limit = 1_u16 << min_code_size;
            let indices: Vec<u8> = (0..5000)
                .map(|_| rand.generate_range(0..limit) as u8)
                .collect();
            let data = compress(min_code_size, &indices, block);

            assert_eq!(decompress(&data, indices.len()).unwrap(), indices);
        }
    }

    #[test]
    fn decode_long_runs_fill_the_dictionary() {
        // long runs exercise the code defined by the code being read
        // and push the table to 4096 entries
        let mut indices = Vec::new();
        for i in 0..40_000_usize {
            indices.push(((i / 3000) % 4) as u8);
        }
        indices.extend((0..20_000_usize).map(|i| (i * 7 % 4) as u8));

        let data = compress(2, &indices, 255);

        assert_eq!(decompress(&data, indices.len()).unwrap(), indices);
    }

    #[test]
    fn end_code_stops_decoding() {
        // clear(4), 1, end(5) with 3 bit codes
        // bits: 100 001 101 -> 0b1_0100_1100, 0b1
        let data = [2, 2, 0b0100_1100, 0b0000_0001, 0];

        assert_eq!(decompress(&data, 10).unwrap(), vec![1]);
    }

    #[test]
    fn unknown_code_is_an_error() {
        // clear(4), 1, 7 (not yet defined, next code is 6)
        let data = [2, 2, 0b1100_1100, 0b0000_0001, 0];

        assert!(matches!(
            decompress(&data, 10),
            Err(GifDecoderErrors::DataError(_))
        ));
    }

    #[test]
    fn oversized_code_size_is_rejected() {
        let data = [12, 1, 0, 0];
        let mut ctx = LzwContext::new();

        assert!(matches!(
            LzwDecoder::new(&mut ctx, &data, 1, 12),
            Err(GifDecoderErrors::DataError(_))
        ));
    }

    #[test]
    fn truncated_stream_needs_more_data() {
        let indices = [0_u8, 1, 2, 3, 0, 1, 2, 3, 3, 3, 3, 3];
        let data = compress(2, &indices, 255);

        assert!(matches!(
            decompress(&data[..3], indices.len()),
            Err(GifDecoderErrors::InsufficientFrameData)
        ));
    }
}
