/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fixtures shared by the integration tests
#![allow(dead_code)]

use std::borrow::Cow;

use zune_animgif::{GifAnimation, GifDecoderErrors};

pub const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
pub const BLACK: [u8; 3] = [0x00, 0x00, 0x00];
pub const RED: [u8; 3] = [0xFF, 0x00, 0x00];
pub const GREEN: [u8; 3] = [0x00, 0xFF, 0x00];

pub fn pixel(rgb: [u8; 3]) -> u32 {
    zune_animgif::rgba(rgb[0], rgb[1], rgb[2], 0xFF)
}

/// Writes GIF streams byte by byte, for cases the `gif`
/// encoder cannot produce
pub struct GifBuilder {
    data: Vec<u8>
}

/// Colour table flags for `palette`, padding it to a power of two
fn colour_table(palette: &[[u8; 3]]) -> (u8, Vec<u8>) {
    let mut bits = 0;

    while (2 << bits) < palette.len() {
        bits += 1;
    }
    let mut table: Vec<u8> = palette.iter().flatten().copied().collect();
    table.resize((2 << bits) * 3, 0);

    (0x80 | bits, table)
}

/// Rows of an interlaced image in transmission order
fn interlace(indices: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len());

    for (start, step) in [(0, 8), (4, 8), (2, 4), (1, 2)] {
        for y in (start..height).step_by(step) {
            out.extend_from_slice(&indices[y * width..(y + 1) * width]);
        }
    }
    out
}

/// LZW compress `indices` into GIF sub-blocks, including the
/// minimum code size byte and the terminator
pub fn lzw_sub_blocks(min_code_size: u8, indices: &[u8]) -> Vec<u8> {
    let stream = weezl::encode::Encoder::new(weezl::BitOrder::Lsb, min_code_size)
        .encode(indices)
        .unwrap();

    let mut out = vec![min_code_size];
    for chunk in stream.chunks(255) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
    out.push(0);
    out
}

impl GifBuilder {
    pub fn new(width: u16, height: u16, palette: &[[u8; 3]]) -> GifBuilder {
        let mut data = b"GIF89a".to_vec();

        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());

        if palette.is_empty() {
            data.extend_from_slice(&[0, 0, 0]);
        } else {
            let (flags, table) = colour_table(palette);
            data.extend_from_slice(&[flags, 0, 0]);
            data.extend_from_slice(&table);
        }
        GifBuilder { data }
    }

    pub fn raw(mut self, bytes: &[u8]) -> GifBuilder {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn graphic_control(mut self, disposal: u8, delay: u16, transparent: Option<u8>) -> GifBuilder {
        let flags = (disposal << 2) | u8::from(transparent.is_some());
        let [lo, hi] = delay.to_le_bytes();

        self.data.extend_from_slice(&[
            0x21,
            0xF9,
            4,
            flags,
            lo,
            hi,
            transparent.unwrap_or(0),
            0
        ]);
        self
    }

    pub fn application(mut self, identifier: &[u8; 11], count: u16) -> GifBuilder {
        let [lo, hi] = count.to_le_bytes();

        self.data.extend_from_slice(&[0x21, 0xFF, 11]);
        self.data.extend_from_slice(identifier);
        self.data.extend_from_slice(&[3, 1, lo, hi, 0]);
        self
    }

    pub fn loop_count(self, count: u16) -> GifBuilder {
        self.application(b"NETSCAPE2.0", count)
    }

    pub fn comment(mut self, text: &[u8]) -> GifBuilder {
        self.data.extend_from_slice(&[0x21, 0xFE, text.len() as u8]);
        self.data.extend_from_slice(text);
        self.data.push(0);
        self
    }

    /// Add an image block, `indices` are in display order
    pub fn image(
        mut self, (x, y, width, height): (u16, u16, u16, u16), indices: &[u8], interlaced: bool,
        local_palette: Option<&[[u8; 3]]>
    ) -> GifBuilder {
        assert_eq!(indices.len(), usize::from(width) * usize::from(height));

        let mut flags = if interlaced { 0x40 } else { 0 };
        let mut table = Vec::new();

        if let Some(palette) = local_palette {
            let (table_flags, entries) = colour_table(palette);
            flags |= table_flags;
            table = entries;
        }
        self.data.push(0x2C);
        for field in [x, y, width, height] {
            self.data.extend_from_slice(&field.to_le_bytes());
        }
        self.data.push(flags);
        self.data.extend_from_slice(&table);

        let indices = if interlaced {
            interlace(indices, usize::from(width), usize::from(height))
        } else {
            indices.to_vec()
        };
        let min_code_size = if indices.iter().all(|x| *x < 4) { 2 } else { 8 };

        self.data
            .extend_from_slice(&lzw_sub_blocks(min_code_size, &indices));
        self
    }

    pub fn trailer(mut self) -> GifBuilder {
        self.data.push(0x3B);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// A frame for the `gif` crate encoder
pub struct EncodeFrame {
    pub rect:        (u16, u16, u16, u16),
    pub indices:     Vec<u8>,
    pub delay:       u16,
    pub dispose:     gif::DisposalMethod,
    pub transparent: Option<u8>,
    pub interlaced:  bool,
    pub palette:     Option<Vec<u8>>
}

impl EncodeFrame {
    pub fn new(rect: (u16, u16, u16, u16), indices: Vec<u8>) -> EncodeFrame {
        EncodeFrame {
            rect,
            indices,
            delay: 10,
            dispose: gif::DisposalMethod::Keep,
            transparent: None,
            interlaced: false,
            palette: None
        }
    }
}

/// Encode an animation with the `gif` crate
pub fn encode_gif(
    width: u16, height: u16, palette: &[[u8; 3]], repeat: Option<u16>, frames: &[EncodeFrame]
) -> Vec<u8> {
    let global: Vec<u8> = palette.iter().flatten().copied().collect();
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &global).unwrap();

        if let Some(count) = repeat {
            encoder.set_repeat(gif::Repeat::Finite(count)).unwrap();
        }
        for frame in frames {
            let (left, top, w, h) = frame.rect;
            let mut output = gif::Frame::default();

            output.left = left;
            output.top = top;
            output.width = w;
            output.height = h;
            output.delay = frame.delay;
            output.dispose = frame.dispose;
            output.transparent = frame.transparent;
            output.interlaced = frame.interlaced;
            output.palette = frame.palette.clone();
            output.buffer = Cow::Borrowed(frame.indices.as_slice());

            encoder.write_frame(&output).unwrap();
        }
    }
    out
}

/// Compose every frame with the `gif` crate, applying disposal the
/// same way (restore previous clears the area)
pub fn reference_frames(data: &[u8]) -> Vec<Vec<u8>> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);

    let mut decoder = options.read_info(data).unwrap();
    let stride = usize::from(decoder.width());
    let height = usize::from(decoder.height());

    let mut canvas = vec![0_u8; stride * height * 4];
    let mut dispose: Option<(usize, usize, usize, usize)> = None;
    let mut frames = Vec::new();

    while let Some(frame) = decoder.read_next_frame().unwrap() {
        if let Some((x, y, w, h)) = dispose.take() {
            for row in y..y + h {
                let start = (row * stride + x) * 4;
                canvas[start..start + w * 4].fill(0);
            }
        }
        let (x, y) = (usize::from(frame.left), usize::from(frame.top));
        let (w, h) = (usize::from(frame.width), usize::from(frame.height));

        for row in 0..h {
            for col in 0..w {
                let source = &frame.buffer[(row * w + col) * 4..][..4];

                if source[3] != 0 {
                    let start = ((y + row) * stride + x + col) * 4;
                    canvas[start..start + 4].copy_from_slice(source);
                }
            }
        }
        frames.push(canvas.clone());

        if matches!(
            frame.dispose,
            gif::DisposalMethod::Background | gif::DisposalMethod::Previous
        ) {
            dispose = Some((x, y, w, h));
        }
    }
    frames
}

/// Index `data` in one go, panicking unless the trailer is reached
pub fn index_all(data: &[u8]) -> GifAnimation {
    let mut animation = GifAnimation::new();
    animation.index(data).unwrap();
    animation
}

/// Decode every frame as RGBA bytes
pub fn decode_all(data: &[u8]) -> Vec<Vec<u8>> {
    let mut animation = index_all(data);

    (0..animation.frame_count())
        .map(|frame| {
            animation.decode_frame(data, frame).unwrap();
            animation.frame_image().unwrap().as_bytes().to_vec()
        })
        .collect()
}

pub fn is_recoverable(result: Result<(), GifDecoderErrors>) -> bool {
    matches!(result, Err(err) if err.is_recoverable())
}
