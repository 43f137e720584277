/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::borrow::Cow;

/// Encode a deterministic animation of `frames` frames
///
/// Every frame is a moving diagonal gradient over a 256 colour
/// palette, odd frames only cover the centre of the canvas.
pub fn sample_animation(width: u16, height: u16, frames: usize) -> Vec<u8> {
    let palette: Vec<u8> = (0..=255_u8)
        .flat_map(|i| [i, i.wrapping_mul(3), 255 - i])
        .collect();
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &palette).unwrap();
        encoder.set_repeat(gif::Repeat::Infinite).unwrap();

        for f in 0..frames {
            let (left, top, w, h) = if f % 2 == 0 {
                (0, 0, width, height)
            } else {
                (width / 4, height / 4, width / 2, height / 2)
            };
            let indices: Vec<u8> = (0..usize::from(h))
                .flat_map(|y| (0..usize::from(w)).map(move |x| ((x + y + f * 8) % 256) as u8))
                .collect();

            let mut frame = gif::Frame::default();

            frame.left = left;
            frame.top = top;
            frame.width = w;
            frame.height = h;
            frame.delay = 4;
            frame.dispose = gif::DisposalMethod::Keep;
            frame.buffer = Cow::Owned(indices);

            encoder.write_frame(&frame).unwrap();
        }
    }
    out
}
