/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Signature + version + logical screen descriptor
pub const GIF_HEADER_SIZE: usize = 13;

pub const GIF_EXTENSION_INTRODUCER: u8 = 0x21;
pub const GIF_IMAGE_SEPARATOR: u8 = 0x2C;
pub const GIF_TRAILER: u8 = 0x3B;

pub const GIF_EXTENSION_GRAPHIC_CONTROL: u8 = 0xF9;
pub const GIF_EXTENSION_APPLICATION: u8 = 0xFF;

pub const GIF_COLOUR_TABLE_MASK: u8 = 0x80;
pub const GIF_COLOUR_TABLE_SIZE_MASK: u8 = 0x07;
pub const GIF_INTERLACE_MASK: u8 = 0x40;
pub const GIF_TRANSPARENCY_MASK: u8 = 0x01;
pub const GIF_DISPOSAL_MASK: u8 = 0x1C;

/// Image descriptor without the separator byte
pub const GIF_IMAGE_DESCRIPTOR_SIZE: usize = 9;

pub const GIF_MAX_COLOURS: usize = 256;

/// Guard against corrupt files claiming absurd frame counts
pub const GIF_MAX_FRAMES: usize = 4096;

/// Delay (in 1/100s) for frames without a graphic control extension
pub const GIF_DEFAULT_FRAME_DELAY: u16 = 100;

pub const GIF_MAX_LZW_BITS: u8 = 12;

/// Application extensions carrying a loop count
pub const GIF_LOOP_EXTENSIONS: [&[u8; 11]; 2] = [b"NETSCAPE2.0", b"ANIMEXTS1.0"];

/// Logical screen sizes that broken encoders copy from the monitor
pub const GIF_SUSPICIOUS_SCREEN_SIZES: [(usize, usize); 6] = [
    (640, 480),
    (640, 512),
    (800, 600),
    (1024, 768),
    (1280, 1024),
    (1600, 1200)
];

pub const GIF_SUSPICIOUS_MAX_DIMENSION: usize = 2048;
