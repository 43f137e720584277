/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

/// Possible errors that may occur while indexing or decoding
///
/// [`InsufficientData`](GifDecoderErrors::InsufficientData) and
/// [`InsufficientFrameData`](GifDecoderErrors::InsufficientFrameData) are not
/// fatal, call again once more bytes have arrived.
pub enum GifDecoderErrors {
    /// File is not a gif
    NotAGif,
    /// Not enough bytes to make progress, no frame is
    /// partially buffered
    InsufficientData,
    /// The buffer ends inside a frame, frames before it
    /// remain usable
    InsufficientFrameData,
    /// A frame does not start with an extension,
    /// image descriptor or trailer
    FrameDataError(&'static str),
    /// Structural corruption in the stream
    DataError(&'static str),
    /// Allocating the frame buffer or frame index failed
    ///
    /// The argument is the number of bytes requested
    MemoryError(usize),
    /// Too large dimensions for width or height
    TooLargeDimensions(&'static str, usize, usize),
    /// Underlying input output errors
    IoErrors(ZByteIoError)
}

impl GifDecoderErrors {
    /// Whether the operation can be retried with more data
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GifDecoderErrors::InsufficientData | GifDecoderErrors::InsufficientFrameData
        )
    }
}

impl Debug for GifDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            GifDecoderErrors::NotAGif => {
                writeln!(f, "Not a gif, magic bytes didn't match")
            }
            GifDecoderErrors::InsufficientData => {
                writeln!(f, "Insufficient data, try again with more bytes")
            }
            GifDecoderErrors::InsufficientFrameData => {
                writeln!(f, "Insufficient frame data, the stream ends inside a frame")
            }
            GifDecoderErrors::FrameDataError(v) => {
                writeln!(f, "Frame data error: {v}")
            }
            GifDecoderErrors::DataError(v) => {
                writeln!(f, "Data error: {v}")
            }
            GifDecoderErrors::MemoryError(size) => {
                writeln!(f, "Could not allocate {size} bytes")
            }
            GifDecoderErrors::TooLargeDimensions(a, b, c) => {
                writeln!(
                    f,
                    "Too large dimensions for {a} expected less than {b} but found {c}"
                )
            }
            GifDecoderErrors::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for GifDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GifDecoderErrors {}

impl From<&'static str> for GifDecoderErrors {
    fn from(value: &'static str) -> Self {
        Self::DataError(value)
    }
}

impl From<ZByteIoError> for GifDecoderErrors {
    fn from(value: ZByteIoError) -> Self {
        GifDecoderErrors::IoErrors(value)
    }
}
