/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An incremental GIF animation decoder
//!
//! The decoder is built for data arriving over a network, it can be
//! handed a buffer that grows between calls and picks up where it
//! left off without scanning bytes it has already indexed.
//!
//! # Features
//! - GIF87a and GIF89a
//! - Incremental indexing of frames as data arrives
//! - Frame disposal, transparency and interlacing
//! - Decoding into a caller supplied surface via [`GifBitmap`]
//! - `no_std`
//!
//! # Example
//! ```
//! use zune_animgif::GifAnimation;
//!
//! fn frames_so_far(animation: &mut GifAnimation, data: &[u8]) -> usize {
//!     match animation.index(data) {
//!         Ok(()) => animation.frame_count(),
//!         Err(err) if err.is_recoverable() => animation.frame_count(),
//!         Err(_) => 0
//!     }
//! }
//!
//! let mut animation = GifAnimation::new();
//! assert_eq!(frames_so_far(&mut animation, b"GIF89a"), 0);
//! ```
//!
//! ## `no_std`
//! You can use `no_std` with alloc feature to compile for `no_std` endpoints

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use bitmap::{alpha, rgba, GifBitmap, RgbaBitmap};
pub use decoder::GifAnimation;
pub use enums::DisposalMethod;
pub use errors::GifDecoderErrors;
pub use frame::{GifFrame, Rect};
pub use zune_core;

mod bitmap;
mod compositor;
mod constants;
mod decoder;
mod enums;
mod errors;
mod frame;
mod indexer;
mod lzw;
