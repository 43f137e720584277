/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! with bounds checked reads over borrowed data.
//!
//! The reader never owns the buffer, which lets a decoder
//! keep its own cursor between calls while the caller grows
//! the underlying buffer as more data arrives.
pub use reader::*;

mod reader;
