/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the zune gif decoder
//!
//! It currently contains
//!
//! - A bytestream reader with bounds checked little endian reads over
//!   a buffer that may not be complete yet
//! - Decoder options
//! - A logging shim which forwards to the `log` crate when the `log`
//!   feature is enabled and compiles to nothing otherwise
//!
//! This library is `#[no_std]`.
//!
//! # Features
//!  - `std`: Implements `std::error::Error` for error types
//!
//!  - `log`: Route the logging macros to the [`log`](https://docs.rs/log) facade
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]

pub mod bytestream;
pub mod log;
pub mod options;
