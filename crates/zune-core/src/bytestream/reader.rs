/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors that can occur when reading from a [`ZByteReader`]
pub enum ZByteIoError {
    /// Not enough bytes to satisfy a read
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes remaining
    NotEnoughBytes(usize, usize),
    /// Attempt to move the cursor past the end of the stream
    ///
    /// # Arguments
    /// - 1st argument is the requested position
    /// - 2nd argument is the length of the stream
    SeekError(usize, usize),
    Generic(&'static str)
}

impl Debug for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ZByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ZByteIoError::SeekError(position, length) => {
                writeln!(
                    f,
                    "Cannot seek to position {position}, stream length is {length}"
                )
            }
            ZByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZByteIoError {}

impl From<&'static str> for ZByteIoError {
    fn from(value: &'static str) -> Self {
        ZByteIoError::Generic(value)
    }
}

/// A bounds checked cursor over a byte slice
///
/// Reads either succeed fully or fail without moving
/// the cursor, so a failed read can be retried once the
/// caller has a longer slice of the same stream.
#[derive(Copy, Clone)]
pub struct ZByteReader<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ZByteReader<'a> {
    /// Create a new reader positioned at the start of `stream`
    pub const fn new(stream: &'a [u8]) -> ZByteReader<'a> {
        ZByteReader {
            stream,
            position: 0
        }
    }
    /// Create a new reader starting at `position`
    ///
    /// # Errors
    /// If `position` lies past the end of the stream
    pub fn new_at(stream: &'a [u8], position: usize) -> Result<ZByteReader<'a>, ZByteIoError> {
        let mut reader = ZByteReader::new(stream);
        reader.set_position(position)?;
        Ok(reader)
    }
    /// Return the current position of the cursor
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Move the cursor to an absolute position
    ///
    /// The position may be equal to the stream length,
    /// in which case the reader is at EOF
    pub fn set_position(&mut self, position: usize) -> Result<(), ZByteIoError> {
        if position > self.stream.len() {
            return Err(ZByteIoError::SeekError(position, self.stream.len()));
        }
        self.position = position;
        Ok(())
    }
    /// Number of bytes left from the current position
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }
    /// Skip `num` bytes, failing if that would run past the end
    pub fn skip(&mut self, num: usize) -> Result<(), ZByteIoError> {
        if self.remaining() < num {
            return Err(ZByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        self.position += num;
        Ok(())
    }
    /// Return the byte at the current position without
    /// advancing or `None` at EOF
    #[inline(always)]
    pub fn peek_u8(&self) -> Option<u8> {
        self.stream.get(self.position).copied()
    }
    /// Look ahead `offset` bytes and return a reference
    /// to `num_bytes` from that position
    ///
    /// This doesn't move the cursor
    pub fn peek_at(&self, offset: usize, num_bytes: usize) -> Result<&'a [u8], ZByteIoError> {
        let start = self.position.saturating_add(offset);
        let end = start.saturating_add(num_bytes);

        self.stream
            .get(start..end)
            .ok_or(ZByteIoError::NotEnoughBytes(
                offset.saturating_add(num_bytes),
                self.remaining()
            ))
    }
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ZByteIoError> {
        let byte = self
            .peek_u8()
            .ok_or(ZByteIoError::NotEnoughBytes(1, 0))?;
        self.position += 1;
        Ok(byte)
    }
    /// Read a little endian u16
    ///
    /// Returning an error if the underlying buffer cannot support a u16 read
    #[inline]
    pub fn get_u16_le_err(&mut self) -> Result<u16, ZByteIoError> {
        let bytes = self.read_fixed_bytes_or_error::<2>()?;
        Ok(u16::from_le_bytes(bytes))
    }
    /// Read exactly `N` bytes into an array
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ZByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.read_slice(N)?);
        Ok(byte_store)
    }
    /// Borrow the next `num` bytes of the stream and advance past them
    pub fn read_slice(&mut self, num: usize) -> Result<&'a [u8], ZByteIoError> {
        let slice = self.peek_at(0, num)?;
        self.position += num;
        Ok(slice)
    }
}
