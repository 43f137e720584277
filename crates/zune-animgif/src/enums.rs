/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Different GIF disposal methods
///
/// Describes what happens to the area a frame covered
/// before the next frame is drawn.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DisposalMethod {
    /// No disposal specified, the frame stays
    #[default]
    None,
    /// Leave the frame in place
    Keep,
    /// Clear the frame area to the background (transparent)
    Background,
    /// Restore the area to what it was before the frame
    Previous
}

impl DisposalMethod {
    /// Convert the 3 disposal bits of a graphic control extension
    ///
    /// Some old encoders write `4` for restore previous,
    /// values above that are reserved and mean no disposal.
    pub fn from_flags(value: u8) -> DisposalMethod {
        match value {
            1 => DisposalMethod::Keep,
            2 => DisposalMethod::Background,
            3 | 4 => DisposalMethod::Previous,
            _ => DisposalMethod::None
        }
    }
    /// Whether the display must be restored once this frame
    /// has been shown
    pub const fn requires_restore(self) -> bool {
        matches!(self, DisposalMethod::Background | DisposalMethod::Previous)
    }
}

/// What the compositor does with a frame
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum CompositeMode {
    /// Decode pixels into the frame buffer
    Decode,
    /// Only clear the areas the frame covered
    ClearOnly
}

/// Progress of the structural parser
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ParseState {
    /// Nothing parsed yet
    Header,
    /// Header parsed, global colour table pending
    GlobalColourTable,
    /// Indexing frames
    Frames,
    /// Trailer reached
    Complete
}
