/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::constants::GIF_DEFAULT_FRAME_DELAY;
use crate::enums::DisposalMethod;

/// A rectangle on the canvas
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    pub x:      usize,
    pub y:      usize,
    pub width:  usize,
    pub height: usize
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Rect {
        Rect {
            x,
            y,
            width,
            height
        }
    }
    /// One past the last column covered
    pub const fn right(&self) -> usize {
        self.x + self.width
    }
    /// One past the last row covered
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest rectangle covering both, empty rectangles are ignored
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);

        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y
        )
    }
}

/// One image descriptor and its pixel data
///
/// Offsets are absolute positions in the caller's buffer.
#[derive(Clone, Debug)]
pub(crate) struct ImageBlock {
    pub(crate) rect:               Rect,
    pub(crate) interlaced:         bool,
    /// offset and number of entries of the local colour table
    pub(crate) local_colour_table: Option<(usize, usize)>,
    pub(crate) transparent_index:  Option<u8>,
    /// offset of the LZW minimum code size byte
    pub(crate) data_offset:        usize
}

/// Index record of one logical frame
///
/// A logical frame is usually a single image block, but image
/// blocks separated by a zero delay are displayed together and
/// share one record.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GifFrame {
    pub(crate) offset:      usize,
    pub(crate) delay:       u16,
    pub(crate) disposal:    DisposalMethod,
    pub(crate) image_rect:  Rect,
    pub(crate) redraw_rect: Rect,
    pub(crate) transparent: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) blocks:      Vec<ImageBlock>,
    /// `None` until the frame is decoded the first time
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) opaque:      Option<bool>
}

impl GifFrame {
    pub(crate) fn new(offset: usize) -> GifFrame {
        GifFrame {
            offset,
            delay: GIF_DEFAULT_FRAME_DELAY,
            disposal: DisposalMethod::None,
            image_rect: Rect::default(),
            redraw_rect: Rect::default(),
            transparent: false,
            blocks: Vec::new(),
            opaque: None
        }
    }

    pub(crate) fn push_block(&mut self, block: ImageBlock) {
        self.image_rect = self.image_rect.union(&block.rect);
        self.redraw_rect = self.image_rect;
        self.transparent |= block.transparent_index.is_some();
        self.blocks.push(block);
    }

    /// Byte offset of the first record belonging to this frame
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Display time in hundredths of a second
    pub const fn delay(&self) -> u16 {
        self.delay
    }

    pub const fn disposal(&self) -> DisposalMethod {
        self.disposal
    }

    /// Bounding box of the image blocks making up this frame
    pub const fn image_rect(&self) -> Rect {
        self.image_rect
    }

    /// Area of the canvas that changes when this frame is shown
    ///
    /// This covers the frame's own images and the area of the
    /// previous frame when that frame had to be restored.
    pub const fn redraw_rect(&self) -> Rect {
        self.redraw_rect
    }

    /// Number of image blocks merged into this frame
    pub fn num_images(&self) -> usize {
        self.blocks.len()
    }

    /// Whether any image block declares a transparent index
    pub const fn has_transparency(&self) -> bool {
        self.transparent
    }

    /// Whether the composed frame was fully opaque, `None`
    /// if the frame has not been decoded yet
    pub const fn is_opaque(&self) -> Option<bool> {
        self.opaque
    }
}

#[cfg(test)]
mod tests {
    use crate::frame::Rect;

    #[test]
    fn union_ignores_empty_rects() {
        let a = Rect::new(2, 2, 2, 2);
        let b = Rect::new(0, 1, 1, 1);

        assert_eq!(a.union(&b), Rect::new(0, 1, 4, 3));
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&b), b);
    }
}
