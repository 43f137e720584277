/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use zune_animgif::{GifAnimation, GifFrame};

pub struct Metadata<'a> {
    file:      OsString,
    size:      usize,
    animation: &'a GifAnimation
}

impl<'a> Metadata<'a> {
    pub fn new(file: OsString, size: usize, animation: &'a GifAnimation) -> Metadata<'a> {
        Metadata {
            file,
            size,
            animation
        }
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let animation = self.animation;
        let frames: &[GifFrame] = &animation.frames()[..animation.frame_count()];

        let mut state = serializer.serialize_struct("AnimationMetadata", 9)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("file_size", &self.size)?;
        state.serialize_field("width", &animation.width())?;
        state.serialize_field("height", &animation.height())?;
        state.serialize_field("loop_count", &animation.loop_count())?;
        state.serialize_field("background_index", &animation.background_index())?;
        state.serialize_field("global_colours", &animation.global_colour_table().len())?;
        state.serialize_field("complete", &animation.is_complete())?;
        state.serialize_field("frames", frames)?;

        state.end()
    }
}
