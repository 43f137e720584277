/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::{debug, info, warn};
use zune_animgif::{GifAnimation, GifDecoderErrors};
use zune_core::options::DecoderOptions;

use crate::pam::write_pam;
use crate::serde::Metadata;

#[derive(Debug)]
pub enum WorkflowError {
    Io(std::io::Error),
    Gif(GifDecoderErrors),
    Json(serde_json::Error)
}

impl From<std::io::Error> for WorkflowError {
    fn from(value: std::io::Error) -> Self {
        WorkflowError::Io(value)
    }
}

impl From<GifDecoderErrors> for WorkflowError {
    fn from(value: GifDecoderErrors) -> Self {
        WorkflowError::Gif(value)
    }
}

impl From<serde_json::Error> for WorkflowError {
    fn from(value: serde_json::Error) -> Self {
        WorkflowError::Json(value)
    }
}

/// Index the input as if it arrived `chunk` bytes at a time
fn index_in_chunks(
    animation: &mut GifAnimation, data: &[u8], chunk: usize
) -> Result<(), GifDecoderErrors> {
    let mut end: usize = 0;

    loop {
        end = end.saturating_add(chunk).min(data.len());

        match animation.index(&data[..end]) {
            Ok(()) => return Ok(()),
            Err(err) if err.is_recoverable() && end < data.len() => {
                debug!(
                    "{} bytes: {} frames indexed, {} started",
                    end,
                    animation.frame_count(),
                    animation.frame_count_partial()
                );
            }
            Err(err) => return Err(err)
        }
    }
}

pub fn run(args: &ArgMatches) -> Result<(), WorkflowError> {
    let Some(input) = args.get_one::<PathBuf>("in") else {
        return Ok(());
    };
    let data = std::fs::read(input)?;
    let chunk = args
        .get_one::<usize>("chunk")
        .copied()
        .unwrap_or(data.len())
        .max(1);

    info!("Reading {:?} in chunks of {} bytes", input, chunk);

    let mut animation: GifAnimation = GifAnimation::new_with_options(DecoderOptions::new_cmd());

    match index_in_chunks(&mut animation, &data, chunk) {
        Ok(()) => (),
        // a truncated file is still worth showing
        Err(err) if err.is_recoverable() => {
            warn!("File ends before the trailer: {:?}", err);
        }
        Err(err) if animation.frame_count() > 0 => {
            warn!(
                "Stopped indexing after {} frames: {:?}",
                animation.frame_count(),
                err
            );
        }
        Err(err) => return Err(err.into())
    }

    let metadata = Metadata::new(input.clone().into_os_string(), data.len(), &animation);
    println!("{}", serde_json::to_string_pretty(&metadata)?);

    if let Some(directory) = args.get_one::<PathBuf>("dump") {
        std::fs::create_dir_all(directory)?;

        for frame in 0..animation.frame_count() {
            animation.decode_frame(&data, frame)?;

            if let Some(image) = animation.frame_image() {
                let path = directory.join(format!("frame_{frame:04}.pam"));

                info!("Writing {:?}", path);
                write_pam(&path, image)?;
            }
        }
    }
    Ok(())
}
