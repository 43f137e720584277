/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Writing frames as binary PAM files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use zune_animgif::RgbaBitmap;

pub fn write_pam(path: &Path, image: &RgbaBitmap) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    write!(
        writer,
        "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n",
        image.width(),
        image.height()
    )?;
    writer.write_all(image.as_bytes())?;
    writer.flush()
}
