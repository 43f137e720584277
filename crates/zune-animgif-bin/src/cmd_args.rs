/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("zune-animgif")
        .about("Index an animated gif, print its frames and optionally dump them")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input gif to read data from")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("chunk")
            .long("chunk")
            .help("Feed the decoder this many bytes at a time")
            .long_help("Simulate data arriving over a network by indexing the file in pieces of this size.\nDefaults to the whole file at once.")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("dump")
            .long("dump")
            .help("Write every decoded frame into this directory as a PAM file")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding process"))
}
