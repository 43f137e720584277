/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::workflow::run;

mod cmd_args;
mod logger;
mod pam;
mod serde;
mod workflow;

fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    logger::setup_logger(&options);

    if let Err(err) = run(&options) {
        println!();
        error!(" Could not inspect animation, reason {:?}", err);
        println!();
        exit(-1);
    }
}
