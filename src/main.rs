// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

mod args;

use args::{Cli, Commands, CommonArgs};
use clap::Parser;

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use rc5_fixed::batch::{self, Mode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rc5(#[from] rc5_fixed::Error),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    match rc5_cli(args.command) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn rc5_cli(command: Commands) -> Result<String, CliError> {
    let (common, mode) = match command {
        Commands::Encrypt(common) => (common, Mode::Encrypt),
        Commands::Decrypt(common) => (common, Mode::Decrypt),
    };

    let key = read_key(&common)?;
    let text = read_input(&common)?;
    let words = batch::parse_words(&text)?;

    log::info!("read {} words", words.len());

    Ok(batch::run(&words, &key, mode)?)
}

fn read_key(common: &CommonArgs) -> Result<rc5_fixed::Key, CliError> {
    let text = match (&common.key, &common.key_file) {
        (Some(hex), _) => hex.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        // clap requires one of the two
        (None, None) => String::new(),
    };
    Ok(batch::parse_key(&text)?)
}

fn read_input(common: &CommonArgs) -> Result<String, CliError> {
    match &common.input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
