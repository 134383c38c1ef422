// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt hex words, two per block
    Encrypt(CommonArgs),

    /// Decrypt hex words, two per block
    Decrypt(CommonArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("key_source").required(true).args(["key", "key_file"])))]
pub struct CommonArgs {
    /// Key as 32 hex digits, first byte first
    #[arg(short = 'k', long = "key", value_name = "HEX")]
    pub key: Option<String>,

    /// File holding the key as 32 hex digits
    #[arg(long = "key-file", value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// File of whitespace separated hex words (stdin when absent)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
}
