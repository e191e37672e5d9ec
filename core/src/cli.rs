use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

const LONG_ABOUT: &str = "\
hearth is the build system for emberOS. It simplifies creating a bootable \
image and is the recommended way of building from sources.

Building works similar to meson: first a build directory must be configured \
by running 'hearth configure ...', then the sources can be built using \
'hearth build ...'.

A build is divided into a series of build steps, where each step must be \
successful for the overall build to succeed.";

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Validate a configuration and create the build directory")]
    Configure {
        #[arg(
            value_name = "CONFIG",
            help = "Path to a hearth configuration file"
        )]
        config: PathBuf,
    },

    #[command(about = "Run the build pipeline for a configured architecture and build type")]
    Build {
        #[arg(help = "Target architecture (x86_64)")]
        arch: String,

        #[arg(value_name = "BUILD", help = "Build type (release, debug, test, ci)")]
        build: String,
    },
}
