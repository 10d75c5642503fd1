//! Defines the command-line arguments for the overlay-mosaic CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::Profile;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "overlay-mosaic",
    version,
    about = "Annotates overlay mosaic crochet rows with the stitch each segment starts on."
)]
pub struct MosaicArgs {
    /// The delimited pattern file to annotate.
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input layout preset.
    #[arg(long, value_enum, default_value_t = Profile::TabbedOptionalFields)]
    pub profile: Profile,

    /// YAML or JSON file overriding the profile's settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write here instead of `<input stem>_output.txt`.
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the annotated rows instead of writing a file.
    #[arg(long)]
    pub stdout: bool,

    /// Leave out rows with malformed segments instead of stopping.
    #[arg(long)]
    pub skip_malformed: bool,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
