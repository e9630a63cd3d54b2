use bunz_archive::{unpack, unpack::has_archive_extension, UnpackOptions};
use clap::Args;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;
use tracing::warn;

#[derive(Args)]
pub struct UnpackArgs {
    /// An input BUNZ file
    #[arg(value_name = "FILE")]
    archive: PathBuf,

    /// A target directory, defaults to the archive name without its extension
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl UnpackArgs {
    pub fn handle(&self, verbose: bool) -> Result<()> {
        if !has_archive_extension(&self.archive) {
            warn!("{} does not end in .bunz", self.archive.display());
        }

        let stats = unpack(
            &self.archive,
            self.output.as_deref(),
            &UnpackOptions::builder().verbose(verbose).build(),
        )
        .context(format!("unpacking {}", self.archive.display()))?;

        println!(
            "{} {}",
            "unpacked".if_supports_color(Stream::Stdout, |text| text.green()),
            stats
        );
        Ok(())
    }
}
