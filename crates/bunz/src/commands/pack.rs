use bunz_archive::{pack, CompressionLevel, PackOptions};
use clap::Args;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;

#[derive(Args)]
pub struct PackArgs {
    /// An input directory
    #[arg(value_name = "DIR")]
    directory: PathBuf,

    /// A target BUNZ file, defaults to `<DIR name>.bunz`
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compression level from 1 (fastest) to 9 (smallest)
    #[arg(short, long, default_value_t = CompressionLevel::DEFAULT.get())]
    level: u32,
}

impl PackArgs {
    pub fn handle(&self, verbose: bool) -> Result<()> {
        let options = PackOptions::builder()
            .level(self.level)
            .verbose(verbose)
            .build();

        let stats = pack(&self.directory, self.output.as_deref(), &options)
            .context(format!("packing {}", self.directory.display()))?;

        println!(
            "{} {}",
            "packed".if_supports_color(Stream::Stdout, |text| text.green()),
            stats
        );
        Ok(())
    }
}
