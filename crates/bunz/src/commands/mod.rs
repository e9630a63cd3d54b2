pub mod pack;
pub mod unpack;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Pack a directory into a BUNZ archive
    Pack(pack::PackArgs),
    /// Unpack a BUNZ archive into a directory
    Unpack(unpack::UnpackArgs),
}

impl Commands {
    /// Run the command, logging every file when `verbose` is set
    pub fn handle(&self, verbose: bool) -> miette::Result<()> {
        match self {
            Commands::Pack(pack) => pack.handle(verbose),
            Commands::Unpack(unpack) => unpack.handle(verbose),
        }
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::Commands;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        TestCli::try_parse_from(std::iter::once("bunz").chain(args.iter().copied()))
            .expect("arguments should parse")
            .command
    }

    #[test]
    fn pack_then_unpack() -> miette::Result<()> {
        let scratch = tempfile::tempdir().expect("temporary directory");
        let source = scratch.path().join("source");
        std::fs::create_dir_all(source.join("sub")).expect("create source");
        std::fs::write(source.join("a.txt"), "hi").expect("write a.txt");
        std::fs::write(source.join("sub").join("b.txt"), "").expect("write b.txt");

        let archive = scratch.path().join("source.bunz");
        let output = scratch.path().join("restored");

        parse(&[
            "pack",
            source.to_str().expect("utf-8 path"),
            "--output",
            archive.to_str().expect("utf-8 path"),
            "--level",
            "3",
        ])
        .handle(true)?;

        parse(&[
            "unpack",
            archive.to_str().expect("utf-8 path"),
            "-o",
            output.to_str().expect("utf-8 path"),
        ])
        .handle(false)?;

        assert_eq!(
            std::fs::read(output.join("a.txt")).expect("read a.txt"),
            b"hi"
        );
        assert!(output.join("sub").join("b.txt").is_file());

        Ok(())
    }

    #[test]
    fn missing_directory_fails() {
        let scratch = tempfile::tempdir().expect("temporary directory");
        let missing = scratch.path().join("missing");

        let result = parse(&["pack", missing.to_str().expect("utf-8 path")]).handle(false);
        assert!(result.is_err());
    }
}
