//! asm32 – 32-bit fixed-width ISA assembler (CLI)

use anyhow::{Result, bail};
use clap::Parser;
use std::{fs, fs::File, io::Write, path::Path, path::PathBuf};

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about = "32-bit fixed-width ISA assembler")]
struct Cli {
    /// Input ASM source
    input: PathBuf,

    /// Optional output BIN file (big-endian 32-bit words)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let src = fs::read_to_string(&cli.input)?;
    let listing = asm32::assemble(&src);

    print!("{}", listing.render());

    for (line_no, text, err) in listing.errors() {
        eprintln!("{}:{line_no}: {err}\n    {text}", cli.input.display());
    }
    if listing.has_errors() {
        bail!("assembly failed");
    }

    if let Some(out) = &cli.output {
        let words = listing.words();
        write_bin(out, &words)?;
        println!("wrote {} word(s) to {}", words.len(), out.display());
    }
    Ok(())
}

/// Save the encoded words, big-endian, one after another.
fn write_bin<P: AsRef<Path>>(path: P, words: &[u32]) -> Result<()> {
    let mut f = File::create(path)?;
    for w in words {
        f.write_all(&w.to_be_bytes())?;
    }
    Ok(())
}
