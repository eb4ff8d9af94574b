use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rbencode::{decode_with, encode, encode_to, DecodeOptions, Value};

use super::read_input;

#[derive(clap::Args)]
pub struct Args {
    pub path: PathBuf,
    /// Write here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Re-encode a file's single value in canonical form.
pub fn run(args: Args, max_input: Option<usize>) -> Result<()> {
    let data = read_input(&args.path, max_input)?;
    let options = DecodeOptions {
        max_input_len: max_input,
        ..DecodeOptions::default()
    };
    let (value, _) = canonicalize(&data, &options)?;

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            encode_to(&value, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            encode_to(&value, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Decodes `data` and reports whether it was already canonical.
pub fn canonicalize(data: &[u8], options: &DecodeOptions) -> Result<(Value, bool)> {
    let value = decode_with(data, options).context("input is not a single bencoded value")?;

    let canonical = encode(&value);
    let was_canonical = canonical == data;
    if was_canonical {
        tracing::debug!(len = data.len(), "input already canonical");
    } else {
        tracing::info!(
            input_len = data.len(),
            output_len = canonical.len(),
            "input rewritten to canonical form"
        );
    }

    Ok((value, was_canonical))
}
