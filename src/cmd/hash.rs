use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use rbencode::{decode_with, encode, DecodeOptions};
use sha1::{Digest, Sha1};

use super::{hex_encode, read_input};

#[derive(clap::Args)]
pub struct Args {
    pub path: PathBuf,
    /// Hash only this entry of the top-level dictionary (e.g. `info`).
    #[arg(long)]
    pub key: Option<String>,
}

/// Print the hex SHA-1 of a canonical encoding.
pub fn run(args: Args, max_input: Option<usize>) -> Result<()> {
    let data = read_input(&args.path, max_input)?;
    let options = DecodeOptions {
        max_input_len: max_input,
        ..DecodeOptions::default()
    };

    let digest = hash(&data, args.key.as_deref(), &options)?;
    println!("{}", hex_encode(&digest));
    Ok(())
}

/// SHA-1 over the canonical encoding of the whole value, or of `key` in the
/// top-level dictionary.
///
/// The input itself need not be canonical; hashing the re-encoding makes the
/// digest independent of the original key order.
pub fn hash(data: &[u8], key: Option<&str>, options: &DecodeOptions) -> Result<[u8; 20]> {
    let value = decode_with(data, options).context("input is not a single bencoded value")?;

    let target = match key {
        None => &value,
        Some(key) => {
            let dict = value.as_dict().ok_or_else(|| {
                anyhow!("top-level value is a {}, not a dictionary", value.kind())
            })?;
            dict.get(key.as_bytes())
                .ok_or_else(|| anyhow!("key {key:?} not found in top-level dictionary"))?
        }
    };

    let encoded = encode(target);
    tracing::debug!(len = encoded.len(), kind = target.kind(), "hashing canonical encoding");

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    Ok(hasher.finalize().into())
}
