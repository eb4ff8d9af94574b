use std::fmt::Write as _;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rbencode::{DecodeOptions, Decoder, Value, DEFAULT_MAX_DEPTH};

use super::{hex_encode, read_input};

#[derive(clap::Args)]
pub struct Args {
    pub path: PathBuf,
    /// Byte offset of the first value to decode.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
    /// Longest string prefix printed, in characters (or bytes for binary).
    #[arg(long, default_value_t = 80)]
    pub max_string: usize,
    /// Most list items or dictionary entries printed per container.
    #[arg(long, default_value_t = 32)]
    pub max_items: usize,
}

/// Output truncation limits for printed values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    pub max_string_len: usize,
    pub max_items: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            max_string_len: 80,
            max_items: 32,
        }
    }
}

/// Decode and print every value in the file.
pub fn run(args: Args, max_input: Option<usize>) -> Result<()> {
    let data = read_input(&args.path, max_input)?;
    let options = DecodeOptions {
        max_depth: args.max_depth,
        max_input_len: max_input,
    };
    let print = PrintOptions {
        max_string_len: args.max_string,
        max_items: args.max_items,
    };

    let mut out = BufWriter::new(io::stdout().lock());
    show(&data, args.offset, &options, &print, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes each value found from `offset` onwards, returning how many there were.
pub fn show<W: Write>(
    data: &[u8],
    offset: usize,
    options: &DecodeOptions,
    print: &PrintOptions,
    out: &mut W,
) -> Result<usize> {
    let mut decoder = Decoder::new(data).with_options(*options).at(offset);
    let mut count = 0;

    while !decoder.is_finished() {
        let start = decoder.position();
        let value = decoder
            .decode_next()
            .with_context(|| format!("value #{count} starting at offset {start}"))?;

        writeln!(out, "# value {count} @ {start}..{}", decoder.position())?;
        writeln!(out, "{}", render(&value, print))?;
        count += 1;
    }

    tracing::info!(count, "decoded values");
    Ok(count)
}

/// Renders a value as an indented tree.
pub fn render(value: &Value, print: &PrintOptions) -> String {
    let mut out = String::new();
    render_into(&mut out, value, 0, print);
    out
}

fn render_into(out: &mut String, value: &Value, indent: usize, print: &PrintOptions) {
    match value {
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Bytes(b) => render_string(out, b, print),
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::List(items) => {
            out.push_str("[\n");
            for item in items.iter().take(print.max_items) {
                push_indent(out, indent + 1);
                render_into(out, item, indent + 1, print);
                out.push('\n');
            }
            render_elided(out, items.len(), indent + 1, print);
            push_indent(out, indent);
            out.push(']');
        }
        Value::Dict(entries) if entries.is_empty() => out.push_str("{}"),
        Value::Dict(entries) => {
            out.push_str("{\n");
            for (key, item) in entries.iter().take(print.max_items) {
                push_indent(out, indent + 1);
                render_string(out, key, print);
                out.push_str(": ");
                render_into(out, item, indent + 1, print);
                out.push('\n');
            }
            render_elided(out, entries.len(), indent + 1, print);
            push_indent(out, indent);
            out.push('}');
        }
    }
}

fn render_string(out: &mut String, bytes: &[u8], print: &PrintOptions) {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let shown: String = text.chars().take(print.max_string_len).collect();
            let _ = write!(out, "{shown:?}");
            if shown.len() < text.len() {
                out.push_str("...");
            }
        }
        Err(_) => {
            let shown = &bytes[..bytes.len().min(print.max_string_len)];
            let _ = write!(out, "0x{}", hex_encode(shown));
            if shown.len() < bytes.len() {
                out.push_str("...");
            }
            let _ = write!(out, " ({} bytes)", bytes.len());
        }
    }
}

fn render_elided(out: &mut String, len: usize, indent: usize, print: &PrintOptions) {
    if len > print.max_items {
        push_indent(out, indent);
        let _ = writeln!(out, "... {} more", len - print.max_items);
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}
