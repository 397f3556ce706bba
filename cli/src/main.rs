use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use bdecode::{decode_partial, DecodeOptions, Document, RenderOptions};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bdecode", version, about = "Inspect bencoded data")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Maximum container nesting depth.
    #[arg(long, value_name = "number", default_value_t = bdecode::constants::DEFAULT_DEPTH_LIMIT)]
    depth_limit: usize,

    /// Maximum number of tokens to scan.
    #[arg(long, value_name = "number", default_value_t = bdecode::constants::DEFAULT_TOKEN_LIMIT)]
    token_limit: usize,

    /// Render the whole tree on one line, abbreviating long strings.
    #[arg(long)]
    single_line: bool,

    /// Print the tree as JSON instead of the debug rendering.
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

/// Prints whatever could be decoded, then fails with the decode error, if any.
fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let input = read_input(args.input.as_deref())?;
    let options = DecodeOptions::new()
        .with_depth_limit(args.depth_limit)
        .with_token_limit(args.token_limit);

    let (document, error) = decode_partial(&input, &options);
    if let Some(soft) = document.soft_error() {
        eprintln!("WARN  {soft}");
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_document(&mut handle, &document, &args)?;
    handle.flush()?;
    match error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn write_document(
    writer: &mut dyn Write,
    document: &Document<'_>,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    if args.json {
        if args.single_line {
            serde_json::to_writer(&mut *writer, document)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, document)?;
        }
    } else {
        let options = RenderOptions::new().with_single_line(args.single_line);
        let rendered = bdecode::render_debug_with(&document.root(), &options);
        writer.write_all(rendered.as_bytes())?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

fn read_input(input: Option<&str>) -> Result<Vec<u8>, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read(path)?),
    }
}
