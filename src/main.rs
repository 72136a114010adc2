//! # czml-fmt
//!
//! Reads a CZML document on stdin, validates it by loading it through the
//! object model, and writes the normalized document to stdout.
//!
//! ## Usage
//! ```text
//! czml-fmt [--pretty] < input.czml > output.czml
//! czml-fmt --hex <color>
//! ```
//! `--hex` prints the `rgba` channels of a web hex color, using the
//! configured default opacity for colors without an alpha digit pair.
//!
//! Settings come from `czml-config.toml` in the working directory; command
//! line flags override them.

use anyhow::Context;
use czml::color::hexcolor_to_rgba;
use czml::config::Config;
use czml::document::Document;
use std::env;
use std::io::{self, Read, Write};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = Config::load();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    if let Some(pos) = args.iter().position(|arg| arg == "--hex") {
        let text = args
            .get(pos + 1)
            .context("--hex needs a color argument")?;
        let rgba = hexcolor_to_rgba(text, config.colors.default_opacity)
            .with_context(|| format!("cannot read hex color {:?}", text))?;
        println!("{}", serde_json::to_string(&rgba)?);
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--pretty") {
        config.output.pretty = true;
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read CZML from stdin")?;

    let doc: Document = input.parse().context("invalid CZML document")?;
    log::info!("validated {} packets", doc.len());

    let output = doc.dumps_with(&config.output)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output).context("failed to write CZML to stdout")?;
    Ok(())
}

fn print_usage() {
    println!("Usage: czml-fmt [--pretty] < input.czml");
    println!("       czml-fmt --hex <color>");
    println!();
    println!("Options:");
    println!("  --pretty       Indent the output document");
    println!("  --hex <color>  Print the rgba channels of a hex color");
    println!("  -h, --help     Show this message");
}
