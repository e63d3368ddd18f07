mod args;

use anyhow::Result;
use args::Args;
use clap::Parser;
use dot_qr::{ImageFormat, QrOptions, QrRenderer, Size};
use std::fs;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = QrOptions::new(&args.text);
    options.version = args.version_spec();
    options.ec_level = args.error_correction.clone().into();
    options.dark = args.dark;
    options.background = args.background;
    options.gapless = args.gapless;

    println!("Rendering QR code for: {}", args.text);
    let renderer = QrRenderer::try_new(options)?;

    let png = renderer.to_image_data(Size::square(args.size), ImageFormat::Png)?;
    fs::write(&args.output, png)?;

    println!("Saved to: {}", args.output.display());
    Ok(())
}
