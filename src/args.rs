use clap::{Parser, ValueEnum};
use dot_qr::VersionSpec;
use image::Rgba;
use qrcode::EcLevel;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Debug)]
#[clap(rename_all = "UPPER")]
pub enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for EcLevel {
    fn from(v: EcArg) -> Self {
        match v {
            EcArg::L => EcLevel::L,
            EcArg::M => EcLevel::M,
            EcArg::Q => EcLevel::Q,
            EcArg::H => EcLevel::H,
        }
    }
}

/// Accepts #RRGGBB or #RRGGBBAA, with or without the leading '#'.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 && hex.len() != 8 {
        return Err(format!("expected #RRGGBB or #RRGGBBAA, got '{s}'"));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color '{s}'"))
    };
    let r = byte(0)?;
    let g = byte(2)?;
    let b = byte(4)?;
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok(Rgba([r, g, b, a]))
}

#[derive(Parser)]
#[command(name = "dot-qr")]
#[command(about = "Render QR codes with circular modules and ring-and-dot finder eyes")]
pub struct Args {
    /// Text to encode in the QR code
    #[arg(short, long)]
    pub text: String,

    /// Output PNG path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output image side length in pixels (default: 512)
    #[arg(short, long, default_value = "512")]
    pub size: f32,

    /// Foreground color as hex (default: #000000)
    #[arg(short, long, default_value = "#000000", value_parser = parse_hex_color)]
    pub dark: Rgba<u8>,

    /// Background color as hex; transparent if omitted
    #[arg(short, long, value_parser = parse_hex_color)]
    pub background: Option<Rgba<u8>>,

    /// QR version 1-40; auto-selected if omitted
    #[arg(short = 'v', long)]
    pub version: Option<i16>,

    /// QR code error correction level (L, M, Q, H)
    #[arg(short = 'e', long, default_value = "L")]
    pub error_correction: EcArg,

    /// Widen modules by one pixel to close anti-aliasing seams
    #[arg(short, long)]
    pub gapless: bool,
}

impl Args {
    pub fn version_spec(&self) -> VersionSpec {
        match self.version {
            Some(v) => VersionSpec::Fixed(v),
            None => VersionSpec::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_hex_color("ff8000").unwrap(), Rgba([255, 128, 0, 255]));
        assert_eq!(
            parse_hex_color("#11223344").unwrap(),
            Rgba([0x11, 0x22, 0x33, 0x44])
        );
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
    }
}
