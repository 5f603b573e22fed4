use color_generator::{nearest_name, HexColor, Palette};
use std::env;

fn main() {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "generate".to_string());
    let inputs: Vec<String> = args.collect();

    if inputs.is_empty() {
        eprintln!("Usage: {} <color> [color...]", program);
        eprintln!("Examples:");
        eprintln!("  {} \"#3b82f6\"", program);
        eprintln!("  {} \"#3b82f6\" \"10b981\" \"abc\"", program);
        std::process::exit(1);
    }

    for input in &inputs {
        let color = match HexColor::parse(input) {
            Ok(color) => color,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };

        let palette = Palette::generate(color);

        println!(
            "🎨 {} {} ({}), closest step {}",
            color_swatch(&color.to_string()),
            color,
            nearest_name(color),
            palette.target_level
        );

        for entry in palette.palette.iter() {
            println!(
                "    {:<4} {} {}{}",
                entry.level,
                color_swatch(&entry.hex),
                entry.hex,
                if entry.is_target { "  ◀" } else { "" }
            );
        }

        println!();
    }
}

fn color_swatch(hex_color: &str) -> String {
    let (r, g, b) = HexColor::parse(hex_color)
        .map(|c| c.rgb())
        .unwrap_or((0, 0, 0));

    // ANSI 24-bit RGB escape codes with block characters
    format!("\x1b[38;2;{};{};{}m██\x1b[0m", r, g, b)
}
