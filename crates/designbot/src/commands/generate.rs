use crate::Result;
use libdesignbot::color_generator::{names::nearest_name, HexColor, Palette};
use owo_colors::{OwoColorize as _, Stream};

pub struct GenerateArgs<'a, W: std::io::Write> {
    pub colors: &'a [String],
    pub json: bool,
    pub stdout: &'a mut W,
}

/// Prints the 100-900 ramp for every color, either as swatches or as JSON.
pub fn run<W: std::io::Write>(args: GenerateArgs<W>) -> Result<()> {
    let palettes = args
        .colors
        .iter()
        .map(|raw| {
            let color = HexColor::parse(raw.trim()).map_err(libdesignbot::Error::from)?;
            Ok((color, Palette::generate(color)))
        })
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        let palettes: Vec<&Palette> = palettes.iter().map(|(_, p)| p).collect();
        serde_json::to_writer_pretty(&mut *args.stdout, &palettes)?;
        writeln!(args.stdout)?;
        return Ok(());
    }

    for (color, palette) in &palettes {
        writeln!(
            args.stdout,
            "{} {} (target {})",
            color,
            nearest_name(*color),
            palette.target_level
        )?;

        for entry in &palette.palette {
            let (r, g, b) = HexColor::parse(&entry.hex)
                .map(|c| c.rgb())
                .unwrap_or((0, 0, 0));
            let swatch = "    ".if_supports_color(Stream::Stdout, |s| s.on_truecolor(r, g, b));
            let marker = if entry.is_target { " ◀" } else { "" };

            writeln!(args.stdout, "  {} {:>3} {}{}", swatch, entry.level, entry.hex, marker)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn output(colors: &[&str], json: bool) -> Result<String> {
        let colors: Vec<String> = colors.iter().map(|c| c.to_string()).collect();
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        run(GenerateArgs {
            colors: &colors,
            json,
            stdout: &mut fake_stdout,
        })?;

        Ok(String::from_utf8(fake_stdout.into_inner()).unwrap())
    }

    #[test]
    fn prints_every_level_and_marks_the_target() {
        let output = output(&["#808080"], false).unwrap();

        assert!(output.starts_with("#808080 Gray (target 500)"), "{}", output);
        assert_eq!(output.lines().count(), 10);
        assert!(output.contains("500 #808080 ◀"), "{}", output);
        assert!(output.contains("100 #1A1A1A"), "{}", output);
        assert_eq!(output.matches('◀').count(), 1);
    }

    #[test]
    fn prints_json() {
        let output = output(&["000", "#FFFFFF"], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["targetLevel"], 100);
        assert_eq!(value[1]["targetLevel"], 900);
        assert_eq!(value[1]["palette"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn rejects_bad_colors_before_printing() {
        let result = output(&["#808080", "blue"], false);

        match result {
            Err(Error::Designbot(e)) => {
                assert_eq!(e.code, libdesignbot::Error::INVALID_COLOR_FORMAT)
            }
            other => panic!("Expected a color error, got {:?}", other),
        }
    }
}
