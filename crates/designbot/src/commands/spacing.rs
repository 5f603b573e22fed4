use crate::Result;
use libdesignbot::{spacing_tokens, Platform, PlatformSelection};
use owo_colors::{OwoColorize as _, Stream};

pub struct SpacingArgs<'a, W: std::io::Write> {
    pub platforms: &'a [Platform],
    pub json: bool,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: SpacingArgs<W>) -> Result<()> {
    let selection: PlatformSelection = args.platforms.iter().copied().collect();
    let tokens = spacing_tokens(selection.platforms())?;

    if args.json {
        serde_json::to_writer_pretty(&mut *args.stdout, &tokens)?;
        writeln!(args.stdout)?;
        return Ok(());
    }

    let platforms: Vec<String> = selection.platforms().iter().map(|p| p.to_string()).collect();
    writeln!(args.stdout, "Spacing for {}", platforms.join(", "))?;

    for token in &tokens {
        let bar = "█".repeat((token.value / 2) as usize);

        writeln!(
            args.stdout,
            "  {:<6} {:>4}px {}",
            token.level,
            token.value,
            bar.if_supports_color(Stream::Stdout, |s| s.cyan())
        )?;
    }

    Ok(())
}
