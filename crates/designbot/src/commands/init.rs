use crate::{Error, Result};
use libdesignbot::SETTINGS_FILE_NAME;
use owo_colors::{OwoColorize as _, Stream};

use indoc::formatdoc;

use std::path::Path;

pub struct InitArgs<'a, W: std::io::Write> {
    pub working_dir: &'a Path,
    pub port: Option<u16>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: InitArgs<W>) -> Result<()> {
    let settings_path = args.working_dir.join(SETTINGS_FILE_NAME);

    if settings_path.exists() {
        return Err(Error::General(format!(
            "{} already exists in {}",
            SETTINGS_FILE_NAME,
            args.working_dir.display()
        )));
    }

    std::fs::create_dir_all(args.working_dir)?;

    write!(args.stdout, "Creating {}...", SETTINGS_FILE_NAME)?;
    let contents = formatdoc!(
        r#"
        ---
        port: {}
        data_file: {}
        # web_dir: web/build
        gemini:
          # Or set GEMINI_API_KEY in the environment or a .env file
          # api_key: ...
          timeout_secs: 10
        "#,
        args.port.unwrap_or(libdesignbot::settings::DEFAULT_PORT),
        libdesignbot::DEFAULT_DATA_FILE,
    );
    std::fs::write(settings_path, contents)?;
    writeln!(
        args.stdout,
        "{}",
        "✓".if_supports_color(Stream::Stdout, |s| s.green())
    )?;

    writeln!(
        args.stdout,
        "Done! Run `designbot serve` to start the server",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libdesignbot::Settings;
    use pretty_assertions::assert_eq;
    use std::fs::read_to_string;
    use temp_dir::TempDir;

    #[test]
    fn creates_a_settings_file_that_loads() {
        let temp_dir = TempDir::new().unwrap();
        let working_dir = temp_dir.path();
        let mut fake_stdout = std::io::sink();

        run(InitArgs {
            working_dir,
            port: Some(3001),
            stdout: &mut fake_stdout,
        })
        .unwrap();

        let contents = read_to_string(working_dir.join(SETTINGS_FILE_NAME)).unwrap();
        assert!(contents.contains("port: 3001"), "{}", contents);

        let settings = Settings::load(working_dir).unwrap();
        assert_eq!(settings.port, 3001);
        assert_eq!(settings.data_file, working_dir.join("database.json"));
        assert_eq!(settings.web_dir, None);
        assert_eq!(settings.gemini.api_key, None);
    }

    #[test]
    fn refuses_to_overwrite_existing_settings() {
        let temp_dir = TempDir::new().unwrap();
        let working_dir = temp_dir.path();
        std::fs::write(working_dir.join(SETTINGS_FILE_NAME), "port: 1234\n").unwrap();
        let mut fake_stdout = std::io::sink();

        let result = run(InitArgs {
            working_dir,
            port: None,
            stdout: &mut fake_stdout,
        });

        assert!(matches!(result, Err(Error::General(_))));
        assert_eq!(
            read_to_string(working_dir.join(SETTINGS_FILE_NAME)).unwrap(),
            "port: 1234\n"
        );
    }

    #[test]
    fn logs_out_progress_to_stdout() {
        let temp_dir = TempDir::new().unwrap();
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        let result = run(InitArgs {
            working_dir: temp_dir.path(),
            port: None,
            stdout: &mut fake_stdout,
        });

        assert!(result.is_ok());

        let output = String::from_utf8(fake_stdout.into_inner()).unwrap();

        assert!(output.contains("Creating designbot.yaml"));
        assert!(output.contains("Done!"));
    }
}
