use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use libdesignbot::Platform;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use designbot::commands::generate::{run as generate, GenerateArgs};
use designbot::commands::init::{run as init, InitArgs};
use designbot::commands::serve::{run as serve, ServeArgs};
use designbot::commands::spacing::{run as spacing, SpacingArgs};

#[derive(Parser, Debug, Clone)]
#[command(about = "Designbot, a color palette and spacing token generator", long_about = None)]
#[command(version, about, long_about = None)]
struct Args {
    #[clap(long, global = true, default_value = "auto")]
    color: Color,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum Color {
    Always,
    Auto,
    Never,
}

impl Color {
    fn init(self) {
        // Set a supports-color override based on the variable passed in.
        match self {
            Color::Always => owo_colors::set_override(true),
            Color::Auto => {}
            Color::Never => owo_colors::set_override(false),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Create a designbot.yaml. Defaults to the current directory.
    Init {
        #[arg(default_value = ".")]
        working_dir: PathBuf,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the API server and serve the web client
    Serve {
        #[arg(default_value = ".")]
        working_dir: PathBuf,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        data_file: Option<PathBuf>,
        #[arg(long)]
        web_dir: Option<PathBuf>,
    },
    /// Print the 100-900 palette for one or more colors
    Generate {
        #[arg(required = true)]
        colors: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print spacing tokens for the given platforms (pc, tablet, mobile, all)
    Spacing {
        #[arg(required = true)]
        platforms: Vec<Platform>,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.color.init();

    let mut stdout = std::io::stdout();

    let result = match args.command {
        Some(Commands::Init { working_dir, port }) => init(InitArgs {
            working_dir: &working_dir,
            port,
            stdout: &mut stdout,
        }),
        Some(Commands::Serve {
            working_dir,
            port,
            data_file,
            web_dir,
        }) => serve(ServeArgs {
            working_dir,
            port,
            data_file,
            web_dir,
            stdout: &mut stdout,
        }),
        Some(Commands::Generate { colors, json }) => generate(GenerateArgs {
            colors: &colors,
            json,
            stdout: &mut stdout,
        }),
        Some(Commands::Spacing { platforms, json }) => spacing(SpacingArgs {
            platforms: &platforms,
            json,
            stdout: &mut stdout,
        }),
        None => {
            let _ = Args::command().print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
