use crate::server::App;
use crate::{Error, Result};
use libdesignbot::{ChatService, GeminiClient, NamingService, ProjectStore, Settings, TextGenerator};

use std::path::PathBuf;
use std::sync::Arc;

pub struct ServeArgs<'a, W: std::io::Write> {
    pub working_dir: PathBuf,
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub web_dir: Option<PathBuf>,
    pub stdout: &'a mut W,
}

/// Settings from `designbot.yaml`, then the environment, then the command line.
pub fn resolve_settings<W, F>(args: &ServeArgs<W>, env: F) -> Result<Settings>
where
    W: std::io::Write,
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::load(&args.working_dir)?;
    settings.apply_env(env)?;

    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(data_file) = &args.data_file {
        settings.data_file = data_file.clone();
    }
    if let Some(web_dir) = &args.web_dir {
        settings.web_dir = Some(web_dir.clone());
    }

    Ok(settings)
}

/// The AI backend, if one is configured and reachable. The server still runs
/// without one, falling back to offline names.
fn text_generator(settings: &Settings) -> Option<Arc<dyn TextGenerator>> {
    match GeminiClient::discover(&settings.gemini) {
        Ok(Some(client)) => Some(Arc::new(client)),
        Ok(None) => {
            tracing::info!("No Gemini API key configured, using offline color names");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not reach Gemini, using offline color names");
            None
        }
    }
}

pub fn run<W: std::io::Write>(args: ServeArgs<W>) -> Result<()> {
    let settings = resolve_settings(&args, |key| std::env::var(key).ok())?;

    let store = ProjectStore::open(&settings.data_file)?;
    tracing::info!(path = %store.path().display(), "Opened project store");

    let generator = text_generator(&settings);
    let app = App::new(
        store,
        NamingService::new(generator.clone()),
        ChatService::new(generator),
        settings.web_dir.clone(),
    );

    let server = tiny_http::Server::http(format!("0.0.0.0:{}", settings.port))
        .map_err(|e| Error::General(format!("Failed to start server: {}", e)))?;

    writeln!(
        args.stdout,
        "Designbot running on http://localhost:{}",
        settings.port
    )?;

    loop {
        let mut request = server
            .recv()
            .map_err(|e| Error::General(format!("Failed to receive request: {}", e)))?;

        let method = request.method().clone();
        let url = request.url().to_string();
        let response = app.handle_request(&method, &url, request.as_reader());

        tracing::info!(
            %method,
            %url,
            status = response.status,
            "Handled request"
        );

        if let Err(e) = request.respond(response.into_response()) {
            tracing::warn!(error = %e, "Could not send response");
        }
    }
}
