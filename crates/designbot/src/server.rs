//! Request routing for `designbot serve`.
//!
//! [`App::handle`] works on plain method, URL and body values so routes can be
//! exercised without opening a socket. The receive loop in
//! `commands::serve` turns its [`ApiResponse`] into a `tiny_http` response.

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use libdesignbot::color_generator::{generate_palette, HexColor};
use libdesignbot::workflow::{self, Generated};
use libdesignbot::{
    ChatService, Error, HistoryItem, NamingService, Platform, ProjectAction, ProjectStore,
    Projects,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tiny_http::Method;

pub const CHAT_FAILURE_MESSAGE: &str = "Failed to reach the AI service.";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => ApiResponse {
                status,
                content_type: "application/json; charset=utf-8".to_string(),
                body,
            },
            Err(e) => ApiResponse::plain(500, &format!("Could not serialize response: {}", e)),
        }
    }

    fn plain(status: u16, text: &str) -> Self {
        ApiResponse {
            status,
            content_type: "text/plain; charset=utf-8".to_string(),
            body: text.as_bytes().to_vec(),
        }
    }

    fn error(error: &Error) -> Self {
        let status = if error.is_not_found() {
            404
        } else if error.is_client_error() {
            400
        } else if matches!(error.code, Error::AI_UNAVAILABLE | Error::AI_REQUEST_FAILED) {
            502
        } else {
            500
        };

        ApiResponse::json(
            status,
            &json!({
                "error": error.message,
                "description": error.description,
                "code": error.code,
            }),
        )
    }

    fn no_content() -> Self {
        ApiResponse {
            status: 204,
            content_type: "text/plain; charset=utf-8".to_string(),
            body: vec![],
        }
    }

    /// The body as JSON. Only meant for inspecting responses.
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }

    pub fn into_response(self) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
        let mut response = tiny_http::Response::from_data(self.body).with_status_code(self.status);

        for (name, value) in [
            ("Content-Type", self.content_type.as_str()),
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ] {
            if let Ok(header) = tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                response.add_header(header);
            }
        }

        response
    }
}

#[derive(Deserialize)]
struct NamingRequest {
    hex: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Deserialize)]
struct SaveProjectsRequest {
    email: String,
    projects: Projects,
}

#[derive(Deserialize)]
struct GenerateRequest {
    email: String,
    input: String,
    #[serde(default)]
    project: Option<String>,
}

#[derive(Deserialize)]
struct SpacingRequest {
    email: String,
    platforms: Vec<Platform>,
    #[serde(default)]
    project: Option<String>,
}

#[derive(Serialize)]
struct Stored<'a> {
    project: &'a str,
    item: &'a HistoryItem,
}

pub struct App {
    store: ProjectStore,
    naming: NamingService,
    chat: ChatService,
    web_dir: Option<PathBuf>,
}

fn parse_body<T: DeserializeOwned>(body: &str) -> libdesignbot::Result<T> {
    serde_json::from_str(body).map_err(|e| {
        Error::new(
            Error::INVALID_REQUEST,
            "Invalid request body",
            format!("{}", e),
        )
    })
}

fn decode(segment: &str) -> libdesignbot::Result<String> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|e| Error::new(Error::INVALID_REQUEST, "Invalid URL", format!("{}", e)))
}

impl App {
    pub fn new(
        store: ProjectStore,
        naming: NamingService,
        chat: ChatService,
        web_dir: Option<PathBuf>,
    ) -> Self {
        App {
            store,
            naming,
            chat,
            web_dir,
        }
    }

    /// Reads the body and routes the request. A body that can't be read as
    /// UTF-8 is answered with a 400 without routing.
    pub fn handle_request<R: Read>(&self, method: &Method, url: &str, mut body: R) -> ApiResponse {
        let mut contents = String::new();

        if let Err(e) = body.read_to_string(&mut contents) {
            tracing::warn!(error = %e, "Could not read request body");

            return ApiResponse::error(&Error::new(
                Error::INVALID_REQUEST,
                "Unreadable request body",
                format!("{}", e),
            ));
        }

        self.handle(method, url, &contents)
    }

    pub fn handle(&self, method: &Method, url: &str, body: &str) -> ApiResponse {
        let path = url.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let result = match (method, segments.as_slice()) {
            (Method::Options, _) => return ApiResponse::no_content(),
            (Method::Post, ["api", "ai-naming"]) => self.name_color(body),
            (Method::Post, ["api", "chat"]) => return self.chat(body),
            (Method::Get, ["api", "projects", email]) => self.load_projects(email),
            (Method::Post, ["api", "projects"]) => self.save_projects(body),
            (Method::Post, ["api", "projects", email, "actions"]) => {
                self.apply_action(email, body)
            }
            (Method::Get, ["api", "projects", email, "vault", project]) => {
                self.vault(email, project)
            }
            (Method::Post, ["api", "generate"]) => self.generate(body),
            (Method::Post, ["api", "spacing"]) => self.spacing(body),
            (Method::Get, ["api", "palette", hex]) => self.palette(hex),
            (_, ["api", ..]) => {
                return ApiResponse::json(404, &json!({ "error": "Unknown API route" }))
            }
            (Method::Get | Method::Head, _) => return self.static_file(&segments),
            _ => return ApiResponse::plain(405, "405 Method Not Allowed"),
        };

        match result {
            Ok(response) => response,
            Err(e) => ApiResponse::error(&e),
        }
    }

    fn name_color(&self, body: &str) -> libdesignbot::Result<ApiResponse> {
        let request: NamingRequest = parse_body(body)?;
        let color = HexColor::parse(request.hex.trim())?;

        Ok(ApiResponse::json(
            200,
            &json!({ "name": self.naming.name_for(color) }),
        ))
    }

    fn chat(&self, body: &str) -> ApiResponse {
        let reply = parse_body::<ChatRequest>(body).and_then(|request| {
            let data = self.store.dump()?;
            self.chat.reply(&request.message, &data)
        });

        match reply {
            Ok(response) => ApiResponse::json(200, &json!({ "response": response })),
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                ApiResponse::json(500, &json!({ "response": CHAT_FAILURE_MESSAGE }))
            }
        }
    }

    fn load_projects(&self, email: &str) -> libdesignbot::Result<ApiResponse> {
        let projects = self.store.load(&decode(email)?)?;

        Ok(ApiResponse::json(200, &projects))
    }

    fn save_projects(&self, body: &str) -> libdesignbot::Result<ApiResponse> {
        let request: SaveProjectsRequest = parse_body(body)?;
        self.store.save(&request.email, &request.projects)?;

        Ok(ApiResponse::json(200, &json!({ "success": true })))
    }

    fn apply_action(&self, email: &str, body: &str) -> libdesignbot::Result<ApiResponse> {
        let email = decode(email)?;
        let action: ProjectAction = parse_body(body)?;

        let mut projects = self.store.load(&email)?;
        projects.apply(action)?;
        self.store.save(&email, &projects)?;

        Ok(ApiResponse::json(200, &projects))
    }

    fn vault(&self, email: &str, project: &str) -> libdesignbot::Result<ApiResponse> {
        let projects = self.store.load(&decode(email)?)?;

        Ok(ApiResponse::json(200, &projects.vault(&decode(project)?)?))
    }

    fn generate(&self, body: &str) -> libdesignbot::Result<ApiResponse> {
        let request: GenerateRequest = parse_body(body)?;
        let mut projects = self.store.load(&request.email)?;

        match workflow::generate(
            &request.input,
            &mut projects,
            request.project.as_deref(),
            &self.naming,
        )? {
            Generated::SpacingRequested => Ok(ApiResponse::json(
                200,
                &json!({ "spacingRequested": true }),
            )),
            Generated::Color { project, item } => {
                self.store.save(&request.email, &projects)?;

                Ok(ApiResponse::json(
                    200,
                    &Stored {
                        project: &project,
                        item: &item,
                    },
                ))
            }
        }
    }

    fn spacing(&self, body: &str) -> libdesignbot::Result<ApiResponse> {
        let request: SpacingRequest = parse_body(body)?;
        let mut projects = self.store.load(&request.email)?;

        let (project, item) = workflow::add_spacing(
            &request.platforms,
            &mut projects,
            request.project.as_deref(),
        )?;
        self.store.save(&request.email, &projects)?;

        Ok(ApiResponse::json(
            200,
            &Stored {
                project: &project,
                item: &item,
            },
        ))
    }

    fn palette(&self, hex: &str) -> libdesignbot::Result<ApiResponse> {
        let palette = generate_palette(&decode(hex)?)?;

        Ok(ApiResponse::json(200, &palette))
    }

    fn static_file(&self, segments: &[&str]) -> ApiResponse {
        let web_dir = match &self.web_dir {
            Some(dir) => dir,
            None => return ApiResponse::plain(404, "404 Not Found"),
        };

        let path = resolve_path(segments, web_dir);

        match std::fs::read(&path) {
            Ok(content) => ApiResponse {
                status: 200,
                content_type: content_type_for_path(&path).to_string(),
                body: content,
            },
            Err(_) => ApiResponse::plain(404, "404 Not Found"),
        }
    }
}

/// Maps URL segments onto a file in `web_dir`. Anything that isn't a file is
/// answered with `index.html` so the client side router can take over.
fn resolve_path(segments: &[&str], web_dir: &Path) -> PathBuf {
    let index = web_dir.join("index.html");

    let mut relative = PathBuf::new();
    for segment in segments {
        match decode(segment) {
            Ok(segment) => relative.push(segment),
            Err(_) => return index,
        }
    }

    // Never leave the web directory
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return index;
    }

    let direct_path = web_dir.join(relative);
    if direct_path.is_file() {
        direct_path
    } else {
        index
    }
}

fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    match extension {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libdesignbot::{TextGenerator, DEFAULT_PROJECT_NAME};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use temp_dir::TempDir;

    struct Fixed(&'static str);

    impl TextGenerator for Fixed {
        fn generate(&self, _prompt: &str) -> libdesignbot::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn app(temp_dir: &TempDir, generator: Option<Arc<dyn TextGenerator>>) -> App {
        let store = ProjectStore::open(temp_dir.path().join("database.json")).unwrap();

        App::new(
            store,
            NamingService::new(generator.clone()),
            ChatService::new(generator),
            None,
        )
    }

    #[test]
    fn names_colors_remotely() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, Some(Arc::new(Fixed("Ocean Blue"))));

        let response = app.handle(&Method::Post, "/api/ai-naming", r##"{"hex": "#3B82F6"}"##);

        assert_eq!(response.status, 200);
        assert_eq!(response.json_body(), json!({ "name": "Ocean Blue" }));
    }

    #[test]
    fn names_colors_offline() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Post, "/api/ai-naming", r#"{"hex": "ff0000"}"#);

        assert_eq!(response.json_body(), json!({ "name": "Red" }));
    }

    #[test]
    fn naming_rejects_bad_hex() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Post, "/api/ai-naming", r#"{"hex": "nope"}"#);

        assert_eq!(response.status, 400);
        assert_eq!(response.json_body()["code"], Error::INVALID_COLOR_FORMAT);
    }

    #[test]
    fn chat_without_a_backend_is_a_500() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Post, "/api/chat", r#"{"message": "hi"}"#);

        assert_eq!(response.status, 500);
        assert_eq!(
            response.json_body(),
            json!({ "response": CHAT_FAILURE_MESSAGE })
        );
    }

    #[test]
    fn chat_replies_with_the_generated_text() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, Some(Arc::new(Fixed("Use blue-600 for buttons."))));

        let response = app.handle(&Method::Post, "/api/chat", r#"{"message": "hi"}"#);

        assert_eq!(
            response.json_body(),
            json!({ "response": "Use blue-600 for buttons." })
        );
    }

    #[test]
    fn unknown_users_get_the_default_projects() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Get, "/api/projects/new%40example.com", "");

        assert_eq!(response.status, 200);
        assert_eq!(response.json_body(), json!({ DEFAULT_PROJECT_NAME: [] }));
    }

    #[test]
    fn saved_projects_come_back() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let saved = app.handle(
            &Method::Post,
            "/api/projects",
            r#"{"email": "a@example.com", "projects": {"Brand": [], "Web": []}}"#,
        );
        assert_eq!(saved.json_body(), json!({ "success": true }));

        let response = app.handle(&Method::Get, "/api/projects/a@example.com", "");

        assert_eq!(response.json_body(), json!({ "Brand": [], "Web": [] }));
    }

    #[test]
    fn generating_a_color_stores_it() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, Some(Arc::new(Fixed("Ocean Blue"))));

        let response = app.handle(
            &Method::Post,
            "/api/generate",
            r#"{"email": "a@example.com", "input": "3b82f6", "project": "Default Project"}"#,
        );

        assert_eq!(response.status, 200);
        let body = response.json_body();
        assert_eq!(body["project"], DEFAULT_PROJECT_NAME);
        assert_eq!(body["item"]["type"], "color");
        assert_eq!(body["item"]["name"], "Ocean Blue");
        assert_eq!(body["item"]["target"], 600);

        let stored = app
            .handle(&Method::Get, "/api/projects/a@example.com", "")
            .json_body();
        assert_eq!(stored[DEFAULT_PROJECT_NAME][0], body["item"]);
    }

    #[test]
    fn spacing_input_asks_for_platforms() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(
            &Method::Post,
            "/api/generate",
            r#"{"email": "a@example.com", "input": "Spacing please"}"#,
        );

        assert_eq!(response.json_body(), json!({ "spacingRequested": true }));
    }

    #[test]
    fn spacing_tokens_are_stored() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(
            &Method::Post,
            "/api/spacing",
            r#"{"email": "a@example.com", "platforms": ["pc"], "project": "Default Project"}"#,
        );

        let body = response.json_body();
        assert_eq!(body["item"]["type"], "spacing");
        assert_eq!(body["item"]["palette"].as_array().unwrap().len(), 18);
        assert_eq!(body["item"]["palette"][17], json!({ "level": "sp25", "value": 100, "isVisible": true }));
    }

    #[test]
    fn spacing_without_platforms_is_a_400() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(
            &Method::Post,
            "/api/spacing",
            r#"{"email": "a@example.com", "platforms": []}"#,
        );

        assert_eq!(response.status, 400);
        assert_eq!(response.json_body()["code"], Error::NO_PLATFORM_SELECTED);
    }

    #[test]
    fn actions_update_stored_projects() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);
        app.handle(
            &Method::Post,
            "/api/generate",
            r##"{"email": "a@example.com", "input": "#10B981", "project": "Default Project"}"##,
        );

        let response = app.handle(
            &Method::Post,
            "/api/projects/a@example.com/actions",
            r#"{"action": "bookmark", "project": "Default Project", "index": 0}"#,
        );
        assert_eq!(response.status, 200);

        let vault = app
            .handle(
                &Method::Get,
                "/api/projects/a@example.com/vault/Default%20Project",
                "",
            )
            .json_body();
        assert_eq!(vault["colors"].as_array().unwrap().len(), 1);
        assert_eq!(vault["colors"][0]["index"], 0);
    }

    #[test]
    fn deleting_the_last_project_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(
            &Method::Post,
            "/api/projects/a@example.com/actions",
            r#"{"action": "delete", "project": "Default Project"}"#,
        );

        assert_eq!(response.status, 400);
        assert_eq!(response.json_body()["code"], Error::LAST_PROJECT);
    }

    #[test]
    fn missing_projects_are_a_404() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Get, "/api/projects/a@example.com/vault/Nope", "");

        assert_eq!(response.status, 404);
    }

    #[test]
    fn serves_palettes_directly() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Get, "/api/palette/%23808080", "");

        let body = response.json_body();
        assert_eq!(body["targetLevel"], 500);
        assert_eq!(body["palette"][4]["hex"], "#808080");
    }

    #[test]
    fn malformed_bodies_are_a_400() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle(&Method::Post, "/api/generate", "{not json");

        assert_eq!(response.status, 400);
        assert_eq!(response.json_body()["code"], Error::INVALID_REQUEST);
    }

    struct BrokenBody;

    impl Read for BrokenBody {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            ))
        }
    }

    #[test]
    fn unreadable_bodies_are_a_400() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle_request(&Method::Post, "/api/generate", BrokenBody);

        assert_eq!(response.status, 400);
        assert_eq!(response.json_body()["error"], "Unreadable request body");
        assert_eq!(response.json_body()["code"], Error::INVALID_REQUEST);
    }

    #[test]
    fn non_utf8_bodies_are_a_400() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle_request(&Method::Post, "/api/chat", &b"\xFF\xFE"[..]);

        assert_eq!(response.status, 400);
        assert_eq!(response.json_body()["error"], "Unreadable request body");
    }

    #[test]
    fn readable_bodies_are_routed() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        let response = app.handle_request(
            &Method::Post,
            "/api/ai-naming",
            r##"{"hex": "#000000"}"##.as_bytes(),
        );

        assert_eq!(response.json_body(), json!({ "name": "Black" }));
    }

    #[test]
    fn preflight_requests_get_no_content() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        assert_eq!(app.handle(&Method::Options, "/api/chat", "").status, 204);
    }

    #[test]
    fn serves_the_web_client_with_an_index_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let web_dir = temp_dir.path().join("web");
        std::fs::create_dir_all(web_dir.join("static")).unwrap();
        std::fs::write(web_dir.join("index.html"), "<html></html>").unwrap();
        std::fs::write(web_dir.join("static/app.js"), "console.log(1)").unwrap();

        let store = ProjectStore::open(temp_dir.path().join("database.json")).unwrap();
        let app = App::new(
            store,
            NamingService::offline(),
            ChatService::default(),
            Some(web_dir),
        );

        let script = app.handle(&Method::Get, "/static/app.js", "");
        assert_eq!(script.body, b"console.log(1)");
        assert_eq!(script.content_type, "application/javascript; charset=utf-8");

        let route = app.handle(&Method::Get, "/projects/brand?tab=vault", "");
        assert_eq!(route.body, b"<html></html>");

        let escape = app.handle(&Method::Get, "/../database.json", "");
        assert_eq!(escape.body, b"<html></html>");
    }

    #[test]
    fn no_web_dir_means_404() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir, None);

        assert_eq!(app.handle(&Method::Get, "/", "").status, 404);
    }
}
