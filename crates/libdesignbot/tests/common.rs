#![allow(dead_code)]

use libdesignbot::{NamingService, ProjectStore, Result, TextGenerator};
use std::sync::{Arc, Mutex};
use temp_dir::TempDir;

pub const EMAIL: &str = "designer@example.com";

/// Replies with a fixed text and remembers every prompt it was given.
#[derive(Default)]
pub struct RecordingGenerator {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(RecordingGenerator {
            reply: reply.to_string(),
            prompts: Mutex::new(vec![]),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for RecordingGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

pub struct Fixture {
    pub temp_dir: TempDir,
    pub store: ProjectStore,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store = ProjectStore::open(temp_dir.path().join("database.json")).unwrap();

        Fixture { temp_dir, store }
    }
}

pub fn offline() -> NamingService {
    NamingService::offline()
}
