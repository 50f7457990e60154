//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a scratch directory holding archive, override and taxonomy files
pub struct ArchiveBuilder {
    temp_dir: TempDir,
    conversations: Vec<Value>,
}

impl ArchiveBuilder {
    /// Create a new builder with an empty scratch directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, conversations: Vec::new() }
    }

    /// Add a conversation to the archive
    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.conversations.push(conversation.to_json());
        self
    }

    /// Add a raw JSON value to the archive as-is
    pub fn with_raw_conversation(mut self, conversation: Value) -> Self {
        self.conversations.push(conversation);
        self
    }

    /// Write the archive to `conversations.json` and return its path
    pub fn write_archive(&self) -> PathBuf {
        self.write_archive_named("conversations.json")
    }

    /// Write the archive under the given file name
    pub fn write_archive_named(&self, name: &str) -> PathBuf {
        let content = Value::Array(self.conversations.clone()).to_string();
        self.write_file(name, &content)
    }

    /// Write an override file mapping titles to categories
    pub fn write_overrides(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let map: serde_json::Map<String, Value> =
            entries.iter().map(|(t, c)| (t.to_string(), Value::String(c.to_string()))).collect();
        self.write_file(name, &Value::Object(map).to_string())
    }

    /// Write a single-category taxonomy file
    pub fn write_taxonomy(&self, name: &str, category: &str, keywords: &[&str]) -> PathBuf {
        let entries = json!([{"category": category, "keywords": keywords}]);
        self.write_file(name, &entries.to_string())
    }

    /// Write arbitrary content into the scratch directory
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Path of the scratch directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Fresh output directory path inside the scratch directory (not created)
    pub fn output_dir(&self) -> PathBuf {
        self.temp_dir.path().join("vault")
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one exported conversation with a linear message chain
pub struct ConversationBuilder {
    title: Option<String>,
    create_time: Value,
    messages: Vec<(String, Option<String>, String)>,
}

impl ConversationBuilder {
    /// Create a conversation with the given title and a fixed creation time
    pub fn new(title: &str) -> Self {
        Self { title: Some(title.to_string()), create_time: json!(1700000000), messages: Vec::new() }
    }

    /// Remove the title field entirely
    pub fn untitled(mut self) -> Self {
        self.title = None;
        self
    }

    /// Set `create_time` to any JSON value (number, null, string)
    pub fn create_time(mut self, create_time: Value) -> Self {
        self.create_time = create_time;
        self
    }

    /// Append a user message
    pub fn user(mut self, text: &str) -> Self {
        self.messages.push(("user".to_string(), None, text.to_string()));
        self
    }

    /// Append an assistant message
    pub fn assistant(mut self, text: &str) -> Self {
        self.messages.push(("assistant".to_string(), None, text.to_string()));
        self
    }

    /// Append a tool message
    pub fn tool(mut self, name: &str, text: &str) -> Self {
        self.messages.push(("tool".to_string(), Some(name.to_string()), text.to_string()));
        self
    }

    /// Convert to the exporter's JSON shape: an empty root node followed by one node per message
    pub fn to_json(&self) -> Value {
        let mut mapping = serde_json::Map::new();
        let ids: Vec<String> = (1..=self.messages.len()).map(|i| format!("m{}", i)).collect();

        let root_children: Vec<&String> = ids.first().into_iter().collect();
        mapping.insert(
            "root".to_string(),
            json!({"id": "root", "parent": null, "children": root_children, "message": null}),
        );

        for (i, (role, name, text)) in self.messages.iter().enumerate() {
            let parent = if i == 0 { "root".to_string() } else { ids[i - 1].clone() };
            let children: Vec<&String> = ids.get(i + 1).into_iter().collect();
            mapping.insert(
                ids[i].clone(),
                json!({
                    "id": ids[i],
                    "parent": parent,
                    "children": children,
                    "message": {
                        "author": {"role": role, "name": name},
                        "content": {"content_type": "text", "parts": [text]}
                    }
                }),
            );
        }

        let mut conversation = json!({
            "create_time": self.create_time,
            "update_time": null,
            "mapping": Value::Object(mapping),
        });
        if let Some(title) = &self.title {
            conversation["title"] = json!(title);
        }
        conversation
    }
}

/// The nginx conversation used across scenarios
pub fn nginx_conversation() -> ConversationBuilder {
    ConversationBuilder::new("Nginx setup help").user("How do I configure nginx reverse proxy?")
}

/// Collect every file under `dir`, relative to it, with `/` separators, sorted
pub fn list_files(dir: &Path) -> Vec<String> {
    fn visit(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).expect("Failed to read dir") {
            let path = entry.expect("Failed to read dir entry").path();
            if path.is_dir() {
                visit(base, &path, out);
            } else {
                let relative = path.strip_prefix(base).expect("Path outside base");
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }

    let mut files = Vec::new();
    visit(dir, dir, &mut files);
    files.sort();
    files
}
