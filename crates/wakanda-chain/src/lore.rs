//! Lore documents placed in the prompt as character context
//!
//! Documents are loaded once at startup and concatenated in file name
//! order. There is no indexing or ranking: the whole library is the context,
//! cut off at the configured length.

use std::path::Path;
use wakanda_core::{Result, WakandaError};

const LORE_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// A single lore document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoreDocument {
    /// File name the document was loaded from
    pub name: String,
    /// Document text
    pub content: String,
}

impl LoreDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    fn section(&self) -> String {
        format!("[{}]\n{}\n\n", self.name, self.content.trim())
    }
}

/// Ordered collection of lore documents
#[derive(Debug, Clone, Default)]
pub struct LoreLibrary {
    documents: Vec<LoreDocument>,
}

impl LoreLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: Vec<LoreDocument>) -> Self {
        Self { documents }
    }

    /// Load every `.txt` and `.md` file in `dir`, sorted by file name
    ///
    /// Blank files are skipped. Subdirectories are not traversed.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(WakandaError::ConfigError(format!(
                "Lore directory not found: {}",
                dir.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_lore = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| LORE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false);
            if is_lore {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                tracing::debug!(path = %path.display(), "Skipping blank lore document");
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            documents.push(LoreDocument::new(name, content));
        }

        tracing::info!(
            dir = %dir.display(),
            documents = documents.len(),
            "Loaded lore library"
        );

        Ok(Self { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Concatenate documents until the next one would exceed `max_chars`
    pub fn context(&self, max_chars: usize) -> String {
        let mut context = String::new();
        let mut total = 0;

        for doc in &self.documents {
            let section = doc.section();
            let len = section.chars().count();
            if total + len > max_chars {
                break;
            }
            context.push_str(&section);
            total += len;
        }

        context
    }
}
