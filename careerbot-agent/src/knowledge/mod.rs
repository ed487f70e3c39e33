//! Fixed textual profile the bot answers from.
//!
//! Documents are read once at startup. Anything missing or unreadable is left
//! out of the context with a warning; loading itself never fails.

use std::path::{Path, PathBuf};
use std::process::Command;


/// Context used when none of the documents could be read
pub const MISSING_BACKGROUND_NOTICE: &str =
    "Background information is not available. Do not answer questions about the person's career; say the information is missing.";

/// A named source document inside the documents directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeDocument {
    /// Section heading in the assembled context
    pub title: String,
    /// File name relative to the documents directory
    pub file_name: String,
}

impl KnowledgeDocument {
    pub fn new(title: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
        }
    }

    fn kind(&self) -> DocumentKind {
        let extension = Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Pdf,
}

/// Where the profile documents live and which ones to read, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeConfig {
    pub docs_dir: PathBuf,
    pub documents: Vec<KnowledgeDocument>,
}

impl KnowledgeConfig {
    pub fn with_default_documents(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            documents: vec![
                KnowledgeDocument::new("Background", "me.txt"),
                KnowledgeDocument::new("Summary", "summary.txt"),
                KnowledgeDocument::new("LinkedIn Profile", "linkedin.pdf"),
                KnowledgeDocument::new("Resume", "resume.pdf"),
            ],
        }
    }
}

/// Read-only profile context assembled from the configured documents
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    context: String,
    loaded: Vec<String>,
}

impl KnowledgeStore {
    /// Read every configured document. Never fails: unreadable documents are skipped.
    pub fn load(config: &KnowledgeConfig) -> Self {
        let mut sections = Vec::new();
        let mut loaded = Vec::new();

        for document in &config.documents {
            let path = config.docs_dir.join(&document.file_name);
            match read_document(&path, document.kind()) {
                Ok(text) if text.trim().is_empty() => {
                    tracing::warn!(path = %path.display(), "Knowledge document is empty, skipping");
                }
                Ok(text) => {
                    tracing::debug!(
                        path = %path.display(),
                        bytes = text.len(),
                        "Loaded knowledge document"
                    );
                    sections.push(format!("### {}\n{}", document.title, text.trim()));
                    loaded.push(document.title.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Knowledge document unavailable, continuing without it"
                    );
                }
            }
        }

        let context = if sections.is_empty() {
            tracing::warn!(
                docs_dir = %config.docs_dir.display(),
                "No knowledge documents could be read"
            );
            MISSING_BACKGROUND_NOTICE.to_string()
        } else {
            sections.join("\n\n")
        };

        tracing::info!(documents = ?loaded, "Knowledge store ready");

        Self { context, loaded }
    }

    /// Build a store from already-assembled text
    pub fn from_text(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            loaded: Vec::new(),
        }
    }

    /// The assembled profile text
    pub fn build_context(&self) -> &str {
        &self.context
    }

    /// Titles of the documents that made it into the context
    pub fn loaded_documents(&self) -> &[String] {
        &self.loaded
    }
}

fn read_document(path: &Path, kind: DocumentKind) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("file does not exist");
    }

    match kind {
        DocumentKind::Text => Ok(std::fs::read_to_string(path)?),
        DocumentKind::Pdf => extract_pdf_text(path),
    }
}

/// Extract text from a PDF with `pdftotext -layout <file> -`
fn extract_pdf_text(path: &Path) -> anyhow::Result<String> {
    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to execute pdftotext command. Is pdftotext installed? Error: {}",
                e
            )
        })?;

    if !output.status.success() {
        anyhow::bail!(
            "pdftotext command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
