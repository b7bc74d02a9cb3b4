use crate::errors::PromptError;
use arboard::Clipboard;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs as async_fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Where a finished prompt goes.
#[async_trait]
pub trait PromptSink: Send + Sync {
    async fn deliver(&self, prompt: &str) -> Result<(), PromptError>;
}

/// Copies the prompt to the system clipboard.
pub struct ClipboardSink {
    fallback_to_stdout: bool,
}

impl ClipboardSink {
    /// When `fallback_to_stdout` is set, a clipboard failure prints the prompt
    /// instead of failing the run.
    pub fn new(fallback_to_stdout: bool) -> Self {
        ClipboardSink { fallback_to_stdout }
    }

    fn copy(prompt: &str) -> Result<(), PromptError> {
        debug!("Initializing clipboard");
        let mut clipboard =
            Clipboard::new().map_err(|e| PromptError::ClipboardInitError(e.to_string()))?;
        clipboard
            .set_text(prompt.to_owned())
            .map_err(|e| PromptError::ClipboardWriteError(e.to_string()))
    }
}

impl Default for ClipboardSink {
    fn default() -> Self {
        ClipboardSink::new(true)
    }
}

#[async_trait]
impl PromptSink for ClipboardSink {
    async fn deliver(&self, prompt: &str) -> Result<(), PromptError> {
        match Self::copy(prompt) {
            Ok(()) => {
                info!("Project content has been compiled and copied to your clipboard.");
                Ok(())
            }
            Err(e) if self.fallback_to_stdout => {
                error!("Could not copy to clipboard: {}", e);
                warn!("The prompt has been printed below instead");
                StdoutSink.deliver(prompt).await
            }
            Err(e) => Err(e),
        }
    }
}

/// Writes the prompt to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

#[async_trait]
impl PromptSink for StdoutSink {
    async fn deliver(&self, prompt: &str) -> Result<(), PromptError> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Writes the prompt to a file, replacing any previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }
}

#[async_trait]
impl PromptSink for FileSink {
    async fn deliver(&self, prompt: &str) -> Result<(), PromptError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&self.path, prompt).await?;
        info!("Prompt written to {}", self.path.display());
        Ok(())
    }
}
