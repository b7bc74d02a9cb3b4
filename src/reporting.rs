use crate::errors::SkipReason;
use crate::trie::{Trie, TrieNode};
use std::path::Path;
use tracing::{debug, info, warn};

/// Receives progress events from the aggregator. Purely observational: what a
/// reporter does never changes the aggregate.
pub trait Reporter {
    /// The walk is starting at `root`.
    fn scanned(&mut self, root: &Path);

    /// A file block was appended.
    fn added(&mut self, relative_path: &str);

    /// A candidate was left out.
    fn skipped(&mut self, relative_path: &str, reason: &SkipReason);
}

/// Writes each event as a tracing line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn scanned(&mut self, root: &Path) {
        info!("scanning {}", root.display());
    }

    fn added(&mut self, relative_path: &str) {
        info!("added: {}", relative_path);
    }

    fn skipped(&mut self, relative_path: &str, reason: &SkipReason) {
        match reason {
            SkipReason::Encoding => warn!("skipped (encoding error): {}", relative_path),
            SkipReason::Read(detail) => {
                warn!("skipped (error reading {}): {}", relative_path, detail)
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn scanned(&mut self, _root: &Path) {}
    fn added(&mut self, _relative_path: &str) {}
    fn skipped(&mut self, _relative_path: &str, _reason: &SkipReason) {}
}

/// Prints the token counts as a directory tree with per-directory totals.
pub fn print_stats<'a, I>(token_counts: I)
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    debug!("Printing statistics for token counts");
    let mut trie = Trie::new();
    let mut total_tokens = 0;

    for (path, token_count) in token_counts {
        trie.insert(path, token_count);
        total_tokens += token_count;
    }

    info!("Overall ({} tokens)", total_tokens);
    print_tree(trie.get_root(), "");
}

fn print_tree(node: &TrieNode, prefix: &str) {
    let child_count = node.children.len();

    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last_child = i + 1 == child_count;
        let connector = if is_last_child { "┗━━" } else { "┣━━" };

        match child.token_count {
            Some(tokens) => {
                info!(
                    "{}{} {} {} ({} tokens)",
                    prefix,
                    connector,
                    get_file_icon(Path::new(name)),
                    name,
                    tokens
                );
            }
            None => {
                info!(
                    "{}{}📂 {} ({} tokens)",
                    prefix,
                    connector,
                    name,
                    child.calculate_total_tokens()
                );
                let new_prefix = format!("{}{}    ", prefix, if is_last_child { " " } else { "┃" });
                print_tree(child, &new_prefix);
            }
        }
    }
}

pub fn get_file_icon(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts") | Some("tsx") => "🔷",
        Some("js") | Some("mjs") | Some("cjs") => "🟨",
        Some("jsx") => "⚛️",
        Some("html") | Some("htm") => "🌐",
        Some("css") | Some("scss") | Some("sass") => "🎨",
        Some("java") => "☕",
        Some("rs") => "🦀",
        Some("py") => "🐍",
        Some("json") => "🔖",
        Some("yaml") | Some("yml") => "🗂️",
        Some("xml") => "📰",
        Some("properties") | Some("ini") | Some("conf") | Some("toml") => "⚙️",
        Some("md") | Some("markdown") => "📝",
        Some("sh") | Some("bash") | Some("zsh") => "🐚",
        _ => "📄",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_icons() {
        assert_eq!(get_file_icon(Path::new("app.component.ts")), "🔷");
        assert_eq!(get_file_icon(Path::new("application.properties")), "⚙️");
        assert_eq!(get_file_icon(Path::new("README")), "📄");
    }
}
