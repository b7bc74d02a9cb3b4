use std::collections::BTreeMap;
use tracing::trace;

/// A directory or file in the token tree.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub children: BTreeMap<String, TrieNode>,
    pub token_count: Option<usize>,
}

impl TrieNode {
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// Tokens in this node plus everything below it.
    pub fn calculate_total_tokens(&self) -> usize {
        self.token_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(|child| child.calculate_total_tokens())
                .sum::<usize>()
    }

    pub fn is_file(&self) -> bool {
        self.token_count.is_some()
    }
}

/// Token counts keyed by `/`-separated relative paths.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    pub fn insert(&mut self, relative_path: &str, token_count: usize) {
        trace!(
            "Inserting path into token tree: {} ({} tokens)",
            relative_path,
            token_count
        );
        let mut current_node = &mut self.root;
        for component in relative_path.split('/').filter(|c| !c.is_empty()) {
            current_node = current_node
                .children
                .entry(component.to_owned())
                .or_default();
        }
        if current_node.token_count.is_some() {
            trace!("Overwriting existing token count for path: {}", relative_path);
        }
        current_node.token_count = Some(token_count);
    }

    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_roll_up_through_directories() {
        let mut trie = Trie::new();
        trie.insert("src/app/a.ts", 10);
        trie.insert("src/app/b.ts", 5);
        trie.insert("src/main.ts", 1);

        let src = &trie.get_root().children["src"];
        assert!(!src.is_file());
        assert_eq!(src.calculate_total_tokens(), 16);
        assert_eq!(src.children["app"].calculate_total_tokens(), 15);
        assert!(src.children["main.ts"].is_file());
    }

    #[test]
    fn test_reinsert_overwrites() {
        let mut trie = Trie::new();
        trie.insert("a.ts", 3);
        trie.insert("a.ts", 7);
        assert_eq!(trie.get_root().calculate_total_tokens(), 7);
    }
}
