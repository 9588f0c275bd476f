use super::{Node, NodeType};

/// The text content of a tree, one line per block
pub fn plain_text(node: &Node) -> String {
    let mut out = String::new();
    push_text(node, &mut out);
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out
}

fn push_text(node: &Node, out: &mut String) {
    match node.kind {
        NodeType::Text => out.push_str(node.text_str()),
        NodeType::HardBreak => out.push('\n'),
        _ => {
            for child in &node.content {
                push_text(child, out);
            }
            if !node.kind.is_inline() && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

pub fn word_count(node: &Node) -> usize {
    plain_text(node).split_whitespace().count()
}

/// Number of characters in the text nodes of a tree
pub fn character_count(node: &Node) -> usize {
    match node.kind {
        NodeType::Text => node.text_str().chars().count(),
        _ => node.content.iter().map(character_count).sum(),
    }
}
