//! The editor tree as it travels through a record
//!
//! The tree is stored exactly as the editor produced it, so fields this crate
//! does not know about survive a save and load unchanged.
use super::BlogRecord;
use crate::model::Node;
use serde_json::Value;

/// The value to put into a record's `content`
pub fn save(tree: &Node) -> Value {
    tree.to_value()
}

/// The stored tree of a record, ready for the renderer
pub fn load(record: &BlogRecord) -> &Value {
    &record.content
}

/// The lenient reading of a record's tree
pub fn tree(record: &BlogRecord) -> Node {
    Node::from_value(&record.content)
}
