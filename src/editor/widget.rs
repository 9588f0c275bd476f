use crate::model::{character_count, ImageAttrs, LinkAttrs, MarkType, Node, NodeType};

/// The boundary to a rich-text editing widget
///
/// Mutating methods return whether the document changed, which is what the
/// [`EditingSurface`](super::EditingSurface) uses to fire its change callback.
pub trait EditorWidget {
    /// Whether the widget has finished loading its document
    fn is_ready(&self) -> bool;

    /// The complete current document
    fn document(&self) -> &Node;

    /// Insert an image block at the cursor
    fn insert_image(&mut self, attrs: ImageAttrs) -> bool;

    /// The link mark under the cursor, if any
    fn active_link(&self) -> Option<LinkAttrs>;

    /// Grow the selection to cover the whole run of the given mark
    fn extend_mark_range(&mut self, kind: &MarkType);

    /// Replace any link on the selection with this one
    fn set_link(&mut self, link: LinkAttrs) -> bool;

    /// Remove links from the selection
    fn unset_link(&mut self) -> bool;

    fn toggle_mark(&mut self, kind: MarkType) -> bool;

    fn toggle_heading(&mut self, level: u8) -> bool;

    /// Wrap the current block in a list or blockquote, or lift it back out
    fn toggle_wrap(&mut self, kind: NodeType) -> bool;

    fn undo(&mut self) -> bool;

    fn redo(&mut self) -> bool;

    fn character_count(&self) -> usize {
        character_count(self.document())
    }
}
