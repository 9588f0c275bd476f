//! # A minimal editing widget over the document tree
//!
//! The selection is a path to a textblock plus a character range inside its
//! inline content. Text nodes count their characters, every other inline node
//! counts as one position. Marks are applied by splitting text nodes at the
//! range boundaries and merging neighbours with equal marks afterwards.

use super::EditorWidget;
use crate::model::{Fragment, ImageAttrs, LinkAttrs, Mark, MarkType, Node, NodeType};
use log::*;

/// A character range inside one textblock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Child indices from the root to the textblock
    pub path: Vec<usize>,
    pub from: usize,
    pub to: usize,
}

impl Selection {
    pub fn cursor(path: Vec<usize>, at: usize) -> Self {
        Self::range(path, at, at)
    }

    pub fn range(path: Vec<usize>, from: usize, to: usize) -> Self {
        Self { path, from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    // The position whose marks describe the selection
    fn mark_pos(&self) -> usize {
        if self.is_empty() {
            self.from.saturating_sub(1)
        } else {
            self.from
        }
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    doc: Node,
    selection: Selection,
}

/// The built-in editing widget
#[derive(Debug)]
pub struct TreeEditor {
    doc: Node,
    selection: Selection,
    ready: bool,
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl Default for TreeEditor {
    fn default() -> Self {
        Self::new(Node::empty_doc())
    }
}

impl TreeEditor {
    pub fn new(doc: Node) -> Self {
        let selection = first_textblock(&doc)
            .map(|path| Selection::cursor(path, 0))
            .unwrap_or_default();
        Self {
            doc,
            selection,
            ready: true,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// A widget that has not received its document yet
    pub fn loading() -> Self {
        Self {
            ready: false,
            ..Self::default()
        }
    }

    pub fn load(&mut self, doc: Node) {
        *self = Self::new(doc);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Move the selection; offsets are clamped to the block
    pub fn select(&mut self, selection: Selection) -> bool {
        let len = match node_at(&self.doc, &selection.path) {
            Some(block) if block.kind.is_textblock() => content_len(&block.content),
            _ => return false,
        };
        let from = selection.from.min(len);
        let to = selection.to.min(len).max(from);
        self.selection = Selection::range(selection.path, from, to);
        true
    }

    /// Replace the selection with text
    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() || !self.ready {
            return false;
        }
        self.ensure_textblock();
        let inserted = text.chars().count();
        self.edit_inline(|content, sel| {
            let (left, rest) = split_inline(content, sel.from);
            let (_, right) = split_inline(rest, sel.to - sel.from);
            // links do not grow when typing at their end
            let marks = left
                .last()
                .filter(|n| n.kind == NodeType::Text)
                .map(|n| {
                    n.marks
                        .iter()
                        .filter(|m| m.kind != MarkType::Link)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            let mut out = left;
            out.push(Node::marked_text(text, marks));
            out.extend(right);
            let at = sel.from + inserted;
            Some((normalize(out), Selection::cursor(sel.path.clone(), at)))
        })
    }

    /// Split the current block at the cursor, like pressing enter
    pub fn split_block(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        self.ensure_textblock();
        let sel = self.selection.clone();
        let block = match node_at(&self.doc, &sel.path) {
            Some(block) if block.kind.is_textblock() => block.clone(),
            _ => return false,
        };
        if block.kind == NodeType::CodeBlock {
            return self.insert_text("\n");
        }
        let (left, rest) = split_inline(block.content.clone(), sel.from);
        let (_, right) = split_inline(rest, sel.to - sel.from);
        let (last, parent_path) = match sel.path.split_last() {
            Some((last, parent_path)) => (*last, parent_path.to_vec()),
            None => return false,
        };

        self.checkpoint();
        if let Some(parent) = node_at_mut(&mut self.doc, &parent_path) {
            let mut first = block;
            first.content = normalize(left);
            parent.content[last] = first;
            parent
                .content
                .insert(last + 1, Node::paragraph(normalize(right)));
        }
        let mut path = parent_path;
        path.push(last + 1);
        self.selection = Selection::cursor(path, 0);
        true
    }

    fn ensure_textblock(&mut self) {
        if matches!(node_at(&self.doc, &self.selection.path), Some(b) if b.kind.is_textblock()) {
            return;
        }
        match first_textblock(&self.doc) {
            Some(path) => self.selection = Selection::cursor(path, 0),
            None => {
                self.doc.content.push(Node::paragraph(Vec::new()));
                self.selection = Selection::cursor(vec![self.doc.content.len() - 1], 0);
            }
        }
    }

    fn checkpoint(&mut self) {
        self.undo.push(Snapshot {
            doc: self.doc.clone(),
            selection: self.selection.clone(),
        });
        self.redo.clear();
    }

    fn edit_inline<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(Fragment, &Selection) -> Option<(Fragment, Selection)>,
    {
        if !self.ready {
            return false;
        }
        let before = match node_at(&self.doc, &self.selection.path) {
            Some(block) if block.kind.is_textblock() => block.content.clone(),
            _ => return false,
        };
        let (content, selection) = match f(before.clone(), &self.selection) {
            Some(res) => res,
            None => return false,
        };
        if content == before {
            self.selection = selection;
            return false;
        }
        self.checkpoint();
        if let Some(block) = node_at_mut(&mut self.doc, &self.selection.path) {
            block.content = content;
        }
        self.selection = selection;
        true
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.doc = snapshot.doc;
        self.selection = snapshot.selection;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            doc: self.doc.clone(),
            selection: self.selection.clone(),
        }
    }
}

impl EditorWidget for TreeEditor {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn document(&self) -> &Node {
        &self.doc
    }

    /// Images are blocks: the textblock is split at the cursor and the image
    /// goes between the halves, inside the block's own parent
    fn insert_image(&mut self, attrs: ImageAttrs) -> bool {
        if !self.ready {
            return false;
        }
        self.ensure_textblock();
        let sel = self.selection.clone();
        let block = match node_at(&self.doc, &sel.path) {
            Some(block) if block.kind.is_textblock() => block.clone(),
            _ => return false,
        };
        let (last, parent_path) = match sel.path.split_last() {
            Some((last, parent_path)) => (*last, parent_path.to_vec()),
            None => return false,
        };
        let (left, rest) = split_inline(block.content.clone(), sel.from);
        let (_, right) = split_inline(rest, sel.to - sel.from);

        let image = Node::image(&attrs);
        let mut first = block.clone();
        first.content = normalize(left);
        let mut second = block;
        second.content = normalize(right);

        let mut path = parent_path.clone();
        let (nodes, selection) = if first.content.is_empty() {
            path.push(last + 1);
            (vec![image, second], Selection::cursor(path, 0))
        } else if second.content.is_empty() {
            path.push(last);
            (vec![first, image], Selection::cursor(path, sel.from))
        } else {
            path.push(last + 2);
            (vec![first, image, second], Selection::cursor(path, 0))
        };

        self.checkpoint();
        match node_at_mut(&mut self.doc, &parent_path) {
            Some(parent) => {
                parent.content.splice(last..=last, nodes);
            }
            None => return false,
        }
        self.selection = selection;
        true
    }

    fn active_link(&self) -> Option<LinkAttrs> {
        let block = node_at(&self.doc, &self.selection.path)?;
        let node = node_covering(&block.content, self.selection.mark_pos())?;
        node.marks
            .iter()
            .find(|m| m.kind == MarkType::Link)
            .map(Mark::link_attrs)
    }

    fn extend_mark_range(&mut self, kind: &MarkType) {
        let block = match node_at(&self.doc, &self.selection.path) {
            Some(block) => block,
            None => return,
        };
        let content = &block.content;
        let spans = spans(content);
        let pos = self.selection.mark_pos();
        let idx = match spans.iter().position(|(s, e)| *s <= pos && pos < *e) {
            Some(idx) => idx,
            None => return,
        };
        let mark = match content[idx].marks.iter().find(|m| &m.kind == kind) {
            Some(mark) => mark.clone(),
            None => return,
        };
        let mut first = idx;
        while first > 0 && content[first - 1].marks.contains(&mark) {
            first -= 1;
        }
        let mut last = idx;
        while last + 1 < content.len() && content[last + 1].marks.contains(&mark) {
            last += 1;
        }
        self.selection.from = spans[first].0;
        self.selection.to = spans[last].1;
    }

    fn set_link(&mut self, link: LinkAttrs) -> bool {
        let mark = Mark::link(&link);
        self.edit_inline(|content, sel| {
            if sel.is_empty() {
                return None;
            }
            let content = map_range(content, sel.from, sel.to, |node| {
                node.marks.retain(|m| m.kind != MarkType::Link);
                node.marks.push(mark.clone());
            });
            Some((content, sel.clone()))
        })
    }

    fn unset_link(&mut self) -> bool {
        self.edit_inline(|content, sel| {
            let content = map_range(content, sel.from, sel.to, |node| {
                node.marks.retain(|m| m.kind != MarkType::Link);
            });
            Some((content, sel.clone()))
        })
    }

    fn toggle_mark(&mut self, kind: MarkType) -> bool {
        self.edit_inline(|content, sel| {
            if sel.is_empty() {
                return None;
            }
            let (_, rest) = split_inline(content.clone(), sel.from);
            let (mid, _) = split_inline(rest, sel.to - sel.from);
            let all_marked = mid
                .iter()
                .filter(|n| n.kind == NodeType::Text)
                .all(|n| n.has_mark(&kind));
            let content = map_range(content, sel.from, sel.to, |node| {
                if all_marked {
                    node.marks.retain(|m| m.kind != kind);
                } else if !node.has_mark(&kind) {
                    node.marks.push(Mark::new(kind.clone()));
                }
            });
            Some((content, sel.clone()))
        })
    }

    fn toggle_heading(&mut self, level: u8) -> bool {
        if !self.ready || !(1..=6).contains(&level) {
            return false;
        }
        let path = self.selection.path.clone();
        let block = match node_at(&self.doc, &path) {
            Some(block) if block.kind.is_textblock() => block,
            _ => return false,
        };
        let to_paragraph = block.kind == NodeType::Heading && block.heading_level() == Some(level);
        let content = block.content.clone();
        let replacement = if to_paragraph {
            Node::paragraph(content)
        } else {
            Node::heading(level, content)
        };
        self.checkpoint();
        if let Some(node) = node_at_mut(&mut self.doc, &path) {
            *node = replacement;
        }
        true
    }

    fn toggle_wrap(&mut self, kind: NodeType) -> bool {
        if !self.ready {
            return false;
        }
        let depth = match kind {
            NodeType::Blockquote => 1,
            NodeType::BulletList | NodeType::OrderedList => 2,
            _ => return false,
        };
        let path = self.selection.path.clone();
        let block = match node_at(&self.doc, &path) {
            Some(block) if block.kind.is_textblock() => block.clone(),
            _ => return false,
        };

        if path.len() > depth {
            let wrapper_path = &path[..path.len() - depth];
            if node_at(&self.doc, wrapper_path).map(|w| &w.kind) == Some(&kind) {
                let sole = (1..=depth).all(|up| {
                    node_at(&self.doc, &path[..path.len() - up])
                        .map_or(false, |n| n.content.len() == 1)
                });
                if !sole {
                    debug!("Not lifting a block out of a shared {}", kind);
                    return false;
                }
                let wrapper_path = wrapper_path.to_vec();
                self.checkpoint();
                if let Some(wrapper) = node_at_mut(&mut self.doc, &wrapper_path) {
                    *wrapper = block;
                }
                self.selection.path = wrapper_path;
                return true;
            }
        }

        let wrapped = match kind {
            NodeType::Blockquote => Node::with_content(kind, vec![block]),
            _ => Node::with_content(
                kind,
                vec![Node::with_content(NodeType::ListItem, vec![block])],
            ),
        };
        self.checkpoint();
        if let Some(node) = node_at_mut(&mut self.doc, &path) {
            *node = wrapped;
        }
        self.selection.path.extend(std::iter::repeat(0).take(depth));
        true
    }

    fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(snapshot) => {
                let current = self.snapshot();
                self.redo.push(current);
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(snapshot) => {
                let current = self.snapshot();
                self.undo.push(current);
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }
}

fn node_at<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    path.iter().try_fold(root, |node, idx| node.content.get(*idx))
}

fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    path.iter()
        .try_fold(root, |node, idx| node.content.get_mut(*idx))
}

fn first_textblock(node: &Node) -> Option<Vec<usize>> {
    for (idx, child) in node.content.iter().enumerate() {
        if child.kind.is_textblock() {
            return Some(vec![idx]);
        }
        if let Some(mut rest) = first_textblock(child) {
            rest.insert(0, idx);
            return Some(rest);
        }
    }
    None
}

fn content_len(content: &[Node]) -> usize {
    content.iter().map(Node::inline_len).sum()
}

fn spans(content: &[Node]) -> Vec<(usize, usize)> {
    let mut pos = 0;
    content
        .iter()
        .map(|node| {
            let start = pos;
            pos += node.inline_len();
            (start, pos)
        })
        .collect()
}

fn node_covering(content: &[Node], pos: usize) -> Option<&Node> {
    spans(content)
        .into_iter()
        .position(|(s, e)| s <= pos && pos < e)
        .map(|idx| &content[idx])
}

/// Split inline content at a position
fn split_inline(content: Fragment, at: usize) -> (Fragment, Fragment) {
    let mut left = Fragment::new();
    let mut right = Fragment::new();
    let mut pos = 0;
    for node in content {
        let len = node.inline_len();
        if pos + len <= at {
            left.push(node);
        } else if pos >= at {
            right.push(node);
        } else {
            let text = node.text_str();
            let byte = text
                .char_indices()
                .nth(at - pos)
                .map_or(text.len(), |(i, _)| i);
            let (a, b) = text.split_at(byte);
            left.push(Node::marked_text(a, node.marks.clone()));
            right.push(Node::marked_text(b, node.marks.clone()));
        }
        pos += len;
    }
    (left, right)
}

/// Apply `f` to the text nodes inside `from..to`
fn map_range<F>(content: Fragment, from: usize, to: usize, mut f: F) -> Fragment
where
    F: FnMut(&mut Node),
{
    let (left, rest) = split_inline(content, from);
    let (mut mid, right) = split_inline(rest, to.saturating_sub(from));
    for node in mid.iter_mut().filter(|n| n.kind == NodeType::Text) {
        f(node);
    }
    normalize(left.into_iter().chain(mid).chain(right).collect())
}

/// Drop empty text nodes and merge neighbours with equal marks
fn normalize(content: Fragment) -> Fragment {
    let mut out = Fragment::with_capacity(content.len());
    for node in content {
        if node.kind == NodeType::Text {
            if node.text_str().is_empty() {
                continue;
            }
            if let Some(prev) = out.last_mut() {
                if prev.kind == NodeType::Text && prev.marks == node.marks {
                    prev.text
                        .get_or_insert_with(String::new)
                        .push_str(node.text_str());
                    continue;
                }
            }
        }
        out.push(node);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plain_text;

    fn editor_with(text: &str) -> TreeEditor {
        let mut editor = TreeEditor::default();
        assert!(editor.insert_text(text));
        editor
    }

    fn inline(editor: &TreeEditor) -> &Fragment {
        &editor.document().content[0].content
    }

    #[test]
    fn test_typing_into_empty_doc() {
        let editor = editor_with("Lights");
        assert_eq!(
            editor.document(),
            &Node::doc(vec![Node::paragraph(vec![Node::text("Lights")])])
        );
        assert_eq!(editor.selection(), &Selection::cursor(vec![0], 6));
    }

    #[test]
    fn test_toggle_mark_splits_and_merges() {
        let mut editor = editor_with("Lights camera action");
        assert!(editor.select(Selection::range(vec![0], 7, 13)));
        assert!(editor.toggle_mark(MarkType::Bold));
        assert_eq!(
            inline(&editor),
            &vec![
                Node::text("Lights "),
                Node::marked_text("camera", vec![Mark::new(MarkType::Bold)]),
                Node::text(" action"),
            ]
        );
        assert!(editor.toggle_mark(MarkType::Bold));
        assert_eq!(inline(&editor), &vec![Node::text("Lights camera action")]);
    }

    #[test]
    fn test_marks_keep_application_order() {
        let mut editor = editor_with("Cut");
        editor.select(Selection::range(vec![0], 0, 3));
        editor.toggle_mark(MarkType::Italic);
        editor.toggle_mark(MarkType::Bold);
        assert_eq!(
            inline(&editor)[0].marks,
            vec![Mark::new(MarkType::Italic), Mark::new(MarkType::Bold)]
        );
    }

    #[test]
    fn test_link_extend_and_replace() {
        let mut editor = editor_with("see our reel now");
        editor.select(Selection::range(vec![0], 4, 12));
        assert!(editor.set_link(LinkAttrs::new("https://a.example")));

        editor.select(Selection::cursor(vec![0], 6));
        assert_eq!(
            editor.active_link().map(|l| l.href),
            Some("https://a.example".to_owned())
        );
        editor.extend_mark_range(&MarkType::Link);
        assert_eq!(editor.selection(), &Selection::range(vec![0], 4, 12));

        assert!(editor.set_link(LinkAttrs::new("https://b.example")));
        let linked: Vec<_> = inline(&editor)
            .iter()
            .filter(|n| n.has_mark(&MarkType::Link))
            .collect();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].text_str(), "our reel");
        assert_eq!(linked[0].marks[0].link_attrs().href, "https://b.example");

        assert!(editor.unset_link());
        assert_eq!(inline(&editor), &vec![Node::text("see our reel now")]);
    }

    fn kinds(nodes: &[Node]) -> Vec<NodeType> {
        nodes.iter().map(|n| n.kind.clone()).collect()
    }

    #[test]
    fn test_insert_image_splits_paragraph_at_cursor() {
        let mut editor = editor_with("before after");
        editor.select(Selection::cursor(vec![0], 6));
        assert!(editor.insert_image(ImageAttrs::new("https://cdn/x.png")));
        let doc = editor.document();
        assert_eq!(
            kinds(&doc.content),
            vec![NodeType::Paragraph, NodeType::Image, NodeType::Paragraph]
        );
        assert_eq!(doc.content[0].content, vec![Node::text("before")]);
        assert_eq!(doc.content[1].image_attrs().src, "https://cdn/x.png");
        assert_eq!(doc.content[2].content, vec![Node::text(" after")]);
        assert_eq!(editor.selection(), &Selection::cursor(vec![2], 0));
    }

    #[test]
    fn test_insert_image_at_block_edges() {
        let mut editor = editor_with("intro");
        editor.select(Selection::cursor(vec![0], 0));
        assert!(editor.insert_image(ImageAttrs::new("a.png")));
        assert_eq!(kinds(&editor.document().content), vec![NodeType::Image, NodeType::Paragraph]);
        assert_eq!(editor.selection(), &Selection::cursor(vec![1], 0));

        editor.select(Selection::cursor(vec![1], 5));
        assert!(editor.insert_image(ImageAttrs::new("b.png")));
        assert_eq!(
            kinds(&editor.document().content),
            vec![NodeType::Image, NodeType::Paragraph, NodeType::Image]
        );
        assert_eq!(editor.selection(), &Selection::cursor(vec![1], 5));
    }

    #[test]
    fn test_insert_image_inside_list_item() {
        let mut editor = editor_with("onetwo");
        assert!(editor.toggle_wrap(NodeType::BulletList));
        editor.insert_text("!");
        editor.select(Selection::cursor(vec![0, 0, 0], 3));
        assert!(editor.insert_image(ImageAttrs::new("https://cdn/x.png")));

        let doc = editor.document();
        assert_eq!(doc.content.len(), 1);
        let item = &doc.content[0].content[0];
        assert_eq!(item.kind, NodeType::ListItem);
        assert_eq!(
            kinds(&item.content),
            vec![NodeType::Paragraph, NodeType::Image, NodeType::Paragraph]
        );
        assert_eq!(plain_text(&item.content[0]), "one");
        assert_eq!(plain_text(&item.content[2]), "two!");
        assert_eq!(editor.selection(), &Selection::cursor(vec![0, 0, 2], 0));
    }

    #[test]
    fn test_insert_image_replaces_selection() {
        let mut editor = editor_with("keep drop keep");
        editor.select(Selection::range(vec![0], 4, 9));
        assert!(editor.insert_image(ImageAttrs::new("a.png")));
        assert_eq!(plain_text(&editor.document().content[0]), "keep");
        assert_eq!(plain_text(&editor.document().content[2]), " keep");
        assert!(editor.undo());
        assert_eq!(plain_text(editor.document()), "keep drop keep");
    }

    #[test]
    fn test_split_block() {
        let mut editor = editor_with("HelloWorld");
        editor.select(Selection::cursor(vec![0], 5));
        assert!(editor.split_block());
        assert_eq!(plain_text(editor.document()), "Hello\nWorld");
        assert_eq!(editor.selection(), &Selection::cursor(vec![1], 0));
    }

    #[test]
    fn test_heading_and_wrap_toggles() {
        let mut editor = editor_with("Title");
        assert!(editor.toggle_heading(1));
        assert_eq!(editor.document().content[0].heading_level(), Some(1));
        assert!(editor.toggle_heading(1));
        assert_eq!(editor.document().content[0].kind, NodeType::Paragraph);

        assert!(editor.toggle_wrap(NodeType::BulletList));
        assert_eq!(editor.selection().path, vec![0, 0, 0]);
        assert_eq!(editor.document().content[0].kind, NodeType::BulletList);
        assert!(editor.toggle_wrap(NodeType::BulletList));
        assert_eq!(editor.selection().path, vec![0]);
        assert_eq!(editor.document().content[0].kind, NodeType::Paragraph);

        assert!(editor.toggle_wrap(NodeType::Blockquote));
        assert_eq!(editor.document().content[0].kind, NodeType::Blockquote);
        assert!(!editor.toggle_wrap(NodeType::Paragraph));
    }

    #[test]
    fn test_undo_redo() {
        let mut editor = editor_with("one");
        editor.insert_text(" two");
        assert!(editor.undo());
        assert_eq!(plain_text(editor.document()), "one");
        assert!(editor.redo());
        assert_eq!(plain_text(editor.document()), "one two");
        assert!(editor.undo());
        assert!(editor.undo());
        assert!(!editor.undo());
        assert_eq!(editor.document(), &Node::doc(vec![Node::paragraph(vec![])]));
    }

    #[test]
    fn test_typing_after_link_is_plain() {
        let mut editor = editor_with("reel");
        editor.select(Selection::range(vec![0], 0, 4));
        editor.set_link(LinkAttrs::new("https://a.example"));
        editor.select(Selection::cursor(vec![0], 4));
        editor.insert_text("!");
        assert_eq!(inline(&editor)[1], Node::text("!"));
    }

    #[test]
    fn test_loading_widget_ignores_commands() {
        let mut editor = TreeEditor::loading();
        assert!(!editor.is_ready());
        assert!(!editor.insert_text("x"));
        assert!(!editor.insert_image(ImageAttrs::new("a")));
        editor.load(Node::empty_doc());
        assert!(editor.is_ready());
    }

    #[test]
    fn test_unicode_offsets() {
        let mut editor = editor_with("नमस्ते world");
        let len = "नमस्ते".chars().count();
        editor.select(Selection::range(vec![0], 0, len));
        assert!(editor.toggle_mark(MarkType::Italic));
        assert_eq!(inline(&editor)[0].text_str(), "नमस्ते");
        assert_eq!(editor.character_count(), len + 6);
    }
}
