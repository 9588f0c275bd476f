//! # Tree to HTML rendering
//!
//! A pure function from a document tree to markup. Rendering never fails:
//! every missing attribute has a fallback and unknown node or mark types
//! produce no output of their own.
//!
//! Marks wrap the text in the order they are stored, the first mark ending
//! up innermost. `[bold, italic]` becomes `<em><strong>…</strong></em>`.
mod escape;

pub use escape::{escape_attr, escape_html};

use crate::model::{de, LinkAttrs, Mark, MarkType, Node, NodeType, DEFAULT_HEADING_LEVEL};
use escape::safe_href;
use serde_json::Value;

const PARAGRAPH: &str = "mb-4 text-gray-700 dark:text-gray-300 leading-relaxed";
const BULLET_LIST: &str =
    "list-disc list-outside mb-4 ml-6 space-y-2 text-gray-700 dark:text-gray-300";
const ORDERED_LIST: &str =
    "list-decimal list-outside mb-4 ml-6 space-y-2 text-gray-700 dark:text-gray-300";
const BLOCKQUOTE: &str = "border-l-4 border-blue-500 pl-4 py-2 mb-4 italic text-gray-600 dark:text-gray-400 bg-gray-50 dark:bg-gray-800";
const CODE_BLOCK: &str = "bg-gray-900 text-gray-100 p-4 rounded-lg mb-4 overflow-x-auto";
const FIGURE: &str = "my-6 w-full";
const IMAGE: &str = "w-full h-auto rounded-lg object-cover";
const CAPTION: &str = "text-center text-sm text-gray-500 mt-2 italic";
const BOLD: &str = "font-bold";
const ITALIC: &str = "italic";
const INLINE_CODE: &str = "bg-gray-200 dark:bg-gray-700 px-1 py-0.5 rounded text-sm font-mono";
const LINK: &str = "text-blue-600 dark:text-blue-400 hover:underline";

/// Element and class for each heading level, indexed by `level - 1`
const HEADINGS: [(&str, &str); 6] = [
    ("h1", "text-4xl font-bold mb-6 mt-8 text-gray-900 dark:text-white"),
    ("h2", "text-3xl font-bold mb-5 mt-7 text-gray-900 dark:text-white"),
    ("h3", "text-2xl font-bold mb-4 mt-6 text-gray-900 dark:text-white"),
    ("h4", "text-xl font-semibold mb-3 mt-5 text-gray-900 dark:text-white"),
    ("h5", "text-lg font-semibold mb-3 mt-4 text-gray-900 dark:text-white"),
    ("h6", "text-base font-semibold mb-2 mt-3 text-gray-900 dark:text-white"),
];

const NOOPENER: &str = "noopener noreferrer";

/// Render a document tree to HTML
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    render_node(node, &mut out);
    out
}

/// Render a stored tree without a separate parse step
pub fn render_value(value: &Value) -> String {
    render(&Node::from_value(value))
}

fn render_node(node: &Node, out: &mut String) {
    match &node.kind {
        NodeType::Doc => render_children(node, out),
        NodeType::Paragraph => render_block(node, "p", PARAGRAPH, out),
        NodeType::Heading => {
            let level = node.heading_level().unwrap_or(DEFAULT_HEADING_LEVEL);
            let (tag, class) = HEADINGS[usize::from(level) - 1];
            render_block(node, tag, class, out);
        }
        NodeType::BulletList => render_block(node, "ul", BULLET_LIST, out),
        NodeType::OrderedList => render_ordered_list(node, out),
        NodeType::ListItem => {
            out.push_str("<li>");
            render_children(node, out);
            out.push_str("</li>");
        }
        NodeType::Blockquote => render_block(node, "blockquote", BLOCKQUOTE, out),
        NodeType::CodeBlock => render_code_block(node, out),
        NodeType::Image => render_image(node, out),
        NodeType::Text => out.push_str(&render_text(node)),
        NodeType::HardBreak => out.push_str("<br>"),
        NodeType::Unknown(_) => {}
    }
}

fn render_children(node: &Node, out: &mut String) {
    for child in &node.content {
        render_node(child, out);
    }
}

fn render_block(node: &Node, tag: &str, class: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    push_attr(out, "class", class);
    out.push('>');
    render_children(node, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn render_ordered_list(node: &Node, out: &mut String) {
    out.push_str("<ol");
    if let Some(start) = de::int_field(&node.attrs, "start").filter(|s| *s != 1) {
        push_attr(out, "start", &start.to_string());
    }
    push_attr(out, "class", ORDERED_LIST);
    out.push('>');
    render_children(node, out);
    out.push_str("</ol>");
}

fn render_code_block(node: &Node, out: &mut String) {
    out.push_str("<pre");
    push_attr(out, "class", CODE_BLOCK);
    out.push_str("><code");
    if let Some(lang) = de::str_field(&node.attrs, "language") {
        if !lang.is_empty() {
            push_attr(out, "class", &format!("language-{}", lang));
        }
    }
    out.push('>');
    let mut code = String::new();
    code_text(node, &mut code);
    out.push_str(&escape_html(&code));
    out.push_str("</code></pre>");
}

// Code content is raw text: marks are not applied
fn code_text(node: &Node, code: &mut String) {
    for child in &node.content {
        match child.kind {
            NodeType::Text => code.push_str(child.text_str()),
            NodeType::HardBreak => code.push('\n'),
            _ => code_text(child, code),
        }
    }
}

fn render_image(node: &Node, out: &mut String) {
    let attrs = node.image_attrs();
    out.push_str("<figure");
    push_attr(out, "class", FIGURE);
    out.push_str("><img");
    push_attr(out, "src", &attrs.src);
    push_attr(out, "alt", attrs.alt.as_deref().unwrap_or_default());
    push_attr(out, "class", IMAGE);
    push_attr(out, "loading", "lazy");
    out.push('>');
    if let Some(title) = attrs.title.as_deref().filter(|t| !t.is_empty()) {
        out.push_str("<figcaption");
        push_attr(out, "class", CAPTION);
        out.push('>');
        out.push_str(&escape_html(title));
        out.push_str("</figcaption>");
    }
    out.push_str("</figure>");
}

fn render_text(node: &Node) -> String {
    node.marks
        .iter()
        .fold(escape_html(node.text_str()), |inner, mark| wrap_mark(mark, inner))
}

fn wrap_mark(mark: &Mark, inner: String) -> String {
    match &mark.kind {
        MarkType::Bold => format!("<strong class=\"{}\">{}</strong>", BOLD, inner),
        MarkType::Italic => format!("<em class=\"{}\">{}</em>", ITALIC, inner),
        MarkType::Underline => format!("<u>{}</u>", inner),
        MarkType::Strike => format!("<s>{}</s>", inner),
        MarkType::Code => format!("<code class=\"{}\">{}</code>", INLINE_CODE, inner),
        MarkType::Link => render_link(&mark.link_attrs(), &inner),
        MarkType::Unknown(_) => inner,
    }
}

fn render_link(link: &LinkAttrs, inner: &str) -> String {
    let mut out = String::from("<a");
    push_attr(&mut out, "href", safe_href(&link.href));
    if let Some(target) = link.target.as_deref().filter(|t| !t.is_empty()) {
        push_attr(&mut out, "target", target);
    }
    if link.is_nofollow() {
        push_attr(&mut out, "rel", &format!("{} nofollow", NOOPENER));
    } else {
        push_attr(&mut out, "rel", NOOPENER);
    }
    push_attr(&mut out, "class", LINK);
    out.push('>');
    out.push_str(inner);
    out.push_str("</a>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageAttrs;
    use serde_json::json;

    fn text_with(marks: Value) -> Value {
        json!({"type": "doc", "content": [{"type": "text", "text": "Hi", "marks": marks}]})
    }

    #[test]
    fn test_bold_paragraph_exact() {
        let tree = json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "content": [{"type": "text", "text": "Hello", "marks": [{"type": "bold"}]}]
            }]
        });
        assert_eq!(
            render_value(&tree),
            "<p class=\"mb-4 text-gray-700 dark:text-gray-300 leading-relaxed\">\
             <strong class=\"font-bold\">Hello</strong></p>"
        );
    }

    #[test]
    fn test_mark_order() {
        let bold_italic = text_with(json!([{"type": "bold"}, {"type": "italic"}]));
        let italic_bold = text_with(json!([{"type": "italic"}, {"type": "bold"}]));

        let first = render_value(&bold_italic);
        assert_eq!(first, render_value(&bold_italic));
        assert_eq!(
            first,
            "<em class=\"italic\"><strong class=\"font-bold\">Hi</strong></em>"
        );

        let swapped = render_value(&italic_bold);
        assert_eq!(swapped, render_value(&italic_bold));
        assert_eq!(
            swapped,
            "<strong class=\"font-bold\"><em class=\"italic\">Hi</em></strong>"
        );
    }

    #[test]
    fn test_all_marks() {
        let html = render_value(&text_with(json!([
            {"type": "underline"},
            {"type": "strike"},
            {"type": "code"},
            {"type": "sparkle"}
        ])));
        assert_eq!(
            html,
            format!("<code class=\"{}\"><s><u>Hi</u></s></code>", INLINE_CODE)
        );
    }

    #[test]
    fn test_heading_default_level() {
        let no_attrs = json!({"type": "heading", "content": [{"type": "text", "text": "T"}]});
        let too_deep = json!({"type": "heading", "attrs": {"level": 9}, "content": [{"type": "text", "text": "T"}]});
        let expected = format!("<h2 class=\"{}\">T</h2>", HEADINGS[1].1);
        assert_eq!(render_value(&no_attrs), expected);
        assert_eq!(render_value(&too_deep), expected);
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6u8 {
            let html = render(&Node::heading(level, vec![Node::text("T")]));
            assert!(html.starts_with(&format!("<h{} ", level)));
            assert!(html.ends_with(&format!("</h{}>", level)));
        }
    }

    #[test]
    fn test_empty_image() {
        let html = render_value(&json!({"type": "image", "attrs": {}}));
        assert_eq!(
            html,
            format!(
                "<figure class=\"{}\"><img src=\"\" alt=\"\" class=\"{}\" loading=\"lazy\"></figure>",
                FIGURE, IMAGE
            )
        );
        assert!(render_value(&json!({"type": "image"})).contains("<img src=\"\" alt=\"\""));
    }

    #[test]
    fn test_image_caption() {
        let mut attrs = ImageAttrs::new("https://cdn.example.com/blogs/set.png");
        attrs.alt = Some("On set".into());
        attrs.title = Some("Day <1>".into());
        let html = render(&Node::image(&attrs));
        assert!(html.contains("src=\"https://cdn.example.com/blogs/set.png\" alt=\"On set\""));
        assert!(html.contains(&format!(
            "<figcaption class=\"{}\">Day &lt;1&gt;</figcaption>",
            CAPTION
        )));
    }

    #[test]
    fn test_unknown_node_keeps_siblings() {
        let tree = json!({
            "type": "doc",
            "content": [
                {"type": "text", "text": "before"},
                {"type": "futureWidget", "content": [{"type": "text", "text": "hidden"}]},
                {"type": "text", "text": "after"}
            ]
        });
        assert_eq!(render_value(&tree), "beforeafter");
        assert_eq!(render_value(&json!({"type": "futureWidget"})), "");
    }

    #[test]
    fn test_link_always_noopener() {
        let plain = render_value(&text_with(json!([{"type": "link", "attrs": {"href": "https://a.b"}}])));
        assert_eq!(
            plain,
            format!(
                "<a href=\"https://a.b\" rel=\"noopener noreferrer\" class=\"{}\">Hi</a>",
                LINK
            )
        );

        let overridden = render_value(&text_with(json!([{
            "type": "link",
            "attrs": {"href": "https://a.b", "target": "_blank", "rel": "opener"}
        }])));
        assert!(overridden.contains("target=\"_blank\" rel=\"noopener noreferrer\""));

        let nofollow = render_value(&text_with(json!([{
            "type": "link",
            "attrs": {"href": "https://a.b", "rel": "nofollow"}
        }])));
        assert!(nofollow.contains("rel=\"noopener noreferrer nofollow\""));

        let bare = render_value(&text_with(json!([{"type": "link"}])));
        assert!(bare.starts_with("<a href=\"#\" rel=\"noopener noreferrer\""));
    }

    #[test]
    fn test_script_href_neutralized() {
        let html = render_value(&text_with(json!([{
            "type": "link",
            "attrs": {"href": "javascript:alert(1)"}
        }])));
        assert!(html.starts_with("<a href=\"#\""));
    }

    #[test]
    fn test_escapes_content() {
        let tree = json!({"type": "text", "text": "<script>alert('x')</script>"});
        assert_eq!(
            render_value(&tree),
            "&lt;script&gt;alert('x')&lt;/script&gt;"
        );
        let tree = json!({"type": "image", "attrs": {"src": "a\" onerror=\"x"}});
        assert!(render_value(&tree).contains("src=\"a&quot; onerror=&quot;x\""));
    }

    #[test]
    fn test_lists_and_quote() {
        let tree = json!({
            "type": "doc",
            "content": [
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "one"}]},
                        {"type": "orderedList", "attrs": {"start": 3}, "content": [
                            {"type": "listItem", "content": [{"type": "text", "text": "nested"}]}
                        ]}
                    ]}
                ]},
                {"type": "blockquote", "content": [{"type": "text", "text": "q"}]}
            ]
        });
        assert_eq!(
            render_value(&tree),
            format!(
                "<ul class=\"{ul}\"><li><p class=\"{p}\">one</p>\
                 <ol start=\"3\" class=\"{ol}\"><li>nested</li></ol></li></ul>\
                 <blockquote class=\"{bq}\">q</blockquote>",
                ul = BULLET_LIST,
                p = PARAGRAPH,
                ol = ORDERED_LIST,
                bq = BLOCKQUOTE
            )
        );
    }

    #[test]
    fn test_code_block_is_raw() {
        let tree = json!({
            "type": "codeBlock",
            "attrs": {"language": "rust"},
            "content": [
                {"type": "text", "text": "let a = 1 < 2;", "marks": [{"type": "bold"}]},
                {"type": "hardBreak"},
                {"type": "text", "text": "a"}
            ]
        });
        assert_eq!(
            render_value(&tree),
            format!(
                "<pre class=\"{}\"><code class=\"language-rust\">let a = 1 &lt; 2;\na</code></pre>",
                CODE_BLOCK
            )
        );
    }

    #[test]
    fn test_hard_break_and_empty_content() {
        let tree = json!({"type": "paragraph", "content": [
            {"type": "text", "text": "a"}, {"type": "hardBreak"}, {"type": "text", "text": "b"}
        ]});
        assert_eq!(render_value(&tree), format!("<p class=\"{}\">a<br>b</p>", PARAGRAPH));
        assert_eq!(
            render_value(&json!({"type": "paragraph", "content": []})),
            format!("<p class=\"{}\"></p>", PARAGRAPH)
        );
        assert_eq!(render_value(&json!("not a tree")), "");
    }

    #[test]
    fn test_deep_nesting() {
        let mut node = Node::text("deep");
        for _ in 0..500 {
            node = Node::with_content(NodeType::Blockquote, vec![node]);
        }
        let html = render(&node);
        assert_eq!(html.matches("<blockquote").count(), 500);
        assert!(html.contains(">deep<"));
    }
}
