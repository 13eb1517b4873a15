//! HTML serializer for the crate tree.
//!
//! Rendering hints left in a node's [`Data`] bag take precedence over the
//! default element: `hName` replaces the tag and `hProperties` become
//! attributes (`className` is emitted as `class`).

use crate::data::{CLASS_NAME_KEY, Data};
use crate::mdast::{Code, Heading, Image, Link, List, ListItem, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rendering options for the HTML serializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlOptions {
    /// Whether raw HTML nodes pass through unescaped.
    #[serde(default)]
    pub allow_raw_html: bool,
}

/// Renders a tree to an HTML string.
pub fn to_html(node: &Node, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    render_node(node, &mut ctx);
    ctx.output
}

/// Serializer state during traversal.
struct Context<'a> {
    output: String,
    options: &'a HtmlOptions,
    /// One entry per open list: whether it is tight.
    lists: Vec<bool>,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            output: String::new(),
            options,
            lists: Vec::new(),
        }
    }

    fn push_raw(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn push_text(&mut self, s: &str) {
        self.output.push_str(&html_escape::encode_text(s));
    }

    fn push_attr_value(&mut self, s: &str) {
        self.output
            .push_str(&html_escape::encode_double_quoted_attribute(s));
    }

    fn push_attr(&mut self, name: &str, value: &str) {
        self.push_raw(" ");
        self.push_raw(name);
        self.push_raw("=\"");
        self.push_attr_value(value);
        self.push_raw("\"");
    }

    fn is_in_tight_list(&self) -> bool {
        self.lists.last().copied().unwrap_or(false)
    }

    /// Opens `default_tag` (or the `hName` override) with hinted properties.
    ///
    /// Returns the tag actually used so the caller can close it.
    fn open(&mut self, default_tag: &str, data: &Data) -> String {
        let tag = data.element_name().unwrap_or(default_tag).to_string();
        self.push_raw("<");
        self.push_raw(&tag);
        self.push_properties(data);
        self.push_raw(">");
        tag
    }

    fn close(&mut self, tag: &str) {
        self.push_raw("</");
        self.push_raw(tag);
        self.push_raw(">");
    }

    fn push_properties(&mut self, data: &Data) {
        if let Some(class_name) = data.class_name().filter(|c| !c.is_empty()) {
            self.push_attr("class", &class_name);
        }
        let Some(properties) = data.properties() else {
            return;
        };
        for (key, value) in properties {
            if key == CLASS_NAME_KEY {
                continue;
            }
            match value {
                Value::String(s) => self.push_attr(key, s),
                Value::Number(n) => self.push_attr(key, &n.to_string()),
                Value::Bool(true) => {
                    self.push_raw(" ");
                    self.push_raw(key);
                }
                Value::Array(items) => {
                    let joined = items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(" ");
                    self.push_attr(key, &joined);
                }
                Value::Bool(false) | Value::Null | Value::Object(_) => {}
            }
        }
    }
}

fn render_children(children: &[Node], ctx: &mut Context) {
    for child in children {
        render_node(child, ctx);
    }
}

/// Renders a container element around `children`.
fn render_element(default_tag: &str, data: &Data, children: &[Node], ctx: &mut Context) {
    let tag = ctx.open(default_tag, data);
    render_children(children, ctx);
    ctx.close(&tag);
}

/// Renders a paragraph, suppressing `<p>` wrappers in tight lists.
///
/// A paragraph carrying rendering hints always gets its element.
fn render_paragraph(children: &[Node], data: &Data, ctx: &mut Context) {
    if ctx.is_in_tight_list() && data.is_empty() {
        render_children(children, ctx);
    } else {
        render_element("p", data, children, ctx);
    }
}

fn render_heading(heading: &Heading, ctx: &mut Context) {
    let tag = format!("h{}", heading.depth.clamp(1, 6));
    render_element(&tag, &heading.data, &heading.children, ctx);
}

/// Renders a list node as `<ul>` or `<ol>`.
fn render_list(list: &List, ctx: &mut Context) {
    let default_tag = if list.ordered { "ol" } else { "ul" };
    let tag = data_tag(&list.data, default_tag);
    ctx.push_raw("<");
    ctx.push_raw(&tag);
    if let Some(start) = list.start.filter(|s| list.ordered && *s != 1) {
        ctx.push_attr("start", &start.to_string());
    }
    ctx.push_properties(&list.data);
    ctx.push_raw(">");

    ctx.lists.push(!list.spread);
    render_children(&list.children, ctx);
    ctx.lists.pop();

    ctx.close(&tag);
}

/// Renders a list item, with a disabled checkbox for GFM task items.
fn render_list_item(item: &ListItem, ctx: &mut Context) {
    let tag = ctx.open("li", &item.data);
    if let Some(checked) = item.checked {
        let checked_str = if checked { " checked" } else { "" };
        ctx.push_raw(&format!(
            "<input type=\"checkbox\" disabled{} /> ",
            checked_str
        ));
    }
    render_children(&item.children, ctx);
    ctx.close(&tag);
}

fn render_code(code: &Code, ctx: &mut Context) {
    let tag = ctx.open("pre", &code.data);
    ctx.push_raw("<code");
    if let Some(lang) = &code.lang {
        ctx.push_attr("class", &format!("language-{}", lang));
    }
    ctx.push_raw(">");
    ctx.push_text(&code.value);
    ctx.push_raw("</code>");
    ctx.close(&tag);
}

fn render_link(link: &Link, ctx: &mut Context) {
    let tag = data_tag(&link.data, "a");
    ctx.push_raw("<");
    ctx.push_raw(&tag);
    ctx.push_attr("href", &link.url);
    if let Some(title) = &link.title {
        ctx.push_attr("title", title);
    }
    ctx.push_properties(&link.data);
    ctx.push_raw(">");
    render_children(&link.children, ctx);
    ctx.close(&tag);
}

fn render_image(img: &Image, ctx: &mut Context) {
    ctx.push_raw("<img");
    ctx.push_attr("src", &img.url);
    ctx.push_attr("alt", &img.alt);
    if let Some(title) = &img.title {
        ctx.push_attr("title", title);
    }
    ctx.push_properties(&img.data);
    ctx.push_raw(" />");
}

fn data_tag(data: &Data, default_tag: &str) -> String {
    data.element_name().unwrap_or(default_tag).to_string()
}

/// Recursively renders a node to HTML.
fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => render_children(&root.children, ctx),
        Node::Blockquote(quote) => render_element("blockquote", &quote.data, &quote.children, ctx),
        Node::Paragraph(para) => render_paragraph(&para.children, &para.data, ctx),
        Node::Heading(heading) => render_heading(heading, ctx),
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Code(code) => render_code(code, ctx),
        Node::Html(html) => {
            if ctx.options.allow_raw_html {
                ctx.push_raw(&html.value);
            } else {
                log::debug!(
                    "Raw HTML in markdown will be escaped for security: {}",
                    html.value
                );
                ctx.push_text(&html.value);
            }
        }
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Text(text) => {
            if text.data.is_empty() {
                ctx.push_text(&text.value);
            } else {
                let tag = ctx.open("span", &text.data);
                ctx.push_text(&text.value);
                ctx.close(&tag);
            }
        }
        Node::Strong(strong) => render_element("strong", &strong.data, &strong.children, ctx),
        Node::Emphasis(em) => render_element("em", &em.data, &em.children, ctx),
        Node::Delete(del) => render_element("del", &del.data, &del.children, ctx),
        Node::InlineCode(code) => {
            let tag = ctx.open("code", &code.data);
            ctx.push_text(&code.value);
            ctx.close(&tag);
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::Link(link) => render_link(link, ctx),
        Node::Image(img) => render_image(img, ctx),
        Node::Other(other) => {
            if other.children.is_empty() {
                log::warn!("Unhandled markdown node type: {}", other.kind);
            } else {
                render_children(&other.children, ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdast::{Blockquote, Strong};
    use crate::parse::{ParseOptions, parse_tree};

    fn render(input: &str) -> String {
        let root = parse_tree(input, &ParseOptions::default()).unwrap();
        to_html(&root, &HtmlOptions::default())
    }

    #[test]
    fn renders_basic_blocks() {
        assert_eq!(
            render("# Title\n\nSome *emphasis* and **strong**."),
            "<h1>Title</h1><p>Some <em>emphasis</em> and <strong>strong</strong>.</p>"
        );
    }

    #[test]
    fn tight_lists_drop_paragraphs() {
        assert_eq!(render("- a\n- b\n"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn escapes_text_and_attributes() {
        assert_eq!(
            render("[a < b](https://example.com/ \"say \\\"hi\\\"\")"),
            "<p><a href=\"https://example.com/\" title=\"say &quot;hi&quot;\">a &lt; b</a></p>"
        );
    }

    #[test]
    fn honours_element_name_and_class_hints() {
        let mut quote_data = Data::with_class_name("admonition note");
        quote_data.set_element_name("div");
        let tree = Node::Blockquote(Blockquote {
            children: vec![
                Node::paragraph(
                    vec![Node::text("Note")],
                    Data::with_class_name("admonition-title"),
                ),
                Node::paragraph(
                    vec![Node::Strong(Strong {
                        children: vec![Node::text("body")],
                        data: Data::with_class_name("b"),
                    })],
                    Data::new(),
                ),
            ],
            data: quote_data,
        });

        assert_eq!(
            to_html(&tree, &HtmlOptions::default()),
            "<div class=\"admonition note\"><p class=\"admonition-title\">Note</p>\
             <p><strong class=\"b\">body</strong></p></div>"
        );
    }

    #[test]
    fn extra_properties_become_attributes() {
        let data: Data = serde_json::from_value(serde_json::json!({
            "hProperties": { "className": ["x", "y"], "id": "n1" }
        }))
        .unwrap();
        let tree = Node::paragraph(vec![Node::text("t")], data);
        assert_eq!(
            to_html(&tree, &HtmlOptions::default()),
            "<p class=\"x y\" id=\"n1\">t</p>"
        );
    }
}
