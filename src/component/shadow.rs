//! Isolated render target: style nodes, markup, and "diff-lite" reconciliation.
//!
//! A [`ShadowRoot`] holds a flat list of [`ShadowNode`]s. Reconciling a render
//! keeps every style node (moved to the front, original order preserved) and
//! replaces everything else with the new output.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::dom::node::Attributes;

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A `<style>` block inside a shadow root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleNode {
    pub id: Option<String>,
    pub css: String,
}

/// A pre-built element for renders that return a subtree instead of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<ShadowNode>,
}

impl MarkupElement {
    /// An empty element named `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute (builder).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Append a child node (builder).
    pub fn child(mut self, node: impl Into<ShadowNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child (builder).
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ShadowNode::Text(text.into()))
    }
}

/// One node in a shadow root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShadowNode {
    Style(StyleNode),
    /// Raw markup produced by a render function, inserted verbatim.
    Markup(String),
    Element(MarkupElement),
    /// Text content; escaped on serialization.
    Text(String),
}

impl ShadowNode {
    /// Whether this is a `<style>` node.
    pub fn is_style(&self) -> bool {
        matches!(self, ShadowNode::Style(_))
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            ShadowNode::Style(style) => {
                match &style.id {
                    Some(id) => {
                        let _ = write!(out, "<style id=\"{}\">", escape(id, true));
                    }
                    None => out.push_str("<style>"),
                }
                out.push_str(&style.css);
                out.push_str("</style>");
            }
            ShadowNode::Markup(markup) => out.push_str(markup),
            ShadowNode::Text(text) => out.push_str(&escape(text, false)),
            ShadowNode::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in el.attributes.iter() {
                    if value.is_empty() {
                        let _ = write!(out, " {name}");
                    } else {
                        let _ = write!(out, " {name}=\"{}\"", escape(value, true));
                    }
                }
                out.push('>');
                for child in &el.children {
                    child.write_markup(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

impl From<MarkupElement> for ShadowNode {
    fn from(el: MarkupElement) -> Self {
        ShadowNode::Element(el)
    }
}

/// What a render function produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    /// Markup text.
    Markup(String),
    /// A pre-built list of nodes.
    Nodes(Vec<ShadowNode>),
}

impl From<String> for RenderOutput {
    fn from(markup: String) -> Self {
        RenderOutput::Markup(markup)
    }
}

impl From<&str> for RenderOutput {
    fn from(markup: &str) -> Self {
        RenderOutput::Markup(markup.to_owned())
    }
}

impl From<Vec<ShadowNode>> for RenderOutput {
    fn from(nodes: Vec<ShadowNode>) -> Self {
        RenderOutput::Nodes(nodes)
    }
}

impl From<MarkupElement> for RenderOutput {
    fn from(el: MarkupElement) -> Self {
        RenderOutput::Nodes(vec![el.into()])
    }
}

// ---------------------------------------------------------------------------
// ShadowRoot
// ---------------------------------------------------------------------------

/// A component instance's isolated style + markup subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowRoot {
    nodes: Vec<ShadowNode>,
}

impl ShadowRoot {
    /// An empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// All nodes in order, styles first.
    pub fn nodes(&self) -> &[ShadowNode] {
        &self.nodes
    }

    /// The style node with the given id.
    pub fn style(&self, id: &str) -> Option<&StyleNode> {
        self.styles().find(|s| s.id.as_deref() == Some(id))
    }

    /// Style nodes in order.
    pub fn styles(&self) -> impl Iterator<Item = &StyleNode> {
        self.nodes.iter().filter_map(|n| match n {
            ShadowNode::Style(s) => Some(s),
            _ => None,
        })
    }

    /// Non-style nodes.
    pub fn content(&self) -> impl Iterator<Item = &ShadowNode> {
        self.nodes.iter().filter(|n| !n.is_style())
    }

    /// Insert a style block with `id` at the front unless one already exists.
    ///
    /// Returns whether a node was inserted.
    pub fn adopt_style(&mut self, id: &str, css: &str) -> bool {
        if self.style(id).is_some() {
            return false;
        }
        self.nodes.insert(
            0,
            ShadowNode::Style(StyleNode {
                id: Some(id.to_owned()),
                css: css.to_owned(),
            }),
        );
        true
    }

    /// Replace all non-style content with `output`, keeping style nodes in front.
    ///
    /// Style nodes inside `output` are merged into the leading styles: one
    /// whose id matches a kept style overwrites it in place, an anonymous one
    /// equal to a kept style is skipped, anything else joins the end of the
    /// style prefix. Re-rendering the same output never grows the root.
    pub fn reconcile(&mut self, output: RenderOutput) {
        let mut next: Vec<ShadowNode> = std::mem::take(&mut self.nodes)
            .into_iter()
            .filter(ShadowNode::is_style)
            .collect();
        match output {
            RenderOutput::Markup(markup) if markup.is_empty() => {}
            RenderOutput::Markup(markup) => next.push(ShadowNode::Markup(markup)),
            RenderOutput::Nodes(nodes) => {
                for node in nodes {
                    match node {
                        ShadowNode::Style(style) => merge_style(&mut next, style),
                        other => next.push(other),
                    }
                }
            }
        }
        self.nodes = next;
    }

    /// Write instance-scoped custom properties into the style block `id`.
    ///
    /// Entries with empty or absent values are dropped. If nothing remains the
    /// block is removed; otherwise it is created once (after the leading style
    /// nodes) and updated in place afterwards. Variables are written sorted by
    /// name, so equal mappings always produce equal blocks.
    pub fn set_dynamic_vars<K, V, I>(&mut self, id: &str, vars: I)
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        let vars: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value?;
                let value = value.as_ref().trim();
                let name = name.as_ref().trim();
                (!value.is_empty() && !name.is_empty())
                    .then(|| (custom_property(name), value.to_owned()))
            })
            .collect();

        let existing = self
            .nodes
            .iter()
            .position(|n| matches!(n, ShadowNode::Style(s) if s.id.as_deref() == Some(id)));

        if vars.is_empty() {
            if let Some(pos) = existing {
                self.nodes.remove(pos);
            }
            return;
        }

        let mut css = String::from(":host {");
        for (name, value) in &vars {
            let _ = write!(css, " {name}: {value};");
        }
        css.push_str(" }");

        match existing {
            Some(pos) => {
                if let ShadowNode::Style(style) = &mut self.nodes[pos] {
                    style.css = css;
                }
            }
            None => {
                let pos = self.nodes.iter().take_while(|n| n.is_style()).count();
                self.nodes.insert(
                    pos,
                    ShadowNode::Style(StyleNode {
                        id: Some(id.to_owned()),
                        css,
                    }),
                );
            }
        }
    }

    /// Serialize the whole root to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_markup(&mut out);
        }
        out
    }

    /// Serialize only the non-style content.
    pub fn content_markup(&self) -> String {
        let mut out = String::new();
        for node in self.content() {
            node.write_markup(&mut out);
        }
        out
    }
}

/// Fold a rendered style node into the style prefix of `nodes`.
fn merge_style(nodes: &mut Vec<ShadowNode>, style: StyleNode) {
    let prefix = nodes.iter().take_while(|n| n.is_style()).count();
    let existing = nodes[..prefix].iter_mut().find_map(|n| match n {
        ShadowNode::Style(kept)
            if (style.id.is_some() && kept.id == style.id)
                || (style.id.is_none() && *kept == style) =>
        {
            Some(kept)
        }
        _ => None,
    });
    match existing {
        Some(kept) => kept.css = style.css,
        None => nodes.insert(prefix, ShadowNode::Style(style)),
    }
}

/// `bg` → `--bg`; names already starting with `--` are kept.
fn custom_property(name: &str) -> String {
    if name.starts_with("--") {
        name.to_owned()
    } else {
        format!("--{name}")
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn none() -> Option<&'static str> {
        None
    }

    #[test]
    fn reconcile_replaces_content() {
        let mut root = ShadowRoot::new();
        root.reconcile("<p>one</p>".into());
        root.reconcile("<p>two</p>".into());
        assert_eq!(root.to_markup(), "<p>two</p>");
    }

    #[test]
    fn reconcile_keeps_styles_in_front() {
        let mut root = ShadowRoot::new();
        root.reconcile("<p>one</p>".into());
        root.adopt_style("component", ":host{display:block}");
        root.reconcile(RenderOutput::Nodes(vec![
            ShadowNode::Text("a".into()),
            ShadowNode::Text("b".into()),
        ]));
        assert_eq!(root.nodes().len(), 3);
        assert!(root.nodes()[0].is_style());
        assert_eq!(root.content_markup(), "ab");
    }

    #[test]
    fn rendered_styles_stay_single_across_renders() {
        let mut root = ShadowRoot::new();
        let output = || {
            RenderOutput::Nodes(vec![
                ShadowNode::Style(StyleNode {
                    id: Some("s".into()),
                    css: "p{color:red}".into(),
                }),
                ShadowNode::Style(StyleNode {
                    id: None,
                    css: "b{}".into(),
                }),
                ShadowNode::Text("hi".into()),
            ])
        };
        for _ in 0..3 {
            root.reconcile(output());
        }
        assert_eq!(root.styles().count(), 2);
        assert_eq!(root.content_markup(), "hi");
    }

    #[test]
    fn rendered_style_overwrites_matching_id() {
        let mut root = ShadowRoot::new();
        root.adopt_style("component", "x");
        root.reconcile(RenderOutput::Nodes(vec![
            ShadowNode::Text("a".into()),
            ShadowNode::Style(StyleNode {
                id: Some("theme".into()),
                css: "old".into(),
            }),
        ]));
        root.reconcile(RenderOutput::Nodes(vec![ShadowNode::Style(StyleNode {
            id: Some("theme".into()),
            css: "new".into(),
        })]));
        assert_eq!(
            root.to_markup(),
            "<style id=\"component\">x</style><style id=\"theme\">new</style>"
        );
    }

    #[test]
    fn empty_markup_leaves_only_styles() {
        let mut root = ShadowRoot::new();
        root.adopt_style("component", "x");
        root.reconcile("".into());
        assert_eq!(root.nodes().len(), 1);
        assert_eq!(root.content().count(), 0);
    }

    #[test]
    fn adopt_style_once() {
        let mut root = ShadowRoot::new();
        assert!(root.adopt_style("component", "a"));
        assert!(!root.adopt_style("component", "b"));
        assert_eq!(root.style("component").unwrap().css, "a");
    }

    #[test]
    fn dynamic_vars_created_after_leading_styles() {
        let mut root = ShadowRoot::new();
        root.adopt_style("component", "x");
        root.reconcile("<b></b>".into());
        root.set_dynamic_vars("vars", [("bg", Some("red")), ("fg", Some("white"))]);
        assert_eq!(
            root.to_markup(),
            "<style id=\"component\">x</style><style id=\"vars\">:host { --bg: red; --fg: white; }</style><b></b>"
        );
    }

    #[test]
    fn dynamic_vars_drop_empty_values() {
        let mut root = ShadowRoot::new();
        root.set_dynamic_vars("vars", [("bg", Some("")), ("--fg", Some("black")), ("pad", none())]);
        assert_eq!(root.style("vars").unwrap().css, ":host { --fg: black; }");
    }

    #[test]
    fn dynamic_vars_update_in_place_and_clear() {
        let mut root = ShadowRoot::new();
        root.set_dynamic_vars("vars", [("bg", Some("red"))]);
        root.set_dynamic_vars("vars", [("bg", Some("blue"))]);
        assert_eq!(root.styles().count(), 1);
        assert_eq!(root.style("vars").unwrap().css, ":host { --bg: blue; }");

        root.set_dynamic_vars("vars", [("bg", none())]);
        assert!(root.style("vars").is_none());
        // Clearing twice is fine.
        root.set_dynamic_vars("vars", Vec::<(&str, Option<&str>)>::new());
        assert!(root.nodes().is_empty());
    }

    #[test]
    fn dynamic_vars_idempotent_regardless_of_order() {
        let mut a = ShadowRoot::new();
        a.set_dynamic_vars("vars", [("b", Some("2")), ("a", Some("1"))]);
        let once = a.clone();
        a.set_dynamic_vars("vars", [("a", Some("1")), ("b", Some("2"))]);
        assert_eq!(a, once);
    }

    #[test]
    fn element_serialization_escapes() {
        let mut root = ShadowRoot::new();
        root.reconcile(
            MarkupElement::new("button")
                .attr("disabled", "")
                .attr("title", "say \"hi\"")
                .text("1 < 2 & 3")
                .into(),
        );
        assert_eq!(
            root.to_markup(),
            "<button disabled title=\"say &quot;hi&quot;\">1 &lt; 2 &amp; 3</button>"
        );
    }

    #[test]
    fn nested_elements() {
        let el = MarkupElement::new("div")
            .attr("part", "base")
            .child(MarkupElement::new("slot"));
        let mut root = ShadowRoot::new();
        root.reconcile(el.into());
        assert_eq!(root.content_markup(), "<div part=\"base\"><slot></slot></div>");
    }
}
