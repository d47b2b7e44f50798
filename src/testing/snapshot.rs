//! Snapshot rendering helpers.
//!
//! Functions for converting a component's shadow root into markup strings
//! suitable for snapshot testing and assertions.

use crate::component::{ComponentInstance, ShadowRoot};

/// Serialize an instance's whole shadow root, style nodes included.
///
/// # Examples
///
/// ```ignore
/// use weft::testing::render_to_string;
///
/// let output = render_to_string(pilot.instance(id));
/// assert!(output.starts_with("<style"));
/// ```
pub fn render_to_string(instance: &ComponentInstance) -> String {
    instance.shadow().to_markup()
}

/// Serialize only the rendered content, skipping style nodes.
pub fn content_to_string(instance: &ComponentInstance) -> String {
    instance.shadow().content_markup()
}

/// One line per shadow node, tagged with its kind. Handy for multi-line snapshots.
pub fn outline(root: &ShadowRoot) -> String {
    use crate::component::ShadowNode;

    root.nodes()
        .iter()
        .map(|node| match node {
            ShadowNode::Style(style) => {
                format!("style#{}", style.id.as_deref().unwrap_or("-"))
            }
            ShadowNode::Markup(markup) => format!("markup {markup}"),
            ShadowNode::Text(text) => format!("text {text:?}"),
            ShadowNode::Element(el) => format!("<{}> ({} children)", el.tag, el.children.len()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{MarkupElement, RenderOutput, ShadowNode};

    #[test]
    fn outline_lists_nodes() {
        let mut root = ShadowRoot::new();
        root.adopt_style("x-probe", "");
        root.reconcile(RenderOutput::Nodes(vec![
            ShadowNode::Text("hi".into()),
            MarkupElement::new("div").child(MarkupElement::new("slot")).into(),
        ]));
        root.set_dynamic_vars("vars", [("a", Some("1"))]);
        insta::assert_snapshot!(outline(&root), @r###"
        style#x-probe
        style#vars
        text "hi"
        <div> (1 children)
        "###);
    }

    #[test]
    fn empty_root_outline() {
        assert_eq!(outline(&ShadowRoot::new()), "");
    }
}
