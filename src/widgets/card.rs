//! Card widget: an elevated surface with token-driven shadow, padding and background.

use std::any::Any;

use crate::component::{Component, MarkupElement, RenderOutput, UpdateContext};
use crate::dom::{Document, DomError, ElementId};
use crate::reactive::{PropertyDecl, Props};

/// Attribute kept equal to the number of slotted children by [`Card::track_items`].
pub const ITEM_COUNT_ATTRIBUTE: &str = "item-count";

/// `<x-card>`.
#[derive(Debug, Default)]
pub struct Card;

impl Card {
    /// Keep [`ITEM_COUNT_ATTRIBUTE`] on `id` in sync with its child count.
    pub fn track_items(doc: &mut Document, id: ElementId) -> Result<(), DomError> {
        let count = doc.children(id).len().to_string();
        doc.set_attribute(id, ITEM_COUNT_ATTRIBUTE, &count)?;
        doc.on_children_changed(id, |doc, change| {
            let count = doc.children(change.target).len().to_string();
            let _ = doc.set_attribute(change.target, ITEM_COUNT_ATTRIBUTE, &count);
        })
    }
}

impl Component for Card {
    fn tag() -> &'static str {
        "x-card"
    }

    fn properties() -> Vec<PropertyDecl> {
        vec![
            PropertyDecl::string("elevation").default_value("2"),
            PropertyDecl::string("padding").default_value("medium"),
            PropertyDecl::string("background"),
        ]
    }

    fn styles() -> String {
        concat!(
            ":host { display: block; }\n",
            ".card { box-shadow: var(--card-shadow, none); padding: var(--card-padding, 1em); ",
            "background: var(--card-bg, transparent); ",
            "border: 1px solid var(--card-border, transparent); ",
            "border-radius: 0.5em; }",
        )
        .to_owned()
    }

    fn render(&self, _props: &Props<'_>) -> RenderOutput {
        MarkupElement::new("div")
            .attr("part", "base")
            .attr("class", "card")
            .child(MarkupElement::new("slot"))
            .into()
    }

    fn updated(&mut self, ctx: &mut UpdateContext<'_>) {
        let props = ctx.props();
        let tokens = ctx.resolver();
        let background = props.str("background");
        ctx.set_dynamic_vars([
            ("card-shadow", tokens.resolve_elevation(props.str("elevation"))),
            ("card-padding", tokens.resolve_size(props.str("padding"))),
            ("card-bg", tokens.resolve_color(background)),
            ("card-border", tokens.resolve_color_darker(background, 1)),
        ]);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
