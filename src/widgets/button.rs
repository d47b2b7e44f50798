//! Button widget: a token-styled, disableable button.
//!
//! `size` and `color` take design tokens. After each render the button
//! publishes `--btn-size`, `--btn-bg`, `--btn-bg-hover` and `--btn-fg` on its
//! host, with `--btn-fg` picked for contrast against the background.

use std::any::Any;

use crate::component::{Component, MarkupElement, RenderOutput, UpdateContext};
use crate::dom::{Document, ElementId};
use crate::event::ComponentEvent;
use crate::reactive::{PropertyDecl, Props};

/// Name of the event dispatched by [`Button::click`].
pub const CLICK_EVENT: &str = "x-click";

/// Payload of [`CLICK_EVENT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonClick {
    pub label: String,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// `<x-button>`.
#[derive(Debug, Default)]
pub struct Button;

impl Button {
    /// Simulate activation: dispatches [`CLICK_EVENT`] from `id` unless the
    /// button is disabled. Returns whether the event was dispatched.
    pub fn click(doc: &mut Document, id: ElementId) -> bool {
        let Some(instance) = doc.instance(id) else {
            return false;
        };
        if instance.component::<Button>().is_none() || instance.props().bool("disabled") {
            return false;
        }
        let payload = ButtonClick {
            label: instance.props().str("label").to_owned(),
        };
        doc.dispatch_event(id, ComponentEvent::new(CLICK_EVENT, payload));
        true
    }
}

impl Component for Button {
    fn tag() -> &'static str {
        "x-button"
    }

    fn properties() -> Vec<PropertyDecl> {
        vec![
            PropertyDecl::boolean("disabled"),
            PropertyDecl::string("size").default_value("medium"),
            PropertyDecl::string("color").default_value("indigo-500"),
            PropertyDecl::string("label"),
        ]
    }

    fn styles() -> String {
        concat!(
            ":host { display: inline-block; }\n",
            ".button { font-size: var(--btn-size, 1em); background: var(--btn-bg); ",
            "color: var(--btn-fg); border: none; border-radius: 0.375em; padding: 0.5em 1em; }\n",
            ".button:hover { background: var(--btn-bg-hover, var(--btn-bg)); }\n",
            ":host([disabled]) .button { opacity: 0.5; cursor: not-allowed; }",
        )
        .to_owned()
    }

    fn render(&self, props: &Props<'_>) -> RenderOutput {
        let mut button = MarkupElement::new("button")
            .attr("part", "base")
            .attr("class", "button");
        if props.bool("disabled") {
            button = button.attr("disabled", "");
        }
        button
            .child(MarkupElement::new("span").attr("part", "label").text(props.str("label")))
            .child(MarkupElement::new("slot"))
            .into()
    }

    fn updated(&mut self, ctx: &mut UpdateContext<'_>) {
        let props = ctx.props();
        let tokens = ctx.resolver();
        let color = props.str("color");
        let foreground = tokens.contrast_color_for(color).as_str();
        ctx.set_dynamic_vars([
            ("btn-size", tokens.resolve_size(props.str("size"))),
            ("btn-bg", tokens.resolve_color(color)),
            ("btn-bg-hover", tokens.resolve_color_hover(color)),
            ("btn-fg", Some(foreground.to_owned())),
        ]);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::component::ComponentRegistry;

    fn mounted() -> (Document, ElementId) {
        let registry = ComponentRegistry::new();
        registry.define::<Button>().unwrap();
        let mut doc = Document::new(Rc::new(registry));
        let root = doc.root();
        let id = doc.create_element("x-button");
        doc.append_child(root, id).unwrap();
        (doc, id)
    }

    fn vars(doc: &Document, id: ElementId) -> String {
        doc.instance(id)
            .and_then(|i| i.dynamic_vars_css())
            .unwrap_or_default()
            .to_owned()
    }

    #[test]
    fn default_tokens() {
        let (doc, id) = mounted();
        let css = vars(&doc, id);
        assert!(css.contains("--btn-size: 1em;"), "{css}");
        assert!(css.contains("--btn-bg: var(--color-indigo-500);"), "{css}");
        assert!(css.contains("--btn-bg-hover: var(--color-indigo-600);"), "{css}");
    }

    #[test]
    fn darkest_shade_has_no_hover() {
        let (mut doc, id) = mounted();
        doc.set_property(id, "color", "gray-950").unwrap();
        let css = vars(&doc, id);
        assert!(!css.contains("--btn-bg-hover"), "{css}");
        assert!(css.contains("--btn-fg: white;"), "{css}");
    }

    #[test]
    fn light_background_gets_black_text() {
        let (mut doc, id) = mounted();
        doc.set_attribute(id, "color", "gray-50").unwrap();
        assert!(vars(&doc, id).contains("--btn-fg: black;"));
    }

    #[test]
    fn disabled_renders_and_reflects() {
        let (mut doc, id) = mounted();
        doc.set_property(id, "disabled", true).unwrap();
        assert_eq!(doc.get_attribute(id, "disabled"), Some(""));
        let markup = doc.instance(id).unwrap().shadow().content_markup();
        assert!(markup.starts_with("<button part=\"base\" class=\"button\" disabled>"), "{markup}");
    }

    #[test]
    fn click_dispatches_unless_disabled() {
        let (mut doc, id) = mounted();
        doc.set_property(id, "label", "Save").unwrap();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        let root = doc.root();
        doc.add_event_listener(root, CLICK_EVENT, move |event| {
            if let Some(click) = event.detail::<ButtonClick>() {
                sink.borrow_mut().push(click.label.clone());
            }
        })
        .unwrap();

        assert!(Button::click(&mut doc, id));
        doc.set_property(id, "disabled", true).unwrap();
        assert!(!Button::click(&mut doc, id));
        assert_eq!(*clicks.borrow(), ["Save"]);
    }

    #[test]
    fn click_on_non_button_is_ignored() {
        let (mut doc, _) = mounted();
        let div = doc.create_element("div");
        assert!(!Button::click(&mut doc, div));
    }
}
