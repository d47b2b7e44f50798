//! Document queries: by tag, by attribute, generic predicate matching.

use super::node::{Element, ElementId};
use super::tree::Document;

impl Document {
    /// Elements under `start` (inclusive) with the given tag, in tree order.
    pub fn query_by_tag(&self, start: ElementId, tag: &str) -> Vec<ElementId> {
        self.query_all(start, |el| el.tag() == tag)
    }

    /// Elements under `start` carrying `name`, optionally with an exact value.
    pub fn query_by_attribute(
        &self,
        start: ElementId,
        name: &str,
        value: Option<&str>,
    ) -> Vec<ElementId> {
        self.query_all(start, |el| match (el.attributes().get(name), value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }

    /// Elements under `start` matching an arbitrary predicate, in tree order.
    pub fn query_all(
        &self,
        start: ElementId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Vec<ElementId> {
        self.walk_depth_first(start)
            .into_iter()
            .filter(|&id| self.nodes.get(id).is_some_and(&predicate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::rc::Rc;

    use crate::component::{Component, ComponentRegistry, RenderOutput};
    use crate::dom::tree::Document;
    use crate::reactive::{PropertyDecl, Props};

    #[derive(Default)]
    struct Tab;

    impl Component for Tab {
        fn tag() -> &'static str {
            "x-tab"
        }
        fn properties() -> Vec<PropertyDecl> {
            vec![PropertyDecl::boolean("active")]
        }
        fn render(&self, _props: &Props<'_>) -> RenderOutput {
            "<slot></slot>".into()
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// ```text
    ///        body
    ///       /    \
    ///   nav        main
    ///   / \
    /// tab  tab[active]
    /// ```
    fn build() -> Document {
        let registry = ComponentRegistry::new();
        registry.define::<Tab>().unwrap();
        let mut doc = Document::new(Rc::new(registry));
        let root = doc.root();
        let nav = doc.create_element("nav");
        let main = doc.create_element("main");
        doc.append_child(root, nav).unwrap();
        doc.append_child(root, main).unwrap();
        for active in [false, true] {
            let tab = doc.create_element("x-tab");
            doc.set_property(tab, "active", active).unwrap();
            doc.append_child(nav, tab).unwrap();
        }
        doc
    }

    #[test]
    fn by_tag_in_tree_order() {
        let doc = build();
        let tabs = doc.query_by_tag(doc.root(), "x-tab");
        assert_eq!(tabs.len(), 2);
        let nav = doc.query_by_tag(doc.root(), "nav")[0];
        assert_eq!(doc.children(nav), tabs.as_slice());
        assert!(doc.query_by_tag(doc.root(), "aside").is_empty());
    }

    #[test]
    fn by_attribute() {
        let doc = build();
        let active = doc.query_by_attribute(doc.root(), "active", None);
        assert_eq!(active.len(), 1);
        assert!(doc.instance(active[0]).unwrap().props().bool("active"));
        assert_eq!(doc.query_by_attribute(doc.root(), "active", Some("")), active);
        assert!(doc.query_by_attribute(doc.root(), "active", Some("yes")).is_empty());
    }

    #[test]
    fn scoped_to_subtree() {
        let doc = build();
        let main = doc.query_by_tag(doc.root(), "main")[0];
        assert!(doc.query_by_tag(main, "x-tab").is_empty());
        assert_eq!(doc.query_all(main, |_| true), [main]);
    }
}
