//! The `Document`: element arena, connection, attribute routing, events.

use std::rc::Rc;

use slotmap::{SecondaryMap, SlotMap};
use tracing::debug;

use super::node::{Element, ElementId};
use crate::component::{ComponentInstance, ComponentRegistry};
use crate::event::{bubble_path, ComponentEvent, Listeners};
use crate::reactive::{ChangeResult, RawValue};

/// Empty slice constant for returning when an element has no children.
const EMPTY_CHILDREN: &[ElementId] = &[];

/// Errors from tree misuse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("element {0:?} does not exist")]
    UnknownElement(ElementId),
    #[error("element {child:?} is not a child of {parent:?}")]
    NotAChild { parent: ElementId, child: ElementId },
    /// Inserting would create a cycle, or the operation targets the root.
    #[error("element {0:?} cannot be inserted or removed there")]
    HierarchyRequest(ElementId),
}

/// A child-list mutation on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildrenChanged {
    pub target: ElementId,
    pub added: Vec<ElementId>,
    pub removed: Vec<ElementId>,
}

type ChildObserver = Box<dyn FnMut(&mut Document, &ChildrenChanged)>;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A tree of elements rooted at a connected `body`.
///
/// Elements are created detached. Appending into the connected tree runs the
/// attach sequence on every component in the inserted subtree, in tree order;
/// removing runs the detach sequence.
pub struct Document {
    registry: Rc<ComponentRegistry>,
    pub(crate) nodes: SlotMap<ElementId, Element>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
    root: ElementId,
    listeners: Listeners,
    child_observers: SecondaryMap<ElementId, Vec<ChildObserver>>,
}

impl Document {
    /// An empty document with a connected `body` root.
    pub fn new(registry: Rc<ComponentRegistry>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Element::plain("body"));
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        Self {
            registry,
            nodes,
            children,
            parent: SecondaryMap::new(),
            root,
            listeners: Listeners::new(),
            child_observers: SecondaryMap::new(),
        }
    }

    /// The registry used to upgrade custom tags.
    pub fn registry(&self) -> &Rc<ComponentRegistry> {
        &self.registry
    }

    /// The connected root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of elements, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A document always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The element behind `id`.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    /// Create a detached element. Defined tags become component instances.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let element = match self.registry.create(tag) {
            Some(instance) => Element::Component(instance),
            None => Element::plain(tag),
        };
        let id = self.nodes.insert(element);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create a detached element with markup attributes already present.
    pub fn create_element_with<K, V, I>(&mut self, tag: &str, attributes: I) -> ElementId
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let id = self.create_element(tag);
        for (name, value) in attributes {
            // The element was just created.
            let _ = self.set_attribute(id, name.as_ref(), value.as_ref());
        }
        id
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// The parent of `id`, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    /// Children in order. Empty for unknown ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Parent first, root last; excludes `id`.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// `start` and its descendants in tree (pre-) order.
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Whether `id` is in the tree under the root.
    pub fn is_connected(&self, id: ElementId) -> bool {
        id == self.root || self.ancestors(id).last() == Some(&self.root)
    }

    /// Append `child` as the last child of `parent`, moving it if it already
    /// has a parent.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.ensure(parent)?;
        self.ensure(child)?;
        if child == self.root || child == parent || self.ancestors(parent).contains(&child) {
            return Err(DomError::HierarchyRequest(child));
        }
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child)?;
        }

        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }

        if self.is_connected(parent) {
            for id in self.walk_depth_first(child) {
                let connected = self
                    .nodes
                    .get_mut(id)
                    .and_then(Element::as_component_mut)
                    .is_some_and(ComponentInstance::connect);
                if connected {
                    self.flush_events(id);
                }
            }
        }

        self.notify_children_changed(ChildrenChanged {
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
        Ok(())
    }

    /// Detach `child` from `parent`. The subtree stays alive and can be re-inserted.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.detach(parent, child)?;
        self.notify_children_changed(ChildrenChanged {
            target: parent,
            added: Vec::new(),
            removed: vec![child],
        });
        Ok(())
    }

    /// Unlink `child` from `parent` and disconnect its subtree without
    /// notifying observers.
    fn detach(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.ensure(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }

        let was_connected = self.is_connected(parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&c| c != child);
        }
        self.parent.remove(child);

        if was_connected {
            for id in self.walk_depth_first(child) {
                if let Some(instance) = self.nodes.get_mut(id).and_then(Element::as_component_mut) {
                    instance.disconnect();
                }
            }
        }
        Ok(())
    }

    /// Remove `id` and its subtree from the document for good.
    ///
    /// The former parent's observers run after the subtree is gone.
    pub fn destroy(&mut self, id: ElementId) -> Result<(), DomError> {
        self.ensure(id)?;
        if id == self.root {
            return Err(DomError::HierarchyRequest(id));
        }
        let parent = self.parent(id);
        if let Some(parent) = parent {
            self.detach(parent, id)?;
        }
        for current in self.walk_depth_first(id) {
            self.children.remove(current);
            self.parent.remove(current);
            self.listeners.remove_all(current);
            self.child_observers.remove(current);
            self.nodes.remove(current);
        }
        debug!(?id, "element destroyed");
        if let Some(parent) = parent {
            self.notify_children_changed(ChildrenChanged {
                target: parent,
                added: Vec::new(),
                removed: vec![id],
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Attributes and properties
    // -----------------------------------------------------------------------

    /// Read an attribute from any element.
    pub fn get_attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(id)?.attributes().get(name)
    }

    /// Set a markup attribute. Observed attributes sync into their property.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: &str,
    ) -> Result<ChangeResult, DomError> {
        self.mutate_attribute(id, name, Some(value))
    }

    /// Remove an attribute, syncing the property on components.
    pub fn remove_attribute(
        &mut self,
        id: ElementId,
        name: &str,
    ) -> Result<ChangeResult, DomError> {
        self.mutate_attribute(id, name, None)
    }

    fn mutate_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: Option<&str>,
    ) -> Result<ChangeResult, DomError> {
        let element = self.nodes.get_mut(id).ok_or(DomError::UnknownElement(id))?;
        let result = match element {
            Element::Plain { attributes, .. } => {
                attributes.replace(name, value);
                ChangeResult::Unknown
            }
            Element::Component(instance) => instance.set_attribute(name, value),
        };
        self.flush_events(id);
        Ok(result)
    }

    /// Write a component property. Plain elements report `Unknown`.
    pub fn set_property(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<RawValue>,
    ) -> Result<ChangeResult, DomError> {
        let element = self.nodes.get_mut(id).ok_or(DomError::UnknownElement(id))?;
        let result = match element.as_component_mut() {
            Some(instance) => instance.set_property(name, value),
            None => ChangeResult::Unknown,
        };
        self.flush_events(id);
        Ok(result)
    }

    /// The component instance behind `id`.
    pub fn instance(&self, id: ElementId) -> Option<&ComponentInstance> {
        self.nodes.get(id)?.as_component()
    }

    /// Mutable access to an instance. Events it queues are dispatched by the
    /// next document operation on it, or by [`flush_events`](Self::flush_events).
    pub fn instance_mut(&mut self, id: ElementId) -> Option<&mut ComponentInstance> {
        self.nodes.get_mut(id)?.as_component_mut()
    }

    /// Run `f` on an instance, then dispatch whatever it queued.
    pub fn with_instance<R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut ComponentInstance) -> R,
    ) -> Option<R> {
        let result = f(self.instance_mut(id)?);
        self.flush_events(id);
        Some(result)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Listen for events named `name` arriving at `id`.
    pub fn add_event_listener(
        &mut self,
        id: ElementId,
        name: impl Into<String>,
        listener: impl FnMut(&mut ComponentEvent) + 'static,
    ) -> Result<(), DomError> {
        self.ensure(id)?;
        self.listeners.add(id, name, Box::new(listener));
        Ok(())
    }

    /// Deliver `event` to `target`, then up the ancestor chain while it bubbles.
    ///
    /// Returns the number of listener calls.
    pub fn dispatch_event(&mut self, target: ElementId, mut event: ComponentEvent) -> usize {
        let path = bubble_path(self, target);
        if path.is_empty() {
            return 0;
        }
        event.target = Some(target);
        let calls = self.listeners.deliver(&path, &mut event);
        debug!(name = event.name(), ?target, calls, "event dispatched");
        calls
    }

    /// Dispatch every event queued on the instance at `id`.
    pub fn flush_events(&mut self, id: ElementId) -> usize {
        let events = match self.instance_mut(id) {
            Some(instance) => instance.take_events(),
            None => return 0,
        };
        events
            .into_iter()
            .map(|event| self.dispatch_event(id, event))
            .sum()
    }

    // -----------------------------------------------------------------------
    // Child-list subscriptions
    // -----------------------------------------------------------------------

    /// Call `observer` after every child-list change on `id`.
    ///
    /// The observer gets the document back, so it can mutate attributes or
    /// the tree in response.
    pub fn on_children_changed(
        &mut self,
        id: ElementId,
        observer: impl FnMut(&mut Document, &ChildrenChanged) + 'static,
    ) -> Result<(), DomError> {
        self.ensure(id)?;
        match self.child_observers.get_mut(id) {
            Some(list) => list.push(Box::new(observer)),
            None => {
                self.child_observers.insert(id, vec![Box::new(observer)]);
            }
        }
        Ok(())
    }

    /// Observers are taken out while they run; ones registered meanwhile are
    /// appended after them. Nothing is restored if the target was destroyed.
    fn notify_children_changed(&mut self, change: ChildrenChanged) {
        let Some(mut observers) = self.child_observers.remove(change.target) else {
            return;
        };
        for observer in observers.iter_mut() {
            observer(self, &change);
        }
        if self.contains(change.target) {
            if let Some(added) = self.child_observers.remove(change.target) {
                observers.extend(added);
            }
            self.child_observers.insert(change.target, observers);
        }
    }

    fn ensure(&self, id: ElementId) -> Result<(), DomError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(DomError::UnknownElement(id))
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("elements", &self.nodes.len())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::RefCell;

    use super::*;
    use crate::component::{Component, RenderOutput, UpdateContext};
    use crate::reactive::{PropertyDecl, Props};

    #[derive(Default)]
    struct Chip;

    impl Component for Chip {
        fn tag() -> &'static str {
            "x-chip"
        }
        fn properties() -> Vec<PropertyDecl> {
            vec![
                PropertyDecl::boolean("selected"),
                PropertyDecl::string("label"),
            ]
        }
        fn render(&self, props: &Props<'_>) -> RenderOutput {
            format!("<span>{}</span>", props.str("label")).into()
        }
        fn updated(&mut self, ctx: &mut UpdateContext<'_>) {
            if ctx.props().bool("selected") {
                ctx.emit(ComponentEvent::new("x-selected", ctx.props().str("label").to_owned()));
            }
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn document() -> Document {
        let registry = ComponentRegistry::new();
        registry.define::<Chip>().unwrap();
        Document::new(Rc::new(registry))
    }

    #[test]
    fn create_element_upgrades_defined_tags() {
        let mut doc = document();
        let chip = doc.create_element("x-chip");
        let div = doc.create_element("div");
        assert!(doc.instance(chip).is_some());
        assert!(doc.instance(div).is_none());
        assert_eq!(doc.get(div).unwrap().tag(), "div");
        assert!(!doc.is_connected(chip));
        assert!(doc.is_connected(doc.root()));
    }

    #[test]
    fn append_into_connected_tree_connects_subtree() {
        let mut doc = document();
        let root = doc.root();
        let wrapper = doc.create_element("div");
        let chip = doc.create_element("x-chip");
        doc.append_child(wrapper, chip).unwrap();
        assert_eq!(doc.instance(chip).unwrap().render_count(), 0);

        doc.append_child(root, wrapper).unwrap();
        assert!(doc.is_connected(chip));
        let instance = doc.instance(chip).unwrap();
        assert!(instance.is_initialized());
        assert_eq!(instance.render_count(), 1);
    }

    #[test]
    fn remove_child_disconnects() {
        let mut doc = document();
        let root = doc.root();
        let chip = doc.create_element("x-chip");
        doc.append_child(root, chip).unwrap();
        doc.remove_child(root, chip).unwrap();
        assert!(!doc.instance(chip).unwrap().is_initialized());

        doc.set_property(chip, "label", "quiet").unwrap();
        assert_eq!(doc.instance(chip).unwrap().render_count(), 1);

        doc.append_child(root, chip).unwrap();
        assert_eq!(doc.instance(chip).unwrap().render_count(), 2);
        assert_eq!(
            doc.instance(chip).unwrap().shadow().content_markup(),
            "<span>quiet</span>"
        );
    }

    #[test]
    fn moving_between_parents() {
        let mut doc = document();
        let root = doc.root();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let chip = doc.create_element("x-chip");
        doc.append_child(root, a).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(a, chip).unwrap();
        doc.append_child(b, chip).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), [chip]);
        assert_eq!(doc.parent(chip), Some(b));
        assert_eq!(doc.instance(chip).unwrap().meta().tag(), "x-chip");
    }

    #[test]
    fn hierarchy_errors() {
        let mut doc = document();
        let root = doc.root();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.append_child(a, b).unwrap();
        assert_eq!(doc.append_child(b, a), Err(DomError::HierarchyRequest(a)));
        assert_eq!(doc.append_child(a, a), Err(DomError::HierarchyRequest(a)));
        assert_eq!(doc.append_child(a, root), Err(DomError::HierarchyRequest(root)));
        assert_eq!(
            doc.remove_child(root, b),
            Err(DomError::NotAChild { parent: root, child: b })
        );
        assert_eq!(doc.destroy(root), Err(DomError::HierarchyRequest(root)));
    }

    #[test]
    fn destroy_removes_subtree() {
        let mut doc = document();
        let root = doc.root();
        let a = doc.create_element("div");
        let b = doc.create_element("x-chip");
        doc.append_child(root, a).unwrap();
        doc.append_child(a, b).unwrap();
        doc.destroy(a).unwrap();
        assert!(!doc.contains(a));
        assert!(!doc.contains(b));
        assert!(doc.children(root).is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.set_attribute(b, "x", "y"), Err(DomError::UnknownElement(b)));
    }

    #[test]
    fn attributes_route_to_components() {
        let mut doc = document();
        let chip = doc.create_element("x-chip");
        let change = doc.set_attribute(chip, "selected", "").unwrap();
        assert!(change.is_changed());
        assert!(doc.instance(chip).unwrap().props().bool("selected"));

        let div = doc.create_element("div");
        assert_eq!(doc.set_attribute(div, "role", "list").unwrap(), ChangeResult::Unknown);
        assert_eq!(doc.get_attribute(div, "role"), Some("list"));
        doc.remove_attribute(div, "role").unwrap();
        assert_eq!(doc.get_attribute(div, "role"), None);
        assert_eq!(doc.set_property(div, "selected", true).unwrap(), ChangeResult::Unknown);
    }

    #[test]
    fn property_writes_reflect_to_document_attributes() {
        let mut doc = document();
        let chip = doc.create_element("x-chip");
        doc.set_property(chip, "label", "Tea").unwrap();
        assert_eq!(doc.get_attribute(chip, "label"), Some("Tea"));
    }

    #[test]
    fn create_with_markup_attributes_backfills_on_attach() {
        let mut doc = document();
        let root = doc.root();
        let chip = doc.create_element_with("x-chip", [("label", "Coffee")]);
        doc.append_child(root, chip).unwrap();
        assert_eq!(doc.instance(chip).unwrap().props().str("label"), "Coffee");
    }

    #[test]
    fn emitted_events_bubble_to_ancestors() {
        let mut doc = document();
        let root = doc.root();
        let list = doc.create_element("div");
        let chip = doc.create_element("x-chip");
        doc.append_child(root, list).unwrap();
        doc.append_child(list, chip).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        doc.add_event_listener(list, "x-selected", move |event| {
            sink.borrow_mut().push((event.target(), event.detail::<String>().cloned()));
        })
        .unwrap();

        doc.set_property(chip, "label", "Milk").unwrap();
        doc.set_property(chip, "selected", true).unwrap();
        assert_eq!(*seen.borrow(), [(Some(chip), Some("Milk".to_owned()))]);
    }

    #[test]
    fn dispatch_to_unknown_target_is_noop() {
        let mut doc = document();
        let gone = doc.create_element("div");
        doc.destroy(gone).unwrap();
        assert_eq!(doc.dispatch_event(gone, ComponentEvent::signal("x")), 0);
    }

    #[test]
    fn children_changed_observer_sees_additions_and_removals() {
        let mut doc = document();
        let root = doc.root();
        let list = doc.create_element("div");
        doc.append_child(root, list).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        doc.on_children_changed(list, move |_, change| {
            sink.borrow_mut().push((change.added.len(), change.removed.len()));
        })
        .unwrap();

        let a = doc.create_element("x-chip");
        doc.append_child(list, a).unwrap();
        doc.remove_child(list, a).unwrap();
        assert_eq!(*log.borrow(), [(1, 0), (0, 1)]);
    }

    #[test]
    fn observer_can_mutate_document() {
        let mut doc = document();
        let list = doc.create_element("div");
        doc.on_children_changed(list, |doc, change| {
            let count = doc.children(change.target).len().to_string();
            let _ = doc.set_attribute(change.target, "count", &count);
        })
        .unwrap();

        for _ in 0..3 {
            let item = doc.create_element("x-chip");
            doc.append_child(list, item).unwrap();
        }
        assert_eq!(doc.get_attribute(list, "count"), Some("3"));
    }

    #[test]
    fn observer_dropped_with_target() {
        let mut doc = document();
        let root = doc.root();
        let list = doc.create_element("div");
        doc.append_child(root, list).unwrap();
        doc.on_children_changed(root, |doc, change| {
            for id in change.removed.clone() {
                let _ = doc.destroy(id);
            }
        })
        .unwrap();
        doc.remove_child(root, list).unwrap();
        assert!(!doc.contains(list));
    }

    #[test]
    fn destroy_notifies_after_the_subtree_is_gone() {
        let mut doc = document();
        let root = doc.root();
        let list = doc.create_element("div");
        let other = doc.create_element("div");
        let item = doc.create_element("x-chip");
        doc.append_child(root, list).unwrap();
        doc.append_child(root, other).unwrap();
        doc.append_child(list, item).unwrap();

        let results = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&results);
        doc.on_children_changed(list, move |doc, change| {
            for &id in &change.removed {
                sink.borrow_mut().push(doc.append_child(other, id));
            }
        })
        .unwrap();

        doc.destroy(item).unwrap();
        assert_eq!(*results.borrow(), [Err(DomError::UnknownElement(item))]);
        assert!(doc.children(other).is_empty());
        assert!(doc.children(list).is_empty());
        assert!(!doc.contains(item));
    }
}
