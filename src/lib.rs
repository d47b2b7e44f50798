//! # weft
//!
//! The runtime under a library of custom-element widgets: typed, reflected
//! properties with synchronous re-rendering, plus a design-token engine that
//! turns short tokens (`"large"`, `"indigo-500"`) into concrete style values.
//!
//! ## Core Systems
//!
//! - **[`tokens`]** — Palette, sizes, elevations, color parsing and the cached resolver
//! - **[`reactive`]** — Property schemas, coercion, and the attribute-reflecting store
//! - **[`component`]** — `Component` trait, registry, instances, shadow roots
//! - **[`dom`]** — Slotmap-backed document with connection and child-list subscriptions
//! - **[`event`]** — Named component events with bubbling delivery
//! - **[`schedule`]** — Opt-in render debouncing on `tokio::time`
//! - **[`widgets`]** — Sample widgets: Button, Card
//! - **[`config`]** — Runtime configuration
//!
//! Everything is single-threaded: registries and caches are `Rc`/`RefCell`
//! context objects and the runtime types are `!Send`.

// Foundation
pub mod config;
pub mod tokens;

// Reactivity and components
pub mod component;
pub mod reactive;

// Tree and events
pub mod dom;
pub mod event;

// Scheduling
pub mod schedule;

// Widgets
pub mod widgets;

// Testing
pub mod testing;
