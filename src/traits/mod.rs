//! Component trait system
//!
//! Components declare their capabilities through traits instead of the
//! host knowing how to render or drive each one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Host application                        │
//! │   (owns component state, routes input, forwards document    │
//! │    events, mounts the rendered markup)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!        ┌──────────┬──────────┼──────────┬──────────┐
//!        ▼          ▼          ▼          ▼          ▼
//!      Menu       Tabs       Modal      Toast     DropZone ...
//!                              │
//!                     Implements traits:
//!             Component, Interactive, Scrollable
//!             (+ host::DocumentListener)
//! ```
//!
//! # Traits Overview
//!
//! - [`Component`] - Base trait: identity + render to markup
//! - [`Interactive`] - Components that handle keyboard input
//! - [`Scrollable`] - Components with a scroll position

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentKind};
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
