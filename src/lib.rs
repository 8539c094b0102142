// Canoe UI - interaction-state components for the Canoe design system
//
// Each component owns its interaction state and describes itself as a
// markup tree. A host (browser bridge, terminal gallery, tests) forwards
// input and document events and mounts what the components render.
//
// Layout:
// - markup: element tree, class composition, node handles
// - host: document listeners, scroll lock, focus, clock, timers
// - traits: component and interaction contracts
// - components: Menu, Tabs, Modal, Toast, DropZone, LogContainer and leaves
// - logging: tracing capture into log entries
// - config: env > file > defaults configuration

pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod markup;
pub mod traits;

pub use error::UsageError;
