//! Components
//!
//! Stateful coordinators (Menu, Tabs, Modal, Toast, DropZone,
//! LogContainer), the shared pieces they are built from, and the
//! presentational leaves.

pub mod disclosure;
pub mod dropzone;
pub mod log;
pub mod menu;
pub mod modal;
pub mod presentational;
pub mod scope;
pub mod scroll;
pub mod tabs;
pub mod toast;

pub use disclosure::{Disclosure, FocusMove, Orientation};
pub use dropzone::{format_file_size, DropZone, DropZoneSize, FileHandle, FileInfo};
pub use log::{EntryId, LogContainer, LogEntry, LogFilter, LogHeader, LogLevel, LogSize};
pub use menu::{Menu, MenuItem, MenuItemVariant, MenuPosition};
pub use modal::{FooterAlign, Modal, ModalSize};
pub use presentational::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardPadding, CardVariant, Dots, Input, Kbd,
    LabelFormat, ProgressBar, ProgressVariant, Size, Spinner, SpinnerVariant,
};
pub use scope::{MenuContext, RenderScope, TabsContext};
pub use scroll::ScrollState;
pub use tabs::{Tab, TabPanel, Tabs, TabsMode, TabsSize, TabsVariant};
pub use toast::{Toast, ToastContainer, ToastPosition, ToastVariant, EXIT_TRANSITION};
