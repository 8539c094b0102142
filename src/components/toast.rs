//! Toast notifications
//!
//! A toast may dismiss itself after `duration`. Both the timer and the
//! close button go through one dismissal routine: the toast is marked
//! exiting right away and `on_dismiss` fires once the exit transition
//! (200ms) has run.
//!
//! Timers are deadlines polled from `tick`; a dropped toast takes its
//! deadlines with it, so nothing fires after unmount.

use crate::host::{Host, OneShot};
use crate::markup::{class_names, Element, Node, NodeId};
use crate::traits::{Component, ComponentKind};
use std::time::Duration;
use tracing::debug;

/// Delay between marking a toast exiting and notifying the host
pub const EXIT_TRANSITION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

impl ToastVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Glyph shown when no icon is supplied
    pub fn default_icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✕",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

impl ToastPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
        }
    }

    pub fn is_top(self) -> bool {
        matches!(self, Self::TopRight | Self::TopLeft | Self::TopCenter)
    }
}

pub struct Toast {
    host: Host,
    node: NodeId,
    close_node: NodeId,
    variant: ToastVariant,
    title: Option<String>,
    message: Option<String>,
    dismissible: bool,
    duration: Duration,
    show_progress: bool,
    /// `None` uses the variant's glyph; an empty string hides the icon
    icon: Option<String>,
    action: Option<String>,
    class: String,
    on_dismiss: Option<Box<dyn FnMut()>>,

    is_exiting: bool,
    mounted: bool,
    notified: bool,
    auto_dismiss: OneShot,
    exit: OneShot,
}

impl Toast {
    pub fn new(host: &Host) -> Self {
        Self {
            host: host.clone(),
            node: NodeId::next(),
            close_node: NodeId::next(),
            variant: ToastVariant::default(),
            title: None,
            message: None,
            dismissible: false,
            duration: Duration::ZERO,
            show_progress: false,
            icon: None,
            action: None,
            class: String::new(),
            on_dismiss: None,
            is_exiting: false,
            mounted: false,
            notified: false,
            auto_dismiss: OneShot::new(),
            exit: OneShot::new(),
        }
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    /// Auto-dismiss delay; zero disables it
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn without_icon(mut self) -> Self {
        self.icon = Some(String::new());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn on_dismiss(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_dismiss = Some(Box::new(callback));
        self
    }

    // ─────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Insert into the tree; starts the auto-dismiss timer
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.schedule_auto_dismiss();
    }

    /// Change the auto-dismiss delay, restarting the timer
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        if self.mounted {
            self.schedule_auto_dismiss();
        }
    }

    fn schedule_auto_dismiss(&mut self) {
        self.auto_dismiss.cancel();
        if self.duration > Duration::ZERO && !self.is_exiting {
            self.auto_dismiss.arm(self.host.now(), self.duration);
        }
    }

    /// Manual dismissal (close button)
    pub fn dismiss(&mut self) {
        self.begin_exit(self.host.now());
    }

    /// Close-button click; ignored unless the toast is dismissible
    pub fn on_close_click(&mut self) {
        if self.dismissible {
            self.dismiss();
        }
    }

    fn begin_exit(&mut self, at: Duration) {
        if self.is_exiting {
            return;
        }
        self.is_exiting = true;
        self.auto_dismiss.cancel();
        self.exit.arm(at, EXIT_TRANSITION);
        debug!(toast = self.node.raw(), variant = self.variant.as_str(), "toast exiting");
    }

    /// Advance timers against the host clock
    ///
    /// Returns true when this call delivered the dismissal notification.
    pub fn tick(&mut self) -> bool {
        let now = self.host.now();
        if let Some(deadline) = self.auto_dismiss.poll(now) {
            self.begin_exit(deadline);
        }
        if self.exit.poll(now).is_none() || self.notified {
            return false;
        }
        self.notified = true;
        debug!(toast = self.node.raw(), "toast dismissed");
        if let Some(callback) = self.on_dismiss.as_mut() {
            callback();
        }
        true
    }

    // ─────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn close_node(&self) -> NodeId {
        self.close_node
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    /// Whether the dismissal notification has fired
    pub fn is_dismissed(&self) -> bool {
        self.notified
    }

    pub fn toast_variant(&self) -> ToastVariant {
        self.variant
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn icon_glyph(&self) -> Option<&str> {
        match self.icon.as_deref() {
            None => Some(self.variant.default_icon()),
            Some("") => None,
            Some(icon) => Some(icon),
        }
    }

    /// Fraction of the auto-dismiss delay still to run (1.0 = just started)
    pub fn remaining_fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.auto_dismiss
            .remaining(self.host.now())
            .map(|left| left.as_secs_f64() / self.duration.as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl std::fmt::Debug for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toast")
            .field("node", &self.node)
            .field("variant", &self.variant)
            .field("duration", &self.duration)
            .field("is_exiting", &self.is_exiting)
            .field("notified", &self.notified)
            .finish_non_exhaustive()
    }
}

impl Component for Toast {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Toast
    }

    fn render(&self) -> Element {
        let variant_class = format!("toast-{}", self.variant.as_str());
        let mut content = Element::new("div").class("toast-content");
        if let Some(title) = &self.title {
            content = content.child(Element::new("div").class("toast-title").child(title.as_str()));
        }
        if let Some(message) = &self.message {
            content = content.child(
                Element::new("div")
                    .class("toast-message")
                    .child(message.as_str()),
            );
        }
        if let Some(action) = &self.action {
            content = content.child(Element::new("div").class("toast-action").child(action.as_str()));
        }

        let icon = self.icon_glyph().map(str::to_string);
        Element::new("div")
            .node(self.node)
            .class(&class_names(&[
                "toast",
                &variant_class,
                if self.is_exiting { "toast-exiting" } else { "" },
                &self.class,
            ]))
            .attr("role", "alert")
            .child_if(icon.is_some(), || {
                Element::new("span")
                    .class("toast-icon")
                    .child(icon.clone().unwrap_or_default())
                    .into()
            })
            .child(content)
            .child_if(self.dismissible, || {
                Element::new("button")
                    .node(self.close_node)
                    .class("toast-close")
                    .attr("type", "button")
                    .attr("aria-label", "Dismiss notification")
                    .child("×")
                    .into()
            })
            .child_if(self.show_progress && !self.duration.is_zero(), || {
                Element::new("div")
                    .class("toast-progress")
                    .child(
                        Element::new("div")
                            .class("toast-progress-bar")
                            .attr(
                                "style",
                                format!("animation-duration: {}ms", self.duration.as_millis()),
                            ),
                    )
                    .into()
            })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ToastContainer
// ═══════════════════════════════════════════════════════════════════════════

/// Positioned stack of live toasts
///
/// Pushed toasts are mounted immediately and removed on the tick that
/// delivers their dismissal notification.
#[derive(Debug)]
pub struct ToastContainer {
    node: NodeId,
    position: ToastPosition,
    toasts: Vec<Toast>,
}

impl ToastContainer {
    pub fn new(position: ToastPosition) -> Self {
        Self {
            node: NodeId::next(),
            position,
            toasts: Vec::new(),
        }
    }

    pub fn position(&self) -> ToastPosition {
        self.position
    }

    pub fn push(&mut self, mut toast: Toast) -> NodeId {
        toast.mount();
        let node = toast.node();
        self.toasts.push(toast);
        node
    }

    /// Start dismissal of one toast by node
    pub fn dismiss(&mut self, node: NodeId) -> bool {
        match self.toasts.iter_mut().find(|t| t.node() == node) {
            Some(toast) => {
                toast.dismiss();
                true
            }
            None => false,
        }
    }

    /// Start dismissal of the newest toast still on screen
    pub fn dismiss_latest(&mut self) -> bool {
        match self.toasts.iter_mut().rev().find(|t| !t.is_exiting()) {
            Some(toast) => {
                toast.dismiss();
                true
            }
            None => false,
        }
    }

    /// Tick every toast; returns how many were removed
    pub fn tick(&mut self) -> usize {
        for toast in &mut self.toasts {
            toast.tick();
        }
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_dismissed());
        before - self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastContainer {
    fn default() -> Self {
        Self::new(ToastPosition::default())
    }
}

impl Component for ToastContainer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::ToastContainer
    }

    fn render(&self) -> Element {
        let position_class = format!("toast-container-{}", self.position.as_str());
        Element::new("div")
            .node(self.node)
            .class(&class_names(&["toast-container", &position_class]))
            .attr("role", "region")
            .attr("aria-label", "Notifications")
            .attr("aria-live", "polite")
            .children(self.toasts.iter().map(|t| Node::from(t.render())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (Rc<ManualClock>, Host) {
        let clock = Rc::new(ManualClock::new());
        let host = Host::with_clock(clock.clone());
        (clock, host)
    }

    fn counted(host: &Host, duration: Duration) -> (Toast, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let toast = Toast::new(host)
            .duration(duration)
            .on_dismiss(move || counter.set(counter.get() + 1));
        (toast, calls)
    }

    #[test]
    fn test_auto_dismiss_waits_for_exit_transition() {
        let (clock, host) = setup();
        let (mut toast, calls) = counted(&host, ms(1000));
        toast.mount();

        clock.set(ms(999));
        toast.tick();
        assert!(!toast.is_exiting());

        clock.set(ms(1000));
        toast.tick();
        assert!(toast.is_exiting());
        assert_eq!(calls.get(), 0);

        clock.set(ms(1199));
        toast.tick();
        assert_eq!(calls.get(), 0);

        clock.set(ms(1200));
        assert!(toast.tick());
        assert_eq!(calls.get(), 1);

        clock.set(ms(5000));
        assert!(!toast.tick());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_coarse_polling_still_notifies_once() {
        let (clock, host) = setup();
        let (mut toast, calls) = counted(&host, ms(1000));
        toast.mount();

        // A single late tick covers both deadlines
        clock.set(ms(3000));
        toast.tick();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unmount_before_deadline_never_notifies() {
        let (clock, host) = setup();
        let (mut toast, calls) = counted(&host, ms(1000));
        toast.mount();

        clock.set(ms(500));
        toast.tick();
        drop(toast);

        clock.set(ms(2000));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_zero_duration_never_auto_dismisses() {
        let (clock, host) = setup();
        let (mut toast, calls) = counted(&host, Duration::ZERO);
        toast.mount();
        clock.set(ms(60_000));
        toast.tick();
        assert!(!toast.is_exiting());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_manual_dismiss_then_timer_notifies_once() {
        let (clock, host) = setup();
        let (mut toast, calls) = counted(&host, ms(1000));
        toast.mount();

        clock.set(ms(100));
        toast.dismiss();
        toast.dismiss();
        assert!(toast.is_exiting());

        clock.set(ms(300));
        toast.tick();
        assert_eq!(calls.get(), 1);

        clock.set(ms(2000));
        toast.tick();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_changing_duration_restarts_timer() {
        let (clock, host) = setup();
        let (mut toast, calls) = counted(&host, ms(1000));
        toast.mount();

        clock.set(ms(800));
        toast.set_duration(ms(1000));

        clock.set(ms(1500));
        toast.tick();
        assert!(!toast.is_exiting());

        clock.set(ms(1800));
        toast.tick();
        assert!(toast.is_exiting());

        clock.set(ms(2000));
        toast.tick();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_close_button_requires_dismissible() {
        let (_clock, host) = setup();
        let mut toast = Toast::new(&host);
        toast.on_close_click();
        assert!(!toast.is_exiting());

        let mut toast = Toast::new(&host).dismissible(true);
        toast.on_close_click();
        assert!(toast.is_exiting());
    }

    #[test]
    fn test_remaining_fraction() {
        let (clock, host) = setup();
        let (mut toast, _) = counted(&host, ms(1000));
        toast.mount();
        clock.set(ms(250));
        assert!((toast.remaining_fraction() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_default_render() {
        let (_clock, host) = setup();
        let el = Toast::new(&host).message("Saved").render();
        assert_eq!(el.class_attr(), "toast toast-info");
        assert_eq!(el.get_attr("role"), Some("alert"));
        assert_eq!(el.find_class("toast-icon").unwrap().text_content(), "ℹ");
        assert_eq!(el.find_class("toast-message").unwrap().text_content(), "Saved");
        assert!(el.find_class("toast-close").is_none());
        assert!(el.find_class("toast-progress").is_none());
    }

    #[test]
    fn test_render_exiting_with_progress() {
        let (_clock, host) = setup();
        let mut toast = Toast::new(&host)
            .variant(ToastVariant::Error)
            .dismissible(true)
            .duration(ms(3000))
            .show_progress(true)
            .without_icon();
        toast.mount();
        toast.dismiss();

        let el = toast.render();
        assert_eq!(el.class_attr(), "toast toast-error toast-exiting");
        assert!(el.find_class("toast-icon").is_none());
        assert_eq!(
            el.find_class("toast-close").unwrap().get_attr("aria-label"),
            Some("Dismiss notification")
        );
        assert_eq!(
            el.find_class("toast-progress-bar").unwrap().get_attr("style"),
            Some("animation-duration: 3000ms")
        );
    }

    #[test]
    fn test_container_removes_dismissed_toasts() {
        let (clock, host) = setup();
        let mut container = ToastContainer::new(ToastPosition::BottomRight);
        container.push(Toast::new(&host).duration(ms(1000)));
        container.push(Toast::new(&host));
        assert_eq!(container.len(), 2);

        clock.set(ms(1200));
        assert_eq!(container.tick(), 1);
        assert_eq!(container.len(), 1);

        assert!(container.dismiss_latest());
        clock.set(ms(1400));
        assert_eq!(container.tick(), 1);
        assert!(container.is_empty());
    }

    #[test]
    fn test_container_render() {
        let el = ToastContainer::default().render();
        assert_eq!(el.class_attr(), "toast-container toast-container-top-right");
        assert_eq!(el.get_attr("aria-label"), Some("Notifications"));
        assert_eq!(el.get_attr("aria-live"), Some("polite"));
    }
}
