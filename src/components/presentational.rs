// Presentational leaves
//
// Configuration in, classed markup out. No state, no events.

use crate::markup::{class_names, Element, Node};
use crate::traits::{Component, ComponentKind};

/// Three-step size scale shared by the leaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    /// `<prefix>-sm` / `<prefix>-lg`; md carries no class
    fn modifier(self, prefix: &str) -> String {
        match self {
            Self::Md => String::new(),
            other => format!("{prefix}-{}", other.as_str()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Button
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Danger,
}

impl ButtonVariant {
    fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Ghost => "ghost",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Button {
    pub variant: ButtonVariant,
    pub size: Size,
    /// Square icon-only button
    pub icon: bool,
    pub disabled: bool,
    pub label: String,
    pub class: String,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn icon(mut self, icon: bool) -> Self {
        self.icon = icon;
        self
    }
}

impl Component for Button {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Button
    }

    fn render(&self) -> Element {
        let variant = format!("btn-{}", self.variant.as_str());
        Element::new("button")
            .class(&class_names(&[
                "btn",
                &variant,
                &self.size.modifier("btn"),
                if self.icon { "btn-icon" } else { "" },
                &self.class,
            ]))
            .attr_if(self.disabled, "disabled", "")
            .child(self.label.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Badge
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Warning,
    Error,
    Info,
    #[default]
    Neutral,
}

impl BadgeVariant {
    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Badge {
    pub variant: BadgeVariant,
    pub text: String,
    pub class: String,
}

impl Badge {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }
}

impl Component for Badge {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Badge
    }

    fn render(&self) -> Element {
        let variant = format!("badge-{}", self.variant.as_str());
        Element::new("span")
            .class(&class_names(&["badge", &variant, &self.class]))
            .child(self.text.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card family
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardVariant {
    #[default]
    Default,
    Elevated,
    Interactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardPadding {
    #[default]
    Default,
    Compact,
    Spacious,
}

#[derive(Debug, Clone, Default)]
pub struct Card {
    pub variant: CardVariant,
    pub padding: CardPadding,
    pub class: String,
    pub children: Vec<Node>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: CardVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn padding(mut self, padding: CardPadding) -> Self {
        self.padding = padding;
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn header() -> Element {
        Element::new("div").class("card-header")
    }

    pub fn body() -> Element {
        Element::new("div").class("card-body")
    }

    pub fn footer() -> Element {
        Element::new("div").class("card-footer")
    }

    /// `h3` title
    pub fn title(text: impl Into<String>) -> Element {
        Element::new("h3").class("card-title").child(Node::text(text))
    }

    pub fn subtitle(text: impl Into<String>) -> Element {
        Element::new("p").class("card-subtitle").child(Node::text(text))
    }
}

impl Component for Card {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Card
    }

    fn render(&self) -> Element {
        let variant = match self.variant {
            CardVariant::Default => "",
            CardVariant::Elevated => "card-elevated",
            CardVariant::Interactive => "card-interactive",
        };
        let padding = match self.padding {
            CardPadding::Default => "",
            CardPadding::Compact => "card-compact",
            CardPadding::Spacious => "card-spacious",
        };
        Element::new("div")
            .class(&class_names(&["card", variant, padding, &self.class]))
            .children(self.children.iter().cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input, Kbd
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Input {
    pub error: bool,
    pub placeholder: Option<String>,
    pub value: String,
    pub class: String,
}

impl Component for Input {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Input
    }

    fn render(&self) -> Element {
        Element::new("input")
            .class(&class_names(&[
                "input",
                if self.error { "input-error" } else { "" },
                &self.class,
            ]))
            .attr_if(
                self.placeholder.is_some(),
                "placeholder",
                self.placeholder.clone().unwrap_or_default(),
            )
            .attr_if(!self.value.is_empty(), "value", self.value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Kbd {
    pub size: Size,
    pub keys: String,
    pub class: String,
}

impl Kbd {
    pub fn new(keys: impl Into<String>) -> Self {
        Self {
            keys: keys.into(),
            ..Self::default()
        }
    }
}

impl Component for Kbd {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Kbd
    }

    fn render(&self) -> Element {
        Element::new("kbd")
            .class(&class_names(&["kbd", &self.size.modifier("kbd"), &self.class]))
            .child(self.keys.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading indicators
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinnerVariant {
    #[default]
    Accent,
    Success,
    Warning,
    Error,
    White,
}

impl SpinnerVariant {
    fn as_str(self) -> &'static str {
        match self {
            Self::Accent => "accent",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::White => "white",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spinner {
    pub size: Size,
    pub variant: SpinnerVariant,
    pub label: String,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            size: Size::Md,
            variant: SpinnerVariant::Accent,
            label: "Loading".to_string(),
        }
    }
}

impl Component for Spinner {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Spinner
    }

    /// Size and variant classes are always present, md included
    fn render(&self) -> Element {
        let size = format!("spinner-{}", self.size.as_str());
        let variant = format!("spinner-{}", self.variant.as_str());
        Element::new("span")
            .class(&class_names(&["spinner", &size, &variant]))
            .attr("role", "status")
            .attr("aria-label", self.label.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Dots {
    pub size: Size,
    pub accent: bool,
    pub muted: bool,
    pub label: String,
}

impl Default for Dots {
    fn default() -> Self {
        Self {
            size: Size::Md,
            accent: false,
            muted: false,
            label: "Loading".to_string(),
        }
    }
}

impl Component for Dots {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Dots
    }

    fn render(&self) -> Element {
        let size = format!("dots-{}", self.size.as_str());
        let dot = || -> Node {
            Element::new("span")
                .class("dots-dot")
                .attr("aria-hidden", "true")
                .into()
        };
        Element::new("span")
            .class(&class_names(&[
                "dots",
                &size,
                if self.accent { "dots-accent" } else { "" },
                if self.muted { "dots-muted" } else { "" },
            ]))
            .attr("role", "status")
            .attr("aria-label", self.label.as_str())
            .children([dot(), dot(), dot()])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProgressBar
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressVariant {
    #[default]
    Default,
    Success,
    Warning,
    Error,
    Accent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelFormat {
    #[default]
    Percentage,
    Fraction,
}

#[derive(Debug, Clone)]
pub struct ProgressBar {
    pub value: f64,
    pub max: f64,
    pub variant: ProgressVariant,
    pub size: Size,
    pub show_label: bool,
    pub label_format: LabelFormat,
    /// Only takes effect on striped bars
    pub animated: bool,
    pub striped: bool,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            value: 0.0,
            max: 100.0,
            variant: ProgressVariant::Default,
            size: Size::Md,
            show_label: false,
            label_format: LabelFormat::Percentage,
            animated: false,
            striped: false,
        }
    }
}

impl ProgressBar {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Completion in percent, clamped to 0..=100
    pub fn percentage(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max * 100.0).clamp(0.0, 100.0)
    }

    pub fn label(&self) -> String {
        match self.label_format {
            LabelFormat::Fraction => format!("{}/{}", self.value, self.max),
            LabelFormat::Percentage => format!("{}%", self.percentage().round()),
        }
    }
}

impl Component for ProgressBar {
    fn kind(&self) -> ComponentKind {
        ComponentKind::ProgressBar
    }

    fn render(&self) -> Element {
        let variant = match self.variant {
            ProgressVariant::Default => "",
            ProgressVariant::Success => "progress-success",
            ProgressVariant::Warning => "progress-warning",
            ProgressVariant::Error => "progress-error",
            ProgressVariant::Accent => "progress-accent",
        };
        let label = self.label();
        Element::new("div")
            .class(&class_names(&[
                "progress",
                variant,
                &self.size.modifier("progress"),
                if self.striped { "progress-striped" } else { "" },
                if self.animated && self.striped { "progress-animated" } else { "" },
            ]))
            .attr("role", "progressbar")
            .attr("aria-valuenow", self.value.to_string())
            .attr("aria-valuemin", "0")
            .attr("aria-valuemax", self.max.to_string())
            .attr("aria-label", format!("Progress: {label}"))
            .child(
                Element::new("div")
                    .class("progress-bar")
                    .attr("style", format!("width: {}%", self.percentage()))
                    .child_if(self.show_label, || {
                        Element::new("span")
                            .class("progress-label")
                            .child(label.clone())
                            .into()
                    }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_class_compositions() {
        assert_eq!(Button::default().render().class_attr(), "btn btn-primary");
        assert_eq!(Badge::default().render().class_attr(), "badge badge-neutral");
        assert_eq!(Card::default().render().class_attr(), "card");
        assert_eq!(Input::default().render().class_attr(), "input");
        assert_eq!(Kbd::default().render().class_attr(), "kbd");
        assert_eq!(
            Spinner::default().render().class_attr(),
            "spinner spinner-md spinner-accent"
        );
        assert_eq!(Dots::default().render().class_attr(), "dots dots-md");
        assert_eq!(ProgressBar::default().render().class_attr(), "progress");
    }

    #[test]
    fn test_button_modifiers() {
        let el = Button::new("Delete")
            .variant(ButtonVariant::Danger)
            .size(Size::Lg)
            .icon(true)
            .render();
        assert_eq!(el.class_attr(), "btn btn-danger btn-lg btn-icon");
        assert_eq!(el.text_content(), "Delete");
    }

    #[test]
    fn test_card_parts() {
        let el = Card::new()
            .variant(CardVariant::Elevated)
            .padding(CardPadding::Compact)
            .child(Card::header().child(Card::title("Title")))
            .render();
        assert_eq!(el.class_attr(), "card card-elevated card-compact");
        assert_eq!(el.find_class("card-title").unwrap().tag, "h3");
        assert_eq!(Card::subtitle("s").tag, "p");
    }

    #[test]
    fn test_input_error() {
        let el = Input {
            error: true,
            ..Input::default()
        }
        .render();
        assert_eq!(el.class_attr(), "input input-error");
    }

    #[test]
    fn test_dots_children() {
        let el = Dots {
            accent: true,
            ..Dots::default()
        }
        .render();
        assert_eq!(el.class_attr(), "dots dots-md dots-accent");
        let mut dots = Vec::new();
        el.find_all_class("dots-dot", &mut dots);
        assert_eq!(dots.len(), 3);
    }

    #[test]
    fn test_progress_clamps_and_labels() {
        let mut bar = ProgressBar::new(150.0);
        bar.show_label = true;
        assert_eq!(bar.percentage(), 100.0);
        let el = bar.render();
        assert_eq!(
            el.find_class("progress-bar").unwrap().get_attr("style"),
            Some("width: 100%")
        );
        assert_eq!(el.find_class("progress-label").unwrap().text_content(), "100%");

        let bar = ProgressBar {
            value: 3.0,
            max: 4.0,
            label_format: LabelFormat::Fraction,
            ..ProgressBar::default()
        };
        assert_eq!(bar.label(), "3/4");
        assert_eq!(ProgressBar::new(-5.0).percentage(), 0.0);
    }

    #[test]
    fn test_progress_animation_needs_stripes() {
        let bar = ProgressBar {
            animated: true,
            ..ProgressBar::default()
        };
        assert_eq!(bar.render().class_attr(), "progress");

        let bar = ProgressBar {
            animated: true,
            striped: true,
            variant: ProgressVariant::Success,
            size: Size::Sm,
            ..ProgressBar::default()
        };
        assert_eq!(
            bar.render().class_attr(),
            "progress progress-success progress-sm progress-striped progress-animated"
        );
    }
}
