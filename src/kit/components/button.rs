// Themed button for storefront pages and the admin console

use crate::component::{Callback, Component, ComponentError, Context, Node};
use crate::style::{
    resolve_button_style, ButtonStyleOverride, ButtonStyleRequest, ButtonVariant,
    ResolvedButtonStyle,
};

/// Button component whose look comes from the theme settings
///
/// Styles are resolved per render: explicit `style` props win over the page override from the
/// [`Context`], which wins over the global button settings, which win over the built-in defaults.
/// While the settings store is still loading the defaults are used directly, so the first render
/// is already styled. In [`ThemeMode::Admin`](crate::style::ThemeMode) the fixed admin palette
/// applies instead.
///
/// # Examples
///
/// ```
/// use storefront_theme::component::{Component, Context};
/// use storefront_theme::kit::components::button::{Button, ButtonProps};
///
/// let button = Button::create(ButtonProps::new("Book a class"), Context::new());
/// let html = button.to_html().unwrap();
/// assert!(html.contains("background: var(--color-text);"));
/// ```
#[derive(Debug)]
pub struct Button {
    props: ButtonProps,
    context: Context,
    hovered: bool,
}

/// Properties for the Button component
#[derive(Debug, Clone, Default)]
pub struct ButtonProps {
    /// Text content of the button
    pub text: String,
    pub variant: ButtonVariant,
    pub disabled: bool,
    /// Per-call-site style overrides
    pub style: Option<ButtonStyleOverride>,
    /// Click event handler
    pub on_click: Option<Callback<()>>,
}

impl ButtonProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn style(mut self, style: ButtonStyleOverride) -> Self {
        self.style = Some(style);
        self
    }

    pub fn on_click(mut self, on_click: Callback<()>) -> Self {
        self.on_click = Some(on_click);
        self
    }
}

impl Button {
    pub fn props(&self) -> &ButtonProps {
        &self.props
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer entered or left the button
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Run the click handler; disabled buttons ignore clicks
    pub fn click(&self) -> bool {
        if self.props.disabled {
            return false;
        }
        match &self.props.on_click {
            Some(handler) => {
                handler.call(());
                true
            }
            None => false,
        }
    }

    /// Style for the current settings, overrides, and hover state
    pub fn resolved_style(&self) -> ResolvedButtonStyle {
        let settings = self.context.button_settings();
        let variant = self.props.variant;

        resolve_button_style(&ButtonStyleRequest {
            variant,
            mode: self.context.mode(),
            hovered: self.hovered,
            disabled: self.props.disabled,
            props: self.props.style.as_ref(),
            page: self.context.page_styles().button(variant),
            settings: settings.as_ref(),
        })
    }

    /// Render straight to HTML
    pub fn to_html(&self) -> Result<String, ComponentError> {
        Ok(self.render()?.iter().map(Node::to_html).collect())
    }
}

impl Component for Button {
    type Props = ButtonProps;

    fn create(props: Self::Props, context: Context) -> Self {
        Self {
            props,
            context,
            hovered: false,
        }
    }

    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError> {
        if props.disabled {
            self.hovered = false;
        }
        self.props = props;
        Ok(())
    }

    fn render(&self) -> Result<Vec<Node>, ComponentError> {
        let style = self.resolved_style();
        let variant = self.props.variant.as_str();

        let mut button = Node::element("button")
            .with_attribute("type", "button")
            .with_attribute("class", format!("btn btn-{variant}"))
            .with_attribute("data-variant", variant)
            .with_attribute("data-style", style.style.as_str())
            .with_attribute("style", style.to_inline_css());
        if self.props.disabled {
            button = button.with_flag("disabled");
        }

        Ok(vec![button.with_child(Node::text(&self.props.text))])
    }
}
