// Storefront kit: themed components, the theme provider, and the component style hook

pub mod components;
pub mod hooks;
pub mod theme;
pub mod utils;

/// Re-export of common components for convenience
pub mod prelude {
    pub use crate::kit::components::button::{Button, ButtonProps};
    pub use crate::kit::hooks::{use_component_styles, ComponentStyleHook, ComponentStyles};
    pub use crate::kit::theme::{SelfCheckHandle, ThemeProvider};
}
