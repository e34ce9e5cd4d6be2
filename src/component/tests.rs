//! Tests for component lifecycle management

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::component::{
    callback, Component, ComponentError, Context, LifecycleManager, LifecyclePhase, Node,
};
use crate::style::{ButtonStyleOverride, ButtonVariant, ThemeMode};

use super::PageStyles;

#[derive(Debug, Clone)]
struct LabelProps {
    message: String,
}

#[derive(Debug)]
struct Label {
    message: String,
    mounts: Arc<AtomicUsize>,
}

impl Component for Label {
    type Props = LabelProps;

    fn create(props: Self::Props, _context: Context) -> Self {
        Self {
            message: props.message,
            mounts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn mount(&mut self) -> Result<(), ComponentError> {
        self.mounts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError> {
        if props.message.is_empty() {
            return Err(ComponentError::UpdateError("empty message".to_string()));
        }
        self.message = props.message;
        Ok(())
    }

    fn render(&self) -> Result<Vec<Node>, ComponentError> {
        Ok(vec![Node::element("span").with_child(Node::text(&self.message))])
    }
}

fn label(message: &str) -> LabelProps {
    LabelProps {
        message: message.to_string(),
    }
}

#[test]
fn test_lifecycle_order() {
    let mut manager = LifecycleManager::<Label>::create(label("Initial"), Context::new());
    assert_eq!(manager.current_phase(), LifecyclePhase::Created);

    // Updates before mount are rejected.
    assert!(matches!(
        manager.update(label("Early")),
        Err(ComponentError::InvalidLifecycleTransition(LifecyclePhase::Created, _))
    ));

    manager.mount().unwrap();
    assert_eq!(manager.current_phase(), LifecyclePhase::Mounted);
    assert_eq!(manager.component().mounts.load(Ordering::SeqCst), 1);
    assert!(manager.mount().is_err());

    manager.update(label("Updated")).unwrap();
    let nodes = manager.render().unwrap();
    assert_eq!(nodes[0].to_html(), "<span>Updated</span>");

    assert!(manager.update(label("")).is_err());
    assert_eq!(manager.component().message, "Updated");

    manager.unmount().unwrap();
    assert_eq!(manager.current_phase(), LifecyclePhase::Unmounted);
    assert!(manager.render().is_err());
}

#[test]
fn test_context_without_store_renders_defaults() {
    let context = Context::new().with_mode(ThemeMode::Admin);
    assert_eq!(context.mode(), ThemeMode::Admin);
    assert!(context.store().is_none());
    assert!(context.button_settings().is_none());
    assert_eq!(context.snapshot(), Default::default());
}

#[test]
fn test_page_styles() {
    let page: PageStyles = serde_json::from_str(
        r##"{ "buttons": { "secondary": { "text_color": "#333" }, "primary": {} } }"##,
    )
    .unwrap();
    assert_eq!(
        page.button(ButtonVariant::Secondary)
            .and_then(|o| o.text_color.as_deref()),
        Some("#333")
    );
    // Empty overrides count as absent.
    assert!(page.button(ButtonVariant::Primary).is_none());

    let page = PageStyles::default().with_button(
        ButtonVariant::Danger,
        ButtonStyleOverride {
            background: Some("#f00".to_string()),
            ..ButtonStyleOverride::default()
        },
    );
    assert!(page.button(ButtonVariant::Danger).is_some());
}

#[test]
fn test_callback() {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    let cb = callback(move |n: usize| count_clone.fetch_add(n, Ordering::SeqCst));
    cb.clone().call(2);
    cb.call(3);
    assert_eq!(count.load(Ordering::SeqCst), 5);
}
