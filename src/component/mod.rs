//! Component model
//!
//! Themed primitives implement [`Component`]: they are created from props and a [`Context`],
//! updated with new props, and render into a [`Node`] tree that serializes to HTML.

mod context;
mod error;
mod lifecycle;
mod node;

#[cfg(test)]
mod tests;

pub use context::{callback, Callback, Context, PageStyles};
pub use error::ComponentError;
pub use lifecycle::LifecycleManager;
pub use node::Node;

/// Lifecycle phase of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Component is created but not yet mounted
    Created,
    /// Component is mounted and operational
    Mounted,
    /// Component is unmounted and inactive
    Unmounted,
}

/// Marker trait for component props
pub trait Props: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Props for T {}

/// A renderable component
pub trait Component: Send + Sync {
    /// The props type for this component
    type Props: Props;

    /// Create a new component instance
    fn create(props: Self::Props, context: Context) -> Self
    where
        Self: Sized;

    /// Called when the component is first added to the tree
    fn mount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Update component with new props
    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError>;

    /// Called when the component is removed from the tree
    fn unmount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Render component - returns its nodes
    fn render(&self) -> Result<Vec<Node>, ComponentError>;
}
