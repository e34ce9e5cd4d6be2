//! Component lifecycle management

use crate::component::{Component, ComponentError, Context, LifecyclePhase, Node};

/// Owns a component and enforces the order of its lifecycle calls
pub struct LifecycleManager<C: Component> {
    phase: LifecyclePhase,
    component: C,
}

impl<C: Component> LifecycleManager<C> {
    /// Create the component in the `Created` phase
    pub fn create(props: C::Props, context: Context) -> Self {
        Self {
            phase: LifecyclePhase::Created,
            component: C::create(props, context),
        }
    }

    pub fn current_phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    fn expect_phase(
        &self,
        expected: LifecyclePhase,
        operation: &str,
    ) -> Result<(), ComponentError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ComponentError::InvalidLifecycleTransition(
                self.phase,
                operation.to_string(),
            ))
        }
    }

    /// Mount the component; a failed mount leaves it in `Created`
    pub fn mount(&mut self) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Created, "mount")?;
        self.component.mount()?;
        self.phase = LifecyclePhase::Mounted;
        Ok(())
    }

    /// Update the component with new props
    pub fn update(&mut self, props: C::Props) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Mounted, "update")?;
        self.component.update(props)
    }

    pub fn render(&self) -> Result<Vec<Node>, ComponentError> {
        if self.phase == LifecyclePhase::Unmounted {
            return Err(ComponentError::InvalidLifecycleTransition(
                self.phase,
                "render".to_string(),
            ));
        }
        self.component.render()
    }

    /// Unmount the component
    pub fn unmount(&mut self) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Mounted, "unmount")?;
        self.component.unmount()?;
        self.phase = LifecyclePhase::Unmounted;
        Ok(())
    }
}
