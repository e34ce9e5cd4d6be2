// Kit component module organization

// Input components
pub mod button;

// Re-export commonly used components
pub use button::{Button, ButtonProps};
