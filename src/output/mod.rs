// Output generation module

pub mod diagrams;
pub mod html;
pub mod layout;
pub mod templates;

pub use diagrams::*;
pub use html::*;
pub use layout::*;
pub use templates::*;
