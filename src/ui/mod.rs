// Rendering of assessments for the terminal and for machine consumers.
pub mod report;

pub use report::{render, render_text};
