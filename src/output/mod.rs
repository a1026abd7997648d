pub mod render;
pub mod report;

pub use render::render_text;
pub use report::{LegitimacyReport, assemble, assemble_invalid};
