pub mod html;
pub mod text;

pub use html::{render_dashboard, render_report_body};
pub use text::{render_catalog_text, render_report_text};
