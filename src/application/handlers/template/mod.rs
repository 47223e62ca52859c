//! Message template handlers.

mod save_template;

pub use save_template::{SaveTemplateCommand, SaveTemplateHandler};
