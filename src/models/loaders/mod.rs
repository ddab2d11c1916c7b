pub mod toml_loader;

pub use toml_loader::{load_form_fill, load_form_fill_or_default};
