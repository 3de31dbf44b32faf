pub mod infrastructure;
pub mod interfaces;
