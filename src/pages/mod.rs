pub mod airports;
pub mod not_found;
pub mod oceanus;
