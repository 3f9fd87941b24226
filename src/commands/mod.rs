pub mod client_event;
pub mod image;
