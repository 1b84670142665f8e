// Adapters layer: concrete implementations for external systems (html parsing, smtp).

pub mod html;
pub mod smtp;
