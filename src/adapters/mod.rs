// Concrete implementations of the domain ports plus result rendering.

pub mod http;
pub mod location;
pub mod output;
