//! Mappers from raw model output to the client response shape.

pub mod markdown;
pub mod response;
pub mod sources;


pub use markdown::{format_response, to_markdown};
pub use response::assemble_response;
pub use sources::{extract_from_metadata, extract_sources};
