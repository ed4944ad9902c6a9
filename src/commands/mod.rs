pub mod completions;
pub mod scrub;
pub mod upload;
