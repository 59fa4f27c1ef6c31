pub mod json_sink;
pub mod json_source;
