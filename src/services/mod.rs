/// Prompt-to-colors bridge backed by the language model.
pub mod color_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// SVG and PNG downloads of a session's logo.
pub mod export_service;
/// Health check service.
pub mod health_service;
/// Designer session edits, image extraction and prompt application.
pub mod session_service;
/// Background eviction of idle sessions.
pub mod session_sweeper;
