/// Language-model backends that turn a text prompt into colors.
pub mod color_model;
/// Error type shared by every upstream backend.
pub mod upstream;
