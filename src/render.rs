/// Frame buffer, blending and RGB array extraction.
pub mod canvas;
pub mod compositor;
/// Pipeline lifecycle and render modes.
pub mod pipeline;
pub mod progress;
pub mod stack;
pub(crate) mod text;
