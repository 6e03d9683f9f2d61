pub mod banner;
pub mod canvas;
pub mod renderer;

pub use banner::LossBanner;
pub use canvas::{Pixel, RasterCanvas};
pub use renderer::{CanvasView, Renderer};
