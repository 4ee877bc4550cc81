pub mod canvas;
pub mod display;

pub use canvas::Surface;
pub use display::{ClockCanvas, resize_display, setup_display, upload_canvas};
