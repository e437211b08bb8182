pub mod instance;
pub mod camera;
pub mod traits;

pub use traits::{LabelBitmap, LabelRasterizer, RasterError};
