mod camera;
mod circle;
mod line;
mod rect;
mod screen;
mod transforms;

pub use camera::Camera;
pub use circle::Circle;
pub use line::Line;
pub use rect::Rect;
pub use screen::Screen;
pub use transforms::translate_rotate_scale;
