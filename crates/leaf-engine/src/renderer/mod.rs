pub mod draw_list;
pub mod surface;

pub use draw_list::{DrawList, ShapeInstance};
pub use surface::{DrawSurface, TextSlot};
