pub mod arc;
pub mod colormap;
pub mod frame;
