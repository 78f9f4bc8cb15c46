pub mod layers;
pub mod radial_canvas;
pub mod view;
