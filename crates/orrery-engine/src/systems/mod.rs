pub mod render;
pub mod geometry;
pub mod pick;
pub mod label;
pub mod lighting;
