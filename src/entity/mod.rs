pub mod collision;
pub mod ghost;
pub mod movable;
pub mod pacman;
pub mod targeting;
