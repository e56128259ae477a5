pub mod backdrop;
pub mod clock;
pub mod gpu;
pub mod presenter;
