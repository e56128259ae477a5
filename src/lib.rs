pub mod camera;
pub mod cli;
pub mod core;
pub mod particles;
pub mod pointer;
pub mod scene;
pub mod solids;
pub mod theme;

pub use crate::core::backdrop::Backdrop;
pub use crate::core::presenter::{Present, WgpuPresenter};
pub use crate::pointer::PointerState;
pub use crate::scene::Scene;
pub use crate::theme::{Palette, Theme};
