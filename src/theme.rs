use clap::ValueEnum;

// Accent colors shared by the two palettes
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const AZURE: [f32; 3] = [0.0, 0.533, 1.0];
const ORANGE: [f32; 3] = [1.0, 0.533, 0.0];

/// Theme supplied by the surrounding page context. A change of theme tears
/// the whole scene down and rebuilds it; a live scene is never recolored.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                particles: CYAN,
                primary_light: CYAN,
                secondary_light: MAGENTA,
                wireframe: MAGENTA,
            },
            Theme::Light => Palette {
                particles: AZURE,
                primary_light: AZURE,
                secondary_light: ORANGE,
                wireframe: ORANGE,
            },
        }
    }
}

/// Fixed per-theme color set: cyan/magenta accents for dark, blue/orange
/// for light. The background stays transparent in both themes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub particles: [f32; 3],
    pub primary_light: [f32; 3],
    pub secondary_light: [f32; 3],
    pub wireframe: [f32; 3],
}
