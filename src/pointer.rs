/// Normalized pointer offset, roughly [-1, 1] on both axes with +y up.
///
/// Written by cursor-move events and read by the next frame's update. The
/// state lives inside the mounted session, so events arriving after teardown
/// have nothing left to write into.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Map window-space cursor coordinates (origin top-left, +y down) to
    /// normalized offsets centered on the viewport.
    pub fn from_window(px: f32, py: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        Self {
            x: (px / width) * 2.0 - 1.0,
            y: -((py / height) * 2.0 - 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_origin() {
        let p = PointerState::from_window(400.0, 300.0, 800.0, 600.0);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn corners_map_to_unit_offsets() {
        let top_left = PointerState::from_window(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, PointerState { x: -1.0, y: 1.0 });

        let bottom_right = PointerState::from_window(800.0, 600.0, 800.0, 600.0);
        assert_eq!(bottom_right, PointerState { x: 1.0, y: -1.0 });
    }

    #[test]
    fn degenerate_viewport_yields_default() {
        let p = PointerState::from_window(10.0, 10.0, 0.0, 0.0);
        assert_eq!(p, PointerState::default());
    }
}
