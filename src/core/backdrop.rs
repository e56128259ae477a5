use anyhow::Result;
use log::warn;

use super::clock::Clock;
use super::presenter::Present;
use crate::pointer::PointerState;
use crate::scene::Scene;
use crate::theme::Theme;

/// One mount's worth of state, owned as a single bundle so teardown is one
/// drop: scene, presenter (and with it every GPU resource), clock and
/// pointer state go together or not at all.
struct Session<P> {
    scene: Scene,
    presenter: P,
    clock: Clock,
    pointer: PointerState,
}

/// Lifecycle manager for the decorative backdrop.
///
/// At most one session exists per host window. A theme change tears the
/// current session down completely and mounts a fresh one; nothing is ever
/// recolored in place. After teardown, pointer, resize and frame calls are
/// structural no-ops - there is no session left for them to touch.
pub struct Backdrop<P> {
    theme: Theme,
    session: Option<Session<P>>,
}

impl<P: Present> Backdrop<P> {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            session: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// Build a scene for the current theme and a presenter for it. Any live
    /// session is dropped first, so two sessions never coexist. If the
    /// presenter factory fails (no graphics capability), the backdrop stays
    /// unmounted and renders nothing; the host page is never failed. A later
    /// mount gets a fresh try.
    pub fn mount<F>(&mut self, aspect: f32, make_presenter: F)
    where
        F: FnOnce(&Scene) -> Result<P>,
    {
        self.session = None;

        let scene = Scene::new(self.theme, aspect);
        match make_presenter(&scene) {
            Ok(presenter) => {
                self.session = Some(Session {
                    scene,
                    presenter,
                    clock: Clock::new(),
                    pointer: PointerState::default(),
                });
            }
            Err(e) => warn!("backdrop disabled, no graphics capability: {e:#}"),
        }
    }

    /// Full teardown + rebuild under the new theme. A repeated identical
    /// theme is not a change and leaves the live session alone.
    pub fn set_theme<F>(&mut self, theme: Theme, aspect: f32, make_presenter: F)
    where
        F: FnOnce(&Scene) -> Result<P>,
    {
        if theme == self.theme && self.session.is_some() {
            return;
        }
        self.theme = theme;
        self.mount(aspect, make_presenter);
    }

    /// One frame: advance the scene from the session clock and pointer,
    /// then render once. Render failures are logged, never propagated - the
    /// backdrop is decorative.
    pub fn frame(&mut self) {
        if let Some(session) = &mut self.session {
            let elapsed = session.clock.elapsed();
            session.scene.advance(elapsed, session.pointer);
            if let Err(e) = session.presenter.render(&session.scene) {
                warn!("backdrop frame dropped: {e:#}");
            }
        }
    }

    /// Record a normalized pointer offset for the next frame to read.
    pub fn pointer_moved(&mut self, pointer: PointerState) {
        if let Some(session) = &mut self.session {
            session.pointer = pointer;
        }
    }

    /// Keep camera aspect and surface extent in step with the viewport.
    pub fn resized(&mut self, width: u32, height: u32) {
        if let Some(session) = &mut self.session {
            session.scene.camera.set_viewport(width, height);
            session.presenter.resize(width, height);
        }
    }

    /// Drop the session and everything it owns. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.session = None;
    }

    /// The live scene, if mounted. Read-only; per-frame mutation goes
    /// through `frame`.
    pub fn scene(&self) -> Option<&Scene> {
        self.session.as_ref().map(|s| &s.scene)
    }
}
