use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use ambient_scene::{Backdrop, PointerState, Present, Scene, Theme};

/// Stands in for the GPU-backed presenter: tracks how many instances are
/// alive and what was asked of them.
struct RecordingPresenter {
    live: Arc<AtomicUsize>,
    renders: Arc<AtomicUsize>,
}

impl RecordingPresenter {
    fn build(live: &Arc<AtomicUsize>, renders: &Arc<AtomicUsize>) -> Result<Self> {
        live.fetch_add(1, Ordering::SeqCst);
        Ok(Self {
            live: live.clone(),
            renders: renders.clone(),
        })
    }
}

impl Present for RecordingPresenter {
    fn render(&mut self, _scene: &Scene) -> Result<()> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) {}
}

impl Drop for RecordingPresenter {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[test]
fn repeated_theme_toggling_never_leaks_sessions() {
    let live = Arc::new(AtomicUsize::new(0));
    let renders = Arc::new(AtomicUsize::new(0));
    let mut backdrop = Backdrop::new(Theme::Dark);

    backdrop.mount(1.0, |_| RecordingPresenter::build(&live, &renders));

    for _ in 0..10 {
        let next = backdrop.theme().toggled();
        backdrop.set_theme(next, 1.0, |_| RecordingPresenter::build(&live, &renders));
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    backdrop.teardown();
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn full_scenario_dark_to_light_to_unmount() {
    let live = Arc::new(AtomicUsize::new(0));
    let renders = Arc::new(AtomicUsize::new(0));
    let mut backdrop = Backdrop::new(Theme::Dark);

    // Mount with theme=dark: presenter attached, cyan/magenta palette,
    // 3000-particle field and three wireframe solids present.
    backdrop.mount(1.0, |_| RecordingPresenter::build(&live, &renders));
    assert!(backdrop.is_mounted());
    {
        let scene = backdrop.scene().unwrap();
        assert_eq!(scene.palette.particles, [0.0, 1.0, 1.0]);
        assert_eq!(scene.palette.wireframe, [1.0, 0.0, 1.0]);
        assert_eq!(scene.particles.particles().len(), 3000);
        assert_eq!(scene.solids.len(), 3);
    }

    // Toggle to light: the old session is fully torn down and a fresh one
    // with the blue/orange palette replaces it.
    backdrop.set_theme(Theme::Light, 1.0, |_| {
        RecordingPresenter::build(&live, &renders)
    });
    assert_eq!(live.load(Ordering::SeqCst), 1);
    {
        let scene = backdrop.scene().unwrap();
        assert_eq!(scene.palette.particles, [0.0, 0.533, 1.0]);
        assert_eq!(scene.palette.wireframe, [1.0, 0.533, 0.0]);
    }

    // Unmount: nothing left alive.
    backdrop.teardown();
    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert!(backdrop.scene().is_none());
}

#[test]
fn stale_events_after_teardown_are_inert() {
    let live = Arc::new(AtomicUsize::new(0));
    let renders = Arc::new(AtomicUsize::new(0));
    let mut backdrop = Backdrop::new(Theme::Dark);

    backdrop.mount(1.0, |_| RecordingPresenter::build(&live, &renders));
    backdrop.frame();
    let rendered_before = renders.load(Ordering::SeqCst);

    backdrop.teardown();

    // Simulated late pointer-move, resize and frame callbacks: no panic,
    // no render, no resource mutation.
    backdrop.pointer_moved(PointerState { x: 0.9, y: -0.9 });
    backdrop.resized(4096, 2160);
    backdrop.frame();

    assert_eq!(renders.load(Ordering::SeqCst), rendered_before);
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn scene_lifetime_counts_balance_over_many_cycles() {
    let live = Arc::new(AtomicUsize::new(0));
    let renders = Arc::new(AtomicUsize::new(0));

    for _ in 0..20 {
        let mut backdrop = Backdrop::new(Theme::Light);
        backdrop.mount(1.6, |_| RecordingPresenter::build(&live, &renders));
        backdrop.frame();
        backdrop.teardown();
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}
