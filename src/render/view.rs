use crate::geometry::frame::TaggedFrame;
use crate::render::layers::{LayeredRenderer, Scene};

/// Memoized scene: recomputed once per new frame, never in between.
#[derive(Debug, Default)]
pub struct RadialView {
    renderer: LayeredRenderer,
    scene: Scene,
    last: Option<TaggedFrame>,
    recomputes: u64,
}

impl RadialView {
    pub fn new(renderer: LayeredRenderer) -> Self {
        Self {
            renderer,
            scene: Scene::default(),
            last: None,
            recomputes: 0,
        }
    }

    /// Returns true when the scene was rebuilt.
    pub fn update(&mut self, tagged: &TaggedFrame) -> bool {
        if self.last.as_ref().map(|t| t.seq) == Some(tagged.seq) {
            return false;
        }
        self.scene = self.renderer.render(&tagged.frame);
        self.last = Some(tagged.clone());
        self.recomputes += 1;
        true
    }

    /// Swaps the layer stack and redraws the retained frame with it, so a
    /// paused or finished source keeps its picture.
    pub fn set_renderer(&mut self, renderer: LayeredRenderer) {
        self.renderer = renderer;
        if let Some(tagged) = &self.last {
            self.scene = self.renderer.render(&tagged.frame);
            self.recomputes += 1;
        }
    }

    /// Drops the current scene, e.g. when the source restarts.
    pub fn reset(&mut self) {
        self.scene = Scene::default();
        self.last = None;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}
