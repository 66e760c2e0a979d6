use crate::{
    engine::{
        projection::{ProjectionMode, Projector},
        types::Screen,
    },
    renderer::{Frame, Renderer, RendererExt, Rgba, View},
    sim::WeaponAnim,
    world::{GridMap, Pose, TextureAtlas},
};

/// Minimap scale in pixels per world unit.
const MINIMAP_SCALE: f32 = 0.25;

/// Ties one map, one atlas and one renderer together for a frame loop.
///
/// Order per frame: the simulation updates the logical [`Pose`], then
/// [`Engine::render`] syncs the view, sweeps, and draws.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub map: GridMap,
    pub atlas: TextureAtlas,
    pub projector: Projector,
    pub view: View,
    pub show_minimap: bool,
}

impl<R: Renderer> Engine<R> {
    pub fn new(
        renderer: R,
        map: GridMap,
        atlas: TextureAtlas,
        w: usize,
        h: usize,
        fov: f32,
        mode: ProjectionMode,
    ) -> Self {
        let projector = Projector::new(Screen::new(w, h), fov, mode).with_atlas(&atlas);
        Self {
            renderer,
            map,
            atlas,
            projector,
            view: View::default(),
            show_minimap: false,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.projector.mode = self.projector.mode.toggled();
        log::info!("projection mode: {:?}", self.projector.mode);
    }

    /// Render one frame for `pose` and hand the pixels to `submit`.
    /// Returns the frame so callers can inspect the hits.
    pub fn render<F>(&mut self, pose: &Pose, weapon: &WeaponAnim, submit: F) -> Frame
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.view.sync(pose);
        let frame = self.projector.project(&self.map, pose);

        self.renderer.begin_frame(frame.width, frame.height);
        self.renderer.draw_columns(&frame, &self.atlas);
        if self.show_minimap {
            self.renderer
                .draw_minimap(&self.map, &frame.rays, &self.view, MINIMAP_SCALE);
        }
        self.renderer
            .draw_weapon(weapon.current_frame(), weapon.bob_offset());
        self.renderer.end_frame(submit);
        frame
    }
}
