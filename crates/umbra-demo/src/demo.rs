use umbra_engine::core::{App, AppControl, FrameCtx};
use umbra_engine::render::shadow::{ShadowRenderer, ShadowSettings};
use umbra_engine::scene::{Light, Scene};
use umbra_engine::time::FpsCounter;

use crate::controls::{Action, action_for};

/// The shadow-mapping demo: a fixed scene, one movable light.
pub struct ShadowDemo {
    scene: Scene,
    light: Light,
    renderer: ShadowRenderer,
    fps: FpsCounter,
}

impl ShadowDemo {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(1.0),
            light: Light::new(),
            renderer: ShadowRenderer::new(ShadowSettings::default()),
            fps: FpsCounter::new(1.0),
        }
    }

    /// Applies every keystroke of the frame. Returns `Exit` on quit.
    fn handle_input(&mut self, ctx: &FrameCtx<'_, '_>) -> AppControl {
        for key in ctx.input_frame.key_strokes() {
            match action_for(key) {
                Some(Action::Light(cmd)) => {
                    self.light.apply(cmd);
                    log::debug!("light moved to {:?}", self.light.position());
                }
                Some(Action::Quit) => return AppControl::Exit,
                None => {}
            }
        }
        AppControl::Continue
    }
}

impl App for ShadowDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_input(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        if let Some(fps) = self.fps.record(ctx.time.dt) {
            log::info!("FPS: {fps:.0}");
        }

        let viewport = ctx.viewport();
        if viewport.is_valid() && self.scene.set_aspect(viewport.aspect()) {
            log::debug!("camera aspect set to {:.3}", viewport.aspect());
        }

        let Self {
            scene,
            light,
            renderer,
            ..
        } = self;

        ctx.render(wgpu::Color::WHITE, |rctx, target| {
            renderer.render(rctx, target, scene, light);
        })
    }
}

impl Default for ShadowDemo {
    fn default() -> Self {
        Self::new()
    }
}
