mod pixels;

use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use sprig_engine::core::{App, AppControl, FrameCtx};
use sprig_engine::device::GpuInit;
use sprig_engine::logging::{init_logging, LoggingConfig};
use sprig_engine::paint::Color;
use sprig_engine::render::sprite::{
    BatchConfig, BlendMode, DrawParams, SpriteBatch, TextureSlice, WgpuSpriteDevice, WgpuTexture,
};
use sprig_engine::time::FrameRateSampler;
use sprig_engine::window::{Runtime, RuntimeConfig};

const TILE: u32 = 32;
const SHEET_COLS: u32 = 3;
const SHEET_ROWS: u32 = 2;
const DOTS: usize = 48;

struct Textures {
    floor: WgpuTexture,
    sheet: WgpuTexture,
    dot: WgpuTexture,
}

impl Textures {
    fn create(device: &WgpuSpriteDevice) -> Result<Self> {
        let floor = device.create_texture(
            "floor",
            64,
            64,
            &pixels::checkerboard(64, 64, 8, [34, 36, 44, 255], [28, 30, 36, 255]),
        )?;
        let sheet = device.create_texture(
            "tile sheet",
            TILE * SHEET_COLS,
            TILE * SHEET_ROWS,
            &pixels::tile_sheet(TILE, SHEET_COLS, SHEET_ROWS),
        )?;
        let dot = device.create_texture("dot", 16, 16, &pixels::dot(16))?;
        Ok(Self { floor, sheet, dot })
    }
}

/// GPU state created on the first frame, once a device exists.
struct Scene {
    batch: SpriteBatch<WgpuSpriteDevice>,
    textures: Textures,
}

struct DemoApp {
    scene: Option<Scene>,
    spin: bool,
    angle: f32,
    elapsed: f32,
    fps: FrameRateSampler,
}

impl DemoApp {
    fn new() -> Self {
        Self {
            scene: None,
            spin: true,
            angle: 0.0,
            elapsed: 0.0,
            fps: FrameRateSampler::new(2.0),
        }
    }

    fn ensure_scene(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<&mut Scene> {
        let scene = match self.scene.take() {
            Some(scene) => scene,
            None => {
                let device = WgpuSpriteDevice::new(
                    ctx.gpu.device(),
                    ctx.gpu.queue(),
                    ctx.gpu.surface_format(),
                );
                let textures = Textures::create(&device)?;
                let batch =
                    SpriteBatch::new(device, ctx.window.viewport(), BatchConfig::default());
                log::info!("demo scene ready");
                Scene { batch, textures }
            }
        };
        Ok(self.scene.insert(scene))
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state != ElementState::Pressed || event.repeat {
                return AppControl::Continue;
            }
            match &event.logical_key {
                Key::Named(NamedKey::Escape) => return AppControl::Exit,
                Key::Named(NamedKey::Space) => {
                    self.spin = !self.spin;
                    log::info!("spin {}", if self.spin { "on" } else { "off" });
                }
                _ => {}
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let dt = ctx.time.dt;
        self.elapsed += dt;
        if self.spin {
            self.angle += dt * 0.8;
        }

        let (angle, elapsed) = (self.angle, self.elapsed);
        let scene = match self.ensure_scene(ctx) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("failed to set up demo scene: {err:#}");
                return AppControl::Exit;
            }
        };

        let control = ctx.render(Color::from_straight(0.05, 0.05, 0.07, 1.0), |rctx, target| {
            let Scene { batch, textures } = scene;
            batch.backend_mut().set_target(rctx, target);
            batch.set_projection_matrix(rctx.viewport.ortho_projection());
            let (w, h) = (rctx.viewport.width, rctx.viewport.height);
            batch.run(None, |b| draw_scene(b, textures, w, h, angle, elapsed));
            batch.backend_mut().clear_target();
        });

        if let Some(fps) = self.fps.record(dt) {
            if let Some(scene) = &self.scene {
                log::info!(
                    "{fps:.1} fps, {} render calls, max {} sprites per batch",
                    scene.batch.render_calls(),
                    scene.batch.max_sprites_in_batch()
                );
            }
        }

        control
    }
}

fn draw_scene(
    batch: &mut SpriteBatch<WgpuSpriteDevice>,
    textures: &Textures,
    width: f32,
    height: f32,
    angle: f32,
    elapsed: f32,
) {
    // Floor: one stretched quad.
    batch.set_blend_mode(BlendMode::Premultiplied);
    batch.set_color(Color::WHITE);
    batch.draw(&textures.floor, 0.0, 0.0, DrawParams::default().size(width, height));

    // Tiles: consecutive draws from one sheet share a flush.
    let tiles = TextureSlice::split(&textures.sheet, TILE, TILE);
    let size = TILE as f32 * 1.5;
    let half = size * 0.5;
    let mut i = 0usize;
    let mut y = 40.0;
    while y + size < height - 40.0 {
        let mut x = 40.0;
        while x + size < width - 40.0 {
            let tile = &tiles[i % tiles.len()];
            let params = DrawParams::default()
                .size(size, size)
                .origin(half, half)
                .rotation(angle + i as f32 * 0.15)
                .flip(i % 3 == 1, i % 5 == 2);
            batch.draw_slice(tile, x, y, params);
            i += 1;
            x += size + 16.0;
        }
        y += size + 16.0;
    }

    // Glow: additive dots orbiting the center, tinted.
    batch.set_blend_mode(BlendMode::Additive);
    batch.set_color(Color::from_straight(0.4, 0.7, 1.0, 0.8));
    let (cx, cy) = (width * 0.5, height * 0.5);
    let radius = width.min(height) * 0.35;
    for k in 0..DOTS {
        let t = elapsed * 0.6 + k as f32 * std::f32::consts::TAU / DOTS as f32;
        let pulse = 1.5 + (elapsed * 3.0 + k as f32).sin();
        batch.draw(
            &textures.dot,
            cx + t.cos() * radius,
            cy + t.sin() * radius,
            DrawParams::default().origin(8.0, 8.0).scale(pulse, pulse),
        );
    }
    batch.set_color(Color::WHITE);
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "sprig demo".to_string(),
        initial_size: LogicalSize::new(960.0, 600.0),
    };

    if let Err(e) = Runtime::run(config, GpuInit::default(), DemoApp::new()) {
        log::error!("sprig runtime error: {e:#}");
        std::process::exit(1);
    }
}
