//! Software-rendered grid viewer.
//!
//! ```bash
//! cargo run --release --bin view_sw -- --map maps/demo.txt --mode textured
//! ```

use clap::{Parser, ValueEnum};
use glam::Vec2;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use gridcast::{
    engine::{DEFAULT_FOV, Engine, ProjectionMode},
    renderer::Software,
    sim::{FrameClock, MoveIntent, Player, player::TURN_RATE},
    world::{GridMap, Pose, TextureAtlas, TileSize},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Flat,
    Textured,
}

impl From<Mode> for ProjectionMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Flat => ProjectionMode::Flat,
            Mode::Textured => ProjectionMode::Textured,
        }
    }
}

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file (one row per line, `.` empty, `1`-`9` walls); built-in demo otherwise
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 960)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    #[arg(long, value_enum, default_value_t = Mode::Textured)]
    mode: Mode,

    /// Player speed, world units per second
    #[arg(long, default_value_t = gridcast::sim::player::DEFAULT_SPEED)]
    speed: f32,
}

const TEXTURE_SIZE: usize = 64;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let opts = Opts::parse();

    // ─────────── map & assets ────────────
    let map = match &opts.map {
        Some(path) => GridMap::load(path, TileSize::default())?,
        None => GridMap::demo()?,
    };
    let (mw, mh) = map.size();
    info!("map {mw}x{mh}, mode {:?}", opts.mode);

    let tile = map.tile_size();
    let spawn = Vec2::new(1.5 * tile.x, 1.5 * tile.y);
    let mut player = Player::new(Pose::new(spawn, 0.0)).with_speed(opts.speed);

    let mut engine = Engine::new(
        Software::default(),
        map,
        TextureAtlas::procedural(TEXTURE_SIZE),
        opts.width,
        opts.height,
        DEFAULT_FOV,
        opts.mode.into(),
    );

    let mut win = Window::new(
        "gridcast (software)",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    let mut clock = FrameClock::new(opts.speed, tile.x.min(tile.y));

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt = clock.tick();

        /* input ------------------------------------------------------------ */
        let mut intent = MoveIntent::empty();
        intent.set(MoveIntent::FORWARD, win.is_key_down(Key::W));
        intent.set(MoveIntent::BACKWARD, win.is_key_down(Key::S));
        intent.set(MoveIntent::STRAFE_LEFT, win.is_key_down(Key::A));
        intent.set(MoveIntent::STRAFE_RIGHT, win.is_key_down(Key::D));
        player.intent = intent;

        // y points down, so a growing angle turns right
        if win.is_key_down(Key::Left) {
            player.pose.turn(-TURN_RATE * dt);
        }
        if win.is_key_down(Key::Right) {
            player.pose.turn(TURN_RATE * dt);
        }
        if win.is_key_pressed(Key::Space, KeyRepeat::No) {
            player.fire();
        }
        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            engine.show_minimap = !engine.show_minimap;
        }
        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            engine.toggle_mode();
        }

        /* simulate, then draw ---------------------------------------------- */
        player.update(dt, &engine.map);

        let mut shown = Ok(());
        engine.render(&player.pose, &player.weapon, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            info!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
