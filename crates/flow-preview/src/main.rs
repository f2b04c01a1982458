use anyhow::{bail, Context};
use flow_core::waitlist::{self, MemoryStore};
use flow_core::{
    RecordingSurface, Scene, SceneConfig, SceneKind, StaticSignals, OP_FILL_CIRCLE,
    OP_STROKE_CIRCLE,
};
use glam::Vec2;
use instant::Instant;

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Debug)]
struct Args {
    scene: SceneKind,
    frames: u32,
    width: f32,
    height: f32,
    seed: u64,
    reduced_motion: bool,
    emails: Vec<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            scene: SceneKind::PitchFlow,
            frames: 1200,
            width: 1280.0,
            height: 800.0,
            seed: 42,
            reduced_motion: false,
            emails: Vec::new(),
        }
    }
}

fn parse_args(mut it: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--reduced-motion" => args.reduced_motion = true,
            "--scene" | "--frames" | "--width" | "--height" | "--seed" | "--email" => {
                let value = it
                    .next()
                    .with_context(|| format!("{} needs a value", flag))?;
                match flag.as_str() {
                    "--scene" => {
                        args.scene = match value.as_str() {
                            "pitch-flow" => SceneKind::PitchFlow,
                            "entrainment" => SceneKind::Entrainment,
                            other => bail!("unknown scene '{}'", other),
                        }
                    }
                    "--frames" => args.frames = value.parse().context("--frames")?,
                    "--width" => args.width = value.parse().context("--width")?,
                    "--height" => args.height = value.parse().context("--height")?,
                    "--seed" => args.seed = value.parse().context("--seed")?,
                    _ => args.emails.push(value),
                }
            }
            other => bail!("unknown argument '{}'", other),
        }
    }
    Ok(args)
}

/// Scripted scroll: ease into the section, dwell past the trigger, scroll
/// back above it, then run through to the end.
fn scripted_progress(frame: u32, total: u32) -> f32 {
    let x = frame as f32 / total.max(1) as f32;
    match x {
        x if x < 0.15 => x / 0.15 * 0.30,
        x if x < 0.20 => 0.30 + (x - 0.15) / 0.05 * 0.15,
        x if x < 0.55 => 0.45,
        x if x < 0.60 => 0.45 - (x - 0.55) / 0.05 * 0.25,
        x if x < 0.65 => 0.20 + (x - 0.60) / 0.05 * 0.30,
        x => (0.50 + (x - 0.65) / 0.35 * 0.50).min(1.0),
    }
}

fn run_scene(args: &Args) {
    let viewport = Vec2::new(args.width, args.height);
    let config = match args.scene {
        SceneKind::PitchFlow => SceneConfig::pitch_flow(args.seed),
        SceneKind::Entrainment => SceneConfig::entrainment(args.seed),
    };
    let mut scene = Scene::new(config, viewport);
    let mut surface = RecordingSurface::new(args.width, args.height);
    let started = Instant::now();

    let mut drawn_frames = 0u32;
    let mut peak_rings = 0usize;
    for i in 0..args.frames {
        let signals = StaticSignals {
            progress: scripted_progress(i, args.frames),
            viewport,
            reduced_motion: args.reduced_motion,
        };
        surface.reset();
        let out = scene.frame(i as f64 * FRAME_MS, &signals, &mut surface);
        if out.drew {
            drawn_frames += 1;
        }
        peak_rings = peak_rings.max(out.rings);
        if i % 60 == 0 {
            let field = scene.particle_field().map(|f| f.stats());
            log::info!(
                "t={:>5.1}s progress={:.2} smoothed={:.2} hero_t={:.2} beat={:?} dots={} rings={} {}",
                i as f64 * FRAME_MS / 1000.0,
                out.progress,
                out.smoothed,
                out.hero.t,
                out.beat,
                surface.count(OP_FILL_CIRCLE),
                surface.count(OP_STROKE_CIRCLE),
                field
                    .map(|s| format!("center={} recycling={} hit={}", s.in_center, s.recycling, s.hit))
                    .unwrap_or_default(),
            );
        }
    }
    log::info!(
        "{:?}: {} frames simulated, {} drawn, peak rings {}, {:.1} ms wall",
        args.scene,
        args.frames,
        drawn_frames,
        peak_rings,
        started.elapsed().as_secs_f64() * 1000.0
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    log::info!("flow-preview {:?}", args);
    run_scene(&args);

    if !args.emails.is_empty() {
        let mut store = MemoryStore::new();
        for email in &args.emails {
            let resp = waitlist::submit(&mut store, email);
            log::info!("[waitlist] {} -> {} ({})", email, resp.success, resp.message);
        }
        log::info!("[waitlist] {} unique addresses stored", store.len());
    }
    Ok(())
}
