use clap::Parser;
use smoke_sim_core::{
    mean_abs_divergence, ForcingPolicy, SmokeOptions, SmokeSimulation, Vec2,
};
use tracing_subscriber::EnvFilter;

/// Smoke simulation demo with scripted pointer input
#[derive(Parser, Debug)]
#[command(name = "smoke-sim-demo")]
#[command(about = "Headless interactive-smoke solver demo", long_about = None)]
struct Args {
    /// Grid resolution (interior cells per side)
    #[arg(short, long, default_value_t = 64)]
    resolution: u32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frame rate driving the wall-clock timestamps
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Seed for the ambient plume jitter
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Disable the ambient plume source
    #[arg(long)]
    no_source: bool,

    /// Pointer forcing policy (follow, aim)
    #[arg(long, default_value = "follow")]
    policy: String,

    /// Diffusion knob (1.0 = default look)
    #[arg(long, default_value_t = 1.0)]
    diffusion: f32,

    /// Viscosity knob
    #[arg(long, default_value_t = 1.0)]
    viscosity: f32,

    /// Injected density knob
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Injection radius knob
    #[arg(long, default_value_t = 1.0)]
    radius: f32,

    /// Injection impulse knob
    #[arg(long, default_value_t = 1.0)]
    velocity: f32,

    /// Radius of the scripted pointer orbit (normalized units, 0 = no pointer)
    #[arg(long, default_value_t = 0.25)]
    orbit: f32,

    /// Report interval in simulated seconds
    #[arg(long, default_value_t = 1.0)]
    report_interval: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    println!("=== Smoke Simulation Demo ===\n");

    let policy = match args.policy.to_lowercase().as_str() {
        "follow" => ForcingPolicy::Follow,
        "aim" | "aim-and-release" => ForcingPolicy::AimAndRelease,
        other => {
            println!("Unknown policy '{other}', using follow");
            ForcingPolicy::Follow
        }
    };

    let mut sim = SmokeSimulation::new(args.resolution as usize, args.seed);
    sim.configure(&SmokeOptions {
        diffusion: args.diffusion,
        viscosity: args.viscosity,
        density: args.density,
        radius: args.radius,
        velocity: args.velocity,
        input: policy,
        source: !args.no_source,
    })?;

    let resolution = sim.resolution();
    println!(
        "Created {0}x{0} simulation (seed {1}, policy {2:?}, source {3})\n",
        resolution,
        args.seed,
        policy,
        !args.no_source
    );

    let frame_dt = 1.0 / args.fps.max(1.0);
    let mut next_report = 0.0_f64;

    if args.orbit > 0.0 && policy == ForcingPolicy::AimAndRelease {
        sim.pointer_press(Vec2::new(0.5, 0.5));
    }

    for frame in 0..args.frames {
        let now = f64::from(frame) * frame_dt;

        // Scripted pointer: a slow orbit around the center, one revolution
        // every five seconds
        if args.orbit > 0.0 {
            let angle = (now * std::f64::consts::TAU / 5.0) as f32;
            let pos = Vec2::new(
                0.5 + args.orbit * angle.cos(),
                0.5 + args.orbit * angle.sin(),
            );
            sim.pointer_move(pos, now);
        }

        sim.tick(now, true);

        if sim.simulation_time() >= next_report {
            report(&sim, frame);
            next_report += args.report_interval.max(frame_dt);
        }
    }

    println!("\n=== Final state ===");
    report(&sim, args.frames);
    Ok(())
}

fn report(sim: &SmokeSimulation, frame: u32) {
    let density = sim.density();
    let (vel_x, vel_y) = sim.velocity();
    let peak = density
        .as_slice()
        .iter()
        .fold(0.0_f32, |acc, &v| acc.max(v));

    println!(
        "frame {:5}  t={:7.2}s  total density {:10.3}  peak {:5.3}  mean |div| {:.2e}",
        frame,
        sim.simulation_time(),
        density.interior_sum(),
        peak,
        mean_abs_divergence(vel_x, vel_y),
    );
}
