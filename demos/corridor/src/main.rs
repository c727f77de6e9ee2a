//! corridor — curbside parking demo for the cb-* simulator crates.
//!
//! Drives a stream of vehicles down an `inflow → parking_0..N-1 → outflow`
//! corridor.  Each vehicle picks a free curbside zone, slows into it, parks
//! for its dwell time, then pulls out and leaves.  Vehicle snapshots and tick
//! summaries are written as CSV (or SQLite with `--sqlite`).
//!
//! ```text
//! cargo run -p corridor -- --scenario demos/corridor/scenarios/five_zones.json
//! cargo run -p corridor -- --arrivals demos/corridor/scenarios/arrivals.csv --free-flow
//! ```

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record, info};
use structopt::StructOpt;

use cb_behavior::{CurbsideController, FreeFlowController, Transition, VehicleController};
use cb_core::{ParkingState, SimRng, Tick, VehicleId};
use cb_corridor::Corridor;
use cb_demand::{Arrival, DemandGenerator, load_arrivals_csv};
use cb_output::{CsvWriter, OutputWriter, SimOutputObserver};
use cb_sim::{SimBuilder, SimObserver, TickStats};
use cb_vehicle::{VehicleStore, VehicleStoreBuilder};

use scenario::ScenarioConfig;

/// Seed offset of the RNG stream that draws generated arrivals.
const DEMAND_STREAM: u64 = 1;

// ── Flags ─────────────────────────────────────────────────────────────────────

#[derive(StructOpt)]
#[structopt(name = "corridor")]
struct Flags {
    /// JSON scenario file.  Library defaults are used when omitted.
    #[structopt(long = "scenario")]
    scenario: Option<PathBuf>,

    /// Arrivals CSV (`vehicle_id,depart_tick,desired_zone,dwell_secs`).
    /// Without it, arrivals are drawn from the scenario's `demand` section.
    #[structopt(long = "arrivals")]
    arrivals: Option<PathBuf>,

    /// Directory for output files.
    #[structopt(long = "output", default_value = "output/corridor")]
    output: PathBuf,

    /// Override `sim.total_ticks`.
    #[structopt(long = "ticks")]
    ticks: Option<u64>,

    /// Override `sim.seed`.
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Plain car following for every vehicle; nobody parks.
    #[structopt(long = "free-flow")]
    free_flow: bool,

    /// Write `output.db` instead of CSV (needs the `sqlite` feature).
    #[structopt(long = "sqlite")]
    sqlite: bool,

    /// error, warn, info, debug or trace.
    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

// ── Logging ───────────────────────────────────────────────────────────────────

static LOG_ADAPTER: LogAdapter = LogAdapter;

struct LogAdapter;

impl Log for LogAdapter {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOG_ADAPTER).map_err(|e| anyhow::anyhow!("installing logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards to the output observer and keeps a few counters for the summary.
struct DemoObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    parked_at:     Vec<(VehicleId, Tick)>,
    exits:         usize,
    deferred:      usize,
    peak_active:   usize,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self {
            inner,
            parked_at:     Vec::new(),
            exits:         0,
            deferred:      0,
            peak_active:   0,
            snapshot_rows: 0,
            summary_rows:  0,
        }
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_state_change(&mut self, tick: Tick, vehicle: VehicleId, transition: Transition) {
        if transition.to == ParkingState::Parked {
            info!("{tick}: {vehicle} parked");
            self.parked_at.push((vehicle, tick));
        }
    }

    fn on_vehicle_exit(&mut self, tick: Tick, vehicle: VehicleId) {
        info!("{tick}: {vehicle} left the corridor");
        self.exits += 1;
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.deferred += stats.deferred;
        self.peak_active = self.peak_active.max(stats.active);
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, store: &VehicleStore, corridor: &Corridor) {
        self.snapshot_rows += store.active_count();
        self.inner.on_snapshot(tick, store, corridor);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_arrivals(flags: &Flags, scenario: &ScenarioConfig, corridor: &Corridor) -> Result<Vec<Arrival>> {
    if let Some(path) = &flags.arrivals {
        return Ok(load_arrivals_csv(path)?);
    }
    let generator = DemandGenerator::new(scenario.demand.clone(), corridor.zone_count())?;
    let mut rng = SimRng::new(scenario.sim.seed).child(DEMAND_STREAM);
    Ok(generator.generate(&mut rng))
}

fn roster_size(arrivals: &[Arrival]) -> usize {
    arrivals.iter().map(|a| a.vehicle.index() + 1).max().unwrap_or(0)
}

fn run_with<C: VehicleController, W: OutputWriter>(
    scenario: &ScenarioConfig,
    corridor: Corridor,
    arrivals: Vec<Arrival>,
    controller: C,
    writer: W,
) -> Result<()> {
    let store = VehicleStoreBuilder::new(roster_size(&arrivals))
        .driver(scenario.driver)
        .build()?;
    let vehicles = arrivals.len();

    let mut builder = SimBuilder::new(scenario.sim.clone(), corridor, store, controller).arrivals(arrivals);
    if let Some(speed) = scenario.entry_speed {
        builder = builder.entry_speed(speed);
    }
    let mut sim = builder.build()?;

    let mut obs = DemoObserver::new(SimOutputObserver::new(writer, &scenario.sim));

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  vehicles scheduled : {vehicles}");
    println!("  parked             : {}", obs.parked_at.len());
    println!("  exited             : {}", obs.exits);
    println!("  still on corridor  : {}", sim.store.active_count());
    println!("  spawn deferrals    : {}", obs.deferred);
    println!("  peak active        : {}", obs.peak_active);
    println!("  snapshot rows      : {}", obs.snapshot_rows);
    println!("  tick summary rows  : {}", obs.summary_rows);
    if let Some(usage) = memory_stats::memory_stats() {
        println!("  resident memory    : {:.1} MiB", usage.physical_mem as f64 / (1024.0 * 1024.0));
    }

    if !obs.parked_at.is_empty() {
        println!();
        println!("{:<10} {:<10} {:<10}", "Vehicle", "Parked at", "Time (s)");
        println!("{}", "-".repeat(32));
        for (vehicle, tick) in &obs.parked_at {
            println!(
                "{:<10} {:<10} {:<10.1}",
                vehicle.to_string(),
                tick.to_string(),
                sim.clock.secs_at(*tick),
            );
        }
    }

    Ok(())
}

fn run<C: VehicleController>(
    flags: &Flags,
    scenario: &ScenarioConfig,
    corridor: Corridor,
    arrivals: Vec<Arrival>,
    controller: C,
) -> Result<()> {
    if flags.sqlite {
        return run_sqlite(&flags.output, scenario, corridor, arrivals, controller);
    }
    let writer = CsvWriter::new(&flags.output)?;
    println!("Writing CSV output to {}", flags.output.display());
    run_with(scenario, corridor, arrivals, controller, writer)
}

#[cfg(feature = "sqlite")]
fn run_sqlite<C: VehicleController>(
    dir: &Path,
    scenario: &ScenarioConfig,
    corridor: Corridor,
    arrivals: Vec<Arrival>,
    controller: C,
) -> Result<()> {
    let writer = cb_output::SqliteWriter::new(dir)?;
    println!("Writing SQLite output to {}", dir.join("output.db").display());
    run_with(scenario, corridor, arrivals, controller, writer)
}

#[cfg(not(feature = "sqlite"))]
fn run_sqlite<C: VehicleController>(
    _dir: &Path,
    _scenario: &ScenarioConfig,
    _corridor: Corridor,
    _arrivals: Vec<Arrival>,
    _controller: C,
) -> Result<()> {
    anyhow::bail!("--sqlite needs the `sqlite` feature: cargo run -p corridor --features sqlite")
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let flags = Flags::from_args();
    init_logging(flags.log_level)?;

    let mut scenario = match &flags.scenario {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(ticks) = flags.ticks {
        scenario.sim.total_ticks = ticks;
    }
    if let Some(seed) = flags.seed {
        scenario.sim.seed = seed;
    }

    let corridor = Corridor::new(scenario.corridor.clone())?;
    let arrivals = load_arrivals(&flags, &scenario, &corridor)?;

    println!("=== corridor — curbside parking ===");
    println!(
        "Zones: {} × {:.1} m  |  Lanes: {}  |  Speed limit: {} m/s",
        corridor.zone_count(),
        corridor.zone_length(),
        scenario.corridor.lanes,
        corridor.speed_limit(),
    );
    println!(
        "Vehicles: {}  |  Ticks: {} × {} s  |  Seed: {}  |  Controller: {}",
        arrivals.len(),
        scenario.sim.total_ticks,
        scenario.sim.step_secs,
        scenario.sim.seed,
        if flags.free_flow { "free-flow" } else { "curbside" },
    );

    if flags.free_flow {
        run(&flags, &scenario, corridor, arrivals, FreeFlowController)
    } else {
        let controller = CurbsideController::new(scenario.controller.clone())?;
        run(&flags, &scenario, corridor, arrivals, controller)
    }
}
