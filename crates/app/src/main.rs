//! Closed-loop demo
//!
//! Drives the fuzzy controller against a first-order plant with a mid-run
//! setpoint step, logging periodic telemetry snapshots. Pass a JSON file
//! path to override the default controller configuration.

use std::error::Error;
use std::fs;

use log::LevelFilter;
use rand::Rng;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use control::{FlcConfig, FlController, LogSink, RuleWeights, standard_rules};
use flcore::NormMode;

// Simulation timesteps
const DT: f64 = 0.01; // Control tick (s)
const SIM_SECONDS: f64 = 20.0;
const LOG_EVERY: usize = 100; // Snapshot once per simulated second

// Plant: first-order lag y' = (k * u - y) / tau
const PLANT_GAIN: f64 = 2.0;
const PLANT_TAU: f64 = 0.8;
const NOISE_AMPLITUDE: f64 = 0.02;

// Setpoint schedule
const SETPOINT_A: f64 = 5.0;
const SETPOINT_B: f64 = -3.0;
const STEP_TIME: f64 = 10.0;

fn default_config() -> FlcConfig {
    FlcConfig::new(NormMode::limits(10.0, 50.0, 40.0))
        .with_output_gain(4.0)
        .with_output_max(6.0)
}

fn load_config() -> Result<FlcConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            let config: FlcConfig = serde_json::from_str(&text)?;
            log::info!("loaded controller config from {path}");
            Ok(config)
        }
        None => Ok(default_config()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = load_config()?;
    let mut flc = FlController::new(config)?
        .with_rules(standard_rules(RuleWeights::transition())?)
        .with_sink(Box::new(LogSink));

    let mut rng = rand::thread_rng();
    let mut y = 0.0_f64;
    let mut setpoint = SETPOINT_A;
    let mut stepped = false;

    let steps = (SIM_SECONDS / DT) as usize;
    log::info!("running {SIM_SECONDS} s closed loop, setpoint {SETPOINT_A} -> {SETPOINT_B} at {STEP_TIME} s");

    for step in 0..steps {
        let t = step as f64 * DT;

        if !stepped && t >= STEP_TIME {
            setpoint = SETPOINT_B;
            // Fresh transient: swap in transition weights and drop the
            // accumulated integral from the previous operating point.
            flc.set_rules(standard_rules(RuleWeights::transition())?);
            flc.reset();
            stepped = true;
            log::info!("t={t:.2} setpoint step to {setpoint}");
        } else if stepped && (setpoint - y).abs() < 0.2 && flc.is_running() {
            // Settled near the new setpoint: back to hold weights
            flc.set_rules(standard_rules(RuleWeights::hold())?);
        }

        let measured = y + rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
        let u = flc.evaluate(measured, setpoint, DT);

        // Integrate the plant
        y += (PLANT_GAIN * u - y) / PLANT_TAU * DT;

        if step % LOG_EVERY == 0 {
            let snap = flc.snapshot();
            log::info!(
                "t={t:5.2} y={y:7.3} sp={setpoint:6.2} u={u:7.3} | p={:6.3} i={:6.3} d={:6.3}",
                snap.p,
                snap.i,
                snap.d
            );
        }
    }

    let snap = flc.snapshot();
    log::info!(
        "final: y={y:.3} setpoint={setpoint:.2} output={:.3}",
        snap.last_output
    );
    Ok(())
}
