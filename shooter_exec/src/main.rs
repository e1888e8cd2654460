//! Main shooter executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logger and parameters
//!     - Initialise the control core, the simulated plant and the vision client
//!     - Main loop:
//!         - Telecommand processing from the script
//!         - Control core tick:
//!             - Sensor and vision acquisition
//!             - Mode resolution
//!             - Turret, flywheel and feeder processing
//!             - Actuator demands
//!         - Plant simulation step
//!     - Save the telemetry history into the session

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::WrapErr};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use comms_if::eqpt::shooter::ShooterDems;
use shooter_lib::{
    params::ShooterExecParams,
    robot_ctrl::{RobotControl, ShooterTm},
    shooter_ctrl::ShooterCtrl,
    sim::SimPlant,
    tc_processor::{self, OperatorPanel},
    vision_client::VisionClient,
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Parameter file for the control core.
const SHOOTER_CTRL_PARAMS: &str = "shooter_ctrl.toml";

/// Number of consecutive cycle overruns after which a warning is raised at
/// every cycle rather than once.
const MAX_CONSEC_CYCLE_OVERRUNS: u64 = 50;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(name = "shooter_exec", about = "Turret shooter control executable")]
struct Opt {
    /// Path to the timed telecommand script to run.
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Executable parameter file, relative to the parameters directory.
    #[structopt(long, default_value = "shooter_exec.toml")]
    exec_params: String,

    /// Minimum log level, one of `info`, `debug` or `trace`.
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
}

/// One cycle of telemetry as saved to the session.
#[derive(Serialize)]
struct TmRecord {
    time_s: f64,
    tm: ShooterTm,
    dems: ShooterDems,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "shooter_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opt.log_level, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Turret Shooter Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: ShooterExecParams = util::params::load(&opt.exec_params)
        .wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    info!("Loading script from {:?}", &opt.script);

    let mut si = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        si.get_duration(),
        si.get_num_tcs()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut shooter_ctrl = ShooterCtrl::default();
    shooter_ctrl.init(SHOOTER_CTRL_PARAMS, &session)
        .wrap_err("Failed to initialise ShooterCtrl")?;
    info!("ShooterCtrl init complete");

    let cycle_period_s = shooter_ctrl.params().cycle_period_s;

    let plant = SimPlant::new(exec_params.sim.clone());

    let vision = VisionClient::start(
        plant.vision_pipeline(),
        exec_params.vision_period_s
    ).wrap_err("Failed to start the VisionClient")?;

    let mut robot = RobotControl::new(shooter_ctrl, vision, plant);
    robot.zero_sensors();

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let mut panel = OperatorPanel::new();
    let mut tm_history: Vec<TmRecord> = Vec::new();
    let mut num_consec_cycle_overruns = 0u64;

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- TELECOMMAND PROCESSING ----

        match si.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut panel, &mut robot, tc);
                }
            },
            // Exit if end of script reached
            PendingTcs::EndOfScript => {
                info!("End of TC script reached, stopping");
                break
            }
        }

        // ---- CONTROL PROCESSING ----

        let tm = robot.tick(panel.inputs());
        panel.end_cycle();

        robot.eqpt_mut().step(cycle_period_s);

        tm_history.push(TmRecord {
            time_s: session::get_elapsed_seconds(),
            tm,
            dems: robot.dems(),
        });

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                num_consec_cycle_overruns += 1;

                if num_consec_cycle_overruns == 1 
                    || num_consec_cycle_overruns > MAX_CONSEC_CYCLE_OVERRUNS 
                {
                    warn!(
                        "Cycle overran by {:.06} s",
                        cycle_dur.as_secs_f64() - cycle_period_s
                    );
                }
            }
        }
    }

    // ---- SHUTDOWN ----

    let (mut vision, plant) = robot.into_parts();
    vision.stop();

    let truth = plant.snapshot();
    info!(
        "Final heading {:.2} deg, spin-rate {:.2} rps, feeder ran for {:.2} s",
        truth.heading_deg,
        truth.spin_rate_rps,
        truth.feed_time_s
    );

    session.save("tm/shooter_tm.json", tm_history);

    info!("End of execution");

    session.exit();

    Ok(())
}
