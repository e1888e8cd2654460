//! Runs of the robot driven by telecommand scripts, as the executable does.

mod common;

use common::{step, SyncVision, DT};
use comms_if::{
    eqpt::shooter::{HeadingSensor, ShooterActuators, SpinRateSensor},
    tc::OperatorInputs,
};
use shooter_lib::{
    mode_mgr::OperatingMode,
    robot_ctrl::RobotControl,
    shooter_ctrl::ShooterCtrl,
    sim::{SimParams, SimPlant},
    tc_processor::{self, OperatorPanel},
};
use util::script_interpreter::{PendingTcs, ScriptInterpreter};

const AUTO_SCRIPT: &str = r#"
    0.0: {"type": "ENABLE"};
    0.1: {"type": "PRESS", "payload": {"button": "TOGGLE_SHOOTER_MODE"}};
    0.2: {"type": "RELEASE", "payload": {"button": "TOGGLE_SHOOTER_MODE"}};
    6.0: {"type": "DISABLE"};
"#;

const QUICK_PRESS_SCRIPT: &str = r#"
    0.0: {"type": "ENABLE"};
    0.1: {"type": "PRESS", "payload": {"button": "TOGGLE_SHOOTER_MODE"}};
    0.1: {"type": "RELEASE", "payload": {"button": "TOGGLE_SHOOTER_MODE"}};
    0.5: {"type": "DISABLE"};
"#;

const MANUAL_SCRIPT: &str = r#"
    0.0: {"type": "ENABLE"};
    0.0: {"type": "STICK", "payload": {"turret": 0.5, "flywheel": 0.0}};
    1.0: {"type": "STICK", "payload": {"turret": 0.0, "flywheel": 0.0}};
    1.0: {"type": "TRIGGER", "payload": {"held": true}};
    1.5: {"type": "TRIGGER", "payload": {"held": false}};
    2.0: {"type": "DISABLE"};
"#;

/// Run a script to completion in simulated time, returning the robot.
fn run_script(script: &str) -> RobotControl<SyncVision, SimPlant> {
    let mut si = ScriptInterpreter::from_script_str(script).unwrap();

    let plant = SimPlant::new(SimParams::default());
    let vision = SyncVision(plant.vision_pipeline());
    let mut robot = RobotControl::new(ShooterCtrl::default(), vision, plant);
    robot.zero_sensors();

    let mut panel = OperatorPanel::new();
    let mut time_s = 0.0;

    loop {
        match si.get_pending_tcs_at(time_s) {
            PendingTcs::None => (),
            PendingTcs::Some(tcs) => {
                for tc in tcs.iter() {
                    tc_processor::exec(&mut panel, &mut robot, tc);
                }
            },
            PendingTcs::EndOfScript => break,
        }

        step(&mut robot, panel.inputs());
        panel.end_cycle();
        time_s += DT;
    }

    robot
}

#[test]
fn test_auto_script_fires() {
    let robot = run_script(AUTO_SCRIPT);

    assert_eq!(robot.mode(), OperatingMode::AutoTrack);
    assert!(!robot.is_enabled());
    assert!(robot.dems().is_zero());

    let truth = robot.eqpt().snapshot();
    assert!((truth.heading_deg - 20.0).abs() <= 1.0);
    assert!(truth.feed_time_s > 1.0, "{:?}", truth);
}

#[test]
fn test_press_and_release_at_same_time() {
    let robot = run_script(QUICK_PRESS_SCRIPT);
    assert_eq!(robot.mode(), OperatingMode::AutoTrack);
}

#[test]
fn test_manual_script() {
    let robot = run_script(MANUAL_SCRIPT);

    assert_eq!(robot.mode(), OperatingMode::Manual);

    let truth = robot.eqpt().snapshot();

    // Half demand for one second at 180 deg/s
    assert!((truth.heading_deg - 90.0).abs() <= 0.5 * 180.0 * DT + 1e-9, "{:?}", truth);
    assert!((truth.feed_time_s - 0.5).abs() <= DT + 1e-9, "{:?}", truth);
    assert_eq!(truth.spin_rate_rps, 0.0);
}

/// Equipment whose heading sensor has failed.
#[derive(Default)]
struct FailedGyro {
    outputs: [f64; 3],
}

impl HeadingSensor for FailedGyro {
    fn current_heading_deg(&self) -> f64 {
        std::f64::NAN
    }

    fn reset_heading(&mut self) {}
}

impl SpinRateSensor for FailedGyro {
    fn current_revs_per_second(&self) -> f64 {
        0.0
    }

    fn reset_encoder(&mut self) {}
}

impl ShooterActuators for FailedGyro {
    fn set_turret_output(&mut self, percent: f64) {
        self.outputs[0] = percent;
    }

    fn set_flywheel_output(&mut self, percent: f64) {
        self.outputs[1] = percent;
    }

    fn set_feeder_output(&mut self, percent: f64) {
        self.outputs[2] = percent;
    }
}

#[test]
fn test_non_finite_sensor_stops_everything() {
    let plant = SimPlant::default();
    let vision = SyncVision(plant.vision_pipeline());

    let mut robot = RobotControl::new(
        ShooterCtrl::default(), 
        vision, 
        FailedGyro { outputs: [1.0; 3] }
    );
    robot.set_enabled(true);

    let operator = OperatorInputs {
        turret_axis: 1.0,
        trigger: true,
        ..Default::default()
    };

    let tm = robot.tick(&operator);
    assert!(!tm.turret_on_target);
    assert!(!tm.flywheel_on_target);
    assert_eq!(tm.mode, OperatingMode::Manual);
    assert_eq!(robot.eqpt().outputs, [0.0; 3]);
}
