//! Helpers shared by the integration tests.

#![allow(dead_code)]

use comms_if::eqpt::vision::{FilterTuning, TargetEstimate, VisionPipeline, VisionProvider};
use shooter_lib::{
    robot_ctrl::RobotControl,
    shooter_ctrl::ShooterCtrl,
    sim::{SimPlant, SimParams, SimVisionPipeline},
};

/// Control cycle period used by the tests.
pub const DT: f64 = 0.02;

/// Runs the simulated camera in the calling thread so that tests are
/// deterministic.
pub struct SyncVision(pub SimVisionPipeline);

impl VisionProvider for SyncVision {
    fn poll_target(&mut self) -> TargetEstimate {
        self.0.process()
    }

    fn apply_filter_tuning(&mut self, tuning: FilterTuning) {
        self.0.apply_filter_tuning(&tuning)
    }
}

pub type SimRobot = RobotControl<SyncVision, SimPlant>;

/// Build an enabled robot with default control parameters around a simulated
/// plant.
pub fn sim_robot(params: SimParams) -> SimRobot {
    let plant = SimPlant::new(params);
    let vision = SyncVision(plant.vision_pipeline());

    let mut robot = RobotControl::new(ShooterCtrl::default(), vision, plant);
    robot.zero_sensors();
    robot.set_enabled(true);
    robot
}

/// Tick the robot and step the plant.
pub fn step(robot: &mut SimRobot, operator: &comms_if::tc::OperatorInputs) {
    robot.tick(operator);
    robot.eqpt_mut().step(DT);
}
