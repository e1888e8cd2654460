//! Checks that the parameter files shipped with the software load.

use std::path::PathBuf;

use shooter_lib::{params::ShooterExecParams, shooter_ctrl};
use util::params::load_from_path;

fn params_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("params")
}

#[test]
fn test_shooter_ctrl_params() {
    let params: shooter_ctrl::Params = load_from_path(params_dir().join("shooter_ctrl.toml"))
        .unwrap();

    let defaults = shooter_ctrl::Params::default();
    assert_eq!(params.cycle_period_s, defaults.cycle_period_s);
    assert_eq!(params.feeder_speed, defaults.feeder_speed);
    assert_eq!(params.turret, defaults.turret);
    assert_eq!(params.flywheel, defaults.flywheel);
    assert!((params.ballistics.exit_angle_rad - defaults.ballistics.exit_angle_rad).abs() < 1e-12);
    assert!(
        (params.ballistics.flywheel_radius_m - defaults.ballistics.flywheel_radius_m).abs() < 1e-12
    );
}

#[test]
fn test_shooter_exec_params() {
    let params: ShooterExecParams = load_from_path(params_dir().join("shooter_exec.toml"))
        .unwrap();

    assert_eq!(params.vision_period_s, 0.05);
    assert_eq!(params.sim.camera_fov_deg, 60.0);
}
