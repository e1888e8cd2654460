//! # Telecommand processor module
//!
//! The telecommand processor applies TCs from any source to the operator's
//! controls and the robot.
//!
//! Several TCs may arrive between two ticks. A button pressed and released
//! within one batch is held for the following tick, so the press is still
//! seen by the mode manager's edge detection.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use crate::robot_ctrl::RobotControl;
use comms_if::{
    eqpt::{shooter::ShooterEqpt, vision::VisionProvider},
    tc::{Button, OperatorInputs, Tc},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The operator's controls as built up from telecommands.
#[derive(Debug, Default, Clone)]
pub struct OperatorPanel {
    inputs: OperatorInputs,

    /// Buttons pressed since the last tick.
    pressed: Vec<Button>,

    /// Buttons released in the same batch as their press, released once the
    /// next tick has seen them held.
    deferred_releases: Vec<Button>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl OperatorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The inputs to pass to the next tick.
    pub fn inputs(&self) -> &OperatorInputs {
        &self.inputs
    }

    pub fn press(&mut self, button: Button) {
        self.inputs.set_button(button, true);
        if !self.pressed.contains(&button) {
            self.pressed.push(button);
        }
    }

    pub fn release(&mut self, button: Button) {
        if self.pressed.contains(&button) {
            debug!("{:?} released before the next tick, holding for one tick", button);
            if !self.deferred_releases.contains(&button) {
                self.deferred_releases.push(button);
            }
        }
        else {
            self.inputs.set_button(button, false);
        }
    }

    /// Must be called after every tick.
    pub fn end_cycle(&mut self) {
        for button in self.deferred_releases.drain(..) {
            self.inputs.set_button(button, false);
        }
        self.pressed.clear();
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Control inputs update the operator panel which is passed to the next
/// tick, everything else acts on the robot directly.
pub fn exec<V, E>(panel: &mut OperatorPanel, robot: &mut RobotControl<V, E>, tc: &Tc)
where
    V: VisionProvider,
    E: ShooterEqpt,
{
    debug!("Executing TC: {:?}", tc);

    // Handle different Tcs
    match tc {
        Tc::Enable => robot.set_enabled(true),
        Tc::Disable => robot.set_enabled(false),
        Tc::Press { button } => panel.press(*button),
        Tc::Release { button } => panel.release(*button),
        Tc::Stick { turret, flywheel } => {
            panel.inputs.turret_axis = *turret;
            panel.inputs.flywheel_axis = *flywheel;
        },
        Tc::Trigger { held } => panel.inputs.trigger = *held,
        Tc::SetParam { name, value } => robot.set_tuning_param(name, *value),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        mode_mgr::OperatingMode,
        shooter_ctrl::ShooterCtrl,
        sim::SimPlant,
    };
    use comms_if::eqpt::vision::TargetEstimate;

    struct NoVision;

    impl VisionProvider for NoVision {
        fn poll_target(&mut self) -> TargetEstimate {
            TargetEstimate::not_found()
        }
    }

    fn robot() -> RobotControl<NoVision, SimPlant> {
        RobotControl::new(ShooterCtrl::default(), NoVision, SimPlant::default())
    }

    #[test]
    fn test_exec_tcs() {
        let mut robot = robot();
        let mut panel = OperatorPanel::new();

        exec(&mut panel, &mut robot, &Tc::Enable);
        assert!(robot.is_enabled());

        exec(&mut panel, &mut robot, &Tc::Stick { turret: 0.25, flywheel: -0.5 });
        exec(&mut panel, &mut robot, &Tc::Trigger { held: true });
        assert_eq!(panel.inputs().turret_axis, 0.25);
        assert_eq!(panel.inputs().flywheel_axis, -0.5);
        assert!(panel.inputs().trigger);

        let tm = robot.tick(panel.inputs());
        panel.end_cycle();
        assert_eq!(tm.mode, OperatingMode::Manual);
        assert_eq!(robot.dems().feeder, 0.42);

        exec(&mut panel, &mut robot, &Tc::Press { button: Button::ToggleShooterMode });
        assert!(panel.inputs().toggle_shooter_mode);
        robot.tick(panel.inputs());
        panel.end_cycle();
        assert_eq!(robot.mode(), OperatingMode::AutoTrack);

        exec(&mut panel, &mut robot, &Tc::Release { button: Button::ToggleShooterMode });
        assert!(!panel.inputs().toggle_shooter_mode);

        exec(&mut panel, &mut robot, &Tc::Disable);
        assert!(!robot.is_enabled());
    }

    #[test]
    fn test_press_and_release_between_ticks() {
        let mut robot = robot();
        let mut panel = OperatorPanel::new();
        robot.set_enabled(true);

        exec(&mut panel, &mut robot, &Tc::Press { button: Button::ToggleShooterMode });
        exec(&mut panel, &mut robot, &Tc::Release { button: Button::ToggleShooterMode });
        assert!(panel.inputs().toggle_shooter_mode);

        robot.tick(panel.inputs());
        panel.end_cycle();
        assert_eq!(robot.mode(), OperatingMode::AutoTrack);
        assert!(!panel.inputs().toggle_shooter_mode);

        // A second quick press toggles back
        robot.tick(panel.inputs());
        panel.end_cycle();
        exec(&mut panel, &mut robot, &Tc::Press { button: Button::ToggleShooterMode });
        exec(&mut panel, &mut robot, &Tc::Release { button: Button::ToggleShooterMode });
        robot.tick(panel.inputs());
        panel.end_cycle();
        assert_eq!(robot.mode(), OperatingMode::Manual);
    }
}
