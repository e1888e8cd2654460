//! Rising edge detection on the operator's mode buttons

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::tc::{Button, OperatorInputs};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Every mode button, in the order they are stored.
const BUTTONS: [Button; 3] = [
    Button::ToggleShooterMode,
    Button::ToggleTuning,
    Button::CycleTuningMode,
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Remembers the level of each button on the previous cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct ButtonEdges {
    prev: [bool; 3],
}

/// The buttons which went from released to pressed on this cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RisingEdges {
    rising: [bool; 3],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ButtonEdges {
    /// Compare the new button levels against the previous cycle's.
    pub fn update(&mut self, inputs: &OperatorInputs) -> RisingEdges {
        let mut edges = RisingEdges::default();

        for (i, &button) in BUTTONS.iter().enumerate() {
            let level = inputs.button(button);
            edges.rising[i] = level && !self.prev[i];
            self.prev[i] = level;
        }

        edges
    }
}

impl RisingEdges {
    pub fn is_rising(&self, button: Button) -> bool {
        match BUTTONS.iter().position(|&b| b == button) {
            Some(i) => self.rising[i],
            None => false,
        }
    }

    pub fn any(&self) -> bool {
        self.rising.iter().any(|&r| r)
    }

    /// Iterate over every button with a rising edge.
    pub fn iter(&self) -> impl Iterator<Item = Button> + '_ {
        BUTTONS
            .iter()
            .zip(self.rising.iter())
            .filter(|(_, r)| **r)
            .map(|(&b, _)| b)
    }
}
