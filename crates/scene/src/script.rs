//! Scripted interaction replay.
//!
//! A script is a picker config plus a list of steps, read from JSON:
//!
//! ```json
//! {
//!   "config": { "size": 300, "markerWidth": 10 },
//!   "steps": [
//!     { "action": "press", "x": 285, "y": 150 },
//!     { "action": "move", "x": 100, "y": 200 },
//!     { "action": "release" },
//!     { "action": "set_hex", "hex": "#3366cc" }
//!   ]
//! }
//! ```
//!
//! Pointer coordinates are surface-local. Replaying a script collects every
//! color the picker emits, in order.

use std::cell::RefCell;
use std::rc::Rc;

use huewheel_core::{Color, ColorPicker, Hsl, PickerConfig, PickerError, PointerEvent, Rgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Press {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Release {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    SetRgb {
        rgb: Rgb,
    },
    SetHsl {
        hsl: Hsl,
    },
    SetHex {
        hex: String,
    },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: PickerConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses and validates a script.
    pub fn from_json(json: &str) -> Result<Self, PickerError> {
        let script: Script =
            serde_json::from_str(json).map_err(|e| PickerError::InvalidScript(e.to_string()))?;
        script.config.validate()?;
        Ok(script)
    }
}

/// Outcome of a replay: the picker in its final state and every color it
/// emitted while the steps ran.
pub struct Replay {
    pub picker: ColorPicker,
    pub events: Vec<Color>,
}

impl Replay {
    /// The color under the square's marker after the last step.
    pub fn final_color(&self) -> Color {
        self.picker.get_color()
    }
}

/// Builds a picker from the script's config and runs every step on it.
///
/// A malformed `set_hex` step aborts the replay with `InvalidScript` naming
/// the step index.
pub fn replay(script: &Script) -> Result<Replay, PickerError> {
    let mut picker = ColorPicker::from_config(script.config)?;
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    picker.subscribe(move |color| sink.borrow_mut().push(*color));

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "replay step");
        match step {
            Step::Press { x, y } => picker.handle(PointerEvent::down(*x, *y)),
            Step::Move { x, y } => picker.handle(PointerEvent::moved(*x, *y)),
            Step::Release { x, y } => picker.handle(PointerEvent::up(*x, *y)),
            Step::SetRgb { rgb } => picker.set_rgb(*rgb),
            Step::SetHsl { hsl } => picker.set_hsl(*hsl),
            Step::SetHex { hex } => picker
                .set_hex(hex)
                .map_err(|e| PickerError::InvalidScript(format!("step {index}: {e}")))?,
            Step::Draw => picker.draw(),
        }
    }

    let events = std::mem::take(&mut *events.borrow_mut());
    Ok(Replay { picker, events })
}
