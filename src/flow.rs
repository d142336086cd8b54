//! The `dropdown.showSubFamilyDevices` command.
//!
//! Loads the workspace's description file, asks for a sub-family, then for
//! one of its devices, and shows the chosen device's description. Cancelling
//! either prompt ends the command without output.

use tracing::{debug, warn};

use crate::error::Result;
use crate::objects::SubFamilies;
use crate::picker::{Notifier, Picker};
use crate::workspace::Workspace;

/// Identifier of the command.
pub const COMMAND_ID: &str = "dropdown.showSubFamilyDevices";

/// Placeholder of the first prompt.
pub const SUB_FAMILY_PLACEHOLDER: &str = "Select a SubFamily";

/// Placeholder of the second prompt.
pub const DEVICE_PLACEHOLDER: &str = "Select a Device";

/// How a run of the command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user picked a device
    Selected {
        /// Label of the chosen sub-family
        sub_family: String,
        /// Label of the chosen device
        device: String,
        /// Description of the chosen device
        description: String,
    },
    /// The user dismissed one of the prompts
    Cancelled,
}

impl Outcome {
    /// Returns the message displayed for this outcome, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Selected { description, .. } => Some(format!("Description: {}", description)),
            Outcome::Cancelled => None,
        }
    }
}

/// Runs both prompts over an already-extracted hierarchy.
pub fn select_device<P: Picker>(sub_families: &SubFamilies, picker: &mut P) -> Result<Outcome> {
    let labels = sub_families.labels();
    let Some(index) = picker.pick(SUB_FAMILY_PLACEHOLDER, &labels)? else {
        debug!("sub-family selection cancelled");
        return Ok(Outcome::Cancelled);
    };
    let Some(sub_family) = sub_families.get(index) else {
        warn!(index, "picker returned an out-of-range sub-family");
        return Ok(Outcome::Cancelled);
    };

    let device_labels = sub_family.device_labels();
    let Some(index) = picker.pick(DEVICE_PLACEHOLDER, &device_labels)? else {
        debug!(sub_family = %sub_family.label, "device selection cancelled");
        return Ok(Outcome::Cancelled);
    };
    let Some(device) = sub_family.devices.get(index) else {
        warn!(index, "picker returned an out-of-range device");
        return Ok(Outcome::Cancelled);
    };

    Ok(Outcome::Selected {
        sub_family: sub_family.label.clone(),
        device: device.label.clone(),
        description: device.description.clone(),
    })
}

/// Loads the workspace hierarchy, runs both prompts and shows the result.
///
/// Errors are returned to the caller, not displayed.
pub fn show_sub_family_devices<P: Picker, N: Notifier>(
    workspace: &Workspace,
    picker: &mut P,
    notifier: &mut N,
) -> Result<Outcome> {
    let sub_families = workspace.load_sub_families()?;
    present(&sub_families, picker, notifier)
}

/// Runs both prompts over `sub_families` and shows the chosen description.
pub fn present<P: Picker, N: Notifier>(
    sub_families: &SubFamilies,
    picker: &mut P,
    notifier: &mut N,
) -> Result<Outcome> {
    let outcome = select_device(sub_families, picker)?;
    if let Some(message) = outcome.message() {
        notifier.info(&message)?;
    }
    Ok(outcome)
}

/// Runs the command end to end, showing any failure through `notifier`.
///
/// Returns the outcome on success, or `None` after an error was shown.
pub fn run_command<P: Picker, N: Notifier>(
    workspace: &Workspace,
    picker: &mut P,
    notifier: &mut N,
) -> Result<Option<Outcome>> {
    debug!(command = COMMAND_ID, "running command");
    match show_sub_family_devices(workspace, picker, notifier) {
        Ok(outcome) => Ok(Some(outcome)),
        Err(e) => {
            notifier.error(&e.to_string())?;
            Ok(None)
        }
    }
}
