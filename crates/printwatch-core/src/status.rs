//! Print-state classification
//!
//! `status` (coarse) and `stage` (fine-grained) are two independently
//! updated upstream signals that can disagree or lag during transitions.
//! Classification gives priority to an explicitly active `status`, then
//! an explicitly non-printing `stage`, then stage-based inference, which
//! keeps the card from flickering between states mid-transition.

/// Coarse statuses that always mean an active print, including paused.
const ACTIVE_STATUSES: [&str; 3] = ["printing", "running", "pause"];

/// Stages that always mean no print is in progress.
const INACTIVE_STAGES: [&str; 3] = ["idle", "offline", "unknown"];

/// Pre-print calibration and heating sub-stages that count as printing.
const PREP_STAGES: [&str; 8] = [
    "heatbed_preheating",
    "heating_hotend",
    "checking_extruder_temperature",
    "auto_bed_leveling",
    "scanning_bed_surface",
    "inspecting_first_layer",
    "calibrating_extrusion",
    "calibrating_extrusion_flow",
];

/// Statuses under which the previous job's name is still meaningful.
const FINISHED_STATUSES: [&str; 2] = ["idle", "finish"];

/// Task-name values that are placeholders, never real job names.
const PLACEHOLDER_NAMES: [&str; 2] = ["unavailable", "unknown"];

/// Classify whether a print is in progress (paused included).
///
/// An unrecognized `stage` with a non-active `status` classifies as not
/// printing; the stage lists are fixed and deliberately conservative.
pub fn is_printing(status: &str, stage: &str) -> bool {
    if ACTIVE_STATUSES.contains(&status) {
        return true;
    }
    if INACTIVE_STAGES.contains(&stage) {
        return false;
    }
    if stage == "printing" || stage.starts_with("paused_") {
        return true;
    }
    PREP_STAGES.contains(&stage)
}

/// Whether the print is paused. A paused print still classifies as
/// printing via [`is_printing`].
pub fn is_paused(status: &str) -> bool {
    status == "pause"
}

/// Name of the last completed job, shown only once the printer has
/// returned to idle/finished and only when the task name is a real
/// value rather than a placeholder.
pub fn last_print_name<'a>(status: &str, task_name: Option<&'a str>) -> Option<&'a str> {
    match task_name {
        Some(name)
            if FINISHED_STATUSES.contains(&status)
                && !name.is_empty()
                && !PLACEHOLDER_NAMES.contains(&name) =>
        {
            Some(name)
        }
        _ => None,
    }
}
