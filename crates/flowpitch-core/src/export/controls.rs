//! Export button state machine
//!
//! `Idle -> Exporting -> Idle`. The return to `Idle` is tied to the
//! lifetime of an [`ExportSession`], so it happens on success, on error and
//! when the export future is dropped mid-flight.

use tracing::debug;

use super::{ControlSurface, SlideStage};
use crate::config::ExportSettings;

/// Phase of the export button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Exporting,
}

/// Everything the page shows about the export state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub phase: ExportPhase,
    pub button_label: String,
    pub button_disabled: bool,
    /// Global export-mode flag (the `exportingPdf` body class)
    pub export_mode: bool,
}

/// Owns the export state and pushes every change to a [`ControlSurface`]
#[derive(Debug)]
pub struct ExportController<C> {
    state: ControlState,
    idle_label: String,
    busy_label: String,
    surface: C,
}

impl<C: ControlSurface> ExportController<C> {
    /// Create a controller in the idle state and show that state
    pub fn new(settings: &ExportSettings, mut surface: C) -> Self {
        let state = ControlState {
            phase: ExportPhase::Idle,
            button_label: settings.idle_label.clone(),
            button_disabled: false,
            export_mode: false,
        };
        surface.apply(&state);
        Self {
            state,
            idle_label: settings.idle_label.clone(),
            busy_label: settings.busy_label.clone(),
            surface,
        }
    }

    /// Current state
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Check whether an export is running
    pub fn is_busy(&self) -> bool {
        self.state.phase == ExportPhase::Exporting
    }

    /// The surface the state is shown on
    pub fn surface(&self) -> &C {
        &self.surface
    }

    /// Move to `phase`; the only place the state changes
    pub fn transition(&mut self, phase: ExportPhase) {
        let busy = phase == ExportPhase::Exporting;
        self.state = ControlState {
            phase,
            button_label: if busy {
                self.busy_label.clone()
            } else {
                self.idle_label.clone()
            },
            button_disabled: busy,
            export_mode: busy,
        };
        debug!(?phase, "export state");
        self.surface.apply(&self.state);
    }
}

/// An export in progress
///
/// Holds the controller and the staging element for the duration of one
/// export. Dropping the session empties the stage and returns the controller
/// to `Idle`.
pub struct ExportSession<'a, C: ControlSurface, S: SlideStage> {
    controller: &'a mut ExportController<C>,
    stage: &'a mut S,
}

impl<'a, C: ControlSurface, S: SlideStage> ExportSession<'a, C, S> {
    /// Empty the stage and enter `Exporting`
    pub fn begin(controller: &'a mut ExportController<C>, stage: &'a mut S) -> Self {
        stage.clear();
        controller.transition(ExportPhase::Exporting);
        Self { controller, stage }
    }

    /// The staging element
    pub fn stage(&mut self) -> &mut S {
        &mut *self.stage
    }

    /// Current control state
    pub fn state(&self) -> &ControlState {
        self.controller.state()
    }
}

impl<C: ControlSurface, S: SlideStage> Drop for ExportSession<'_, C, S> {
    fn drop(&mut self) {
        self.stage.clear();
        self.controller.transition(ExportPhase::Idle);
    }
}
