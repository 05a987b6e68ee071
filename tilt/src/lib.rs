//! Tilt: the sequencing-state engine and editor shell of a grid step sequencer.
//!
//! The engine ([`pattern`], [`interaction`], [`panel`]) holds the note grid and
//! turns pointer gestures into cell edits. The [`gui`] module hosts it inside an
//! eframe window together with the auxiliary [`strip`]s.

pub mod cell;
pub mod cli;
pub mod config;
pub mod error;
pub mod gui;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod panel;
pub mod pattern;
pub mod repaint;
pub mod snapshot;
pub mod strip;

pub use cell::{Cell, CellState};
pub use config::EditorConfig;
pub use error::{ConfigError, PatternError};
pub use interaction::{MouseCursor, SequencerMode};
pub use panel::SequencerPanel;
pub use pattern::{CellCoord, Pattern, Span, MIDI_PITCHES};
pub use strip::SequencerStrip;
