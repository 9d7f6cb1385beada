//! Zentrale Konfiguration fuer den Graph-Digitizer-Kern.
//!
//! `DigitizerOptions` enthaelt alle zur Laufzeit aenderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Undo/Redo ───────────────────────────────────────────────────────

/// Maximale Tiefe des Undo/Redo-Stacks.
pub const MAX_UNDO_DEPTH: usize = 200;

// ── Punkt-Darstellung ──────────────────────────────────────────────

/// Radius von Achsenpunkten in Pixeln.
pub const AXIS_POINT_RADIUS: f64 = 5.0;
/// Radius von Kurvenpunkten in Pixeln.
pub const CURVE_POINT_RADIUS: f64 = 4.0;
/// Standard-Farbe von Kurvenpunkten (RGBA: Cyan).
pub const POINT_COLOR_DEFAULT: [f32; 4] = [0.0, 0.8, 1.0, 1.0];
/// Farbe von Achsenpunkten (RGBA: Rot).
pub const POINT_COLOR_AXIS: [f32; 4] = [1.0, 0.2, 0.2, 1.0];

// ── Linien-Darstellung ─────────────────────────────────────────────

/// Standard-Linienbreite in Pixeln.
pub const LINE_WIDTH_DEFAULT: f64 = 1.0;
/// Standard-Linienfarbe (RGBA).
pub const LINE_COLOR_DEFAULT: [f32; 4] = [0.1, 0.1, 0.9, 1.0];

/// Laufzeit-Optionen des Kerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitizerOptions {
    /// Maximale Tiefe des Undo/Redo-Stacks
    pub max_undo_depth: usize,
    /// Radius von Achsenpunkten in Pixeln
    pub axis_point_radius: f64,
    /// Radius von Kurvenpunkten in Pixeln
    pub curve_point_radius: f64,
    /// Standard-Linienbreite in Pixeln
    pub line_width: f64,
}

impl Default for DigitizerOptions {
    fn default() -> Self {
        Self {
            max_undo_depth: MAX_UNDO_DEPTH,
            axis_point_radius: AXIS_POINT_RADIUS,
            curve_point_radius: CURVE_POINT_RADIUS,
            line_width: LINE_WIDTH_DEFAULT,
        }
    }
}
