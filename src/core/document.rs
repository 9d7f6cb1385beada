//! Das Dokument: Kurvensammlung plus Koordinaten-Einstellungen.

use super::{CoordsModel, CurveSet, Point};

/// Ein geladenes bzw. in Bearbeitung befindliches Dokument.
///
/// Die Kalibrierungspunkte sind die Punkte der Achsenkurve: Screen-Position
/// vom Klick, Graph-Position vom Benutzer eingegeben.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    curves: CurveSet,
    coords: CoordsModel,
}

impl Document {
    /// Erstellt ein leeres Dokument (linear/linear).
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut ein Dokument aus geparsten Teilen (XML-Import).
    pub fn from_parts(curves: CurveSet, coords: CoordsModel) -> Self {
        Self { curves, coords }
    }

    /// Gibt die Kurvensammlung zurueck.
    pub fn curve_set(&self) -> &CurveSet {
        &self.curves
    }

    /// Gibt die Kurvensammlung mutierbar zurueck.
    pub fn curve_set_mut(&mut self) -> &mut CurveSet {
        &mut self.curves
    }

    /// Ersetzt die komplette Kurvensammlung (Undo/Redo, Settings-Dialog).
    pub fn apply_curve_set(&mut self, curves: CurveSet) {
        self.curves = curves;
    }

    /// Gibt die Koordinaten-Einstellungen zurueck.
    pub fn coords(&self) -> CoordsModel {
        self.coords
    }

    /// Setzt die Koordinaten-Einstellungen.
    pub fn set_coords(&mut self, coords: CoordsModel) {
        self.coords = coords;
    }

    /// Gibt die Kalibrierungspunkte (Achsenkurve) zurueck.
    pub fn calibration_points(&self) -> &[Point] {
        self.curves.axis_curve().points()
    }
}
