//! Visuelles Gegenstueck eines Modell-Punkts.

use glam::DVec2;

/// Ein Punkt der visuellen Ebene.
///
/// Nicht autoritativ: jederzeit aus dem Kurvenmodell ableitbar und nur vom
/// Szenen-Abgleich erzeugt bzw. entfernt.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualPoint {
    identifier: String,
    pos: DVec2,
    radius: f64,
    color: [f32; 4],
    selected: bool,
    position_changed: bool,
}

impl VisualPoint {
    /// Erstellt einen neuen visuellen Punkt. Gilt als positionsveraendert,
    /// bis die Flags das naechste Mal zurueckgesetzt werden.
    pub fn new(identifier: String, pos: DVec2, radius: f64, color: [f32; 4]) -> Self {
        Self {
            identifier,
            pos,
            radius,
            color,
            selected: false,
            position_changed: true,
        }
    }

    /// Gibt den Punkt-Identifier zurueck.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Gibt die Screen-Position zurueck.
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    /// Setzt die Screen-Position und markiert die Aenderung.
    pub fn set_pos(&mut self, pos: DVec2) {
        if self.pos != pos {
            self.pos = pos;
            self.position_changed = true;
        }
    }

    /// Uebernimmt Radius und Farbe aus dem Kurven-Stil.
    pub fn set_style(&mut self, radius: f64, color: [f32; 4]) {
        self.radius = radius;
        self.color = color;
    }

    /// Gibt den Radius zurueck.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Gibt die Farbe (RGBA) zurueck.
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Gibt zurueck ob der Punkt selektiert ist.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Setzt den Selektionszustand.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Gibt zurueck ob sich die Position seit dem letzten Reset geaendert hat.
    pub fn has_position_changed(&self) -> bool {
        self.position_changed
    }

    /// Setzt das Positions-Flag zurueck (typisch bei Drag-Beginn).
    pub fn reset_position_changed(&mut self) {
        self.position_changed = false;
    }
}
