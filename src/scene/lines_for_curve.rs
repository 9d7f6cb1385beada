//! Segment-Container einer einzelnen Kurve.

use glam::DVec2;
use indexmap::IndexMap;

/// Ein Verbindungssegment zwischen zwei ordinal-benachbarten Punkten.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSegment {
    /// Identifier des Startpunkts
    pub from: String,
    /// Identifier des Endpunkts
    pub to: String,
    /// Screen-Position des Startpunkts
    pub start: DVec2,
    /// Screen-Position des Endpunkts
    pub end: DVec2,
    /// Linienbreite in Pixeln
    pub width: f64,
}

/// Alle Segmente einer Kurve, adressiert ueber das Punkt-Paar.
///
/// Wird vom Szenen-Abgleich beim ersten Bedarf angelegt (lazy) und
/// verworfen, sobald die Kurve nicht mehr linienverbunden ist.
#[derive(Debug, Clone, PartialEq)]
pub struct LinesForCurve {
    curve_name: String,
    segments: IndexMap<(String, String), VisualSegment>,
}

impl LinesForCurve {
    /// Erstellt einen leeren Container fuer die Kurve.
    pub fn new(curve_name: impl Into<String>) -> Self {
        Self {
            curve_name: curve_name.into(),
            segments: IndexMap::new(),
        }
    }

    /// Gibt den Kurvennamen zurueck.
    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    /// Gleicht die Segmente mit der ordinal-sortierten Punktfolge ab.
    ///
    /// Fuer jedes benachbarte Paar wird ein Segment angelegt bzw. auf die
    /// aktuellen Positionen gesetzt; Segmente ohne zugehoeriges Paar
    /// werden entfernt.
    pub fn sync_segments(&mut self, ordered: &[(&str, DVec2)], width: f64) {
        let mut wanted: Vec<(String, String)> = Vec::new();
        for pair in ordered.windows(2) {
            let (from_id, from_pos) = pair[0];
            let (to_id, to_pos) = pair[1];
            let key = (from_id.to_string(), to_id.to_string());
            wanted.push(key.clone());

            if let Some(segment) = self.segments.get_mut(&key) {
                segment.start = from_pos;
                segment.end = to_pos;
                segment.width = width;
            } else {
                self.segments.insert(
                    key,
                    VisualSegment {
                        from: from_id.to_string(),
                        to: to_id.to_string(),
                        start: from_pos,
                        end: to_pos,
                        width,
                    },
                );
            }
        }

        self.segments.retain(|key, _| wanted.contains(key));
    }

    /// Setzt die Endpunkte aller Segmente nach, die den gezogenen Punkt
    /// beruehren (Drag-Schnellpfad).
    pub fn move_segments_with_dragged_point(&mut self, identifier: &str, pos: DVec2) {
        for segment in self.segments.values_mut() {
            if segment.from == identifier {
                segment.start = pos;
            }
            if segment.to == identifier {
                segment.end = pos;
            }
        }
    }

    /// Gibt alle (from, to)-Paare in Containerreihenfolge zurueck.
    pub fn segment_pairs(&self) -> Vec<(String, String)> {
        self.segments.keys().cloned().collect()
    }

    /// Iteriert ueber alle Segmente.
    pub fn segments(&self) -> impl Iterator<Item = &VisualSegment> {
        self.segments.values()
    }

    /// Gibt die Anzahl der Segmente zurueck.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Gibt zurueck ob der Container leer ist.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
