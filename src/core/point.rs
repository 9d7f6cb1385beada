//! Ein digitalisierter Punkt mit Screen- und Graph-Position.

use glam::DVec2;

/// Trennzeichen zwischen Kurvenname und laufender Nummer im Identifier.
///
/// Kurvennamen koennen kein Tab enthalten (wird bei der Eingabe gefiltert),
/// daher ist die Zuordnung Identifier → Kurve eindeutig.
pub const IDENTIFIER_SEPARATOR: char = '\t';

/// Ein einzelner Punkt einer Kurve.
///
/// Die Graph-Position ist abgeleitet (Screen-Position durch die
/// Koordinatentransformation), beim Achsenpunkt dagegen der vom Benutzer
/// eingegebene Achsenwert. Das Ordinal bestimmt die Verbindungsreihenfolge
/// innerhalb der Kurve, unabhaengig von der Einfuegereihenfolge.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    identifier: String,
    pos_screen: DVec2,
    pos_graph: DVec2,
    ordinal: f64,
}

impl Point {
    /// Erstellt einen Punkt mit allen Feldern (z.B. beim XML-Import).
    pub fn new(identifier: String, pos_screen: DVec2, pos_graph: DVec2, ordinal: f64) -> Self {
        Self {
            identifier,
            pos_screen,
            pos_graph,
            ordinal,
        }
    }

    /// Baut einen Identifier aus Kurvenname und laufender Nummer.
    pub fn make_identifier(curve_name: &str, index: u64) -> String {
        format!("{curve_name}{IDENTIFIER_SEPARATOR}{index}")
    }

    /// Leitet den Kurvennamen aus einem Punkt-Identifier ab.
    pub fn curve_name_from_identifier(identifier: &str) -> &str {
        identifier
            .split(IDENTIFIER_SEPARATOR)
            .next()
            .unwrap_or(identifier)
    }

    /// Liest die laufende Nummer aus einem Identifier (falls vorhanden).
    pub fn index_from_identifier(identifier: &str) -> Option<u64> {
        identifier
            .rsplit(IDENTIFIER_SEPARATOR)
            .next()
            .and_then(|suffix| suffix.parse::<u64>().ok())
    }

    /// Gibt den Identifier zurueck (eindeutig innerhalb der Kurve).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Gibt die Screen-Position (Pixel) zurueck.
    pub fn pos_screen(&self) -> DVec2 {
        self.pos_screen
    }

    /// Setzt die Screen-Position.
    pub fn set_pos_screen(&mut self, pos_screen: DVec2) {
        self.pos_screen = pos_screen;
    }

    /// Verschiebt die Screen-Position um den gegebenen Offset.
    pub fn move_by(&mut self, delta_screen: DVec2) {
        self.pos_screen += delta_screen;
    }

    /// Gibt die Graph-Position zurueck.
    pub fn pos_graph(&self) -> DVec2 {
        self.pos_graph
    }

    /// Setzt die Graph-Position.
    pub fn set_pos_graph(&mut self, pos_graph: DVec2) {
        self.pos_graph = pos_graph;
    }

    /// Gibt das Ordinal zurueck.
    pub fn ordinal(&self) -> f64 {
        self.ordinal
    }

    /// Setzt das Ordinal.
    pub fn set_ordinal(&mut self, ordinal: f64) {
        self.ordinal = ordinal;
    }
}
