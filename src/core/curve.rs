//! Eine benannte Kurve mit ordinal-geordneten Punkten.

use glam::DVec2;

use super::{ColorFilterSettings, CurveStyle, Point};
use crate::transform::Transformation;

/// Eine Kurve des Dokuments.
///
/// Die Punkte liegen in Einfuegereihenfolge im Vektor; die
/// Verbindungsreihenfolge ergibt sich ausschliesslich aus den Ordinalen
/// (`points_ordered_by_ordinal`). Identifier werden ausschliesslich vom
/// Kern vergeben; Mutationen mit unbekanntem Identifier sind daher
/// Programmierfehler und brechen hart ab.
#[derive(Debug, Clone)]
pub struct Curve {
    name: String,
    points: Vec<Point>,
    style: CurveStyle,
    filter: ColorFilterSettings,
    /// Naechste laufende Nummer fuer die Identifier-Vergabe
    next_point_index: u64,
}

/// Wertgleichheit ueber den persistierten Zustand; der transiente
/// Identifier-Zaehler zaehlt nicht mit (er wird beim Import aus den
/// gelesenen Identifiern rekonstruiert).
impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.points == other.points
            && self.style == other.style
            && self.filter == other.filter
    }
}

impl Curve {
    /// Erstellt eine leere Kurve.
    pub fn new(name: impl Into<String>, filter: ColorFilterSettings, style: CurveStyle) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
            style,
            filter,
            next_point_index: 0,
        }
    }

    /// Baut eine Kurve aus geparsten Punkten (XML-Import).
    ///
    /// Der Identifier-Zaehler wird hinter die hoechste gelesene laufende
    /// Nummer gesetzt, damit neue Punkte keine Identifier wiederverwenden.
    pub fn from_parts(
        name: String,
        filter: ColorFilterSettings,
        style: CurveStyle,
        points: Vec<Point>,
    ) -> Self {
        let next_point_index = points
            .iter()
            .filter_map(|p| Point::index_from_identifier(p.identifier()))
            .max()
            .map_or(0, |max| max + 1);
        Self {
            name,
            points,
            style,
            filter,
            next_point_index,
        }
    }

    /// Gibt den Kurvennamen zurueck.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Benennt die Kurve um. Bestehende Punkt-Identifier bleiben erhalten.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Gibt den Kurven-Stil zurueck.
    pub fn style(&self) -> &CurveStyle {
        &self.style
    }

    /// Setzt den Kurven-Stil.
    pub fn set_style(&mut self, style: CurveStyle) {
        self.style = style;
    }

    /// Gibt die Farbfilter-Einstellungen zurueck.
    pub fn filter(&self) -> &ColorFilterSettings {
        &self.filter
    }

    /// Setzt die Farbfilter-Einstellungen.
    pub fn set_filter(&mut self, filter: ColorFilterSettings) {
        self.filter = filter;
    }

    /// Gibt alle Punkte in Einfuegereihenfolge zurueck.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Gibt die Anzahl der Punkte zurueck.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Erstellt einen neuen Punkt und gibt dessen Identifier zurueck.
    ///
    /// Das Ordinal wird hinter das bisherige Maximum gesetzt; bei
    /// Funktionskurven ordnet der naechste `update_point_ordinals`-Lauf ein.
    pub fn create_point(&mut self, pos_screen: DVec2, pos_graph: DVec2) -> String {
        let identifier = Point::make_identifier(&self.name, self.next_point_index);
        self.next_point_index += 1;
        let ordinal = self.max_ordinal().map_or(0.0, |max| max + 1.0);
        self.points
            .push(Point::new(identifier.clone(), pos_screen, pos_graph, ordinal));
        identifier
    }

    /// Haengt einen fertigen Punkt an (XML-Import, Kopieren zwischen Sets).
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Sucht einen Punkt per Identifier.
    pub fn point_for_identifier(&self, identifier: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.identifier() == identifier)
    }

    /// Gibt die Screen-Position eines Punkts zurueck.
    pub fn position_screen(&self, identifier: &str) -> Option<DVec2> {
        self.point_for_identifier(identifier).map(Point::pos_screen)
    }

    /// Gibt die Graph-Position eines Punkts zurueck.
    pub fn position_graph(&self, identifier: &str) -> Option<DVec2> {
        self.point_for_identifier(identifier).map(Point::pos_graph)
    }

    /// Setzt die Graph-Position eines Punkts (z.B. Achsenwert-Eingabe).
    ///
    /// Invariante: Der Identifier muss existieren.
    pub fn edit_point_graph(&mut self, identifier: &str, pos_graph: DVec2) {
        self.point_for_identifier_mut(identifier)
            .set_pos_graph(pos_graph);
    }

    /// Setzt die Screen-Position eines Punkts.
    ///
    /// Invariante: Der Identifier muss existieren.
    pub fn set_point_screen(&mut self, identifier: &str, pos_screen: DVec2) {
        self.point_for_identifier_mut(identifier)
            .set_pos_screen(pos_screen);
    }

    /// Verschiebt einen Punkt um den gegebenen Screen-Offset.
    ///
    /// Invariante: Der Identifier muss existieren.
    pub fn move_point(&mut self, identifier: &str, delta_screen: DVec2) {
        self.point_for_identifier_mut(identifier).move_by(delta_screen);
    }

    /// Entfernt einen Punkt.
    ///
    /// Invariante: Der Identifier muss existieren.
    pub fn remove_point(&mut self, identifier: &str) {
        let index = self
            .points
            .iter()
            .position(|p| p.identifier() == identifier)
            .unwrap_or_else(|| {
                panic!(
                    "Invariante verletzt: Punkt '{}' nicht in Kurve '{}'",
                    identifier.escape_debug(),
                    self.name
                )
            });
        self.points.remove(index);
    }

    /// Gibt die Punkte aufsteigend nach Ordinal sortiert zurueck.
    ///
    /// Expliziter Sortierschritt; es gibt keine implizit geordnete
    /// Containerstruktur, auf deren Iterationsreihenfolge man sich
    /// verlassen koennte.
    pub fn points_ordered_by_ordinal(&self) -> Vec<&Point> {
        let mut ordered: Vec<&Point> = self.points.iter().collect();
        ordered.sort_by(|a, b| {
            a.ordinal()
                .partial_cmp(&b.ordinal())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ordered
    }

    /// Gibt das groesste Ordinal zurueck (None bei leerer Kurve).
    pub fn max_ordinal(&self) -> Option<f64> {
        self.points
            .iter()
            .map(Point::ordinal)
            .fold(None, |acc, o| Some(acc.map_or(o, |m: f64| m.max(o))))
    }

    /// Berechnet die Ordinale aus den Graph-x-Koordinaten neu.
    ///
    /// Nur fuer Funktionskurven: Punkte werden aufsteigend nach der
    /// unabhaengigen Koordinate sortiert und erhalten Ordinale 0..n-1.
    /// Der Sort ist stabil, Punkte mit gleicher x-Koordinate behalten
    /// ihre bisherige relative Reihenfolge. Zweifacher Aufruf ohne
    /// zwischenzeitliche Mutation liefert identische Ordinale.
    pub fn update_point_ordinals(&mut self) {
        if !self.style.connect_mode.is_function() {
            return;
        }

        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| {
            self.points[a]
                .pos_graph()
                .x
                .partial_cmp(&self.points[b].pos_graph().x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (ordinal, index) in order.into_iter().enumerate() {
            self.points[index].set_ordinal(ordinal as f64);
        }
    }

    /// Leitet die Graph-Positionen aller Punkte aus den Screen-Positionen ab.
    ///
    /// Invariante: Die Transformation muss definiert sein.
    pub fn apply_transform(&mut self, transform: &Transformation) {
        for point in &mut self.points {
            let pos_graph = transform
                .screen_to_graph(point.pos_screen())
                .unwrap_or_else(|err| {
                    panic!(
                        "Invariante verletzt: Transformation nicht anwendbar auf Kurve '{}': {err}",
                        self.name
                    )
                });
            point.set_pos_graph(pos_graph);
        }
    }

    fn point_for_identifier_mut(&mut self, identifier: &str) -> &mut Point {
        let name = self.name.clone();
        self.points
            .iter_mut()
            .find(|p| p.identifier() == identifier)
            .unwrap_or_else(|| {
                panic!(
                    "Invariante verletzt: Punkt '{}' nicht in Kurve '{}'",
                    identifier.escape_debug(),
                    name
                )
            })
    }
}
