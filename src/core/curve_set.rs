//! Die Kurvensammlung eines Dokuments: Achsenkurve plus Graph-Kurven.

use indexmap::IndexMap;

use super::{ColorFilterSettings, Curve, CurveStyle, Point};

/// Reservierter Name der Achsenkurve (Kalibrierungspunkte).
pub const AXIS_CURVE_NAME: &str = "Achsen";
/// Name der Standard-Graph-Kurve in einem neuen Dokument.
pub const DEFAULT_GRAPH_CURVE_NAME: &str = "Kurve1";

/// Alle Kurven eines Dokuments.
///
/// Die Achsenkurve traegt die Kalibrierungspunkte und wird nie
/// linienverbunden. Graph-Kurven behalten ihre Einfuegereihenfolge
/// (IndexMap), Kurvennamen sind eindeutig.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    axis: Curve,
    graphs: IndexMap<String, Curve>,
}

impl CurveSet {
    /// Erstellt ein Set mit leerer Achsenkurve und der Standard-Graph-Kurve.
    pub fn new() -> Self {
        let mut graphs = IndexMap::new();
        graphs.insert(
            DEFAULT_GRAPH_CURVE_NAME.to_string(),
            Curve::new(
                DEFAULT_GRAPH_CURVE_NAME,
                ColorFilterSettings::default_filter(),
                CurveStyle::default_graph_curve(),
            ),
        );
        Self {
            axis: Curve::new(
                AXIS_CURVE_NAME,
                ColorFilterSettings::default_filter(),
                CurveStyle::default_axis_curve(),
            ),
            graphs,
        }
    }

    /// Baut ein Set aus geparsten Kurven (XML-Import).
    pub fn from_parts(axis: Curve, graphs: Vec<Curve>) -> Self {
        let mut map = IndexMap::new();
        for curve in graphs {
            map.insert(curve.name().to_string(), curve);
        }
        Self { axis, graphs: map }
    }

    /// Gibt die Achsenkurve zurueck.
    pub fn axis_curve(&self) -> &Curve {
        &self.axis
    }

    /// Gibt die Achsenkurve mutierbar zurueck.
    pub fn axis_curve_mut(&mut self) -> &mut Curve {
        &mut self.axis
    }

    /// Sucht eine Kurve per Name (Achsenkurve eingeschlossen).
    pub fn curve_for_name(&self, name: &str) -> Option<&Curve> {
        if name == AXIS_CURVE_NAME {
            Some(&self.axis)
        } else {
            self.graphs.get(name)
        }
    }

    /// Sucht eine Kurve per Name mutierbar (Achsenkurve eingeschlossen).
    pub fn curve_for_name_mut(&mut self, name: &str) -> Option<&mut Curve> {
        if name == AXIS_CURVE_NAME {
            Some(&mut self.axis)
        } else {
            self.graphs.get_mut(name)
        }
    }

    /// Haengt eine Graph-Kurve ans Ende.
    ///
    /// Invariante: Der Name ist weder vergeben noch der Achsenname.
    pub fn add_graph_curve(&mut self, curve: Curve) {
        let name = curve.name().to_string();
        if name == AXIS_CURVE_NAME || self.graphs.contains_key(&name) {
            panic!("Invariante verletzt: Kurvenname '{name}' bereits vergeben");
        }
        self.graphs.insert(name, curve);
    }

    /// Entfernt eine Graph-Kurve.
    ///
    /// Invariante: Die Kurve muss existieren.
    pub fn remove_graph_curve(&mut self, name: &str) -> Curve {
        // shift_remove erhaelt die Reihenfolge der restlichen Kurven
        self.graphs.shift_remove(name).unwrap_or_else(|| {
            panic!("Invariante verletzt: Kurve '{name}' nicht im Set")
        })
    }

    /// Iteriert ueber alle Graph-Kurven in Einfuegereihenfolge.
    pub fn graph_curves(&self) -> impl Iterator<Item = &Curve> {
        self.graphs.values()
    }

    /// Iteriert mutierbar ueber alle Graph-Kurven.
    pub fn graph_curves_mut(&mut self) -> impl Iterator<Item = &mut Curve> {
        self.graphs.values_mut()
    }

    /// Gibt die Namen aller Graph-Kurven in Einfuegereihenfolge zurueck.
    pub fn graph_curve_names(&self) -> Vec<String> {
        self.graphs.keys().cloned().collect()
    }

    /// Gibt die Anzahl der Graph-Kurven zurueck.
    pub fn num_graph_curves(&self) -> usize {
        self.graphs.len()
    }

    /// Iteriert ueber alle Kurven, Achsenkurve zuerst.
    pub fn iter_curves(&self) -> impl Iterator<Item = &Curve> {
        std::iter::once(&self.axis).chain(self.graphs.values())
    }

    /// Iteriert ueber alle (Kurvenname, Punkt)-Paare, Achsenkurve zuerst.
    ///
    /// Ersetzt die frueher uebliche Callback-Iteration; Abbruch ist Sache
    /// der Aufrufstelle (Iterator einfach fallenlassen).
    pub fn iter_points(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.iter_curves()
            .flat_map(|curve| curve.points().iter().map(move |p| (curve.name(), p)))
    }

    /// Gibt die Gesamtzahl aller Punkte (inkl. Achsenpunkte) zurueck.
    pub fn num_points(&self) -> usize {
        self.iter_curves().map(Curve::num_points).sum()
    }
}

impl Default for CurveSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn new_set_has_axis_and_default_curve() {
        let set = CurveSet::new();
        assert_eq!(set.axis_curve().name(), AXIS_CURVE_NAME);
        assert_eq!(set.num_graph_curves(), 1);
        assert!(set.curve_for_name(DEFAULT_GRAPH_CURVE_NAME).is_some());
    }

    #[test]
    fn curve_for_name_resolves_axis() {
        let set = CurveSet::new();
        assert!(set.curve_for_name(AXIS_CURVE_NAME).is_some());
        assert!(set.curve_for_name("gibt-es-nicht").is_none());
    }

    #[test]
    fn iter_points_covers_all_curves() {
        let mut set = CurveSet::new();
        set.axis_curve_mut()
            .create_point(DVec2::ZERO, DVec2::ZERO);
        set.curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
            .unwrap()
            .create_point(DVec2::new(1.0, 1.0), DVec2::ZERO);

        let pairs: Vec<(&str, &str)> = set
            .iter_points()
            .map(|(curve, point)| (curve, point.identifier()))
            .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, AXIS_CURVE_NAME);
        assert_eq!(pairs[1].0, DEFAULT_GRAPH_CURVE_NAME);
    }

    #[test]
    #[should_panic(expected = "bereits vergeben")]
    fn duplicate_curve_name_panics() {
        let mut set = CurveSet::new();
        set.add_graph_curve(Curve::new(
            DEFAULT_GRAPH_CURVE_NAME,
            ColorFilterSettings::default_filter(),
            CurveStyle::default_graph_curve(),
        ));
    }

    #[test]
    fn remove_graph_curve_keeps_order() {
        let mut set = CurveSet::new();
        for name in ["Kurve2", "Kurve3"] {
            set.add_graph_curve(Curve::new(
                name,
                ColorFilterSettings::default_filter(),
                CurveStyle::default_graph_curve(),
            ));
        }
        set.remove_graph_curve("Kurve2");
        assert_eq!(
            set.graph_curve_names(),
            vec!["Kurve1".to_string(), "Kurve3".to_string()]
        );
    }
}
