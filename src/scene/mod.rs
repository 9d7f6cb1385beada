//! Abgleich der visuellen Ebene mit dem Kurvenmodell.
//!
//! Die Szene haelt Punkte und Segmente in expliziten Entity-Tabellen
//! (Identifier → Entity) und vertraut ihrem eigenen Vorzustand nur so
//! weit, wie der Mehrpass-Abgleich ihn aus dem Modell neu ableiten kann.

pub mod lines_for_curve;
pub mod visual_point;

use std::collections::{HashMap, HashSet};

use glam::DVec2;
use indexmap::IndexMap;

pub use lines_for_curve::{LinesForCurve, VisualSegment};
pub use visual_point::VisualPoint;

use crate::core::{Document, Point};

/// Die visuelle Ebene: Punkte plus Verbindungssegmente.
#[derive(Debug, Default)]
pub struct Scene {
    /// Entity-Tabelle aller visuellen Punkte
    points: HashMap<String, VisualPoint>,
    /// Segment-Container je Kurve, lazy angelegt
    lines: IndexMap<String, LinesForCurve>,
}

impl Scene {
    /// Erstellt eine leere Szene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gleicht die Szene nach einem Command mit dem Modell ab.
    ///
    /// `lines_already_updated` ueberspringt den Segment-Durchlauf: nach
    /// einem Maus-Drag sind die Segmente bereits ueber den Schnellpfad
    /// aktuell, und ein voller Durchlauf wuerde auf veralteten
    /// Modellsegmenten arbeiten.
    pub fn update_after_command(&mut self, document: &Document, lines_already_updated: bool) {
        log::debug!(
            "Szenen-Abgleich: {} Modellpunkte, lines_already_updated={}",
            document.curve_set().num_points(),
            lines_already_updated
        );

        self.update_point_membership(document);
        if !lines_already_updated {
            self.update_line_membership(document);
        }
    }

    /// Durchlauf 1 + 2: Punkte anlegen/aktualisieren, dann verwaiste entfernen.
    fn update_point_membership(&mut self, document: &Document) {
        let mut visited: HashSet<String> = HashSet::with_capacity(self.points.len());

        for curve in document.curve_set().iter_curves() {
            let style = curve.style();
            for point in curve.points() {
                visited.insert(point.identifier().to_string());
                if let Some(visual) = self.points.get_mut(point.identifier()) {
                    visual.set_pos(point.pos_screen());
                    visual.set_style(style.point_radius, style.point_color);
                } else {
                    self.points.insert(
                        point.identifier().to_string(),
                        VisualPoint::new(
                            point.identifier().to_string(),
                            point.pos_screen(),
                            style.point_radius,
                            style.point_color,
                        ),
                    );
                }
            }
        }

        self.points.retain(|identifier, _| visited.contains(identifier));
    }

    /// Durchlauf 3 + 4: Segmente je verbindungsfaehiger Kurve abgleichen,
    /// dann Container verwaister bzw. nicht mehr linienverbundener Kurven
    /// entfernen. Achsenkurve und Relation-Kurven zeichnen keine Segmente.
    fn update_line_membership(&mut self, document: &Document) {
        let mut eligible: HashSet<String> = HashSet::new();

        for curve in document.curve_set().graph_curves() {
            if !curve.style().connect_mode.is_function() || curve.num_points() < 2 {
                continue;
            }
            eligible.insert(curve.name().to_string());

            let ordered: Vec<(&str, DVec2)> = curve
                .points_ordered_by_ordinal()
                .into_iter()
                .map(|p| (p.identifier(), p.pos_screen()))
                .collect();

            let container = self
                .lines
                .entry(curve.name().to_string())
                .or_insert_with(|| LinesForCurve::new(curve.name()));
            container.sync_segments(&ordered, curve.style().line_width);
        }

        self.lines.retain(|name, _| eligible.contains(name));
    }

    /// Drag-Schnellpfad: nur den gezogenen Punkt und seine anliegenden
    /// Segmente nachziehen. Das Modell bleibt absichtlich unberuehrt, bis
    /// der Drag abgeschlossen wird.
    ///
    /// Invariante: Der Punkt muss in der Szene existieren.
    pub fn move_dragged_point(&mut self, identifier: &str, pos: DVec2) {
        let visual = self.points.get_mut(identifier).unwrap_or_else(|| {
            panic!(
                "Invariante verletzt: VisualPoint '{}' fehlt in der Szene",
                identifier.escape_debug()
            )
        });
        visual.set_pos(pos);

        let curve_name = Point::curve_name_from_identifier(identifier);
        if let Some(container) = self.lines.get_mut(curve_name) {
            container.move_segments_with_dragged_point(identifier, pos);
        }
    }

    /// Setzt den Selektionszustand eines Punkts.
    ///
    /// Invariante: Der Punkt muss in der Szene existieren.
    pub fn set_point_selected(&mut self, identifier: &str, selected: bool) {
        let visual = self.points.get_mut(identifier).unwrap_or_else(|| {
            panic!(
                "Invariante verletzt: VisualPoint '{}' fehlt in der Szene",
                identifier.escape_debug()
            )
        });
        visual.set_selected(selected);
    }

    /// Identifier aller selektierten Punkte, sortiert.
    pub fn selected_point_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .points
            .values()
            .filter(|p| p.is_selected())
            .map(|p| p.identifier().to_string())
            .collect();
        ids.sort();
        ids
    }

    /// Identifier aller Punkte mit Positionsaenderung seit dem letzten
    /// Reset, sortiert.
    pub fn changed_point_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .points
            .values()
            .filter(|p| p.has_position_changed())
            .map(|p| p.identifier().to_string())
            .collect();
        ids.sort();
        ids
    }

    /// Setzt alle Positions-Flags zurueck (typisch bei Drag-Beginn).
    pub fn reset_position_changed_flags(&mut self) {
        for visual in self.points.values_mut() {
            visual.reset_position_changed();
        }
    }

    /// Sucht einen visuellen Punkt.
    pub fn point(&self, identifier: &str) -> Option<&VisualPoint> {
        self.points.get(identifier)
    }

    /// Identifier aller visuellen Punkte, sortiert.
    pub fn point_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.points.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Gibt die Anzahl der visuellen Punkte zurueck.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Segment-Paare einer Kurve (leer, wenn kein Container existiert).
    pub fn segment_pairs(&self, curve_name: &str) -> Vec<(String, String)> {
        self.lines
            .get(curve_name)
            .map(LinesForCurve::segment_pairs)
            .unwrap_or_default()
    }

    /// Gibt den Segment-Container einer Kurve zurueck.
    pub fn lines_for_curve(&self, curve_name: &str) -> Option<&LinesForCurve> {
        self.lines.get(curve_name)
    }

    /// Gibt die Gesamtzahl aller Segmente zurueck.
    pub fn num_segments(&self) -> usize {
        self.lines.values().map(LinesForCurve::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConnectMode, Document, DEFAULT_GRAPH_CURVE_NAME};

    /// Dokument mit drei Punkten ausser der x-Reihenfolge:
    /// x=5 (A), x=1 (B), x=3 (C); Ordinale bereits neu berechnet.
    fn document_a_b_c() -> (Document, String, String, String) {
        let mut document = Document::new();
        let curve = document
            .curve_set_mut()
            .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
            .unwrap();
        let a = curve.create_point(DVec2::new(50.0, 0.0), DVec2::new(5.0, 0.0));
        let b = curve.create_point(DVec2::new(10.0, 0.0), DVec2::new(1.0, 0.0));
        let c = curve.create_point(DVec2::new(30.0, 0.0), DVec2::new(3.0, 0.0));
        curve.update_point_ordinals();
        (document, a, b, c)
    }

    #[test]
    fn point_membership_matches_model_exactly() {
        let (document, ..) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);

        let mut expected: Vec<String> = document
            .curve_set()
            .iter_points()
            .map(|(_, p)| p.identifier().to_string())
            .collect();
        expected.sort();
        assert_eq!(scene.point_identifiers(), expected);
    }

    #[test]
    fn segments_follow_ordinal_order_not_insertion_order() {
        let (document, a, b, c) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);

        // Verbunden wird B–C und C–A, niemals B–A direkt
        let pairs = scene.segment_pairs(DEFAULT_GRAPH_CURVE_NAME);
        assert_eq!(pairs, vec![(b.clone(), c.clone()), (c.clone(), a.clone())]);
    }

    #[test]
    fn removing_mid_point_swaps_two_segments_for_one() {
        let (mut document, a, b, c) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);
        assert_eq!(scene.num_segments(), 2);

        {
            let curve = document
                .curve_set_mut()
                .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
                .unwrap();
            curve.remove_point(&c);
            curve.update_point_ordinals();
        }
        scene.update_after_command(&document, false);

        let pairs = scene.segment_pairs(DEFAULT_GRAPH_CURVE_NAME);
        assert_eq!(pairs, vec![(b, a)]);
        assert_eq!(scene.num_points(), 2);
    }

    #[test]
    fn stale_points_are_removed() {
        let (mut document, a, ..) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);
        assert_eq!(scene.num_points(), 3);

        document
            .curve_set_mut()
            .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
            .unwrap()
            .remove_point(&a);
        scene.update_after_command(&document, false);

        assert_eq!(scene.num_points(), 2);
        assert!(scene.point(&a).is_none());
    }

    #[test]
    fn axis_curve_never_gets_segments() {
        let mut document = Document::new();
        let axis = document.curve_set_mut().axis_curve_mut();
        axis.create_point(DVec2::new(0.0, 0.0), DVec2::ZERO);
        axis.create_point(DVec2::new(100.0, 0.0), DVec2::new(10.0, 0.0));

        let mut scene = Scene::new();
        scene.update_after_command(&document, false);

        assert_eq!(scene.num_points(), 2);
        assert_eq!(scene.num_segments(), 0);
    }

    #[test]
    fn relation_curve_gets_no_segments() {
        let (mut document, ..) = document_a_b_c();
        {
            let curve = document
                .curve_set_mut()
                .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
                .unwrap();
            let mut style = curve.style().clone();
            style.connect_mode = ConnectMode::Relation;
            curve.set_style(style);
        }

        let mut scene = Scene::new();
        scene.update_after_command(&document, false);
        assert_eq!(scene.num_segments(), 0);
    }

    #[test]
    fn switching_to_relation_drops_existing_container() {
        let (mut document, ..) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);
        assert_eq!(scene.num_segments(), 2);

        {
            let curve = document
                .curve_set_mut()
                .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
                .unwrap();
            let mut style = curve.style().clone();
            style.connect_mode = ConnectMode::Relation;
            curve.set_style(style);
        }
        scene.update_after_command(&document, false);

        assert_eq!(scene.num_segments(), 0);
        assert!(scene.lines_for_curve(DEFAULT_GRAPH_CURVE_NAME).is_none());
    }

    #[test]
    fn drag_fast_path_updates_point_and_incident_segments() {
        let (document, _a, _b, c) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);
        scene.reset_position_changed_flags();

        scene.move_dragged_point(&c, DVec2::new(35.0, 5.0));

        assert_eq!(scene.point(&c).unwrap().pos(), DVec2::new(35.0, 5.0));
        assert_eq!(scene.changed_point_identifiers(), vec![c.clone()]);

        // Beide anliegenden Segmente folgen dem Punkt
        let container = scene.lines_for_curve(DEFAULT_GRAPH_CURVE_NAME).unwrap();
        for segment in container.segments() {
            if segment.to == c {
                assert_eq!(segment.end, DVec2::new(35.0, 5.0));
            }
            if segment.from == c {
                assert_eq!(segment.start, DVec2::new(35.0, 5.0));
            }
        }
    }

    #[test]
    fn selection_is_a_derived_view() {
        let (document, a, b, _c) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);

        scene.set_point_selected(&a, true);
        scene.set_point_selected(&b, true);
        scene.set_point_selected(&b, false);

        assert_eq!(scene.selected_point_identifiers(), vec![a]);
    }

    #[test]
    fn style_change_reaches_existing_visual_points() {
        let (mut document, a, ..) = document_a_b_c();
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);

        {
            let curve = document
                .curve_set_mut()
                .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
                .unwrap();
            let mut style = curve.style().clone();
            style.point_radius = 9.0;
            curve.set_style(style);
        }
        scene.update_after_command(&document, false);

        assert_eq!(scene.point(&a).unwrap().radius(), 9.0);
    }

    #[test]
    fn empty_scene_after_reconciling_empty_document() {
        let mut document = Document::new();
        {
            let curve = document
                .curve_set_mut()
                .curve_for_name_mut(DEFAULT_GRAPH_CURVE_NAME)
                .unwrap();
            curve.create_point(DVec2::ZERO, DVec2::ZERO);
        }
        let mut scene = Scene::new();
        scene.update_after_command(&document, false);
        assert_eq!(scene.num_points(), 1);

        scene.update_after_command(&Document::new(), false);
        assert_eq!(scene.num_points(), 0);
        assert_eq!(scene.num_segments(), 0);
    }
}
