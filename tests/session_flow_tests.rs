//! Integrationstests fuer die Session-Flows:
//! - Kalibrierung und Transformation
//! - Digitalisieren mit Ordinal-Neuberechnung und Segment-Abgleich
//! - Drag-Schnellpfad inkl. Abbruch
//! - Undo/Redo mit Wertgleichheit

use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use glam::DVec2;
use graph_digitizer::{
    DigitizerOptions, DigitizerSession, HostHooks, TransformError, DEFAULT_GRAPH_CURVE_NAME,
};

/// Session mit der Minimal-Kalibrierung:
/// screen=(0,0)→graph=(0,0), screen=(100,0)→graph=(10,0), screen=(0,100)→graph=(0,10)
fn calibrated_session() -> DigitizerSession {
    let mut session = DigitizerSession::with_defaults();
    session.add_axis_point(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0));
    session.add_axis_point(DVec2::new(100.0, 0.0), DVec2::new(10.0, 0.0));
    session.add_axis_point(DVec2::new(0.0, 100.0), DVec2::new(0.0, 10.0));
    session
}

/// Kalibrierte Session mit drei Punkten ausser der x-Reihenfolge:
/// x=5 (A), x=1 (B), x=3 (C).
fn session_a_b_c() -> (DigitizerSession, String, String, String) {
    let mut session = calibrated_session();
    let a = session
        .add_curve_point(DEFAULT_GRAPH_CURVE_NAME, DVec2::new(50.0, 0.0))
        .expect("Transformation definiert");
    let b = session
        .add_curve_point(DEFAULT_GRAPH_CURVE_NAME, DVec2::new(10.0, 0.0))
        .expect("Transformation definiert");
    let c = session
        .add_curve_point(DEFAULT_GRAPH_CURVE_NAME, DVec2::new(30.0, 0.0))
        .expect("Transformation definiert");
    (session, a, b, c)
}

// ─── Kalibrierung ────────────────────────────────────────────────────────────

#[test]
fn test_kalibrierung_mit_drei_punkten_definiert_transformation() {
    let session = calibrated_session();
    assert!(session.transform().is_defined());

    let graph = session
        .transform()
        .screen_to_graph(DVec2::new(50.0, 50.0))
        .expect("Transformation definiert");
    assert_relative_eq!(graph.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(graph.y, 5.0, epsilon = 1e-9);
}

#[test]
fn test_vor_kalibrierung_schlaegt_digitalisieren_sauber_fehl() {
    let mut session = DigitizerSession::with_defaults();
    session.add_axis_point(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0));
    session.add_axis_point(DVec2::new(100.0, 0.0), DVec2::new(10.0, 0.0));

    assert!(!session.transform().is_defined());
    let err = session
        .add_curve_point(DEFAULT_GRAPH_CURVE_NAME, DVec2::new(50.0, 50.0))
        .expect_err("ohne Kalibrierung muss das fehlschlagen");
    assert_eq!(err, TransformError::Undefined);

    // Der fehlgeschlagene Versuch darf nichts am Modell aendern
    let curve = session
        .current_curve_set()
        .curve_for_name(DEFAULT_GRAPH_CURVE_NAME)
        .unwrap();
    assert_eq!(curve.num_points(), 0);
}

#[test]
fn test_kollineare_kalibrierung_bleibt_undefiniert() {
    let mut session = DigitizerSession::with_defaults();
    session.add_axis_point(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0));
    session.add_axis_point(DVec2::new(50.0, 50.0), DVec2::new(5.0, 5.0));
    session.add_axis_point(DVec2::new(100.0, 100.0), DVec2::new(10.0, 10.0));

    assert!(!session.transform().is_defined());
}

#[test]
fn test_vierter_achsenpunkt_verbessert_ueberbestimmten_fit() {
    let mut session = calibrated_session();
    session.add_axis_point(DVec2::new(100.0, 100.0), DVec2::new(10.0, 10.0));

    assert!(session.transform().is_defined());
    let graph = session
        .transform()
        .screen_to_graph(DVec2::new(50.0, 50.0))
        .expect("Transformation definiert");
    assert_relative_eq!(graph.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(graph.y, 5.0, epsilon = 1e-9);
}

// ─── Digitalisieren & Segmente ───────────────────────────────────────────────

#[test]
fn test_ordinale_folgen_x_reihenfolge_nicht_einfuegereihenfolge() {
    let (session, a, b, c) = session_a_b_c();
    let curve = session
        .current_curve_set()
        .curve_for_name(DEFAULT_GRAPH_CURVE_NAME)
        .unwrap();

    assert_eq!(curve.point_for_identifier(&b).unwrap().ordinal(), 0.0);
    assert_eq!(curve.point_for_identifier(&c).unwrap().ordinal(), 1.0);
    assert_eq!(curve.point_for_identifier(&a).unwrap().ordinal(), 2.0);
}

#[test]
fn test_segmente_verbinden_nach_ordinal() {
    let (session, a, b, c) = session_a_b_c();

    // B–C und C–A, niemals B–A direkt
    let pairs = session.scene().segment_pairs(DEFAULT_GRAPH_CURVE_NAME);
    assert_eq!(pairs, vec![(b, c.clone()), (c, a)]);
}

#[test]
fn test_punkt_entfernen_ersetzt_zwei_segmente_durch_eines() {
    let (mut session, a, b, c) = session_a_b_c();
    assert_eq!(session.scene().num_segments(), 2);

    session.remove_point(&c);

    let pairs = session.scene().segment_pairs(DEFAULT_GRAPH_CURVE_NAME);
    assert_eq!(
        pairs,
        vec![(b, a)],
        "die beiden Segmente am entfernten Punkt muessen einem neuen weichen"
    );
}

#[test]
fn test_visuals_entsprechen_modell_nach_jedem_abgleich() {
    let (mut session, _a, _b, c) = session_a_b_c();

    let mut expected: Vec<String> = session
        .current_curve_set()
        .iter_points()
        .map(|(_, p)| p.identifier().to_string())
        .collect();
    expected.sort();
    assert_eq!(session.scene().point_identifiers(), expected);

    session.remove_point(&c);

    let mut expected: Vec<String> = session
        .current_curve_set()
        .iter_points()
        .map(|(_, p)| p.identifier().to_string())
        .collect();
    expected.sort();
    assert_eq!(session.scene().point_identifiers(), expected);
}

// ─── Drag-Schnellpfad ────────────────────────────────────────────────────────

#[test]
fn test_drag_laesst_modell_bis_zum_abschluss_stehen() {
    let (mut session, _a, _b, c) = session_a_b_c();

    session.begin_drag(&c);
    session.drag_to(DVec2::new(35.0, 5.0));

    // Szene folgt sofort, Modell bleibt absichtlich veraltet
    assert_eq!(
        session.scene().point(&c).unwrap().pos(),
        DVec2::new(35.0, 5.0)
    );
    let model_pos = session
        .current_curve_set()
        .curve_for_name(DEFAULT_GRAPH_CURVE_NAME)
        .unwrap()
        .position_screen(&c)
        .unwrap();
    assert_eq!(model_pos, DVec2::new(30.0, 0.0), "Modell erst nach end_drag");

    assert!(session.end_drag());

    let model_pos = session
        .current_curve_set()
        .curve_for_name(DEFAULT_GRAPH_CURVE_NAME)
        .unwrap()
        .position_screen(&c)
        .unwrap();
    assert_eq!(model_pos, DVec2::new(35.0, 5.0));
    assert_eq!(session.changed_point_identifiers(), vec![c]);
}

#[test]
fn test_drag_ueber_nachbarn_ordnet_segmente_neu() {
    let (mut session, a, b, c) = session_a_b_c();

    // B (x=1) ueber C (x=3) hinweg auf x=4 ziehen
    session.begin_drag(&b);
    session.drag_to(DVec2::new(40.0, 0.0));
    session.end_drag();

    let curve = session
        .current_curve_set()
        .curve_for_name(DEFAULT_GRAPH_CURVE_NAME)
        .unwrap();
    assert_eq!(curve.point_for_identifier(&c).unwrap().ordinal(), 0.0);
    assert_eq!(curve.point_for_identifier(&b).unwrap().ordinal(), 1.0);
    assert_eq!(curve.point_for_identifier(&a).unwrap().ordinal(), 2.0);

    let pairs = session.scene().segment_pairs(DEFAULT_GRAPH_CURVE_NAME);
    assert_eq!(pairs, vec![(c, b.clone()), (b, a)]);
}

#[test]
fn test_drag_abbruch_verwirft_visuelle_deltas() {
    let (mut session, _a, _b, c) = session_a_b_c();
    let undo_possible_before = session.can_undo();

    session.begin_drag(&c);
    session.drag_to(DVec2::new(99.0, 99.0));
    session.cancel_drag();

    // Szene wieder auf Modellstand, kein Command entstanden
    assert_eq!(
        session.scene().point(&c).unwrap().pos(),
        DVec2::new(30.0, 0.0)
    );
    assert_eq!(session.can_undo(), undo_possible_before);
    let model_pos = session
        .current_curve_set()
        .curve_for_name(DEFAULT_GRAPH_CURVE_NAME)
        .unwrap()
        .position_screen(&c)
        .unwrap();
    assert_eq!(model_pos, DVec2::new(30.0, 0.0));
}

#[test]
fn test_achsenpunkt_drag_refittet_transformation() {
    let mut session = calibrated_session();
    let axis_ids: Vec<String> = session
        .current_curve_set()
        .axis_curve()
        .points()
        .iter()
        .map(|p| p.identifier().to_string())
        .collect();

    // Den screen=(100,0)-Punkt auf screen=(200,0) ziehen: die x-Achse
    // streckt sich, screen=(100,0) liegt danach bei graph=(5,0)
    session.begin_drag(&axis_ids[1]);
    session.drag_to(DVec2::new(200.0, 0.0));
    session.end_drag();

    let graph = session
        .transform()
        .screen_to_graph(DVec2::new(100.0, 0.0))
        .expect("Transformation definiert");
    assert_relative_eq!(graph.x, 5.0, epsilon = 1e-9);
}

// ─── Undo/Redo ───────────────────────────────────────────────────────────────

#[test]
fn test_undo_redo_stellt_wertgleichen_zustand_her() {
    let (mut session, _a, _b, c) = session_a_b_c();

    let set_before = session.current_curve_set().clone();
    session.remove_point(&c);
    let set_after = session.current_curve_set().clone();
    assert_ne!(set_before, set_after);

    assert!(session.undo());
    assert_eq!(*session.current_curve_set(), set_before);

    assert!(session.redo());
    assert_eq!(*session.current_curve_set(), set_after);
}

#[test]
fn test_undo_redo_folge_ohne_netto_mutation() {
    let (mut session, ..) = session_a_b_c();
    let set_initial = session.current_curve_set().clone();

    // Beliebige Folge ohne Netto-Effekt: 2x undo, 2x redo
    assert!(session.undo());
    assert!(session.undo());
    assert!(session.redo());
    assert!(session.redo());

    assert_eq!(*session.current_curve_set(), set_initial);
}

#[test]
fn test_neuer_command_nach_undo_verwirft_redo() {
    let (mut session, _a, b, _c) = session_a_b_c();

    session.undo();
    assert!(session.can_redo());

    session.remove_point(&b);
    assert!(!session.can_redo(), "linearer Undo-Stack ohne Verzweigung");
}

#[test]
fn test_undo_ueber_kalibrierung_hinweg_macht_transformation_undefiniert() {
    let mut session = calibrated_session();
    assert!(session.transform().is_defined());

    session.undo();
    assert!(
        !session.transform().is_defined(),
        "mit zwei Achsenpunkten darf keine Transformation stehen"
    );

    session.redo();
    assert!(session.transform().is_defined());
}

// ─── Hooks & Selektion ───────────────────────────────────────────────────────

struct CountingHooks {
    reconciled: Rc<Cell<usize>>,
}

impl HostHooks for CountingHooks {
    fn visuals_reconciled(&mut self) {
        self.reconciled.set(self.reconciled.get() + 1);
    }
}

#[test]
fn test_hook_feuert_nach_jedem_abgleich() {
    let reconciled = Rc::new(Cell::new(0));
    let hooks = CountingHooks {
        reconciled: Rc::clone(&reconciled),
    };
    let mut session = DigitizerSession::new(DigitizerOptions::default(), Box::new(hooks));

    session.add_axis_point(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0));
    assert_eq!(reconciled.get(), 1);

    session.undo();
    assert_eq!(reconciled.get(), 2);

    session.reconcile_visuals(false);
    assert_eq!(reconciled.get(), 3);
}

#[test]
fn test_selektion_ist_abgeleitete_sicht() {
    let (mut session, a, b, _c) = session_a_b_c();

    session.set_point_selected(&a, true);
    session.set_point_selected(&b, true);
    session.set_point_selected(&a, false);

    assert_eq!(session.selected_point_identifiers(), vec![b]);
}
