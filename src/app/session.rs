//! Die Session: Fassade ueber Dokument, Transformation, Szene und Historie.
//!
//! Der Host uebersetzt rohe Viewport-Ereignisse in die hiesigen
//! Operationen (Punkt hinzufuegen/ziehen/entfernen) und bekommt nach jedem
//! Szenen-Abgleich den `visuals_reconciled`-Hook, um abhaengige Ansichten
//! nachzuziehen. Alles laeuft auf dem Event-Thread des Hosts; der Kern
//! blockiert nie und kennt keine eigene Nebenlaeufigkeit.

use anyhow::{Context, Result};
use glam::DVec2;

use super::{command_log, Command, CommandKind, CommandStack, HostHooks, NullHooks};
use crate::core::{CoordsModel, CurveSet, Document, Point, AXIS_CURVE_NAME};
use crate::scene::Scene;
use crate::shared::DigitizerOptions;
use crate::transform::{TransformError, Transformation};
use crate::xml;

/// Zustand eines laufenden Drags (Schnellpfad).
struct DragState {
    identifier: String,
}

/// Eine Digitalisier-Session.
pub struct DigitizerSession {
    document: Document,
    transform: Transformation,
    scene: Scene,
    history: CommandStack,
    hooks: Box<dyn HostHooks>,
    options: DigitizerOptions,
    drag: Option<DragState>,
}

impl DigitizerSession {
    /// Erstellt eine Session mit leerem Dokument.
    pub fn new(options: DigitizerOptions, hooks: Box<dyn HostHooks>) -> Self {
        Self {
            document: Document::new(),
            transform: Transformation::undefined(),
            scene: Scene::new(),
            history: CommandStack::new_with_capacity(options.max_undo_depth),
            hooks,
            options,
            drag: None,
        }
    }

    /// Session mit Default-Optionen und stummen Hooks (Tests, Replay-CLI).
    pub fn with_defaults() -> Self {
        Self::new(DigitizerOptions::default(), Box::new(NullHooks))
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    /// Gibt das Dokument zurueck.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Gibt die aktuelle Kurvensammlung zurueck.
    pub fn current_curve_set(&self) -> &CurveSet {
        self.document.curve_set()
    }

    /// Gibt die aktuelle Transformation zurueck (read-only teilbar).
    pub fn transform(&self) -> &Transformation {
        &self.transform
    }

    /// Gibt die visuelle Ebene zurueck.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Gibt die Laufzeit-Optionen zurueck.
    pub fn options(&self) -> &DigitizerOptions {
        &self.options
    }

    /// Prueft ob Undo moeglich ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Prueft ob Redo moeglich ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Identifier aller selektierten Punkte.
    pub fn selected_point_identifiers(&self) -> Vec<String> {
        self.scene.selected_point_identifiers()
    }

    /// Identifier aller seit dem letzten Reset bewegten Punkte.
    pub fn changed_point_identifiers(&self) -> Vec<String> {
        self.scene.changed_point_identifiers()
    }

    /// Setzt den Selektionszustand eines Punkts.
    pub fn set_point_selected(&mut self, identifier: &str, selected: bool) {
        self.scene.set_point_selected(identifier, selected);
    }

    // ── Modell-Operationen ──────────────────────────────────────────

    /// Ersetzt die Kurvensammlung ohne Command (z.B. Import durch den Host).
    pub fn apply_curve_set(&mut self, set: CurveSet) {
        self.document.apply_curve_set(set);
        self.after_model_change(false);
    }

    /// Setzt die Achsen-Skalierung und fittet die Transformation neu.
    pub fn set_coords(&mut self, coords: CoordsModel) {
        self.document.set_coords(coords);
        self.after_model_change(false);
    }

    /// Gleicht die visuelle Ebene mit dem Modell ab.
    pub fn reconcile_visuals(&mut self, lines_already_updated: bool) {
        self.scene
            .update_after_command(&self.document, lines_already_updated);
        self.hooks.visuals_reconciled();
    }

    /// Fuehrt einen vom Host gebauten Command aus (z.B. Settings-Dialog:
    /// Vorher-Snapshot plus von der UI zusammengestellter Nachher-Zustand).
    pub fn push_command(
        &mut self,
        kind: CommandKind,
        description: impl Into<String>,
        before: CurveSet,
        after: CurveSet,
    ) {
        self.execute_command(Command::new(kind, description.into(), before, after));
    }

    /// Fuegt einen Kalibrierungspunkt hinzu (Klickposition + eingegebener
    /// Achsenwert) und gibt dessen Identifier zurueck.
    pub fn add_axis_point(&mut self, pos_screen: DVec2, graph_value: DVec2) -> String {
        let before = self.document.curve_set().clone();
        let mut after = before.clone();
        let identifier = after.axis_curve_mut().create_point(pos_screen, graph_value);

        self.execute_command(Command::new(
            CommandKind::AddPoints,
            "Achsenpunkt hinzufuegen",
            before,
            after,
        ));
        identifier
    }

    /// Fuegt einen Kurvenpunkt an der Klickposition hinzu.
    ///
    /// Schlaegt mit `Undefined` fehl, solange die Kalibrierung nicht
    /// steht: ohne Transformation gibt es keine Graph-Position und kein
    /// Ordinal.
    pub fn add_curve_point(
        &mut self,
        curve_name: &str,
        pos_screen: DVec2,
    ) -> Result<String, TransformError> {
        let pos_graph = self.transform.screen_to_graph(pos_screen)?;

        let before = self.document.curve_set().clone();
        let mut after = before.clone();
        let Some(curve) = after.curve_for_name_mut(curve_name) else {
            self.invariant(&format!("Kurve '{curve_name}' nicht im Set"));
        };
        let identifier = curve.create_point(pos_screen, pos_graph);
        curve.update_point_ordinals();

        self.execute_command(Command::new(
            CommandKind::AddPoints,
            "Punkt hinzufuegen",
            before,
            after,
        ));
        Ok(identifier)
    }

    /// Setzt den Achsenwert eines Kalibrierungspunkts neu.
    pub fn edit_axis_point_value(&mut self, identifier: &str, graph_value: DVec2) {
        let before = self.document.curve_set().clone();
        let mut after = before.clone();
        after.axis_curve_mut().edit_point_graph(identifier, graph_value);

        self.execute_command(Command::new(
            CommandKind::EditPoint,
            "Achsenwert bearbeiten",
            before,
            after,
        ));
    }

    /// Entfernt einen Punkt (Achsen- oder Kurvenpunkt).
    pub fn remove_point(&mut self, identifier: &str) {
        let curve_name = Point::curve_name_from_identifier(identifier).to_string();

        let before = self.document.curve_set().clone();
        let mut after = before.clone();
        let Some(curve) = after.curve_for_name_mut(&curve_name) else {
            self.invariant(&format!("Kurve '{curve_name}' nicht im Set"));
        };
        curve.remove_point(identifier);
        curve.update_point_ordinals();

        self.execute_command(Command::new(
            CommandKind::RemovePoints,
            "Punkt entfernen",
            before,
            after,
        ));
    }

    // ── Drag-Protokoll ──────────────────────────────────────────────

    /// Beginnt einen Drag. Bis `end_drag` laufen alle Bewegungen ueber den
    /// Schnellpfad der Szene; das Modell bleibt unberuehrt.
    pub fn begin_drag(&mut self, identifier: &str) {
        if self.scene.point(identifier).is_none() {
            self.invariant(&format!("Drag auf unbekanntem Punkt '{identifier}'"));
        }
        self.scene.reset_position_changed_flags();
        self.drag = Some(DragState {
            identifier: identifier.to_string(),
        });
    }

    /// Bewegt den gezogenen Punkt (Schnellpfad).
    pub fn drag_to(&mut self, pos_screen: DVec2) {
        let Some(drag) = &self.drag else {
            log::warn!("drag_to ohne aktiven Drag ignoriert");
            return;
        };
        let identifier = drag.identifier.clone();
        self.scene.move_dragged_point(&identifier, pos_screen);
    }

    /// Schliesst den Drag ab: Graph-Position und Ordinale werden einmalig
    /// abgeleitet, dann haelt ein Command die Aenderung fest. Der
    /// Segment-Durchlauf entfaellt, wenn der Schnellpfad die Linien schon
    /// konsistent hinterlassen hat.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            log::warn!("end_drag ohne aktiven Drag ignoriert");
            return false;
        };
        let visual_pos = self.scene.point(&drag.identifier).map(|v| v.pos());
        let Some(pos_screen) = visual_pos else {
            self.invariant(&format!(
                "Gezogener Punkt '{}' fehlt in der Szene",
                drag.identifier
            ));
        };
        let curve_name = Point::curve_name_from_identifier(&drag.identifier).to_string();
        let is_axis = curve_name == AXIS_CURVE_NAME;

        let before = self.document.curve_set().clone();
        let mut after = before.clone();
        let Some(curve) = after.curve_for_name_mut(&curve_name) else {
            self.invariant(&format!("Kurve '{curve_name}' nicht im Set"));
        };
        curve.set_point_screen(&drag.identifier, pos_screen);
        if !is_axis && self.transform.is_defined() {
            let pos_graph = self
                .transform
                .screen_to_graph(pos_screen)
                .unwrap_or_else(|err| {
                    panic!("Invariante verletzt: Transformation nicht anwendbar: {err}")
                });
            curve.edit_point_graph(&drag.identifier, pos_graph);
            curve.update_point_ordinals();
        }

        // Linien gelten nur dann als aktuell, wenn weder die Kalibrierung
        // noch die Verbindungsreihenfolge vom Drag betroffen ist.
        let lines_already_updated =
            !is_axis && ordinals_for_curve(&before, &curve_name) == ordinals_for_curve(&after, &curve_name);

        self.execute_command_with(
            Command::new(CommandKind::MovePoints, "Punkt verschieben", before, after),
            lines_already_updated,
        );
        true
    }

    /// Bricht einen laufenden Drag ab (z.B. Escape): Die Schnellpfad-Deltas
    /// werden verworfen, das unveraenderte Modell stellt die Szene wieder her.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            self.reconcile_visuals(false);
        }
    }

    // ── Undo/Redo ───────────────────────────────────────────────────

    /// Macht den letzten Command rueckgaengig.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.history.pop_undo() else {
            return false;
        };
        let before = command.before().clone();
        log::info!("Undo: {}", command.description());

        self.document.apply_curve_set(before);
        self.after_model_change(false);
        true
    }

    /// Wiederholt den zuletzt rueckgaengig gemachten Command.
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.history.pop_redo() else {
            return false;
        };
        let after = command.after().clone();
        log::info!("Redo: {}", command.description());

        self.document.apply_curve_set(after);
        self.after_model_change(false);
        true
    }

    // ── Persistenz ──────────────────────────────────────────────────

    /// Laedt ein Dokument aus XML. Schlaegt das Parsen fehl, bleibt der
    /// bisherige Zustand vollstaendig erhalten.
    pub fn load_document(&mut self, xml_content: &str) -> Result<()> {
        let document = xml::parse_document(xml_content)
            .context("Dokument konnte nicht geladen werden")?;

        self.document = document;
        self.history.clear();
        self.drag = None;
        self.after_model_change(false);

        log::info!(
            "Dokument geladen: {} Kurven, {} Punkte",
            self.document.curve_set().num_graph_curves(),
            self.document.curve_set().num_points()
        );
        Ok(())
    }

    /// Serialisiert das Dokument als XML.
    pub fn save_document(&self) -> String {
        xml::write_document(&self.document)
    }

    /// Serialisiert die ausgefuehrten Commands als Kommando-Log.
    pub fn serialize_command_log(&self) -> String {
        command_log::write_command_log(self.history.executed_commands())
    }

    /// Spielt ein Kommando-Log ab und gibt die Anzahl der Commands zurueck.
    ///
    /// Gegen ein frisches Dokument abgespielt entsteht exakt der Zustand,
    /// den die aufgezeichnete Session am Ende hatte (Diagnose-Replay).
    pub fn replay_command_log(&mut self, xml_content: &str) -> Result<usize> {
        let commands = command_log::parse_command_log(xml_content)
            .context("Kommando-Log konnte nicht gelesen werden")?;

        let count = commands.len();
        for command in commands {
            self.execute_command(command);
        }
        log::info!("Kommando-Log abgespielt: {count} Commands");
        Ok(count)
    }

    // ── Intern ──────────────────────────────────────────────────────

    /// Fuehrt einen Command aus; der Abgleich-Modus folgt der Command-Art.
    fn execute_command(&mut self, command: Command) {
        let lines_already_updated = command.lines_already_updated_on_first_redo();
        self.execute_command_with(command, lines_already_updated);
    }

    fn execute_command_with(&mut self, command: Command, lines_already_updated: bool) {
        log::info!("Command: {}", command.description());
        self.document.apply_curve_set(command.after().clone());
        self.history.push(command);
        self.after_model_change(lines_already_updated);
    }

    /// Gemeinsamer Abschluss aller Modell-Mutationen: Transformation neu
    /// fitten, Graph-Zustand ableiten, Szene abgleichen, Host informieren.
    fn after_model_change(&mut self, lines_already_updated: bool) {
        self.refit_transform();
        self.derive_graph_state();
        self.scene
            .update_after_command(&self.document, lines_already_updated);
        self.hooks.visuals_reconciled();
    }

    /// Fittet die Transformation aus den aktuellen Achsenpunkten. Bei
    /// degenerierter Kalibrierung bleibt sie undefiniert statt eine
    /// unsinnige Abbildung zu liefern.
    fn refit_transform(&mut self) {
        let result = Transformation::fit(
            self.document.calibration_points(),
            self.document.coords(),
        );
        self.transform = match result {
            Ok(transform) => transform,
            Err(TransformError::TooFewPoints { .. }) => {
                // Normalfall waehrend der Kalibrierung, kein Log noetig
                Transformation::undefined()
            }
            Err(err) => {
                log::warn!("Kalibrierung nicht verwendbar: {err}");
                Transformation::undefined()
            }
        };
    }

    /// Leitet Graph-Positionen und Ordinale aller Graph-Kurven neu ab.
    /// Idempotent; ohne definierte Transformation passiert nichts.
    fn derive_graph_state(&mut self) {
        if !self.transform.is_defined() {
            return;
        }
        let transform = self.transform.clone();
        for curve in self.document.curve_set_mut().graph_curves_mut() {
            curve.apply_transform(&transform);
            curve.update_point_ordinals();
        }
    }

    /// Meldet eine Invarianten-Verletzung an den Host und bricht hart ab.
    fn invariant(&mut self, message: &str) -> ! {
        self.hooks.invariant_failure(message);
        panic!("Invariante verletzt: {message}");
    }
}

/// (Identifier, Ordinal)-Folge einer Kurve in Punktreihenfolge.
fn ordinals_for_curve(set: &CurveSet, curve_name: &str) -> Vec<(String, f64)> {
    set.curve_for_name(curve_name)
        .map(|curve| {
            curve
                .points()
                .iter()
                .map(|p| (p.identifier().to_string(), p.ordinal()))
                .collect()
        })
        .unwrap_or_default()
}
