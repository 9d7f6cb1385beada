//! Ein rueckgaengig machbarer Bearbeitungsschritt.

use crate::core::CurveSet;

/// Art des Commands.
///
/// Getaggte Variante statt polymorpher Basisklasse: Redo/Undo wenden
/// immer die Snapshots an, die Art steuert Serialisierung und den
/// Abgleich-Modus nach der Ausfuehrung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Punkte hinzugefuegt (Achsen- oder Kurvenpunkte)
    AddPoints,
    /// Punkte verschoben (Drag)
    MovePoints,
    /// Punkte entfernt
    RemovePoints,
    /// Punktwert bearbeitet (z.B. Achsenwert-Eingabe)
    EditPoint,
    /// Kurven-Einstellungen geaendert (Namen, Stile, Filter)
    CurvesSettings,
}

impl CommandKind {
    /// Serialisierter Name (XML-Attribut `kind`).
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::AddPoints => "addPoints",
            CommandKind::MovePoints => "movePoints",
            CommandKind::RemovePoints => "removePoints",
            CommandKind::EditPoint => "editPoint",
            CommandKind::CurvesSettings => "curvesSettings",
        }
    }

    /// Parst den serialisierten Namen.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "addPoints" => Some(CommandKind::AddPoints),
            "movePoints" => Some(CommandKind::MovePoints),
            "removePoints" => Some(CommandKind::RemovePoints),
            "editPoint" => Some(CommandKind::EditPoint),
            "curvesSettings" => Some(CommandKind::CurvesSettings),
            _ => None,
        }
    }
}

/// Ein Command mit vollstaendigen Vorher/Nachher-Snapshots.
///
/// Beide Snapshots werden bei der Konstruktion komplett erfasst — nie als
/// Diff. Undo/Redo bleiben dadurch symmetrisch und unabhaengig davon, wie
/// sich das Modell zwischenzeitlich veraendert hat.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    kind: CommandKind,
    description: String,
    before: CurveSet,
    after: CurveSet,
}

impl Command {
    /// Erstellt einen Command aus Snapshots.
    pub fn new(
        kind: CommandKind,
        description: impl Into<String>,
        before: CurveSet,
        after: CurveSet,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            before,
            after,
        }
    }

    /// Gibt die Command-Art zurueck.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Gibt die Beschreibung zurueck.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Gibt den Vorher-Snapshot zurueck (Ziel von Undo).
    pub fn before(&self) -> &CurveSet {
        &self.before
    }

    /// Gibt den Nachher-Snapshot zurueck (Ziel von Redo).
    pub fn after(&self) -> &CurveSet {
        &self.after
    }

    /// Ob der erste Redo den Segment-Durchlauf ueberspringen darf: nach
    /// einem Drag hat der Schnellpfad die Segmente bereits nachgezogen.
    pub fn lines_already_updated_on_first_redo(&self) -> bool {
        matches!(self.kind, CommandKind::MovePoints)
    }
}
