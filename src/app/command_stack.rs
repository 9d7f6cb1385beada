//! Linearer Undo/Redo-Stack fuer Commands.

use super::Command;

/// Undo/Redo-Verwaltung mit begrenzter Tiefe.
///
/// Ein neuer Command nach einem Undo verwirft die Redo-Historie
/// (linearer Stack); Commands werden nie zusammengefasst.
#[derive(Default)]
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl CommandStack {
    /// Erstellt einen Stack mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Nimmt einen ausgefuehrten Command auf und verwirft die Redo-Historie.
    pub fn push(&mut self, command: Command) {
        if self.max_depth > 0 && self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Prueft ob Undo moeglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prueft ob Redo moeglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Holt den naechsten Undo-Command; er wandert auf den Redo-Stack.
    pub fn pop_undo(&mut self) -> Option<&Command> {
        let command = self.undo_stack.pop()?;
        self.redo_stack.push(command);
        self.redo_stack.last()
    }

    /// Holt den naechsten Redo-Command; er wandert zurueck auf den Undo-Stack.
    pub fn pop_redo(&mut self) -> Option<&Command> {
        let command = self.redo_stack.pop()?;
        self.undo_stack.push(command);
        self.undo_stack.last()
    }

    /// Alle aktuell ausgefuehrten Commands in Ausfuehrungsreihenfolge
    /// (Grundlage des Kommando-Logs).
    pub fn executed_commands(&self) -> &[Command] {
        &self.undo_stack
    }

    /// Gibt die Anzahl der ausgefuehrten Commands zurueck.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Gibt `true` zurueck, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Verwirft beide Stacks (z.B. nach dem Laden eines Dokuments).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
