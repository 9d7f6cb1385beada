//! Rueckmeldekanal des Kerns an die einbettende Anwendung.
//!
//! Statt eines globalen Host-Zeigers bekommt die Session bei der
//! Konstruktion ein Hook-Objekt; der Host haengt daran Statusanzeige,
//! Kurvenlisten-Refresh und Fehlerberichte auf.

/// Callbacks, die der Host der Session mitgibt.
pub trait HostHooks {
    /// Nach jedem Abgleich der visuellen Ebene aufgerufen, damit
    /// abhaengige Ansichten (Statusleiste, Kurvenlisten) nachziehen.
    fn visuals_reconciled(&mut self) {}

    /// Unmittelbar vor einem fail-fast Abbruch mit der Fehlermeldung
    /// aufgerufen (z.B. um einen Fehlerbericht zu schreiben).
    fn invariant_failure(&mut self, message: &str) {
        let _ = message;
    }
}

/// Hook-Objekt ohne Verhalten (Tests, Replay-CLI).
#[derive(Debug, Default)]
pub struct NullHooks;

impl HostHooks for NullHooks {}
