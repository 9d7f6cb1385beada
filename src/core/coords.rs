//! Achsen-Skalierung des Zielkoordinatensystems.

use serde::{Deserialize, Serialize};

/// Skalierung einer Achse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisScale {
    /// Lineare Achse
    #[default]
    Linear,
    /// Logarithmische Achse (Basis 10)
    Log,
}

impl AxisScale {
    /// Serialisierter Name (XML-Attribute `scaleX`/`scaleY`).
    pub fn as_str(self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Log => "log",
        }
    }

    /// Parst den serialisierten Namen.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "linear" => Some(AxisScale::Linear),
            "log" => Some(AxisScale::Log),
            _ => None,
        }
    }
}

/// Koordinaten-Einstellungen des Dokuments.
///
/// Bei polaren Diagrammen traegt die x-Komponente der Graph-Position den
/// Winkelwert; eine gesonderte Winkeleinheit kennt der Kern nicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoordsModel {
    /// Skalierung der unabhaengigen Achse
    pub scale_x: AxisScale,
    /// Skalierung der abhaengigen Achse
    pub scale_y: AxisScale,
}

impl CoordsModel {
    /// Linear/linear, der haeufigste Fall.
    pub fn linear() -> Self {
        Self::default()
    }
}
