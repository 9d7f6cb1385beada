//! Bidirektionale Abbildung zwischen Screen- und Graph-Koordinaten.
//!
//! Die Abbildung wird per Least-Squares ueber die Kalibrierungspunkte
//! gefittet (mehr als drei Punkte verbessern die Robustheit gegen
//! ungenaue Klicks). Logarithmische Achsen werden im log10-Raum gefittet;
//! die Anwendung exponentiert beim Ruecktransformieren.

mod fit;

use glam::{DMat2, DVec2};

use crate::core::{AxisScale, CoordsModel, Point};

// ── Fehlertyp ───────────────────────────────────────────────────────

/// Gemeldete Zustaende der Koordinatentransformation.
///
/// Alles hier ist erwartbar und behandelbar — im Gegensatz zu
/// Invarianten-Verletzungen, die hart abbrechen.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Transformation noch nicht definiert (zu wenige/degenerierte Punkte)
    Undefined,
    /// Zu wenige Kalibrierungspunkte fuer den Fit
    TooFewPoints {
        /// Mindestanzahl
        needed: usize,
        /// Vorhandene Anzahl
        got: usize,
    },
    /// Kalibrierung degeneriert (kollinear, Achsenspanne null)
    DegenerateCalibration(String),
    /// Nicht-positiver Wert auf einer logarithmischen Achse
    NonPositiveLogValue {
        /// Betroffene Achse ('x' oder 'y')
        axis: char,
        /// Der beanstandete Wert
        value: f64,
    },
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => write!(f, "Transformation ist nicht definiert"),
            Self::TooFewPoints { needed, got } => {
                write!(
                    f,
                    "Zu wenige Kalibrierungspunkte: benoetigt {needed}, vorhanden {got}"
                )
            }
            Self::DegenerateCalibration(msg) => {
                write!(f, "Degenerierte Kalibrierung: {msg}")
            }
            Self::NonPositiveLogValue { axis, value } => {
                write!(
                    f,
                    "Wert {value} auf logarithmischer {axis}-Achse ist nicht positiv"
                )
            }
        }
    }
}

impl std::error::Error for TransformError {}

// ── Transformation ──────────────────────────────────────────────────

/// Gefittetes affines Abbildungspaar im Fit-Raum.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AffinePair {
    forward_a: DMat2,
    forward_b: DVec2,
    inverse_a: DMat2,
    inverse_b: DVec2,
}

/// Die Screen↔Graph-Transformation.
///
/// Nach dem Fit unveraenderlich; Klone teilen den Zustand gefahrlos fuer
/// beliebig viele read-only Umrechnungen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transformation {
    fitted: Option<AffinePair>,
    coords: CoordsModel,
}

impl Transformation {
    /// Erstellt eine undefinierte Transformation.
    pub fn undefined() -> Self {
        Self::default()
    }

    /// Fittet die Transformation aus den Achsenpunkten.
    ///
    /// Screen-Position = Klickposition, Graph-Position = vom Benutzer
    /// eingegebener Achsenwert. Degenerierte Eingaben (zu wenige Punkte,
    /// kollinear, Achsenspanne null, nicht-positive Werte auf
    /// logarithmischen Achsen) werden gemeldet; die Transformation bleibt
    /// in dem Fall undefiniert.
    pub fn fit(axis_points: &[Point], coords: CoordsModel) -> Result<Self, TransformError> {
        let screen: Vec<DVec2> = axis_points.iter().map(Point::pos_screen).collect();
        let mut graph: Vec<DVec2> = Vec::with_capacity(axis_points.len());
        for point in axis_points {
            graph.push(to_fit_space(point.pos_graph(), coords)?);
        }

        let (forward_a, forward_b) = fit::fit_affine(&screen, &graph)?;
        let (inverse_a, inverse_b) = fit::invert_affine(forward_a, forward_b)?;

        Ok(Self {
            fitted: Some(AffinePair {
                forward_a,
                forward_b,
                inverse_a,
                inverse_b,
            }),
            coords,
        })
    }

    /// Prueft ob die Transformation definiert ist.
    pub fn is_defined(&self) -> bool {
        self.fitted.is_some()
    }

    /// Gibt die beim Fit verwendeten Koordinaten-Einstellungen zurueck.
    pub fn coords(&self) -> CoordsModel {
        self.coords
    }

    /// Rechnet eine Screen-Position in Graph-Koordinaten um.
    pub fn screen_to_graph(&self, pos_screen: DVec2) -> Result<DVec2, TransformError> {
        let pair = self.fitted.as_ref().ok_or(TransformError::Undefined)?;
        let fit_space = pair.forward_a * pos_screen + pair.forward_b;
        Ok(from_fit_space(fit_space, self.coords))
    }

    /// Rechnet eine Graph-Position in Screen-Koordinaten um.
    ///
    /// Exakte analytische Umkehrung der gefitteten Abbildung; bei
    /// minimaler Kalibrierung gilt der Roundtrip bis auf
    /// Fliesskomma-Toleranz exakt.
    pub fn graph_to_screen(&self, pos_graph: DVec2) -> Result<DVec2, TransformError> {
        let pair = self.fitted.as_ref().ok_or(TransformError::Undefined)?;
        let fit_space = to_fit_space(pos_graph, self.coords)?;
        Ok(pair.inverse_a * fit_space + pair.inverse_b)
    }
}

/// Rechnet eine Graph-Position in den Fit-Raum (log10 auf Log-Achsen).
fn to_fit_space(pos_graph: DVec2, coords: CoordsModel) -> Result<DVec2, TransformError> {
    let x = axis_to_fit_space(pos_graph.x, coords.scale_x, 'x')?;
    let y = axis_to_fit_space(pos_graph.y, coords.scale_y, 'y')?;
    Ok(DVec2::new(x, y))
}

fn axis_to_fit_space(value: f64, scale: AxisScale, axis: char) -> Result<f64, TransformError> {
    match scale {
        AxisScale::Linear => Ok(value),
        AxisScale::Log => {
            if value <= 0.0 {
                Err(TransformError::NonPositiveLogValue { axis, value })
            } else {
                Ok(value.log10())
            }
        }
    }
}

/// Rechnet aus dem Fit-Raum zurueck (Exponentiation auf Log-Achsen).
fn from_fit_space(fit_space: DVec2, coords: CoordsModel) -> DVec2 {
    let x = match coords.scale_x {
        AxisScale::Linear => fit_space.x,
        AxisScale::Log => 10f64.powf(fit_space.x),
    };
    let y = match coords.scale_y {
        AxisScale::Linear => fit_space.y,
        AxisScale::Log => 10f64.powf(fit_space.y),
    };
    DVec2::new(x, y)
}
