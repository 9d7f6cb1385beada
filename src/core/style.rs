//! Kurven-Darstellung: Verbindungsmodus, Linien-/Punktattribute, Farbfilter.

use serde::{Deserialize, Serialize};

use crate::shared::options;

/// Verbindungsmodus einer Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectMode {
    /// Funktion, Punkte mit geraden Segmenten verbunden
    #[default]
    FunctionStraight,
    /// Funktion, Punkte mit geglaetteter Linie verbunden
    FunctionSmooth,
    /// Relation, Punkte ohne Verbindungsreihenfolge
    Relation,
}

impl ConnectMode {
    /// Prueft ob der Modus eine Funktion ist (eindeutige x→y-Zuordnung).
    pub fn is_function(self) -> bool {
        matches!(self, ConnectMode::FunctionStraight | ConnectMode::FunctionSmooth)
    }

    /// Serialisierter Name (XML-Attribut `connectAs`).
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectMode::FunctionStraight => "functionStraight",
            ConnectMode::FunctionSmooth => "functionSmooth",
            ConnectMode::Relation => "relation",
        }
    }

    /// Parst den serialisierten Namen.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "functionStraight" => Some(ConnectMode::FunctionStraight),
            "functionSmooth" => Some(ConnectMode::FunctionSmooth),
            "relation" => Some(ConnectMode::Relation),
            _ => None,
        }
    }
}

/// Darstellung einer Kurve (Verbindungsmodus, Linie, Punkte).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveStyle {
    /// Verbindungsmodus der Punkte
    pub connect_mode: ConnectMode,
    /// Linienbreite in Pixeln
    pub line_width: f64,
    /// Punktradius in Pixeln
    pub point_radius: f64,
    /// Punktfarbe (RGBA)
    pub point_color: [f32; 4],
}

impl CurveStyle {
    /// Standard-Stil fuer Graph-Kurven.
    pub fn default_graph_curve() -> Self {
        Self {
            connect_mode: ConnectMode::FunctionStraight,
            line_width: options::LINE_WIDTH_DEFAULT,
            point_radius: options::CURVE_POINT_RADIUS,
            point_color: options::POINT_COLOR_DEFAULT,
        }
    }

    /// Standard-Stil fuer die Achsenkurve (nie linienverbunden).
    pub fn default_axis_curve() -> Self {
        Self {
            connect_mode: ConnectMode::Relation,
            line_width: options::LINE_WIDTH_DEFAULT,
            point_radius: options::AXIS_POINT_RADIUS,
            point_color: options::POINT_COLOR_AXIS,
        }
    }
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self::default_graph_curve()
    }
}

/// Modus des Farbfilters (welcher Bildkanal zur Punkterkennung dient).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorFilterMode {
    /// Intensitaet (Grauwert)
    #[default]
    Intensity,
    /// Abstand zur Hintergrundfarbe
    Foreground,
    /// Farbton
    Hue,
    /// Saettigung
    Saturation,
    /// Hellwert
    Value,
}

impl ColorFilterMode {
    /// Serialisierter Name (XML-Attribut `mode`).
    pub fn as_str(self) -> &'static str {
        match self {
            ColorFilterMode::Intensity => "intensity",
            ColorFilterMode::Foreground => "foreground",
            ColorFilterMode::Hue => "hue",
            ColorFilterMode::Saturation => "saturation",
            ColorFilterMode::Value => "value",
        }
    }

    /// Parst den serialisierten Namen.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "intensity" => Some(ColorFilterMode::Intensity),
            "foreground" => Some(ColorFilterMode::Foreground),
            "hue" => Some(ColorFilterMode::Hue),
            "saturation" => Some(ColorFilterMode::Saturation),
            "value" => Some(ColorFilterMode::Value),
            _ => None,
        }
    }
}

/// Farbfilter-Konfiguration einer Kurve.
///
/// Die Filterung selbst laeuft in der einbettenden Anwendung; der Kern
/// traegt die Einstellungen nur mit der Kurve durch Undo/Redo und XML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFilterSettings {
    /// Gefilterter Kanal
    pub mode: ColorFilterMode,
    /// Untere Grenze in Prozent (0..100)
    pub low: f64,
    /// Obere Grenze in Prozent (0..100)
    pub high: f64,
}

impl ColorFilterSettings {
    /// Standard-Filter (Intensitaet, untere Haelfte).
    pub fn default_filter() -> Self {
        Self {
            mode: ColorFilterMode::Intensity,
            low: 0.0,
            high: 50.0,
        }
    }
}

impl Default for ColorFilterSettings {
    fn default() -> Self {
        Self::default_filter()
    }
}
