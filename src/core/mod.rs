//! Core-Domaenentypen: Punkte, Kurven, Kurvensammlung, Dokument.

pub mod coords;
pub mod curve;
pub mod curve_set;
pub mod document;
pub mod point;
pub mod style;

pub use coords::{AxisScale, CoordsModel};
pub use curve::Curve;
pub use curve_set::{CurveSet, AXIS_CURVE_NAME, DEFAULT_GRAPH_CURVE_NAME};
pub use document::Document;
pub use point::{Point, IDENTIFIER_SEPARATOR};
pub use style::{ColorFilterMode, ColorFilterSettings, ConnectMode, CurveStyle};
