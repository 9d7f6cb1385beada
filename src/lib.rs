//! Graph-Digitizer-Kern.
//! Koordinatentransformation, Kurvenmodell, Szenen-Abgleich und Undo/Redo
//! als Library exportiert; die einbettende Anwendung liefert Viewport,
//! Bildverarbeitung und Dialoge.

pub mod app;
pub mod core;
pub mod scene;
pub mod shared;
pub mod transform;
pub mod xml;

pub use app::{
    Command, CommandKind, CommandStack, DigitizerSession, HostHooks, NullHooks,
};
pub use core::{
    AxisScale, ColorFilterMode, ColorFilterSettings, ConnectMode, CoordsModel, Curve, CurveSet,
    CurveStyle, Document, Point, AXIS_CURVE_NAME, DEFAULT_GRAPH_CURVE_NAME,
};
pub use scene::{LinesForCurve, Scene, VisualPoint, VisualSegment};
pub use shared::DigitizerOptions;
pub use transform::{TransformError, Transformation};
pub use xml::{parse_document, write_document};
