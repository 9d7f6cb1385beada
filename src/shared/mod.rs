//! Geteilte Konfiguration des Digitizer-Kerns.

pub mod options;

pub use options::DigitizerOptions;
