//! XML-Persistenz: Dokument-Parser und -Writer.

pub mod parser;
pub mod writer;

pub use parser::parse_document;
pub use writer::write_document;
