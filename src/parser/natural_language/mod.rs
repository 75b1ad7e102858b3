//! Natural language extraction for TextCal
//!
//! Each stage is independently usable and testable. The resolver's handwritten
//! date patterns and the entity recognizer used for title cleanup are separate
//! passes and may disagree on span boundaries; leftover date fragments in a
//! summary are a known limitation.

pub mod date_resolver;
pub mod default_time;
pub mod entities;
pub mod segmenter;
pub mod time_parser;
pub mod title;
