/// TextCal parser module
///
/// Turns free-form text into resolved phrases: segmentation, date/time
/// resolution, entity recognition and title cleanup.
pub mod natural_language;
pub mod traits;
pub mod utils;

pub use natural_language::date_resolver::{
    DateResolver, MatchRule, ResolveContext, ResolveError, Resolution, ResolvedMoment,
};
pub use natural_language::entities::PatternRecognizer;
pub use natural_language::segmenter::Segmenter;
pub use natural_language::title::TitleExtractor;
pub use traits::{DateMatcher, EntityLabel, EntityRecognizer, EntitySpan};

/// Errors raised while building the extraction pipeline
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Invalid {what} pattern: {source}")]
    Pattern {
        what: &'static str,
        #[source]
        source: regex::Error,
    },
}
