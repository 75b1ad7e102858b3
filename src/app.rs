use crate::calendar::{
    write_calendar, AssemblerOptions, CalendarError, EventAssembler, SkippedPhrase,
};
use crate::config::Config;
use crate::parser::{DateResolver, ExtractionError, PatternRecognizer, Segmenter, TitleExtractor};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// The extraction stages, built once and shared read-only for the whole run
pub struct Pipeline {
    segmenter: Segmenter,
    resolver: DateResolver,
    titles: TitleExtractor,
}

impl Pipeline {
    pub fn new() -> Result<Self, ExtractionError> {
        let recognizer = Arc::new(PatternRecognizer::new()?);
        Ok(Self {
            segmenter: Segmenter::new()?,
            resolver: DateResolver::new()?,
            titles: TitleExtractor::new(recognizer)?,
        })
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn assembler(&self, options: AssemblerOptions) -> EventAssembler<'_> {
        EventAssembler::new(&self.resolver, &self.titles, options)
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Written { path: PathBuf, events: usize },
    NoEvents,
    WriteFailed { path: PathBuf, reason: String },
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Written { path, events } => write!(
                f,
                "ICS file '{}' created successfully with {} event(s)!",
                path.display(),
                events
            ),
            RunOutcome::NoEvents => write!(f, "No events found in the input."),
            RunOutcome::WriteFailed { path, reason } => {
                write!(f, "Failed to write calendar file '{}': {}", path.display(), reason)
            }
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub skipped: Vec<SkippedPhrase>,
}

pub struct Application {
    pipeline: Pipeline,
    config: Config,
    options: AssemblerOptions,
}

impl Application {
    /// Build the pipeline; fails before any input is read if setup is broken
    pub fn new(config: Config) -> Result<Self> {
        let options = config.assembler_options()?;
        let pipeline = Pipeline::new()?;
        log::debug!("Pipeline ready ({:?})", options);
        Ok(Self { pipeline, config, options })
    }

    /// Run against the current date in the configured zone
    pub fn run(&self, input: &str) -> RunReport {
        let today = Utc::now().with_timezone(&self.options.timezone).date_naive();
        self.run_on(input, today)
    }

    pub fn run_on(&self, input: &str, today: NaiveDate) -> RunReport {
        let phrases = self.pipeline.segmenter().split(input);
        log::debug!("Segmented input into {} phrase(s): {:?}", phrases.len(), phrases);

        let assembly = self.pipeline.assembler(self.options).assemble(&phrases, today);
        let path = PathBuf::from(&self.config.output_filename);

        let outcome = match write_calendar(&assembly.calendar, &path) {
            Ok(()) => RunOutcome::Written { path, events: assembly.calendar.len() },
            Err(CalendarError::NoEvents) => RunOutcome::NoEvents,
            Err(e) => {
                log::error!("{}", e);
                RunOutcome::WriteFailed { path, reason: e.to_string() }
            }
        };

        log::info!("{}", outcome);
        RunReport { outcome, skipped: assembly.skipped }
    }
}

/// Ask for event text on the terminal. `None` when the user cancels.
pub fn prompt_for_input() -> Result<Option<String>> {
    let mut rl = DefaultEditor::new()?;

    match rl.readline("Enter your event details: ") {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) => {
            println!("CTRL-C");
            Ok(None)
        }
        Err(ReadlineError::Eof) => {
            println!("CTRL-D");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
