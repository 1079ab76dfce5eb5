//! Line-oriented operator console.
//!
//! Reads one command per line, applies it to an [`OperatorSession`] and
//! writes the outcome. Command errors are reported and the console keeps
//! running; fatal errors (see [`AppError::is_fatal`]) end it.

use crate::announcement::{AnnouncementPublisher, AnnouncementStore, BoardView};
use crate::config::SessionConfig;
use crate::dataset::{Dataset, EarthquakeRecord};
use crate::error::{AppError, Result};
use crate::ml::PredictionService;
use crate::models::FeatureField;
use crate::session::OperatorSession;
use crate::startup::AppContext;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

const HELP: &str = "\
Commands:
  help                  show this help
  info                  dataset size, preview and session state
  rows [N]              list the selectable events (last N)
  select <i>            load the readings of event i
  set <field> <value>   override magnitude, depth, cdi, mmi or sig
  inputs                show the current readings
  predict               classify the current readings
  region <text>         edit the announcement region
  message <text>        edit the announcement message
  publish               publish the announcement (replaces the board)
  board                 show the public announcement board
  quit                  leave the console";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Info,
    Rows(Option<usize>),
    Select(usize),
    Set { field: String, value: String },
    Inputs,
    Predict,
    Region(String),
    Message(String),
    Publish,
    Board,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let index = |what: &str| -> Result<usize> {
            rest.parse()
                .map_err(|_| AppError::Validation(format!("{} expects a row number", what)))
        };
        let text = |what: &str| -> Result<String> {
            if rest.is_empty() {
                Err(AppError::Validation(format!("{} expects some text", what)))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "help" | "?" => Ok(Command::Help),
            "info" => Ok(Command::Info),
            "rows" if rest.is_empty() => Ok(Command::Rows(None)),
            "rows" => index("rows").map(|n| Command::Rows(Some(n))),
            "select" => index("select").map(Command::Select),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| AppError::Validation("usage: set <field> <value>".to_string()))?;
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "inputs" => Ok(Command::Inputs),
            "predict" => Ok(Command::Predict),
            "region" => text("region").map(Command::Region),
            "message" => text("message").map(Command::Message),
            "publish" => Ok(Command::Publish),
            "board" => Ok(Command::Board),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(AppError::Validation(format!(
                "unknown command {:?}; type 'help'",
                other
            ))),
        }
    }
}

/// One-line description of a selectable event
pub fn describe_event(index: usize, record: &EarthquakeRecord) -> String {
    let readings: Vec<String> = FeatureField::ordered()
        .map(|field| format!("{}={}", field, record.raw(field).unwrap_or("-")))
        .collect();
    format!(
        "{:>4}  {}  [{}]",
        index,
        readings.join(" "),
        record.place.as_deref().unwrap_or("-")
    )
}

pub struct Console<'a> {
    dataset: &'a Dataset,
    predictor: &'a PredictionService,
    store: Arc<dyn AnnouncementStore>,
    publisher: AnnouncementPublisher,
    settings: SessionConfig,
    session: OperatorSession,
}

impl<'a> Console<'a> {
    pub fn new(
        dataset: &'a Dataset,
        predictor: &'a PredictionService,
        store: Arc<dyn AnnouncementStore>,
        settings: SessionConfig,
    ) -> Result<Self> {
        let session = OperatorSession::new(dataset.tail(settings.tail_rows))?;
        Ok(Self {
            dataset,
            predictor,
            publisher: AnnouncementPublisher::new(store.clone()),
            store,
            settings,
            session,
        })
    }

    pub fn from_context(context: &'a AppContext) -> Result<Self> {
        Self::new(
            &context.dataset,
            &context.predictor,
            context.store.clone(),
            context.config.session.clone(),
        )
    }

    pub fn session(&self) -> &OperatorSession {
        &self.session
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "🌎 Earthquake alert console. Type 'help' for commands.")?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                let keep_going = match line.parse::<Command>() {
                    Ok(command) => self.execute(&command, &mut output)?,
                    Err(e) => {
                        writeln!(output, "error: {}", e)?;
                        true
                    }
                };
                if !keep_going {
                    break;
                }
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        writeln!(output)?;
        Ok(())
    }

    /// Apply one command; returns false when the console should stop
    pub fn execute<W: Write>(&mut self, command: &Command, output: &mut W) -> Result<bool> {
        match self.apply(command, output) {
            Ok(keep_going) => Ok(keep_going),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::debug!(error_code = e.error_code(), "Console command failed");
                writeln!(output, "error: {}", e)?;
                Ok(true)
            }
        }
    }

    fn apply<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<bool> {
        match command {
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Info => {
                writeln!(out, "📦 Dataset rows: {}", self.dataset.len())?;
                writeln!(out, "Preview:")?;
                for (i, record) in self.dataset.head(self.settings.preview_rows).iter().enumerate() {
                    writeln!(out, "{}", describe_event(i, record))?;
                }
                let labels: Vec<&str> = self.predictor.labels().iter().map(|l| l.as_str()).collect();
                writeln!(out, "Alert levels: {}", labels.join(", "))?;
                writeln!(out, "Session: {}", self.session.state().name())?;
            }
            Command::Rows(limit) => {
                let events = self.session.events();
                let start = limit.map_or(0, |n| events.len().saturating_sub(n));
                for (i, record) in events.iter().enumerate().skip(start) {
                    let marker = if Some(i) == self.session.selected_index() { "*" } else { " " };
                    writeln!(out, "{}{}", marker, describe_event(i, record))?;
                }
            }
            Command::Select(index) => {
                self.session.select(*index)?;
                writeln!(out, "Selected row {}: {}", index, self.session.inputs())?;
            }
            Command::Set { field, value } => {
                self.session.set_feature_text(field, value)?;
                writeln!(out, "Inputs: {}", self.session.inputs())?;
            }
            Command::Inputs => writeln!(out, "Inputs: {}", self.session.inputs())?,
            Command::Predict => {
                let draft = self.session.predict(self.predictor)?;
                writeln!(
                    out,
                    "Predicted alert level: {} {}",
                    draft.risk_level.marker(),
                    draft.risk_level.display_name()
                )?;
                writeln!(out, "Region: {}", draft.region)?;
                writeln!(out, "Message: {}", draft.message)?;
            }
            Command::Region(region) => {
                self.session.set_region(region.clone())?;
                writeln!(out, "Region set to {}", region)?;
            }
            Command::Message(message) => {
                self.session.set_message(message.clone())?;
                writeln!(out, "Message updated")?;
            }
            Command::Publish => {
                let document = self.session.publish(&self.publisher)?;
                writeln!(out, "✅ Published at {}", document.last_updated)?;
            }
            Command::Board => write!(out, "{}", BoardView::load(self.store.as_ref())?)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}
