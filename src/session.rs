//! Executes parsed commands against one engine.

use sheetforge_engine::engine::Change;
use sheetforge_engine::{CellWrite, Engine, EngineConfig, Status};
use tracing::debug;

use crate::command::Command;
use crate::format::format_number;

/// Result of running one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Succeeded with nothing to print.
    Done,
    /// Succeeded; print to stdout.
    Output(String),
    /// Succeeded with an advisory; print to stderr.
    Advisory(String),
    /// Failed; the engine is unchanged.
    Failed(String),
}

pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new(config: EngineConfig) -> anyhow::Result<Session> {
        let engine = Engine::with_config(config)?;
        Ok(Session { engine })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn execute(&self, command: &Command) -> Outcome {
        debug!(?command, "execute");
        match command {
            Command::Create { name, value } => match self.engine.create_value_cell(name, *value) {
                Ok(CellWrite::Inserted) => Outcome::Done,
                Ok(CellWrite::Redefined { .. }) => Outcome::Advisory(self.engine.last_error()),
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Command::Set { name, value } => match self.engine.set_cell_value(name, *value) {
                Ok(_) => Outcome::Done,
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Command::Get { name } => match self.engine.get_cell_value(name) {
                Ok(value) => Outcome::Output(format_number(value)),
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Command::Show { name } => match self.engine.cell(name) {
                Ok(cell) => {
                    let change = match cell.last_change {
                        Change::Created => "created",
                        Change::Redefined => "redefined",
                        Change::Assigned => "assigned",
                    };
                    Outcome::Output(format!(
                        "{} = {} (revision {}, {})",
                        cell.name,
                        format_number(cell.value),
                        cell.revision,
                        change
                    ))
                }
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Command::Remove { name } => match self.engine.remove_cell(name) {
                Ok(_) => Outcome::Done,
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Command::Has { name } => Outcome::Output(self.engine.contains(name).to_string()),
            Command::Count => Outcome::Output(self.engine.len().to_string()),
            Command::List => {
                let names = self.engine.names();
                if names.is_empty() {
                    Outcome::Done
                } else {
                    Outcome::Output(names.join("\n"))
                }
            }
            Command::Reset => {
                self.engine.reset();
                Outcome::Done
            }
            Command::Error => {
                let channel = self.engine.error_channel();
                if channel.status() == Status::Ok {
                    Outcome::Output("OK".to_string())
                } else {
                    Outcome::Output(format!("{}: {}", channel.status(), channel.message_str()))
                }
            }
        }
    }
}
