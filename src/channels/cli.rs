//! CLI channel — stdin/stdout chat for the questionnaire.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::ChannelError;
use crate::planner::prompts::{GENERATING_STATUS, GREETING, SUBTITLE, TITLE};
use crate::planner::{ChatEntry, PlannerManager, Role, SessionPhase};

/// Why the CLI loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliExit {
    /// The user typed `/quit`.
    Quit,
    /// stdin was closed.
    Eof,
}

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand<'a> {
    Quit,
    Reset,
    Answer(&'a str),
    Empty,
}

/// Interpret one line of input.
pub fn parse_line(line: &str) -> CliCommand<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => CliCommand::Empty,
        "/quit" | "/exit" => CliCommand::Quit,
        "/reset" | "/restart" => CliCommand::Reset,
        answer => CliCommand::Answer(answer),
    }
}

/// Render one transcript entry for the terminal.
pub fn render_entry(entry: &ChatEntry) -> String {
    match entry.role {
        Role::User => format!("🧑 {}", entry.content),
        Role::Assistant => format!("🤖 {}", entry.content),
    }
}

/// Terminal surface: prints the transcript as it grows and feeds typed
/// lines to the planner.
pub struct CliChannel {
    manager: Arc<PlannerManager>,
}

impl CliChannel {
    pub fn new(manager: Arc<PlannerManager>) -> Self {
        Self { manager }
    }

    /// Run until `/quit` or end of input.
    pub async fn run(&self) -> Result<CliExit, ChannelError> {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        println!("{TITLE}\n{SUBTITLE}\n");
        println!("{}\n", render_entry(&ChatEntry::assistant(GREETING)));
        eprintln!("   Commands: /reset to start over, /quit to exit.\n");

        let mut shown = 0;
        loop {
            if self.manager.phase().await == SessionPhase::ReadyToGenerate {
                eprintln!("{GENERATING_STATUS}");
                self.manager.generate_if_ready().await;
            }

            let view = self.manager.snapshot().await;
            // A reset from another surface shrinks the transcript.
            if view.transcript.len() < shown {
                shown = 0;
            }
            for entry in &view.transcript[shown..] {
                // The user's own line is already on screen.
                if entry.role == Role::Assistant {
                    println!("{}\n", render_entry(entry));
                }
            }
            shown = view.transcript.len();

            match view.phase {
                SessionPhase::Collecting if view.transcript.is_empty() => {
                    if let Some(ref question) = view.current_question {
                        println!("{}\n", render_entry(&ChatEntry::assistant(question.prompt)));
                    }
                }
                SessionPhase::Done => {
                    eprintln!("Type /reset to plan another trip or /quit to exit.");
                }
                _ => {}
            }
            eprint!("> ");

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(CliExit::Eof),
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    return Err(ChannelError::Io(e));
                }
            };

            match parse_line(&line) {
                CliCommand::Empty => continue,
                CliCommand::Quit => return Ok(CliExit::Quit),
                CliCommand::Reset => {
                    self.manager.reset().await;
                    shown = 0;
                    println!("🔄 Starting over.\n");
                }
                CliCommand::Answer(answer) => {
                    if view.phase == SessionPhase::Collecting {
                        self.manager.submit_answer(answer).await;
                    } else {
                        eprintln!("Your itinerary is ready.");
                    }
                }
            }
        }
    }
}
