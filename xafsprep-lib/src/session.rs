//! Line-oriented command loop.
//!
//! A [`Session`] owns the [`SampleRegistry`] and reads one command at a
//! time through a [`Console`]. Commands that need more input prompt for it
//! and re-prompt until the answer parses. Typing the cancel word (default
//! `cancel`) at any prompt abandons the current command.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::error::{PrepError, Result};
use crate::provider::CrossSectionProvider;
use crate::registry::SampleRegistry;
use crate::sample::Sample;

pub const DEFAULT_CANCEL_WORD: &str = "cancel";
pub const DEFAULT_SAMPLES_DIR: &str = "samples";

const HELP: &str = "\
List of available commands:

list                     ---List all samples
sample new [name]        ---Creates a new sample
sample rename            ---Renames a sample
sample setup             ---Setup sample properties
sample compute           ---Compute xray data for sample
sample dilute [percent]  ---Dilute a sample with BN (percent between 0-1)
sample write             ---Write sample data to screen and file
quit                     ---Quit program";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Directory that receives `<name>.txt` reports.
    pub samples_dir: PathBuf,
    /// Input that aborts the command currently prompting.
    pub cancel_word: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            samples_dir: PathBuf::from(DEFAULT_SAMPLES_DIR),
            cancel_word: DEFAULT_CANCEL_WORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingCommand,
    Exited,
}

/// Prompting front end over any line source and text sink.
pub struct Console<R, W> {
    input: R,
    output: W,
    cancel_word: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, cancel_word: impl Into<String>) -> Self {
        Console {
            input,
            output,
            cancel_word: cancel_word.into(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Write `text` as is and flush, so partial-line prompts show up.
    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        match self.read_line()? {
            None => Err(PrepError::EndOfInput),
            Some(line) if line.trim() == self.cancel_word => Err(PrepError::Cancelled),
            Some(line) => Ok(line),
        }
    }

    /// Prompt with `message` until `accept` returns a value.
    pub fn ask_until<T>(
        &mut self,
        message: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let line = self.ask(message)?;
            if let Some(value) = accept(line.trim()) {
                return Ok(value);
            }
            debug!("rejected input {line:?} for prompt {message:?}");
            let hint = format!("Invalid input. Type '{}' to abort.", self.cancel_word);
            self.say(hint)?;
        }
    }
}

pub struct Session<P> {
    registry: SampleRegistry,
    provider: P,
    settings: SessionSettings,
    state: SessionState,
}

impl<P: CrossSectionProvider> Session<P> {
    pub fn new(provider: P, settings: SessionSettings) -> Self {
        Session {
            registry: SampleRegistry::new(),
            provider,
            settings,
            state: SessionState::AwaitingCommand,
        }
    }

    pub fn registry(&self) -> &SampleRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// Only failures of the console itself are returned; command errors are
    /// reported on the console and the loop continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: W) -> Result<()> {
        let mut console = Console::new(input, output, self.settings.cancel_word.clone());
        while self.state == SessionState::AwaitingCommand {
            console.say("Please enter a command:")?;
            console.write_raw(">>")?;
            match console.read_line()? {
                Some(line) => {
                    console.blank()?;
                    self.execute(&line, &mut console)?;
                }
                None => {
                    info!("end of input, closing session");
                    self.state = SessionState::Exited;
                }
            }
        }
        Ok(())
    }

    /// Execute one command line, including any prompts it needs.
    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(());
        }

        match self.dispatch(&tokens, console) {
            Ok(()) => {}
            Err(PrepError::EndOfInput) => {
                self.state = SessionState::Exited;
                return Ok(());
            }
            Err(PrepError::Io(e)) => return Err(PrepError::Io(e)),
            Err(e) => {
                match &e {
                    PrepError::Provider { .. } | PrepError::InvalidComputation(_) => {
                        warn!("command '{line}' failed: {e}")
                    }
                    _ => debug!("command '{line}' rejected: {e}"),
                }
                console.say(diagnostic(&e))?;
            }
        }
        console.blank()
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        tokens: &[&str],
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match tokens[0] {
            "quit" => {
                self.state = SessionState::Exited;
                Ok(())
            }
            "help" => console.say(HELP),
            "list" => self.print_list(console),
            "sample" => match tokens.get(1).copied() {
                Some("new") => self.sample_new(tokens, console),
                Some("rename") => self.sample_rename(console),
                Some("setup") => self.sample_setup(console),
                Some("compute") => self.sample_compute(console),
                Some("dilute") => self.sample_dilute(tokens, console),
                Some("write") => self.sample_write(console),
                other => Err(PrepError::BadSubcommand(other.unwrap_or_default().to_string())),
            },
            other => Err(PrepError::BadCommand(other.to_string())),
        }
    }

    fn print_list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let entries = self.registry.list()?;
        console.say("List of samples:")?;
        for (id, name) in entries {
            console.say(format_args!("{id}. {name}"))?;
        }
        Ok(())
    }

    /// List the samples and prompt until a valid ID is entered.
    fn select<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<usize> {
        self.print_list(console)?;
        let len = self.registry.len();
        console.ask_until("Enter the ID of the sample you wish to select: ", |s| {
            s.parse::<usize>().ok().filter(|&id| id < len)
        })
    }

    fn sample_new<R: BufRead, W: Write>(
        &mut self,
        tokens: &[&str],
        console: &mut Console<R, W>,
    ) -> Result<()> {
        let [_, _, name] = tokens else {
            return Err(PrepError::Validation(
                "A one-word sample name is required. Please re-input.".to_string(),
            ));
        };
        if !is_file_name(name) {
            return Err(PrepError::Validation(
                "Sample names cannot contain '/' or '\\' or be '.' or '..'. Please re-input."
                    .to_string(),
            ));
        }
        self.registry.append(Sample::new(*name));
        console.say("New sample created.")
    }

    fn sample_rename<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let id = self.select(console)?;
        let name =
            console.ask_until("Enter the new (one-word) name for the sample: ", sample_name)?;
        let sample = self.registry.get_mut(id)?;
        info!("renaming '{}' to '{name}'", sample.name());
        sample.rename(name);
        console.say("Sample renamed.")
    }

    fn sample_setup<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let id = self.select(console)?;
        let density = console.ask_until("Enter the bulk density (in g/cm^3): ", positive_number)?;
        let count = console.ask_until("Enter the number of elements in the compound: ", |s| {
            s.parse::<usize>().ok()
        })?;

        // Nothing is written to the sample until every pair is in.
        let mut elements = Vec::with_capacity(count);
        let mut fractions = Vec::with_capacity(count);
        for i in 1..=count {
            let symbol = console.ask_until(
                &format!("Please enter the symbol for element #{i}: "),
                one_word,
            )?;
            let fraction = console.ask_until(
                &format!(
                    "Please enter the mass percentage for element #{i} (fraction between 0-1): "
                ),
                mass_fraction,
            )?;
            elements.push(symbol);
            fractions.push(fraction);
        }

        self.registry
            .get_mut(id)?
            .set_composition(elements, fractions, density)?;
        console.blank()?;
        console.say("Sample has been successfully set up.")
    }

    fn sample_compute<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let id = self.select(console)?;
        let energy =
            console.ask_until("Enter the desired photon energy (in keV): ", positive_number)?;
        self.registry.get_mut(id)?.compute(energy, &self.provider)?;
        console.say("Computation successful.")
    }

    fn sample_dilute<R: BufRead, W: Write>(
        &mut self,
        tokens: &[&str],
        console: &mut Console<R, W>,
    ) -> Result<()> {
        self.registry.list()?;
        let percent = tokens
            .get(2)
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|p| (0.0..=1.0).contains(p))
            .ok_or_else(|| {
                PrepError::Validation("Enter a dilution percentage between 0-1.".to_string())
            })?;

        let id = self.select(console)?;
        let diluted = self.registry.get(id)?.diluted(percent);
        info!("diluted '{}' with {percent} BN", self.registry.get(id)?.name());
        self.registry.append(diluted);
        console.say("Dilution successful.")
    }

    fn sample_write<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let id = self.select(console)?;
        let report = self.registry.get(id)?.report();
        console.write_raw(&report.to_string())?;

        let dir = &self.settings.samples_dir;
        match report.write_to_dir(dir) {
            Ok(_) => console.say(format_args!(
                "Sample has been saved to {}.txt.",
                report.name
            )),
            Err(e) => {
                let path = report.file_path(dir);
                warn!("failed to write {}: {e}", path.display());
                console.say(format_args!(
                    "Could not save sample to {}: {e}",
                    path.display()
                ))
            }
        }
    }
}

/// One-line message shown for a failed command.
pub fn diagnostic(error: &PrepError) -> String {
    match error {
        PrepError::NoSamples => "No samples have been created yet.".to_string(),
        PrepError::BadCommand(_) => "Bad command name. Please re-input.".to_string(),
        PrepError::BadSubcommand(_) => {
            "Bad subcommand under command 'sample' -- Please re-input.".to_string()
        }
        PrepError::Validation(msg) => msg.clone(),
        PrepError::Cancelled => "Command cancelled.".to_string(),
        other => format!("Error: {other}."),
    }
}

fn one_word(input: &str) -> Option<String> {
    let mut words = input.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => Some(word.to_string()),
        _ => None,
    }
}

/// A single token usable as a report file stem under the samples directory.
fn sample_name(input: &str) -> Option<String> {
    one_word(input).filter(|name| is_file_name(name))
}

fn is_file_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}

fn positive_number(input: &str) -> Option<f64> {
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn mass_fraction(input: &str) -> Option<f64> {
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
