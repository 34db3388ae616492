use std::io::{BufRead, Write};

use anyhow::Context;
use services::GamePhase;
use tracing::debug;
use ui::{GameIntent, GameVm};

use crate::report::GameReport;

const BACK_COMMAND: &str = ":back";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounds {
    /// Ask "play again?" after every game.
    Ask,
    Fixed(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RoundEnd {
    Finished,
    Abandoned,
    Eof,
}

/// Line-oriented front end: renders the view model as text and turns input
/// lines into intents.
pub struct Terminal<R, W> {
    vm: GameVm,
    input: R,
    output: W,
    json: bool,
    report: Option<GameReport>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(vm: GameVm, input: R, output: W) -> Self {
        Self {
            vm,
            input,
            output,
            json: false,
            report: None,
        }
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[cfg(test)]
    fn report(&self) -> Option<&GameReport> {
        self.report.as_ref()
    }

    pub fn run(&mut self, rounds: Rounds) -> anyhow::Result<()> {
        writeln!(self.output, "{}", self.vm.title())?;
        let mut round = 0_u32;
        loop {
            round += 1;
            self.render_settings()?;
            let end = self.play_round(round)?;
            debug!(round, ?end, "round ended");

            let again = match (end, rounds) {
                (RoundEnd::Eof, _) => false,
                (_, Rounds::Fixed(total)) => round < total,
                (_, Rounds::Ask) => self.ask_play_again()?,
            };
            if !again {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn render_settings(&mut self) -> anyhow::Result<()> {
        if let Some(header) = self.vm.section_header() {
            writeln!(self.output)?;
            writeln!(self.output, "{header}")?;
        }
        writeln!(self.output, "  {}", self.vm.question_count_label())?;
        writeln!(
            self.output,
            "  {}: {}",
            self.vm.max_factor_label(),
            self.vm.selected_max_factor()
        )?;
        writeln!(
            self.output,
            "Type answers and press enter, or {BACK_COMMAND} to stop."
        )?;
        Ok(())
    }

    fn play_round(&mut self, round: u32) -> anyhow::Result<RoundEnd> {
        self.report = None;
        self.vm
            .dispatch(GameIntent::PlayOrBack)
            .context("could not start the game")?;

        while self.vm.phase() == GamePhase::Playing {
            let number = self.vm.question_number_label().unwrap_or_default();
            let prompt = self.vm.prompt_text().unwrap_or_default();
            writeln!(self.output)?;
            writeln!(self.output, "{number}  ({})", self.vm.progress_label())?;
            write!(self.output, "{prompt} ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                self.vm.dispatch(GameIntent::PlayOrBack)?;
                return Ok(RoundEnd::Eof);
            };
            if line.trim() == BACK_COMMAND {
                self.vm.dispatch(GameIntent::PlayOrBack)?;
                writeln!(self.output, "Game stopped.")?;
                return Ok(RoundEnd::Abandoned);
            }

            self.vm.dispatch(GameIntent::EditAnswer(line))?;
            self.vm.dispatch(GameIntent::Submit)?;

            if let Some(report) = GameReport::capture(round, self.vm.session()) {
                self.report = Some(report);
            }
            self.show_alerts()?;
        }

        if self.json {
            if let Some(report) = &self.report {
                writeln!(self.output, "{}", serde_json::to_string(report)?)?;
            }
        }
        Ok(RoundEnd::Finished)
    }

    fn show_alerts(&mut self) -> anyhow::Result<()> {
        while let Some(alert) = self.vm.alert().cloned() {
            writeln!(self.output, "{} {}", alert.title, alert.message)?;
            self.vm.dispatch(GameIntent::DismissAlert)?;
        }
        Ok(())
    }

    fn ask_play_again(&mut self) -> anyhow::Result<bool> {
        write!(self.output, "Play again? [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
