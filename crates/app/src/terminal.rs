//! Line-oriented front-end over a `QuizLoop`.
//!
//! Text mode drives the quiz with prompts. JSON mode is meant for another
//! process acting as the presentation layer: it reads one command per line
//! (`start <name>`, `submit <answer>`, `next`, `quit`, `view`) and answers
//! each with one `QuizView` as a JSON line.

use std::io::{self, BufRead, Write};

use services::{QuizLoop, QuizPhase, QuizView};

use crate::config::OutputMode;

const QUIT_COMMAND: &str = ":quit";
const EXIT_COMMAND: &str = ":exit";

pub struct Terminal<R, W> {
    input: R,
    output: W,
    mode: OutputMode,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, mode: OutputMode) -> Self {
        Self {
            input,
            output,
            mode,
        }
    }

    /// Run until end of input (or `:exit` in text mode).
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if reading input or writing output fails.
    pub fn run(&mut self, quiz: &mut QuizLoop) -> io::Result<()> {
        match self.mode {
            OutputMode::Text => self.run_text(quiz),
            OutputMode::Json => self.run_json(quiz),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn run_text(&mut self, quiz: &mut QuizLoop) -> io::Result<()> {
        writeln!(self.output, "IPA Quiz")?;
        let mut view = quiz.view();
        loop {
            let hint = match view.phase {
                QuizPhase::Idle | QuizPhase::Ended => "Enter your name (:exit to leave): ",
                QuizPhase::Active => "Your answer (:quit to end): ",
                QuizPhase::Graded if view.can_advance => {
                    "Press Enter for the next symbol (:quit to end): "
                }
                QuizPhase::Graded => "No symbols left. Press Enter to finish: ",
            };
            write!(self.output, "{hint}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };
            let command = line.trim();
            let at_name_prompt = matches!(view.phase, QuizPhase::Idle | QuizPhase::Ended);
            if command == EXIT_COMMAND || (at_name_prompt && command == QUIT_COMMAND) {
                return Ok(());
            }

            view = match view.phase {
                QuizPhase::Idle | QuizPhase::Ended => quiz.start_quiz(&line),
                QuizPhase::Active if command == QUIT_COMMAND => quiz.quit(),
                QuizPhase::Active => quiz.submit_answer(&line),
                QuizPhase::Graded if command == QUIT_COMMAND || !view.can_advance => quiz.quit(),
                QuizPhase::Graded => quiz.next_question(),
            };
            self.render_text(&view)?;
        }
    }

    fn render_text(&mut self, view: &QuizView) -> io::Result<()> {
        if let Some(error) = &view.error {
            writeln!(self.output, "Error: {error}")?;
        }
        match view.phase {
            QuizPhase::Active if view.error.is_none() => {
                if let Some(prompt) = &view.prompt {
                    writeln!(self.output, "\n{prompt}")?;
                }
            }
            QuizPhase::Graded if view.error.is_none() => {
                if let Some(result) = &view.result {
                    writeln!(self.output, "{result}")?;
                }
                writeln!(self.output, "Score: {}/{}", view.score, view.trials)?;
            }
            QuizPhase::Ended => {
                if let Some(summary) = &view.summary {
                    writeln!(self.output, "{summary}")?;
                }
                if let (Some(asked), Some(secs)) = (view.symbols_asked, view.elapsed_secs) {
                    writeln!(
                        self.output,
                        "Symbols asked: {asked}, time: {}m {:02}s",
                        secs / 60,
                        secs % 60
                    )?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn run_json(&mut self, quiz: &mut QuizLoop) -> io::Result<()> {
        self.emit(&quiz.view())?;
        while let Some(line) = self.read_line()? {
            let (command, arg) = match line.split_once(' ') {
                Some((command, arg)) => (command, arg),
                None => (line.as_str(), ""),
            };
            let view = match command {
                "start" => quiz.start_quiz(arg),
                "submit" => quiz.submit_answer(arg),
                "next" => quiz.next_question(),
                "quit" => quiz.quit(),
                "view" => quiz.view(),
                "" => continue,
                other => {
                    tracing::debug!(command = other, "unknown command");
                    let mut view = quiz.view();
                    view.error = Some(format!("unknown command: {other}"));
                    view
                }
            };
            self.emit(&view)?;
        }
        Ok(())
    }

    fn emit(&mut self, view: &QuizView) -> io::Result<()> {
        let json = view.to_json().map_err(io::Error::other)?;
        writeln!(self.output, "{json}")?;
        self.output.flush()
    }
}
