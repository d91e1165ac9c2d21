//! The interactive menu loop
//!
//! The session alternates between showing the menu and acting on one
//! player. Installed state is queried fresh every time it is shown or
//! acted upon, since the previous action may have changed it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::debug;

use crate::catalog::{find_player, PlayerEntry, PLAYERS};
use crate::installer::{install, is_installed, uninstall};
use crate::manager::PackageManagerKind;
use crate::runner::CommandRunner;
use crate::style::{Palette, Tone};

const APP_NAME: &str = "Video Player Manager";
const FAREWELL: &str = "\n👋 Thank you for using Video Player Manager!\n";

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `q` at the menu
    Quit,
    /// The user declined to perform another action
    Finished,
    /// Standard input was closed
    EndOfInput,
}

impl SessionEnd {
    /// Process exit status for this ending
    pub fn exit_code(&self) -> i32 {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    MenuDisplay,
    ActionPrompt(&'static PlayerEntry),
}

enum Choice {
    Player(&'static PlayerEntry),
    Quit,
    EndOfInput,
}

/// Interactive install/uninstall session over arbitrary input and output
pub struct Session<'a, R: ?Sized, I, O> {
    runner: &'a R,
    kind: PackageManagerKind,
    input: I,
    output: O,
    palette: Palette,
}

impl<'a, R, I, O> Session<'a, R, I, O>
where
    R: CommandRunner + ?Sized,
    I: BufRead,
    O: Write,
{
    pub fn new(runner: &'a R, kind: PackageManagerKind, input: I, output: O) -> Self {
        Self {
            runner,
            kind,
            input,
            output,
            palette: Palette::plain(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Runs the menu loop until the user quits or input ends
    pub fn run(&mut self) -> Result<SessionEnd> {
        self.render_header()?;

        let mut state = State::MenuDisplay;
        loop {
            debug!("Session state: {:?}", state);
            state = match state {
                State::MenuDisplay => {
                    self.render_menu()?;
                    match self.read_choice()? {
                        Choice::Player(player) => State::ActionPrompt(player),
                        Choice::Quit => return self.finish(SessionEnd::Quit),
                        Choice::EndOfInput => return self.finish(SessionEnd::EndOfInput),
                    }
                }
                State::ActionPrompt(player) => {
                    self.act_on(player)?;
                    if self.confirm("\nWould you like to perform another action? (y/N): ")? {
                        State::MenuDisplay
                    } else {
                        return self.finish(SessionEnd::Finished);
                    }
                }
            };
        }
    }

    fn render_header(&mut self) -> Result<()> {
        let rule = "=".repeat(50);
        writeln!(self.output, "{}", self.palette.paint(&rule, Tone::Heading))?;
        writeln!(
            self.output,
            "  {}",
            self.palette.paint(
                &format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION")),
                Tone::Heading
            )
        )?;
        writeln!(self.output, "  Package Manager: {}", self.kind)?;
        writeln!(self.output, "{}", self.palette.paint(&rule, Tone::Heading))?;
        Ok(())
    }

    fn render_menu(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "{}",
            self.palette
                .paint("\n╔════ Available Video Players ════╗", Tone::Heading)
        )?;

        for player in PLAYERS {
            let status = if is_installed(self.runner, player.package, self.kind) {
                self.palette.paint("✓ Installed", Tone::Success)
            } else {
                self.palette.paint("✗ Not Installed", Tone::Failure)
            };
            writeln!(
                self.output,
                "║ {}. {:<20} {}",
                self.palette.paint(player.key, Tone::Accent),
                player.name,
                status
            )?;
        }

        writeln!(
            self.output,
            "{}",
            self.palette
                .paint("╚════════════════════════════════╝", Tone::Heading)
        )?;
        writeln!(
            self.output,
            "\nEnter {} to manage a player, or {} to quit\n",
            self.palette.paint("1-6", Tone::Accent),
            self.palette.paint("q", Tone::Failure)
        )?;
        Ok(())
    }

    fn read_choice(&mut self) -> Result<Choice> {
        loop {
            let Some(line) = self.prompt("Your choice → ", Tone::Prompt)? else {
                return Ok(Choice::EndOfInput);
            };

            let choice = line.trim().to_lowercase();
            if choice == "q" {
                return Ok(Choice::Quit);
            }
            if let Some(player) = find_player(&choice) {
                return Ok(Choice::Player(player));
            }

            debug!("Rejected menu input {:?}", choice);
            writeln!(
                self.output,
                "{}",
                self.palette.paint(
                    "⚠️  Invalid choice. Please enter a number between 1-6 or 'q' to quit.\n",
                    Tone::Failure
                )
            )?;
        }
    }

    fn act_on(&mut self, player: &'static PlayerEntry) -> Result<()> {
        let package = player.package;

        if is_installed(self.runner, package, self.kind) {
            writeln!(
                self.output,
                "{}",
                self.palette
                    .paint(&format!("\n✓ {} is currently installed.", package), Tone::Success)
            )?;
            if self.confirm("Do you want to uninstall it? (y/N): ")? {
                uninstall(self.runner, package, self.kind, &mut self.output, &self.palette)?;
            }
        } else {
            writeln!(
                self.output,
                "{}",
                self.palette
                    .paint(&format!("\n✗ {} is not installed.", package), Tone::Failure)
            )?;
            if self.confirm("Do you want to install it? (y/N): ")? {
                install(self.runner, package, self.kind, &mut self.output, &self.palette)?;
            }
        }

        Ok(())
    }

    /// Asks a yes/no question; anything but `y` means no
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(question, Tone::Warning)?.unwrap_or_default();
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y")
    }

    /// Prints `text` and reads one line, `None` once input is exhausted
    fn prompt(&mut self, text: &str, tone: Tone) -> Result<Option<String>> {
        write!(self.output, "{}", self.palette.paint(text, tone))?;
        self.output.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;

        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    fn finish(&mut self, end: SessionEnd) -> Result<SessionEnd> {
        if end == SessionEnd::EndOfInput {
            writeln!(self.output)?;
        }
        writeln!(self.output, "{}", self.palette.paint(FAREWELL, Tone::Info))?;
        self.output.flush()?;
        Ok(end)
    }
}
