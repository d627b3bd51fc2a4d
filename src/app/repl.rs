use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use super::editor::ShellEditor;
use super::mode::{Mode, Portfolio};
use crate::chat::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use crate::chat::{ChatRelay, CompletionService, Notice, Notifier, ui};
use crate::config::ChatBackend;
use crate::shell::{Execution, Interpreter, LineKind, TranscriptLine};
use crate::ui::{Spinner, Style, is_prompt_cancelled, typewriter};

const SHELL_PROMPT: &str = "visitor@sifeddine:~$";

/// Reports relay notices on stderr, outside the visitor-facing transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::MissingCredential => crate::warn!(
                "{} The AI service has no API key. Run 'termfolio configure' or set it in config.toml.",
                Style::warning("Notice:")
            ),
        }
    }
}

/// Settings for an interactive session.
pub struct SessionOptions {
    /// Open the session in chat mode instead of the shell.
    pub start_in_chat: bool,
    /// Per-character reveal delay for fresh output.
    pub typewriter: Duration,
    /// Backend details for `/config`; `None` when chat is unconfigured.
    pub backend: Option<ChatBackend>,
}

/// The interactive terminal front-end over a [`Portfolio`].
pub struct Session {
    portfolio: Portfolio,
    editor: ShellEditor,
    service: Box<dyn CompletionService>,
    backend: Option<ChatBackend>,
    typewriter: Duration,
    shown_turns: usize,
}

impl Session {
    pub fn new(service: Box<dyn CompletionService>, options: SessionOptions) -> Result<Self> {
        let relay = ChatRelay::new(Box::new(StderrNotifier));
        let mut portfolio = Portfolio::new(Interpreter::default(), relay);
        if options.start_in_chat {
            portfolio.enter_chat();
        }

        // Piped output gets no animation
        let typewriter = if io::stdout().is_terminal() {
            options.typewriter
        } else {
            Duration::ZERO
        };

        let editor = ShellEditor::new(*portfolio.interpreter().table())?;

        Ok(Self {
            portfolio,
            editor,
            service,
            backend: options.backend,
            typewriter,
            shown_turns: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.render_shell(false).await?;
        if self.portfolio.mode() == Mode::Chat {
            ui::print_header();
            self.render_turns().await?;
        }

        loop {
            let keep_going = match self.portfolio.mode() {
                Mode::Shell => self.shell_step().await?,
                Mode::Chat => self.chat_step().await?,
            };
            if !keep_going {
                break;
            }
        }

        crate::status!("{}", Style::success("Goodbye!"));
        Ok(())
    }

    async fn shell_step(&mut self) -> Result<bool> {
        let history = self.portfolio.interpreter().history();
        let Some(mut line) = self.editor.read_line(&format!("{SHELL_PROMPT} "), history)? else {
            println!();
            return Ok(false);
        };

        match self.portfolio.submit(&mut line) {
            Some(Execution::Cleared) => {
                clear_screen()?;
                self.render_shell(true).await?;
            }
            Some(Execution::EnterChat) => {
                self.render_shell(false).await?;
                ui::print_header();
                self.render_turns().await?;
            }
            Some(Execution::Empty | Execution::Output(_)) | None => {
                self.render_shell(false).await?;
            }
        }
        Ok(true)
    }

    async fn chat_step(&mut self) -> Result<bool> {
        let line = match Text::new("")
            .with_render_config(render_config("›"))
            .with_autocomplete(SlashCommandCompleter)
            .prompt()
        {
            Ok(line) => line,
            // Cancelling inside chat returns to the shell rather than quitting.
            Err(e) if is_prompt_cancelled(&e) => {
                println!();
                self.leave_chat().await?;
                return Ok(true);
            }
            Err(e) => return Err(e.into()),
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Command(SlashCommand::Exit) => self.leave_chat().await?,
            Input::Command(SlashCommand::Clear) => {
                self.portfolio.relay_mut().clear().await;
                self.shown_turns = 0;
                crate::status!("{}", Style::hint("Conversation cleared."));
                self.render_turns().await?;
            }
            Input::Command(SlashCommand::Config) => {
                let relay = self.portfolio.relay();
                ui::print_config(self.backend.as_ref(), relay.session_id());
            }
            Input::Command(SlashCommand::Help) => ui::print_help(),
            Input::Command(SlashCommand::Unknown(cmd)) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
            Input::Text(text) => {
                let Some(pending) = self.portfolio.begin_send(&text) else {
                    return Ok(true);
                };
                let spinner = Spinner::new("Thinking...");
                let result = self.service.complete(pending.messages()).await;
                spinner.stop();

                // Notices print here, after the spinner line is gone.
                self.portfolio.relay_mut().resolve(pending, result);

                // The user's own turn is already on screen from the prompt.
                self.shown_turns += 1;
                self.render_turns().await?;
            }
        }
        Ok(true)
    }

    async fn leave_chat(&mut self) -> Result<()> {
        if self.portfolio.exit_chat() {
            self.render_shell(false).await?;
        }
        Ok(())
    }

    /// Writes the shell lines produced since the last render.
    ///
    /// Command echoes are already visible as the answered prompt, unless the
    /// screen was just wiped.
    async fn render_shell(&mut self, with_echoes: bool) -> Result<()> {
        let fresh = self.portfolio.interpreter_mut().take_fresh();
        for line in fresh {
            if line.kind == LineKind::Command && !with_echoes {
                continue;
            }
            self.render_line(&line).await?;
        }
        Ok(())
    }

    async fn render_line(&self, line: &TranscriptLine) -> Result<()> {
        let mut out = io::stdout();
        match line.kind {
            LineKind::Command => {
                writeln!(out, "{} {}", Style::secondary(SHELL_PROMPT), line.text)?;
            }
            LineKind::Welcome => {
                typewriter::reveal(&mut out, &Style::welcome(&line.text), self.typewriter).await?;
                writeln!(out)?;
                writeln!(out)?;
            }
            LineKind::Output => {
                typewriter::reveal(&mut out, &Style::output(&line.text), self.typewriter).await?;
                writeln!(out)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    async fn render_turns(&mut self) -> Result<()> {
        let mut out = io::stdout();
        let turns = self.portfolio.relay().turns();
        for turn in turns.iter().skip(self.shown_turns) {
            write!(out, "{} ", ui::turn_prefix(turn))?;
            typewriter::reveal(&mut out, &turn.text, self.typewriter).await?;
            writeln!(out)?;
            writeln!(out)?;
        }
        self.shown_turns = turns.len();
        Ok(())
    }
}

fn render_config(prefix: &'static str) -> RenderConfig<'static> {
    let prompt_style = Styled::new(prefix)
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    // Non-highlighted suggestions: gray
    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    // Highlighted suggestion: purple
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

    render_config
}

fn clear_screen() -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "\x1B[2J\x1B[1;1H")?;
    out.flush()
}
