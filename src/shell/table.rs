//! The shell's command vocabulary.

use rand::seq::SliceRandom;

/// Control effects that reserved commands have on the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Drop the whole transcript.
    Clear,
    /// Hand control to the chat relay.
    EnterChat,
}

/// What a command produces when executed.
#[derive(Debug, Clone, Copy)]
pub enum Response {
    /// Fixed text.
    Literal(&'static str),
    /// Text computed on every call (e.g. a random fact).
    Generator(fn() -> String),
    /// A reserved token with a control effect instead of text.
    Action(Action),
}

impl Response {
    /// Returns the response text, invoking the generator if needed.
    ///
    /// Actions have no text and yield `None`.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Literal(text) => Some((*text).to_string()),
            Self::Generator(generate) => Some(generate()),
            Self::Action(_) => None,
        }
    }
}

/// A single command in the table.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    /// Lowercase command name as typed by the user.
    pub name: &'static str,
    /// One-line description shown by `termfolio commands`.
    pub summary: &'static str,
    pub response: Response,
}

const HELP: &str = "Available commands: home, about, projects, lab, mindset, contact, surprise, clear, help ai\n\
Type one to explore. 'help ai' opens chat mode.";

const HOME: &str = "Hey, I'm Sifeddine. I build systems that run without me. Not lazy, smart. Welcome to my world.";

const ABOUT: &str = "I build tools because I'm allergic to doing the same thing twice. \
Passionate about automation, systems thinking, and making technology work for humans \
instead of the other way around.";

const PROJECTS: &str = "Yuno: CAPTCHA meets game. Human-first challenges that generate AI data while being fun.\n\
Receipto: receipts typed into live stock. Crumpled paper in, dashboards out.\n\
Wishdrop: wishes + anonymous givers = chaos & kindness.";

const LAB: &str = "Playground: generosity games, AI-prompted interfaces, systems that misbehave and still surprise. \
This is where I experiment with wild ideas that somehow work.";

const MINDSET: &str = "I don't chase hustle, I chase leverage. If it repeats, I systemize it. \
If it's weird but works, I keep it. Efficiency through intelligent laziness.";

const CONTACT: &str = "Slide into my DMs:\n\
Instagram: @sifeddine.m\n\
GitHub: Meykiio\n\
TikTok: @sifeddine_meb\n\
Email: hello@sifeddine.xyz";

const FACTS: &[&str] = &[
    "Fun fact: this whole site is a shell because menus are overrated.",
    "Fun fact: Yuno started as a joke about CAPTCHAs being boring. The joke shipped.",
    "Fun fact: I automate a task the second time I catch myself doing it.",
    "Fun fact: Receipto was born from a shoebox full of receipts and zero patience.",
    "Fun fact: the best systems I've built are the ones I forgot were running.",
    "Fun fact: Algiers has more good coffee than my code has comments.",
];

fn random_fact() -> String {
    FACTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FACTS[0])
        .to_string()
}

/// The built-in command table, in definition order.
///
/// Suggestion order follows this order.
pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "help",
        summary: "List available commands",
        response: Response::Literal(HELP),
    },
    CommandEntry {
        name: "home",
        summary: "Who's behind this shell",
        response: Response::Literal(HOME),
    },
    CommandEntry {
        name: "hero",
        summary: "Alias of home",
        response: Response::Literal(HOME),
    },
    CommandEntry {
        name: "about",
        summary: "A little background",
        response: Response::Literal(ABOUT),
    },
    CommandEntry {
        name: "projects",
        summary: "Things I've shipped",
        response: Response::Literal(PROJECTS),
    },
    CommandEntry {
        name: "lab",
        summary: "Experiments in progress",
        response: Response::Literal(LAB),
    },
    CommandEntry {
        name: "mindset",
        summary: "How I think about work",
        response: Response::Literal(MINDSET),
    },
    CommandEntry {
        name: "contact",
        summary: "Where to find me",
        response: Response::Literal(CONTACT),
    },
    CommandEntry {
        name: "surprise",
        summary: "A random fact",
        response: Response::Generator(random_fact),
    },
    CommandEntry {
        name: "clear",
        summary: "Clear the screen",
        response: Response::Action(Action::Clear),
    },
    CommandEntry {
        name: "help ai",
        summary: "Chat with the AI assistant",
        response: Response::Action(Action::EnterChat),
    },
    CommandEntry {
        name: "chat",
        summary: "Alias of help ai",
        response: Response::Action(Action::EnterChat),
    },
];

/// An immutable, ordered command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandTable {
    entries: &'static [CommandEntry],
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(COMMANDS)
    }
}

impl CommandTable {
    pub const fn new(entries: &'static [CommandEntry]) -> Self {
        Self { entries }
    }

    /// Looks up a normalized (trimmed, lowercase) command name.
    pub fn lookup(&self, name: &str) -> Option<&'static CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &'static [CommandEntry] {
        self.entries
    }

    /// Returns every command name that completes `partial`, in table order.
    ///
    /// Blank input suggests nothing rather than the whole vocabulary.
    pub fn suggest(&self, partial: &str) -> Vec<&'static str> {
        let prefix = partial.trim_start().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.name.starts_with(&prefix))
            .map(|entry| entry.name)
            .collect()
    }
}
