use crate::commands::{Category, Command, Session, BANNER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Meep,
}

/// One chat bubble in the transcript.
#[derive(Debug, Clone)]
pub struct Bubble {
    pub speaker: Speaker,
    pub text: String,
    /// Category of the command that produced a Meep bubble; drives its colour.
    pub category: Option<Category>,
}

pub struct App {
    pub session: Session,
    pub transcript: Vec<Bubble>,
    pub input_buffer: String,
    pub show_help: bool,
    /// Help text shown in the popup; rendered once from the help command.
    pub help_text: String,
    /// Number of lines scrolled up from the bottom of the transcript.
    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(mut session: Session) -> App {
        let help_text = Command::Help.execute(&mut session);
        App {
            session,
            transcript: vec![Bubble {
                speaker: Speaker::Meep,
                text: BANNER.to_string(),
                category: Some(Category::Hello),
            }],
            input_buffer: String::new(),
            show_help: false,
            help_text,
            scroll: 0,
            should_quit: false,
        }
    }

    /// Loads the save file and shows the outcome as a Meep bubble.
    pub fn autoload(&mut self) {
        let response = self.session.execute(Command::Load);
        self.push_meep(response.response, response.category);
    }

    /// Sends the current input line to the session and records both sides.
    ///
    /// Blank lines are still recorded as messages but add no bubbles.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input_buffer);
        let response = self.session.respond(&line);
        if line.trim().is_empty() {
            return;
        }
        self.transcript.push(Bubble {
            speaker: Speaker::User,
            text: line,
            category: None,
        });
        let quit = response.category == Category::Bye;
        self.push_meep(response.response, response.category);
        if quit {
            self.should_quit = true;
        }
        self.scroll = 0;
    }

    fn push_meep(&mut self, text: String, category: Category) {
        if text.is_empty() {
            return;
        }
        self.transcript.push(Bubble {
            speaker: Speaker::Meep,
            text,
            category: Some(category),
        });
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
