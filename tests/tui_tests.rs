use meep::commands::{Category, Command, Session};
use meep::storage::Storage;
use meep::tui::app::{App, Speaker};
use meep::tui::ui::ui;
use ratatui::{backend::TestBackend, Terminal};

fn app() -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(Storage::new(dir.path().join("meep.txt")));
    (dir, App::new(session))
}

#[test]
fn test_submit_records_both_sides() {
    let (_dir, mut app) = app();
    app.input_buffer = "todo water plants".into();
    app.submit();

    assert!(app.input_buffer.is_empty());
    let last = app.transcript.last().unwrap();
    assert_eq!(last.speaker, Speaker::Meep);
    assert_eq!(last.category, Some(Category::AddTask));
    assert!(last.text.contains("[T][ ] water plants"));
    assert_eq!(app.session.tasks.len(), 1);
}

#[test]
fn test_silent_responses_add_no_bubble() {
    let (_dir, mut app) = app();
    let before = app.transcript.len();
    app.input_buffer = "mark 4".into();
    app.submit();
    assert_eq!(app.transcript.len(), before + 1);
    assert_eq!(app.transcript.last().unwrap().speaker, Speaker::User);
}

#[test]
fn test_bye_requests_quit() {
    let (_dir, mut app) = app();
    app.input_buffer = "  bye ".into();
    app.submit();
    assert!(app.should_quit);
    assert_eq!(app.transcript.last().unwrap().category, Some(Category::Bye));
}

#[test]
fn test_help_popup_renders() {
    let (_dir, mut app) = app();
    app.toggle_help();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|f| ui(f, &mut app)).unwrap();
    let rendered: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(rendered.contains("Help"));
    assert!(rendered.contains("Here are the list of commands!"));
}

#[test]
fn test_autoload_shows_missing_file() {
    let (_dir, mut app) = app();
    app.autoload();
    let last = app.transcript.last().unwrap();
    assert_eq!(last.speaker, Speaker::Meep);
    assert_eq!(last.category, Some(Category::Load));
    assert!(last.text.contains("not found"));
    assert!(last.text.contains("Error loading tasks."));
    assert!(app.session.tasks.is_empty());
}

#[test]
fn test_autoload_restores_saved_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meep.txt");
    let mut seed = Session::new(Storage::new(path.clone()));
    seed.respond("todo water plants");
    seed.execute(Command::Save);

    let mut app = App::new(Session::new(Storage::new(path)));
    app.autoload();
    let last = app.transcript.last().unwrap();
    assert_eq!(last.category, Some(Category::Load));
    assert_eq!(last.text, "Tasks loaded successfully.");
    assert_eq!(app.session.tasks.len(), 1);
}

#[test]
fn test_blank_input_is_recorded_without_bubbles() {
    let (_dir, mut app) = app();
    let before = app.transcript.len();
    app.input_buffer = "   ".into();
    app.submit();
    assert!(app.input_buffer.is_empty());
    assert_eq!(app.transcript.len(), before);
    assert_eq!(app.session.messages.len(), 1);
    assert_eq!(app.session.messages.get(0).unwrap().text(), "   ");
}
