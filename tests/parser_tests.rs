use meep::commands::{Category, Command, Session};
use meep::error::ParseError;
use meep::parser::{parse, parse_quiet, Parsed};
use meep::storage::Storage;
use tempfile::TempDir;

fn session() -> (TempDir, Session) {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(Storage::new(dir.path().join("meep.txt")));
    (dir, session)
}

fn command(session: &mut Session, line: &str) -> Command {
    match parse(session, line) {
        Parsed::Command(c) => c,
        Parsed::Reply(r) => panic!("expected a command for {:?}, got reply {:?}", line, r),
    }
}

#[test]
fn test_fixed_phrases() {
    let (_dir, mut s) = session();
    assert_eq!(command(&mut s, "hello"), Command::Hello);
    assert_eq!(command(&mut s, "how are you?"), Command::HowAreYou);
    assert_eq!(command(&mut s, "list messages"), Command::ListMessages);
    assert_eq!(command(&mut s, "list"), Command::ListTasks);
    assert_eq!(command(&mut s, "help"), Command::Help);
    assert_eq!(command(&mut s, "bye"), Command::Bye);
}

#[test]
fn test_prefix_dispatch() {
    let (_dir, mut s) = session();
    assert_eq!(command(&mut s, "mark 2"), Command::Mark(2));
    assert_eq!(command(&mut s, "unmark 3"), Command::Unmark(3));
    assert_eq!(command(&mut s, "delete 1"), Command::Delete(1));
    assert_eq!(command(&mut s, "todo buy milk"), Command::AddTask("todo buy milk".into()));
    assert_eq!(command(&mut s, "deadline x /by 2025-01-01"), Command::AddTask("deadline x /by 2025-01-01".into()));
    assert_eq!(command(&mut s, "event"), Command::AddTask("event".into()));
    assert_eq!(command(&mut s, "save"), Command::Save);
    assert_eq!(command(&mut s, "load"), Command::Load);
    assert_eq!(command(&mut s, "check due 2025-12-31"), Command::CheckDue("2025-12-31".into()));
    assert_eq!(command(&mut s, "check due"), Command::CheckDue("".into()));
    assert_eq!(command(&mut s, "find milk carton"), Command::Find("milk carton".into()));
    assert_eq!(command(&mut s, "flurb 123"), Command::Unknown("flurb 123".into()));
    assert_eq!(command(&mut s, "Hello"), Command::Unknown("Hello".into()));
}

#[test]
fn test_negative_task_number_is_still_a_command() {
    let (_dir, mut s) = session();
    assert_eq!(command(&mut s, "mark -1"), Command::Mark(-1));
}

#[test]
fn test_non_numeric_task_number_replies_directly() {
    let (_dir, mut s) = session();
    s.tasks.push(meep::models::Task::todo("x").unwrap());
    for line in ["mark abc", "unmark 1.5", "delete ", "mark"] {
        let parsed = parse(&mut s, line);
        if line == "mark" {
            assert_eq!(parsed, Parsed::Command(Command::Unknown("mark".into())));
        } else {
            assert_eq!(parsed, Parsed::Reply("Invalid task number.".into()));
        }
    }
    assert_eq!(s.tasks.len(), 1);
    assert!(!s.tasks.get(0).unwrap().is_completed());
}

#[test]
fn test_every_line_is_recorded() {
    let (_dir, mut s) = session();
    parse(&mut s, "hello");
    parse(&mut s, "mark abc");
    parse(&mut s, "gibberish");
    let texts: Vec<&str> = s.messages.iter().map(|m| m.text()).collect();
    assert_eq!(texts, vec!["hello", "mark abc", "gibberish"]);
}

#[test]
fn test_parse_routes_mark_to_the_right_task() {
    let (_dir, mut s) = session();
    for d in ["a", "b", "c"] {
        command(&mut s, &format!("todo {}", d)).execute(&mut s);
    }
    command(&mut s, "mark 2").execute(&mut s);
    let done: Vec<bool> = s.tasks.iter().map(|t| t.is_completed()).collect();
    assert_eq!(done, vec![false, true, false]);
}

#[test]
fn test_quiet_parse_propagates_number_errors() {
    let (_dir, mut s) = session();
    assert_eq!(
        parse_quiet(&mut s, "mark abc"),
        Err(ParseError::InvalidTaskNumber("mark abc".into()))
    );
    assert_eq!(s.messages.len(), 1);
}

#[test]
fn test_quiet_parse_normalizes_whitespace() {
    let (_dir, mut s) = session();
    assert_eq!(parse_quiet(&mut s, "   find    abc   "), Ok(Command::Find("abc".into())));
    assert_eq!(parse_quiet(&mut s, "  hello "), Ok(Command::Hello));
    assert_eq!(parse_quiet(&mut s, "mark   2"), Ok(Command::Mark(2)));
    assert_eq!(s.messages.get(0).unwrap().text(), "   find    abc   ");
}

#[test]
fn test_quiet_parse_builds_without_side_effects_beyond_recording() {
    let (_dir, mut s) = session();
    let c = parse_quiet(&mut s, "todo quiet").unwrap();
    assert_eq!(c.category(), Category::AddTask);
    assert!(s.tasks.is_empty());
}
