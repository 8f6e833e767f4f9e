//! Process-wide facade tests.
//!
//! All tests in this file share one global logger writing into a
//! [`SharedBuffer`]. Tests that log take `LOCK` so buffer contents and
//! configuration changes don't bleed between them.

use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use glogi::test_support::SharedBuffer;
use glogi::{Attr, Builder, Level, Settings, Sink};
use regex::Regex;

static LOCK: Mutex<()> = Mutex::new(());
static BUFFER: OnceLock<SharedBuffer> = OnceLock::new();

/// Install the global logger (once) and take the test lock with a clean buffer.
fn setup() -> (MutexGuard<'static, ()>, SharedBuffer) {
    let guard = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let buffer = BUFFER
        .get_or_init(|| {
            let buffer = SharedBuffer::default();
            let installed = Builder::new()
                .settings(Settings {
                    level: Some("debug".to_string()),
                    source_width: Some(24),
                    no_color: Some(true),
                    ..Settings::default()
                })
                .sink(Sink::new(buffer.clone()))
                .init();
            assert!(installed, "global logger was already initialized");
            buffer
        })
        .clone();
    buffer.clear();
    glogi::set_min_level(Level::Debug);
    glogi::disable_colors();
    (guard, buffer)
}

fn line_pattern() -> Regex {
    Regex::new(
        r"^\[\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}\] (TRACE|DEBUG|INFO |WARN |ERROR|FATAL|PANIC) \[.{24}\] .*$",
    )
    .expect("valid regex")
}

#[test]
fn lines_have_the_fixed_shape() {
    let (_guard, buffer) = setup();
    glogi::info!("server started", "port" => 8080).expect("info");
    glogi::warn!("slow query", "elapsed" => Duration::from_millis(500)).expect("warn");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    let pattern = line_pattern();
    for line in &lines {
        assert!(pattern.is_match(line), "unexpected line: {line:?}");
    }
    assert!(lines[0].ends_with("] server started port=8080"));
    assert!(lines[1].ends_with("] slow query elapsed=500ms"));
}

#[test]
fn macros_report_the_calling_line() {
    let (_guard, buffer) = setup();
    let line = line!() + 1;
    glogi::error!("boom").expect("error");

    let expected = format!("[{:<24}]", format!("global_facade.rs:{line}"));
    assert!(buffer.contents().contains(&expected), "{}", buffer.contents());
}

#[test]
fn floor_gates_records() {
    let (_guard, buffer) = setup();
    glogi::trace!("below debug").expect("trace");
    assert!(buffer.is_empty());

    glogi::set_level("error");
    assert!(!glogi::enabled(Level::Warn));
    glogi::warn!("suppressed").expect("warn");
    glogi::error!("kept").expect("error");
    assert_eq!(buffer.lines().len(), 1);

    glogi::set_level("nonsense");
    assert!(glogi::enabled(Level::Info));
    assert!(!glogi::enabled(Level::Debug));
}

#[test]
fn gated_macros_do_not_evaluate_attribute_values() {
    let (_guard, buffer) = setup();
    glogi::set_min_level(Level::Error);
    let mut evaluated = false;
    glogi::info!("quiet", "value" => {
        evaluated = true;
        1
    })
    .expect("info");
    assert!(!evaluated);
    assert!(buffer.is_empty());
}

#[test]
fn colors_follow_the_setters() {
    let (_guard, buffer) = setup();
    glogi::enable_colors();
    glogi::set_color_info("magenta");
    glogi::set_color_source("none");
    glogi::info!("painted").expect("info");
    let colored = buffer.contents();
    assert!(colored.contains("\x1b[35mINFO "), "{colored:?}");
    assert!(colored.contains("\x1b[35mpainted\x1b[0m"), "{colored:?}");

    buffer.clear();
    glogi::disable_colors();
    glogi::info!("plain").expect("info");
    assert!(!buffer.contents().contains('\x1b'));

    glogi::set_color_info("none");
    glogi::set_color_source("green");
}

#[test]
fn source_width_changes_apply_to_later_lines() {
    let (_guard, buffer) = setup();
    glogi::set_source_width(8);
    glogi::info!("narrow").expect("info");
    glogi::set_source_width(0);
    glogi::info!("still narrow").expect("info");
    glogi::set_source_width(24);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    let narrow = Regex::new(r"^\[[^\]]+\] INFO  \[.{8}\] ").expect("valid regex");
    assert!(narrow.is_match(&lines[0]), "{}", lines[0]);
    assert!(narrow.is_match(&lines[1]), "{}", lines[1]);
}

#[test]
fn derived_loggers_append_bound_attributes() {
    let (_guard, buffer) = setup();
    let request = glogi::with([Attr::new("c", 3)]);
    request
        .info("handled", &[Attr::new("a", 1), Attr::new("b", 2)])
        .expect("info");
    glogi::info!("root").expect("info");

    let lines = buffer.lines();
    assert!(lines[0].ends_with("] handled a=1 b=2 c=3"));
    assert!(lines[1].ends_with("] root"));
}

#[test]
fn recover_turns_an_abort_into_a_record() {
    let (_guard, buffer) = setup();
    let outcome: Option<()> =
        glogi::recover(|| Err(glogi::panic_log!("bad state", "id" => 7))).expect("recover");
    assert!(outcome.is_none());
    glogi::info!("after recovery").expect("info");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("] PANIC ["));
    assert!(lines[0].ends_with("] bad state id=7"));
    assert!(lines[1].contains("recovered: bad state stack="));
    assert!(lines[2].ends_with("] after recovery"));
}

#[test]
fn recover_returns_scope_values() {
    let (_guard, buffer) = setup();
    assert_eq!(glogi::recover(|| Ok("done")).expect("recover"), Some("done"));
    assert!(buffer.is_empty());
}

#[test]
fn later_init_calls_are_ignored() {
    let (_guard, _buffer) = setup();
    assert!(glogi::is_initialized());
    let replaced = Builder::new()
        .settings(Settings {
            source_width: Some(5),
            ..Settings::default()
        })
        .init();
    assert!(!replaced);
    assert_eq!(glogi::global().config().snapshot().source_width, 24);
}
