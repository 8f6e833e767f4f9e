//! Record handlers.
//!
//! A [`Handler`] decides whether a level is enabled and turns records into
//! output. [`ColoredHandler`] is the console implementation: it renders with
//! [`crate::format::render`] against the current configuration snapshot and
//! writes the line to its [`Sink`].

use std::io;
use std::sync::Arc;

use crate::config::ConfigStore;
use crate::format::render;
use crate::level::{Level, LevelVar};
use crate::record::Record;
use crate::sink::Sink;
use crate::value::Attr;

pub trait Handler: Send + Sync {
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: &Record) -> io::Result<()>;

    /// A new handler that appends `attrs` to every record it handles.
    ///
    /// `self` is left untouched; both handlers stay usable concurrently.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;
}

#[derive(Debug, Clone)]
pub struct ColoredHandler {
    level: Arc<LevelVar>,
    config: Arc<ConfigStore>,
    sink: Sink,
    attrs: Arc<[Attr]>,
}

impl ColoredHandler {
    pub fn new(sink: Sink, level: Arc<LevelVar>, config: Arc<ConfigStore>) -> Self {
        Self {
            level,
            config,
            sink,
            attrs: Arc::from(Vec::new()),
        }
    }

    pub fn bound_attrs(&self) -> &[Attr] {
        &self.attrs
    }
}

impl Handler for ColoredHandler {
    fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    fn handle(&self, record: &Record) -> io::Result<()> {
        let config = self.config.snapshot();
        let line = render(record, &self.attrs, &config);
        self.sink.write_line(&line)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let combined: Vec<Attr> = self.attrs.iter().cloned().chain(attrs).collect();
        Arc::new(Self {
            attrs: Arc::from(combined),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::record::CallSite;
    use crate::test_support::{FailingWriter, SharedBuffer};

    fn handler(buffer: &SharedBuffer, level: Level) -> ColoredHandler {
        let config = Arc::new(ConfigStore::default());
        config.disable_colors();
        ColoredHandler::new(
            Sink::new(buffer.clone()),
            Arc::new(LevelVar::new(level)),
            config,
        )
    }

    #[test]
    fn enabled_follows_shared_level() {
        let buffer = SharedBuffer::default();
        let level = Arc::new(LevelVar::new(Level::Warn));
        let handler = ColoredHandler::new(
            Sink::new(buffer.clone()),
            Arc::clone(&level),
            Arc::new(ConfigStore::default()),
        );
        assert!(!handler.enabled(Level::Info));
        level.set(Level::Debug);
        assert!(handler.enabled(Level::Info));
    }

    #[test]
    fn handle_writes_exactly_one_line() {
        let buffer = SharedBuffer::default();
        let handler = handler(&buffer, Level::Info);
        let record = Record::new(Level::Info, "hello").with_call_site(CallSite::new("a.rs", 1));
        handler.handle(&record).expect("handle");
        let contents = buffer.contents();
        assert_eq!(contents.matches('\n').count(), 1);
        assert!(contents.ends_with(" hello\n"));
    }

    #[test]
    fn derived_handlers_do_not_share_additions() {
        let buffer = SharedBuffer::default();
        let parent = handler(&buffer, Level::Info);
        let child = parent.with_attrs(vec![Attr::new("c", "3")]);
        let sibling = parent.with_attrs(vec![Attr::new("s", "9")]);
        let grandchild = child.with_attrs(vec![Attr::new("d", "4")]);

        let record = Record::new(Level::Info, "m").with_attrs([Attr::new("a", "1")]);
        parent.handle(&record).expect("parent");
        child.handle(&record).expect("child");
        sibling.handle(&record).expect("sibling");
        grandchild.handle(&record).expect("grandchild");

        let lines = buffer.lines();
        assert!(lines[0].ends_with(" m a=1"));
        assert!(lines[1].ends_with(" m a=1 c=3"));
        assert!(lines[2].ends_with(" m a=1 s=9"));
        assert!(lines[3].ends_with(" m a=1 c=3 d=4"));
        assert!(parent.bound_attrs().is_empty());
    }

    #[test]
    fn derived_handlers_work_across_threads() {
        let buffer = SharedBuffer::default();
        let parent: Arc<dyn Handler> = Arc::new(handler(&buffer, Level::Info));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let derived = parent.with_attrs(vec![Attr::new("worker", i)]);
                thread::spawn(move || {
                    derived
                        .handle(&Record::new(Level::Info, "tick"))
                        .expect("handle");
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("join");
        }
        let mut workers: Vec<String> = buffer
            .lines()
            .iter()
            .map(|line| line.rsplit("worker=").next().unwrap_or_default().to_string())
            .collect();
        workers.sort();
        assert_eq!(workers, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn write_failure_is_returned() {
        let handler = ColoredHandler::new(
            Sink::new(FailingWriter),
            Arc::new(LevelVar::default()),
            Arc::new(ConfigStore::default()),
        );
        let err = handler
            .handle(&Record::new(Level::Error, "x"))
            .expect_err("should fail");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
