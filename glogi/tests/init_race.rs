//! Concurrent first initialization: exactly one configuration wins.

use std::sync::Barrier;
use std::thread;

use glogi::test_support::SharedBuffer;
use glogi::{Builder, Settings, Sink};
use regex::Regex;

#[test]
fn exactly_one_concurrent_init_wins() {
    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);
    let buffer = SharedBuffer::default();

    let results: Vec<(usize, bool)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|index| {
                let barrier = &barrier;
                let buffer = buffer.clone();
                scope.spawn(move || {
                    let builder = Builder::new()
                        .settings(Settings {
                            source_width: Some(10 + index as i64),
                            no_color: Some(true),
                            ..Settings::default()
                        })
                        .sink(Sink::new(buffer));
                    barrier.wait();
                    (index, builder.init())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("init thread"))
            .collect()
    });

    let winners: Vec<usize> = results
        .iter()
        .filter(|(_, won)| *won)
        .map(|(index, _)| *index)
        .collect();
    assert_eq!(winners.len(), 1, "results: {results:?}");

    let width = glogi::global().config().snapshot().source_width;
    assert_eq!(width, 10 + winners[0]);

    glogi::info!("after race").expect("info");
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let column = Regex::new(r"\] INFO  \[([^\]]*)\] after race$").expect("valid regex");
    let captures = column.captures(&lines[0]).expect("line shape");
    assert_eq!(captures[1].chars().count(), width);
}
