//! Integration tests for console hijacking.
//!
//! Hijacking swaps a client-backed console into the logger's slot so plain
//! console writes become log events. The default handler keeps writing to
//! the original console, so hijacked output is not fed back into itself.

use std::io::Read;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use logging::{
    Channel, ChannelPrefix, Console, ConsoleSlot, Level, LogEvent, Logger, MemoryConsole,
    WriterConsole, handler, meta,
};

fn memory_slot() -> (Arc<ConsoleSlot>, Arc<MemoryConsole>) {
    let console = Arc::new(MemoryConsole::new());
    (Arc::new(ConsoleSlot::new(console.clone())), console)
}

fn recorder(logger: &Logger) -> Arc<Mutex<Vec<LogEvent>>> {
    let events: Arc<Mutex<Vec<LogEvent>>> = Arc::default();
    let sink = Arc::clone(&events);
    logger.add_log_handler(move |event| {
        sink.lock().expect("events lock").push(event.clone());
        Ok(())
    });
    events
}

// ============================================================================
// Channel Mapping
// ============================================================================

#[test]
fn hijacked_channels_log_at_matching_levels() {
    let (slot, _original) = memory_slot();
    let logger = Logger::with_slot(Arc::clone(&slot));
    logger.set_level(Level::Debug);
    logger.set_log_handlers([]);
    let events = recorder(&logger);

    logger.hijack_console();
    for channel in Channel::ALL {
        slot.write(channel, channel.name()).expect("hijacked write");
    }
    logger.release_console();

    let levels: Vec<(String, Level)> = events
        .lock()
        .expect("events lock")
        .iter()
        .map(|event| (event.message_str().unwrap_or_default().to_owned(), event.level()))
        .collect();
    assert_eq!(
        levels,
        [
            ("log".to_owned(), Level::Debug),
            ("debug".to_owned(), Level::Debug),
            ("info".to_owned(), Level::Info),
            ("warn".to_owned(), Level::Warn),
            ("error".to_owned(), Level::Error),
        ]
    );
}

#[test]
fn hijacking_client_carries_its_context() {
    let (slot, _original) = memory_slot();
    let logger = Logger::with_slot(Arc::clone(&slot));
    logger.set_log_handlers([]);
    let events = recorder(&logger);

    logger.hijack_console_with(meta! { "source" => "console" }, ["hijacked"]);
    slot.write(Channel::Error, "from a library").expect("hijacked write");
    logger.release_console();

    let events = events.lock().expect("events lock");
    assert_eq!(events[0].tags(), ["log", "error", "hijacked"]);
    assert_eq!(events[0].meta(), &meta! { "source" => "console" });
}

#[test]
fn filtered_console_writes_are_dropped() {
    let (slot, original) = memory_slot();
    let logger = Logger::with_slot(Arc::clone(&slot));
    let events = recorder(&logger);

    logger.hijack_console();
    slot.write(Channel::Info, "chatter").expect("filtered write still succeeds");
    logger.release_console();

    assert!(events.lock().expect("events lock").is_empty());
    assert!(original.is_empty());
}

// ============================================================================
// Original Console
// ============================================================================

#[test]
fn default_handler_writes_to_original_console_while_hijacked() {
    let (slot, original) = memory_slot();
    let logger = Logger::with_slot(Arc::clone(&slot));

    logger.hijack_console();
    slot.write(Channel::Error, "disk failed").expect("hijacked write");

    let texts = original.texts(Channel::Error);
    assert_eq!(texts.len(), 1);
    let rendered: serde_json::Value = serde_json::from_str(&texts[0]).expect("rendered JSON");
    assert_eq!(rendered["message"], "disk failed");
    assert_eq!(rendered["tags"], serde_json::json!(["log", "error"]));

    logger.release_console();
}

#[test]
fn hijack_returns_replaced_console_and_release_restores_original() {
    let (slot, original) = memory_slot();
    let original_dyn: Arc<dyn Console> = original.clone();
    let logger = Logger::with_slot(Arc::clone(&slot));

    let replaced = logger.hijack_console();
    assert!(Arc::ptr_eq(&replaced, &original_dyn));
    assert!(!slot.is_current(&original_dyn));

    logger.release_console();
    assert!(slot.is_current(&original_dyn));

    slot.write(Channel::Info, "plain").expect("direct write");
    assert_eq!(original.texts(Channel::Info), ["plain"]);
}

#[test]
fn release_without_hijack_keeps_original() {
    let (slot, original) = memory_slot();
    let original_dyn: Arc<dyn Console> = original;
    let logger = Logger::with_slot(Arc::clone(&slot));

    logger.release_console();
    assert!(slot.is_current(&original_dyn));
    assert!(Arc::ptr_eq(&logger.original_console(), &original_dyn));
}

#[test]
fn handler_writing_to_hijacked_slot_gets_an_error_instead_of_deadlock() {
    let (slot, _original) = memory_slot();
    let logger = Logger::with_slot(Arc::clone(&slot));
    let inner_slot = Arc::clone(&slot);
    let outcome = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&outcome);
    logger.set_log_handlers([handler(move |_event| {
        let result = inner_slot.write(Channel::Error, "re-entrant");
        seen.lock().expect("outcome lock").replace(result.is_err());
        Ok(())
    })]);

    logger.hijack_console();
    slot.write(Channel::Error, "outer").expect("outer write");
    logger.release_console();

    assert_eq!(*outcome.lock().expect("outcome lock"), Some(true));
}

#[test]
fn writes_from_another_thread_wait_for_the_running_broadcast() {
    let (slot, _original) = memory_slot();
    let logger = Logger::with_slot(Arc::clone(&slot));
    logger.set_level(Level::Info);

    let (entered_tx, entered_rx) = mpsc::channel::<()>();
    let (started_tx, started_rx) = mpsc::channel::<()>();
    let started_rx = Mutex::new(started_rx);
    let messages: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&messages);
    logger.set_log_handlers([handler(move |event| {
        let message = event.message_str().unwrap_or_default().to_owned();
        if message == "from A" {
            entered_tx.send(()).expect("signal entered");
            started_rx
                .lock()
                .expect("started lock")
                .recv()
                .expect("second writer started");
            thread::sleep(Duration::from_millis(50));
        }
        sink.lock().expect("messages lock").push(message);
        Ok(())
    })]);

    logger.hijack_console();
    let first_slot = Arc::clone(&slot);
    let first = thread::spawn(move || first_slot.write(Channel::Error, "from A"));
    entered_rx.recv().expect("first write reached its handler");

    let second_slot = Arc::clone(&slot);
    let second = thread::spawn(move || {
        started_tx.send(()).expect("signal started");
        second_slot.write(Channel::Info, "from B")
    });

    first.join().expect("first thread").expect("first write");
    second.join().expect("second thread").expect("second write");
    logger.release_console();

    assert_eq!(*messages.lock().expect("messages lock"), ["from A", "from B"]);
}

// ============================================================================
// File Backed Original Console
// ============================================================================

#[test]
fn file_console_receives_rendered_lines() {
    let file = tempfile::tempfile().expect("temp file");
    let writer = file.try_clone().expect("clone handle");
    let console = Arc::new(WriterConsole::with_prefix(writer, ChannelPrefix::Include));
    let logger = Logger::with_slot(Arc::new(ConsoleSlot::new(console.clone())));

    logger.client().error("first").expect("emit");
    logger.client().error("second").expect("emit");
    console.flush().expect("flush");

    let mut reader = file;
    std::io::Seek::rewind(&mut reader).expect("rewind");
    let mut contents = String::new();
    reader.read_to_string(&mut contents).expect("read back");

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with("[error] {")));
    assert!(lines[1].contains(r#""message":"second""#));
}
