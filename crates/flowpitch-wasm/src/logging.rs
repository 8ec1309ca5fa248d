//! Console logging
//!
//! Routes `tracing` events to the browser console. Each event is buffered and
//! emitted as one console call when the writer is dropped, at a console level
//! matching the event level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Browser console method an event is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
}

impl ConsoleLevel {
    fn of(level: &Level) -> Self {
        match *level {
            Level::ERROR => ConsoleLevel::Error,
            Level::WARN => ConsoleLevel::Warn,
            _ => ConsoleLevel::Log,
        }
    }
}

type Emit = fn(ConsoleLevel, &str);

fn emit_to_console(level: ConsoleLevel, line: &str) {
    let value = JsValue::from_str(line);
    match level {
        ConsoleLevel::Log => web_sys::console::log_1(&value),
        ConsoleLevel::Warn => web_sys::console::warn_1(&value),
        ConsoleLevel::Error => web_sys::console::error_1(&value),
    }
}

/// Buffers one formatted event
pub struct ConsoleWriter {
    level: ConsoleLevel,
    buffer: Vec<u8>,
    emit: Emit,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if !line.is_empty() {
            (self.emit)(self.level, line);
        }
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// [`MakeWriter`] for the browser console
#[derive(Clone, Copy)]
pub struct ConsoleMakeWriter {
    emit: Emit,
}

impl Default for ConsoleMakeWriter {
    fn default() -> Self {
        Self {
            emit: emit_to_console,
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: ConsoleLevel::Log,
            buffer: Vec::new(),
            emit: self.emit,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: ConsoleLevel::of(meta.level()),
            buffer: Vec::new(),
            emit: self.emit,
        }
    }
}

/// Install the console subscriber. Later calls are no-ops.
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_writer(ConsoleMakeWriter::default())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;

    thread_local! {
        static LINES: RefCell<Vec<(ConsoleLevel, String)>> = const { RefCell::new(Vec::new()) };
    }

    fn capture(level: ConsoleLevel, line: &str) {
        LINES.with(|lines| lines.borrow_mut().push((level, line.to_string())));
    }

    fn take_lines() -> Vec<(ConsoleLevel, String)> {
        LINES.with(|lines| lines.borrow_mut().drain(..).collect())
    }

    #[test]
    fn test_one_console_call_per_event() {
        let make = ConsoleMakeWriter { emit: capture };
        {
            let mut writer = make.make_writer();
            write!(writer, "INFO ").unwrap();
            writeln!(writer, "deck loaded slides=3").unwrap();
        }

        assert_eq!(
            take_lines(),
            vec![(ConsoleLevel::Log, "INFO deck loaded slides=3".to_string())]
        );
    }

    #[test]
    fn test_empty_event_not_emitted() {
        let make = ConsoleMakeWriter { emit: capture };
        drop(make.make_writer());
        assert!(take_lines().is_empty());
    }

    #[test]
    fn test_console_level_mapping() {
        assert_eq!(ConsoleLevel::of(&Level::ERROR), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::of(&Level::WARN), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::of(&Level::INFO), ConsoleLevel::Log);
        assert_eq!(ConsoleLevel::of(&Level::TRACE), ConsoleLevel::Log);
    }
}
