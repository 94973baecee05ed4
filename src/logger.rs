/// Thread-safe leveled console logger.
///
/// All diagnostic output from the processing stages goes through one
/// `ConsoleOutput` instance. Worker threads may publish concurrently; a single
/// mutex serializes the stdout writes so lines never interleave.
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use colored::Colorize;

/// Severity of a published message. `Other` is the fallback decoration for
/// messages with no meaningful level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Debug,
    Warning,
    Info,
    Other,
}

/// A console sink that renders `[level] <publisher> message` lines.
///
/// Constructed once at startup and passed by reference to whatever needs to
/// log. Publishing cannot fail: a poisoned lock is absorbed and stdout writes
/// are assumed to succeed.
pub struct ConsoleOutput {
    mtx: Mutex<()>,
}

impl ConsoleOutput {
    pub fn new() -> ConsoleOutput {
        ConsoleOutput { mtx: Mutex::new(()) }
    }

    /// Render the message with its level decoration, write it to stdout under
    /// the logger's lock, and return the exact rendered text.
    ///
    /// # Arguments
    /// - `level`: Severity of the message.
    /// - `publisher`: A short tag naming the logical source of the message.
    /// - `message`: The message text.
    ///
    /// # Returns
    /// The rendered line, including the trailing newline.
    pub fn publish(&self, level: LogLevel, publisher: &str, message: &str) -> String {
        let tag = match level {
            LogLevel::Error => "[error]".red().to_string(),
            LogLevel::Debug => "[debug]".green().to_string(),
            LogLevel::Warning => "[warn] ".yellow().to_string(),
            LogLevel::Info => "[info] ".to_string(),
            LogLevel::Other => "[-]".to_string(),
        };
        let rendered = format!("{} {} {}\n", tag, format!("<{}>", publisher).cyan(), message);

        // One line per lock acquisition. Callers block until the lock is
        // free; there is no queueing.
        let _guard = self.mtx.lock().unwrap_or_else(PoisonError::into_inner);
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(rendered.as_bytes());
        let _ = stdout.flush();

        rendered
    }

    pub fn error(&self, publisher: &str, message: &str) -> String {
        self.publish(LogLevel::Error, publisher, message)
    }

    pub fn debug(&self, publisher: &str, message: &str) -> String {
        self.publish(LogLevel::Debug, publisher, message)
    }

    pub fn warn(&self, publisher: &str, message: &str) -> String {
        self.publish(LogLevel::Warning, publisher, message)
    }

    pub fn info(&self, publisher: &str, message: &str) -> String {
        self.publish(LogLevel::Info, publisher, message)
    }

    /// Publish the current contents of `message` and clear the buffer.
    ///
    /// Callers that accumulate a line piecewise hand the buffer over here; it
    /// comes back empty, ready for the next line.
    pub fn publish_buf(&self, level: LogLevel, publisher: &str, message: &mut String) -> String {
        let rendered = self.publish(level, publisher, message);
        message.clear();
        rendered
    }

    pub fn error_buf(&self, publisher: &str, message: &mut String) -> String {
        self.publish_buf(LogLevel::Error, publisher, message)
    }

    pub fn debug_buf(&self, publisher: &str, message: &mut String) -> String {
        self.publish_buf(LogLevel::Debug, publisher, message)
    }

    pub fn warn_buf(&self, publisher: &str, message: &mut String) -> String {
        self.publish_buf(LogLevel::Warning, publisher, message)
    }

    pub fn info_buf(&self, publisher: &str, message: &mut String) -> String {
        self.publish_buf(LogLevel::Info, publisher, message)
    }
}

impl Default for ConsoleOutput {
    fn default() -> ConsoleOutput {
        ConsoleOutput::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ConsoleOutput, LogLevel};

    fn plain_logger() -> ConsoleOutput {
        // Fixed rendering regardless of whether the test runner is a tty.
        colored::control::set_override(false);
        ConsoleOutput::new()
    }

    #[test]
    fn test_publish_rendering() {
        let log = plain_logger();

        assert_eq!(
            log.publish(LogLevel::Error, "parser", "boom"),
            "[error] <parser> boom\n"
        );
        assert_eq!(
            log.publish(LogLevel::Debug, "stats", "pass 1"),
            "[debug] <stats> pass 1\n"
        );
        assert_eq!(
            log.publish(LogLevel::Warning, "roi", "clamped"),
            "[warn]  <roi> clamped\n"
        );
        assert_eq!(log.publish(LogLevel::Info, "cli", "ready"), "[info]  <cli> ready\n");
        assert_eq!(log.publish(LogLevel::Other, "cli", "?"), "[-] <cli> ?\n");
    }

    #[test]
    fn test_convenience_levels() {
        let log = plain_logger();

        assert_eq!(log.error("a", "m"), log.publish(LogLevel::Error, "a", "m"));
        assert_eq!(log.debug("a", "m"), log.publish(LogLevel::Debug, "a", "m"));
        assert_eq!(log.warn("a", "m"), log.publish(LogLevel::Warning, "a", "m"));
        assert_eq!(log.info("a", "m"), log.publish(LogLevel::Info, "a", "m"));
    }

    #[test]
    fn test_buffer_is_drained() {
        let log = plain_logger();

        let mut buf = String::from("histogram range invalid");
        let rendered = log.warn_buf("histogram", &mut buf);

        assert!(rendered.contains("histogram range invalid"));
        assert!(buf.is_empty());

        // Draining an already-empty buffer still renders a (bodyless) line.
        let rendered = log.info_buf("histogram", &mut buf);
        assert!(rendered.ends_with('\n'));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_concurrent_publish() {
        let log = Arc::new(plain_logger());

        let n_threads = 8;
        let n_messages = 50;

        let handles = (0..n_threads)
            .map(|thread_nr| {
                let log = log.clone();
                std::thread::spawn(move || {
                    (0..n_messages)
                        .map(|i| log.info("worker", &format!("t{} m{}", thread_nr, i)))
                        .collect::<Vec<String>>()
                })
            })
            .collect::<Vec<_>>();

        let mut lines = Vec::new();
        for handle in handles {
            lines.extend(handle.join().unwrap());
        }

        // One complete line per call, every one newline-terminated and whole.
        assert_eq!(lines.len(), n_threads * n_messages);
        for line in &lines {
            assert_eq!(line.matches('\n').count(), 1);
            assert!(line.ends_with('\n'));
            assert!(line.starts_with("[info]  <worker> t"));
        }
    }
}
