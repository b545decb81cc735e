//! Rendering of exception stack traces for the debug console.
use crate::model::StackTraceLine;

pub trait StackTraceFormatter {
    /// Render `lines` as one display string. Must be deterministic.
    fn format(&self, lines: &[StackTraceLine]) -> String;
}

/// One line of output per stack trace line, `\n` terminated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStackTraceFormatter;

impl StackTraceFormatter for PlainStackTraceFormatter {
    fn format(&self, lines: &[StackTraceLine]) -> String {
        let capacity = lines.iter().map(|l| l.text.len() + 1).sum();
        lines
            .iter()
            .fold(String::with_capacity(capacity), |mut out, line| {
                out.push_str(line.text.trim_end_matches(['\r', '\n']));
                out.push('\n');
                out
            })
    }
}
