//! Recorded domain events, one JSON object per line.
use std::path::Path;

use eyre::WrapErr;
use reporter::DomainEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// Parse one line of a recording.
///
/// Blank lines and lines starting with `#` carry no event.
pub fn parse_line(line: &str) -> serde_json::Result<Option<DomainEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

pub type InputLines = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Open `path`, or stdin when there is none.
pub async fn open(path: Option<&Path>) -> eyre::Result<InputLines> {
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .wrap_err_with(|| format!("opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    Ok(reader.lines())
}
