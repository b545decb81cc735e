use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, Context};
use reporter::{EventsToClientReporter, ReporterConfig};
use tokio::io::AsyncWrite;
use tracing_subscriber::EnvFilter;
use transport::DapWriter;

mod input;

/// Feed recorded debugger events through the reporter and write the
/// resulting DAP events, framed, to stdout or a listening client.
#[derive(Debug, Parser)]
struct Args {
    /// JSON lines file of domain events (stdin if omitted)
    input: Option<PathBuf>,

    /// Reporter configuration (TOML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Send events to a DAP client listening on this address
    #[clap(long)]
    connect: Option<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    // stdout carries protocol frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed command line arguments");

    let config = match &args.config {
        Some(path) => ReporterConfig::load(path).wrap_err("loading reporter configuration")?,
        None => ReporterConfig::default(),
    };
    let lines = input::open(args.input.as_deref()).await?;

    match &args.connect {
        Some(addr) => {
            let (_reader, writer) = transport::connect(addr.as_str())
                .await
                .wrap_err_with(|| format!("connecting to {addr}"))?;
            replay(lines, writer, &config).await
        }
        None => replay(lines, DapWriter::new(tokio::io::stdout()), &config).await,
    }
}

async fn replay<W>(
    mut lines: input::InputLines,
    writer: DapWriter<W>,
    config: &ReporterConfig,
) -> eyre::Result<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (sender, writer) = transport::spawn_writer(writer);
    let reporter = EventsToClientReporter::for_session(sender, config);

    let mut reported = 0usize;
    let mut skipped = 0usize;
    let mut line_number = 0usize;
    while let Some(line) = lines.next_line().await.wrap_err("reading input")? {
        line_number += 1;

        let event = match input::parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "skipping unparseable line");
                skipped += 1;
                continue;
            }
        };

        let kind = event.kind();
        match reporter.report(event).await {
            Ok(()) => reported += 1,
            Err(e) => {
                tracing::warn!(line = line_number, kind, error = %e, "event not reported");
                skipped += 1;
            }
        }
    }

    reporter.end_session();
    drop(reporter);
    writer.finish().await;

    tracing::info!(reported, skipped, "replay finished");
    Ok(())
}
