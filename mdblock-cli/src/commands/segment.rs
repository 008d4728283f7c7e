//! Segment command implementation

use crate::config::CliConfig;
use crate::input::{expand_pattern, sse, FileReader, SourceKind, STDIN_MARKER};
use crate::output::{FormatterSink, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use mdblock_core::{DisplayMathPolicy, RuleKind};
use mdblock_engine::{
    ChunkedText, EndOfStream, PacedSink, PumpStats, QueuedPump, StreamPump, UnitSink,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files or patterns (supports glob); `-` reads stdin
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How input files are turned into deltas
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Characters per delta when replaying plain text
    #[arg(long, value_name = "N")]
    pub delta_chars: Option<usize>,

    /// Display math policy: any-pair or standalone
    #[arg(long, value_name = "POLICY")]
    pub display_math: Option<DisplayMathPolicy>,

    /// Rule evaluation order, comma separated
    #[arg(long, value_name = "RULE", value_delimiter = ',')]
    pub rules: Option<Vec<RuleKind>>,

    /// What to do with leftover text: flush or discard
    #[arg(long, value_name = "POLICY")]
    pub end_of_stream: Option<EndOfStream>,

    /// Render on a worker thread behind a queue
    #[arg(long)]
    pub queued: bool,

    /// Rewrite `$x$` spans as `$$x$$`
    #[arg(long)]
    pub normalize_math: bool,

    /// Per-character delay for plain-text units, in milliseconds
    ///
    /// Given without a value, the default typing pace is used.
    #[arg(long, value_name = "MS", num_args = 0..=1)]
    pub pace_ms: Option<Option<u64>>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One input stream
#[derive(Debug, Clone, PartialEq)]
enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            InputSource::Stdin => FileReader::read_stdin(),
            InputSource::File(path) => FileReader::read_text(path),
        }
    }
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let config = self.resolve_config()?;
        let inputs = self.resolve_inputs()?;

        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };
        let formatter = config
            .output
            .format
            .formatter(writer, config.output.pretty_json);
        let mut sink = PacedSink::new(
            FormatterSink::new(formatter, config.output.normalize_math),
            Duration::from_millis(config.stream.pace_ms),
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_streams(inputs.len() as u64);

        for input in &inputs {
            let name = input.name();
            let text = input.read()?;
            let before = sink_units(&sink);

            let (returned, stats) = match config.stream.source {
                SourceKind::Text => pump_stream(
                    &config,
                    sink,
                    ChunkedText::new(&text, config.stream.delta_chars),
                ),
                SourceKind::Sse => {
                    let deltas = sse::deltas(&text)
                        .with_context(|| format!("Failed to read event stream: {}", name))?;
                    pump_stream(&config, sink, deltas)
                }
            }
            .with_context(|| format!("Failed to segment {}", name))?;
            sink = returned;

            log::info!(
                "{}: {} deltas, {} units, {} bytes dropped",
                name,
                stats.deltas,
                stats.units_emitted,
                stats.bytes_dropped
            );
            progress.stream_completed(&name, sink_units(&sink) - before);
        }

        let total = sink.into_inner().finish()?;
        progress.finish();
        log::info!("Wrote {} units from {} streams", total, inputs.len());

        Ok(())
    }

    /// Merge the config file with command-line overrides
    fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(source) = self.source {
            config.stream.source = source;
        }
        if let Some(delta_chars) = self.delta_chars {
            config.stream.delta_chars = delta_chars;
        }
        if let Some(policy) = self.display_math {
            config.segmenter.display_math = policy;
        }
        if let Some(rules) = &self.rules {
            config.segmenter.rules = rules.clone();
        }
        if let Some(policy) = self.end_of_stream {
            config.stream.end_of_stream = policy;
        }
        if let Some(pace_ms) = self.pace_ms {
            config.stream.pace_ms = pace_ms.unwrap_or_else(default_pace_ms);
        }
        config.stream.queued |= self.queued;
        config.output.normalize_math |= self.normalize_math;

        config.validate()?;
        Ok(config)
    }

    /// Inputs in command-line order; each file is read once
    fn resolve_inputs(&self) -> Result<Vec<InputSource>> {
        let mut inputs = Vec::new();
        for pattern in &self.input {
            let matched = if pattern == STDIN_MARKER {
                vec![InputSource::Stdin]
            } else {
                expand_pattern(pattern)?
                    .into_iter()
                    .map(InputSource::File)
                    .collect()
            };
            for input in matched {
                if !inputs.contains(&input) {
                    inputs.push(input);
                }
            }
        }
        Ok(inputs)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run from tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

fn default_pace_ms() -> u64 {
    let delay = PacedSink::<FormatterSink>::DEFAULT_DELAY;
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

fn sink_units(sink: &PacedSink<FormatterSink>) -> usize {
    sink.inner().units()
}

/// Run one stream through the configured pump architecture
fn pump_stream<S, I, T>(config: &CliConfig, mut sink: S, deltas: I) -> Result<(S, PumpStats)>
where
    S: UnitSink + Send + 'static,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let pump_config = config.pump_config();

    if config.stream.queued {
        let mut pump = QueuedPump::spawn(pump_config, sink)?;
        for delta in deltas {
            pump.append(delta.as_ref())?;
        }
        let finished = pump.finish()?;
        Ok((finished.sink, finished.stats))
    } else {
        let stats = StreamPump::with_config(pump_config, &mut sink)?.run(deltas)?;
        Ok((sink, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mdblock_core::RenderableUnit;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: SegmentArgs,
    }

    fn parse(argv: &[&str]) -> SegmentArgs {
        Harness::parse_from(std::iter::once("mdblock").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "-i",
            "a.md",
            "--display-math",
            "standalone",
            "--rules",
            "image,paragraph",
            "--end-of-stream",
            "discard",
            "--delta-chars",
            "16",
            "--queued",
        ]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.segmenter.display_math, DisplayMathPolicy::Standalone);
        assert_eq!(config.segmenter.rules, [RuleKind::Image, RuleKind::Paragraph]);
        assert_eq!(config.stream.end_of_stream, EndOfStream::Discard);
        assert_eq!(config.stream.delta_chars, 16);
        assert!(config.stream.queued);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let args = parse(&["-i", "a.md", "--delta-chars", "0"]);
        assert!(args.resolve_config().is_err());

        let args = parse(&["-i", "a.md", "--rules", "table,table"]);
        assert!(args.resolve_config().is_err());

        let result =
            Harness::try_parse_from(["mdblock", "-i", "a.md", "--display-math", "inline"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stdin_marker() {
        let args = parse(&["-i", "-"]);
        assert_eq!(args.resolve_inputs().unwrap(), [InputSource::Stdin]);
    }

    #[test]
    fn test_inputs_keep_command_line_order() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let b = temp_dir.path().join("b.md");
        let a = temp_dir.path().join("a.md");
        std::fs::write(&b, "b").unwrap();
        std::fs::write(&a, "a").unwrap();

        let (b_arg, a_arg) = (b.display().to_string(), a.display().to_string());
        let args = parse(&[
            "-i",
            b_arg.as_str(),
            "-i",
            "-",
            "-i",
            a_arg.as_str(),
            "-i",
            b_arg.as_str(),
        ]);
        assert_eq!(
            args.resolve_inputs().unwrap(),
            [InputSource::File(b), InputSource::Stdin, InputSource::File(a)]
        );
    }

    #[test]
    fn test_unmatched_input_reports_pattern() {
        let args = parse(&["-i", "/nonexistent/dir/*.md"]);
        let err = args.resolve_inputs().unwrap_err();
        assert_eq!(err.to_string(), "No files found matching: /nonexistent/dir/*.md");
    }

    #[test]
    fn test_pace_flag() {
        let config = parse(&["-i", "a.md"]).resolve_config().unwrap();
        assert_eq!(config.stream.pace_ms, 0);

        let config = parse(&["-i", "a.md", "--pace-ms", "5"]).resolve_config().unwrap();
        assert_eq!(config.stream.pace_ms, 5);

        let config = parse(&["-i", "a.md", "--pace-ms"]).resolve_config().unwrap();
        assert_eq!(config.stream.pace_ms, 20);
    }

    #[test]
    fn test_pump_stream_both_architectures() {
        let text = "One.\n\nTwo $x$ here.\nrest";
        for queued in [false, true] {
            let mut config = CliConfig::default();
            config.stream.queued = queued;

            let sink: Vec<RenderableUnit> = Vec::new();
            let (units, stats) = pump_stream(&config, sink, ChunkedText::new(text, 3)).unwrap();
            let texts: Vec<&str> = units.iter().map(|u| u.text()).collect();
            assert_eq!(texts, ["One.\n\n", "Two $x$ here.\n", "rest"]);
            assert!(stats.flushed);
        }
    }
}
