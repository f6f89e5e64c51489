use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use mono_parser_core::{Action, ActionSink, OutputParser, ParseError};
use mono_term::{Options, Session, Transcript, Utf8Decoder};

pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interprets terminal output and shows the resulting actions", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Feed a captured output stream through the parser and print the actions
    Replay {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Bytes per parser call, defaults to the configured read buffer size
        #[arg(long, value_name = "N")]
        chunk_size: Option<usize>,

        /// Print one JSON object per action
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a command and print what its output did to the screen
    Run {
        /// Command and arguments, defaults to the configured shell
        #[arg(last = true, value_name = "COMMAND")]
        command: Vec<String>,
    },
}

struct ReplaySink<W: Write> {
    out: W,
    json: bool,
    print_diagnostics: bool,
    error: Option<io::Error>,
}

impl<W: Write> ReplaySink<W> {
    fn write_action(&mut self, action: &Action) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(action).map_err(io::Error::other)?;
            writeln!(self.out, "{line}")
        } else {
            writeln!(self.out, "{action:?}")
        }
    }
}

impl<W: Write> ActionSink for ReplaySink<W> {
    fn emit(&mut self, action: Action) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_action(&action) {
            self.error = Some(err);
        }
    }

    fn report_error(&mut self, error: ParseError) {
        if self.print_diagnostics {
            eprintln!("{:?}: {error}", error.level());
        } else {
            log::debug!("{error}");
        }
    }
}

fn init_logging(options: &Options) -> Option<LoggerHandle> {
    let logger = match Logger::try_with_env_or_str(&options.log_spec) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Invalid log specification '{}': {err}", options.log_spec);
            return None;
        }
    };

    let started = match Options::get_log_dir().filter(|_| options.log_to_file) {
        Some(log_dir) => logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("mono").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .create_symlink(log_dir.join("mono.log"))
            .duplicate_to_stderr(Duplicate::Warn)
            .start(),
        None => logger.log_to_stderr().start(),
    };

    match started {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn replay(path: &Path, chunk_size: usize, json: bool, options: &Options) -> Res<()> {
    let data = fs::read(path)?;
    log::info!("replaying {} bytes from {} in chunks of {chunk_size}", data.len(), path.display());

    let mut parser = OutputParser::new();
    let mut decoder = Utf8Decoder::new();
    let mut sink = ReplaySink {
        out: io::BufWriter::new(io::stdout().lock()),
        json,
        print_diagnostics: options.print_diagnostics,
        error: None,
    };

    for chunk in data.chunks(chunk_size.max(1)) {
        let text = decoder.decode(chunk);
        parser.feed(&text, &mut sink);
    }
    if let Some(ch) = decoder.finish() {
        parser.feed(ch.encode_utf8(&mut [0; 4]), &mut sink);
    }
    if parser.is_in_escape_sequence() {
        log::warn!("input ends inside an unterminated sequence: {:?}", parser.pending());
    }

    if let Some(err) = sink.error.take() {
        return Err(err.into());
    }
    sink.out.flush()?;
    Ok(())
}

fn run_command(command: &[String], options: &Options) -> Res<()> {
    let (program, args) = match command.split_first() {
        Some((program, args)) => (program.as_str(), args),
        None => (options.shell.as_str(), &[][..]),
    };
    log::info!("running {program} {args:?}");

    let mut child = Command::new(program).args(args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::inherit()).spawn()?;
    let Some(stdout) = child.stdout.take() else {
        return Err("child process has no stdout".into());
    };

    let mut session = Session::spawn(stdout, options.read_buffer_size)?;
    let mut transcript = Transcript::new();
    session.run_into(&mut transcript)?;
    let status = child.wait()?;
    log::info!("{program} exited with {status}");

    println!("{}", transcript.text());
    if let Some(title) = &transcript.title {
        println!("title: {title}");
    }
    if let Some(cwd) = &transcript.cwd {
        println!("cwd: {cwd}");
    }
    if !status.success() {
        eprintln!("{program} exited with {status}");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let options = match Options::load_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error loading options, using defaults: {err}");
            Options::default()
        }
    };
    let _logger = init_logging(&options);
    log::info!("Starting mono {}", env!("CARGO_PKG_VERSION"));

    if Options::get_options_file().is_some_and(|file| !file.exists()) {
        if let Err(err) = options.store_options() {
            log::warn!("Can't write default options: {err}");
        }
    }

    let result = match &args.command {
        Commands::Replay { file, chunk_size, json } => replay(file, chunk_size.unwrap_or(options.read_buffer_size), *json, &options),
        Commands::Run { command } => run_command(command, &options),
    };

    if let Err(err) = result {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
