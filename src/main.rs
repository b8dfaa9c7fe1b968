use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lispy::interpreter::{parse_code, Interpreter};
use lispy::Value;

/// A small Scheme-flavored interpreter.
#[derive(Parser)]
#[command(name = "lispy", version, about)]
struct Args {
    /// Program file to run; starts a REPL when omitted
    file: Option<PathBuf>,

    /// Evaluate a single expression and print its result
    #[arg(short, long, value_name = "EXPR", conflicts_with = "file")]
    expr: Option<String>,

    /// Print the parsed syntax tree as JSON instead of evaluating
    #[arg(long)]
    dump_ast: bool,

    /// Log filter directives, e.g. "lispy=debug"
    #[arg(long, env = "LISPY_LOG", default_value = "warn")]
    log: String,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = init_tracing(&args.log, args.log_file.as_deref());

    let interp = Interpreter::new();

    if let Some(src) = args.expr {
        return run_source(&interp, &src, args.dump_ast, true);
    }
    if let Some(path) = args.file {
        return match fs::read_to_string(&path) {
            Ok(src) => {
                info!("running {}", path.display());
                run_source(&interp, &src, args.dump_ast, false)
            }
            Err(err) => {
                report_error(&format!("{}: {}", path.display(), err));
                ExitCode::FAILURE
            }
        };
    }
    repl(&interp)
}

fn run_source(interp: &Interpreter, src: &str, dump_ast: bool, print_result: bool) -> ExitCode {
    let nodes = match parse_code(src) {
        Ok(nodes) => nodes,
        Err(err) => {
            report_error(&err);
            return ExitCode::FAILURE;
        }
    };

    if dump_ast {
        return match serde_json::to_string_pretty(&nodes) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                report_error(&err.to_string());
                ExitCode::FAILURE
            }
        };
    }

    match interp.run(&nodes) {
        Ok(value) => {
            if print_result && value != Value::Unspecified {
                println!("{}", value);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn repl(interp: &Interpreter) -> ExitCode {
    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(DefaultPromptSegment::Basic("lispy".to_string()), DefaultPromptSegment::Empty);

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                // a failing form reports and leaves the root frame intact
                match eval_line(interp, &line) {
                    Ok(Some(rendered)) => println!("{}", rendered),
                    Ok(None) => {}
                    Err(err) => report_error(&err),
                }
            }
            Ok(Signal::CtrlC) => continue,
            Ok(Signal::CtrlD) => return ExitCode::SUCCESS,
            Err(err) => {
                report_error(&err.to_string());
                return ExitCode::FAILURE;
            }
        }
    }
}

fn eval_line(interp: &Interpreter, line: &str) -> Result<Option<String>, String> {
    let nodes = parse_code(line)?;
    let value = interp.run(&nodes).map_err(|err| err.to_string())?;
    Ok(match value {
        Value::Unspecified => None,
        value => Some(format!("{}", value)),
    })
}

fn report_error(message: &str) { eprintln!("{}", message.red()) }

fn init_tracing(filter: &str, log_file: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let file = path.file_name().unwrap_or_else(|| "lispy.log".as_ref());
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            None
        }
    }
}
