// panedeck: tiled, tabbed panels over a code-analysis engine

use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use panedeck::config::Config;
use panedeck::executor::ShellExecutor;
use panedeck::scheduler::RedrawQueue;
use panedeck::session::Session;
use panedeck::ui::console::{Console, TerminalConsole};
use panedeck::ui::App;

#[derive(Debug, Parser)]
#[command(name = "panedeck", version, about)]
struct Cli {
    /// Configuration file (default: <config dir>/panedeck/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where layouts are saved and loaded from
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Enable debugger panels and actions
    #[arg(long)]
    debug: bool,

    /// Program that answers panel commands
    #[arg(long)]
    program: Option<String>,

    /// Argument passed to the program before each command (repeatable)
    #[arg(long = "arg", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Start from the saved layout instead of the default panels
    #[arg(long)]
    load_layout: bool,
}

/// Log to `<data dir>/panedeck/panedeck.log`; the terminal belongs to the UI.
fn init_logging() {
    let filter = EnvFilter::try_from_env("PANEDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let file = dirs::data_local_dir().and_then(|dir| {
        let dir = dir.join("panedeck");
        fs::create_dir_all(&dir).ok()?;
        File::options()
            .create(true)
            .append(true)
            .open(dir.join("panedeck.log"))
            .ok()
    });
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);
    match file {
        Some(file) => builder.with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(io::sink).init(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.debug {
        config.debug = true;
    }
    if let Some(layout) = cli.layout {
        config.layout_file = Some(layout);
    }
    if let Some(program) = cli.program {
        config.executor.program = program;
        config.executor.args = cli.args;
    } else if !cli.args.is_empty() {
        config.executor.args = cli.args;
    }

    let executor = ShellExecutor::new(&config.executor);
    let layout_path = config.layout_path();
    let session = Session::new(Box::new(executor), config);
    let queue = RedrawQueue::new();
    let mut console = TerminalConsole::new(queue.notifier())?;

    let mut app = App::new(session, queue, console.size());
    if cli.load_layout {
        app.load_layout(layout_path.as_deref());
    }
    info!("started");
    app.run(&mut console)?;
    Ok(())
}
