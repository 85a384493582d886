// loxparse: Lox expression front end with a terminal tree explorer

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use loxparse::session::{Session, SessionOptions, EXIT_NO_INPUT};
use loxparse::ui::App;

#[derive(Parser)]
#[command(name = "loxparse")]
#[command(about = "Parse Lox expressions and print their syntax tree")]
struct Args {
    /// Script to parse; starts an interactive prompt when omitted
    script: Option<PathBuf>,

    /// Print the token stream before the tree
    #[arg(short, long)]
    tokens: bool,

    /// Open the interactive terminal explorer
    #[arg(short, long, conflicts_with = "tokens")]
    explore: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.explore {
        let input = match &args.script {
            Some(path) => match fs::read_to_string(path) {
                Ok(source) => source.trim_end().to_string(),
                Err(e) => {
                    eprintln!("Error: Failed to read '{}': {}", path.display(), e);
                    process::exit(EXIT_NO_INPUT);
                }
            },
            None => String::new(),
        };
        return run_explorer(input);
    }

    let mut session = Session::new(SessionOptions {
        show_tokens: args.tokens,
        styled: io::stderr().is_terminal(),
    });
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    match &args.script {
        Some(path) => match session.run_file(path, &mut stdout, &mut stderr) {
            Ok(0) => Ok(()),
            Ok(code) => process::exit(code),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(e.exit_code());
            }
        },
        None => {
            println!("Welcome to loxparse! Press Ctrl-D to exit.");
            let stdin = io::stdin();
            session.run_prompt(stdin.lock(), &mut stdout, &mut stderr)?;
            Ok(())
        }
    }
}

fn run_explorer(input: String) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(input);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
