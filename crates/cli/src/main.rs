use clap::Parser;
use log::debug;
use rust_picks_cli::cli_args::{Args, ItemSource};
use rust_picks_cli::line_editing::{PlainLines, TerminalEditor};
use rust_picks_core::error::{Error, Result};
use rust_picks_core::file_handling::{get_menu_definition, read_items};
use rust_picks_core::menu::{LineSource, Menu};
use std::io::{stderr, stdin, stdout, IsTerminal, Write};
use std::process::ExitCode;

const INTERRUPTED_MESSAGE: &str = "CTRL-C detected. Exiting.";
const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Exit with the interrupt message when SIGINT arrives.
///
/// The line editor reads CTRL-C as a key in raw mode, so this only fires
/// while reading piped items or piped responses.
#[cfg(unix)]
fn exit_on_interrupt() -> Result<()> {
    use crossterm::terminal::disable_raw_mode;
    use signal_hook::consts::SIGINT;
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT])?;
    std::thread::spawn(move || {
        if signals.forever().next().is_some() {
            let _ = disable_raw_mode();
            eprintln!("\n{INTERRUPTED_MESSAGE}");
            std::process::exit(i32::from(INTERRUPTED_EXIT_CODE));
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn exit_on_interrupt() -> Result<()> {
    Ok(())
}

/// The stream the menu and prompts are written to.
fn interactive_output(args: &Args) -> Box<dyn Write> {
    if args.stdout {
        Box::new(stdout())
    } else {
        Box::new(stderr())
    }
}

/// Build the menu from the arguments, an optional definition file and stdin.
///
/// Returns the menu and whether its items were read from stdin.
fn build_menu(args: &Args) -> Result<(Menu, bool)> {
    let definition = match &args.config_path {
        Some(path) => Some(get_menu_definition(path)?),
        None => None,
    };

    let config = args.menu_config(definition.as_ref())?;

    let (items, items_from_stdin) =
        match args.item_source(definition.as_ref(), stdin().is_terminal()) {
            ItemSource::Given(items) => (items, false),
            ItemSource::Stdin => {
                debug!("No items given, reading them from stdin");
                (read_items(stdin().lock())?, true)
            }
            ItemSource::Missing => {
                debug!("No items given and stdin is a terminal");
                (Vec::new(), false)
            }
        };

    Ok((Menu::new(&items, config)?, items_from_stdin))
}

/// Run the menu and return the selected item
fn execute(args: &Args) -> Result<String> {
    exit_on_interrupt()?;

    let (menu, items_from_stdin) = build_menu(args)?;
    let mut output = interactive_output(args);

    // Once stdin has been consumed for the items, responses come from the
    // controlling terminal.
    let mut source: Box<dyn LineSource + '_> = if items_from_stdin || stdin().is_terminal() {
        Box::new(TerminalEditor::new(
            menu.completer(),
            interactive_output(args),
        ))
    } else {
        debug!("stdin is not a terminal, reading responses line by line");
        Box::new(PlainLines::new(stdin().lock()))
    };

    menu.prompt(source.as_mut(), output.as_mut())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match execute(&args) {
        Ok(selection) => {
            if args.stdout {
                eprintln!("{selection}");
            } else {
                println!("{selection}");
            }
            ExitCode::SUCCESS
        }
        Err(Error::Interrupted) => {
            eprintln!("{INTERRUPTED_MESSAGE}");
            ExitCode::from(INTERRUPTED_EXIT_CODE)
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
