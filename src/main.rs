use bizwordle::cli::{CliInterface, parse_cli};
use bizwordle::dataset::{EMBEDDED_DATASET, load_dataset_from_file, load_dataset_from_str};
use bizwordle::game_state::{GameInterface, GameOptions, game_loop};
use bizwordle::logging::init_logging;
use bizwordle::marker::{get_marker_path, should_show_instructions};
use bizwordle::share::TerminalClipboard;
use bizwordle::tui::TuiInterface;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    let use_tui = !cli.plain && io::stdout().is_terminal();
    if let Err(e) = init_logging(cli.log_file.as_deref(), use_tui) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    let dataset = match &cli.dataset_path {
        Some(path) => load_dataset_from_file(path),
        None => load_dataset_from_str(EMBEDDED_DATASET),
    };
    let dataset = match dataset {
        Ok(companies) => companies,
        Err(e) => {
            let source = cli.dataset_path.as_deref().unwrap_or("embedded dataset");
            eprintln!("Failed to load companies from '{source}': {e}");
            return ExitCode::FAILURE;
        }
    };

    let marker = get_marker_path();
    let options = GameOptions {
        max_guesses: cli.max_guesses,
        show_instructions: should_show_instructions(marker.as_deref(), cli.instructions),
    };

    let mut interface: Box<dyn GameInterface> = if !use_tui {
        Box::new(CliInterface::new(io::stdin().lock()))
    } else {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Falling back to plain interface: {e}");
                Box::new(CliInterface::new(io::stdin().lock()))
            }
        }
    };

    let mut clipboard = TerminalClipboard::stdout();
    let mut rng = rand::rng();
    let result = game_loop(&dataset, interface.as_mut(), &mut clipboard, options, &mut rng);
    // Restore the terminal before printing anything.
    drop(interface);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
