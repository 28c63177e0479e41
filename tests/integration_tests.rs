// Integration tests for the bizwordle application
// These tests verify that all modules work together correctly

use bizwordle::cli::CliInterface;
use bizwordle::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;

#[derive(Default)]
struct RecordingClipboard {
    copied: Vec<String>,
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.copied.push(text.to_string());
        Ok(())
    }
}

fn options() -> GameOptions {
    GameOptions {
        max_guesses: DEFAULT_MAX_GUESSES,
        show_instructions: true,
    }
}

/// The target `game_loop` will draw when handed an RNG with this seed.
fn target_for_seed(dataset: &[CompanyRecord], seed: u64) -> CompanyRecord {
    let mut rng = StdRng::seed_from_u64(seed);
    Session::new(dataset, DEFAULT_MAX_GUESSES, &mut rng)
        .unwrap()
        .target()
        .clone()
}

#[test]
fn test_end_to_end_win_and_share() {
    // Type the target's name in lowercase, win, then share
    let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
    let target = target_for_seed(&dataset, 100);

    let input = format!("{}\nshare\nexit\n", target.name.to_lowercase());
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut clipboard = RecordingClipboard::default();
    let mut rng = StdRng::seed_from_u64(100);

    game_loop(&dataset, &mut interface, &mut clipboard, options(), &mut rng).unwrap();

    assert_eq!(clipboard.copied.len(), 1);
    let text = &clipboard.copied[0];
    assert!(text.starts_with(&format!("Biz Wordle - {}\n", target.name)));
    assert!(text.contains("I got it in 1/8 guesses!"));
    assert!(text.contains("🟩🟩🟩🟩🟩"));
    assert!(text.ends_with("Play at: https://bizwordle.me"));
}

#[test]
fn test_give_up_then_share_lists_every_guess() {
    let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
    let target = target_for_seed(&dataset, 200);
    let wrong: Vec<&CompanyRecord> = dataset.iter().filter(|c| c.name != target.name).collect();

    // Give up before any guess is refused; duplicate guess is ignored
    let input = format!(
        "giveup\n{a}\n{a}\n{b}\ngiveup\nshare\n",
        a = wrong[0].name,
        b = wrong[1].name
    );
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut clipboard = RecordingClipboard::default();
    let mut rng = StdRng::seed_from_u64(200);

    // Input ends without 'exit'; EOF ends the loop
    game_loop(&dataset, &mut interface, &mut clipboard, options(), &mut rng).unwrap();

    let text = &clipboard.copied[0];
    assert!(text.contains("I gave up after 2/8 guesses!"));
    let grid_rows = text
        .lines()
        .filter(|line| line.chars().count() == 5 && line.chars().all(|c| c == '🟩' || c == '⬜'))
        .count();
    assert_eq!(grid_rows, 2);
}

#[test]
fn test_running_out_of_guesses() {
    let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
    let target = target_for_seed(&dataset, 300);
    let wrong: Vec<String> = dataset
        .iter()
        .filter(|c| c.name != target.name)
        .map(|c| c.name.clone())
        .collect();

    let mut input = wrong[..3].join("\n");
    input.push_str(&format!("\n{}\nshare\nexit\n", target.name));
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut clipboard = RecordingClipboard::default();
    let mut rng = StdRng::seed_from_u64(300);
    let opts = GameOptions {
        max_guesses: 3,
        show_instructions: false,
    };

    game_loop(&dataset, &mut interface, &mut clipboard, opts, &mut rng).unwrap();

    // The correct guess after the third miss is refused, so the share reports a loss
    assert!(clipboard.copied[0].contains("I ran out of guesses (3/3)!"));
}

#[test]
fn test_new_game_after_win() {
    let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
    let target = target_for_seed(&dataset, 400);

    // After 'next' the game is in progress again, so 'share' yields nothing
    let input = format!("{}\nnext\nshare\nexit\n", target.name);
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut clipboard = RecordingClipboard::default();
    let mut rng = StdRng::seed_from_u64(400);

    game_loop(&dataset, &mut interface, &mut clipboard, options(), &mut rng).unwrap();
    assert!(clipboard.copied.is_empty());
}

#[test]
fn test_custom_dataset_file_to_game() {
    // Integration test: Load custom dataset file -> play game
    use std::fs::File;
    use std::io::Write;

    let path = std::env::temp_dir().join("bizwordle_custom_dataset.csv");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "name,industry,founded,headquarters,fortuneRank,ceo").unwrap();
        writeln!(file, "Acme,Tools,1950,USA,400,Wile E. Coyote").unwrap();
    }

    let dataset = load_dataset_from_file(&path).unwrap();
    assert_eq!(dataset.len(), 1);

    // A one-company dataset always draws that company
    let input = "ac\nshare\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut clipboard = RecordingClipboard::default();
    let mut rng = StdRng::seed_from_u64(1);
    game_loop(&dataset, &mut interface, &mut clipboard, options(), &mut rng).unwrap();
    assert!(clipboard.copied[0].starts_with("Biz Wordle - Acme\nI got it in 1/8 guesses!"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_search_feeds_session() {
    // The filter only ever offers unguessed dataset members, so its output is always accepted
    let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
    let mut rng = StdRng::seed_from_u64(500);
    let mut session = Session::new(&dataset, dataset.len(), &mut rng).unwrap();

    while session.status() == GameStatus::InProgress {
        let guessed = session.guessed_names();
        let candidates = filter_candidates("a", session.dataset(), &guessed);
        let Some(choice) = best_candidate("a", &candidates) else {
            break;
        };
        assert!(session.submit_guess(choice).is_ok());
    }
    let names: Vec<&str> = session.guesses().iter().map(|c| c.name.as_str()).collect();
    assert!(names.iter().all(|n| n.to_lowercase().contains('a')));
}

#[test]
fn test_evaluation_example_from_dataset() {
    // Apple as target, Microsoft as guess
    let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
    let apple = dataset.iter().find(|c| c.name == "Apple").unwrap();
    let microsoft = dataset.iter().find(|c| c.name == "Microsoft").unwrap();

    let results = evaluate(microsoft, apple);
    assert_eq!(results.get(Field::FortuneRank).hint, Some(Hint::TargetLower));
    assert_eq!(results.get(Field::Founded).hint, Some(Hint::TargetHigher));
    assert!(results.get(Field::Industry).matched);
    assert!(!results.get(Field::Ceo).matched);
}

#[test]
fn test_invalid_dataset_is_reported() {
    let data = "name,industry,founded,headquarters,fortuneRank,ceo\nA,B,1900,USA,1,C\nA,D,1901,UK,2,E\n";
    assert!(matches!(
        load_dataset_from_str(data),
        Err(DatasetError::DuplicateName { .. })
    ));
}
