use std::env;
use std::io::{self, BufRead, Write};

use bracket_city::game::GameSession;

const DEFAULT_PUZZLE_FILE: &str = "games/sample.json";

fn init_logging() {
    env_logger::init();
}

fn main() {
    init_logging();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PUZZLE_FILE.to_string());
    let mut session = match GameSession::from_json_file(&path) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("Could not load puzzle from {}: {}", path, error);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} ({} clues). Welcome to Bracket City.",
        path,
        session.puzzle().total_clues()
    );
    println!("Answer clues as: <clue id> <answer>. Type 'quit' to stop.");

    let stdin = io::stdin();
    loop {
        let snapshot = session.snapshot();
        if snapshot.is_complete {
            println!();
            println!("Puzzle solved! Final score: {}", snapshot.score);
            println!("{}", snapshot.rendered_text);
            break;
        }

        println!();
        println!("Active clues:");
        for context in &snapshot.active_clues {
            println!("  {}  {}", context.clue_id, context.rendered_text);
        }
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let (clue_id, attempt) = match line.split_once(' ') {
            Some(parts) => parts,
            None => {
                println!("Expected: <clue id> <answer>");
                continue;
            }
        };

        match session.submit_answer(clue_id, attempt) {
            Ok(outcome) if outcome.correct => println!("Correct! Score: {}", outcome.score),
            Ok(outcome) => println!("Not accepted. Score: {}", outcome.score),
            Err(error) => println!("{}", error),
        }
    }
}
