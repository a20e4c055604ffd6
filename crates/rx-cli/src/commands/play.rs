use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rx_core::ReactionStatus;
use rx_engine::{AutoAdvance, EventLogger, GameConfig, GameManager, ReactionTimer};

use crate::screen::Screen;

/// Flags for `rx play`.
pub struct PlayOptions {
    pub difficulty: String,
    pub user: String,
    pub rounds: u32,
    pub seed: Option<u64>,
    pub no_wait: bool,
    pub export: Option<PathBuf>,
}

enum Input {
    Guess(u32),
    Unparsable(String),
    Quit,
}

pub fn run(opts: PlayOptions) -> Result<(), String> {
    if opts.rounds == 0 {
        return Err("rounds must be at least 1".into());
    }
    let settings = super::settings_for(&opts.difficulty, &opts.user)?;
    let coloring = settings.effective_coloring().clone();
    let config = match opts.seed {
        Some(seed) => GameConfig::default().with_seed(seed),
        None => GameConfig::default(),
    };
    let mut countdown_rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    println!(
        "  {} {} | {} round{}",
        "Reaxion".bold(),
        settings.difficulty,
        opts.rounds,
        if opts.rounds == 1 { "" } else { "s" }
    );
    println!("  Type your guess in milliseconds, 'quit' to stop.\n");

    let mut manager = GameManager::new(settings, config);
    manager.start_game();

    // Screen first so a round's result prints before the next round starts.
    let timer = Rc::new(ReactionTimer::new());
    manager.subscribe(Rc::new(Screen::new(coloring)));
    manager.subscribe(Rc::new(EventLogger::new()));
    manager.subscribe(timer.clone());
    manager.subscribe(Rc::new(AutoAdvance::new().with_round_limit(opts.rounds)));

    manager
        .dispatch_starting_sequence()
        .map_err(|e| e.to_string())?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        let reaction = manager.current_reaction().map_err(|e| e.to_string())?;
        if reaction.is_complete {
            break;
        }
        if reaction.reaction_status == ReactionStatus::NotStarted {
            countdown(&mut countdown_rng, opts.no_wait);
            manager.dispatch_reaction_start().map_err(|e| e.to_string())?;
            wait_for_end(&timer, &mut manager, opts.no_wait)?;
        }

        match read_guess(&mut reader)? {
            Input::Quit => break,
            Input::Unparsable(text) => {
                println!("  {}", format!("'{text}' is not a number of milliseconds").yellow());
            }
            Input::Guess(guess) => {
                manager
                    .dispatch_add_guess(guess)
                    .map_err(|e| e.to_string())?;
            }
        }
    }

    let game = manager.current_game().map_err(|e| e.to_string())?;
    super::print_summary(game);

    if let Some(path) = opts.export {
        tracing::debug!(path = %path.display(), "exporting game");
        let json = serde_json::to_string_pretty(game).map_err(|e| e.to_string())?;
        std::fs::write(&path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    }

    Ok(())
}

/// Hold the countdown for an unpredictable 1-3 seconds.
fn countdown(rng: &mut StdRng, no_wait: bool) {
    let delay = Duration::from_millis(rng.random_range(1_000..=3_000));
    if !no_wait {
        thread::sleep(delay);
    }
}

/// Sleep until the timer's pending end is due, then fire it.
fn wait_for_end(
    timer: &ReactionTimer,
    manager: &mut GameManager,
    no_wait: bool,
) -> Result<(), String> {
    let Some(due) = timer.due() else {
        return Ok(());
    };
    if !no_wait {
        thread::sleep(timer.remaining(Instant::now()).unwrap_or_default());
    }
    timer
        .fire_if_due(manager, due.max(Instant::now()))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn read_guess(reader: &mut impl BufRead) -> Result<Input, String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    if reader.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
        return Ok(Input::Quit); // EOF
    }
    let input = line.trim();
    if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
        return Ok(Input::Quit);
    }
    Ok(input
        .trim_end_matches("ms")
        .trim()
        .parse()
        .map_or_else(|_| Input::Unparsable(input.to_string()), Input::Guess))
}
