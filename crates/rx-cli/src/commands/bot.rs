use std::rc::Rc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rx_core::ReactionStatus;
use rx_engine::{
    AutoAdvance, EventLogger, EventRecorder, GameConfig, GameEvent, GameEventKind, GameManager,
};

pub fn run(difficulty: &str, rounds: u32, seed: u64, skill: u32, verbose: bool) -> Result<(), String> {
    if rounds == 0 {
        return Err("rounds must be at least 1".into());
    }
    let settings = super::settings_for(difficulty, "bot")?;
    println!(
        "  {} {} {}",
        "Bot".bold(),
        settings.difficulty,
        format!("({rounds} rounds, seed={seed}, skill={skill}ms)").dimmed()
    );

    let mut manager = GameManager::new(settings, GameConfig::default().with_seed(seed));
    manager.start_game();

    let history = Rc::new(EventRecorder::new("history", 0));
    manager.subscribe(Rc::new(EventLogger::new()));
    manager.subscribe(history.clone());
    manager.subscribe(Rc::new(AutoAdvance::new().with_round_limit(rounds)));

    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    manager
        .dispatch_starting_sequence()
        .map_err(|e| e.to_string())?;

    loop {
        let reaction = manager.current_reaction().map_err(|e| e.to_string())?;
        if reaction.is_complete {
            break;
        }
        if reaction.reaction_status == ReactionStatus::NotStarted {
            manager.dispatch_reaction_start().map_err(|e| e.to_string())?;
            manager.dispatch_reaction_end().map_err(|e| e.to_string())?;
        }

        let reaction = manager.current_reaction().map_err(|e| e.to_string())?;
        let guess = bot_guess(&mut rng, reaction.duration_ms, skill, reaction.attempts());
        manager
            .dispatch_add_guess(guess)
            .map_err(|e| e.to_string())?;
    }

    let log = history.log();
    tracing::debug!(events = ?log.kinds(), "broadcast history");
    if verbose {
        println!();
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in log.events() {
            println!("  {}", describe(event));
        }
    }

    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Round", "Target", "Guesses", "Deviation"]);
    for event in log.of_kind(GameEventKind::CompleteReaction) {
        if let GameEvent::CompleteReaction {
            reaction,
            guess,
            round_count,
            ..
        } = event
        {
            let guesses: Vec<String> = reaction.guesses.iter().map(u32::to_string).collect();
            table.add_row(vec![
                round_count.to_string(),
                format!("{}ms", reaction.duration_ms),
                guesses.join(", "),
                format!("{}ms", guess.abs_diff(reaction.duration_ms)),
            ]);
        }
    }
    println!("{table}");

    let game = manager.current_game().map_err(|e| e.to_string())?;
    tracing::info!(
        score = game.score,
        rounds = game.round_count,
        failures = manager.observer_failures(),
        "bot game finished"
    );
    super::print_summary(game);
    Ok(())
}

/// A guess off by up to `skill` ms, halving the spread after every miss.
fn bot_guess(rng: &mut StdRng, target: u32, skill: u32, misses: usize) -> u32 {
    let spread = u32::try_from(misses)
        .ok()
        .and_then(|m| skill.checked_shr(m))
        .unwrap_or(0);
    let offset = i64::from(rng.random_range(0..=spread));
    let guess = if rng.random_bool(0.5) {
        i64::from(target) + offset
    } else {
        i64::from(target) - offset
    };
    u32::try_from(guess.max(0)).unwrap_or(u32::MAX)
}

fn describe(event: &GameEvent) -> String {
    let reaction = event.reaction();
    let label = format!("[{}]", reaction.id).dimmed();
    match event {
        GameEvent::StartingSequence { .. } => {
            format!("{label} starting sequence, target {}ms", reaction.duration_ms)
        }
        GameEvent::ReactionStart { .. } => format!("{label} signal live"),
        GameEvent::ReactionEnd { .. } => format!("{label} signal ended"),
        GameEvent::InvalidGuess { guess, status, .. } => {
            format!("{label} {guess}ms {}", status.to_string().yellow())
        }
        GameEvent::CompleteReaction { guess, score, .. } => {
            format!("{label} {guess}ms {} (score {score})", "valid".green())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_stays_within_skill() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let g = bot_guess(&mut rng, 1_000, 100, 0);
            assert!((900..=1_100).contains(&g));
        }
    }

    #[test]
    fn spread_halves_per_miss() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let g = bot_guess(&mut rng, 1_000, 100, 2);
            assert!((975..=1_025).contains(&g));
        }
    }

    #[test]
    fn many_misses_guess_exactly() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(bot_guess(&mut rng, 1_000, 400, 64), 1_000);
        assert_eq!(bot_guess(&mut rng, 1_000, 400, 40), 1_000);
    }

    #[test]
    fn guess_never_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let _ = bot_guess(&mut rng, 5, 400, 0);
        }
    }
}
