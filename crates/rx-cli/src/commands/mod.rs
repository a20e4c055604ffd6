pub mod bot;
pub mod difficulties;
pub mod leaderboard;
pub mod play;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rx_core::{Difficulty, Game, Settings};
use rx_engine::GameStats;

/// Resolve a difficulty id into settings for `user`.
fn settings_for(difficulty: &str, user: &str) -> Result<Settings, String> {
    let difficulty = Difficulty::parse(difficulty).map_err(|e| e.to_string())?;
    Ok(Settings::default()
        .with_user(user)
        .with_difficulty(difficulty))
}

/// Print the end-of-game summary table.
fn print_summary(game: &Game) {
    let stats = GameStats::from_game(game);

    println!();
    println!(
        "  {} {} on {}",
        "Game over".bold(),
        game.user_id,
        game.difficulty
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Score", "Rounds", "Guesses", "Deviation (avg.)", "Best"]);
    table.add_row(vec![
        game.score.to_string(),
        stats.rounds.to_string(),
        format!("{} ({:.1}/round)", stats.attempts, stats.attempts_per_round()),
        format!("{:.2}ms", stats.average_deviation_ms),
        stats
            .best_deviation_ms
            .map_or_else(|| "—".to_string(), |d| format!("{d}ms")),
    ]);
    println!("{table}");
}
