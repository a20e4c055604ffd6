use std::path::PathBuf;

use comfy_table::{ContentArrangement, Table};
use rx_core::{Difficulty, Game};
use rx_engine::GameStats;
use rx_engine::stats::rank;

pub fn run(files: &[PathBuf], difficulty: Option<&str>) -> Result<(), String> {
    let difficulty = difficulty
        .map(|d| Difficulty::parse(d).map_err(|e| e.to_string()))
        .transpose()?;

    let mut games = Vec::with_capacity(files.len());
    for path in files {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let game: Game = serde_json::from_str(&text)
            .map_err(|e| format!("{} is not an exported game: {e}", path.display()))?;
        games.push(game);
    }

    let ranked = rank(&games, difficulty.map(Difficulty::id));
    if ranked.is_empty() {
        println!("  No games found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "User", "Score", "Deviation (avg.)", "Difficulty"]);

    for (i, game) in ranked.iter().enumerate() {
        let stats = GameStats::from_game(game);
        table.add_row(vec![
            (i + 1).to_string(),
            game.user_id.clone(),
            game.score.to_string(),
            format!("{:.2}ms", stats.average_deviation_ms),
            game.difficulty.name.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} games", ranked.len());

    Ok(())
}
