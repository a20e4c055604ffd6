use comfy_table::{ContentArrangement, Table};
use rx_core::{Difficulty, DifficultyProfile};

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Max duration", "Tolerance"]);

    for difficulty in Difficulty::ALL {
        let profile = DifficultyProfile::from(difficulty);
        table.add_row(vec![
            profile.id.clone(),
            profile.name.clone(),
            format!("{}ms", profile.max_duration_ms),
            format!("±{}ms", profile.deviation_tolerance_ms),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} difficulties", Difficulty::ALL.len());

    Ok(())
}
