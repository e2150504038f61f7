use comfy_table::{ContentArrangement, Table};
use qk_store::{Leaderboard, StoreConfig};

pub fn run(config: &StoreConfig) -> Result<(), String> {
    let board = Leaderboard::load(config).map_err(|e| format!("cannot read leaderboard: {e}"))?;

    if board.is_empty() {
        println!("  No scores yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Score", "Level", "XP"]);

    for (i, entry) in board.entries().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.name.clone(),
            entry.score.to_string(),
            entry.level.to_string(),
            entry.xp.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
