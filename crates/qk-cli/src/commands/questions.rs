use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qk_engine::Difficulty;
use qk_store::{QuestionStore, StoreConfig};

pub fn run(config: &StoreConfig) -> Result<(), String> {
    let store = QuestionStore::new(config);
    let questions = store
        .load()
        .map_err(|e| format!("cannot load questions: {e}"))?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Difficulty", "Questions"]);
    for &tier in Difficulty::question_tiers() {
        let count = questions.iter().filter(|q| q.difficulty == tier).count();
        table.add_row(vec![tier.to_string(), count.to_string()]);
    }

    println!("  {}", "Question Statistics".bold());
    println!("{table}");
    println!();
    println!("  {} questions in {}", questions.len(), store.path().display());
    Ok(())
}
