use qk_store::{QuestionStore, StoreConfig};

pub fn run(config: &StoreConfig) -> Result<(), String> {
    let store = QuestionStore::new(config);
    let count = store
        .write_samples()
        .map_err(|e| format!("cannot write {}: {e}", store.path().display()))?;

    println!("Created {} with {count} sample questions.", store.path().display());
    Ok(())
}
