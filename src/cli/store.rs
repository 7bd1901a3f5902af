use crate::cli::commands::{ClearArgs, QueryArgs};
use crate::db::{Collection, RecordStore};
use crate::errors::MuniError;
use super::setup::{load_config, open_database};

pub async fn handle_clear(args: ClearArgs) -> Result<(), MuniError> {
    let collection = Collection::parse(&args.collection)?;
    let app = load_config(&args.store).await?;
    let db = open_database(&args.store, &app)?;

    let removed = RecordStore::new(&db, collection).clear()?;
    println!("Removed {} documents from {}", removed, collection);
    Ok(())
}

pub async fn handle_query(args: QueryArgs) -> Result<(), MuniError> {
    let collection = Collection::parse(&args.collection)?;
    let app = load_config(&args.store).await?;
    let db = open_database(&args.store, &app)?;
    let store = RecordStore::new(&db, collection);

    match &args.name {
        Some(name) => {
            let doc = store.get_value(name)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        None => {
            for key in store.keys()? {
                println!("{}", key);
            }
        }
    }
    Ok(())
}
