//! Categories command - print the categories of the exemplar store

use crate::config::AppConfig;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let store = crate::create_exemplar_store(&config.store).await?;

    for category in store.list_categories().await? {
        println!("{}", category);
    }

    Ok(())
}
