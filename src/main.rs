use application::api::router::MainRouter;
use config::AppConfig;
use domain::person::{PersonManager, PersonRepository, PersonValidator, Translator};
use dotenv::dotenv;
use infrastructure::person::{
    memory::InMemoryPersonRepository, postgres::postgres_repository::PostgresPersonRepository,
};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

mod application;
mod config;
mod domain;
mod infrastructure;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    // Check of env variables before starting the app.
    let config = AppConfig::from_env()?;

    let rt = Runtime::new()?;
    rt.block_on(async {
        let person_repository: Box<dyn PersonRepository> = match &config.database_url {
            Some(db_url) => Box::new(
                PostgresPersonRepository::new(db_url, config.database_timeout).await?,
            ),
            None => {
                tracing::warn!("DATABASE_URL not set, people are kept in memory");
                Box::new(InMemoryPersonRepository::new())
            }
        };
        let validator = PersonValidator::new(Translator::new(&config.locale));
        let person_manager = PersonManager::new(person_repository, validator);
        let main_router = MainRouter::new(config.api_addr, person_manager);
        main_router.run().await.map_err(|e| format!("{:?}", e))?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
