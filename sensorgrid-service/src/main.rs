//! Service entrypoint: configuration → tracing → database pool → router → server

use anyhow::Context;

use sensorgrid_service::{
    config::Config, database, handlers, observability, repository::PgRepository, server::Server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    observability::init_tracing(&config);

    let pool = database::create_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    let repo = PgRepository::new(pool);
    let app = handlers::router(repo);

    Server::new(config)
        .serve(app)
        .await
        .context("server error")?;

    Ok(())
}
