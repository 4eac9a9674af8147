use pagesql::{PageQuery, Result, Translator, config};
use tracing_subscriber::EnvFilter;

/// `pagesql <logical statement...>`
///
/// Prints the physical statement. With `PAGESQL_DATABASE_URL` set, also runs
/// it and prints one line per record.
#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let logical = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let config = config();

    if config.database_url.is_none() {
        println!("{}", Translator::from_config(config).to_physical(&logical)?);
        return Ok(());
    }

    let query = PageQuery::connect(config).await?;
    println!("{}", query.physical(&logical).await?);
    for record in query.fetch(&logical).await? {
        println!("{record}");
    }
    Ok(())
}
