use anyhow::Result;
use conversation_configuration::{load_config, setup_logging};
use conversation_setup::build_and_run;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config()?;
    setup_logging(&config);
    build_and_run(config).await?;
    Ok(())
}
