use anyhow::Result;
use transcription_configuration::{load_config, setup_logging};
use transcription_setup::build_and_run;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config()?;
    setup_logging(&config);
    build_and_run(config).await?;
    Ok(())
}
