use portfolio_contact::configuration::get_settings;
use portfolio_contact::startup::Application;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("portfolio_contact".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_settings().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
