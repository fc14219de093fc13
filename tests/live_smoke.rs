use std::sync::Arc;
use std::time::Duration;

use lunchmoney_api_client::auth::EnvCredentials;
use lunchmoney_api_client::rest::LunchMoneyClient;
use lunchmoney_api_client::RequestContext;
use tracing_subscriber::EnvFilter;

fn live_tests_enabled() -> bool {
    std::env::var("LUNCHMONEY_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore]
async fn live_read_only_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let client = LunchMoneyClient::builder()
        .credentials(Arc::new(credentials))
        .context(RequestContext::background().with_timeout(Duration::from_secs(30)))
        .build();

    let user = client.get_user().await?;
    assert!(user.user_id > 0);

    let _categories = client.get_categories().await?;
    let _tags = client.get_tags().await?;
    let _assets = client.get_assets().await?;
    let _accounts = client.get_plaid_accounts().await?;

    Ok(())
}
