use gateway_client::{Config, GatewayClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the demo
    let _ = tracing_subscriber::fmt().try_init();

    // Load configuration from a JSON file placed next to the binary
    let cfg = Config::from_file("config.json")?;
    let client = GatewayClient::new(cfg)?;

    // The access token comes from whatever login flow the embedder runs;
    // this demo expects one in the environment.
    let token = std::env::var("GATEWAY_ACCESS_TOKEN")?;
    client.begin_session(token);

    let inventory = client.get("/api/inventory").await?;
    println!("inventory: {}", inventory.body);

    client.logout();
    Ok(())
}
