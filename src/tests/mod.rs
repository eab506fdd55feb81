
use super::*;

#[ignore]
#[tokio::test]
async fn smoke_against_real_gateway() {
    let config = Config::from_env().expect("GATEWAY_URL must be set for the smoke test");
    let client = GatewayClient::new(config).expect("client construction");
    let health = client.get("/api/health").await.expect("gateway reachable");
    assert!(health.status.is_success());
}
