mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = reqwest::Client::new().get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_describes_endpoints() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let body = reqwest::Client::new()
        .get(server.url("/"))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["endpoints"]["practice_information"].is_string());
    Ok(())
}
