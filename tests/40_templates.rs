mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn templates_require_session() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = reqwest::Client::new().get(server.url("/api/templates")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn gad7_preview() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/templates/GAD-7%20(Generalized%20Anxiety%20Disorder)"))
        .bearer_auth(server.token())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let json: Value = res.json().await?;
    assert_eq!(json["displayTitle"], "GAD-7");
    assert_eq!(json["sections"][0]["questions"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["options"][3], "Nearly every day");
    Ok(())
}

#[tokio::test]
async fn unknown_template_gets_placeholder() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let json: Value = reqwest::Client::new()
        .get(server.url("/api/templates/Custom%20Intake"))
        .bearer_auth(server.token())
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(json["title"], "Custom Intake");
    assert_eq!(json["sections"][0]["title"], "Template Preview");
    assert!(json.get("options").is_none());
    Ok(())
}

#[tokio::test]
async fn library_lists_titles() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let json: Value = reqwest::Client::new()
        .get(server.url("/api/templates"))
        .bearer_auth(server.token())
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(json["templates"][0], "GAD-7 (Generalized Anxiety Disorder)");
    Ok(())
}
