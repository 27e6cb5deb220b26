mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_thread(
    base_url: &str,
    token: &str,
    participants: &[Uuid],
) -> Result<(StatusCode, Value)> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/threads", base_url))
        .bearer_auth(token)
        .json(&json!({ "participants": participants }))
        .send()
        .await?;
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}

#[tokio::test]
async fn find_or_create_reuses_existing_pair() -> Result<()> {
    let server = common::ensure_server().await?;
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let token = common::user_token(a);

    let (status, body) = create_thread(&server.base_url, &token, &[a, b]).await?;
    assert_eq!(status, StatusCode::CREATED);
    let thread_id = body["data"]["id"].as_str().unwrap().to_string();

    // Same pair in reversed order resolves to the same thread
    let (status, body) = create_thread(&server.base_url, &token, &[b, a]).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_str().unwrap(), thread_id);

    // The counterpart sees the same thread too
    let (status, body) = create_thread(&server.base_url, &common::user_token(b), &[b, a]).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_str().unwrap(), thread_id);
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_converge_on_one_thread() -> Result<()> {
    let server = common::ensure_server().await?;
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let token = common::user_token(a);

    let ab = [a, b];
    let ba = [b, a];
    let (first, second) = tokio::join!(
        create_thread(&server.base_url, &token, &ab),
        create_thread(&server.base_url, &token, &ba),
    );
    let (status_1, body_1) = first?;
    let (status_2, body_2) = second?;

    assert!(status_1 == StatusCode::CREATED || status_1 == StatusCode::OK);
    assert!(status_2 == StatusCode::CREATED || status_2 == StatusCode::OK);
    assert_eq!(body_1["data"]["id"], body_2["data"]["id"]);
    Ok(())
}

#[tokio::test]
async fn rejects_invalid_participant_sets() -> Result<()> {
    let server = common::ensure_server().await?;
    let caller = Uuid::new_v4();
    let token = common::user_token(caller);

    for participants in [
        vec![],
        vec![caller],
        vec![caller, Uuid::new_v4(), Uuid::new_v4()],
        vec![caller, caller],
        // Caller missing from the pair
        vec![Uuid::new_v4(), Uuid::new_v4()],
    ] {
        let (status, body) = create_thread(&server.base_url, &token, &participants).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "participants: {:?}", participants);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
    Ok(())
}

#[tokio::test]
async fn lists_own_threads_with_pagination_and_last_message() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let caller = Uuid::new_v4();
    let token = common::user_token(caller);

    let mut thread_ids = Vec::new();
    for _ in 0..3 {
        let (_, body) = create_thread(&server.base_url, &token, &[caller, Uuid::new_v4()]).await?;
        thread_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // Default page size is 2 in the development configuration
    let res = client
        .get(format!("{}/threads", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let page = &body["data"];
    assert_eq!(page["count"], 3);
    assert_eq!(page["results"].as_array().unwrap().len(), 2);
    assert!(page["next"].as_str().unwrap().contains("offset=2"));
    assert!(page["previous"].is_null());

    // Threads with no messages have a null enrichment
    assert!(page["results"][0]["last_message"].is_null());

    // Second page
    let res = client
        .get(format!("{}/threads?limit=2&offset=2", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
    assert!(body["data"]["next"].is_null());

    // Posting a message surfaces it as last_message in the listing
    let res = client
        .post(format!("{}/messages/{}", server.base_url, thread_ids[0]))
        .bearer_auth(&token)
        .json(&json!({ "body": "newest" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/threads?limit=10", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let results = body["data"]["results"].as_array().unwrap();
    let enriched = results
        .iter()
        .find(|t| t["id"].as_str() == Some(thread_ids[0].as_str()))
        .unwrap();
    assert_eq!(enriched["last_message"]["body"], "newest");
    Ok(())
}

#[tokio::test]
async fn retrieval_and_deletion_are_participant_gated() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let token = common::user_token(a);

    let (_, body) = create_thread(&server.base_url, &token, &[a, b]).await?;
    let thread_id = body["data"]["id"].as_str().unwrap().to_string();

    // A participant can retrieve the thread with its messages
    let res = client
        .get(format!("{}/threads/{}", server.base_url, thread_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["data"]["messages"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["participants"].as_array().unwrap().len(), 2);

    // An outsider gets a hard 403 for retrieval and deletion
    let outsider = common::user_token(Uuid::new_v4());
    let res = client
        .get(format!("{}/threads/{}", server.base_url, thread_id))
        .bearer_auth(&outsider)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/threads/{}", server.base_url, thread_id))
        .bearer_auth(&outsider)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The thread is still there for its participant
    let res = client
        .get(format!("{}/threads/{}", server.base_url, thread_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // A participant can delete; retrieval then 404s
    let res = client
        .delete(format!("{}/threads/{}", server.base_url, thread_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/threads/{}", server.base_url, thread_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_thread_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::user_token(Uuid::new_v4());

    let res = client
        .get(format!("{}/threads/{}", server.base_url, Uuid::new_v4()))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn listing_by_user_requires_admin() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let target = Uuid::new_v4();
    let token = common::user_token(target);

    create_thread(&server.base_url, &token, &[target, Uuid::new_v4()]).await?;

    // A regular user cannot list someone else's threads - or even their own
    // through this route
    let res = client
        .get(format!("{}/threads/user/{}", server.base_url, target))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // An admin token can
    let res = client
        .get(format!("{}/threads/user/{}", server.base_url, target))
        .bearer_auth(common::admin_token(Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["count"], 1);
    Ok(())
}
