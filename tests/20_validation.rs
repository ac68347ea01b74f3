// Input guards answer before any database access, so none of these need Postgres.
mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use serde_json::json;

use common::{assert_error, call, send};

const MEMBER_ID: i32 = 41;

fn token() -> Result<String> {
    common::token_for(MEMBER_ID, "guard@example.com")
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let token = token()?;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chats")
        .header("x-access-token", &token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))?;

    let reply = send(request).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed JSON In Parameters");
    Ok(())
}

fn raw_request(method: Method, uri: &str, token: &str, content_type: Option<&str>, body: &'static str) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri).header("x-access-token", token);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    Ok(builder.body(Body::from(body))?)
}

#[tokio::test]
async fn optional_bodies_must_still_be_json() -> Result<()> {
    let token = token()?;

    let request = raw_request(Method::POST, "/chats/3", &token, Some("application/json"), "{\"memberid\": ")?;
    assert_error(&send(request).await?, StatusCode::BAD_REQUEST, "Malformed JSON In Parameters");

    // A body sent without a JSON content type is not silently dropped in favour of the caller
    let request = raw_request(Method::POST, "/chats/3", &token, None, "{\"memberid\": \"bob\"}")?;
    assert_error(&send(request).await?, StatusCode::BAD_REQUEST, "Malformed JSON In Parameters");

    let request = raw_request(Method::POST, "/chats/3", &token, Some("text/plain"), "{\"memberid\": 7}")?;
    assert_error(&send(request).await?, StatusCode::BAD_REQUEST, "Malformed JSON In Parameters");

    let request = raw_request(Method::PUT, "/contacts/7", &token, Some("application/json"), "{\"nickname\": ")?;
    assert_error(&send(request).await?, StatusCode::BAD_REQUEST, "Malformed JSON In Parameters");

    // An empty body is still "no body": the id guard answers next
    let request = raw_request(Method::POST, "/chats/general", &token, Some("application/json"), "")?;
    assert_error(
        &send(request).await?,
        StatusCode::BAD_REQUEST,
        "Malformed Parameter, Chat ID Must Be A Number",
    );
    Ok(())
}

#[tokio::test]
async fn chat_guards() -> Result<()> {
    let token = token()?;
    let token = Some(token.as_str());

    let reply = call(Method::POST, "/chats", token, Some(json!({}))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::POST, "/chats", token, Some(json!({ "name": "" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::POST, "/chats/general", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Chat ID Must Be A Number");

    let reply = call(Method::POST, "/chats/3", token, Some(json!({ "memberid": "bob" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Member ID Must Be A Number");

    let reply = call(Method::GET, "/chats/x1", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Chat ID Must Be A Number");

    let reply = call(Method::DELETE, "/chats/3/abc", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Member ID Must Be A Number");

    let reply = call(Method::DELETE, "/chats/abc/3", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Chat ID Must Be A Number");
    Ok(())
}

#[tokio::test]
async fn message_guards() -> Result<()> {
    let token = token()?;
    let token = Some(token.as_str());

    let reply = call(Method::POST, "/messages", token, Some(json!({ "message": "hi" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::POST, "/messages", token, Some(json!({ "chatid": 1 }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::POST, "/messages", token, Some(json!({ "chatid": 1, "message": "" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(
        Method::POST,
        "/messages",
        token,
        Some(json!({ "chatid": "lobby", "message": "hi" })),
    )
    .await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Chat ID Must Be A Number");

    let reply = call(Method::GET, "/messages/lobby", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Chat ID Must Be A Number");

    let reply = call(Method::GET, "/messages/1/latest", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Message ID Must Be A Number");
    Ok(())
}

#[tokio::test]
async fn contact_guards() -> Result<()> {
    let token = token()?;
    let token = Some(token.as_str());

    let reply = call(Method::POST, "/contacts/bob", token, Some(json!({ "nickname": "Bob" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Memberid Must Be A Number");

    let reply = call(Method::POST, "/contacts/7", token, Some(json!({}))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let own = format!("/contacts/{}", MEMBER_ID);
    let reply = call(Method::POST, &own, token, Some(json!({ "nickname": "me" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Cannot Add Yourself As A Contact");

    let reply = call(Method::PUT, "/contacts/bob", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Memberid Must Be A Number");

    let reply = call(Method::DELETE, "/contacts/bob", token, None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Malformed Parameter, Memberid Must Be A Number");
    Ok(())
}

#[tokio::test]
async fn push_token_and_location_guards() -> Result<()> {
    let token = token()?;
    let token = Some(token.as_str());

    let reply = call(Method::PUT, "/auth", token, Some(json!({}))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::PUT, "/auth", token, Some(json!({ "token": "" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::POST, "/locations", token, Some(json!({ "city": "Tacoma" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");

    let reply = call(Method::DELETE, "/locations", token, Some(json!({ "zip": "" }))).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");
    Ok(())
}

#[tokio::test]
async fn blank_zip_code_is_rejected() -> Result<()> {
    let token = token()?;

    let reply = call(Method::GET, "/weather/zipcode/%20", Some(&token), None).await?;
    assert_error(&reply, StatusCode::BAD_REQUEST, "Missing Required Information");
    Ok(())
}
