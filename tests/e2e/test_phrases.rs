use crate::e2e::helpers;

use helpers::{assertions::assert_file_report, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;

fn pairs(body: &Value) -> Vec<(String, String)> {
    body["pairs"]
        .as_array()
        .expect("Missing pairs field")
        .iter()
        .map(|p| {
            (
                p["native"].as_str().unwrap().to_string(),
                p["foreign"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn owned(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(n, f)| (n.to_string(), f.to_string()))
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_parse_bilingual_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "files": [
                    { "name": "lesson1.txt", "content": "ahoj|hola\ndobrý den | buenos días\n\n" }
                ]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        pairs(body),
        owned(&[("ahoj", "hola"), ("dobrý den", "buenos días")])
    );
    assert_file_report(&body["files"][0], "lesson1.txt", "ok", 2);
    assert_eq!(body["files"][0]["format"], "bilingual");
    assert_eq!(body["files"][0]["message"], "Loaded 2 Czech-Spanish pairs");
    assert_eq!(body["translated_count"], 0);
    assert!(!body["content_hash"].as_str().unwrap().is_empty());
    assert!(ctx.translator.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_foreign_only_phrases_and_append_them_last(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "files": [
                    { "name": "words.txt", "content": "Gracias\nAdiós" },
                    { "name": "lesson1.txt", "content": "ahoj;hola" }
                ]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        pairs(body),
        owned(&[
            ("ahoj", "hola"),
            ("Gracias (Czech)", "Gracias"),
            ("Adiós (Czech)", "Adiós"),
        ])
    );
    assert_file_report(&body["files"][0], "words.txt", "ok", 2);
    assert_eq!(body["files"][0]["format"], "foreign_only");
    assert_eq!(body["translated_count"], 2);
    assert_eq!(ctx.translator.calls(), vec!["Gracias", "Adiós"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_replace_failed_translation_with_placeholder(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "files": [{ "name": "words.txt", "content": "boom\nHola" }]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        pairs(body),
        owned(&[
            ("[Translation error: model unavailable]", "boom"),
            ("Hola (Czech)", "Hola"),
        ])
    );
    assert_eq!(body["warnings"], json!(["Translation failed for: boom"]));
    assert_eq!(body["translation_failures"][0]["index"], 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_bad_files_without_failing_the_batch(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "de",
                "files": [
                    { "name": "empty.txt", "content": "  \n\n" },
                    { "name": "mixed.txt", "content": "ahoj|hallo;servus" },
                    { "name": "broken.txt", "content": "ahoj|hallo\nbez oddělovače" },
                    { "name": "good.txt", "content": "děkuji|danke" }
                ]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let files = &body["files"];

    assert_file_report(&files[0], "empty.txt", "error", 0);
    assert_eq!(files[0]["error_kind"], "empty_file");
    assert_eq!(files[0]["message"], "empty.txt: file is empty");

    assert_file_report(&files[1], "mixed.txt", "error", 0);
    assert_eq!(files[1]["error_kind"], "ambiguous_delimiter");

    assert_file_report(&files[2], "broken.txt", "error", 0);
    assert_eq!(files[2]["error_kind"], "malformed_line");
    assert_eq!(
        files[2]["message"],
        "broken.txt: invalid format on line 2: bez oddělovače"
    );

    assert_file_report(&files[3], "good.txt", "ok", 1);
    assert_eq!(pairs(body), owned(&[("děkuji", "danke")]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_flag_code_for_english(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "gb",
                "files": [{ "name": "en.txt", "content": "kočka|cat" }]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["files"][0]["message"],
        "Loaded 1 Czech-English pairs"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_same_hash_for_same_pairs(ctx: &TestContext) {
    let request = json!({
        "native_language": "cs",
        "foreign_language": "fr",
        "files": [{ "name": "fr.txt", "content": "ano|oui\nne|non" }]
    });

    let first = ctx
        .client
        .post_with_auth("/api/phrases/batch", &request, &ctx.token)
        .await
        .unwrap();
    let second = ctx
        .client
        .post_with_auth("/api/phrases/batch", &request, &ctx.token)
        .await
        .unwrap();

    assert_eq!(
        first.body.as_ref().unwrap()["content_hash"],
        second.body.as_ref().unwrap()["content_hash"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_batch_without_files(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({ "native_language": "cs", "foreign_language": "es", "files": [] }),
            &ctx.token,
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("At least one file is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_oversized_file(ctx: &TestContext) {
    let content = "ahoj|hola\n".repeat(110_000);

    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "files": [{ "name": "huge.txt", "content": content }]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("huge.txt");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_export_edited_pairs_as_text_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/export",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "pairs": [
                    { "native": "ahoj", "foreign": "hola" },
                    { "native": "dobrou noc", "foreign": "buenas noches" }
                ]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "text/plain; charset=utf-8")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"edited_cs_es_2_phrases.txt\"",
        );
    assert_eq!(response.text(), "ahoj|hola\ndobrou noc|buenas noches");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_export_of_pair_containing_delimiter(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/phrases/export",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "pairs": [
                    { "native": "ahoj", "foreign": "hola" },
                    { "native": "ano|ne", "foreign": "sí" }
                ]
            }),
            &ctx.token,
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Pair 2: native text contains the delimiter '|'");
}
