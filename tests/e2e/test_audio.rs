use crate::e2e::helpers;

use helpers::{
    assertions::{assert_segments_cover_track, segment_kinds},
    TestContext,
};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use superlearning_backend::domain::language::LanguageCode;
use superlearning_backend::infrastructure::audio::decode_audio;
use test_context::test_context;

/// Speeds of 1.0 keep every segment at the fake voice's natural length
fn plain_config(native: &str, foreign: &str) -> Value {
    json!({
        "native_language": native,
        "foreign_language": foreign,
        "native_speed": 1.0,
        "foreign_speed": 1.0,
        "pause_ms": 3200
    })
}

fn two_pairs() -> Value {
    json!([
        { "native": "ahoj", "foreign": "hola" },
        { "native": "dobrou noc", "foreign": "buenas noches" }
    ])
}

async fn generate(ctx: &TestContext, pairs: Value, config: Value) -> Value {
    let response = ctx
        .client
        .post_with_auth(
            "/api/audio/generate",
            &json!({ "pairs": pairs, "config": config }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.body.clone().expect("Missing generation report")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_alternate_native_foreign_and_pause_per_pair(ctx: &TestContext) {
    let report = generate(ctx, two_pairs(), plain_config("cs", "es")).await;

    assert_eq!(
        segment_kinds(&report),
        vec!["native", "foreign", "silence", "native", "foreign", "silence"]
    );

    let durations: Vec<u64> = report["segments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["duration_ms"].as_u64().unwrap())
        .collect();
    assert_eq!(durations, vec![1000, 1000, 3200, 1000, 1000, 3200]);

    assert_eq!(report["duration_ms"], 10400);
    assert_eq!(report["pairs_total"], 2);
    assert_eq!(report["pairs_rendered"], 2);
    assert_eq!(report["warnings"], json!([]));
    assert_eq!(report["cached"], false);
    assert_eq!(report["file_name"], "superlearning_cs_es_2_phrases.mp3");
    assert_segments_cover_track(&report);

    assert_eq!(
        ctx.tts.calls(),
        vec![
            ("ahoj".to_string(), LanguageCode::Czech),
            ("hola".to_string(), LanguageCode::Spanish),
            ("dobrou noc".to_string(), LanguageCode::Czech),
            ("buenas noches".to_string(), LanguageCode::Spanish),
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_english_when_flag_code_is_selected(ctx: &TestContext) {
    let report = generate(
        ctx,
        json!([{ "native": "kočka", "foreign": "cat" }]),
        plain_config("cs", "gb"),
    )
    .await;

    assert_eq!(report["pairs_rendered"], 1);
    assert_eq!(report["file_name"], "superlearning_cs_en_1_phrases.mp3");
    assert_eq!(
        ctx.tts.calls(),
        vec![
            ("kočka".to_string(), LanguageCode::Czech),
            ("cat".to_string(), LanguageCode::English),
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speed_up_native_phrases_with_default_settings(ctx: &TestContext) {
    let report = generate(
        ctx,
        json!([{ "native": "dobrý den", "foreign": "buenos días" }]),
        json!({ "native_language": "cs", "foreign_language": "es" }),
    )
    .await;

    let segments = report["segments"].as_array().unwrap();

    // 1.15x on a one second clip
    assert_eq!(segments[0]["kind"], "native");
    assert_eq!(segments[0]["tempo_applied"], true);
    assert_eq!(segments[0]["duration_ms"], 869);

    // Foreign speed defaults to 1.0
    assert_eq!(segments[1]["kind"], "foreign");
    assert_eq!(segments[1]["tempo_applied"], false);
    assert_eq!(segments[1]["duration_ms"], 1000);

    assert_eq!(segments[2]["duration_ms"], 3200);
    assert_segments_cover_track(&report);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_leave_very_short_clips_at_natural_speed(ctx: &TestContext) {
    let report = generate(
        ctx,
        json!([{ "native": "ne", "foreign": "no" }]),
        json!({
            "native_language": "cs",
            "foreign_language": "es",
            "native_speed": 1.4,
            "foreign_speed": 0.8,
            "pause_ms": 1000
        }),
    )
    .await;

    let segments = report["segments"].as_array().unwrap();
    assert_eq!(segments[0]["tempo_applied"], false);
    assert_eq!(segments[0]["duration_ms"], 200);
    assert_eq!(segments[1]["tempo_applied"], false);
    assert_eq!(segments[1]["duration_ms"], 200);
    assert_eq!(report["duration_ms"], 1400);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_strip_inverted_marks_before_synthesis(ctx: &TestContext) {
    generate(
        ctx,
        json!([{ "native": "Jak se máš?", "foreign": "¿Qué tal?" }]),
        plain_config("cs", "es"),
    )
    .await;

    let calls = ctx.tts.calls();
    assert_eq!(calls[1], ("Qué tal?".to_string(), LanguageCode::Spanish));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_failed_pair_with_warning(ctx: &TestContext) {
    let report = generate(
        ctx,
        json!([
            { "native": "ahoj", "foreign": "please fail" },
            { "native": "dobrou noc", "foreign": "buenas noches" }
        ]),
        plain_config("cs", "es"),
    )
    .await;

    assert_eq!(report["pairs_total"], 2);
    assert_eq!(report["pairs_rendered"], 1);
    assert_eq!(segment_kinds(&report), vec!["native", "foreign", "silence"]);
    assert!(report["segments"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["pair_index"] == 1));

    let warning = &report["warnings"][0];
    assert_eq!(warning["pair_index"], 0);
    assert_eq!(warning["side"], "foreign");
    assert_eq!(warning["kind"], "synthesis");
    assert!(warning["message"]
        .as_str()
        .unwrap()
        .starts_with("Pair 1 skipped, foreign audio"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_pair_with_empty_foreign_text_silently(ctx: &TestContext) {
    let report = generate(
        ctx,
        json!([
            { "native": "ahoj", "foreign": "   " },
            { "native": "dobrou noc", "foreign": "buenas noches" }
        ]),
        plain_config("cs", "es"),
    )
    .await;

    assert_eq!(report["pairs_rendered"], 1);
    assert_eq!(report["warnings"], json!([]));
    assert_eq!(ctx.tts.calls().len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_export_empty_track_when_nothing_renders(ctx: &TestContext) {
    let report = generate(ctx, json!([]), plain_config("cs", "de")).await;

    assert_eq!(report["pairs_total"], 0);
    assert_eq!(report["pairs_rendered"], 0);
    assert_eq!(report["duration_ms"], 0);
    assert_eq!(report["segments"], json!([]));

    let response = ctx
        .client
        .get_with_auth(report["download_url"].as_str().unwrap(), &ctx.token)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::OK)
        .assert_header("x-duration-ms", "0")
        .assert_header("x-pairs-rendered", "0");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_generated_track(ctx: &TestContext) {
    let report = generate(ctx, two_pairs(), plain_config("cs", "es")).await;
    let hash = report["content_hash"].as_str().unwrap();
    assert_eq!(report["download_url"], format!("/api/audio/{}", hash));

    let response = ctx
        .client
        .get_with_auth(&format!("/api/audio/{}", hash), &ctx.token)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"superlearning_cs_es_2_phrases.mp3\"",
        )
        .assert_header("x-duration-ms", "10400")
        .assert_header("x-pairs-rendered", "2");

    // The test encoder writes WAV, so the body decodes back to the track
    let decoded = decode_audio(&response.body_bytes).unwrap();
    assert_eq!(decoded.sample_rate, ctx.config.output_sample_rate);
    assert!((decoded.duration_secs() - 10.4).abs() < 0.01);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reuse_identical_generation(ctx: &TestContext) {
    let first = generate(ctx, two_pairs(), plain_config("cs", "es")).await;
    let calls_after_first = ctx.tts.calls().len();

    let second = generate(ctx, two_pairs(), plain_config("cs", "es")).await;

    assert_eq!(second["cached"], true);
    assert_eq!(second["content_hash"], first["content_hash"]);
    assert_eq!(second["segments"], first["segments"]);
    assert_eq!(ctx.tts.calls().len(), calls_after_first);

    // Any setting change is a different track
    let mut slower = plain_config("cs", "es");
    slower["pause_ms"] = json!(2000);
    let third = generate(ctx, two_pairs(), slower).await;
    assert_eq!(third["cached"], false);
    assert_ne!(third["content_hash"], first["content_hash"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_invalidate_generated_track(ctx: &TestContext) {
    let report = generate(ctx, two_pairs(), plain_config("cs", "es")).await;
    let path = format!("/api/audio/{}", report["content_hash"].as_str().unwrap());

    let response = ctx.client.delete_with_auth(&path, &ctx.token).await.unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get_with_auth(&path, &ctx.token).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.client.delete_with_auth(&path, &ctx.token).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    // Generating again renders from scratch
    let again = generate(ctx, two_pairs(), plain_config("cs", "es")).await;
    assert_eq!(again["cached"], false);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_track(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_auth("/api/audio/deadbeef", &ctx.token)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("No generated audio for deadbeef");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_out_of_range_settings(ctx: &TestContext) {
    let cases = [
        ("native_speed", json!(1.6)),
        ("native_speed", json!(0.9)),
        ("foreign_speed", json!(1.3)),
        ("pause_ms", json!(500)),
        ("pause_ms", json!(6000)),
    ];

    for (field, value) in cases {
        let mut config = plain_config("cs", "es");
        config[field] = value;

        let response = ctx
            .client
            .post_with_auth(
                "/api/audio/generate",
                &json!({ "pairs": two_pairs(), "config": config }),
                &ctx.token,
            )
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message(&format!("{} must be between", field));
    }

    assert!(ctx.tts.calls().is_empty(), "Nothing should be synthesized");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unsupported_language(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth(
            "/api/audio/generate",
            &json!({ "pairs": two_pairs(), "config": plain_config("cs", "jp") }),
            &ctx.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_audio_for_prepared_batch(ctx: &TestContext) {
    let batch = ctx
        .client
        .post_with_auth(
            "/api/phrases/batch",
            &json!({
                "native_language": "cs",
                "foreign_language": "es",
                "files": [
                    { "name": "words.txt", "content": "Gracias" },
                    { "name": "lesson1.txt", "content": "ahoj|hola" }
                ]
            }),
            &ctx.token,
        )
        .await
        .unwrap();
    batch.assert_status(StatusCode::OK);
    let pairs = batch.body.as_ref().unwrap()["pairs"].clone();

    let report = generate(ctx, pairs, plain_config("cs", "es")).await;

    assert_eq!(report["pairs_rendered"], 2);
    let texts: Vec<String> = ctx.tts.calls().into_iter().map(|(text, _)| text).collect();
    assert_eq!(texts, vec!["ahoj", "hola", "Gracias (Czech)", "Gracias"]);
}
