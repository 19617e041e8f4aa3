//! End-to-end verification tests against a real signed exchange.

mod common;

use bytes::Bytes;
use coagent_http::testing::FakeTransport;
use coagent_http::Response;
use coagent_types::{KeyCache, SigningKey};
use coagent_verify::{
    fetch_verification_keys, verify_request_by_key_id, verify_signature, KeyFetchOptions,
    VerifyError,
};

use common::{KEY_ID, PUBLIC_KEY_PEM, RAW_BODY, SIGNATURE};

const ETAG: &str = "W/\"db60f89fb432b6c2362ac024c9322df5e6e2a8326595f7c1d35f807767d66e85\"";

fn platform_keys() -> Vec<SigningKey> {
    vec![SigningKey {
        key: PUBLIC_KEY_PEM.to_string(),
        key_identifier: KEY_ID.to_string(),
        is_current: true,
    }]
}

fn keys_response(etag: Option<&str>) -> Response {
    let body = serde_json::json!({ "public_keys": platform_keys() });
    let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
    if let Some(etag) = etag {
        headers.push(("etag".to_string(), etag.to_string()));
    }
    Response {
        status: 200,
        headers,
        body: Bytes::from(serde_json::to_vec(&body).unwrap()),
    }
}

#[test]
fn known_triple_verifies() {
    assert!(verify_signature(RAW_BODY, SIGNATURE, PUBLIC_KEY_PEM).unwrap());
}

#[test]
fn any_flipped_body_byte_fails_verification() {
    // flip one byte at a few positions across the body
    for index in [0, RAW_BODY.len() / 2, RAW_BODY.len() - 1] {
        let mut bytes = RAW_BODY.as_bytes().to_vec();
        bytes[index] ^= 0x01;
        let tampered = String::from_utf8_lossy(&bytes).into_owned();
        assert!(
            !verify_signature(&tampered, SIGNATURE, PUBLIC_KEY_PEM).unwrap(),
            "tampered byte at {index} still verified"
        );
    }
}

#[test]
fn wrong_key_fails_verification() {
    // a valid PEM that is not the signing key
    let other_pem = "-----BEGIN PUBLIC KEY-----\nMFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE6IvhPclZ6Yh3l4XJG8d6F6HGIKSP\nBPCMbYdInmvQ+4aiAQVRsQ9QWKg8g0TnbvJMU9q1vm1394ogmVyAZ0BE3Q==\n-----END PUBLIC KEY-----\n";
    assert!(!verify_signature(RAW_BODY, SIGNATURE, other_pem).unwrap());
}

#[tokio::test]
async fn verify_by_key_id_end_to_end() {
    let transport = FakeTransport::replying([keys_response(None)]);
    let result =
        verify_request_by_key_id(&transport, RAW_BODY, SIGNATURE, KEY_ID, &Default::default())
            .await
            .unwrap();

    assert!(result.is_valid);
    assert_eq!(
        result.cache,
        KeyCache {
            etag: String::new(),
            keys: platform_keys(),
        }
    );
}

#[tokio::test]
async fn unknown_key_id_is_a_hard_failure() {
    let transport = FakeTransport::replying([keys_response(None)]);
    let err = verify_request_by_key_id(
        &transport,
        RAW_BODY,
        SIGNATURE,
        "wrong_key",
        &Default::default(),
    )
    .await
    .unwrap_err();

    match err {
        VerifyError::KeyNotFound { key_id, keys } => {
            assert_eq!(key_id, "wrong_key");
            assert_eq!(keys, platform_keys());
        }
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_arguments_fail_before_any_network_call() {
    let transport = FakeTransport::new();
    for (body, sig, key_id, name) in [
        ("", SIGNATURE, KEY_ID, "payload"),
        (RAW_BODY, "", KEY_ID, "signature"),
        (RAW_BODY, SIGNATURE, "", "key_id"),
    ] {
        let err = verify_request_by_key_id(&transport, body, sig, key_id, &Default::default())
            .await
            .unwrap_err();
        match err {
            VerifyError::InvalidArgument(arg) => assert_eq!(arg, name),
            other => panic!("expected InvalidArgument({name}), got {other:?}"),
        }
    }
    assert!(transport.calls().is_empty(), "validation must precede I/O");
}

#[tokio::test]
async fn cache_round_trip_across_requests() {
    let transport = FakeTransport::replying([keys_response(Some(ETAG))]);
    let first =
        verify_request_by_key_id(&transport, RAW_BODY, SIGNATURE, KEY_ID, &Default::default())
            .await
            .unwrap();
    assert!(first.is_valid);
    assert_eq!(first.cache.etag, ETAG);

    // second request: server says the key set is unchanged
    transport.push_response(Response {
        status: 304,
        headers: vec![],
        body: Bytes::new(),
    });
    let options = KeyFetchOptions {
        cache: first.cache.clone(),
        ..Default::default()
    };
    let second = verify_request_by_key_id(&transport, RAW_BODY, SIGNATURE, KEY_ID, &options)
        .await
        .unwrap();
    assert!(second.is_valid);
    assert_eq!(second.cache, first.cache);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert!(!calls[0].has_header("if-none-match"));
    assert_eq!(calls[1].header("if-none-match"), Some(ETAG.to_string()));
}

#[tokio::test]
async fn transport_failure_propagates() {
    // an exhausted fake reports a connection error
    let transport = FakeTransport::new();
    let err = fetch_verification_keys(&transport, &KeyFetchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::Transport(_)));
}
