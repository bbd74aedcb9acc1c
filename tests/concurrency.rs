//! Concurrent use of a shared codec
//!
//! A `TokenCodec` holds no mutable state, so one instance can serve any number
//! of threads. These tests hammer it from scoped threads and check every
//! result independently.

use jwtio::*;

const RSA_PRIVATE: &str = include_str!("fixtures/rsa_private.pem");
const RSA_PUBLIC: &str = include_str!("fixtures/rsa_public.pem");
const ED25519_PRIVATE: &str = include_str!("fixtures/ed25519_private.pem");
const ED25519_PUBLIC: &str = include_str!("fixtures/ed25519_public.pem");

const THREADS: usize = 8;
const ROUNDS: usize = 25;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_thread_safe() {
    assert_send_sync::<TokenCodec>();
    assert_send_sync::<ValidationConfig>();
    assert_send_sync::<ParsedToken>();
    assert_send_sync::<Claims>();
    assert_send_sync::<Error>();
}

#[test]
fn test_shared_codec_across_threads() {
    let codec = TokenCodec::new();

    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            let codec = &codec;
            scope.spawn(move || {
                let secret = format!("secret-{thread}");
                for round in 0..ROUNDS {
                    let claims = Claims::new()
                        .with("thread", thread as u64)
                        .with("round", round as u64);

                    let token = codec
                        .generate(AlgorithmFamily::Hmac, secret.as_bytes(), Some(&claims))
                        .unwrap();
                    let validated = codec
                        .validate(AlgorithmFamily::Hmac, &token, secret.as_bytes())
                        .unwrap();
                    assert_eq!(validated, claims);
                }
            });
        }
    });
}

#[test]
fn test_mixed_families_concurrently() {
    let keys = [
        (AlgorithmFamily::Hmac, b"shared".as_slice(), b"shared".as_slice()),
        (AlgorithmFamily::Ed25519, ED25519_PRIVATE.as_bytes(), ED25519_PUBLIC.as_bytes()),
        (AlgorithmFamily::Rsa, RSA_PRIVATE.as_bytes(), RSA_PUBLIC.as_bytes()),
        (AlgorithmFamily::RsaPss, RSA_PRIVATE.as_bytes(), RSA_PUBLIC.as_bytes()),
    ];

    std::thread::scope(|scope| {
        for (family, signing_key, verifying_key) in keys {
            scope.spawn(move || {
                let claims = Claims::new().with("family", family.as_str());
                for _ in 0..4 {
                    let token = generate(family, signing_key, Some(&claims)).unwrap();
                    assert_eq!(validate(family, &token, verifying_key).unwrap(), claims);
                }
            });
        }
    });
}

#[test]
fn test_failures_do_not_leak_between_threads() {
    let good = generate(AlgorithmFamily::Hmac, b"right", None).unwrap();

    std::thread::scope(|scope| {
        let good = &good;
        let ok = scope.spawn(move || {
            (0..ROUNDS).all(|_| validate(AlgorithmFamily::Hmac, good, b"right").is_ok())
        });
        let bad = scope.spawn(move || {
            (0..ROUNDS).all(|_| {
                validate(AlgorithmFamily::Hmac, good, b"wrong") == Err(Error::SignatureInvalid)
            })
        });

        assert!(ok.join().unwrap());
        assert!(bad.join().unwrap());
    });
}
