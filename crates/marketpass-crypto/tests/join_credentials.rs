//! # Join Credential Properties
//!
//! Exercises the four public operations against the process-wide runtime:
//! determinism, salt uniqueness, issue/verify round trips, rejection of
//! wrong passwords, and output formats.

use std::collections::HashSet;

use marketpass_core::hex::is_lower_hex;
use marketpass_core::{CredentialError, PasswordHash, Salt, MAX_SALT_BYTES};
use marketpass_crypto::{
    compute_join_proof, compute_password_digest, create_password_secret, generate_salt, init,
};

#[test]
fn runtime_initializes() {
    let rt = init().expect("crypto environment available");
    assert!(rt.digest().backend().is_compiled());
}

// ---------------------------------------------------------------------------
// Salt generation
// ---------------------------------------------------------------------------

#[test]
fn salt_has_twice_the_byte_length_in_lowercase_hex() {
    for n in [0usize, 1, 8, 16, 32] {
        let salt = generate_salt(n).unwrap();
        assert_eq!(salt.as_str().len(), 2 * n);
        assert!(is_lower_hex(salt.as_str()));
    }
}

#[test]
fn oversized_salt_requests_are_rejected() {
    assert_eq!(generate_salt(MAX_SALT_BYTES).unwrap().as_str().len(), 2 * MAX_SALT_BYTES);
    for n in [MAX_SALT_BYTES + 1, usize::MAX] {
        assert!(matches!(
            generate_salt(n),
            Err(CredentialError::LengthOutOfRange { requested, .. }) if requested == n
        ));
    }
}

#[test]
fn thousand_salts_are_distinct() {
    let salts: HashSet<String> = (0..1000)
        .map(|_| generate_salt(16).unwrap().as_str().to_string())
        .collect();
    assert_eq!(salts.len(), 1000);
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

#[tokio::test]
async fn digest_is_deterministic() {
    let salt = Salt::new("00112233445566778899aabbccddeeff");
    let a = compute_password_digest("cornell123", &salt).await.unwrap();
    let b = compute_password_digest("cornell123", &salt).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.as_str(),
        "984bcaf3aaaeb4c1d73fd43ce4eae0ce2ba00f07b12193d537ccebc1bb9b6c26"
    );
}

#[tokio::test]
async fn digest_format_for_edge_inputs() {
    for (password, salt) in [("", ""), ("pw", ""), ("", "ab"), ("ünïcödé", "ff")] {
        let hash = compute_password_digest(password, &Salt::new(salt)).await.unwrap();
        assert_eq!(hash.as_str().len(), 64);
        assert!(is_lower_hex(hash.as_str()));
    }
}

#[tokio::test]
async fn join_proof_equals_password_digest() {
    let salt = generate_salt(16).unwrap();
    let digest = compute_password_digest("pw", &salt).await.unwrap();
    let proof = compute_join_proof("pw", &salt).await.unwrap();
    assert!(proof == digest);
}

// ---------------------------------------------------------------------------
// Issue / verify
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cornell_scenario() {
    let cred = create_password_secret("cornell123").await.unwrap();
    assert_eq!(cred.salt().as_str().len(), 32);
    assert_eq!(cred.hash().as_str().len(), 64);

    let proof = compute_join_proof("cornell123", cred.salt()).await.unwrap();
    assert!(proof == *cred.hash());

    let wrong = compute_join_proof("wrongpass", cred.salt()).await.unwrap();
    assert!(wrong != *cred.hash());
    assert!(!wrong.matches(cred.hash()));
}

#[tokio::test]
async fn same_password_yields_unrelated_credentials() {
    let a = create_password_secret("shared").await.unwrap();
    let b = create_password_secret("shared").await.unwrap();
    assert_ne!(a.salt(), b.salt());
    assert_ne!(a.hash(), b.hash());

    // Each proof only matches its own credential.
    let proof_a = compute_join_proof("shared", a.salt()).await.unwrap();
    assert!(proof_a.matches(a.hash()));
    assert!(!proof_a.matches(b.hash()));
}

#[tokio::test]
async fn one_character_change_is_rejected() {
    let cred = create_password_secret("marketplace!").await.unwrap();
    for candidate in ["marketplace?", "Marketplace!", "marketplace", "marketplace!!"] {
        let proof = compute_join_proof(candidate, cred.salt()).await.unwrap();
        assert!(!proof.matches(cred.hash()), "{candidate} must not verify");
    }
}

#[tokio::test]
async fn stored_credential_survives_persistence() {
    let cred = create_password_secret("persist me").await.unwrap();
    let json = serde_json::to_string(&cred).unwrap();

    let loaded: marketpass_core::Credential = serde_json::from_str(&json).unwrap();
    let stored_hash = PasswordHash::from_hex(loaded.hash().as_str()).unwrap();
    let proof = compute_join_proof("persist me", loaded.salt()).await.unwrap();
    assert!(proof.matches(&stored_hash));
}

#[tokio::test]
async fn concurrent_issue_and_verify() {
    let mut handles = Vec::new();
    for i in 0..32 {
        handles.push(tokio::spawn(async move {
            let password = format!("password-{i}");
            let cred = create_password_secret(&password).await.unwrap();
            let proof = compute_join_proof(&password, cred.salt()).await.unwrap();
            assert!(proof.matches(cred.hash()));
            cred.salt().clone()
        }));
    }
    let mut salts = HashSet::new();
    for handle in handles {
        salts.insert(handle.await.unwrap());
    }
    assert_eq!(salts.len(), 32);
}
