//! End-to-end credential persistence with real RSA-3072 key material.

use std::path::PathBuf;
use std::sync::OnceLock;

use tether_common::capability::StorageCapability;
use tether_common::error::ErrorCode;
use tether_common::types::SecurityProfile;
use tether_crypto::jwt::{ClientAssertion, DecodedToken};
use tether_crypto::{generate_keypair, sign, verify_signature, KeyMaterial};
use tether_store::{CredentialStore, RegistrationRecord, StoreError};

fn device_keys() -> &'static KeyMaterial {
    static KEYS: OnceLock<KeyMaterial> = OnceLock::new();
    KEYS.get_or_init(|| generate_keypair().unwrap())
}

fn temp_store(name: &str) -> (PathBuf, CredentialStore) {
    let dir = std::env::temp_dir().join(format!(
        "tether-store-it-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("registration.txt");
    let store = CredentialStore::new(&path, StorageCapability::default());
    (dir, store)
}

#[test]
fn rsa_record_survives_restart_byte_for_byte() {
    let (dir, store) = temp_store("rsa");
    let record = RegistrationRecord::rsa(
        "3b1f5c2e-device",
        device_keys().clone(),
        "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiJ9.eyJpc3MiOiJkZXZpY2UifQ.AAAA",
        "https://gateway.example.com/api/agentmanagement/v3/register/3b1f5c2e-device",
    );

    store.save(&record).unwrap();
    let loaded = store.load(SecurityProfile::Rsa3072).unwrap();

    assert_eq!(loaded.client_id, record.client_id);
    assert_eq!(
        loaded.key_material().unwrap().public_key(),
        device_keys().public_key()
    );
    assert_eq!(
        loaded.key_material().unwrap().private_key(),
        device_keys().private_key()
    );
    assert_eq!(
        loaded.registration_access_token,
        record.registration_access_token
    );
    assert_eq!(loaded.registration_uri, record.registration_uri);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reloaded_keys_still_sign() {
    let (dir, store) = temp_store("sign");
    let record = RegistrationRecord::rsa("device", device_keys().clone(), "rat", "uri");
    store.save(&record).unwrap();

    let loaded = store.load(SecurityProfile::Rsa3072).unwrap();
    let keys = loaded.key_material().unwrap();
    let signature = sign(keys.private_key(), b"telemetry batch").unwrap();

    assert_eq!(signature.len(), 384);
    assert!(verify_signature(
        device_keys().public_key(),
        b"telemetry batch",
        &signature
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reloaded_record_signs_client_assertion() {
    let (dir, store) = temp_store("assertion");
    store
        .save(&RegistrationRecord::rsa(
            "device",
            device_keys().clone(),
            "rat",
            "uri",
        ))
        .unwrap();

    let loaded = store.load(SecurityProfile::Rsa3072).unwrap();
    let token = ClientAssertion::new(&loaded.client_id, "https://gateway.example.com", 1, 300)
        .unwrap()
        .sign(loaded.signing_credential())
        .unwrap();

    let decoded = DecodedToken::parse(&token).unwrap();
    assert!(decoded.verify_rs256(device_keys().public_key()));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rotation_keeps_identity_and_replaces_keys() {
    let (dir, store) = temp_store("rotate");
    let original = RegistrationRecord::rsa("device", device_keys().clone(), "rat", "uri");
    store.save(&original).unwrap();

    let rotated = store
        .load(SecurityProfile::Rsa3072)
        .unwrap()
        .rotate_keys()
        .unwrap();
    store.save(&rotated).unwrap();
    let reloaded = store.load(SecurityProfile::Rsa3072).unwrap();

    assert_eq!(reloaded.client_id, "device");
    assert_eq!(reloaded.registration_access_token, "rat");
    assert_ne!(
        reloaded.key_material().unwrap().public_key(),
        device_keys().public_key()
    );
    assert_eq!(reloaded, rotated);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn first_run_reports_not_onboarded() {
    let (dir, store) = temp_store("first-run");
    let err = store.load(SecurityProfile::Rsa3072).unwrap_err();

    let code = ErrorCode::from(&err);
    assert_eq!(code, ErrorCode::RegistrationInfoNotLoaded);
    assert!(code.is_not_onboarded());
    assert!(!dir.exists());
}

#[test]
fn corrupted_private_key_block_is_not_loaded() {
    let (dir, store) = temp_store("corrupt");
    store
        .save(&RegistrationRecord::rsa(
            "device",
            device_keys().clone(),
            "rat",
            "uri",
        ))
        .unwrap();

    let text = std::fs::read_to_string(store.path()).unwrap();
    let corrupted = text.replace("-----END RSA PRIVATE KEY-----\n", "");
    std::fs::write(store.path(), corrupted).unwrap();

    let err = store.load(SecurityProfile::Rsa3072).unwrap_err();
    assert_eq!(ErrorCode::from(&err), ErrorCode::RegistrationInfoNotLoaded);
    assert!(!err.is_missing());

    let _ = std::fs::remove_dir_all(&dir);
}

/// PKCS#8 output from `openssl genpkey` signs fine but is not the stored
/// form; saving it must fail and leave the previous file loadable.
#[test]
fn pkcs8_private_key_never_replaces_a_loadable_file() {
    use rsa::pkcs1::DecodeRsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};

    let (dir, store) = temp_store("pkcs8");
    let good = RegistrationRecord::rsa("device", device_keys().clone(), "rat", "uri");
    store.save(&good).unwrap();

    let pkcs8 = rsa::RsaPrivateKey::from_pkcs1_pem(device_keys().private_key())
        .unwrap()
        .to_pkcs8_pem(LineEnding::LF)
        .unwrap();
    assert_eq!(sign(&pkcs8, b"payload").unwrap().len(), 384);

    let raw = RegistrationRecord::rsa(
        "device",
        KeyMaterial::from_pem(device_keys().public_key(), pkcs8.as_str()),
        "rat",
        "uri",
    );
    let err = store.save(&raw).unwrap_err();
    assert!(matches!(err, StoreError::InvalidField { field: "private_key", .. }));
    assert_eq!(ErrorCode::from(&err), ErrorCode::RegistrationInfoNotSaved);
    assert_eq!(store.load(SecurityProfile::Rsa3072).unwrap(), good);

    // Imported through the normalizing path, the same key round-trips.
    let imported = RegistrationRecord::rsa(
        "device",
        KeyMaterial::import(device_keys().public_key(), &pkcs8).unwrap(),
        "rat",
        "uri",
    );
    store.save(&imported).unwrap();
    assert_eq!(store.load(SecurityProfile::Rsa3072).unwrap(), imported);

    let _ = std::fs::remove_dir_all(&dir);
}
