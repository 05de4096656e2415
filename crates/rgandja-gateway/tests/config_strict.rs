#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rgandja_gateway::config::{self, EmailProvider};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
  cors_origin: ["*"] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert!(cfg.server.allows_any_origin());
    assert_eq!(cfg.engine.label(), "RGandja Neural Core v1.0.0");
    assert_eq!(cfg.license.trial_expiry.to_string(), "2026-06-30");
    assert_eq!(cfg.license.upgrade_expiry.to_string(), "2026-12-31");
    assert_eq!(cfg.email.provider, EmailProvider::Log);
}

#[test]
fn rejects_other_versions() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(err.to_string().contains("unsupported config version"));
}

#[test]
fn rejects_bad_listen_address() {
    let bad = "version: 1\nserver:\n  listen: \"localhost\"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("server.listen"));
}

#[test]
fn rejects_bad_sender() {
    let bad = "version: 1\nemail:\n  sender_email: \"nobody\"\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn parses_full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
  cors_origins: ["https://rgandja.com"]
license:
  trial_expiry: "2027-01-31"
  upgrade_expiry: "2027-12-31"
email:
  provider: brevo
  api_key_env: "MY_BREVO_KEY"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert!(!cfg.server.allows_any_origin());
    assert_eq!(cfg.license.trial_expiry.to_string(), "2027-01-31");
    assert_eq!(cfg.email.provider, EmailProvider::Brevo);
    assert_eq!(cfg.email.api_key_env, "MY_BREVO_KEY");
}

#[test]
fn shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../rgandja.yaml");
    let cfg = config::load_from_file(path).expect("shipped config must load");
    assert_eq!(cfg.engine.protocol, "RGD-Alpha");
}
