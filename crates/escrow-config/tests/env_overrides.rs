use figment::Jail;
use pretty_assertions::assert_eq;
use escrow_config::{ConfigError, EscrowConfig};

#[test]
fn env_sets_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("ESCROW_DATABASE__PATH", ":memory:");
        jail.set_env("ESCROW_DATABASE__STATEMENT_TIMEOUT_MS", "750");
        jail.set_env("ESCROW_FEED__MAX_ITEMS", "10");

        let config = EscrowConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        assert_eq!(config.database.statement_timeout_ms, 750);
        assert_eq!(config.feed.limit(), Some(10));
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".escrow")?;
        jail.create_file(
            ".escrow/config.toml",
            r"
[feed]
max_items = 5
",
        )?;
        jail.set_env("ESCROW_FEED__MAX_ITEMS", "7");

        let config = EscrowConfig::load().expect("config loads");
        assert_eq!(config.feed.max_items, 7);
        Ok(())
    });
}

#[test]
fn zero_timeout_from_env_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("ESCROW_DATABASE__STATEMENT_TIMEOUT_MS", "0");

        let config = EscrowConfig::load().expect("config loads");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
        Ok(())
    });
}
