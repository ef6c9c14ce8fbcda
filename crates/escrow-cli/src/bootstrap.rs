use std::path::Path;

use anyhow::Context;
use escrow_config::EscrowConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, apply `--db`, and make sure the database
/// directory exists.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<EscrowConfig> {
    let mut config = EscrowConfig::load_with_dotenv().context("failed to load escrow config")?;
    apply_overrides(&mut config, flags);
    config.validate().context("invalid escrow config")?;
    ensure_db_parent(&config)?;
    Ok(config)
}

fn apply_overrides(config: &mut EscrowConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
}

fn ensure_db_parent(config: &EscrowConfig) -> anyhow::Result<()> {
    if config.database.is_in_memory() {
        return Ok(());
    }
    let Some(parent) = Path::new(&config.database.path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create database directory {}", parent.display()))?;
    tracing::debug!(dir = %parent.display(), "created database directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(db: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            db: db.map(str::to_string),
        }
    }

    #[test]
    fn db_flag_overrides_config_path() {
        let mut config = EscrowConfig::default();
        apply_overrides(&mut config, &flags(Some("/tmp/other.db")));
        assert_eq!(config.database.path, "/tmp/other.db");
    }

    #[test]
    fn missing_db_flag_keeps_config_path() {
        let mut config = EscrowConfig::default();
        apply_overrides(&mut config, &flags(None));
        assert_eq!(config.database.path, ".escrow/escrow.db");
    }

    #[test]
    fn creates_missing_database_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b").join("escrow.db");
        let mut config = EscrowConfig::default();
        config.database.path = nested.to_string_lossy().into_owned();

        ensure_db_parent(&config).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }
}
