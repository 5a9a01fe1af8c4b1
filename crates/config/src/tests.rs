use crate::{AppConfig, ConfigError, JwtConfig, MAX_ACCESS_TOKEN_TTL_SECS};
use figment::Jail;
use secrecy::{ExposeSecret, Secret};

const SECRET: &str = "0123456789abcdef0123456789abcdef";

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let config = JwtConfig {
        secret: Secret::new(SECRET.to_string()),
        issuer: "keygate".to_string(),
        access_token_ttl_secs: 900,
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains(SECRET));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_load_defaults_and_env_override() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
            app_name = "keygate"

            [server]
            port = 9000
            "#,
        )?;
        jail.set_env("APP_JWT__SECRET", SECRET);
        jail.set_env("APP_SERVER__HOST", "127.0.0.1");

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;

        assert_eq!(config.app_env, "development");
        assert!(!config.is_production());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.jwt.secret.expose_secret(), SECRET);
        assert_eq!(config.jwt.issuer, "keygate");
        assert_eq!(config.jwt.access_token_ttl_secs, 900);
        assert_eq!(config.revocation.purge_interval_secs, 60);
        assert_eq!(config.telemetry.log_level, "info");
        Ok(())
    });
}

#[test]
fn test_environment_file_overrides_default() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "[telemetry]\nlog_level = \"debug\"\n")?;
        jail.create_file(
            "production.toml",
            "[telemetry]\nlog_level = \"warn\"\njson = true\n",
        )?;
        jail.set_env("APP_ENV", "production");
        jail.set_env("APP_JWT__SECRET", SECRET);

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;

        assert!(config.is_production());
        assert_eq!(config.telemetry.log_level, "warn");
        assert!(config.telemetry.json);
        Ok(())
    });
}

#[test]
fn test_missing_secret_fails() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "app_name = \"keygate\"\n")?;

        let result = AppConfig::load(".");
        assert!(matches!(result, Err(ConfigError::Load(_))));
        Ok(())
    });
}

#[test]
fn test_short_secret_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_JWT__SECRET", "too-short");

        let result = AppConfig::load(".");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

#[test]
fn test_zero_ttl_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_JWT__SECRET", SECRET);
        jail.set_env("APP_JWT__ACCESS_TOKEN_TTL_SECS", "0");

        let result = AppConfig::load(".");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

#[test]
fn test_huge_ttl_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_JWT__SECRET", SECRET);
        jail.set_env("APP_JWT__ACCESS_TOKEN_TTL_SECS", "10000000000000");

        let result = AppConfig::load(".");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

#[test]
fn test_huge_purge_interval_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_JWT__SECRET", SECRET);
        jail.set_env("APP_REVOCATION__PURGE_INTERVAL_SECS", "18446744073709551615");

        let result = AppConfig::load(".");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

#[test]
fn test_ttl_upper_bound_accepted() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_JWT__SECRET", SECRET);
        jail.set_env(
            "APP_JWT__ACCESS_TOKEN_TTL_SECS",
            MAX_ACCESS_TOKEN_TTL_SECS.to_string(),
        );

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;
        assert_eq!(config.jwt.access_token_ttl_secs, MAX_ACCESS_TOKEN_TTL_SECS);
        Ok(())
    });
}
