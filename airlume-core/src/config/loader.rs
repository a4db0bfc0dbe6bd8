//! Configuration loading
//!
//! TOML is the human-edited form; postcard binary is the compact stored form.
//! [`load`] prefers TOML and falls back to binary, validating whichever it
//! used.

#[cfg(feature = "serde")]
use super::types::MonitorConfig;
#[cfg(feature = "serde")]
use super::types::ConfigError;

/// Largest serialized config
pub const MAX_CONFIG_SIZE: usize = 64;

/// Parse a TOML config
///
/// Missing keys take their [`MonitorConfig::default`] values.
///
/// ```toml
/// read_period_ms = 1000
/// output_period_ms = 5000
/// window_capacity = 30
/// display_layout = "dual"
/// warmup = "calculating"
/// ```
#[cfg(feature = "toml")]
pub fn parse_toml(input: &str) -> Result<MonitorConfig, ConfigError> {
    let config: MonitorConfig = toml::from_str(input).map_err(|_e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("TOML parse error: {:?}", defmt::Debug2Format(&_e));
        ConfigError::TomlParse
    })?;
    config.validate()?;
    Ok(config)
}

/// Serialize a config into `buf`, returning the used prefix
#[cfg(feature = "serde")]
pub fn to_postcard<'a>(config: &MonitorConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
    postcard::to_slice(config, buf).map_err(|_| ConfigError::Serialize)
}

/// Deserialize and validate a binary config
#[cfg(feature = "serde")]
pub fn from_postcard(bytes: &[u8]) -> Result<MonitorConfig, ConfigError> {
    let config: MonitorConfig =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

    if config.version != super::types::CONFIG_VERSION {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Config version mismatch: found {}, expected {}",
            config.version,
            super::types::CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch);
    }

    config.validate()?;
    Ok(config)
}

/// Load from TOML if present, else from binary
///
/// A TOML source that fails to parse falls through to the binary one.
#[cfg(feature = "toml")]
pub fn load(toml: Option<&str>, binary: Option<&[u8]>) -> Result<MonitorConfig, ConfigError> {
    if let Some(input) = toml {
        match parse_toml(input) {
            Ok(config) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Loaded configuration from TOML");
                return Ok(config);
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Failed to load TOML config: {:?}, trying binary", _e);
            }
        }
    }

    match binary {
        Some(bytes) => from_postcard(bytes),
        None => Err(ConfigError::NotFound),
    }
}

#[cfg(all(test, feature = "toml"))]
mod tests {
    use super::*;
    use crate::config::types::{DisplayLayout, WarmupPolicy};

    const DUAL_TOML: &str = r#"
        # fast reads, slow redraw
        read_period_ms = 1000
        output_period_ms = 5000
        window_capacity = 30
        display_layout = "dual"
        warmup = "calculating"
    "#;

    #[test]
    fn test_parse_dual_variant() {
        let config = parse_toml(DUAL_TOML).unwrap();
        assert_eq!(config, MonitorConfig::dual_panel());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = parse_toml("log_frames = true").unwrap();
        assert!(config.log_frames);
        assert_eq!(config.read_period_ms, 15_000);
        assert_eq!(config.display_layout, DisplayLayout::Single);
        assert_eq!(config.warmup, WarmupPolicy::PartialAverage);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(parse_toml("read_period_ms = 0"), Err(ConfigError::ZeroPeriod));
        assert_eq!(
            parse_toml("display_layout = \"triple\""),
            Err(ConfigError::TomlParse)
        );
        assert_eq!(parse_toml("window_capacity = 99"), Err(ConfigError::InvalidWindow));
    }

    #[test]
    fn test_postcard_round_trip() {
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let original = MonitorConfig::dual_panel();
        let used = to_postcard(&original, &mut buf).unwrap().len();

        assert_eq!(from_postcard(&buf[..used]), Ok(original));
    }

    #[test]
    fn test_postcard_version_checked() {
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let mut config = MonitorConfig::default();
        config.version = 7;
        let used = to_postcard(&config, &mut buf).unwrap().len();

        assert_eq!(from_postcard(&buf[..used]), Err(ConfigError::VersionMismatch));
    }

    #[test]
    fn test_load_prefers_toml_then_binary() {
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = to_postcard(&MonitorConfig::dual_panel(), &mut buf).unwrap().len();

        let from_toml = load(Some("window_capacity = 10"), Some(&buf[..used])).unwrap();
        assert_eq!(from_toml.window_capacity, 10);

        let fallback = load(Some("not = [valid"), Some(&buf[..used])).unwrap();
        assert_eq!(fallback, MonitorConfig::dual_panel());

        assert_eq!(load(None, None), Err(ConfigError::NotFound));
    }
}
