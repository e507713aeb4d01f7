use anyhow::{bail, Context as C, Result};
use interface_constants::{entries, find, Constant};
use std::{path::Path, str::FromStr};

pub const DEFAULT_CONFIG: &str = "./constants.toml";

#[derive(serde::Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct RawParams {
    format: Option<String>,
    radix: Option<String>,
    names: Option<Vec<String>>,
    prefix: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    List,
    C,
    Toml,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(Format::List),
            "c" => Ok(Format::C),
            "toml" => Ok(Format::Toml),
            _ => bail!("unknown format: {}", s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
    Hex,
    Dec,
}

impl FromStr for Radix {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hex" => Ok(Radix::Hex),
            "dec" => Ok(Radix::Dec),
            _ => bail!("unknown radix: {}", s),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Params {
    pub format: Format,
    pub radix: Radix,
    pub names: Option<Vec<String>>,
    pub prefix: String,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            format: Format::List,
            radix: Radix::Hex,
            names: None,
            prefix: String::new(),
        }
    }
}

impl Params {
    pub fn from_str(str: &str) -> Result<Params> {
        let config: RawParams = toml::from_str(str)?;

        let prefix = config.prefix.unwrap_or_default();
        // Prefixed names must stay valid C identifiers and bare TOML keys.
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            bail!("invalid prefix: {:?}", prefix);
        }

        Ok(Params {
            format: config
                .format
                .unwrap_or_else(|| "list".to_string())
                .parse()?,
            radix: config.radix.unwrap_or_else(|| "hex".to_string()).parse()?,
            names: config.names,
            prefix,
        })
    }

    /// Reads the configuration at `path`, or at [`DEFAULT_CONFIG`] when no
    /// path is given. A missing default file yields the default parameters.
    pub fn load(path: Option<&str>) -> Result<Params> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG).exists() => DEFAULT_CONFIG,
            None => {
                log::debug!("{} not found, using defaults", DEFAULT_CONFIG);
                return Ok(Params::default());
            }
        };
        let file = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        Params::from_str(&file).with_context(|| format!("parse {}", path))
    }

    /// The constants to emit: the configured names in order, or the whole
    /// table.
    pub fn select(&self) -> Result<Vec<Constant>> {
        match &self.names {
            Some(names) => names
                .iter()
                .map(|name| {
                    find(name).with_context(|| {
                        format!(
                            "unknown constant: {} (target_os = {})",
                            name,
                            std::env::consts::OS
                        )
                    })
                })
                .collect(),
            None => Ok(entries().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;
    use std::{env, sync::Mutex};
    use tempfile::TempDir;

    lazy_static! {
        // The working directory is shared by every test thread.
        static ref CWD: Mutex<()> = Mutex::new(());
    }

    fn load_in(dir: &TempDir) -> Result<Params> {
        let _guard = CWD.lock().unwrap();
        let previous = env::current_dir()?;
        env::set_current_dir(dir.path())?;
        let params = Params::load(None);
        env::set_current_dir(previous)?;
        params
    }

    #[test]
    fn test_empty_config() -> Result<()> {
        let params = Params::from_str("")?;
        assert_eq!(params.format, Format::List);
        assert_eq!(params.radix, Radix::Hex);
        assert_eq!(params.names, None);
        assert_eq!(params.prefix, "");
        Ok(())
    }

    #[test]
    fn test_full_config() -> Result<()> {
        let params = Params::from_str(
            r#"
            format = "c"
            radix = "dec"
            names = ["SIOCSIFFLAGS"]
            prefix = "NET_"
            "#,
        )?;
        assert_eq!(params.format, Format::C);
        assert_eq!(params.radix, Radix::Dec);
        assert_eq!(params.names, Some(vec!["SIOCSIFFLAGS".to_string()]));
        assert_eq!(params.prefix, "NET_");
        Ok(())
    }

    #[test]
    fn test_bad_config() {
        assert!(Params::from_str(r#"format = "json""#).is_err());
        assert!(Params::from_str(r#"radix = "oct""#).is_err());
        assert!(Params::from_str(r#"colour = "red""#).is_err());
    }

    #[test]
    fn test_bad_prefix() {
        for prefix in ["my net.", "a-b", "x y", "\u{e9}"] {
            let err = Params::from_str(&format!("prefix = {:?}", prefix)).unwrap_err();
            assert!(err.to_string().starts_with("invalid prefix"), "{}", err);
        }
        assert!(Params::from_str(r#"prefix = "Net_2_""#).is_ok());
    }

    #[test]
    fn test_select_all() -> Result<()> {
        let selected = Params::default().select()?;
        assert_eq!(selected, entries().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_select_unknown() {
        let params = Params {
            names: Some(vec!["SIOCNOSUCHTHING".to_string()]),
            ..Params::default()
        };
        let err = params.select().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("unknown constant: SIOCNOSUCHTHING"));
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn test_select_keeps_order() -> Result<()> {
        let params = Params {
            names: Some(vec!["SIOCSIFFLAGS".to_string(), "SIOCGIFFLAGS".to_string()]),
            ..Params::default()
        };
        let names: Vec<_> = params.select()?.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["SIOCSIFFLAGS", "SIOCGIFFLAGS"]);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = Params::load(Some("/nonexistent/constants.toml")).unwrap_err();
        assert_eq!(err.to_string(), "read /nonexistent/constants.toml");
    }

    #[test]
    fn test_load_default_missing() -> Result<()> {
        let dir = TempDir::new()?;
        let params = load_in(&dir)?;
        assert_eq!(params.format, Format::List);
        assert_eq!(params.radix, Radix::Hex);
        assert_eq!(params.names, None);
        assert_eq!(params.prefix, "");
        Ok(())
    }

    #[test]
    fn test_load_default_file() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join("constants.toml"),
            "format = \"toml\"\nradix = \"dec\"\nprefix = \"IF_\"\n",
        )?;
        let params = load_in(&dir)?;
        assert_eq!(params.format, Format::Toml);
        assert_eq!(params.radix, Radix::Dec);
        assert_eq!(params.prefix, "IF_");
        Ok(())
    }

    #[test]
    fn test_load_default_file_parse_error() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("constants.toml"), "format = \"json\"\n")?;
        let err = load_in(&dir).unwrap_err();
        assert_eq!(err.to_string(), format!("parse {}", DEFAULT_CONFIG));
        Ok(())
    }
}
