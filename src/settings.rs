use super::*;

pub const ENV_PREFIX: &str = "SNIPSHARE_";

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  api_url: Option<Url>,
  auth_url: Option<Url>,
  color_mode: Option<ColorMode>,
}

impl Settings {
  /// Layer command-line options over environment variables over the config
  /// file, then fill in defaults.
  pub fn merge(options: Options, env: BTreeMap<String, String>) -> Result<Self> {
    let settings = Settings::from_options(&options).or(Settings::from_env(&env)?);

    let config_path = match &options.config {
      Some(path) => Some(path.clone()),
      None => match env.get("CONFIG") {
        Some(path) => Some(PathBuf::from(path)),
        None => options
          .config_dir
          .clone()
          .or_else(|| env.get("CONFIG_DIR").map(PathBuf::from))
          .map(|dir| dir.join("snipshare.yaml"))
          .filter(|path| path.exists()),
      },
    };

    let config = match config_path {
      Some(path) => {
        log::info!("Loading configuration from {}", path.display());
        serde_yaml::from_reader::<File, Settings>(
          File::open(&path).with_context(|| format!("failed to open config {}", path.display()))?,
        )
        .with_context(|| format!("failed to deserialize config {}", path.display()))?
      }
      None => Settings::default(),
    };

    settings.or(config).or_defaults()
  }

  fn from_options(options: &Options) -> Self {
    Self {
      api_url: options.api_url.clone(),
      auth_url: options.auth_url.clone(),
      color_mode: options.color_mode,
    }
  }

  fn from_env(env: &BTreeMap<String, String>) -> Result<Self> {
    let get_url = |key: &str| -> Result<Option<Url>> {
      env
        .get(key)
        .map(|value| {
          value
            .parse::<Url>()
            .with_context(|| format!("failed to parse environment variable {ENV_PREFIX}{key} as URL"))
        })
        .transpose()
    };

    Ok(Self {
      api_url: get_url("API_URL")?,
      auth_url: get_url("AUTH_URL")?,
      color_mode: env
        .get("COLOR_MODE")
        .map(|value| {
          value
            .parse::<ColorMode>()
            .with_context(|| format!("failed to parse environment variable {ENV_PREFIX}COLOR_MODE"))
        })
        .transpose()?,
    })
  }

  fn or(self, source: Settings) -> Self {
    Self {
      api_url: self.api_url.or(source.api_url),
      auth_url: self.auth_url.or(source.auth_url),
      color_mode: self.color_mode.or(source.color_mode),
    }
  }

  fn or_defaults(self) -> Result<Self> {
    let api_url = match self.api_url {
      Some(url) => url,
      None => DEFAULT_API_URL.parse()?,
    };

    Ok(Self {
      auth_url: Some(self.auth_url.unwrap_or_else(|| api_url.clone())),
      api_url: Some(api_url),
      color_mode: Some(self.color_mode.unwrap_or_default()),
    })
  }

  pub fn api_url(&self) -> Result<&Url> {
    self
      .api_url
      .as_ref()
      .ok_or_else(|| anyhow!("settings have no API URL"))
  }

  pub fn auth_url(&self) -> Result<&Url> {
    match &self.auth_url {
      Some(url) => Ok(url),
      None => self.api_url(),
    }
  }

  pub fn color_mode(&self) -> ColorMode {
    self.color_mode.unwrap_or_default()
  }
}
