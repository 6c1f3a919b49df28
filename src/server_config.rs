use super::*;

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
  pub(crate) color_mode: ColorMode,
  pub(crate) json_api_enabled: bool,
  pub(crate) sign_in_url: Url,
}

impl ServerConfig {
  pub(crate) fn new(settings: &Settings, json_api_enabled: bool) -> Result<Self> {
    Ok(Self {
      color_mode: settings.color_mode(),
      json_api_enabled,
      sign_in_url: service::endpoint(settings.auth_url()?, "api/auth/signin")?,
    })
  }
}

#[cfg(test)]
impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      color_mode: ColorMode::Light,
      json_api_enabled: true,
      sign_in_url: "http://127.0.0.1:3000/api/auth/signin".parse().unwrap(),
    }
  }
}
