use super::*;

#[derive(Default, Debug, PartialEq, Copy, Clone)]
pub enum ColorMode {
  #[default]
  Light,
  Dark,
}

impl ColorMode {
  pub(crate) fn name(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
    }
  }
}

impl Display for ColorMode {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ColorMode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      _ => bail!("invalid color mode `{s}`, expected `light` or `dark`"),
    }
  }
}

impl Serialize for ColorMode {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for ColorMode {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    String::deserialize(deserializer)?
      .parse()
      .map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::test::pretty_assert_eq};

  #[test]
  fn from_str_and_display() {
    for mode in [ColorMode::Light, ColorMode::Dark] {
      pretty_assert_eq!(mode.to_string().parse::<ColorMode>().unwrap(), mode);
    }
  }

  #[test]
  fn unknown_mode_is_rejected() {
    assert_eq!(
      "sepia".parse::<ColorMode>().unwrap_err().to_string(),
      "invalid color mode `sepia`, expected `light` or `dark`"
    );
  }

  #[test]
  fn deserializes_from_yaml() {
    pretty_assert_eq!(
      serde_yaml::from_str::<ColorMode>("dark").unwrap(),
      ColorMode::Dark
    );
  }
}
