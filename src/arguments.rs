use {super::*, settings::ENV_PREFIX};

#[derive(Debug, Parser)]
#[command(version, about = "Browse and organize shared code snippets")]
pub struct Arguments {
  #[command(flatten)]
  pub options: Options,
  #[command(subcommand)]
  pub subcommand: Subcommand,
}

impl Arguments {
  pub fn run(self) -> SubcommandResult {
    let mut env: BTreeMap<String, String> = BTreeMap::new();

    for (variable, value) in env::vars_os() {
      let Some(variable) = variable.to_str() else {
        continue;
      };

      let Some(key) = variable.strip_prefix(ENV_PREFIX) else {
        continue;
      };

      env.insert(
        key.into(),
        value.into_string().map_err(|value| {
          anyhow!(
            "environment variable `{variable}` not valid unicode: `{}`",
            value.to_string_lossy()
          )
        })?,
      );
    }

    self.subcommand.run(Settings::merge(self.options, env)?)
  }
}
