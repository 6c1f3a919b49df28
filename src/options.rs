use super::*;

#[derive(Clone, Default, Debug, Parser)]
pub struct Options {
  #[arg(
    long,
    help = "Fetch snippets and collections from the data service at <API_URL>. [default: http://127.0.0.1:3000]"
  )]
  pub(crate) api_url: Option<Url>,
  #[arg(
    long,
    help = "Look up sessions with the auth provider at <AUTH_URL>. [default: <API_URL>]"
  )]
  pub(crate) auth_url: Option<Url>,
  #[arg(long, help = "Render pages in <COLOR_MODE>, `light` or `dark`. [default: light]")]
  pub(crate) color_mode: Option<ColorMode>,
  #[arg(long, help = "Load configuration from <CONFIG>.")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, help = "Load configuration from <CONFIG_DIR>/snipshare.yaml.")]
  pub(crate) config_dir: Option<PathBuf>,
  #[arg(long, help = "Minify JSON output.")]
  pub(crate) minify: bool,
}
