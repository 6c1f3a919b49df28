use super::*;

pub mod server;
mod settings;

#[derive(Debug, Parser)]
pub enum Subcommand {
  #[command(about = "Run the snippet explorer and dashboard server")]
  Server(server::Server),
  #[command(about = "Display settings")]
  Settings,
}

impl Subcommand {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    match self {
      Self::Server(server) => {
        let handle = axum_server::Handle::new();
        register_listener(handle.clone());
        server.run(settings, handle)
      }
      Self::Settings => settings::run(settings),
    }
  }
}

pub trait Output: Send {
  fn print_json(&self, minify: bool);
}

impl<T> Output for T
where
  T: Serialize + Send,
{
  fn print_json(&self, minify: bool) {
    if minify {
      serde_json::to_writer(std::io::stdout(), self).ok();
    } else {
      serde_json::to_writer_pretty(std::io::stdout(), self).ok();
    }
    println!();
  }
}

pub type SubcommandResult = Result<Option<Box<dyn Output>>>;
