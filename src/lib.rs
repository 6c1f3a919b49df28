#![allow(clippy::result_large_err, clippy::type_complexity)]
#![deny(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use {
    self::{
        arguments::Arguments,
        subcommand::{Subcommand, SubcommandResult},
    },
    anyhow::{anyhow, bail, Context, Error},
    clap::Parser,
    html_escaper::{Escape, Trusted},
    reqwest::Url,
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::{
        collections::BTreeMap,
        env,
        fmt::{self, Display, Formatter},
        fs::File,
        mem,
        net::ToSocketAddrs,
        path::PathBuf,
        process,
        str::FromStr,
        sync::{
            atomic::{self, AtomicBool},
            Arc, Mutex,
        },
        time::Duration,
    },
    tokio::{runtime::Runtime, task},
};

pub use self::{
    api::{CollectionUpdate, CollectionWithCount, Session, SnippetData, SnippetSummary},
    color_mode::ColorMode,
    modal::{Modal, Notification},
    options::Options,
    query::QueryValue,
    service::{DataService, ServiceError, SessionLookup, SnippetQuery},
    settings::Settings,
};


pub mod api;
pub mod arguments;
mod color_mode;
pub mod modal;
pub mod options;
pub mod query;
mod server_config;
pub mod service;
pub mod settings;
pub mod subcommand;
pub mod templates;

type Result<T = (), E = Error> = std::result::Result<T, E>;

static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);
static LISTENERS: Mutex<Vec<axum_server::Handle>> = Mutex::new(Vec::new());

pub fn parse_snipshare_server_args(
    args: &str,
) -> Result<(Settings, subcommand::server::Server)> {
    let arguments = Arguments::try_parse_from(args.split_whitespace())?;

    match arguments.subcommand {
        Subcommand::Server(server) => Ok((
            Settings::merge(arguments.options, BTreeMap::new())?,
            server,
        )),
        subcommand => bail!("unexpected subcommand: {subcommand:?}"),
    }
}

fn register_listener(handle: axum_server::Handle) {
    if let Ok(mut listeners) = LISTENERS.lock() {
        listeners.push(handle);
    }
}

fn shutdown_listeners() {
    if let Ok(listeners) = LISTENERS.lock() {
        listeners
            .iter()
            .for_each(|handle| handle.graceful_shutdown(Some(Duration::from_millis(100))));
    }
}

pub fn main() {
    env_logger::init();

    if let Err(err) = ctrlc::set_handler(move || {
        if SHUTTING_DOWN.fetch_or(true, atomic::Ordering::Relaxed) {
            process::exit(1);
        }

        println!("Shutting down gracefully. Press <CTRL-C> again to shutdown immediately.");

        shutdown_listeners();
    }) {
        log::warn!("Setting <CTRL-C> handler: {err}");
    }

    let args = Arguments::parse();

    let minify = args.options.minify;

    match args.run() {
        Err(err) => {
            eprintln!("error: {err}");
            err.chain()
                .skip(1)
                .for_each(|cause| eprintln!("because: {cause}"));
            if env::var_os("RUST_BACKTRACE")
                .map(|val| val == "1")
                .unwrap_or_default()
            {
                eprintln!("{}", err.backtrace());
            }

            process::exit(1);
        }
        Ok(output) => {
            if let Some(output) = output {
                output.print_json(minify);
            }
        }
    }
}
