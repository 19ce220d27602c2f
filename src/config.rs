use std::{env, path::PathBuf};

use eyre::{Context as _, Result};
use hyper::Uri;

use crate::{extract::GatePolicy, util::Args};

pub const DEFAULT_BASE_URL: &str = "https://www.playgwent.com/en/profile";
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Clone, Debug)]
pub struct Config {
    pub players_path: PathBuf,
    pub output_path: PathBuf,
    pub concurrency: usize,
    pub base_url: Box<str>,
    pub gate: GatePolicy,
    pub debug: bool,
}

impl Config {
    /// Command line arguments take precedence over env variables.
    pub fn new(args: &Args) -> Result<Self> {
        let concurrency = match args.concurrency {
            Some(concurrency) => concurrency,
            None => optional_env_var("SCRAPER_CONCURRENCY")?.unwrap_or(DEFAULT_CONCURRENCY),
        };

        let base_url = match args.base_url {
            Some(ref base_url) => base_url.as_str().into(),
            None => optional_env_var("PROFILE_BASE_URL")?
                .unwrap_or_else(|| Box::from(DEFAULT_BASE_URL)),
        };

        let config = Self {
            players_path: args.players.clone(),
            output_path: args.output.clone(),
            concurrency,
            base_url,
            gate: args.gate,
            debug: args.debug,
        };

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.concurrency > 0, "concurrency must be at least 1");

        let uri: Uri = self
            .base_url
            .parse()
            .with_context(|| format!("failed to parse base url `{}`", self.base_url))?;

        ensure!(
            uri.scheme().is_some() && uri.host().is_some(),
            "base url `{}` must be absolute, e.g. `{DEFAULT_BASE_URL}`",
            self.base_url
        );

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players_path: PathBuf::from("Players.csv"),
            output_path: PathBuf::from("Data.csv"),
            concurrency: DEFAULT_CONCURRENCY,
            base_url: Box::from(DEFAULT_BASE_URL),
            gate: GatePolicy::default(),
            debug: false,
        }
    }
}

trait EnvKind: Sized {
    const EXPECTED: &'static str;

    fn from_str(s: String) -> Result<Self, String>;
}

macro_rules! env_kind {
    ($($ty:ty: $arg:ident => $impl:block,)*) => {
        $(
            impl EnvKind for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_str($arg: String) -> Result<Self, String> {
                    $impl
                }
            }
        )*
    };
}

env_kind! {
    Box<str>: s => { Ok(s.into_boxed_str()) },
    usize: s => { s.parse().map_err(|_| s) },
}

fn optional_env_var<T: EnvKind>(name: &'static str) -> Result<Option<T>> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };

    T::from_str(value).map(Some).map_err(|value| {
        eyre!(
            "failed to parse env variable `{name}={value}`; expected {expected}",
            expected = T::EXPECTED
        )
    })
}
