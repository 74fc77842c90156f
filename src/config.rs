use std::path::PathBuf;

use crate::{
    cli::Cli,
    error::{Error, Result},
    shell::OutputFormat,
    store::DEFAULT_CONCURRENCY,
    walker,
};

pub const ROOT_ENV: &str = "SIMPLESEARCH_ROOT";
pub const CONCURRENCY_ENV: &str = "SIMPLESEARCH_CONCURRENCY";

/// Runtime settings after flags and environment are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub concurrency: usize,
    pub search_limit: usize,
    pub format: OutputFormat,
}

impl Config {
    /// Resolve settings from, in order of priority:
    /// 1. Command-line flags
    /// 2. The SIMPLESEARCH_ROOT / SIMPLESEARCH_CONCURRENCY variables
    /// 3. Built-in defaults (concurrency only; the root is required)
    pub fn resolve(cli: &Cli) -> Result<Self> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let root = match (&cli.root, env(ROOT_ENV)) {
            (Some(path), _) => path.clone(),
            (None, Some(val)) => PathBuf::from(val),
            (None, None) => {
                return Err(Error::Config(format!(
                    "no directory given; pass one or set {ROOT_ENV}"
                )));
            }
        };

        let concurrency = match (cli.concurrency, env(CONCURRENCY_ENV)) {
            (Some(n), _) => n,
            (None, Some(val)) => val.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{CONCURRENCY_ENV} is not a number: {val}"
                ))
            })?,
            (None, None) => DEFAULT_CONCURRENCY,
        };
        if concurrency == 0 {
            return Err(Error::Config(
                "concurrency limit must be at least 1".into(),
            ));
        }

        if !walker::dir_exists(&root) {
            return Err(Error::RootDir(root));
        }

        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        Ok(Self {
            root,
            concurrency,
            search_limit: cli.limit,
            format,
        })
    }
}
