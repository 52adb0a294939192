//! Per-invocation state shared by the subcommands.

use std::{env, fmt::Display, path::PathBuf, process::ExitCode};

use spada_config::Config;
use spada_corpus::Corpus;
use spada_storage::Store;

/// Working directory and configuration, plus the corpus and store opened on demand.
pub struct CommandContext {
    /// Directory the command was run from.
    pub cwd: PathBuf,
    /// Merged configuration, or the defaults when no file was found.
    pub config: Config,
    /// Loaded by [`Self::corpus`].
    corpus: Option<Corpus>,
    /// Opened by [`Self::store`].
    store: Option<Store>,
}

impl CommandContext {
    /// Resolves the working directory and loads the configuration that applies to it.
    pub fn load() -> Result<Self, ExitCode> {
        let mut ctx = Self::load_cwd_only()?;
        ctx.config = Config::load(&ctx.cwd)
            .map_err(|e| fail(format!("failed to load configuration: {e}")))?;
        Ok(ctx)
    }

    /// Like [`Self::load`] but with default configuration.
    ///
    /// `init` uses this so that a broken config file can be overwritten.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = env::current_dir()
            .map_err(|e| fail(format!("could not determine current directory: {e}")))?;
        Ok(Self {
            cwd,
            config: Config::default(),
            corpus: None,
            store: None,
        })
    }

    /// Fails unless treatises or a glossary are configured.
    pub fn require_corpus(&self, show_init_hint: bool) -> Result<(), ExitCode> {
        if !self.config.corpus.is_empty() {
            return Ok(());
        }
        let code = fail("no treatises or glossary defined in configuration");
        if show_init_hint {
            eprintln!("Run 'spada init' to create a configuration file, then set [corpus] paths.");
        }
        Err(code)
    }

    /// The corpus, read from disk on first call.
    pub fn corpus(&mut self) -> Result<&Corpus, ExitCode> {
        if self.corpus.is_none() {
            let corpus = Corpus::load(&self.config)
                .map_err(|e| fail(format!("failed to load corpus: {e}")))?;
            self.corpus = Some(corpus);
        }
        self.corpus.as_ref().ok_or(ExitCode::FAILURE)
    }

    /// The store, opened on first call.
    pub fn store(&mut self) -> Result<&mut Store, ExitCode> {
        if self.store.is_none() {
            let store = Store::from_settings(&self.config.storage)
                .map_err(|e| fail(format!("failed to open storage: {e}")))?;
            self.store = Some(store);
        }
        self.store.as_mut().ok_or(ExitCode::FAILURE)
    }
}

/// Prints `message` as an error and returns the failure code.
fn fail(message: impl Display) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
}
