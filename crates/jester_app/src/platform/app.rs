use std::collections::VecDeque;
use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;
use jester_core::{update, AppState, AppViewModel, CollectionStore, Msg, SlotStore};
use jester_engine::{FetchController, FileSlotStore, JokeProvider, ReqwestProvider};
use jester_logging::jester_debug;

use super::cli::{resolve_id, Cli, Command};
use super::config::load_config;
use super::effects::EffectRunner;
use super::{logging, render};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log_destination(), cli.verbose, &cli.data_dir);

    let config = load_config(&cli.config_path());
    let store = CollectionStore::initialize_with_key(
        FileSlotStore::new(&cli.data_dir),
        config.storage_key.clone(),
    );
    let provider = ReqwestProvider::new(config.fetch_settings())
        .with_context(|| format!("invalid joke endpoint {:?}", config.endpoint))?;
    let controller =
        FetchController::new(provider).with_max_attempts_per_item(config.max_attempts_per_joke);
    let runner = EffectRunner::new(store, controller).context("failed to start async runtime")?;

    let mut app = App::new(AppState::new(config.jokes_per_fetch), runner);
    app.run(cli.command(), &mut io::stdout().lock())
}

/// Message loop tying the pure core state machine to its effect runner.
pub struct App<P, S> {
    state: AppState,
    runner: EffectRunner<P, S>,
}

impl<P: JokeProvider, S: SlotStore> App<P, S> {
    pub fn new(state: AppState, runner: EffectRunner<P, S>) -> Self {
        Self { state, runner }
    }

    /// Starts the session, executes `command`, then renders the sorted list.
    ///
    /// An explicit fetch replaces the startup batch of an empty collection.
    /// Fails when a fetch cycle failed, after the list has been rendered.
    pub fn run(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
        if !matches!(command, Command::Fetch { .. }) {
            let collection_len = self.runner.store().len();
            self.dispatch(Msg::Started { collection_len }, out)?;
        }

        match command {
            Command::List => {}
            Command::Fetch { count } => self.dispatch(Msg::FetchRequested { count }, out)?,
            Command::Up { id } => self.vote(&id, 1, out)?,
            Command::Down { id } => self.vote(&id, -1, out)?,
        }

        render::render(out, &self.view())?;
        if let Some(message) = self.state.last_error() {
            bail!("failed to fetch jokes: {message}");
        }
        Ok(())
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(&self.state, &self.runner.store().snapshot())
    }

    fn vote(&mut self, input: &str, delta: i64, out: &mut impl Write) -> anyhow::Result<()> {
        match resolve_id(input, self.runner.store().items())? {
            Some(id) => Ok(self.dispatch(Msg::VoteRequested { id, delta }, out)?),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            if self.state.consume_dirty() {
                if let Some(count) = self.state.loading_count() {
                    render::render_loading(out, count)?;
                }
            }
            for effect in effects {
                jester_debug!("Running {:?}", effect);
                inbox.extend(self.runner.run(effect));
            }
        }
        Ok(())
    }
}
