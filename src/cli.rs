//! CLI implementation.
mod command;
mod config;
mod loader;
mod session;

use crate::cli::config::Config;
use crate::cli::loader::{spawn_load, wait_for_load};
use crate::cli::session::Session;
use crate::data::source::SourceType;
use crate::error::{Error, Result};
use crate::logs::{Level, Logger};
use crate::render::TermRenderer;
use crate::state::{reduce, Action, AppState, InputEdit, LoadState};
use crate::store;
use crate::view;

use clap::{Args, Parser, Subcommand};
use std::io::{stdin, stdout, Stderr, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;

/// Browse and filter a trading-card catalog
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[cfg(not(target_os = "windows"))]
    /// Config name, corresponding to a folder in ~/.cardex,
    /// or ./cardex.toml if omitted.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[cfg(target_os = "windows")]
    /// Config name, corresponding to a folder in %APPDATA%/cardex,
    /// or ./cardex.toml if omitted.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Data source type, inferred from the input when omitted
    #[arg(short, long, value_enum, global = true)]
    pub source: Option<SourceType>,

    /// Card data path or URL
    #[arg(short, long, global = true)]
    pub input: Option<String>,

    /// Print more, repeat for debug output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Never color the output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Filter the catalog once and print the matching cards
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Also write the matching cards to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Show the details of a card
    Show {
        /// Card identifier
        identifier: String,
    },
    /// Print the attributes, expansions and HP range in the catalog
    Facets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the catalog interactively (default)
    Browse,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Accepted attribute, may be repeated
    #[arg(short, long = "attribute")]
    pub attributes: Vec<String>,

    /// Accepted expansion, may be repeated
    #[arg(short, long = "expansion")]
    pub expansions: Vec<String>,

    /// Lowest HP (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub hp_min: Option<String>,

    /// Highest HP (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub hp_max: Option<String>,

    /// Part of the card name, any case
    #[arg(short, long)]
    pub name: Option<String>,
}

impl FilterArgs {
    fn edits(self) -> Vec<InputEdit> {
        vec![
            InputEdit::SetAttributes(self.attributes.into_iter().collect()),
            InputEdit::SetExpansions(self.expansions.into_iter().collect()),
            InputEdit::SetHpMin(self.hp_min.unwrap_or_default()),
            InputEdit::SetHpMax(self.hp_max.unwrap_or_default()),
            InputEdit::SetName(self.name.unwrap_or_default()),
        ]
    }
}

macro_rules! error {
    ($res:expr) => {
        $res.unwrap_or_else(|e| panic!("{e}"))
    };
}

impl Cli {
    pub fn run() -> ExitCode {
        std::panic::set_hook(Box::new(|panic_info| {
            if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                eprintln!("{s}");
            } else {
                eprintln!("{panic_info}");
            }
        }));

        let cli = Self::parse();
        let mut logger = Logger::new_stderr(cli.level());
        let config = error!(Config::find(cli.config.as_ref()));
        let input = error!(cli.find_input(&config));
        let colored = !cli.no_color && termion::is_tty(&stdout());
        let mut renderer = TermRenderer::new(stdout(), colored);

        let src_type = cli.source.or(config.source.src_type);
        let rx = spawn_load(src_type, input.clone(), config.source.formats.clone());
        let loaded = error!(wait_for_load(rx, &input, &mut logger));
        let state = reduce(AppState::default(), Action::Loaded(loaded));
        match &state.load {
            LoadState::Ready => {
                error!(logger.info(format!("Loaded {} cards", state.store.len())))
            }
            LoadState::Failed(msg) => error!(logger.error(msg.clone())),
            LoadState::Loading => {}
        }

        let success = match cli.mode.unwrap_or(Mode::Browse) {
            Mode::List { filter, export } => {
                error!(Self::list(state, filter, export, &config, &mut renderer, &mut logger))
            }
            Mode::Show { identifier } => {
                error!(Self::show(state, &identifier, &mut renderer, &mut logger))
            }
            Mode::Facets { json } => error!(Self::facets(state, json, &config, &mut renderer)),
            Mode::Browse => {
                let session = Session::new(
                    stdin().lock(),
                    renderer,
                    logger,
                    config.palette(),
                    state,
                );
                error!(session.run()).is_ready()
            }
        };
        if success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    fn level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::Warn,
            (false, 0) => Level::Info,
            (false, _) => Level::Debug,
        }
    }

    fn find_input(&self, config: &Config) -> Result<String> {
        self.input
            .clone()
            .or_else(|| config.source.path.clone())
            .ok_or_else(|| Error::syntax("no card data given, use --input or set [source] path"))
    }

    fn list(
        mut state: AppState,
        filter: FilterArgs,
        export: Option<PathBuf>,
        config: &Config,
        renderer: &mut TermRenderer<Stdout>,
        logger: &mut Logger<Stderr>,
    ) -> Result<bool> {
        for edit in filter.edits() {
            state = reduce(state, Action::Edit(edit));
        }
        let state = reduce(state, Action::Apply);
        renderer.render_list(&view::list(&state, &config.palette()))?;
        if !state.is_ready() {
            return Ok(false);
        }
        if let Some(path) = export {
            store::export(&state.result, &path)?;
            logger.info(format!(
                "Exported {} cards to {}",
                state.result.len(),
                path.display()
            ))?;
        }
        Ok(true)
    }

    fn show(
        state: AppState,
        identifier: &str,
        renderer: &mut TermRenderer<Stdout>,
        logger: &mut Logger<Stderr>,
    ) -> Result<bool> {
        if !state.is_ready() {
            renderer.render_list(&view::list(&state, &Default::default()))?;
            return Ok(false);
        }
        let Some(record) = state.store.find(identifier).cloned() else {
            logger.error(format!("no card with identifier {identifier}"))?;
            return Ok(false);
        };
        let state = reduce(state, Action::Select(record));
        if let Some(detail) = view::selection(&state) {
            renderer.render_detail(&detail)?;
        }
        Ok(true)
    }

    fn facets(
        state: AppState,
        json: bool,
        config: &Config,
        renderer: &mut TermRenderer<Stdout>,
    ) -> Result<bool> {
        if !state.is_ready() {
            renderer.render_list(&view::list(&state, &config.palette()))?;
            return Ok(false);
        }
        let facets = state.store.facets();
        if json {
            let text = serde_json::to_string_pretty(&facets).map_err(Error::record_read)?;
            renderer.message(&text)?;
        } else {
            renderer.render_facets(&facets)?;
        }
        Ok(true)
    }
}
