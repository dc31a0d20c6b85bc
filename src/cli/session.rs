//! The interactive browsing loop.

use crate::cli::command::{Command, HELP};
use crate::color::Palette;
use crate::data::CardRecord;
use crate::error::Result;
use crate::logs::Logger;
use crate::render::{sanitize, TermRenderer};
use crate::state::{reduce, Action, AppState, InputEdit};
use crate::store;
use crate::view::{self, ListView};

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::sync::Arc;

pub struct Session<R: BufRead, W: Write, L: Write> {
    input: R,
    renderer: TermRenderer<W>,
    logger: Logger<L>,
    palette: Palette,
    state: AppState,
    /// Records behind the numbers of the list last drawn.
    shown: Vec<Arc<CardRecord>>,
}

impl<R: BufRead, W: Write, L: Write> Session<R, W, L> {
    pub fn new(
        input: R,
        renderer: TermRenderer<W>,
        logger: Logger<L>,
        palette: Palette,
        state: AppState,
    ) -> Self {
        Self {
            input,
            renderer,
            logger,
            palette,
            state,
            shown: Vec::new(),
        }
    }

    /// Runs until `quit` or end of input and hands back the final state.
    pub fn run(mut self) -> Result<AppState> {
        self.show_list()?;
        loop {
            let prompt = match self.state.selected.as_ref() {
                Some(card) => format!("cardex [{}]> ", sanitize(&card.name)),
                None => String::from("cardex> "),
            };
            self.renderer.prompt(&prompt)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                self.renderer.message("")?;
                break;
            }
            if !self.step(&line)? {
                break;
            }
        }
        Ok(self.state)
    }

    /// Handles one line of input. Returns `false` once the user asks to leave.
    fn step(&mut self, line: &str) -> Result<bool> {
        match Command::parse(line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => return Ok(false),
            Ok(Some(command)) => self.execute(command)?,
            Err(e) => self.logger.warn(e.to_string())?,
        }
        Ok(true)
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    fn edit(&mut self, edit: InputEdit) {
        self.dispatch(Action::Edit(edit));
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Attr(values) if values.is_empty() => {
                self.edit(InputEdit::SetAttributes(BTreeSet::new()))
            }
            Command::Attr(values) => values
                .into_iter()
                .for_each(|v| self.edit(InputEdit::ToggleAttribute(v))),
            Command::Exp(values) if values.is_empty() => {
                self.edit(InputEdit::SetExpansions(BTreeSet::new()))
            }
            Command::Exp(values) => values
                .into_iter()
                .for_each(|v| self.edit(InputEdit::ToggleExpansion(v))),
            Command::Hp(min, max) => {
                self.edit(InputEdit::SetHpMin(min));
                self.edit(InputEdit::SetHpMax(max));
            }
            Command::Name(name) => self.edit(InputEdit::SetName(name)),
            Command::Apply => {
                self.dispatch(Action::Apply);
                self.logger.debug(format!(
                    "{} of {} cards match",
                    self.state.result.len(),
                    self.state.store.len()
                ))?;
                self.show_list()?;
            }
            Command::Reset => {
                self.dispatch(Action::Reset);
                self.show_list()?;
            }
            Command::List => self.show_list()?,
            Command::Select(n) => self.select(n)?,
            Command::Close => {
                if self.state.selected.is_some() {
                    self.dispatch(Action::Dismiss);
                    self.renderer.message("Closed.")?;
                }
            }
            Command::Filters => self.renderer.render_inputs(&self.state.inputs)?,
            Command::Facets if self.state.is_ready() => {
                self.renderer.render_facets(&self.state.store.facets())?
            }
            Command::Facets => self.logger.warn("no card data loaded")?,
            Command::Export(path) => match store::export(&self.state.result, &path) {
                Ok(()) => self.logger.info(format!(
                    "Exported {} cards to {}",
                    self.state.result.len(),
                    path.display()
                ))?,
                Err(e) => self.logger.warn(e.to_string())?,
            },
            Command::Help => self.renderer.message(HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn select(&mut self, n: usize) -> Result<()> {
        let Some(record) = n.checked_sub(1).and_then(|i| self.shown.get(i)).cloned() else {
            self.logger.warn(format!("there is no result {n}"))?;
            return Ok(());
        };
        self.dispatch(Action::Select(record));
        match view::selection(&self.state) {
            Some(detail) => self.renderer.render_detail(&detail)?,
            None => self.logger.warn(format!("result {n} is no longer listed"))?,
        }
        Ok(())
    }

    fn show_list(&mut self) -> Result<()> {
        let list = view::list(&self.state, &self.palette);
        self.shown = match &list {
            ListView::Items(items) => items.iter().map(|i| Arc::clone(&i.record)).collect(),
            _ => Vec::new(),
        };
        self.renderer.render_list(&list)?;
        Ok(())
    }
}
