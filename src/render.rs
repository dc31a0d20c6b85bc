//! Draws view descriptors on a terminal.

use crate::color::Color;
use crate::filter::FilterInputs;
use crate::store::Facets;
use crate::view::{Badge, CardItem, DetailView, ListView, PLACEHOLDER};

use itertools::Itertools;
use std::io::{Error as IoError, Write};
use termion::color::{Bg, Fg, Rgb};
use termion::style;

/// Removes anything that could be read as a terminal control sequence.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

fn rgb(color: Color) -> Rgb {
    let (r, g, b) = color.rgb8();
    Rgb(r, g, b)
}

pub struct TermRenderer<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> TermRenderer<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draws the list area and returns how many items were drawn.
    pub fn render_list(&mut self, view: &ListView) -> Result<usize, IoError> {
        let count = match view {
            ListView::Loading => {
                writeln!(self.out, "Loading cards...")?;
                0
            }
            ListView::Failed { message } => {
                self.line_colored(
                    &format!("Failed to load card data: {}", sanitize(message)),
                    termion::color::LightRed,
                )?;
                0
            }
            ListView::Empty => {
                writeln!(self.out, "No cards match the current filters.")?;
                0
            }
            ListView::Items(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.render_item(i + 1, item)?;
                }
                writeln!(self.out, "{} card(s)", items.len())?;
                items.len()
            }
        };
        self.out.flush()?;
        Ok(count)
    }

    fn render_item(&mut self, n: usize, item: &CardItem) -> Result<(), IoError> {
        let badge = self.badge(&item.badge);
        let image = if item.image.is_some() { "▣" } else { "□" };
        writeln!(
            self.out,
            "{n:>4}. {image} {name}  {badge}  {expansion}  HP {hp}",
            name = sanitize(&item.name),
            expansion = sanitize(&item.expansion),
            hp = item.hp,
        )
    }

    fn badge(&self, badge: &Badge) -> String {
        let label = sanitize(&badge.label);
        if self.colored {
            format!(
                "{}{} {label} {}",
                Bg(rgb(badge.color)),
                Fg(rgb(badge.color.contrast())),
                style::Reset
            )
        } else {
            format!("[{label}]")
        }
    }

    fn line_colored(&mut self, text: &str, color: impl termion::color::Color) -> Result<(), IoError> {
        if self.colored {
            writeln!(self.out, "{}{text}{}", Fg(color), style::Reset)
        } else {
            writeln!(self.out, "{text}")
        }
    }

    fn heading(&mut self, text: &str) -> Result<(), IoError> {
        if self.colored {
            writeln!(self.out, "{}{text}{}", style::Bold, style::Reset)
        } else {
            writeln!(self.out, "{text}")
        }
    }

    /// Draws the detail view of one card.
    pub fn render_detail(&mut self, view: &DetailView) -> Result<(), IoError> {
        let name = sanitize(&view.name);
        let rule = "─".repeat(name.chars().count().max(24) + 4);
        writeln!(self.out, "{rule}")?;
        self.heading(&format!("  {name}"))?;
        writeln!(self.out, "{rule}")?;
        let image = view.image.as_deref().map(sanitize);
        writeln!(self.out, "  Image: {}", image.as_deref().unwrap_or(PLACEHOLDER))?;

        let width = view.stats.iter().map(|s| s.label.len()).max().unwrap_or(0);
        for stat in view.stats.iter() {
            writeln!(
                self.out,
                "  {:<width$}  {}",
                stat.label,
                sanitize(&stat.value),
            )?;
        }

        if !view.attacks.is_empty() {
            writeln!(self.out)?;
            self.heading("  Attacks")?;
            for attack in view.attacks.iter() {
                let head = [
                    Some(sanitize(&attack.name)),
                    attack.cost.as_deref().map(|c| format!("[{}]", sanitize(c))),
                    attack.damage.as_deref().map(sanitize),
                ]
                .into_iter()
                .flatten()
                .join("  ");
                writeln!(self.out, "    {head}")?;
                if let Some(effect) = attack.effect.as_deref() {
                    writeln!(self.out, "      {}", sanitize(effect))?;
                }
            }
        }
        if let Some(ability) = view.ability.as_deref() {
            writeln!(self.out)?;
            self.heading("  Ability")?;
            writeln!(self.out, "    {}", sanitize(ability))?;
        }
        if let Some(description) = view.description.as_deref() {
            writeln!(self.out)?;
            self.heading("  Description")?;
            writeln!(self.out, "    {}", sanitize(description))?;
        }
        if let Some(artist) = view.artist.as_deref() {
            writeln!(self.out)?;
            writeln!(self.out, "  Illustrated by {}", sanitize(artist))?;
        }
        if let Some(link) = view.link.as_ref() {
            writeln!(self.out, "  More: {}", sanitize(link.as_str()))?;
        }
        writeln!(self.out, "{rule}")?;
        self.out.flush()
    }

    /// Lists what the catalog offers to filter on.
    pub fn render_facets(&mut self, facets: &Facets) -> Result<(), IoError> {
        let attributes = facets.attributes.iter().map(|a| sanitize(a)).join(", ");
        let expansions = facets.expansions.iter().map(|e| sanitize(e)).join(", ");
        writeln!(self.out, "Cards:      {}", facets.card_count)?;
        writeln!(self.out, "Attributes: {attributes}")?;
        writeln!(self.out, "Expansions: {expansions}")?;
        writeln!(self.out, "Max HP:     {}", facets.max_hp)?;
        self.out.flush()
    }

    /// Shows the filter controls as they are currently set.
    pub fn render_inputs(&mut self, inputs: &FilterInputs) -> Result<(), IoError> {
        let or_any = |s: String| if s.is_empty() { String::from("(any)") } else { s };
        let attributes = inputs.attributes.iter().map(|a| sanitize(a)).join(", ");
        let expansions = inputs.expansions.iter().map(|e| sanitize(e)).join(", ");
        writeln!(self.out, "Attributes: {}", or_any(attributes))?;
        writeln!(self.out, "Expansions: {}", or_any(expansions))?;
        writeln!(
            self.out,
            "HP:         {} .. {}",
            or_any(sanitize(&inputs.hp_min)),
            or_any(sanitize(&inputs.hp_max))
        )?;
        writeln!(self.out, "Name:       {}", or_any(sanitize(&inputs.name)))?;
        self.out.flush()
    }

    /// Writes a line of plain text.
    pub fn message(&mut self, text: &str) -> Result<(), IoError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn prompt(&mut self, text: &str) -> Result<(), IoError> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }
}
