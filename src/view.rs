//! Plain view descriptors projected from the application state.
//!
//! Nothing here draws anything; a renderer consumes these values.

use crate::color::{Color, Palette};
use crate::data::card::present;
use crate::data::CardRecord;
use crate::state::{AppState, LoadState};

use std::sync::Arc;
use url::Url;

/// Shown in place of any missing stat.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone)]
pub enum ListView {
    Loading,
    Failed { message: String },
    Empty,
    Items(Vec<CardItem>),
}

/// One entry of the result list, bound to the record it selects.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub record: Arc<CardRecord>,
    pub name: String,
    /// Only a reference; nothing is fetched until a renderer chooses to.
    pub image: Option<String>,
    pub badge: Badge,
    pub expansion: String,
    pub hp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub image: Option<String>,
    pub name: String,
    pub stats: Vec<StatRow>,
    pub attacks: Vec<AttackBlock>,
    pub ability: Option<String>,
    pub description: Option<String>,
    pub artist: Option<String>,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackBlock {
    pub name: String,
    pub cost: Option<String>,
    pub damage: Option<String>,
    pub effect: Option<String>,
}

/// An external reference that has been checked to be a plain web address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link(Url);

impl Link {
    /// Accepts only absolute `http`/`https` URLs; anything else is dropped.
    pub fn parse(raw: &str) -> Option<Link> {
        let url = Url::parse(raw.trim()).ok()?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Some(Link(url)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn owned(field: &Option<String>) -> Option<String> {
    present(field).map(String::from)
}

/// Projects the list area of the page.
pub fn list(state: &AppState, palette: &Palette) -> ListView {
    match &state.load {
        LoadState::Loading => ListView::Loading,
        LoadState::Failed(message) => ListView::Failed {
            message: message.clone(),
        },
        LoadState::Ready if state.result.is_empty() => ListView::Empty,
        LoadState::Ready => ListView::Items(
            state
                .result
                .iter()
                .map(|record| item(record, palette))
                .collect(),
        ),
    }
}

pub fn item(record: &Arc<CardRecord>, palette: &Palette) -> CardItem {
    let attribute = present(&record.attribute);
    CardItem {
        record: Arc::clone(record),
        name: record.name.clone(),
        image: owned(&record.image_url),
        badge: Badge {
            label: attribute.unwrap_or(PLACEHOLDER).to_string(),
            color: palette.color(attribute),
        },
        expansion: owned(&record.expansion).unwrap_or_else(|| PLACEHOLDER.to_string()),
        hp: record.hp().to_string(),
    }
}

/// Projects the detail view of the current selection, if any.
pub fn selection(state: &AppState) -> Option<DetailView> {
    state.selected.as_deref().map(detail)
}

pub fn detail(record: &CardRecord) -> DetailView {
    let stat = |label: &'static str, value: Option<String>| StatRow {
        label,
        value: value.unwrap_or_else(|| PLACEHOLDER.to_string()),
    };
    let hp = (!record.hp.is_blank()).then(|| record.hp.to_string().trim().to_string());
    DetailView {
        image: owned(&record.image_url),
        name: record.name.clone(),
        stats: vec![
            stat("Type", owned(&record.card_type)),
            stat("Expansion", owned(&record.expansion)),
            stat("Number", owned(&record.number)),
            stat("HP", hp),
            stat("Weakness", owned(&record.weakness)),
            stat("Resistance", owned(&record.resistance)),
            stat("Retreat Cost", owned(&record.retreat_cost)),
        ],
        attacks: record
            .skills()
            .into_iter()
            .map(|s| AttackBlock {
                name: s.name.to_string(),
                cost: s.cost.map(String::from),
                damage: s.damage.map(String::from),
                effect: s.effect.map(String::from),
            })
            .collect(),
        ability: owned(&record.ability),
        description: owned(&record.description),
        artist: owned(&record.artist),
        link: present(&record.card_url).and_then(Link::parse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::state::{reduce, Action};
    use crate::store::RecordStore;

    fn ready(records: Vec<CardRecord>) -> AppState {
        reduce(
            AppState::default(),
            Action::Loaded(Ok(RecordStore::new(records))),
        )
    }

    fn full_card() -> CardRecord {
        CardRecord {
            identifier: String::from("sv10-004"),
            name: String::from("Charizard ex"),
            attribute: Some(String::from("Fire")),
            expansion: Some(String::from("SV10")),
            hp: Value::Int(330),
            image_url: Some(String::from("https://img.example/4.png")),
            card_type: Some(String::from("Stage 2")),
            number: Some(String::from("004/108")),
            weakness: Some(String::from("Water x2")),
            resistance: Some(String::from("")),
            skill1_name: Some(String::from("Burning Darkness")),
            skill1_cost: Some(String::from("RR")),
            skill1_damage: Some(String::from("180+")),
            skill2_name: None,
            ability: Some(String::from("Infernal Reign")),
            artist: Some(String::from("PLANETA")),
            card_url: Some(String::from("https://cards.example/sv10-004")),
            ..Default::default()
        }
    }

    #[test]
    fn list_follows_load_state() {
        assert!(matches!(list(&AppState::default(), &Palette::default()), ListView::Loading));

        let failed = reduce(
            AppState::default(),
            Action::Loaded(Err(crate::error::Error::record_read("boom"))),
        );
        assert!(matches!(
            list(&failed, &Palette::default()),
            ListView::Failed { message } if message.contains("boom")
        ));
    }

    #[test]
    fn empty_result_has_no_items() {
        let state = ready(vec![full_card()]);
        let state = reduce(
            state,
            Action::Edit(crate::state::InputEdit::SetName("pikachu".into())),
        );
        let state = reduce(state, Action::Apply);
        assert!(matches!(list(&state, &Palette::default()), ListView::Empty));
    }

    #[test]
    fn items_carry_their_record() {
        let mut plain = CardRecord {
            name: String::from("Missingno"),
            attribute: Some(String::from("Glitch")),
            ..Default::default()
        };
        plain.hp = Value::from("N/A");
        let state = ready(vec![full_card(), plain]);
        let ListView::Items(items) = list(&state, &Palette::default()) else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 2);
        assert!(Arc::ptr_eq(&items[0].record, &state.result[0]));
        assert_eq!(items[0].badge.label, "Fire");
        assert_eq!(items[0].hp, "330");
        assert_eq!(items[0].image.as_deref(), Some("https://img.example/4.png"));

        assert_eq!(items[1].image, None);
        assert_eq!(items[1].badge.color, Color::NEUTRAL);
        assert_eq!(items[1].expansion, PLACEHOLDER);
        assert_eq!(items[1].hp, "0");
    }

    #[test]
    fn detail_always_has_every_stat_row() {
        let view = detail(&CardRecord::default());
        let labels: Vec<_> = view.stats.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec!["Type", "Expansion", "Number", "HP", "Weakness", "Resistance", "Retreat Cost"]
        );
        assert!(view.stats.iter().all(|s| s.value == PLACEHOLDER));
        assert!(view.attacks.is_empty());
        assert_eq!(view.ability, None);
        assert_eq!(view.description, None);
        assert_eq!(view.artist, None);
        assert_eq!(view.link, None);
    }

    #[test]
    fn detail_includes_present_sections_only() {
        let view = detail(&full_card());
        let value = |label| view.stats.iter().find(|s| s.label == label).unwrap().value.clone();
        assert_eq!(value("HP"), "330");
        assert_eq!(value("Resistance"), PLACEHOLDER);
        assert_eq!(value("Retreat Cost"), PLACEHOLDER);
        assert_eq!(
            view.attacks,
            vec![AttackBlock {
                name: String::from("Burning Darkness"),
                cost: Some(String::from("RR")),
                damage: Some(String::from("180+")),
                effect: None,
            }]
        );
        assert_eq!(view.ability.as_deref(), Some("Infernal Reign"));
        assert_eq!(view.description, None);
        assert_eq!(view.link.unwrap().as_str(), "https://cards.example/sv10-004");
    }

    #[test]
    fn unparsable_hp_is_shown_as_is() {
        let card = CardRecord {
            hp: Value::from("N/A"),
            ..Default::default()
        };
        let view = detail(&card);
        assert_eq!(view.stats[3].value, "N/A");
    }

    #[test]
    fn links_must_be_web_addresses() {
        assert!(Link::parse("https://cards.example/1").is_some());
        assert!(Link::parse(" http://cards.example/1 ").is_some());
        assert!(Link::parse("javascript:alert(1)").is_none());
        assert!(Link::parse("file:///etc/passwd").is_none());
        assert!(Link::parse("data:text/html,hi").is_none());
        assert!(Link::parse("/relative/path").is_none());
    }

    #[test]
    fn selection_projects_the_selected_record() {
        let state = ready(vec![full_card()]);
        assert!(selection(&state).is_none());
        let record = state.result[0].clone();
        let state = reduce(state, Action::Select(record));
        assert_eq!(selection(&state).unwrap().name, "Charizard ex");
    }
}
