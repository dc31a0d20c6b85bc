//! Contains representations for card data.

use crate::data::Value;

use serde::{Deserialize, Deserializer, Serialize};

/// Anything that can be looked up field by field and identified.
pub trait Card {
    fn id(&self) -> String;

    fn get(&self, field: &str) -> Value;
}

/// A single catalog entry, as produced by the card data export.
///
/// Field names follow the exported JSON. Aliases cover the CSV headers and the
/// SQLite columns the same data is published under. Everything is optional at
/// parse time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, cardex_derive::Card)]
#[serde(rename_all = "camelCase", default)]
pub struct CardRecord {
    #[card(id)]
    #[serde(alias = "Web Card ID", alias = "WebCardID", alias = "web_card_id")]
    #[serde(deserialize_with = "text")]
    pub identifier: String,
    #[serde(alias = "Name", deserialize_with = "text")]
    pub name: String,
    #[serde(alias = "Attribute", skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub attribute: Option<String>,
    #[serde(alias = "Expansion", skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub expansion: Option<String>,
    #[serde(alias = "HP")]
    pub hp: Value,
    #[serde(
        alias = "Image URL",
        alias = "ImageURL",
        alias = "image_url",
        skip_serializing_if = "Option::is_none"
    )]
    #[serde(deserialize_with = "optional_text")]
    pub image_url: Option<String>,
    #[serde(
        rename = "type",
        alias = "Type",
        alias = "card_type",
        skip_serializing_if = "Option::is_none"
    )]
    #[serde(deserialize_with = "optional_text")]
    pub card_type: Option<String>,
    #[serde(alias = "Number", skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub number: Option<String>,
    #[serde(alias = "Weakness", skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub weakness: Option<String>,
    #[serde(alias = "Resistance", skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub resistance: Option<String>,
    #[serde(
        alias = "Retreat_Cost",
        alias = "retreat_cost",
        skip_serializing_if = "Option::is_none"
    )]
    #[serde(deserialize_with = "optional_text")]
    pub retreat_cost: Option<String>,
    #[serde(rename = "skill1Name", alias = "Skill1_Name", alias = "skill1_name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill1_name: Option<String>,
    #[serde(rename = "skill1Cost", alias = "Skill1_Cost", alias = "skill1_cost")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill1_cost: Option<String>,
    #[serde(rename = "skill1Damage", alias = "Skill1_Damage", alias = "skill1_damage")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill1_damage: Option<String>,
    #[serde(rename = "skill1Effect", alias = "Skill1_Effect", alias = "skill1_effect")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill1_effect: Option<String>,
    #[serde(rename = "skill2Name", alias = "Skill2_Name", alias = "skill2_name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill2_name: Option<String>,
    #[serde(rename = "skill2Cost", alias = "Skill2_Cost", alias = "skill2_cost")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill2_cost: Option<String>,
    #[serde(rename = "skill2Damage", alias = "Skill2_Damage", alias = "skill2_damage")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill2_damage: Option<String>,
    #[serde(rename = "skill2Effect", alias = "Skill2_Effect", alias = "skill2_effect")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub skill2_effect: Option<String>,
    #[serde(
        alias = "Ability",
        alias = "special_feature",
        alias = "[特性]",
        skip_serializing_if = "Option::is_none"
    )]
    #[serde(deserialize_with = "optional_text")]
    pub ability: Option<String>,
    #[serde(
        alias = "Pokemon_Info",
        alias = "pokemon_info",
        skip_serializing_if = "Option::is_none"
    )]
    #[serde(deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(alias = "Artist", skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "optional_text")]
    pub artist: Option<String>,
    #[serde(
        alias = "Card URL",
        alias = "CardURL",
        alias = "card_url",
        skip_serializing_if = "Option::is_none"
    )]
    #[serde(deserialize_with = "optional_text")]
    pub card_url: Option<String>,
}

/// Reads any scalar as text. Null becomes the empty string.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(|v| v.to_string())
}

/// Reads any scalar as text. Null and empty text are absent.
fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Value::deserialize(deserializer).map(|v| Some(v.to_string()).filter(|s| !s.is_empty()))
}

/// One attack printed on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill<'a> {
    pub name: &'a str,
    pub cost: Option<&'a str>,
    pub damage: Option<&'a str>,
    pub effect: Option<&'a str>,
}

/// What the SQLite import writes for an attack without a cost.
const NO_COST: &str = "None";

/// Returns the trimmed text if there is any.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl CardRecord {
    /// HP as an integer, 0 when absent or not a number.
    pub fn hp(&self) -> i64 {
        self.hp.to_int_or_zero()
    }

    /// The attacks with a non-empty name, in printed order.
    pub fn skills(&self) -> Vec<Skill<'_>> {
        [
            (&self.skill1_name, &self.skill1_cost, &self.skill1_damage, &self.skill1_effect),
            (&self.skill2_name, &self.skill2_cost, &self.skill2_damage, &self.skill2_effect),
        ]
        .into_iter()
        .filter_map(|(name, cost, damage, effect)| {
            Some(Skill {
                name: present(name)?,
                cost: present(cost).filter(|c| *c != NO_COST),
                damage: present(damage),
                effect: present(effect),
            })
        })
        .collect()
    }
}
