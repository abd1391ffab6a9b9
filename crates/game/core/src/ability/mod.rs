//! Ability cards and their capability registry.
//!
//! An ability pairs an eligibility predicate over the owner's
//! [`PlayArea`] with a pure transform of that PlayArea. Definitions live in an
//! immutable [`AbilityRegistry`] built once and injected through
//! [`Env`](crate::Env); the cards a battler holds only carry keys, metadata,
//! remaining uses and the derived `ok` flag.

mod standard;

use std::collections::HashMap;

use crate::play_area::PlayArea;

/// An ability held by a battler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityCard {
    pub key: String,
    pub name: String,
    pub desc: String,
    pub uses: u32,
    /// Derived eligibility; recomputed after every PlayArea mutation and
    /// never persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub ok: bool,
}

impl AbilityCard {
    pub fn new(key: impl Into<String>, name: impl Into<String>, desc: impl Into<String>, uses: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            desc: desc.into(),
            uses,
            ok: false,
        }
    }
}

/// Predicate + effect pair implementing one ability key.
#[derive(Clone, Copy)]
pub struct AbilityDef {
    pub key: &'static str,
    pub eligible: fn(&PlayArea) -> bool,
    pub apply: fn(PlayArea) -> PlayArea,
}

impl std::fmt::Debug for AbilityDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityDef").field("key", &self.key).finish()
    }
}

/// Immutable key → definition table.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    defs: HashMap<&'static str, AbilityDef>,
}

impl AbilityRegistry {
    pub fn new(defs: impl IntoIterator<Item = AbilityDef>) -> Self {
        Self {
            defs: defs.into_iter().map(|def| (def.key, def)).collect(),
        }
    }

    /// Registry with every built-in ability (`dump`, `mulligan`, `swap`,
    /// `polish`, `flip`).
    pub fn standard() -> Self {
        Self::new(standard::definitions())
    }

    pub fn get(&self, key: &str) -> Option<&AbilityDef> {
        self.defs.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.defs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Whether `card` may be used against `area` right now.
    pub fn is_eligible(&self, card: &AbilityCard, area: &PlayArea) -> bool {
        if card.uses == 0 {
            return false;
        }
        match self.get(&card.key) {
            Some(def) => (def.eligible)(area),
            None => {
                tracing::warn!(key = %card.key, "ability has no registered implementation");
                false
            }
        }
    }

    /// Recomputes `ok` for every card.
    #[must_use]
    pub fn refresh(&self, mut cards: Vec<AbilityCard>, area: &PlayArea) -> Vec<AbilityCard> {
        for card in &mut cards {
            card.ok = self.is_eligible(card, area);
        }
        cards
    }

    /// Uses the ability `key`, returning the updated cards and PlayArea.
    ///
    /// Unknown keys, exhausted cards and ineligible cards leave both inputs
    /// unchanged.
    #[must_use]
    pub fn use_ability(
        &self,
        cards: Vec<AbilityCard>,
        key: &str,
        area: PlayArea,
    ) -> (Vec<AbilityCard>, PlayArea) {
        let Some(index) = cards.iter().position(|card| card.key == key) else {
            tracing::debug!(key, "ability not held");
            return (cards, area);
        };
        if !self.is_eligible(&cards[index], &area) {
            tracing::debug!(key, "ability not eligible");
            return (cards, area);
        }
        let Some(def) = self.get(key) else {
            return (cards, area);
        };

        let area = (def.apply)(area);
        let mut cards = cards;
        cards[index].uses -= 1;
        let cards = self.refresh(cards, &area);
        (cards, area)
    }
}

/// Adds `card` to `cards`, merging uses into an owned card with the same key.
#[must_use]
pub fn acquire_ability(mut cards: Vec<AbilityCard>, card: AbilityCard) -> Vec<AbilityCard> {
    match cards.iter_mut().find(|owned| owned.key == card.key) {
        Some(owned) => owned.uses = owned.uses.saturating_add(card.uses),
        None => cards.push(card),
    }
    cards
}
