//! Creatures and the macros they expose.
//!
//! A creature is a character sheet: ability scores and named attacks. Each
//! attack becomes a macro phrase (its lowercased name), and each ability
//! score becomes a `"roll <ability>"` macro.

use std::collections::BTreeMap;
use std::fmt;

use dandy_dice::{DiceRollSpec, Roller, ToHit, ability_modifier};
use dandy_foundation::{Error, ErrorKind, Result};

use crate::phrase::PhraseSet;

/// One of the six ability scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ability {
    /// Strength.
    Str,
    /// Dexterity.
    Dex,
    /// Constitution.
    Con,
    /// Intelligence.
    Int,
    /// Wisdom.
    Wis,
    /// Charisma.
    Cha,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Self; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    /// Returns the three-letter abbreviation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }

    /// Parses a three-letter abbreviation (any case).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An attack a creature can make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureAction {
    /// Display name, e.g. "Longsword".
    pub name: String,
    /// Bonus added to the to-hit d20.
    pub attack_bonus: i32,
    /// Damage dice.
    pub damage: DiceRollSpec,
    /// Damage type, e.g. "slashing".
    pub damage_type: String,
}

impl CreatureAction {
    /// Creates an action, parsing its damage notation.
    ///
    /// # Errors
    ///
    /// Returns `BadNotation` if the damage is not dice notation.
    pub fn new(
        name: impl Into<String>,
        attack_bonus: i32,
        damage: &str,
        damage_type: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            attack_bonus,
            damage: DiceRollSpec::parse(damage)?,
            damage_type: damage_type.into(),
        })
    }
}

/// A macro a creature can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Macro<'a> {
    /// Attack with an action: to-hit plus damage.
    Action(&'a CreatureAction),
    /// Ability check: 1d20 plus the ability modifier.
    Check(Ability, i32),
}

/// A character sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creature {
    name: String,
    abilities: BTreeMap<Ability, i32>,
    actions: BTreeMap<String, CreatureAction>,
}

impl Creature {
    /// Creates a creature with no abilities or actions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }

    /// Sets an ability score.
    #[must_use]
    pub fn with_ability(mut self, ability: Ability, score: i32) -> Self {
        self.abilities.insert(ability, score);
        self
    }

    /// Adds an action, keyed by its lowercased name.
    #[must_use]
    pub fn with_action(mut self, action: CreatureAction) -> Self {
        self.actions.insert(action.name.to_lowercase(), action);
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an ability score.
    #[must_use]
    pub fn ability(&self, ability: Ability) -> Option<i32> {
        self.abilities.get(&ability).copied()
    }

    /// Iterates over the actions.
    pub fn actions(&self) -> impl Iterator<Item = &CreatureAction> {
        self.actions.values()
    }

    /// Builds the phrase set of this creature's macros.
    #[must_use]
    pub fn macro_phrases(&self) -> PhraseSet {
        let mut phrases = PhraseSet::new();
        for key in self.actions.keys() {
            phrases.insert(key);
        }
        for ability in self.abilities.keys() {
            phrases.insert(&format!("roll {ability}"));
        }
        phrases
    }

    /// Looks up a macro by its phrase.
    #[must_use]
    pub fn lookup(&self, phrase: &str) -> Option<Macro<'_>> {
        let phrase = phrase.trim().to_lowercase();
        if let Some(action) = self.actions.get(&phrase) {
            return Some(Macro::Action(action));
        }
        let ability = Ability::from_name(phrase.strip_prefix("roll ")?.trim())?;
        let score = self.ability(ability)?;
        Some(Macro::Check(ability, ability_modifier(score)))
    }

    /// Runs a macro and renders the result.
    ///
    /// # Errors
    ///
    /// Returns `NoMatch` if the phrase names no macro, or any dice error.
    pub fn perform(&self, phrase: &str, roller: &mut Roller) -> Result<String> {
        match self.lookup(phrase) {
            Some(Macro::Action(action)) => {
                let hit = ToHit::roll(roller, action.attack_bonus);
                let damage = roller.roll(&action.damage)?;
                Ok(format!(
                    "{} uses {}\n{hit}\n{} {} damage | {}",
                    self.name,
                    action.name,
                    damage.total,
                    action.damage_type,
                    damage.breakdown()
                ))
            }
            Some(Macro::Check(ability, modifier)) => {
                let roll = roller.roll(&DiceRollSpec::new(1, 20, modifier))?;
                Ok(format!("{} rolls {ability} for {roll}", self.name))
            }
            None => Err(Error::new(ErrorKind::NoMatch(phrase.to_string()))),
        }
    }
}

/// All known creatures, keyed by lowercased name.
#[derive(Clone, Debug, Default)]
pub struct Bestiary {
    creatures: BTreeMap<String, Creature>,
}

impl Bestiary {
    /// Creates an empty bestiary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a creature.
    pub fn insert(&mut self, creature: Creature) {
        tracing::debug!(creature = %creature.name, "registered creature");
        self.creatures
            .insert(creature.name.to_lowercase(), creature);
    }

    /// Looks up a creature by name (any case).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Creature> {
        self.creatures.get(&name.to_lowercase())
    }

    /// Returns the number of creatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Returns true if there are no creatures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Iterates over the creatures in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    /// Builds the phrase set of creature names.
    #[must_use]
    pub fn phrases(&self) -> PhraseSet {
        self.creatures.keys().collect()
    }
}
