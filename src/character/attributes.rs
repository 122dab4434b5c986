use crate::core::constants::{
    BASE_ATTRIBUTE_VALUE, MAX_ATTRIBUTE_VALUE, MIN_ATTRIBUTE_VALUE, NUM_ATTRIBUTES,
};
use serde::{Deserialize, Serialize};

/// Ability score kinds, in STR, DEX, CON, INT, WIS, CHA order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Dexterity,
            AttributeType::Constitution,
            AttributeType::Intelligence,
            AttributeType::Wisdom,
            AttributeType::Charisma,
        ]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The six ability scores shared by players and enemies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Attributes {
    values: [i32; NUM_ATTRIBUTES],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    /// All scores at the average of 10.
    pub fn new() -> Self {
        Self {
            values: [BASE_ATTRIBUTE_VALUE; NUM_ATTRIBUTES],
        }
    }

    /// Creates Attributes from the six scores in STR, DEX, CON, INT, WIS, CHA order.
    pub fn from_scores(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            values: [str, dex, con, int, wis, cha],
        }
    }

    pub fn get(&self, attr: AttributeType) -> i32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: i32) {
        self.values[attr.index()] = value;
    }

    /// Ability modifier, floor((score - 10) / 2).
    pub fn modifier(&self, attr: AttributeType) -> i32 {
        (self.get(attr) - BASE_ATTRIBUTE_VALUE).div_euclid(2)
    }

    /// Multiplies every score by `factor`, rounding and clamping to 1..=30.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = *self;
        for attr in AttributeType::all() {
            let value = (self.get(attr) as f64 * factor).round() as i32;
            scaled.set(attr, value.clamp(MIN_ATTRIBUTE_VALUE, MAX_ATTRIBUTE_VALUE));
        }
        scaled
    }

    /// Adds `amount` to every score, clamping to 1..=30.
    pub fn shifted(&self, amount: i32) -> Self {
        let mut shifted = *self;
        for attr in AttributeType::all() {
            let value = self.get(attr).saturating_add(amount);
            shifted.set(attr, value.clamp(MIN_ATTRIBUTE_VALUE, MAX_ATTRIBUTE_VALUE));
        }
        shifted
    }
}
