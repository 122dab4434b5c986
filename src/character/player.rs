//! The party member aggregate handed to the combat engine.

use super::attributes::Attributes;
use crate::items::{Equipment, Item};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub inventory: Vec<Item>,
}

impl Player {
    pub fn new(name: &str, level: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            level,
            coins: 0,
            attributes: Attributes::new(),
            inventory: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }

    pub fn equipment(&self) -> Equipment {
        Equipment::from_inventory(&self.inventory)
    }
}
