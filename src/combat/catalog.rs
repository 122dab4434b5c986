//! Read-only repository of enemy templates.
//!
//! Built once at the composition root and shared by reference. Templates are
//! never handed out mutably; live encounters always receive deep clones via
//! [`Enemy::spawn`].

use rand::seq::SliceRandom;
use rand::Rng;

use super::enemy::{Behavior, Biome, Enemy, EnemyCategory, Subcategory};
use super::types::{DamageType, StatusEffect, StatusKind};
use crate::character::attributes::Attributes;

#[derive(Debug, Clone)]
pub struct EnemyCatalog {
    templates: Vec<Enemy>,
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyCatalog {
    /// The standard bestiary.
    pub fn new() -> Self {
        Self::from_templates(standard_templates())
    }

    pub fn from_templates(templates: Vec<Enemy>) -> Self {
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn all(&self) -> &[Enemy] {
        &self.templates
    }

    pub fn by_key(&self, key: &str) -> Option<&Enemy> {
        self.templates.iter().find(|e| e.key == key)
    }

    pub fn by_category(&self, category: EnemyCategory) -> Vec<&Enemy> {
        self.templates
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn by_subcategory(&self, subcategory: Subcategory) -> Vec<&Enemy> {
        self.templates
            .iter()
            .filter(|e| e.subcategory == subcategory)
            .collect()
    }

    pub fn by_biome(&self, biome: Biome) -> Vec<&Enemy> {
        self.templates.iter().filter(|e| e.lives_in(biome)).collect()
    }

    /// Templates with `min <= CR <= max`.
    pub fn by_cr_range(&self, min: f64, max: f64) -> Vec<&Enemy> {
        self.templates
            .iter()
            .filter(|e| e.challenge_rating >= min && e.challenge_rating <= max)
            .collect()
    }

    pub fn bosses(&self) -> Vec<&Enemy> {
        self.templates.iter().filter(|e| e.is_boss).collect()
    }

    /// Uniformly random template, or None for an empty catalog.
    pub fn random(&self, rng: &mut impl Rng) -> Option<&Enemy> {
        self.templates.choose(rng)
    }

    /// Spawns a live instance of the template with the given key.
    pub fn spawn(&self, key: &str, rng: &mut impl Rng) -> Option<Enemy> {
        self.by_key(key).map(|template| template.spawn(rng))
    }
}

fn standard_templates() -> Vec<Enemy> {
    use Biome::*;
    use DamageType::*;

    let a = Attributes::from_scores;

    vec![
        // Nature: beasts
        Enemy::template("giant_rat", "Giant Rat", Subcategory::Beast, 0.125, a(7, 15, 11, 2, 10, 4), 7, 12)
            .in_biomes(&[Cave, Swamp, Ruins])
            .with_behavior(Behavior::Pack)
            .deals(Piercing)
            .drops("Rat Tail", 0.5, 1, 2),
        Enemy::template("wolf", "Wolf", Subcategory::Beast, 0.25, a(12, 15, 12, 3, 12, 6), 11, 13)
            .in_biomes(&[Forest, Plains, Tundra])
            .with_behavior(Behavior::Pack)
            .deals(Piercing)
            .drops("Wolf Pelt", 0.6, 1, 1),
        Enemy::template("giant_spider", "Giant Spider", Subcategory::Beast, 1.0, a(14, 16, 12, 2, 11, 4), 26, 14)
            .in_biomes(&[Forest, Cave])
            .with_behavior(Behavior::Cunning)
            .deals(Piercing)
            .inflicts(StatusEffect::new(StatusKind::Poison, 2, 2))
            .drops("Spider Silk", 0.7, 1, 3)
            .with_trait("Walks on webs without hindrance"),
        Enemy::template("brown_bear", "Brown Bear", Subcategory::Beast, 1.0, a(19, 10, 16, 2, 13, 7), 34, 11)
            .in_biomes(&[Forest, Mountain, Tundra])
            .drops("Bear Claw", 0.5, 1, 2),
        Enemy::template("dire_wolf", "Dire Wolf", Subcategory::Beast, 1.0, a(17, 15, 15, 3, 12, 7), 37, 14)
            .in_biomes(&[Forest, Tundra, Plains])
            .with_behavior(Behavior::Pack)
            .deals(Piercing)
            .inflicts(StatusEffect::new(StatusKind::Bleeding, 1, 2))
            .drops("Dire Wolf Pelt", 0.6, 1, 1),
        // Nature: plants
        Enemy::template("twig_blight", "Twig Blight", Subcategory::Plant, 0.125, a(6, 13, 12, 4, 8, 3), 4, 13)
            .in_biomes(&[Forest, Swamp])
            .with_behavior(Behavior::Mindless)
            .vulnerable_to(&[Fire])
            .drops("Blighted Twig", 0.4, 1, 3),
        Enemy::template("vine_blight", "Vine Blight", Subcategory::Plant, 0.5, a(15, 8, 14, 5, 10, 3), 26, 12)
            .in_biomes(&[Forest, Swamp])
            .with_behavior(Behavior::Mindless)
            .deals(Bludgeoning)
            .vulnerable_to(&[Fire])
            .drops("Tough Vine", 0.5, 1, 2),
        Enemy::template("shambling_mound", "Shambling Mound", Subcategory::Plant, 5.0, a(18, 8, 16, 5, 10, 5), 136, 15)
            .in_biomes(&[Swamp, Forest])
            .with_behavior(Behavior::Mindless)
            .deals(Bludgeoning)
            .resists(&[Cold, Fire])
            .drops("Rotting Heartwood", 0.8, 1, 1),
        // Nature: elementals
        Enemy::template("ice_mephit", "Ice Mephit", Subcategory::Elemental, 0.5, a(7, 13, 10, 9, 11, 12), 21, 11)
            .in_biomes(&[Tundra, Mountain])
            .with_behavior(Behavior::Cunning)
            .deals(Cold)
            .immune_to(&[Cold, Poison])
            .vulnerable_to(&[Fire, Bludgeoning])
            .drops("Frost Shard", 0.6, 1, 2),
        Enemy::template("dust_mephit", "Dust Mephit", Subcategory::Elemental, 0.5, a(5, 14, 10, 9, 11, 10), 17, 12)
            .in_biomes(&[Desert, Mountain])
            .with_behavior(Behavior::Cunning)
            .immune_to(&[Poison])
            .vulnerable_to(&[Fire])
            .drops("Glimmering Dust", 0.6, 1, 3),
        Enemy::template("fire_elemental", "Fire Elemental", Subcategory::Elemental, 5.0, a(10, 17, 16, 6, 10, 7), 102, 13)
            .in_biomes(&[Desert, Mountain])
            .deals(Fire)
            .immune_to(&[Fire, Poison])
            .resists(&[Slashing, Piercing, Bludgeoning])
            .vulnerable_to(&[Cold])
            .inflicts(StatusEffect::new(StatusKind::Burning, 3, 2))
            .drops("Ember Core", 0.9, 1, 1),
        Enemy::template("earth_elemental", "Earth Elemental", Subcategory::Elemental, 5.0, a(20, 8, 20, 5, 10, 5), 126, 17)
            .in_biomes(&[Mountain, Cave])
            .with_behavior(Behavior::Defensive)
            .deals(Bludgeoning)
            .immune_to(&[Poison])
            .resists(&[Slashing, Piercing])
            .drops("Living Stone", 0.9, 1, 2),
        // Human
        Enemy::template("bandit", "Bandit", Subcategory::Bandit, 0.125, a(11, 12, 12, 10, 10, 10), 11, 12)
            .in_biomes(&[Plains, Forest, Desert])
            .with_behavior(Behavior::Cunning)
            .drops("Gold Coins", 0.8, 1, 10),
        Enemy::template("thug", "Thug", Subcategory::Bandit, 0.5, a(15, 11, 14, 10, 10, 11), 32, 11)
            .in_biomes(&[Plains, Ruins])
            .deals(Bludgeoning)
            .drops("Gold Coins", 0.8, 5, 15),
        Enemy::template("bandit_captain", "Bandit Captain", Subcategory::Bandit, 2.0, a(15, 16, 14, 14, 11, 14), 65, 15)
            .in_biomes(&[Plains, Forest, Desert])
            .with_behavior(Behavior::Cunning)
            .drops("Gold Coins", 1.0, 20, 50)
            .drops("Fine Scimitar", 0.2, 1, 1),
        Enemy::template("guard", "Guard", Subcategory::Soldier, 0.125, a(13, 12, 12, 10, 11, 10), 11, 16)
            .in_biomes(&[Plains])
            .with_behavior(Behavior::Defensive)
            .deals(Piercing)
            .drops("Spear", 0.3, 1, 1),
        Enemy::template("veteran", "Veteran", Subcategory::Soldier, 3.0, a(16, 13, 14, 10, 11, 10), 58, 17)
            .in_biomes(&[Plains, Mountain])
            .with_behavior(Behavior::Defensive)
            .drops("Longsword", 0.3, 1, 1)
            .drops("Gold Coins", 0.7, 10, 30),
        Enemy::template("knight", "Knight", Subcategory::Soldier, 3.0, a(16, 11, 14, 11, 11, 15), 52, 18)
            .in_biomes(&[Plains])
            .with_behavior(Behavior::Defensive)
            .drops("Knight's Seal", 0.5, 1, 1),
        Enemy::template("cultist", "Cultist", Subcategory::Cultist, 0.125, a(11, 12, 10, 10, 11, 10), 9, 12)
            .in_biomes(&[Ruins, Cave, Swamp])
            .drops("Cult Robes", 0.4, 1, 1),
        Enemy::template("cult_fanatic", "Cult Fanatic", Subcategory::Cultist, 2.0, a(11, 14, 12, 10, 13, 14), 33, 13)
            .in_biomes(&[Ruins, Cave])
            .with_behavior(Behavior::Cunning)
            .deals(Necrotic)
            .drops("Dark Idol", 0.4, 1, 1)
            .with_trait("Chants in a forgotten tongue"),
        // Undead
        Enemy::template("skeleton", "Skeleton", Subcategory::Skeleton, 0.25, a(10, 14, 15, 6, 8, 5), 13, 13)
            .in_biomes(&[Ruins, Cave])
            .with_behavior(Behavior::Mindless)
            .deals(Piercing)
            .immune_to(&[Poison])
            .vulnerable_to(&[Bludgeoning])
            .drops("Bone Dust", 0.7, 1, 3),
        Enemy::template("skeletal_knight", "Skeletal Knight", Subcategory::Skeleton, 2.0, a(16, 11, 15, 6, 8, 5), 45, 16)
            .in_biomes(&[Ruins])
            .with_behavior(Behavior::Defensive)
            .immune_to(&[Poison])
            .vulnerable_to(&[Bludgeoning])
            .drops("Corroded Shield", 0.3, 1, 1),
        Enemy::template("zombie", "Zombie", Subcategory::Zombie, 0.25, a(13, 6, 16, 3, 6, 5), 22, 8)
            .in_biomes(&[Swamp, Ruins, Plains])
            .with_behavior(Behavior::Mindless)
            .deals(Bludgeoning)
            .immune_to(&[Poison])
            .vulnerable_to(&[Radiant])
            .drops("Rotten Flesh", 0.6, 1, 2),
        Enemy::template("ghoul", "Ghoul", Subcategory::Zombie, 1.0, a(13, 15, 10, 7, 10, 6), 22, 12)
            .in_biomes(&[Ruins, Cave, Swamp])
            .with_behavior(Behavior::Pack)
            .immune_to(&[Poison])
            .vulnerable_to(&[Radiant])
            .inflicts(StatusEffect::new(StatusKind::Stunned, 0, 1))
            .drops("Ghoul Claw", 0.5, 1, 2),
        Enemy::template("ogre_zombie", "Ogre Zombie", Subcategory::Zombie, 2.0, a(19, 6, 18, 3, 6, 5), 85, 8)
            .in_biomes(&[Swamp, Mountain])
            .with_behavior(Behavior::Mindless)
            .deals(Bludgeoning)
            .immune_to(&[Poison])
            .vulnerable_to(&[Radiant])
            .drops("Rotten Flesh", 0.8, 2, 4),
        Enemy::template("specter", "Specter", Subcategory::Spirit, 1.0, a(1, 14, 11, 10, 10, 11), 22, 12)
            .in_biomes(&[Ruins, Cave])
            .with_behavior(Behavior::Cunning)
            .deals(Necrotic)
            .immune_to(&[Necrotic, Poison])
            .resists(&[Slashing, Piercing, Bludgeoning, Cold, Fire])
            .vulnerable_to(&[Radiant])
            .drops("Ectoplasm", 0.5, 1, 1),
        Enemy::template("wraith", "Wraith", Subcategory::Spirit, 5.0, a(6, 16, 16, 12, 14, 15), 67, 13)
            .in_biomes(&[Ruins, Swamp])
            .with_behavior(Behavior::Cunning)
            .deals(Necrotic)
            .immune_to(&[Necrotic, Poison])
            .resists(&[Slashing, Piercing, Bludgeoning, Cold, Fire])
            .vulnerable_to(&[Radiant])
            .drops("Shadow Essence", 0.7, 1, 2),
        // Demon
        Enemy::template("imp", "Imp", Subcategory::Imp, 1.0, a(6, 17, 13, 11, 12, 14), 10, 13)
            .in_biomes(&[Ruins, Cave, Desert])
            .with_behavior(Behavior::Cunning)
            .deals(Piercing)
            .immune_to(&[Fire, Poison])
            .resists(&[Cold])
            .vulnerable_to(&[Radiant])
            .inflicts(StatusEffect::new(StatusKind::Poison, 3, 2))
            .drops("Imp Horn", 0.5, 1, 1),
        Enemy::template("quasit", "Quasit", Subcategory::Imp, 1.0, a(5, 17, 10, 7, 10, 10), 7, 13)
            .in_biomes(&[Swamp, Ruins])
            .with_behavior(Behavior::Cunning)
            .immune_to(&[Poison])
            .resists(&[Cold, Fire])
            .vulnerable_to(&[Radiant])
            .drops("Quasit Ichor", 0.4, 1, 1),
        Enemy::template("hell_hound", "Hell Hound", Subcategory::Fiend, 3.0, a(17, 12, 14, 6, 13, 6), 45, 15)
            .in_biomes(&[Desert, Mountain, Cave])
            .with_behavior(Behavior::Pack)
            .deals(Fire)
            .immune_to(&[Fire])
            .vulnerable_to(&[Cold, Radiant])
            .inflicts(StatusEffect::new(StatusKind::Burning, 2, 2))
            .drops("Smouldering Fang", 0.6, 1, 2),
        Enemy::template("barbed_devil", "Barbed Devil", Subcategory::Fiend, 5.0, a(16, 17, 18, 12, 14, 14), 110, 15)
            .in_biomes(&[Ruins, Desert])
            .deals(Piercing)
            .immune_to(&[Fire, Poison])
            .resists(&[Cold])
            .vulnerable_to(&[Radiant])
            .inflicts(StatusEffect::new(StatusKind::Bleeding, 2, 3))
            .drops("Infernal Barb", 0.7, 1, 3),
        Enemy::template("vrock", "Vrock", Subcategory::Fiend, 6.0, a(17, 15, 18, 8, 13, 8), 104, 15)
            .in_biomes(&[Ruins, Swamp])
            .with_behavior(Behavior::Aggressive)
            .immune_to(&[Poison])
            .resists(&[Cold, Fire])
            .vulnerable_to(&[Radiant])
            .drops("Vrock Feather", 0.8, 1, 4),
        // Bosses
        Enemy::template("owlbear_matriarch", "Owlbear Matriarch", Subcategory::Beast, 4.0, a(20, 12, 18, 3, 12, 7), 90, 14)
            .in_biomes(&[Forest, Mountain])
            .drops("Owlbear Feathers", 1.0, 2, 5)
            .with_trait("Shrieks when cornered")
            .boss(),
        Enemy::template("bandit_warlord", "Bandit Warlord", Subcategory::Bandit, 4.0, a(17, 16, 16, 13, 12, 16), 112, 16)
            .in_biomes(&[Plains, Desert, Forest])
            .with_behavior(Behavior::Cunning)
            .drops("Gold Coins", 1.0, 50, 120)
            .drops("Warlord's Signet", 0.5, 1, 1)
            .boss(),
        Enemy::template("crypt_lord", "Crypt Lord", Subcategory::Skeleton, 6.0, a(18, 12, 18, 16, 14, 16), 120, 17)
            .in_biomes(&[Ruins, Cave])
            .with_behavior(Behavior::Defensive)
            .deals(Necrotic)
            .immune_to(&[Poison, Necrotic])
            .vulnerable_to(&[Radiant, Bludgeoning])
            .drops("Crown of Bones", 1.0, 1, 1)
            .with_trait("Commands the restless dead")
            .boss(),
        Enemy::template("pit_herald", "Pit Herald", Subcategory::Fiend, 8.0, a(22, 14, 20, 16, 15, 18), 150, 18)
            .in_biomes(&[Desert, Ruins, Cave])
            .deals(Fire)
            .immune_to(&[Fire, Poison])
            .resists(&[Cold, Slashing])
            .vulnerable_to(&[Radiant])
            .inflicts(StatusEffect::new(StatusKind::Burning, 4, 3))
            .drops("Herald's Brand", 1.0, 1, 1)
            .boss(),
    ]
}
