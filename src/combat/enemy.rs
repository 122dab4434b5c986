use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use super::types::{CombatStats, Combatant, DamageResponse, DamageType, StatusEffect};
use crate::character::attributes::Attributes;
use crate::core::constants::*;
use crate::core::dice::roll_chance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyCategory {
    Nature,
    Human,
    Undead,
    Demon,
}

impl EnemyCategory {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyCategory::Nature => "Nature",
            EnemyCategory::Human => "Human",
            EnemyCategory::Undead => "Undead",
            EnemyCategory::Demon => "Demon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subcategory {
    Beast,
    Plant,
    Elemental,
    Bandit,
    Soldier,
    Cultist,
    Skeleton,
    Zombie,
    Spirit,
    Imp,
    Fiend,
}

impl Subcategory {
    pub fn category(&self) -> EnemyCategory {
        match self {
            Subcategory::Beast | Subcategory::Plant | Subcategory::Elemental => {
                EnemyCategory::Nature
            }
            Subcategory::Bandit | Subcategory::Soldier | Subcategory::Cultist => {
                EnemyCategory::Human
            }
            Subcategory::Skeleton | Subcategory::Zombie | Subcategory::Spirit => {
                EnemyCategory::Undead
            }
            Subcategory::Imp | Subcategory::Fiend => EnemyCategory::Demon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Biome {
    Forest,
    #[default]
    Plains,
    Mountain,
    Swamp,
    Desert,
    Tundra,
    Cave,
    Ruins,
}

impl Biome {
    pub fn all() -> [Biome; 8] {
        [
            Biome::Forest,
            Biome::Plains,
            Biome::Mountain,
            Biome::Swamp,
            Biome::Desert,
            Biome::Tundra,
            Biome::Cave,
            Biome::Ruins,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Biome::Forest => "forest",
            Biome::Plains => "plains",
            Biome::Mountain => "mountain",
            Biome::Swamp => "swamp",
            Biome::Desert => "desert",
            Biome::Tundra => "tundra",
            Biome::Cave => "cave",
            Biome::Ruins => "ruins",
        }
    }

    /// Maps a coarse terrain description from world generation onto a biome.
    /// Unrecognised terrain falls back to plains.
    pub fn classify(terrain: &str) -> Biome {
        let terrain = terrain.trim().to_ascii_lowercase();
        let contains_any = |words: &[&str]| words.iter().any(|w| terrain.contains(w));

        if contains_any(&["forest", "wood", "jungle", "grove"]) {
            Biome::Forest
        } else if contains_any(&["mountain", "hill", "peak", "cliff"]) {
            Biome::Mountain
        } else if contains_any(&["swamp", "marsh", "bog", "fen"]) {
            Biome::Swamp
        } else if contains_any(&["desert", "dune", "sand", "waste"]) {
            Biome::Desert
        } else if contains_any(&["tundra", "snow", "ice", "frozen", "glacier"]) {
            Biome::Tundra
        } else if contains_any(&["cave", "cavern", "dungeon", "mine", "underground"]) {
            Biome::Cave
        } else if contains_any(&["ruin", "crypt", "tomb", "graveyard", "temple"]) {
            Biome::Ruins
        } else {
            Biome::Plains
        }
    }
}

/// Combat temperament. Carried as data for a future AI; targeting ignores it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Aggressive,
    Defensive,
    Cunning,
    Pack,
    Mindless,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub name: String,
    pub drop_chance: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootDrop {
    pub name: String,
    pub quantity: u32,
    pub source: String,
}

/// Experience awarded for defeating a creature of the given challenge rating.
///
/// Canonical ratings use the table exactly; ratings between two canonical
/// values award the lower one. Above CR 10 the award grows by 1.5x per CR
/// from the fixed CR 10 value.
pub fn experience_for_cr(challenge_rating: f64) -> u32 {
    if challenge_rating > XP_EXTRAPOLATION_ANCHOR_CR {
        let steps = challenge_rating - XP_EXTRAPOLATION_ANCHOR_CR;
        return (XP_EXTRAPOLATION_ANCHOR * XP_EXTRAPOLATION_BASE.powf(steps)).round() as u32;
    }
    CR_XP_TABLE
        .iter()
        .rev()
        .find(|(cr, _)| challenge_rating >= *cr)
        .map(|(_, xp)| *xp)
        .unwrap_or(CR_XP_TABLE[0].1)
}

/// Fresh instance id drawn from the combat RNG so seeded runs stay reproducible.
pub fn random_id(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// An enemy template or a live instance spawned from one.
///
/// Templates carry a nil id; [`Enemy::spawn`] deep-clones a template with a
/// fresh id and full HP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub stats: CombatStats,
    pub key: String,
    pub category: EnemyCategory,
    pub subcategory: Subcategory,
    pub challenge_rating: f64,
    pub biomes: Vec<Biome>,
    pub behavior: Behavior,
    pub damage_type: DamageType,
    #[serde(default)]
    pub resistances: BTreeSet<DamageType>,
    #[serde(default)]
    pub vulnerabilities: BTreeSet<DamageType>,
    #[serde(default)]
    pub immunities: BTreeSet<DamageType>,
    #[serde(default)]
    pub loot_table: Vec<LootEntry>,
    /// Status inflicted on every successful hit.
    #[serde(default)]
    pub on_hit: Option<StatusEffect>,
    /// Narrative flavour only.
    #[serde(default)]
    pub traits: Vec<String>,
    pub experience_value: u32,
    #[serde(default)]
    pub is_boss: bool,
}

impl Enemy {
    pub fn template(
        key: &str,
        name: &str,
        subcategory: Subcategory,
        challenge_rating: f64,
        attributes: Attributes,
        max_hp: u32,
        armor_class: i32,
    ) -> Self {
        Self {
            stats: CombatStats::new(Uuid::nil(), name.to_string(), attributes, max_hp, armor_class),
            key: key.to_string(),
            category: subcategory.category(),
            subcategory,
            challenge_rating,
            biomes: Vec::new(),
            behavior: Behavior::Aggressive,
            damage_type: DamageType::Slashing,
            resistances: BTreeSet::new(),
            vulnerabilities: BTreeSet::new(),
            immunities: BTreeSet::new(),
            loot_table: Vec::new(),
            on_hit: None,
            traits: Vec::new(),
            experience_value: experience_for_cr(challenge_rating),
            is_boss: false,
        }
    }

    pub fn in_biomes(mut self, biomes: &[Biome]) -> Self {
        self.biomes = biomes.to_vec();
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn deals(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn resists(mut self, types: &[DamageType]) -> Self {
        self.resistances.extend(types.iter().copied());
        self
    }

    pub fn vulnerable_to(mut self, types: &[DamageType]) -> Self {
        self.vulnerabilities.extend(types.iter().copied());
        self
    }

    pub fn immune_to(mut self, types: &[DamageType]) -> Self {
        self.immunities.extend(types.iter().copied());
        self
    }

    pub fn drops(mut self, name: &str, drop_chance: f64, min_quantity: u32, max_quantity: u32) -> Self {
        self.loot_table.push(LootEntry {
            name: name.to_string(),
            drop_chance,
            min_quantity,
            max_quantity: max_quantity.max(min_quantity),
        });
        self
    }

    pub fn inflicts(mut self, effect: StatusEffect) -> Self {
        self.on_hit = Some(effect);
        self
    }

    pub fn with_trait(mut self, description: &str) -> Self {
        self.traits.push(description.to_string());
        self
    }

    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    /// Deep clone into a live combatant with a fresh id and full HP.
    pub fn spawn(&self, rng: &mut impl Rng) -> Enemy {
        let mut enemy = self.clone();
        enemy.stats.id = random_id(rng);
        enemy.stats.current_hp = enemy.stats.max_hp;
        enemy.stats.initiative = 0;
        enemy.stats.status_effects.clear();
        enemy.stats.used_defend = false;
        enemy
    }

    /// Placeholder foe used when no encounter could be assembled.
    pub fn fallback(challenge_rating: f64, rng: &mut impl Rng) -> Enemy {
        let cr = if challenge_rating.is_finite() {
            challenge_rating.clamp(0.0, FALLBACK_MAX_CR)
        } else {
            0.0
        };
        let hp = ((FALLBACK_BASE_HP + cr * FALLBACK_HP_PER_CR).floor() as u32).max(FALLBACK_MIN_HP);
        let armor_class = BASE_ARMOR_CLASS + cr.floor() as i32;
        let attributes = Attributes::new().shifted(cr.floor() as i32);
        Enemy::template(
            "wandering_brute",
            "Wandering Brute",
            Subcategory::Beast,
            cr,
            attributes,
            hp,
            armor_class,
        )
        .in_biomes(&Biome::all())
        .deals(DamageType::Bludgeoning)
        .drops("Coarse Hide", 0.5, 1, 2)
        .spawn(rng)
    }

    /// Replaces the challenge rating and recomputes experience from the fixed table.
    pub fn set_challenge_rating(&mut self, challenge_rating: f64) {
        self.challenge_rating = challenge_rating;
        self.experience_value = experience_for_cr(challenge_rating);
    }

    /// Damage dealt per successful hit, before crits.
    pub fn attack_damage(&self) -> u32 {
        let raw = (ENEMY_BASE_DAMAGE + self.challenge_rating * ENEMY_DAMAGE_PER_CR).floor();
        (raw.max(0.0) as u32).max(ENEMY_MIN_DAMAGE)
    }

    pub fn damage_response(&self, damage_type: DamageType) -> DamageResponse {
        if self.immunities.contains(&damage_type) {
            DamageResponse::Immune
        } else if self.resistances.contains(&damage_type) {
            DamageResponse::Resisted
        } else if self.vulnerabilities.contains(&damage_type) {
            DamageResponse::Vulnerable
        } else {
            DamageResponse::Normal
        }
    }

    pub fn lives_in(&self, biome: Biome) -> bool {
        self.biomes.contains(&biome)
    }

    /// Rolls every loot entry independently against its drop chance.
    pub fn roll_loot(&self, rng: &mut impl Rng) -> Vec<LootDrop> {
        let mut drops = Vec::new();
        for entry in &self.loot_table {
            if roll_chance(entry.drop_chance, rng) {
                let low = entry.min_quantity.min(entry.max_quantity);
                let quantity = rng.gen_range(low..=entry.max_quantity.max(low));
                if quantity > 0 {
                    drops.push(LootDrop {
                        name: entry.name.clone(),
                        quantity,
                        source: self.stats.name.clone(),
                    });
                }
            }
        }
        drops
    }
}

impl Combatant for Enemy {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::StatusKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn goblin() -> Enemy {
        Enemy::template(
            "goblin",
            "Goblin",
            Subcategory::Bandit,
            0.25,
            Attributes::from_scores(8, 14, 10, 10, 8, 8),
            7,
            13,
        )
        .in_biomes(&[Biome::Forest, Biome::Cave])
        .drops("Rusty Dagger", 1.0, 1, 1)
        .drops("Nothing Ever", 0.0, 1, 3)
    }

    #[test]
    fn test_experience_table_exact() {
        assert_eq!(experience_for_cr(0.0), 10);
        assert_eq!(experience_for_cr(0.125), 25);
        assert_eq!(experience_for_cr(0.25), 50);
        assert_eq!(experience_for_cr(0.5), 100);
        assert_eq!(experience_for_cr(1.0), 200);
        assert_eq!(experience_for_cr(4.0), 1100);
        assert_eq!(experience_for_cr(10.0), 5900);
    }

    #[test]
    fn test_experience_between_thresholds_uses_lower() {
        assert_eq!(experience_for_cr(1.5), 200);
        assert_eq!(experience_for_cr(9.99), 5000);
    }

    #[test]
    fn test_experience_above_cr_ten_anchored() {
        assert_eq!(experience_for_cr(11.0), 8850);
        assert_eq!(experience_for_cr(12.0), 13275);
        // Recomputing never compounds: same input, same output
        let mut enemy = goblin();
        enemy.set_challenge_rating(12.0);
        enemy.set_challenge_rating(12.0);
        assert_eq!(enemy.experience_value, 13275);
    }

    #[test]
    fn test_subcategory_determines_category() {
        assert_eq!(Subcategory::Zombie.category(), EnemyCategory::Undead);
        assert_eq!(Subcategory::Imp.category(), EnemyCategory::Demon);
        assert_eq!(Subcategory::Plant.category(), EnemyCategory::Nature);
        assert_eq!(goblin().category, EnemyCategory::Human);
    }

    #[test]
    fn test_spawn_deep_clones_template() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let template = goblin();
        let mut a = template.spawn(&mut rng);
        let b = template.spawn(&mut rng);
        assert_ne!(a.id(), Uuid::nil());
        assert_ne!(a.id(), b.id());

        a.take_damage(5);
        a.loot_table.clear();
        a.biomes.push(Biome::Desert);
        assert_eq!(template.current_hp(), 7);
        assert_eq!(template.loot_table.len(), 2);
        assert_eq!(template.biomes.len(), 2);
    }

    #[test]
    fn test_attack_damage_formula() {
        let mut enemy = goblin();
        assert_eq!(enemy.attack_damage(), 3);
        enemy.set_challenge_rating(0.0);
        assert_eq!(enemy.attack_damage(), 3);
        enemy.set_challenge_rating(2.0);
        assert_eq!(enemy.attack_damage(), 7);
        enemy.set_challenge_rating(0.6);
        assert_eq!(enemy.attack_damage(), 4);
    }

    #[test]
    fn test_fallback_enemy_cr_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let enemy = Enemy::fallback(1.0, &mut rng);
        assert_eq!(enemy.max_hp(), 40);
        assert_eq!(enemy.armor_class(), 11);
        assert_eq!(enemy.experience_value, 200);
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_fallback_enemy_sanitises_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let enemy = Enemy::fallback(-3.0, &mut rng);
        assert_eq!(enemy.challenge_rating, 0.0);
        assert_eq!(enemy.max_hp(), 20);
        let enemy = Enemy::fallback(f64::NAN, &mut rng);
        assert_eq!(enemy.challenge_rating, 0.0);
    }

    #[test]
    fn test_fallback_enemy_caps_huge_cr() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let enemy = Enemy::fallback(3.0e9, &mut rng);
        assert_eq!(enemy.challenge_rating, FALLBACK_MAX_CR);
        assert_eq!(enemy.armor_class(), BASE_ARMOR_CLASS + 30);
        assert_eq!(enemy.max_hp(), 620);
        assert!(enemy.experience_value > experience_for_cr(20.0));

        let enemy = Enemy::fallback(f64::MAX, &mut rng);
        assert_eq!(enemy.challenge_rating, FALLBACK_MAX_CR);
    }

    #[test]
    fn test_damage_response_precedence() {
        let enemy = goblin()
            .immune_to(&[DamageType::Poison])
            .resists(&[DamageType::Cold, DamageType::Poison])
            .vulnerable_to(&[DamageType::Radiant]);
        assert_eq!(enemy.damage_response(DamageType::Poison), DamageResponse::Immune);
        assert_eq!(enemy.damage_response(DamageType::Cold), DamageResponse::Resisted);
        assert_eq!(enemy.damage_response(DamageType::Radiant), DamageResponse::Vulnerable);
        assert_eq!(enemy.damage_response(DamageType::Fire), DamageResponse::Normal);
    }

    #[test]
    fn test_roll_loot_respects_chances() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let enemy = goblin();
        for _ in 0..20 {
            let drops = enemy.roll_loot(&mut rng);
            assert_eq!(drops.len(), 1);
            assert_eq!(drops[0].name, "Rusty Dagger");
            assert_eq!(drops[0].quantity, 1);
            assert_eq!(drops[0].source, "Goblin");
        }
    }

    #[test]
    fn test_biome_classify() {
        assert_eq!(Biome::classify("Dense Forest"), Biome::Forest);
        assert_eq!(Biome::classify("frozen lake"), Biome::Tundra);
        assert_eq!(Biome::classify("  Ancient Crypt "), Biome::Ruins);
        assert_eq!(Biome::classify("ocean"), Biome::Plains);
    }

    #[test]
    fn test_on_hit_effect_is_carried() {
        let spider = goblin().inflicts(StatusEffect::new(StatusKind::Poison, 2, 3));
        assert_eq!(spider.on_hit.map(|e| e.kind), Some(StatusKind::Poison));
    }
}
