//! Encounter assembly: turns a party description and difficulty into a
//! concrete list of spawned enemies drawn from the catalog.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::EnemyCatalog;
use super::enemy::{Biome, Enemy, EnemyCategory};
use crate::core::constants::*;
use crate::core::error::{ensure_in_range, CombatError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl Difficulty {
    /// Maps a world challenge rating onto a difficulty tier.
    pub fn from_challenge_rating(challenge_rating: f64) -> Self {
        if challenge_rating <= EASY_MAX_CR {
            Difficulty::Easy
        } else if challenge_rating <= MEDIUM_MAX_CR {
            Difficulty::Medium
        } else if challenge_rating <= HARD_MAX_CR {
            Difficulty::Hard
        } else {
            Difficulty::Deadly
        }
    }

    fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Deadly => 3,
        }
    }
}

/// Per-player XP threshold: level x {50, 100, 150, 200} by tier.
pub fn xp_threshold(level: u32, difficulty: Difficulty) -> Result<u32, CombatError> {
    ensure_in_range(
        "party_level",
        level as f64,
        MIN_PARTY_LEVEL as f64,
        MAX_PARTY_LEVEL as f64,
    )?;
    Ok(level * DIFFICULTY_XP_PER_LEVEL[difficulty.index()])
}

/// Total XP budget for a party.
pub fn xp_budget(level: u32, party_size: usize, difficulty: Difficulty) -> Result<u32, CombatError> {
    if party_size == 0 {
        return Err(CombatError::out_of_range(
            "party_size",
            0.0,
            1.0,
            f64::from(u32::MAX),
        ));
    }
    let threshold = xp_threshold(level, difficulty)?;
    u32::try_from(party_size)
        .ok()
        .and_then(|size| threshold.checked_mul(size))
        .ok_or_else(|| {
            CombatError::out_of_range(
                "party_size",
                party_size as f64,
                1.0,
                f64::from(u32::MAX / threshold.max(1)),
            )
        })
}

/// Converts an XP budget into the challenge rating the encounter should reach.
pub fn budget_to_target_cr(budget: u32) -> f64 {
    for (limit, cr) in BUDGET_CR_STEPS {
        if budget < limit {
            return cr;
        }
    }
    let overflow_start = BUDGET_CR_STEPS[BUDGET_CR_STEPS.len() - 1].0;
    BUDGET_CR_OVERFLOW_BASE + (budget - overflow_start) as f64 / BUDGET_CR_OVERFLOW_STEP
}

/// Multiplier applied to an enemy's CR based on how many enemies are in the group.
pub fn group_multiplier(count: usize) -> f64 {
    match count {
        0 | 1 => 1.0,
        2 => 1.5,
        3..=6 => 2.0,
        7..=10 => 2.5,
        _ => 3.0,
    }
}

/// Which templates may appear. `None` fields do not filter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterFilter {
    pub biome: Option<Biome>,
    pub category: Option<EnemyCategory>,
}

impl EncounterFilter {
    pub fn biome(biome: Biome) -> Self {
        Self {
            biome: Some(biome),
            category: None,
        }
    }

    pub fn matches(&self, enemy: &Enemy) -> bool {
        self.biome.map_or(true, |b| enemy.lives_in(b))
            && self.category.map_or(true, |c| enemy.category == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncounterRequest {
    pub filter: EncounterFilter,
    pub party_level: u32,
    pub party_size: usize,
    pub difficulty: Difficulty,
}

/// A generated group plus the numbers that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub enemies: Vec<Enemy>,
    pub target_cr: f64,
    /// Sum of enemy CR x group multiplier at the time each enemy joined.
    pub effective_cr: f64,
}

pub struct EncounterBuilder<'a> {
    catalog: &'a EnemyCatalog,
    max_enemies: usize,
}

impl<'a> EncounterBuilder<'a> {
    pub fn new(catalog: &'a EnemyCatalog) -> Self {
        Self {
            catalog,
            max_enemies: MAX_ENCOUNTER_SIZE,
        }
    }

    pub fn with_max_enemies(mut self, max_enemies: usize) -> Self {
        self.max_enemies = max_enemies;
        self
    }

    /// Builds an encounter for the request. An empty candidate pool yields an
    /// empty encounter; the caller decides how to fall back.
    pub fn generate(
        &self,
        request: &EncounterRequest,
        rng: &mut impl Rng,
    ) -> Result<Encounter, CombatError> {
        let budget = xp_budget(request.party_level, request.party_size, request.difficulty)?;
        let target_cr = budget_to_target_cr(budget);
        let pool: Vec<&Enemy> = self
            .catalog
            .all()
            .iter()
            .filter(|e| !e.is_boss && request.filter.matches(e))
            .collect();

        let encounter = self.fill(&pool, target_cr, rng);
        tracing::debug!(
            budget,
            target_cr,
            effective_cr = encounter.effective_cr,
            enemies = encounter.enemies.len(),
            "assembled encounter"
        );
        Ok(encounter)
    }

    /// Greedy fill: keep adding random enemies whose CR fits the remaining
    /// target (with 20% tolerance) until the target is met, the group is
    /// full, or nothing fits.
    pub fn fill(&self, pool: &[&Enemy], target_cr: f64, rng: &mut impl Rng) -> Encounter {
        let mut sorted: Vec<&Enemy> = pool.to_vec();
        sorted.sort_by(|a, b| a.challenge_rating.total_cmp(&b.challenge_rating));

        let mut enemies = Vec::new();
        let mut spent = 0.0;

        while spent < target_cr && enemies.len() < self.max_enemies {
            let ceiling = (target_cr - spent) * CR_TOLERANCE;
            let fitting: Vec<&Enemy> = sorted
                .iter()
                .copied()
                .take_while(|e| e.challenge_rating <= ceiling)
                .collect();
            let Some(pick) = fitting.choose(rng) else {
                break;
            };
            enemies.push(pick.spawn(rng));
            spent += pick.challenge_rating * group_multiplier(enemies.len());
        }

        Encounter {
            enemies,
            target_cr,
            effective_cr: spent,
        }
    }

    /// Scales `boss` up to CR party_level + 2 when it is weaker than that and
    /// surrounds it with up to three same-category minions.
    pub fn generate_boss_encounter(
        &self,
        boss: &Enemy,
        party_level: u32,
        party_size: usize,
        rng: &mut impl Rng,
    ) -> Vec<Enemy> {
        let target_cr = party_level as f64 + BOSS_LEVEL_CR_OFFSET;
        let mut leader = boss.spawn(rng);
        if leader.challenge_rating < target_cr {
            scale_to_cr(&mut leader, target_cr);
        }

        let scaled_cr = leader.challenge_rating;
        let band_center = scaled_cr / BOSS_MINION_CR_DIVISOR;
        let low = band_center - BOSS_MINION_CR_BAND;
        let high = band_center + BOSS_MINION_CR_BAND;
        let candidates: Vec<&Enemy> = self
            .catalog
            .by_category(leader.category)
            .into_iter()
            .filter(|e| !e.is_boss && e.challenge_rating >= low && e.challenge_rating <= high)
            .collect();

        let minion_cap = u32::try_from(party_size / 2).unwrap_or(u32::MAX);
        let minion_count = rng.gen_range(0..=MAX_BOSS_MINIONS).min(minion_cap);

        let mut group = vec![leader];
        if !candidates.is_empty() {
            for _ in 0..minion_count {
                if let Some(minion) = candidates.choose(rng) {
                    group.push(minion.spawn(rng));
                }
            }
        }
        group
    }
}

/// Scales an enemy to a higher CR: abilities by sqrt(factor), HP linearly,
/// AC by +1 per two CR gained.
pub fn scale_to_cr(enemy: &mut Enemy, target_cr: f64) {
    let base_cr = enemy.challenge_rating;
    let factor = if base_cr > 0.0 { target_cr / base_cr } else { target_cr.max(1.0) };

    enemy.stats.attributes = enemy.stats.attributes.scaled(factor.sqrt());
    enemy.stats.max_hp = ((enemy.stats.max_hp as f64) * factor).round().max(1.0) as u32;
    enemy.stats.current_hp = enemy.stats.max_hp;
    enemy.stats.armor_class += ((target_cr - base_cr) / 2.0).floor() as i32;
    enemy.set_challenge_rating(target_cr);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::{AttributeType, Attributes};
    use crate::combat::enemy::Subcategory;
    use crate::combat::types::Combatant;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn template(key: &str, cr: f64) -> Enemy {
        Enemy::template(key, key, Subcategory::Beast, cr, Attributes::new(), 10, 12)
            .in_biomes(&[Biome::Forest])
    }

    #[test]
    fn test_difficulty_from_challenge_rating() {
        assert_eq!(Difficulty::from_challenge_rating(0.0), Difficulty::Easy);
        assert_eq!(Difficulty::from_challenge_rating(0.5), Difficulty::Easy);
        assert_eq!(Difficulty::from_challenge_rating(1.0), Difficulty::Medium);
        assert_eq!(Difficulty::from_challenge_rating(1.5), Difficulty::Medium);
        assert_eq!(Difficulty::from_challenge_rating(3.0), Difficulty::Hard);
        assert_eq!(Difficulty::from_challenge_rating(3.1), Difficulty::Deadly);
    }

    #[test]
    fn test_xp_threshold() {
        assert_eq!(xp_threshold(1, Difficulty::Easy), Ok(50));
        assert_eq!(xp_threshold(3, Difficulty::Hard), Ok(450));
        assert_eq!(xp_threshold(20, Difficulty::Deadly), Ok(4000));
        assert!(xp_threshold(0, Difficulty::Easy).is_err());
        assert!(xp_threshold(21, Difficulty::Easy).is_err());
    }

    #[test]
    fn test_xp_budget_rejects_empty_party() {
        assert_eq!(xp_budget(2, 4, Difficulty::Medium), Ok(800));
        assert!(xp_budget(2, 0, Difficulty::Medium).is_err());
    }

    #[test]
    fn test_xp_budget_overflow_is_an_error() {
        assert!(xp_budget(20, usize::MAX, Difficulty::Deadly).is_err());
        assert!(xp_budget(20, u32::MAX as usize, Difficulty::Easy).is_err());
        assert_eq!(xp_budget(1, 1000, Difficulty::Easy), Ok(50_000));
    }

    #[test]
    fn test_budget_to_target_cr_steps() {
        assert_eq!(budget_to_target_cr(50), 0.25);
        assert_eq!(budget_to_target_cr(99), 0.25);
        assert_eq!(budget_to_target_cr(100), 0.5);
        assert_eq!(budget_to_target_cr(449), 1.0);
        assert_eq!(budget_to_target_cr(450), 2.0);
        assert_eq!(budget_to_target_cr(1799), 4.0);
        assert_eq!(budget_to_target_cr(2299), 5.0);
        assert_eq!(budget_to_target_cr(2300), 5.0);
        assert_eq!(budget_to_target_cr(2900), 6.0);
    }

    #[test]
    fn test_group_multiplier_table() {
        assert_eq!(group_multiplier(1), 1.0);
        assert_eq!(group_multiplier(2), 1.5);
        assert_eq!(group_multiplier(3), 2.0);
        assert_eq!(group_multiplier(6), 2.0);
        assert_eq!(group_multiplier(7), 2.5);
        assert_eq!(group_multiplier(10), 2.5);
        assert_eq!(group_multiplier(11), 3.0);
    }

    #[test]
    fn test_fill_reaches_target_or_stops_for_a_reason() {
        let catalog = EnemyCatalog::from_templates(vec![template("a", 1.0), template("b", 0.5)]);
        let builder = EncounterBuilder::new(&catalog);
        let pool: Vec<&Enemy> = catalog.all().iter().collect();

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let encounter = builder.fill(&pool, 3.0, &mut rng);
            assert!(!encounter.enemies.is_empty());
            assert!(encounter.enemies.len() <= MAX_ENCOUNTER_SIZE);
            let remaining_ceiling = (3.0 - encounter.effective_cr) * CR_TOLERANCE;
            assert!(
                encounter.effective_cr >= 3.0
                    || encounter.enemies.len() == MAX_ENCOUNTER_SIZE
                    || remaining_ceiling < 0.5,
                "seed {} stopped early at {}",
                seed,
                encounter.effective_cr
            );
        }
    }

    #[test]
    fn test_fill_respects_tolerance() {
        let catalog = EnemyCatalog::from_templates(vec![template("big", 5.0)]);
        let builder = EncounterBuilder::new(&catalog);
        let pool: Vec<&Enemy> = catalog.all().iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 5.0 > 4.0 * 1.2
        assert!(builder.fill(&pool, 4.0, &mut rng).enemies.is_empty());
        // 5.0 <= 4.5 * 1.2
        assert_eq!(builder.fill(&pool, 4.5, &mut rng).enemies.len(), 1);
    }

    #[test]
    fn test_fill_caps_group_size() {
        let catalog = EnemyCatalog::from_templates(vec![template("speck", 0.0)]);
        let builder = EncounterBuilder::new(&catalog).with_max_enemies(4);
        let pool: Vec<&Enemy> = catalog.all().iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let encounter = builder.fill(&pool, 2.0, &mut rng);
        assert_eq!(encounter.enemies.len(), 4);
        assert_eq!(encounter.effective_cr, 0.0);
    }

    #[test]
    fn test_generate_empty_pool_is_empty_not_error() {
        let catalog = EnemyCatalog::from_templates(vec![template("a", 1.0)]);
        let builder = EncounterBuilder::new(&catalog);
        let request = EncounterRequest {
            filter: EncounterFilter::biome(Biome::Desert),
            party_level: 3,
            party_size: 2,
            difficulty: Difficulty::Medium,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let encounter = builder.generate(&request, &mut rng).unwrap();
        assert!(encounter.enemies.is_empty());
    }

    #[test]
    fn test_generate_rejects_bad_level() {
        let catalog = EnemyCatalog::new();
        let builder = EncounterBuilder::new(&catalog);
        let request = EncounterRequest {
            filter: EncounterFilter::default(),
            party_level: 0,
            party_size: 2,
            difficulty: Difficulty::Easy,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(builder.generate(&request, &mut rng).is_err());
    }

    #[test]
    fn test_generate_honours_filters_and_skips_bosses() {
        let catalog = EnemyCatalog::new();
        let builder = EncounterBuilder::new(&catalog);
        let request = EncounterRequest {
            filter: EncounterFilter {
                biome: Some(Biome::Ruins),
                category: Some(EnemyCategory::Undead),
            },
            party_level: 4,
            party_size: 4,
            difficulty: Difficulty::Hard,
        };
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let encounter = builder.generate(&request, &mut rng).unwrap();
            assert!(!encounter.enemies.is_empty());
            for enemy in &encounter.enemies {
                assert!(enemy.lives_in(Biome::Ruins));
                assert_eq!(enemy.category, EnemyCategory::Undead);
                assert!(!enemy.is_boss);
                assert_eq!(enemy.current_hp(), enemy.max_hp());
            }
        }
    }

    #[test]
    fn test_scale_to_cr() {
        let mut enemy = Enemy::template(
            "brute",
            "Brute",
            Subcategory::Soldier,
            1.0,
            Attributes::from_scores(16, 10, 14, 10, 10, 10),
            30,
            12,
        );
        scale_to_cr(&mut enemy, 4.0);
        // sqrt(4) = 2
        assert_eq!(enemy.stats.attributes.get(AttributeType::Strength), 30);
        assert_eq!(enemy.stats.attributes.get(AttributeType::Dexterity), 20);
        assert_eq!(enemy.max_hp(), 120);
        assert_eq!(enemy.current_hp(), 120);
        assert_eq!(enemy.armor_class(), 13);
        assert_eq!(enemy.challenge_rating, 4.0);
        assert_eq!(enemy.experience_value, 1100);
    }

    #[test]
    fn test_boss_encounter_scales_and_caps_minions() {
        let catalog = EnemyCatalog::new();
        let builder = EncounterBuilder::new(&catalog);
        let boss = catalog.by_key("bandit_warlord").unwrap();
        let mut saw_minions = false;

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let group = builder.generate_boss_encounter(boss, 4, 4, &mut rng);
            let leader = &group[0];
            assert_eq!(leader.challenge_rating, 6.0);
            assert!(leader.max_hp() > boss.max_hp());
            // party of 4 allows at most 2 minions
            assert!(group.len() <= 3);
            saw_minions |= group.len() > 1;
            for minion in &group[1..] {
                assert_eq!(minion.category, EnemyCategory::Human);
                assert!(!minion.is_boss);
                assert!(minion.challenge_rating >= 1.0);
                assert!(minion.challenge_rating <= 3.0);
            }
        }
        assert!(saw_minions);
        // Template untouched
        assert_eq!(boss.challenge_rating, 4.0);
    }

    #[test]
    fn test_boss_encounter_keeps_stronger_boss() {
        let catalog = EnemyCatalog::new();
        let builder = EncounterBuilder::new(&catalog);
        let boss = catalog.by_key("pit_herald").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let group = builder.generate_boss_encounter(boss, 1, 1, &mut rng);
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].challenge_rating, 8.0);
        assert_eq!(group[0].max_hp(), 150);
    }
}
