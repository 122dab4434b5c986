//! Integration test: encounter generation against the standard catalog
//!
//! Checks budget sizing, filters, boss groups and the catalog isolation
//! guarantees that every live encounter relies on.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::character::attributes::Attributes;
use skirmish::combat::{
    budget_to_target_cr, group_multiplier, xp_budget, Biome, Combatant, Difficulty,
    EncounterBuilder, EncounterFilter, EncounterRequest, Enemy, EnemyCatalog, EnemyCategory,
    Subcategory,
};

fn request(biome: Biome, party_level: u32, party_size: usize, difficulty: Difficulty) -> EncounterRequest {
    EncounterRequest {
        filter: EncounterFilter::biome(biome),
        party_level,
        party_size,
        difficulty,
    }
}

/// Test a CR 3 target filled from a pool of CR 1 and CR 0.5 creatures
#[test]
fn test_target_cr_three_from_small_pool() {
    let ogre_kin = Enemy::template("brute", "Brute", Subcategory::Bandit, 1.0, Attributes::new(), 20, 12);
    let whelp = Enemy::template("whelp", "Whelp", Subcategory::Bandit, 0.5, Attributes::new(), 10, 11);
    let catalog = EnemyCatalog::from_templates(vec![ogre_kin, whelp]);
    let builder = EncounterBuilder::new(&catalog);
    let pool: Vec<&Enemy> = catalog.all().iter().collect();

    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let encounter = builder.fill(&pool, 3.0, &mut rng);
        assert!(!encounter.enemies.is_empty());
        assert!(encounter.enemies.len() <= 10);

        // Recompute the running effective CR the same way the builder does
        let effective: f64 = encounter
            .enemies
            .iter()
            .enumerate()
            .map(|(i, e)| e.challenge_rating * group_multiplier(i + 1))
            .sum();
        assert!((effective - encounter.effective_cr).abs() < 1e-9);

        if effective < 3.0 {
            // Stopped early: nothing left fits the tolerance window
            let ceiling = (3.0 - effective) * 1.2;
            assert!(ceiling < 0.5, "stopped with room left (seed {seed})");
        }
    }
}

/// Test that every biome produces a valid group at every level and difficulty
#[test]
fn test_every_biome_level_and_difficulty_yields_enemies() {
    let catalog = EnemyCatalog::new();
    let builder = EncounterBuilder::new(&catalog);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for biome in Biome::all() {
        for level in [1, 3, 5, 10, 15, 20] {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Deadly] {
                let encounter = builder
                    .generate(&request(biome, level, 4, difficulty), &mut rng)
                    .expect("valid request");
                assert!(
                    !encounter.enemies.is_empty(),
                    "{} level {} {:?} came back empty",
                    biome.name(),
                    level,
                    difficulty
                );
                assert!(encounter.enemies.len() <= 10);

                let budget = xp_budget(level, 4, difficulty).expect("valid budget");
                assert_eq!(encounter.target_cr, budget_to_target_cr(budget));

                for enemy in &encounter.enemies {
                    assert!(enemy.lives_in(biome));
                    assert!(!enemy.is_boss);
                    assert_eq!(enemy.current_hp(), enemy.max_hp());
                }
            }
        }
    }
}

/// Test that spawned enemies are independent copies with unique ids
#[test]
fn test_spawned_enemies_do_not_alias_catalog() {
    let catalog = EnemyCatalog::new();
    let builder = EncounterBuilder::new(&catalog);
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let mut encounter = builder
        .generate(&request(Biome::Cave, 8, 5, Difficulty::Deadly), &mut rng)
        .expect("valid request");
    let ids: HashSet<_> = encounter.enemies.iter().map(|e| e.id()).collect();
    assert_eq!(ids.len(), encounter.enemies.len());
    assert!(!ids.contains(&uuid::Uuid::nil()));

    for enemy in &mut encounter.enemies {
        enemy.take_damage(5);
    }
    for enemy in &encounter.enemies {
        let template = catalog.by_key(&enemy.key).expect("template exists");
        assert_eq!(template.current_hp(), template.max_hp());
        assert!(template.id().is_nil());
    }
}

/// Test boss groups: leader scaled to level + 2, minions share its category
#[test]
fn test_boss_groups_follow_party() {
    let catalog = EnemyCatalog::new();
    let builder = EncounterBuilder::new(&catalog);

    for boss in catalog.bosses() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let group = builder.generate_boss_encounter(boss, 10, 6, &mut rng);
            let leader = &group[0];
            assert!(leader.is_boss);
            assert_eq!(leader.challenge_rating, 12.0);
            assert!(leader.max_hp() > boss.max_hp());
            assert!(group.len() <= 4);
            for minion in &group[1..] {
                assert!(!minion.is_boss);
                assert_eq!(minion.category, leader.category);
                assert!((3.0..=5.0).contains(&minion.challenge_rating));
            }
        }

        // A solo hero never faces minions
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(builder.generate_boss_encounter(boss, 1, 1, &mut rng).len(), 1);
    }
}

/// Test that filters narrow by category as well as biome
#[test]
fn test_category_filter() {
    let catalog = EnemyCatalog::new();
    let builder = EncounterBuilder::new(&catalog);
    let mut rng = ChaCha8Rng::seed_from_u64(31);

    let request = EncounterRequest {
        filter: EncounterFilter {
            biome: Some(Biome::Ruins),
            category: Some(EnemyCategory::Undead),
        },
        party_level: 4,
        party_size: 4,
        difficulty: Difficulty::Hard,
    };
    let encounter = builder.generate(&request, &mut rng).expect("valid request");
    assert!(!encounter.enemies.is_empty());
    assert!(encounter.enemies.iter().all(|e| e.category == EnemyCategory::Undead));
}

/// Test request validation
#[test]
fn test_invalid_requests_are_errors() {
    let catalog = EnemyCatalog::new();
    let builder = EncounterBuilder::new(&catalog);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(builder.generate(&request(Biome::Forest, 0, 4, Difficulty::Easy), &mut rng).is_err());
    assert!(builder.generate(&request(Biome::Forest, 21, 4, Difficulty::Easy), &mut rng).is_err());
    assert!(builder.generate(&request(Biome::Forest, 5, 0, Difficulty::Easy), &mut rng).is_err());
}
