//! Shared fixtures for battle scenario tests.

use std::sync::Arc;

use crate::abilities::{
    AbilityCategory, AbilityDefinition, EffectKind, SecondaryEffect, TargetSelector,
};
use crate::battle::engine::BattleEngine;
use crate::dex::Dex;
use crate::items::{ItemDefinition, ItemEffect};
use crate::monster::{CreateOptions, MonsterInst, MonsterManager, StatusCondition};
use crate::rng::ScriptedRandom;
use crate::species::{
    Appearance, BaseStats, ElementType, EvolutionRule, EvolutionTrigger, LearnableAbility,
    SpeciesDefinition,
};
use crate::stats::{GrowthRate, StatName};
use crate::typechart::TypeChart;

fn species(
    id: &str,
    name: &str,
    element: ElementType,
    base_stats: BaseStats,
    learnset: &[(&str, u8)],
    evolution: Option<EvolutionRule>,
    catch_rate: u8,
    exp_yield: u16,
) -> SpeciesDefinition {
    SpeciesDefinition {
        id: id.to_string(),
        name: name.to_string(),
        element,
        base_stats,
        learnset: learnset
            .iter()
            .map(|(ability_id, level)| LearnableAbility {
                ability_id: ability_id.to_string(),
                level: *level,
            })
            .collect(),
        evolution,
        catch_rate,
        exp_yield,
        growth: GrowthRate::Medium,
        appearance: Appearance::default(),
    }
}

fn damaging_ability(
    id: &str,
    name: &str,
    element: ElementType,
    category: AbilityCategory,
    power: u16,
    accuracy: u8,
    effects: Vec<SecondaryEffect>,
) -> AbilityDefinition {
    AbilityDefinition {
        id: id.to_string(),
        name: name.to_string(),
        element,
        category,
        power: Some(power),
        accuracy,
        usage_limit: 25,
        target: TargetSelector::Foe,
        priority: 0,
        effects,
    }
}

fn status_ability(
    id: &str,
    name: &str,
    kind: EffectKind,
    target: TargetSelector,
) -> AbilityDefinition {
    AbilityDefinition {
        id: id.to_string(),
        name: name.to_string(),
        element: ElementType::Normal,
        category: AbilityCategory::Status,
        power: None,
        accuracy: 100,
        usage_limit: 40,
        target,
        priority: 0,
        effects: vec![SecondaryEffect {
            kind,
            target,
            chance: 100,
            duration: None,
        }],
    }
}

/// Definition repository shared by the battle scenario tests.
///
/// With 10 IVs and no EVs, the level-10 derived stats are:
///   embercub [28, 16, 14, 18, 16, 19]
///   sproutle [30, 15, 15, 19, 19, 15]
///   puffmote [29, 15, 14, 14, 14, 10]
pub fn fixture_dex() -> Arc<Dex> {
    let species_list = vec![
        species(
            "embercub",
            "Embercub",
            ElementType::Fire,
            BaseStats {
                hp: 39,
                attack: 52,
                defense: 43,
                sp_attack: 60,
                sp_defense: 50,
                speed: 65,
            },
            &[("scratch", 1), ("ember", 7), ("slash", 11)],
            Some(EvolutionRule {
                target_species_id: "cindram".to_string(),
                trigger: EvolutionTrigger::Level(11),
            }),
            45,
            62,
        ),
        species(
            "cindram",
            "Cindram",
            ElementType::Fire,
            BaseStats {
                hp: 58,
                attack: 64,
                defense: 58,
                sp_attack: 80,
                sp_defense: 65,
                speed: 80,
            },
            &[("scratch", 1), ("ember", 7), ("slash", 11)],
            None,
            45,
            142,
        ),
        species(
            "sproutle",
            "Sproutle",
            ElementType::Grass,
            BaseStats {
                hp: 45,
                attack: 49,
                defense: 49,
                sp_attack: 65,
                sp_defense: 65,
                speed: 45,
            },
            &[("tackle", 1), ("growl", 1), ("vine-whip", 7)],
            None,
            255,
            64,
        ),
        species(
            "puffmote",
            "Puffmote",
            ElementType::Normal,
            BaseStats {
                hp: 40,
                attack: 45,
                defense: 40,
                sp_attack: 40,
                sp_defense: 40,
                speed: 20,
            },
            &[("tackle", 1)],
            None,
            255,
            50,
        ),
    ];

    let abilities = vec![
        damaging_ability(
            "scratch",
            "Scratch",
            ElementType::Normal,
            AbilityCategory::Physical,
            40,
            100,
            Vec::new(),
        ),
        damaging_ability(
            "tackle",
            "Tackle",
            ElementType::Normal,
            AbilityCategory::Physical,
            40,
            100,
            Vec::new(),
        ),
        damaging_ability(
            "vine-whip",
            "Vine Whip",
            ElementType::Grass,
            AbilityCategory::Physical,
            45,
            100,
            Vec::new(),
        ),
        damaging_ability(
            "ember",
            "Ember",
            ElementType::Fire,
            AbilityCategory::Special,
            40,
            100,
            vec![SecondaryEffect {
                kind: EffectKind::InflictStatus {
                    status: StatusCondition::Burn,
                },
                target: TargetSelector::Foe,
                chance: 10,
                duration: None,
            }],
        ),
        damaging_ability(
            "slash",
            "Slash",
            ElementType::Normal,
            AbilityCategory::Physical,
            70,
            100,
            Vec::new(),
        ),
        damaging_ability(
            "wild-swing",
            "Wild Swing",
            ElementType::Normal,
            AbilityCategory::Physical,
            80,
            50,
            Vec::new(),
        ),
        damaging_ability(
            "mega-blast",
            "Mega Blast",
            ElementType::Normal,
            AbilityCategory::Physical,
            250,
            100,
            Vec::new(),
        ),
        status_ability(
            "growl",
            "Growl",
            EffectKind::StatStage {
                stat: StatName::Attack,
                delta: -1,
            },
            TargetSelector::Foe,
        ),
        status_ability(
            "harden",
            "Harden",
            EffectKind::StatStage {
                stat: StatName::Defense,
                delta: 1,
            },
            TargetSelector::User,
        ),
        status_ability(
            "recover",
            "Recover",
            EffectKind::HealPercent { percent: 50 },
            TargetSelector::User,
        ),
    ];

    let items = vec![
        ItemDefinition {
            id: "potion".to_string(),
            name: "Potion".to_string(),
            effect: ItemEffect::Heal { amount: Some(20) },
        },
        ItemDefinition {
            id: "full-restore".to_string(),
            name: "Full Restore".to_string(),
            effect: ItemEffect::Heal { amount: None },
        },
        ItemDefinition {
            id: "capture-orb".to_string(),
            name: "Capture Orb".to_string(),
            effect: ItemEffect::Capture { ball_bonus: 1.0 },
        },
        ItemDefinition {
            id: "great-orb".to_string(),
            name: "Great Orb".to_string(),
            effect: ItemEffect::Capture { ball_bonus: 1.5 },
        },
    ];

    Arc::new(Dex::new(species_list, abilities, items))
}

/// Builder for deterministic monster instances: fixed 10 IVs, zero EVs.
pub struct TestMonsterBuilder {
    species_id: String,
    level: u8,
    abilities: Option<Vec<String>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestMonsterBuilder {
    pub fn new(species_id: &str, level: u8) -> Self {
        Self {
            species_id: species_id.to_string(),
            level,
            abilities: None,
            status: None,
            current_hp: None,
        }
    }

    pub fn with_abilities(mut self, abilities: &[&str]) -> Self {
        self.abilities = Some(abilities.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self, dex: &Arc<Dex>) -> MonsterInst {
        let manager = MonsterManager::new(dex.clone());
        let mut rng = ScriptedRandom::new(Vec::new());
        let mut monster = manager
            .create(
                &self.species_id,
                self.level,
                CreateOptions {
                    ivs: Some([10; 6]),
                    evs: None,
                    abilities: self.abilities,
                },
                &mut rng,
            )
            .expect("fixture species exists");

        if let Some(status) = self.status {
            monster.apply_status(status);
        }
        if let Some(hp) = self.current_hp {
            monster.current_hp = hp.min(monster.max_hp());
        }
        monster
    }
}

/// Damage amounts from `DamageDealt` events, in order.
pub fn damage_amounts(events: &[crate::battle::events::BattleEvent]) -> Vec<u16> {
    events
        .iter()
        .filter_map(|event| match event {
            crate::battle::events::BattleEvent::DamageDealt { amount, .. } => Some(*amount),
            _ => None,
        })
        .collect()
}

/// Engine over the fixture dex replaying a fixed outcome script.
pub fn scripted_engine(dex: &Arc<Dex>, script: Vec<u32>) -> BattleEngine {
    BattleEngine::new(
        dex.clone(),
        TypeChart::standard(),
        Box::new(ScriptedRandom::new(script)),
    )
}
