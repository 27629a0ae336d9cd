//! Type-effectiveness lookup.
//!
//! The chart stores only non-neutral matchups; any pair it does not know
//! about is neutral (1.0). The lookup therefore never fails, even for types
//! added after the chart was built.

use std::collections::HashMap;

use crate::species::ElementType;

use ElementType::*;

/// Static mapping from (attacking type, defending type) to a damage
/// multiplier in {0.0, 0.5, 1.0, 2.0}.
#[derive(Debug, Clone, Default)]
pub struct TypeChart {
    multipliers: HashMap<(ElementType, ElementType), f64>,
}

impl TypeChart {
    /// A chart with no entries: every matchup is neutral.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (ElementType, ElementType, f64)>,
    ) -> Self {
        Self {
            multipliers: entries
                .into_iter()
                .map(|(attack, defend, multiplier)| ((attack, defend), multiplier))
                .collect(),
        }
    }

    /// Damage multiplier for an attack of `attack` type against a defender of
    /// `defend` type. Unknown pairs are neutral.
    pub fn multiplier(&self, attack: ElementType, defend: ElementType) -> f64 {
        self.multipliers
            .get(&(attack, defend))
            .copied()
            .unwrap_or(1.0)
    }

    /// The classic 15-type chart.
    pub fn standard() -> Self {
        Self::from_entries([
            (Normal, Rock, 0.5),
            (Normal, Ghost, 0.0),
            (Fire, Fire, 0.5),
            (Fire, Water, 0.5),
            (Fire, Grass, 2.0),
            (Fire, Ice, 2.0),
            (Fire, Bug, 2.0),
            (Fire, Rock, 0.5),
            (Fire, Dragon, 0.5),
            (Water, Fire, 2.0),
            (Water, Water, 0.5),
            (Water, Grass, 0.5),
            (Water, Ground, 2.0),
            (Water, Rock, 2.0),
            (Water, Dragon, 0.5),
            (Grass, Fire, 0.5),
            (Grass, Water, 2.0),
            (Grass, Grass, 0.5),
            (Grass, Poison, 0.5),
            (Grass, Ground, 2.0),
            (Grass, Flying, 0.5),
            (Grass, Bug, 0.5),
            (Grass, Rock, 2.0),
            (Grass, Dragon, 0.5),
            (Electric, Water, 2.0),
            (Electric, Grass, 0.5),
            (Electric, Electric, 0.5),
            (Electric, Ground, 0.0),
            (Electric, Flying, 2.0),
            (Electric, Dragon, 0.5),
            (Ice, Water, 0.5),
            (Ice, Grass, 2.0),
            (Ice, Ice, 0.5),
            (Ice, Ground, 2.0),
            (Ice, Flying, 2.0),
            (Ice, Dragon, 2.0),
            (Fighting, Normal, 2.0),
            (Fighting, Ice, 2.0),
            (Fighting, Poison, 0.5),
            (Fighting, Flying, 0.5),
            (Fighting, Psychic, 0.5),
            (Fighting, Bug, 0.5),
            (Fighting, Rock, 2.0),
            (Fighting, Ghost, 0.0),
            (Poison, Grass, 2.0),
            (Poison, Poison, 0.5),
            (Poison, Ground, 0.5),
            (Poison, Bug, 2.0),
            (Poison, Rock, 0.5),
            (Poison, Ghost, 0.5),
            (Ground, Fire, 2.0),
            (Ground, Grass, 0.5),
            (Ground, Electric, 2.0),
            (Ground, Poison, 2.0),
            (Ground, Flying, 0.0),
            (Ground, Bug, 0.5),
            (Ground, Rock, 2.0),
            (Flying, Grass, 2.0),
            (Flying, Electric, 0.5),
            (Flying, Fighting, 2.0),
            (Flying, Bug, 2.0),
            (Flying, Rock, 0.5),
            (Psychic, Fighting, 2.0),
            (Psychic, Poison, 2.0),
            (Psychic, Psychic, 0.5),
            (Bug, Fire, 0.5),
            (Bug, Grass, 2.0),
            (Bug, Fighting, 0.5),
            (Bug, Poison, 2.0),
            (Bug, Flying, 0.5),
            (Bug, Psychic, 2.0),
            (Bug, Ghost, 0.5),
            (Rock, Fire, 2.0),
            (Rock, Ice, 2.0),
            (Rock, Fighting, 0.5),
            (Rock, Ground, 0.5),
            (Rock, Flying, 2.0),
            (Rock, Bug, 2.0),
            (Ghost, Normal, 0.0),
            (Ghost, Psychic, 0.0),
            (Ghost, Ghost, 2.0),
            (Dragon, Dragon, 2.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_matchups_resolve() {
        let chart = TypeChart::standard();
        assert_eq!(chart.multiplier(Fire, Grass), 2.0);
        assert_eq!(chart.multiplier(Water, Fire), 2.0);
        assert_eq!(chart.multiplier(Fire, Water), 0.5);
        assert_eq!(chart.multiplier(Normal, Ghost), 0.0);
        assert_eq!(chart.multiplier(Electric, Ground), 0.0);
    }

    #[test]
    fn unknown_pairs_are_neutral() {
        let chart = TypeChart::standard();
        // No entry in either direction for these pairs.
        assert_eq!(chart.multiplier(Normal, Normal), 1.0);
        assert_eq!(chart.multiplier(Dragon, Fire), 1.0);
        assert_eq!(chart.multiplier(Psychic, Water), 1.0);

        let empty = TypeChart::empty();
        assert_eq!(empty.multiplier(Fire, Grass), 1.0);
    }

    #[test]
    fn custom_charts_override_nothing_else() {
        let chart = TypeChart::from_entries([(Fire, Fire, 2.0)]);
        assert_eq!(chart.multiplier(Fire, Fire), 2.0);
        assert_eq!(chart.multiplier(Fire, Grass), 1.0);
    }
}
