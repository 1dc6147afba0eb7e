//! Static recipe and level data.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum ResourceKind {
    Wood,
    Metal,
    Fabric,
}

impl ResourceKind {
    pub(crate) const ALL: [ResourceKind; 3] = [Self::Wood, Self::Metal, Self::Fabric];

    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Metal => "metal",
            Self::Fabric => "fabric",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum ToyKind {
    Train,
    ChristmasTree,
    Gingerbread,
    Teddy,
    Nutcracker,
}

impl ToyKind {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::ChristmasTree => "christmas-tree",
            Self::Gingerbread => "gingerbread",
            Self::Teddy => "teddy",
            Self::Nutcracker => "nutcracker",
        }
    }
}

impl fmt::Display for ToyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Recipe {
    pub(crate) toy: ToyKind,
    pub(crate) ingredients: &'static [(ResourceKind, u32)],
}

impl Recipe {
    pub(crate) fn total_units(&self) -> u32 {
        self.ingredients.iter().map(|(_, qty)| qty).sum()
    }
}

static RECIPES: [Recipe; 5] = [
    Recipe {
        toy: ToyKind::Train,
        ingredients: &[(ResourceKind::Wood, 2), (ResourceKind::Metal, 2)],
    },
    Recipe {
        toy: ToyKind::ChristmasTree,
        ingredients: &[(ResourceKind::Wood, 3), (ResourceKind::Fabric, 1)],
    },
    Recipe {
        toy: ToyKind::Gingerbread,
        ingredients: &[(ResourceKind::Wood, 1), (ResourceKind::Fabric, 1)],
    },
    Recipe {
        toy: ToyKind::Teddy,
        ingredients: &[(ResourceKind::Wood, 1), (ResourceKind::Fabric, 3)],
    },
    Recipe {
        toy: ToyKind::Nutcracker,
        ingredients: &[
            (ResourceKind::Wood, 2),
            (ResourceKind::Metal, 2),
            (ResourceKind::Fabric, 1),
        ],
    },
];

pub(crate) fn recipe_for(toy: ToyKind) -> &'static Recipe {
    match toy {
        ToyKind::Train => &RECIPES[0],
        ToyKind::ChristmasTree => &RECIPES[1],
        ToyKind::Gingerbread => &RECIPES[2],
        ToyKind::Teddy => &RECIPES[3],
        ToyKind::Nutcracker => &RECIPES[4],
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct LevelDef {
    pub(crate) required_deliveries: u32,
    /// Seconds added to the remaining time when the level starts.
    pub(crate) time_allotment_seconds: u32,
    pub(crate) unlocked_toys: &'static [ToyKind],
}

static LEVELS: [LevelDef; 5] = [
    LevelDef {
        required_deliveries: 3,
        time_allotment_seconds: 180,
        unlocked_toys: &[ToyKind::Train],
    },
    LevelDef {
        required_deliveries: 4,
        time_allotment_seconds: 150,
        unlocked_toys: &[ToyKind::Train, ToyKind::ChristmasTree],
    },
    LevelDef {
        required_deliveries: 5,
        time_allotment_seconds: 150,
        unlocked_toys: &[
            ToyKind::Train,
            ToyKind::ChristmasTree,
            ToyKind::Gingerbread,
        ],
    },
    LevelDef {
        required_deliveries: 6,
        time_allotment_seconds: 180,
        unlocked_toys: &[
            ToyKind::Train,
            ToyKind::ChristmasTree,
            ToyKind::Gingerbread,
            ToyKind::Teddy,
        ],
    },
    LevelDef {
        required_deliveries: 7,
        time_allotment_seconds: 180,
        unlocked_toys: &[
            ToyKind::Train,
            ToyKind::ChristmasTree,
            ToyKind::Gingerbread,
            ToyKind::Teddy,
            ToyKind::Nutcracker,
        ],
    },
];

pub(crate) fn level_count() -> u32 {
    LEVELS.len() as u32
}

pub(crate) fn first_level() -> &'static LevelDef {
    &LEVELS[0]
}

/// `level` is 1-based.
pub(crate) fn level_def(level: u32) -> Option<&'static LevelDef> {
    let index = level.checked_sub(1)? as usize;
    LEVELS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_toy_resolves_to_its_own_recipe() {
        for recipe in &RECIPES {
            assert_eq!(recipe_for(recipe.toy).toy, recipe.toy);
        }
    }

    #[test]
    fn train_recipe_needs_two_wood_two_metal() {
        let recipe = recipe_for(ToyKind::Train);
        assert_eq!(
            recipe.ingredients,
            &[(ResourceKind::Wood, 2), (ResourceKind::Metal, 2)]
        );
        assert_eq!(recipe.total_units(), 4);
    }

    #[test]
    fn levels_are_one_based_and_bounded() {
        assert!(level_def(0).is_none());
        assert_eq!(level_def(1), Some(first_level()));
        assert_eq!(level_def(1).expect("level 1").required_deliveries, 3);
        assert_eq!(level_def(level_count()).expect("last").required_deliveries, 7);
        assert!(level_def(level_count() + 1).is_none());
    }

    #[test]
    fn each_level_unlocks_a_superset_of_the_previous() {
        for level in 2..=level_count() {
            let previous = level_def(level - 1).expect("previous");
            let current = level_def(level).expect("current");
            for toy in previous.unlocked_toys {
                assert!(current.unlocked_toys.contains(toy), "level {level} lost {toy}");
            }
        }
    }

    #[test]
    fn tokens_match_display() {
        assert_eq!(ToyKind::ChristmasTree.to_string(), "christmas-tree");
        assert_eq!(ResourceKind::Fabric.to_string(), "fabric");
    }
}
