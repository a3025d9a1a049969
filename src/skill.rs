//! Tracked entities and their plot colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// A progress source tracked by the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skill {
    /// Melee accuracy.
    Attack,
    /// Damage avoidance.
    Defence,
    /// Melee damage.
    Strength,
    /// Health, trained through combat.
    Hitpoints,
    /// Ranged combat.
    Ranged,
    /// Prayer points and protection.
    Prayer,
    /// Spellcasting.
    Magic,
    /// Preparing food.
    Cooking,
    /// Chopping trees.
    Woodcutting,
    /// Making bows and arrows.
    Fletching,
    /// Catching fish.
    Fishing,
    /// Lighting fires.
    Firemaking,
    /// Making jewellery and armour.
    Crafting,
    /// Smelting and forging metal.
    Smithing,
    /// Extracting ore.
    Mining,
    /// Brewing potions.
    Herblore,
    /// Running courses and shortcuts.
    Agility,
    /// Pickpocketing and stalls.
    Thieving,
    /// Slayer assignments.
    Slayer,
    /// Growing crops.
    Farming,
    /// Crafting runes.
    Runecraft,
    /// Trapping creatures.
    Hunter,
    /// Building in a player-owned house.
    Construction,
    /// Sailing ships.
    Sailing,
}

impl Skill {
    /// Every skill, in display order.
    pub const ALL: [Skill; 24] = [
        Skill::Attack,
        Skill::Defence,
        Skill::Strength,
        Skill::Hitpoints,
        Skill::Ranged,
        Skill::Prayer,
        Skill::Magic,
        Skill::Cooking,
        Skill::Woodcutting,
        Skill::Fletching,
        Skill::Fishing,
        Skill::Firemaking,
        Skill::Crafting,
        Skill::Smithing,
        Skill::Mining,
        Skill::Herblore,
        Skill::Agility,
        Skill::Thieving,
        Skill::Slayer,
        Skill::Farming,
        Skill::Runecraft,
        Skill::Hunter,
        Skill::Construction,
        Skill::Sailing,
    ];

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Skill::Attack => "Attack",
            Skill::Defence => "Defence",
            Skill::Strength => "Strength",
            Skill::Hitpoints => "Hitpoints",
            Skill::Ranged => "Ranged",
            Skill::Prayer => "Prayer",
            Skill::Magic => "Magic",
            Skill::Cooking => "Cooking",
            Skill::Woodcutting => "Woodcutting",
            Skill::Fletching => "Fletching",
            Skill::Fishing => "Fishing",
            Skill::Firemaking => "Firemaking",
            Skill::Crafting => "Crafting",
            Skill::Smithing => "Smithing",
            Skill::Mining => "Mining",
            Skill::Herblore => "Herblore",
            Skill::Agility => "Agility",
            Skill::Thieving => "Thieving",
            Skill::Slayer => "Slayer",
            Skill::Farming => "Farming",
            Skill::Runecraft => "Runecraft",
            Skill::Hunter => "Hunter",
            Skill::Construction => "Construction",
            Skill::Sailing => "Sailing",
        }
    }

    /// Line color used when plotting this skill.
    pub fn color(self) -> Color {
        match self {
            Skill::Attack => Color::rgb8(145, 58, 42),
            Skill::Defence => Color::rgb8(119, 133, 196),
            Skill::Strength => Color::rgb8(57, 113, 78),
            Skill::Hitpoints => Color::rgb8(167, 57, 30),
            Skill::Ranged => Color::rgb8(93, 111, 35),
            Skill::Prayer => Color::rgb8(192, 185, 185),
            Skill::Magic => Color::rgb8(76, 77, 157),
            Skill::Cooking => Color::rgb8(109, 53, 137),
            Skill::Woodcutting => Color::rgb8(128, 110, 65),
            Skill::Fletching => Color::rgb8(65, 101, 105),
            Skill::Fishing => Color::rgb8(134, 172, 221),
            Skill::Firemaking => Color::rgb8(198, 135, 44),
            Skill::Crafting => Color::rgb8(115, 94, 71),
            Skill::Smithing => Color::rgb8(84, 84, 67),
            Skill::Mining => Color::rgb8(81, 80, 65),
            Skill::Herblore => Color::rgb8(60, 139, 22),
            Skill::Agility => Color::rgb8(68, 68, 201),
            Skill::Thieving => Color::rgb8(109, 71, 99),
            Skill::Slayer => Color::rgb8(104, 95, 95),
            Skill::Farming => Color::rgb8(57, 89, 45),
            Skill::Runecraft => Color::rgb8(178, 178, 168),
            Skill::Hunter => Color::rgb8(128, 124, 103),
            Skill::Construction => Color::rgb8(169, 159, 138),
            Skill::Sailing => Color::rgb8(0, 71, 255),
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown skill name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown skill: {0}")]
pub struct UnknownSkill(pub String);

impl FromStr for Skill {
    type Err = UnknownSkill;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSkill(s.to_string()))
    }
}
