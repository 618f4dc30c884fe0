//! The category catalog — the fixed, ordered set of tracked progress
//! dimensions.
//!
//! Every other part of the engine consults the catalog to know whether a
//! category accumulates experience (skills) or counts discrete completions
//! (bosses, activities, clue tiers). The catalog is defined once and never
//! mutated; declaration order is display order.

use serde::{Deserialize, Serialize};

/// How a category's value grows over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
  /// A monotonically-increasing experience counter (skills and the overall
  /// aggregate).
  Accumulating,
  /// A monotonically-increasing completion count (kills, clears, points).
  Count,
}

macro_rules! catalog {
  ($($variant:ident => $key:literal, $kind:ident;)+) => {
    /// A tracked progress dimension. Declaration order is catalog order.
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
      Serialize, Deserialize,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum Category {
      $($variant,)+
    }

    impl Category {
      /// The full catalog, in order.
      pub const ALL: &'static [Category] = &[$(Category::$variant,)+];

      /// Stable identifier used in the persistence wire format.
      pub fn key(self) -> &'static str {
        match self {
          $(Category::$variant => $key,)+
        }
      }

      pub fn kind(self) -> CategoryKind {
        match self {
          $(Category::$variant => CategoryKind::$kind,)+
        }
      }

      pub fn from_key(key: &str) -> Option<Category> {
        match key {
          $($key => Some(Category::$variant),)+
          _ => None,
        }
      }
    }
  };
}

catalog! {
  Overall => "overall", Accumulating;

  Attack => "attack", Accumulating;
  Defence => "defence", Accumulating;
  Strength => "strength", Accumulating;
  Hitpoints => "hitpoints", Accumulating;
  Ranged => "ranged", Accumulating;
  Prayer => "prayer", Accumulating;
  Magic => "magic", Accumulating;
  Cooking => "cooking", Accumulating;
  Woodcutting => "woodcutting", Accumulating;
  Fletching => "fletching", Accumulating;
  Fishing => "fishing", Accumulating;
  Firemaking => "firemaking", Accumulating;
  Crafting => "crafting", Accumulating;
  Smithing => "smithing", Accumulating;
  Mining => "mining", Accumulating;
  Herblore => "herblore", Accumulating;
  Agility => "agility", Accumulating;
  Thieving => "thieving", Accumulating;
  Slayer => "slayer", Accumulating;
  Farming => "farming", Accumulating;
  Runecraft => "runecraft", Accumulating;
  Hunter => "hunter", Accumulating;
  Construction => "construction", Accumulating;

  LeaguePoints => "league_points", Count;
  BountyHunterHunter => "bounty_hunter_hunter", Count;
  BountyHunterRogue => "bounty_hunter_rogue", Count;
  ClueScrollAll => "clue_scroll_all", Count;
  ClueScrollBeginner => "clue_scroll_beginner", Count;
  ClueScrollEasy => "clue_scroll_easy", Count;
  ClueScrollMedium => "clue_scroll_medium", Count;
  ClueScrollHard => "clue_scroll_hard", Count;
  ClueScrollElite => "clue_scroll_elite", Count;
  ClueScrollMaster => "clue_scroll_master", Count;
  LastManStanding => "last_man_standing", Count;
  SoulWarsZeal => "soul_wars_zeal", Count;
  RiftsClosed => "rifts_closed", Count;

  AbyssalSire => "abyssal_sire", Count;
  AlchemicalHydra => "alchemical_hydra", Count;
  BarrowsChests => "barrows_chests", Count;
  Bryophyta => "bryophyta", Count;
  Callisto => "callisto", Count;
  Cerberus => "cerberus", Count;
  ChambersOfXeric => "chambers_of_xeric", Count;
  ChambersOfXericChallengeMode => "chambers_of_xeric_challenge_mode", Count;
  ChaosElemental => "chaos_elemental", Count;
  ChaosFanatic => "chaos_fanatic", Count;
  CommanderZilyana => "commander_zilyana", Count;
  CorporealBeast => "corporeal_beast", Count;
  CrazyArchaeologist => "crazy_archaeologist", Count;
  DagannothPrime => "dagannoth_prime", Count;
  DagannothRex => "dagannoth_rex", Count;
  DagannothSupreme => "dagannoth_supreme", Count;
  DerangedArchaeologist => "deranged_archaeologist", Count;
  GeneralGraardor => "general_graardor", Count;
  GiantMole => "giant_mole", Count;
  GrotesqueGuardians => "grotesque_guardians", Count;
  Hespori => "hespori", Count;
  KalphiteQueen => "kalphite_queen", Count;
  KingBlackDragon => "king_black_dragon", Count;
  Kraken => "kraken", Count;
  Kreearra => "kreearra", Count;
  KrilTsutsaroth => "kril_tsutsaroth", Count;
  Mimic => "mimic", Count;
  Nex => "nex", Count;
  Nightmare => "nightmare", Count;
  PhosanisNightmare => "phosanis_nightmare", Count;
  Obor => "obor", Count;
  Sarachnis => "sarachnis", Count;
  Scorpia => "scorpia", Count;
  Skotizo => "skotizo", Count;
  Tempoross => "tempoross", Count;
  TheGauntlet => "the_gauntlet", Count;
  TheCorruptedGauntlet => "the_corrupted_gauntlet", Count;
  TheatreOfBlood => "theatre_of_blood", Count;
  TheatreOfBloodHardMode => "theatre_of_blood_hard_mode", Count;
  ThermonuclearSmokeDevil => "thermonuclear_smoke_devil", Count;
  TzkalZuk => "tzkal_zuk", Count;
  TztokJad => "tztok_jad", Count;
  Venenatis => "venenatis", Count;
  Vetion => "vetion", Count;
  Vorkath => "vorkath", Count;
  Wintertodt => "wintertodt", Count;
  Zalcano => "zalcano", Count;
  Zulrah => "zulrah", Count;
}

impl Category {
  /// The lowerCamel field name this category had in the legacy flat
  /// persistence format. A handful of categories were renamed between the
  /// field-per-category era and the keyed-map era; those exceptions are
  /// listed explicitly so the mapping stays statically checked.
  pub fn legacy_key(self) -> String {
    match self {
      Category::TheGauntlet => "gauntlet".to_owned(),
      Category::TheCorruptedGauntlet => "corruptedGauntlet".to_owned(),
      Category::TzkalZuk => "tzKalZuk".to_owned(),
      Category::TztokJad => "tzTokJad".to_owned(),
      other => lower_camel(other.key()),
    }
  }

  pub fn from_legacy_key(key: &str) -> Option<Category> {
    Category::ALL.iter().copied().find(|c| c.legacy_key() == key)
  }
}

fn lower_camel(snake: &str) -> String {
  let mut out = String::with_capacity(snake.len());
  let mut upper_next = false;
  for ch in snake.chars() {
    if ch == '_' {
      upper_next = true;
    } else if upper_next {
      out.extend(ch.to_uppercase());
      upper_next = false;
    } else {
      out.push(ch);
    }
  }
  out
}
