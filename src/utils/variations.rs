//! Curated given-name variations (nickname ↔ full name).
//!
//! The catalog is static data: it is built once, on first use, and never
//! mutated afterwards, so it can be shared freely between threads.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Full name → known nicknames.
const NAME_VARIATIONS: &[(&str, &[&str])] = &[
    ("jonathan", &["john", "jon", "johnny"]),
    ("michael", &["mike", "mick", "mickey"]),
    ("william", &["will", "bill", "billy", "liam"]),
    ("robert", &["rob", "bob", "bobby", "robbie"]),
    ("richard", &["rick", "dick", "richie"]),
    ("elizabeth", &["liz", "beth", "betty", "eliza"]),
    ("jennifer", &["jen", "jenny", "jenn"]),
    ("christopher", &["chris", "kit"]),
    ("matthew", &["matt", "matty"]),
    ("anthony", &["tony", "ant"]),
    ("benjamin", &["ben", "benny"]),
    ("alexander", &["alex", "al", "sandy", "xander"]),
    ("nicholas", &["nick", "nicky"]),
    ("catherine", &["kate", "cathy", "cat"]),
    ("margaret", &["mag", "maggie", "peggy"]),
    ("patricia", &["pat", "patty", "trish"]),
    ("stephanie", &["steph", "steffi"]),
    ("samantha", &["sam", "sammy"]),
    ("amanda", &["mandy", "amy"]),
    ("barbara", &["barb", "bobbie"]),
    ("deborah", &["deb", "debbie"]),
    ("rebecca", &["becca", "becky"]),
    ("jacqueline", &["jackie", "jack"]),
    ("kimberly", &["kim", "kimmy"]),
    ("michelle", &["shelly", "mitch"]),
    ("lawrence", &["larry", "lance", "lars"]),
    ("charles", &["charlie", "chuck", "char"]),
    ("thomas", &["tom", "tommy", "thom"]),
    ("andrew", &["andy", "drew"]),
    ("joshua", &["josh"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave", "davey"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("joseph", &["joe", "joey"]),
    ("edward", &["ed", "eddie", "ted"]),
    ("donald", &["don", "donny"]),
    ("kenneth", &["ken", "kenny"]),
    ("paul", &["paulie"]),
    ("mark", &["marky"]),
    ("steven", &["steve", "stevie"]),
    ("kevin", &["kev"]),
    ("brian", &["bri"]),
    ("george", &["geo", "georgie"]),
    ("harold", &["harry", "hal"]),
    ("ronald", &["ron", "ronny"]),
    ("timothy", &["tim", "timmy"]),
    ("jason", &["jase"]),
    ("jeffrey", &["jeff", "jeffery"]),
    ("ryan", &["ry"]),
    ("jacob", &["jake", "coby"]),
    ("gary", &["gar"]),
    ("frank", &["frankie"]),
    ("scott", &["scotty"]),
    ("eric", &["rick"]),
    ("gregory", &["greg", "gregg"]),
    ("raymond", &["ray"]),
    ("samuel", &["sam", "sammy"]),
    ("patrick", &["pat", "paddy"]),
    ("jack", &["jackie"]),
    ("dennis", &["denny"]),
    ("jerry", &["gerald"]),
    ("tyler", &["ty"]),
    ("aaron", &["ron"]),
    ("jose", &["joey"]),
    ("henry", &["hank", "harry"]),
    ("adam", &["ad"]),
    ("douglas", &["doug", "dougie"]),
    ("nathan", &["nate", "natty"]),
    ("peter", &["pete", "petey"]),
    ("zachary", &["zach", "zack"]),
    ("kyle", &["ky"]),
    ("noah", &["no"]),
    ("alan", &["al"]),
    ("ralph", &["ralphie", "rafe"]),
    ("wayne", &["way", "dwayne"]),
    ("arthur", &["art", "artie", "archie"]),
    ("sean", &["shawn"]),
    ("christian", &["chris"]),
    ("roger", &["rog"]),
    ("louis", &["lou", "louie", "lewis"]),
    ("walter", &["walt", "wally"]),
    ("carl", &["charlie"]),
    ("willie", &["will"]),
    ("jordan", &["jordy"]),
    ("jesse", &["jess"]),
    ("bryan", &["bry"]),
    ("eugene", &["gene"]),
    ("bobby", &["robert"]),
    ("russell", &["russ", "rusty"]),
    ("phillip", &["phil", "flip"]),
    ("johnny", &["john"]),
];

/// Minimum token length for substring and prefix similarity.
const MIN_FRAGMENT_LEN: usize = 3;

static CATALOG: Lazy<VariationCatalog> = Lazy::new(|| VariationCatalog::from_entries(NAME_VARIATIONS));

/// How two given-name tokens relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationKind {
    Identical,
    KnownNickname,
    KnownFullName,
    SubstringExtension,
    SubstringContraction,
    PrefixVariation,
    Unrelated,
}

impl fmt::Display for VariationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VariationKind::Identical => "identical",
            VariationKind::KnownNickname => "known nickname",
            VariationKind::KnownFullName => "known full name",
            VariationKind::SubstringExtension => "substring extension",
            VariationKind::SubstringContraction => "substring contraction",
            VariationKind::PrefixVariation => "prefix variation",
            VariationKind::Unrelated => "unrelated",
        };
        f.write_str(label)
    }
}

/// Bidirectional nickname table.
#[derive(Debug, Clone, Default)]
pub struct VariationCatalog {
    full_to_nicknames: HashMap<String, BTreeSet<String>>,
    nickname_to_full: HashMap<String, BTreeSet<String>>,
}

impl VariationCatalog {
    /// The process-wide curated catalog.
    pub fn global() -> &'static VariationCatalog {
        &CATALOG
    }

    /// Build a catalog from `(full_name, nicknames)` rows.
    ///
    /// Repeated full names are merged. Entries are lowercased.
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let mut catalog = Self::default();

        for (full_name, nicknames) in entries {
            let full_name = full_name.to_lowercase();
            for nickname in nicknames.iter() {
                let nickname = nickname.to_lowercase();
                catalog
                    .full_to_nicknames
                    .entry(full_name.clone())
                    .or_default()
                    .insert(nickname.clone());
                catalog
                    .nickname_to_full
                    .entry(nickname)
                    .or_default()
                    .insert(full_name.clone());
            }
        }

        catalog
    }

    /// Number of full-name entries.
    pub fn len(&self) -> usize {
        self.full_to_nicknames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full_to_nicknames.is_empty()
    }

    /// Nicknames registered for `full_name`, in alphabetical order.
    pub fn nicknames_of(&self, full_name: &str) -> Vec<&str> {
        self.full_to_nicknames
            .get(full_name)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Full names that `nickname` is registered under, in alphabetical order.
    pub fn full_names_of(&self, nickname: &str) -> Vec<&str> {
        self.nickname_to_full
            .get(nickname)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn has_nickname(&self, full_name: &str, nickname: &str) -> bool {
        self.full_to_nicknames
            .get(full_name)
            .is_some_and(|set| set.contains(nickname))
    }

    fn has_full_name(&self, nickname: &str, full_name: &str) -> bool {
        self.nickname_to_full
            .get(nickname)
            .is_some_and(|set| set.contains(full_name))
    }

    /// Whether `a` and `b` are registered variants of each other, in either direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use readymatch::utils::VariationCatalog;
    ///
    /// let catalog = VariationCatalog::global();
    /// assert!(catalog.is_known_variation("anthony", "tony"));
    /// assert!(catalog.is_known_variation("tony", "anthony"));
    /// assert!(!catalog.is_known_variation("tony", "tonya"));
    /// ```
    pub fn is_known_variation(&self, a: &str, b: &str) -> bool {
        self.has_nickname(a, b)
            || self.has_nickname(b, a)
            || self.has_full_name(a, b)
            || self.has_full_name(b, a)
    }

    /// Graduated similarity between two normalized tokens.
    ///
    /// | score | condition |
    /// |-------|-----------|
    /// | 1.0 | identical |
    /// | 0.9 | registered nickname / full name of each other |
    /// | 0.8 | both at least 3 chars, one contains the other |
    /// | 0.7 | both at least 3 chars, common prefix of at least 3 |
    /// | 0.0 | otherwise |
    ///
    /// # Examples
    ///
    /// ```
    /// use readymatch::utils::VariationCatalog;
    ///
    /// let catalog = VariationCatalog::global();
    /// assert_eq!(catalog.variation_confidence("john", "john"), 1.0);
    /// assert_eq!(catalog.variation_confidence("john", "jonathan"), 0.9);
    /// assert_eq!(catalog.variation_confidence("ann", "joanne"), 0.8);
    /// assert_eq!(catalog.variation_confidence("marcus", "marco"), 0.7);
    /// assert_eq!(catalog.variation_confidence("john", "mary"), 0.0);
    /// ```
    pub fn variation_confidence(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }

        if self.is_known_variation(a, b) {
            return 0.9;
        }

        if both_long_enough(a, b) {
            if a.contains(b) || b.contains(a) {
                return 0.8;
            }
            if common_prefix_len(a, b) >= MIN_FRAGMENT_LEN {
                return 0.7;
            }
        }

        0.0
    }

    /// Label the relation of `result` to `search` for reasoning text.
    pub fn variation_kind(&self, search: &str, result: &str) -> VariationKind {
        if search == result {
            VariationKind::Identical
        } else if self.has_nickname(search, result) || self.has_full_name(result, search) {
            VariationKind::KnownNickname
        } else if self.has_nickname(result, search) || self.has_full_name(search, result) {
            VariationKind::KnownFullName
        } else if both_long_enough(search, result) && result.contains(search) {
            VariationKind::SubstringExtension
        } else if both_long_enough(search, result) && search.contains(result) {
            VariationKind::SubstringContraction
        } else if both_long_enough(search, result)
            && common_prefix_len(search, result) >= MIN_FRAGMENT_LEN
        {
            VariationKind::PrefixVariation
        } else {
            VariationKind::Unrelated
        }
    }
}

/// Shorthand for [`VariationCatalog::variation_confidence`] on the global catalog.
pub fn variation_confidence(a: &str, b: &str) -> f64 {
    VariationCatalog::global().variation_confidence(a, b)
}

/// Shorthand for [`VariationCatalog::is_known_variation`] on the global catalog.
pub fn is_known_variation(a: &str, b: &str) -> bool {
    VariationCatalog::global().is_known_variation(a, b)
}

fn both_long_enough(a: &str, b: &str) -> bool {
    a.chars().count() >= MIN_FRAGMENT_LEN && b.chars().count() >= MIN_FRAGMENT_LEN
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
