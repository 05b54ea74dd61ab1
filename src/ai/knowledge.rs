//! Dance Knowledge Table
//!
//! Static reference data for the five supported Latin/rhythm dances.
//! Lookup normalizes names (case, `_`/`-` as spaces) so that free-form
//! titles like "Cha Cha Cha Lesson 1" resolve to `cha_cha`.

use serde::Serialize;

/// Reference data for one dance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DanceInfo {
    #[serde(skip)]
    pub key: &'static str,
    pub rhythm: &'static str,
    pub characteristics: &'static str,
    pub key_elements: &'static [&'static str],
    pub fundamental_figures: &'static [&'static str],
}

impl DanceInfo {
    /// Human-readable name ("cha_cha" -> "cha cha")
    pub fn display_name(&self) -> String {
        normalize(self.key)
    }
}

/// Knowledge table in declaration order
pub static DANCES: [DanceInfo; 5] = [
    DanceInfo {
        key: "cha_cha",
        rhythm: "4/4 time, 30-32 bars per minute",
        characteristics: "Syncopated, flirtatious, playful",
        key_elements: &["Cuban motion", "Compact steps", "Sharp timing"],
        fundamental_figures: &[
            "Basic Movement",
            "New York",
            "Spot Turn",
            "Hand to Hand",
            "Side Step",
            "Time Step",
            "Forward Walk",
            "Backward Walk",
        ],
    },
    DanceInfo {
        key: "rumba",
        rhythm: "4/4 time, 25-27 bars per minute",
        characteristics: "Romantic, slow, sensual",
        key_elements: &["Cuban motion", "Delayed weight transfer", "Body leads"],
        fundamental_figures: &[
            "Basic Movement",
            "Box",
            "Underarm Turn",
            "Progressive Walks",
            "Forward Walk",
            "Backward Walk",
        ],
    },
    DanceInfo {
        key: "swing",
        rhythm: "4/4 time, 30-46 bars per minute",
        characteristics: "Bouncy, energetic, fun",
        key_elements: &["Bounce action", "Triple steps", "Rock steps"],
        fundamental_figures: &[
            "Basic Step",
            "Underarm Turn",
            "Change of Places",
            "Link",
            "Forward Walk",
            "Backward Walk",
        ],
    },
    DanceInfo {
        key: "bolero",
        rhythm: "4/4 time, 24-26 bars per minute",
        characteristics: "Romantic, smooth, rise and fall",
        key_elements: &["Rise and fall", "Cuban motion", "Controlled movement"],
        fundamental_figures: &["Basic Movement", "Progressive Walks", "Side Step"],
    },
    DanceInfo {
        key: "mambo",
        rhythm: "4/4 time, 47-51 bars per minute",
        characteristics: "Exciting, syncopated, sharp",
        key_elements: &["Sharp movements", "Syncopation", "Strong hip action"],
        fundamental_figures: &["Basic Movement", "Break Steps", "Side Steps"],
    },
];

fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First dance whose name occurs in `title`
pub fn lookup(title: &str) -> Option<&'static DanceInfo> {
    let title = normalize(title);
    DANCES
        .iter()
        .find(|dance| title.contains(&normalize(dance.key)))
}

/// Dance whose name is exactly `name` (after normalization)
pub fn get(name: &str) -> Option<&'static DanceInfo> {
    let name = normalize(name);
    DANCES.iter().find(|dance| normalize(dance.key) == name)
}

/// Whole table rendered as a prompt context block
pub fn knowledge_base_context() -> String {
    let mut context = String::from("DanceSport Knowledge Base:\n");
    for dance in &DANCES {
        context.push_str(&format!("\n{}:\n", dance.key.to_uppercase()));
        context.push_str(&format!("  Rhythm: {}\n", dance.rhythm));
        context.push_str(&format!("  Characteristics: {}\n", dance.characteristics));
        context.push_str(&format!(
            "  Key Elements: {}\n",
            dance.key_elements.join(", ")
        ));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_lesson_title() {
        assert_eq!(lookup("Cha Cha Cha Lesson 1").unwrap().key, "cha_cha");
        assert_eq!(lookup("Open Rumba").unwrap().key, "rumba");
        assert_eq!(lookup("EAST-COAST SWING").unwrap().key, "swing");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("Tango").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_lookup_declaration_order_wins() {
        // Both names present: cha cha is declared first
        assert_eq!(lookup("rumba and cha cha").unwrap().key, "cha_cha");
    }

    #[test]
    fn test_get_is_exact() {
        assert_eq!(get("Cha Cha").unwrap().key, "cha_cha");
        assert_eq!(get("cha_cha").unwrap().key, "cha_cha");
        assert_eq!(get(" MAMBO ").unwrap().key, "mambo");
        assert!(get("Open Rumba").is_none());
    }

    #[test]
    fn test_knowledge_base_context() {
        let context = knowledge_base_context();
        assert!(context.starts_with("DanceSport Knowledge Base:\n"));
        assert!(context.contains("\nCHA_CHA:\n  Rhythm: 4/4 time, 30-32 bars per minute\n"));
        assert!(context.contains("  Key Elements: Rise and fall, Cuban motion, Controlled movement\n"));

        let cha = context.find("CHA_CHA").unwrap();
        let mambo = context.find("MAMBO").unwrap();
        assert!(cha < mambo);
    }

    #[test]
    fn test_serialized_info_omits_key() {
        let value = serde_json::to_value(get("bolero").unwrap()).unwrap();
        assert!(value.get("key").is_none());
        assert_eq!(value["fundamental_figures"].as_array().unwrap().len(), 3);
    }
}
