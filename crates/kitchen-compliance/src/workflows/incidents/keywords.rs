use super::domain::IncidentCategory;

/// Norwegian and Arabic stems that place a description in one category.
#[derive(Debug)]
pub struct KeywordFamily {
    pub category: IncidentCategory,
    pub keywords: &'static [&'static str],
}

/// Arabic definite article, alone or behind a conjunction or preposition.
const ARABIC_ARTICLES: &[&str] = &["وال", "بال", "ال"];

impl KeywordFamily {
    /// True when a word of the already lower-cased text starts with one of the
    /// stems. Stems never match inside a word, so `vask` misses `oppvaskmaskin`.
    pub fn matches(&self, lowered: &str) -> bool {
        words(lowered).any(|word| self.matches_word(word))
    }

    fn matches_word(&self, word: &str) -> bool {
        let bare = ARABIC_ARTICLES
            .iter()
            .find_map(|article| word.strip_prefix(article))
            .filter(|rest| !rest.is_empty());

        self.keywords.iter().any(|keyword| {
            word.starts_with(keyword) || bare.is_some_and(|rest| rest.starts_with(keyword))
        })
    }
}

fn words(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Tested in order; the first family with a hit wins.
pub const KEYWORD_FAMILIES: &[KeywordFamily] = &[
    KeywordFamily {
        category: IncidentCategory::Temperature,
        keywords: &[
            "temperatur",
            "kjøleskap",
            "kjølerom",
            "kjøl",
            "fryser",
            "frys",
            "grader",
            "varmeskap",
            "nedkjøling",
            "حرارة",
            "درجة",
            "ثلاجة",
            "مجمد",
            "فريزر",
            "تبريد",
            "تجميد",
        ],
    },
    KeywordFamily {
        category: IncidentCategory::Food,
        keywords: &[
            "mat",
            "råvare",
            "kjøtt",
            "fisk",
            "kylling",
            "holdbarhet",
            "utløpt",
            "allergen",
            "ingrediens",
            "muggen",
            "طعام",
            "أكل",
            "لحم",
            "سمك",
            "دجاج",
            "مكونات",
            "منتهي",
        ],
    },
    KeywordFamily {
        category: IncidentCategory::Hygiene,
        keywords: &[
            "hygiene",
            "renhold",
            "rengjøring",
            "vask",
            "skitten",
            "skittent",
            "bakterie",
            "skadedyr",
            "mus",
            "rotte",
            "نظافة",
            "تنظيف",
            "غسيل",
            "متسخ",
            "بكتيريا",
            "حشرات",
            "فئران",
        ],
    },
    KeywordFamily {
        category: IncidentCategory::Equipment,
        keywords: &[
            "utstyr",
            "oppvask",
            "maskin",
            "ovn",
            "komfyr",
            "defekt",
            "ødelagt",
            "reparasjon",
            "lekker",
            "معدات",
            "جهاز",
            "آلة",
            "فرن",
            "عطل",
            "مكسور",
        ],
    },
    KeywordFamily {
        category: IncidentCategory::Safety,
        keywords: &[
            "brann",
            "skade",
            "kutt",
            "falt",
            "sklei",
            "sikkerhet",
            "ulykke",
            "brannslukker",
            "røyk",
            "حريق",
            "إصابة",
            "جرح",
            "سقوط",
            "سلامة",
            "حادث",
            "دخان",
        ],
    },
];

/// Category of the first family with a word starting with one of its stems in
/// `description`. The title is not consulted.
pub fn match_category(description: &str) -> IncidentCategory {
    let lowered = description.to_lowercase();
    KEYWORD_FAMILIES
        .iter()
        .find(|family| family.matches(&lowered))
        .map(|family| family.category)
        .unwrap_or(IncidentCategory::General)
}
