use std::collections::HashMap;
use std::sync::OnceLock;

/// AFINN-style affect entries bundled with the service. Valences range from
/// -5 (strongly negative) to +5 (strongly positive). The journaling domain
/// skews the selection toward mood and wellbeing vocabulary.
const AFFECT_ENTRIES: &[(&str, i32)] = &[
    ("abandoned", -2),
    ("abuse", -3),
    ("accept", 1),
    ("accomplish", 2),
    ("accomplished", 2),
    ("ache", -2),
    ("afraid", -2),
    ("aggressive", -2),
    ("agony", -3),
    ("alive", 1),
    ("alone", -2),
    ("amazing", 4),
    ("anger", -3),
    ("angry", -3),
    ("anguish", -3),
    ("anxiety", -2),
    ("anxious", -2),
    ("appreciate", 2),
    ("appreciated", 2),
    ("ashamed", -2),
    ("awful", -3),
    ("awesome", 4),
    ("bad", -3),
    ("beautiful", 3),
    ("better", 2),
    ("bitter", -2),
    ("blame", -2),
    ("bless", 2),
    ("blessed", 3),
    ("bored", -2),
    ("brave", 2),
    ("breathe", 1),
    ("bright", 1),
    ("broken", -1),
    ("burden", -2),
    ("calm", 2),
    ("care", 2),
    ("cared", 2),
    ("cheerful", 3),
    ("comfort", 2),
    ("comfortable", 2),
    ("confident", 2),
    ("confused", -2),
    ("content", 2),
    ("cope", 1),
    ("crisis", -3),
    ("cry", -1),
    ("crying", -2),
    ("darkness", -1),
    ("dead", -3),
    ("defeated", -2),
    ("depressed", -2),
    ("depression", -2),
    ("despair", -3),
    ("desperate", -3),
    ("devastated", -2),
    ("difficult", -1),
    ("disappointed", -2),
    ("distress", -2),
    ("doubt", -1),
    ("drained", -2),
    ("dread", -2),
    ("dying", -2),
    ("easy", 1),
    ("empty", -1),
    ("encouraged", 2),
    ("energized", 2),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("excited", 3),
    ("exhausted", -2),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fear", -2),
    ("fine", 2),
    ("forgive", 1),
    ("free", 1),
    ("fresh", 1),
    ("friendly", 2),
    ("frightened", -2),
    ("frustrated", -2),
    ("fun", 4),
    ("glad", 3),
    ("gloomy", -2),
    ("good", 3),
    ("grateful", 3),
    ("great", 3),
    ("grief", -2),
    ("grow", 1),
    ("guilt", -3),
    ("guilty", -3),
    ("happy", 3),
    ("hate", -3),
    ("hated", -3),
    ("heal", 2),
    ("healing", 2),
    ("healthy", 2),
    ("heartbroken", -3),
    ("helpless", -2),
    ("hope", 2),
    ("hopeful", 2),
    ("hopeless", -2),
    ("hurt", -2),
    ("hurting", -2),
    ("improve", 2),
    ("improved", 2),
    ("inspired", 2),
    ("irritated", -2),
    ("isolated", -1),
    ("joy", 3),
    ("joyful", 3),
    ("kind", 2),
    ("laugh", 1),
    ("laughed", 1),
    ("lonely", -2),
    ("lost", -3),
    ("love", 3),
    ("loved", 3),
    ("lovely", 3),
    ("low", -1),
    ("lucky", 3),
    ("mad", -3),
    ("miserable", -3),
    ("miss", -2),
    ("motivated", 2),
    ("nervous", -2),
    ("nice", 3),
    ("numb", -1),
    ("okay", 1),
    ("optimistic", 2),
    ("overwhelmed", -2),
    ("pain", -2),
    ("painful", -2),
    ("panic", -3),
    ("peace", 2),
    ("peaceful", 2),
    ("perfect", 3),
    ("positive", 2),
    ("pressure", -1),
    ("proud", 2),
    ("regret", -2),
    ("relaxed", 2),
    ("relief", 1),
    ("relieved", 2),
    ("restless", -2),
    ("sad", -2),
    ("sadness", -2),
    ("safe", 1),
    ("scared", -2),
    ("shame", -2),
    ("sick", -2),
    ("sleep", 1),
    ("sleepless", -2),
    ("smile", 2),
    ("sorrow", -2),
    ("sorry", -1),
    ("strength", 2),
    ("stress", -1),
    ("stressed", -2),
    ("strong", 2),
    ("struggle", -2),
    ("struggling", -2),
    ("stuck", -2),
    ("suffer", -2),
    ("suffering", -2),
    ("supported", 2),
    ("terrible", -3),
    ("thankful", 2),
    ("tired", -2),
    ("trapped", -2),
    ("trust", 1),
    ("ugly", -3),
    ("unhappy", -2),
    ("upset", -2),
    ("useless", -2),
    ("warm", 1),
    ("weak", -2),
    ("welcome", 2),
    ("well", 2),
    ("wonderful", 4),
    ("worn", -1),
    ("worried", -3),
    ("worry", -3),
    ("worse", -3),
    ("worthless", -2),
    ("wrong", -2),
];

/// Word-valence table backing the classifier. The table is plain data so a
/// deployment can swap in a different affect lexicon without touching the
/// threshold logic.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, i32>,
}

impl Lexicon {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            valences: entries
                .into_iter()
                .map(|(word, valence)| (word.into(), valence))
                .collect(),
        }
    }

    /// Bundled affect table used when no custom lexicon is supplied.
    pub fn bundled() -> &'static Lexicon {
        static BUNDLED: OnceLock<Lexicon> = OnceLock::new();
        BUNDLED.get_or_init(|| Lexicon::from_entries(AFFECT_ENTRIES.iter().copied()))
    }

    pub fn valence(&self, word: &str) -> Option<i32> {
        self.valences.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_lexicon_is_populated() {
        let lexicon = Lexicon::bundled();
        assert!(lexicon.len() > 100);
        assert_eq!(lexicon.valence("good"), Some(3));
        assert_eq!(lexicon.valence("bad"), Some(-3));
        assert_eq!(lexicon.valence("zebra"), None);
    }

    #[test]
    fn custom_entries_replace_bundled_values() {
        let lexicon = Lexicon::from_entries([("serene", 3), ("frazzled", -2)]);
        assert_eq!(lexicon.valence("serene"), Some(3));
        assert_eq!(lexicon.valence("good"), None);
    }
}
