//! Presence-based keyword scoring against fixed bilingual dictionaries.

use crate::pipeline::types::Category;

/// Work-related vocabulary, Portuguese then English.
pub const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "reunião",
    "projeto",
    "prazo",
    "entrega",
    "aprovação",
    "tarefa",
    "objetivo",
    "resultado",
    "meta",
    "cliente",
    "contrato",
    "proposta",
    "orçamento",
    "relatório",
    "documento",
    "importante",
    "urgente",
    "decisão",
    "ação",
    "responsabilidade",
    "meeting",
    "project",
    "deadline",
    "delivery",
    "approval",
    "task",
    "objective",
    "result",
    "goal",
    "client",
    "contract",
    "proposal",
    "budget",
    "report",
    "document",
];

/// Promotional and spam vocabulary, Portuguese then English.
pub const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    "spam",
    "promoção",
    "desconto",
    "oferta",
    "grátis",
    "ganhe",
    "prêmio",
    "sorteio",
    "clique aqui",
    "compre já",
    "newsletter",
    "propaganda",
    "anúncio",
    "marketing",
    "promotion",
    "discount",
    "offer",
    "free",
    "win",
    "prize",
    "lottery",
    "click here",
    "buy now",
    "advertisement",
];

/// A fixed set of lowercase phrases associated with one category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordDictionary {
    pub category: Category,
    pub phrases: &'static [&'static str],
}

impl KeywordDictionary {
    pub const PRODUCTIVE: Self = Self {
        category: Category::Productive,
        phrases: PRODUCTIVE_KEYWORDS,
    };

    pub const UNPRODUCTIVE: Self = Self {
        category: Category::Unproductive,
        phrases: UNPRODUCTIVE_KEYWORDS,
    };

    /// Dictionary for the given category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Productive => Self::PRODUCTIVE,
            Category::Unproductive => Self::UNPRODUCTIVE,
        }
    }

    /// Phrases occurring anywhere in `text`, in dictionary order.
    ///
    /// Each phrase is reported at most once, however often it repeats.
    pub fn matches<'a>(self, text: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.phrases
            .iter()
            .copied()
            .filter(move |phrase| text.contains(phrase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionaries_are_lowercase() {
        for phrase in PRODUCTIVE_KEYWORDS.iter().chain(UNPRODUCTIVE_KEYWORDS) {
            assert_eq!(*phrase, phrase.to_lowercase(), "{phrase} is not lowercase");
        }
    }

    #[test]
    fn dictionary_sizes() {
        assert_eq!(PRODUCTIVE_KEYWORDS.len(), 35);
        assert_eq!(UNPRODUCTIVE_KEYWORDS.len(), 24);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let text = "spam spam spam spam";
        assert_eq!(KeywordDictionary::UNPRODUCTIVE.matches(text).count(), 1);
    }

    #[test]
    fn substring_match_inside_longer_word() {
        // "metade" contains "meta"
        assert_eq!(KeywordDictionary::PRODUCTIVE.matches("metade do bolo").count(), 1);
    }

    #[test]
    fn productive_example_keywords() {
        let text = "assunto: proposta de contrato. prezado, segue em anexo o orçamento do projeto. atenciosamente.";
        let found: Vec<_> = KeywordDictionary::PRODUCTIVE.matches(text).collect();
        assert_eq!(found, vec!["projeto", "contrato", "proposta", "orçamento"]);
        assert_eq!(KeywordDictionary::PRODUCTIVE.matches(text).count(), 4);
        assert_eq!(KeywordDictionary::UNPRODUCTIVE.matches(text).count(), 0);
    }

    #[test]
    fn unproductive_example_keywords() {
        let text = "compre já!!! desconto imperdível, clique aqui e ganhe um prêmio grátis!";
        let found: Vec<_> = KeywordDictionary::UNPRODUCTIVE.matches(text).collect();
        assert_eq!(
            found,
            vec!["desconto", "grátis", "ganhe", "prêmio", "clique aqui", "compre já"]
        );
        assert_eq!(KeywordDictionary::PRODUCTIVE.matches(text).count(), 0);
    }

    #[test]
    fn english_phrases_match() {
        let text = "please send the budget report before the deadline";
        assert_eq!(KeywordDictionary::PRODUCTIVE.matches(text).count(), 3);
    }

    #[test]
    fn for_category_selects_dictionary() {
        assert_eq!(
            KeywordDictionary::for_category(Category::Unproductive).phrases.len(),
            UNPRODUCTIVE_KEYWORDS.len()
        );
    }
}
