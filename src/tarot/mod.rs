//! Tarot card reference data.
//!
//! The deck is immutable once loaded. It either comes from the hosted store
//! (see [`store`]) or from the built-in major arcana below, which is also the
//! fallback whenever the store is unavailable.

pub mod store;

pub use store::{load_deck, CardStore};

use serde::{Deserialize, Serialize};

/// One tarot card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarotCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub image_url: String,
}

/// A loaded deck with lookup by card id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<TarotCard>,
}

impl Deck {
    pub fn new(cards: Vec<TarotCard>) -> Self {
        Self { cards }
    }

    /// The built-in Rider-Waite major arcana subset.
    pub fn builtin() -> Self {
        Self::new(builtin_cards())
    }

    pub fn cards(&self) -> &[TarotCard] {
        &self.cards
    }

    pub fn find(&self, id: &str) -> Option<&TarotCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn card(id: &str, name: &str, keywords: [&str; 3], meaning: &str, image_url: &str) -> TarotCard {
    TarotCard {
        id: id.to_string(),
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        meaning: meaning.to_string(),
        image_url: image_url.to_string(),
    }
}

const WIKIMEDIA: &str = "https://upload.wikimedia.org/wikipedia/commons";

fn builtin_cards() -> Vec<TarotCard> {
    vec![
        card(
            "c0",
            "The Fool",
            ["new beginnings", "innocence", "spontaneity"],
            "Take a leap of faith into the unknown and stay open.",
            &format!("{}/9/90/RWS_Tarot_00_Fool.jpg", WIKIMEDIA),
        ),
        card(
            "c1",
            "The Magician",
            ["manifestation", "power", "action"],
            "You already hold every resource you need to reach your goal.",
            &format!("{}/d/de/RWS_Tarot_01_Magician.jpg", WIKIMEDIA),
        ),
        card(
            "c2",
            "The High Priestess",
            ["intuition", "mystery", "subconscious"],
            "Look inward and listen to your deepest voice.",
            &format!("{}/8/88/RWS_Tarot_02_High_Priestess.jpg", WIKIMEDIA),
        ),
        card(
            "c3",
            "The Empress",
            ["abundance", "nurturing", "nature"],
            "Creativity is flowing; embrace the beauty and plenty around you.",
            &format!("{}/d/d2/RWS_Tarot_03_Empress.jpg", WIKIMEDIA),
        ),
        card(
            "c4",
            "The Emperor",
            ["authority", "structure", "stability"],
            "Build order and rules that give your life structure.",
            &format!("{}/c/c3/RWS_Tarot_04_Emperor.jpg", WIKIMEDIA),
        ),
        card(
            "c5",
            "The Hierophant",
            ["tradition", "belief", "learning"],
            "Seek wise guidance and honour tradition or spiritual teaching.",
            &format!("{}/8/8d/RWS_Tarot_05_Hierophant.jpg", WIKIMEDIA),
        ),
        card(
            "c9",
            "The Hermit",
            ["introspection", "solitude", "guidance"],
            "Step back for a while and find the light within in solitude.",
            &format!("{}/4/4d/RWS_Tarot_09_Hermit.jpg", WIKIMEDIA),
        ),
        card(
            "c17",
            "The Star",
            ["hope", "inspiration", "serenity"],
            "After the dark, the light of hope shines again.",
            &format!("{}/d/db/RWS_Tarot_17_Star.jpg", WIKIMEDIA),
        ),
        card(
            "c18",
            "The Moon",
            ["illusion", "subconscious", "unease"],
            "Walk through the fog and face your fears and intuition.",
            &format!("{}/7/7f/RWS_Tarot_18_Moon.jpg", WIKIMEDIA),
        ),
        card(
            "c19",
            "The Sun",
            ["joy", "success", "vitality"],
            "Pure joy and clarity; everything shows itself in the sunlight.",
            &format!("{}/1/17/RWS_Tarot_19_Sun.jpg", WIKIMEDIA),
        ),
        card(
            "c20",
            "Judgement",
            ["awakening", "rebirth", "calling"],
            "Answer the inner call and be renewed through reflection.",
            &format!("{}/d/dd/RWS_Tarot_20_Judgement.jpg", WIKIMEDIA),
        ),
        card(
            "c21",
            "The World",
            ["completion", "integration", "wholeness"],
            "A cycle closes; enjoy the fulfilment and what you achieved.",
            &format!("{}/f/ff/RWS_Tarot_21_World.jpg", WIKIMEDIA),
        ),
    ]
}
