//! Display text attached to each moon phase.

use super::MoonPhase;

/// Static flavour text for one phase.
#[derive(Debug, PartialEq, Eq)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub blessing: &'static str,
    pub tip: &'static str,
    /// Three short keywords, joined with " · ".
    pub keywords: &'static str,
    /// Reading for someone born under this phase.
    pub archetype: &'static str,
}

static PHASE_INFO: [PhaseInfo; 8] = [
    PhaseInfo {
        name: "New Moon",
        blessing: "Seeds are sown in the dark; anything is possible.",
        tip: "Start new plans and set intentions. Avoid draining yourself.",
        keywords: "potential · intuition · sowing",
        archetype: "A natural initiator who trusts instinct over deliberation and finds creative force in the unknown.",
    },
    PhaseInfo {
        name: "Waxing Crescent",
        blessing: "A first glimmer: hope is sprouting.",
        tip: "Gather information and give your plan its first push.",
        keywords: "curiosity · exploration · sprouting",
        archetype: "A curious explorer who collects experiences and grows stronger by persisting.",
    },
    PhaseInfo {
        name: "First Quarter",
        blessing: "Find balance and breakthrough inside the tension.",
        tip: "Challenges may appear. They are testing your resolve.",
        keywords: "action · decision · building",
        archetype: "A builder who brings order out of conflict and turns inner tension into change.",
    },
    PhaseInfo {
        name: "Waxing Gibbous",
        blessing: "Energy is swelling, almost whole.",
        tip: "Fine-tune your direction and give it everything now.",
        keywords: "refinement · analysis · improvement",
        archetype: "An analyst who wants things done well, not merely done. Beware of harsh self-criticism.",
    },
    PhaseInfo {
        name: "Full Moon",
        blessing: "In full light, see your true self.",
        tip: "Emotions may run high. A good night to release and give thanks.",
        keywords: "fulfilment · clarity · relationship",
        archetype: "A clear-sighted, feeling soul whose lesson is balancing self and others.",
    },
    PhaseInfo {
        name: "Waning Gibbous",
        blessing: "Share your wisdom and give back.",
        tip: "Start reviewing and sorting. Pass on what you have learned.",
        keywords: "giving · sharing · wisdom",
        archetype: "A teacher who turns personal experience into wisdom for the community.",
    },
    PhaseInfo {
        name: "Last Quarter",
        blessing: "Release whatever no longer serves you.",
        tip: "The best time to declutter and make room for the next cycle.",
        keywords: "release · correction · independence",
        archetype: "An independent spirit with the courage to break old patterns and reshape.",
    },
    PhaseInfo {
        name: "Waning Crescent",
        blessing: "Rest in the stillness and return to the void.",
        tip: "Rest deeply, meditate, clear your body and space.",
        keywords: "settling · spirit · completion",
        archetype: "An old soul drawn inward, whose lesson is letting go and waiting for rebirth.",
    },
];

pub(super) fn info_for(phase: MoonPhase) -> &'static PhaseInfo {
    &PHASE_INFO[phase.index()]
}
