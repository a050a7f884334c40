use detection::{
    catalog::{CatalogError, RuleCatalog},
    model::{BiasRule, SignalRecord},
};

use crate::options::SignalFlag::{self, *};

fn any(record: &SignalRecord, flags: &[SignalFlag]) -> bool {
    flags.iter().any(|flag| flag.is_set(record))
}

fn anchoring(r: &SignalRecord) -> bool {
    any(r, &[HasOriginalPrice, ShowsComparePrice])
}

fn scarcity(r: &SignalRecord) -> bool {
    any(r, &[LimitedTime, LowStock])
}

fn social_proof(r: &SignalRecord) -> bool {
    any(r, &[Bestseller, HasReviews, Trending])
}

fn bundle(r: &SignalRecord) -> bool {
    BundleDeal.is_set(r)
}

fn decoy(r: &SignalRecord) -> bool {
    MultipleTiers.is_set(r)
}

fn sunk_cost(r: &SignalRecord) -> bool {
    any(r, &[PartOfCollection, UpgradeExisting])
}

fn framing(r: &SignalRecord) -> bool {
    any(r, &[EmphasizesSavings, HasOriginalPrice])
}

fn endowment(r: &SignalRecord) -> bool {
    any(r, &[FreeTrial, TryBefore])
}

fn loss_aversion(r: &SignalRecord) -> bool {
    any(r, &[LimitedTime, ExclusiveOffer])
}

fn reciprocity(r: &SignalRecord) -> bool {
    any(r, &[FreeGift, FreeTrial])
}

// Order is display order.
pub static BIAS_RULES: [BiasRule; 10] = [
    BiasRule {
        id: "anchoring",
        name: "Anchoring Bias",
        description: "You're being influenced by the first price you saw",
        explanation: "The original higher price is serving as an anchor, making the current price seem like a better deal than it actually is.",
        advice: "Ask yourself: Would I buy this at the current price if I had never seen the original price?",
        predicate: anchoring,
    },
    BiasRule {
        id: "scarcity",
        name: "Scarcity Heuristic",
        description: "Limited availability is creating urgency",
        explanation: "The perception of scarcity is triggering fear of missing out (FOMO), potentially rushing your decision.",
        advice: "Consider: Will this product truly be unavailable later, or is this a marketing tactic? Do you really need it now?",
        predicate: scarcity,
    },
    BiasRule {
        id: "social_proof",
        name: "Social Proof Bias",
        description: "Others' choices are influencing your decision",
        explanation: "You're being influenced by what others have chosen rather than evaluating if it meets your specific needs.",
        advice: "Ask: Does this product actually solve MY problem, regardless of its popularity?",
        predicate: social_proof,
    },
    BiasRule {
        id: "bundle",
        name: "Bundling Effect",
        description: "A bundle deal is making you buy more than needed",
        explanation: "Bundled items make you feel you're getting more value, but you may not need all the items included.",
        advice: "Calculate: What's the individual cost of items you actually need? Are you paying for things you won't use?",
        predicate: bundle,
    },
    BiasRule {
        id: "decoy",
        name: "Decoy Effect",
        description: "A third option is making another seem more attractive",
        explanation: "A less attractive option (decoy) has been added to make another option seem more reasonable or valuable.",
        advice: "Focus on the option that best meets your needs, ignoring the comparison products entirely.",
        predicate: decoy,
    },
    BiasRule {
        id: "sunk_cost",
        name: "Sunk Cost Fallacy",
        description: "Past spending is influencing future decisions",
        explanation: "You're considering this purchase because of money already spent, rather than evaluating it independently.",
        advice: "Past spending is gone. Decide based only on whether this purchase provides value going forward.",
        predicate: sunk_cost,
    },
    BiasRule {
        id: "framing",
        name: "Framing Effect",
        description: "How the offer is presented is affecting your perception",
        explanation: "The presentation emphasizes savings rather than actual cost, making it seem more attractive.",
        advice: "Reframe: Would you buy this at the \"discounted\" price if it was the regular price? Is it actually cheap?",
        predicate: framing,
    },
    BiasRule {
        id: "endowment",
        name: "Endowment Effect",
        description: "You value it more because you're imagining owning it",
        explanation: "Once you've tried or imagined owning something, you tend to overvalue it and find it harder to give up.",
        advice: "Remember: You don't own it yet. Evaluate objectively whether it's worth the price.",
        predicate: endowment,
    },
    BiasRule {
        id: "loss_aversion",
        name: "Loss Aversion",
        description: "Fear of missing out is driving your decision",
        explanation: "You're more motivated by avoiding loss (missing the deal) than by the actual gain.",
        advice: "Think: What am I actually losing if I don't buy this? Usually, it's just a marketing deadline.",
        predicate: loss_aversion,
    },
    BiasRule {
        id: "reciprocity",
        name: "Reciprocity Bias",
        description: "Free gifts or samples make you feel obligated",
        explanation: "Receiving something \"free\" creates a psychological obligation to reciprocate by purchasing.",
        advice: "Remember: The \"free\" item is a marketing cost, not a gift. You don't owe them anything.",
        predicate: reciprocity,
    },
];

pub fn catalog() -> Result<RuleCatalog, CatalogError> {
    RuleCatalog::new(BIAS_RULES.to_vec())
}
