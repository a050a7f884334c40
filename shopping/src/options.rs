use detection::model::{SignalOption, SignalRecord};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Marketing signals a shopper can tick for a listing, in checkbox order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum SignalFlag {
    HasOriginalPrice,
    ShowsComparePrice,
    LimitedTime,
    LowStock,
    Bestseller,
    HasReviews,
    Trending,
    BundleDeal,
    MultipleTiers,
    PartOfCollection,
    UpgradeExisting,
    EmphasizesSavings,
    FreeTrial,
    TryBefore,
    ExclusiveOffer,
    FreeGift,
}

impl SignalFlag {
    pub fn label(self) -> &'static str {
        match self {
            SignalFlag::HasOriginalPrice => "Shows original/higher price (crossed out)",
            SignalFlag::ShowsComparePrice => "Compares to competitor prices",
            SignalFlag::LimitedTime => "Says \"Limited Time\" or \"Ends Soon\"",
            SignalFlag::LowStock => "Shows low stock (\"Only X left\")",
            SignalFlag::Bestseller => "Marked as \"Bestseller\" or \"Popular\"",
            SignalFlag::HasReviews => "Highlights customer reviews/ratings",
            SignalFlag::Trending => "Says \"Trending\" or \"Most bought\"",
            SignalFlag::BundleDeal => "Bundle, combo, or set deal",
            SignalFlag::MultipleTiers => "Multiple options (Basic/Pro/Premium)",
            SignalFlag::PartOfCollection => "Part of a collection you're building",
            SignalFlag::UpgradeExisting => "Upgrade to something you already own",
            SignalFlag::EmphasizesSavings => "Emphasizes how much you \"save\"",
            SignalFlag::FreeTrial => "Offers free trial period",
            SignalFlag::TryBefore => "Try before you buy / demo available",
            SignalFlag::ExclusiveOffer => "Says \"Exclusive\" or \"Members only\"",
            SignalFlag::FreeGift => "Includes free gift or bonus item",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SignalFlag::HasOriginalPrice => "💰",
            SignalFlag::ShowsComparePrice => "📊",
            SignalFlag::LimitedTime => "⏰",
            SignalFlag::LowStock => "📦",
            SignalFlag::Bestseller => "⭐",
            SignalFlag::HasReviews => "⭐",
            SignalFlag::Trending => "📈",
            SignalFlag::BundleDeal => "📦",
            SignalFlag::MultipleTiers => "🎯",
            SignalFlag::PartOfCollection => "🧩",
            SignalFlag::UpgradeExisting => "⬆️",
            SignalFlag::EmphasizesSavings => "💵",
            SignalFlag::FreeTrial => "🆓",
            SignalFlag::TryBefore => "🔍",
            SignalFlag::ExclusiveOffer => "🎫",
            SignalFlag::FreeGift => "🎁",
        }
    }

    /// Camel-case name as used in requests, e.g. `limitedTime`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_set(self, record: &SignalRecord) -> bool {
        record.flag(self.name())
    }

    pub fn option(self) -> SignalOption {
        SignalOption {
            id: self.name(),
            label: self.label(),
            icon: self.icon(),
        }
    }
}

pub fn shopping_options() -> Vec<SignalOption> {
    SignalFlag::iter().map(SignalFlag::option).collect()
}
