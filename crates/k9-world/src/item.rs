//! Carried-item model for the contraband sniff check.

/// Legal classification of an item, as reported by the host inventory.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[non_exhaustive]
pub enum LegalStatus {
    /// Unremarkable item.
    #[default]
    Legal,
    /// Legal to possess only under licence.
    Controlled,
    /// Outright illegal.
    Illegal,
}

impl LegalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LegalStatus::Legal      => "legal",
            LegalStatus::Controlled => "controlled",
            LegalStatus::Illegal    => "illegal",
        }
    }
}

impl std::fmt::Display for LegalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad item category.  The sniff check only distinguishes sellable
/// product from everything else.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[non_exhaustive]
pub enum ItemKind {
    /// Ordinary equipment, consumables, etc.
    #[default]
    Gear,
    /// Sellable product — always of interest regardless of packaging.
    Product,
}

/// One occupied slot in a subject's carried inventory, in hotbar order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CarriedItem {
    pub kind:         ItemKind,
    pub legal_status: LegalStatus,
}

impl CarriedItem {
    #[inline]
    pub fn new(kind: ItemKind, legal_status: LegalStatus) -> Self {
        Self { kind, legal_status }
    }

    /// Plain legal gear — the uninteresting case.
    #[inline]
    pub fn legal_gear() -> Self {
        Self::new(ItemKind::Gear, LegalStatus::Legal)
    }

    /// Would a sniff flag this item?  Any product counts, as does any item
    /// that is not outright legal.
    #[inline]
    pub fn is_contraband(&self) -> bool {
        matches!(self.kind, ItemKind::Product) || self.legal_status != LegalStatus::Legal
    }
}
