//! Gift Cards

use crate::prices::Price;

/// Spendable balance left on a gift card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftCardBalance {
    balance: Price,
}

/// Result of spending a gift card against an amount due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    /// Amount taken from the card.
    pub applied: Price,

    /// Balance left on the card afterwards.
    pub remaining: Price,
}

impl GiftCardBalance {
    /// Wrap a card balance.
    pub const fn new(balance: Price) -> Self {
        Self { balance }
    }

    /// Current balance.
    pub const fn balance(self) -> Price {
        self.balance
    }

    /// Spend as much of the card as the amount due allows.
    pub fn redeem(self, amount_due: Price) -> Redemption {
        let applied = self.balance.min(amount_due);

        Redemption {
            applied,
            remaining: self.balance.saturating_sub(applied),
        }
    }
}
