//! Deal participant and role resolution.
//!
//! Pure functions over an already loaded [`Deal`]: no I/O, no failure modes.
//! Identifiers are compared after normalization (surrounding whitespace
//! removed, ASCII case folded), so `" USR-AB12 "` matches `usr-ab12`.
//! A blank user ID never matches.

use crate::entities::Deal;
use crate::enums::Role;

fn normalize(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

fn same_id(stored: &str, candidate: &str) -> bool {
    !candidate.is_empty() && normalize(stored) == candidate
}

/// Resolve the role `user_id` holds in `deal`.
///
/// Seller is checked before buyer.
#[must_use]
pub fn role_of(deal: &Deal, user_id: &str) -> Role {
    let candidate = normalize(user_id);
    if same_id(&deal.seller, &candidate) {
        Role::Seller
    } else if same_id(&deal.buyer, &candidate) {
        Role::Buyer
    } else {
        Role::None
    }
}

/// Whether `user_id` is the seller or the buyer of `deal`.
#[must_use]
pub fn is_participant(deal: &Deal, user_id: &str) -> bool {
    role_of(deal, user_id).is_participant()
}

/// The other participant, as seen from `user_id`.
///
/// `None` when `user_id` is not a participant.
#[must_use]
pub fn counterparty<'a>(deal: &'a Deal, user_id: &str) -> Option<&'a str> {
    match role_of(deal, user_id) {
        Role::Seller => Some(deal.buyer.as_str()),
        Role::Buyer => Some(deal.seller.as_str()),
        Role::None => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn deal() -> Deal {
        Deal::new(
            "dea-00000001".into(),
            1,
            "bike",
            "usr-5e11e000",
            "usr-b0b00000",
            None,
            Utc::now(),
        )
    }

    #[rstest]
    #[case("usr-5e11e000", Role::Seller)]
    #[case("usr-b0b00000", Role::Buyer)]
    #[case("usr-0ther000", Role::None)]
    #[case("", Role::None)]
    #[case("   ", Role::None)]
    #[case(" USR-5E11E000 ", Role::Seller)]
    fn role_resolution(#[case] user: &str, #[case] expected: Role) {
        let deal = deal();
        assert_eq!(role_of(&deal, user), expected);
        assert_eq!(is_participant(&deal, user), expected != Role::None);
    }

    #[test]
    fn seller_wins_when_both_sides_match() {
        let mut deal = deal();
        deal.buyer = deal.seller.clone();
        assert_eq!(role_of(&deal, "usr-5e11e000"), Role::Seller);
    }

    #[test]
    fn counterparty_is_the_other_side() {
        let deal = deal();
        assert_eq!(counterparty(&deal, "usr-5e11e000"), Some("usr-b0b00000"));
        assert_eq!(counterparty(&deal, "usr-b0b00000"), Some("usr-5e11e000"));
        assert_eq!(counterparty(&deal, "usr-0ther000"), None);
    }
}
