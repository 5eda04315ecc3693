use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;

/// The set of cards a hand may play against the current playing area.
///
/// With no lead yet, everything is legal. Otherwise, in priority order:
/// lead-suit cards that beat the lead; any lead-suit card; trump cards when
/// the lead suit is not trump; the whole hand.
pub fn legal_plays(hand: &Hand, playing_area: &[Card], trump: Suit) -> Vec<Card> {
    let Some(lead) = playing_area.first().copied() else {
        return hand.cards().to_vec();
    };

    let higher_same_suit: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| c.suit == lead.suit && c.rank > lead.rank)
        .collect();
    if !higher_same_suit.is_empty() {
        return higher_same_suit;
    }

    let same_suit = hand.cards_of_suit(lead.suit);
    if !same_suit.is_empty() {
        return same_suit;
    }

    if lead.suit != trump {
        let trumps = hand.cards_of_suit(trump);
        if !trumps.is_empty() {
            return trumps;
        }
    }

    hand.cards().to_vec()
}

/// Validates a single candidate against the same rule, written as the
/// original's independent formulation: beating the lead in its own suit is
/// always legal; anything else is legal only if no higher same-suit card is
/// held AND the lead is trump, or the candidate is trump, or the hand holds
/// no trump at all.
///
/// This deliberately mirrors a second statement of the rule rather than
/// delegating to `legal_plays`; the two disagree on a narrow class of
/// forced-follow inputs (see the `legality_agreement` integration test),
/// and that discrepancy is preserved as observed, not reconciled.
pub fn is_legal_play(candidate: Card, hand: &Hand, playing_area: &[Card], trump: Suit) -> bool {
    let Some(lead) = playing_area.first().copied() else {
        return true;
    };

    if candidate.suit == lead.suit && candidate.rank > lead.rank {
        return true;
    }

    let holds_higher = hand
        .iter()
        .any(|c| c.suit == lead.suit && c.rank > lead.rank);
    if holds_higher {
        return false;
    }

    if lead.suit == trump {
        return true;
    }
    if candidate.suit == trump {
        return true;
    }

    !hand.iter().any(|c| c.suit == trump)
}
