//! The cutthroat stockpile draft: extra cards, a face-up pick for the bid
//! winner, an alternating deal of the rest, and the reduction of each
//! 24-card hand back to 12. Card conservation holds through every step —
//! everything moves between the round's containers, nothing is created or
//! dropped.

use crate::game::context::{HAND_SIZE, RoundContext};
use crate::game::provider::MoveProvider;
use crate::game::session::GameError;
use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;

pub const FACE_UP_CARDS: usize = 2;

/// Runs the whole draft. Requires trump and a bid winner to be fixed.
pub fn run_draft(
    ctx: &mut RoundContext,
    extras: [&[Card]; 2],
    provider: &mut dyn MoveProvider,
) -> Result<(), GameError> {
    let trump = ctx.trump().ok_or(GameError::TrumpNotSet)?;
    let bid_winner = ctx.bid_winner().ok_or(GameError::BiddingIncomplete)?;

    deal_extras(ctx, extras);
    let face_up = reveal(ctx);
    award_face_up(ctx, bid_winner, face_up, provider);
    deal_alternately(ctx, bid_winner);

    for seat in Seat::LOOP {
        reduce_hand(ctx, seat, trump, provider);
    }
    Ok(())
}

/// Moves each seat's configured extra cards from the stockpile into its
/// hand. Cards the stockpile does not hold are skipped.
fn deal_extras(ctx: &mut RoundContext, extras: [&[Card]; 2]) {
    for seat in Seat::LOOP {
        for &card in extras[seat.index()] {
            if let Some(found) = ctx.take_from_stockpile(card) {
                ctx.hand_mut(seat).add(found);
            }
        }
    }
}

/// Turns up to two stockpile cards face-up.
fn reveal(ctx: &mut RoundContext) -> Vec<Card> {
    let mut face_up = Vec::with_capacity(FACE_UP_CARDS);
    for _ in 0..FACE_UP_CARDS {
        match ctx.pop_stockpile() {
            Some(card) => face_up.push(card),
            None => break,
        }
    }
    face_up
}

/// The bid winner picks one face-up card; an answer that is not actually
/// face-up falls back to the first revealed card. The unchosen card goes
/// to the other seat.
fn award_face_up(
    ctx: &mut RoundContext,
    bid_winner: Seat,
    face_up: Vec<Card>,
    provider: &mut dyn MoveProvider,
) {
    let Some(&first) = face_up.first() else {
        return;
    };

    let pick = provider
        .pick_stockpile(bid_winner, &face_up)
        .filter(|card| face_up.contains(card))
        .unwrap_or(first);
    ctx.hand_mut(bid_winner).add(pick);

    let mut rest = face_up;
    if let Some(position) = rest.iter().position(|&c| c == pick) {
        rest.remove(position);
    }
    for card in rest {
        ctx.hand_mut(bid_winner.opponent()).add(card);
    }
}

/// Deals the remaining stockpile alternately, bid winner first.
fn deal_alternately(ctx: &mut RoundContext, bid_winner: Seat) {
    let mut seat = bid_winner;
    while let Some(card) = ctx.pop_stockpile() {
        ctx.hand_mut(seat).add(card);
        seat = seat.opponent();
    }
}

/// Brings one hand back to exactly twelve cards. A provider keep-list is
/// honored when it names exactly twelve held cards; anything else falls
/// back to the automatic discard rule.
fn reduce_hand(ctx: &mut RoundContext, seat: Seat, trump: Suit, provider: &mut dyn MoveProvider) {
    if ctx.hand(seat).len() <= HAND_SIZE {
        return;
    }

    if let Some(keep) = provider.keep_cards(seat, ctx.hand(seat), trump) {
        if let Some(discards) = discards_for_keep(ctx.hand(seat).cards(), &keep) {
            for card in discards {
                ctx.discard_from_hand(seat, card);
            }
            return;
        }
    }

    auto_reduce(ctx, seat, trump);
}

/// The complement of a valid keep-list, or `None` when the list does not
/// name exactly [`HAND_SIZE`] cards all present in the hand.
fn discards_for_keep(held: &[Card], keep: &[Card]) -> Option<Vec<Card>> {
    if keep.len() != HAND_SIZE {
        return None;
    }
    let mut rest = held.to_vec();
    for &card in keep {
        let position = rest.iter().position(|&c| c == card)?;
        rest.swap_remove(position);
    }
    Some(rest)
}

/// Discards from the least-represented non-trump suits first, lowest rank
/// first. Trump is only touched when every other card is gone before the
/// hand reaches twelve — the reduction must always land there exactly.
fn auto_reduce(ctx: &mut RoundContext, seat: Seat, trump: Suit) {
    let hand = ctx.hand(seat);
    let needed = hand.len().saturating_sub(HAND_SIZE);

    let mut suits: Vec<Suit> = Suit::ALL.iter().copied().filter(|&s| s != trump).collect();
    suits.sort_by_key(|&suit| hand.count_of_suit(suit));

    let mut discards: Vec<Card> = Vec::with_capacity(needed);
    for suit in suits {
        let mut cards = hand.cards_of_suit(suit);
        cards.sort_by_key(|card| card.rank.value());
        for card in cards {
            if discards.len() < needed {
                discards.push(card);
            }
        }
    }

    if discards.len() < needed {
        let mut trumps = hand.cards_of_suit(trump);
        trumps.sort_by_key(|card| card.rank.value());
        for card in trumps {
            if discards.len() < needed {
                discards.push(card);
            }
        }
    }

    for card in discards {
        ctx.discard_from_hand(seat, card);
    }
}
