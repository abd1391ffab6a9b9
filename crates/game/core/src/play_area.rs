//! Per-side letter resource manager.
//!
//! A [`PlayArea`] owns three pools (`bag`, `hand` and `placed`) and every
//! operation is a pure function from one PlayArea to the next. Operations only
//! relocate letters, so `|bag| + |hand| + |placed|` is invariant under all of
//! them. Referencing a missing id or acting on an empty pool returns the input
//! unchanged.

use std::collections::BTreeMap;

use crate::env::{Prng, shuffle};
use crate::letter::{Letter, LetterId, letter_sum, spell};

/// Ordering of the letters inside one hand stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackOrder {
    /// Lowest level first.
    Ascending,
    /// Highest level first.
    #[default]
    Descending,
}

impl StackOrder {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn sort(self, stack: &mut [Letter]) {
        match self {
            Self::Ascending => stack.sort_by_key(|l| (l.level, l.id)),
            Self::Descending => stack.sort_by(|a, b| b.level.cmp(&a.level).then(a.id.cmp(&b.id))),
        }
    }
}

/// One side's bag / hand / placed pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayArea {
    hand_size: usize,
    prng: Prng,
    order: StackOrder,
    /// Top of the bag is the last element.
    bag: Vec<Letter>,
    /// Per-character stacks; empty stacks are never kept.
    hand: BTreeMap<char, Vec<Letter>>,
    placed: Vec<Letter>,
}

impl PlayArea {
    /// Creates a PlayArea with `letters` shuffled into the bag.
    pub fn new(letters: Vec<Letter>, hand_size: usize, prng: Prng) -> Self {
        let (bag, prng) = shuffle(letters, prng);
        Self {
            hand_size,
            prng,
            order: StackOrder::default(),
            bag,
            hand: BTreeMap::new(),
            placed: Vec::new(),
        }
    }

    /// Creates a PlayArea whose letters are already on the table.
    ///
    /// Used for the opponent, whose word is placed directly each round.
    pub fn with_placed(placed: Vec<Letter>, prng: Prng) -> Self {
        Self {
            hand_size: 0,
            prng,
            order: StackOrder::default(),
            bag: Vec::new(),
            hand: BTreeMap::new(),
            placed,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn stack_order(&self) -> StackOrder {
        self.order
    }

    pub fn prng(&self) -> Prng {
        self.prng
    }

    pub fn bag(&self) -> &[Letter] {
        &self.bag
    }

    pub fn placed(&self) -> &[Letter] {
        &self.placed
    }

    /// Hand stacks keyed by character, each in stack order.
    pub fn stacks(&self) -> &BTreeMap<char, Vec<Letter>> {
        &self.hand
    }

    /// Every hand letter, stack by stack.
    pub fn hand_letters(&self) -> impl Iterator<Item = &Letter> + '_ {
        self.hand.values().flatten()
    }

    pub fn hand_count(&self) -> usize {
        self.hand.values().map(Vec::len).sum()
    }

    /// `|bag| + |hand| + |placed|`.
    pub fn total(&self) -> usize {
        self.bag.len() + self.hand_count() + self.placed.len()
    }

    /// The word currently spelled by the placed letters.
    pub fn placed_word(&self) -> String {
        spell(&self.placed)
    }

    /// Plain face-score sum of the placed letters.
    pub fn placed_sum(&self) -> i64 {
        letter_sum(&self.placed)
    }

    /// Character counts over hand and placed letters.
    pub fn char_pool(&self) -> BTreeMap<char, usize> {
        let mut pool = BTreeMap::new();
        for letter in self.hand_letters().chain(self.placed.iter()) {
            *pool.entry(letter.ch).or_insert(0) += 1;
        }
        pool
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Moves the top of the bag into the hand.
    #[must_use]
    pub fn draw(mut self) -> Self {
        if let Some(letter) = self.bag.pop() {
            self.push_to_hand(letter);
        }
        self
    }

    #[must_use]
    pub fn draw_n(self, n: usize) -> Self {
        (0..n).fold(self, |area, _| area.draw())
    }

    /// Draws until hand and placed together hold `hand_size` letters.
    #[must_use]
    pub fn draw_all(self) -> Self {
        let held = self.hand_count() + self.placed.len();
        let missing = self.hand_size.saturating_sub(held);
        self.draw_n(missing)
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    #[must_use]
    pub fn place_by_id(mut self, id: LetterId) -> Self {
        if let Some(letter) = self.take_from_hand(id) {
            self.placed.push(letter);
        }
        self
    }

    /// Places the front letter of the `ch` stack.
    #[must_use]
    pub fn place_by_char(mut self, ch: char) -> Self {
        let ch = ch.to_ascii_lowercase();
        if let Some(stack) = self.hand.get_mut(&ch) {
            let letter = stack.remove(0);
            if stack.is_empty() {
                self.hand.remove(&ch);
            }
            self.placed.push(letter);
        }
        self
    }

    /// Places every character of `word` in order, or nothing at all when the
    /// hand cannot supply the whole word.
    #[must_use]
    pub fn place_word(self, word: &str) -> Self {
        let mut needed: BTreeMap<char, usize> = BTreeMap::new();
        for ch in word.chars() {
            *needed.entry(ch.to_ascii_lowercase()).or_insert(0) += 1;
        }
        let playable = needed
            .iter()
            .all(|(ch, count)| self.hand.get(ch).map_or(0, Vec::len) >= *count);
        if !playable || word.is_empty() {
            return self;
        }
        word.chars().fold(self, Self::place_by_char)
    }

    #[must_use]
    pub fn unplace_last(mut self) -> Self {
        if let Some(letter) = self.placed.pop() {
            self.push_to_hand(letter);
        }
        self
    }

    #[must_use]
    pub fn unplace_by_id(mut self, id: LetterId) -> Self {
        if let Some(index) = self.placed.iter().position(|l| l.id == id) {
            let letter = self.placed.remove(index);
            self.push_to_hand(letter);
        }
        self
    }

    #[must_use]
    pub fn unplace_all(mut self) -> Self {
        for letter in std::mem::take(&mut self.placed) {
            self.push_to_hand(letter);
        }
        self
    }

    // ------------------------------------------------------------------
    // Discarding
    // ------------------------------------------------------------------

    /// Returns hand and placed letters to the bag and shuffles it.
    #[must_use]
    pub fn discard_all(mut self) -> Self {
        if self.hand.is_empty() && self.placed.is_empty() {
            return self;
        }
        let hand = std::mem::take(&mut self.hand);
        self.bag.extend(hand.into_values().flatten());
        self.bag.append(&mut self.placed);
        self.reshuffle()
    }

    /// Returns placed letters to the bag and shuffles it.
    #[must_use]
    pub fn discard_placed(mut self) -> Self {
        if self.placed.is_empty() {
            return self;
        }
        self.bag.append(&mut self.placed);
        self.reshuffle()
    }

    /// Discards the placed word and refills the hand.
    #[must_use]
    pub fn redraw(self) -> Self {
        self.discard_placed().draw_all()
    }

    /// Moves every letter into the bag, ordered by id.
    #[must_use]
    pub fn pack_up(mut self) -> Self {
        let hand = std::mem::take(&mut self.hand);
        self.bag.extend(hand.into_values().flatten());
        self.bag.append(&mut self.placed);
        self.bag.sort_by_key(|l| l.id);
        self
    }

    /// Consumes the area, yielding every letter ordered by id.
    pub fn into_letters(self) -> Vec<Letter> {
        self.pack_up().bag
    }

    // ------------------------------------------------------------------
    // Ability support
    // ------------------------------------------------------------------

    #[must_use]
    pub fn set_stack_order(mut self, order: StackOrder) -> Self {
        self.order = order;
        for stack in self.hand.values_mut() {
            order.sort(stack);
        }
        self
    }

    #[must_use]
    pub fn set_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Upgrades every placed letter by `amount`.
    #[must_use]
    pub fn upgrade_placed(mut self, amount: u32) -> Self {
        for letter in &mut self.placed {
            *letter = letter.upgraded(amount);
        }
        self
    }

    /// Moves the last placed letter to the bottom of the bag.
    #[must_use]
    pub fn bury_last_placed(mut self) -> Self {
        if let Some(letter) = self.placed.pop() {
            self.bag.insert(0, letter);
        }
        self
    }

    /// Replaces the placed word with freshly built opponent letters.
    #[must_use]
    pub(crate) fn replace_placed(mut self, placed: Vec<Letter>) -> Self {
        self.placed = placed;
        self
    }

    fn reshuffle(mut self) -> Self {
        let (bag, prng) = shuffle(std::mem::take(&mut self.bag), self.prng);
        self.bag = bag;
        self.prng = prng;
        self
    }

    fn push_to_hand(&mut self, letter: Letter) {
        let stack = self.hand.entry(letter.ch).or_default();
        stack.push(letter);
        self.order.sort(stack);
    }

    fn take_from_hand(&mut self, id: LetterId) -> Option<Letter> {
        let (&ch, stack) = self
            .hand
            .iter_mut()
            .find(|(_, stack)| stack.iter().any(|l| l.id == id))?;
        let index = stack.iter().position(|l| l.id == id)?;
        let letter = stack.remove(index);
        if stack.is_empty() {
            self.hand.remove(&ch);
        }
        Some(letter)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::letter::{scrabble_distribution, string_to_letters};

    fn area(text: &str, hand_size: usize) -> PlayArea {
        PlayArea::new(string_to_letters(text, 0), hand_size, Prng::from_seed(11))
    }

    #[test]
    fn draw_all_fills_hand() {
        let area = area("abcdefghij", 7).draw_all();
        assert_eq!(area.hand_count(), 7);
        assert_eq!(area.bag().len(), 3);
    }

    #[test]
    fn draw_on_empty_bag_is_noop() {
        let area = area("ab", 5).draw_all();
        let again = area.clone().draw();
        assert_eq!(area, again);
    }

    #[test]
    fn place_word_is_all_or_nothing() {
        let area = area("cat", 3).draw_all();
        let placed = area.clone().place_word("cat");
        assert_eq!(placed.placed_word(), "cat");
        assert_eq!(placed.hand_count(), 0);

        let missing = area.clone().place_word("cart");
        assert_eq!(missing, area);
    }

    #[test]
    fn unplace_returns_to_stack() {
        let area = area("cat", 3).draw_all().place_word("cat");
        let area = area.unplace_last();
        assert_eq!(area.placed_word(), "ca");
        assert!(area.stacks().contains_key(&'t'));

        let area = area.unplace_all();
        assert!(area.placed().is_empty());
        assert_eq!(area.hand_count(), 3);
    }

    #[test]
    fn missing_id_is_noop() {
        let area = area("cat", 3).draw_all();
        assert_eq!(area.clone().place_by_id(LetterId(99)), area);
        assert_eq!(area.clone().unplace_by_id(LetterId(0)), area);
        assert_eq!(area.clone().place_by_char('z'), area);
    }

    #[test]
    fn stack_order_decides_which_copy_is_placed() {
        let mut letters = string_to_letters("aa", 0);
        letters[1] = letters[1].upgraded(3);
        let area = PlayArea::new(letters, 2, Prng::from_seed(1)).draw_all();

        let high = area.clone().place_by_char('a');
        assert_eq!(high.placed()[0].level, 3);

        let low = area.set_stack_order(StackOrder::Ascending).place_by_char('a');
        assert_eq!(low.placed()[0].level, 0);
    }

    #[test]
    fn pack_up_sorts_by_id() {
        let area = PlayArea::new(scrabble_distribution(), 7, Prng::from_seed(5))
            .draw_all()
            .place_by_char('e')
            .pack_up();
        assert_eq!(area.bag().len(), 98);
        assert!(area.bag().windows(2).all(|w| w[0].id < w[1].id));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Draw,
        DrawN(usize),
        DrawAll,
        PlaceById(u32),
        PlaceByChar(char),
        PlaceWord(String),
        UnplaceLast,
        UnplaceById(u32),
        UnplaceAll,
        DiscardAll,
        DiscardPlaced,
        PackUp,
        Flip,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Draw),
            (0usize..10).prop_map(Op::DrawN),
            Just(Op::DrawAll),
            (0u32..110).prop_map(Op::PlaceById),
            proptest::char::range('a', 'z').prop_map(Op::PlaceByChar),
            "[a-z]{0,5}".prop_map(Op::PlaceWord),
            Just(Op::UnplaceLast),
            (0u32..110).prop_map(Op::UnplaceById),
            Just(Op::UnplaceAll),
            Just(Op::DiscardAll),
            Just(Op::DiscardPlaced),
            Just(Op::PackUp),
            Just(Op::Flip),
        ]
    }

    fn apply(area: PlayArea, op: &Op) -> PlayArea {
        match op {
            Op::Draw => area.draw(),
            Op::DrawN(n) => area.draw_n(*n),
            Op::DrawAll => area.draw_all(),
            Op::PlaceById(id) => area.place_by_id(LetterId(*id)),
            Op::PlaceByChar(ch) => area.place_by_char(*ch),
            Op::PlaceWord(word) => area.place_word(word),
            Op::UnplaceLast => area.unplace_last(),
            Op::UnplaceById(id) => area.unplace_by_id(LetterId(*id)),
            Op::UnplaceAll => area.unplace_all(),
            Op::DiscardAll => area.discard_all(),
            Op::DiscardPlaced => area.discard_placed(),
            Op::PackUp => area.pack_up(),
            Op::Flip => {
                let order = area.stack_order().flipped();
                area.set_stack_order(order)
            }
        }
    }

    proptest! {
        #[test]
        fn pool_operations_conserve_letters(seed in any::<u64>(), ops in proptest::collection::vec(op(), 0..60)) {
            let mut area = PlayArea::new(scrabble_distribution(), 9, Prng::from_seed(seed));
            let total = area.total();
            for op in &ops {
                area = apply(area, op);
                prop_assert_eq!(area.total(), total);
            }
            let mut ids: Vec<_> = area.into_letters().into_iter().map(|l| l.id).collect();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }
}
