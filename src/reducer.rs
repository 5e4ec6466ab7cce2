//! Commutative monoids used to merge the results of concurrent subtasks.
//!
//! Every parallel fan-out in the engine goes through [`fan_out`], which
//! spawns one task per item on the rayon pool and folds the task results with
//! a [`Monoid`]. Because each instance below is associative and commutative
//! with a true identity, the result never depends on how rayon splits or
//! schedules the work and always equals [`fold_seq`] over the same items.

use std::marker::PhantomData;

use rayon::prelude::*;

use crate::board::bit_index;
use crate::types::Move;

/// Lower than any reachable score, with room to negate safely.
pub const SCORE_FLOOR: i32 = -10_000;

pub trait Monoid {
    type Value: Send;

    fn identity() -> Self::Value;

    /// Must be associative and commutative.
    fn combine(a: Self::Value, b: Self::Value) -> Self::Value;
}

/// Addition of flip and move counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl Monoid for Sum {
    type Value = u32;

    fn identity() -> u32 {
        0
    }

    fn combine(a: u32, b: u32) -> u32 {
        a + b
    }
}

/// Union of square masks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitOr;

impl Monoid for BitOr {
    type Value = u64;

    fn identity() -> u64 {
        0
    }

    fn combine(a: u64, b: u64) -> u64 {
        a | b
    }
}

/// Maximum score, seeded at [`SCORE_FLOOR`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl Monoid for Max {
    type Value = i32;

    fn identity() -> i32 {
        SCORE_FLOOR
    }

    fn combine(a: i32, b: i32) -> i32 {
        a.max(b)
    }
}

/// A score together with the move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub score: i32,
    pub mv: Option<Move>,
}

impl Scored {
    /// Total order used by [`BestOf`]: higher score wins, then the square
    /// that comes first in row-major order, then any move over none.
    fn key(&self) -> (i32, u32) {
        let rank = match self.mv {
            Some(mv) => bit_index(mv.row, mv.col) + 1,
            None => 0,
        };
        (self.score, rank)
    }
}

/// Max-with-argmax. Score and move are replaced together in one combine,
/// so a reader never sees a score paired with another branch's move.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestOf;

impl Monoid for BestOf {
    type Value = Scored;

    fn identity() -> Scored {
        Scored {
            score: SCORE_FLOOR,
            mv: None,
        }
    }

    fn combine(a: Scored, b: Scored) -> Scored {
        if b.key() > a.key() { b } else { a }
    }
}

/// Two reducers running side by side over the same fan-out.
impl<A: Monoid, B: Monoid> Monoid for (A, B) {
    type Value = (A::Value, B::Value);

    fn identity() -> Self::Value {
        (A::identity(), B::identity())
    }

    fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
        (A::combine(a.0, b.0), B::combine(a.1, b.1))
    }
}

/// A partial result owned by one task. Its value can only be taken by
/// consuming it, after every contribution has been merged in.
pub struct Accumulator<M: Monoid> {
    value: M::Value,
    _monoid: PhantomData<fn() -> M>,
}

impl<M: Monoid> Accumulator<M> {
    pub fn new() -> Self {
        Self {
            value: M::identity(),
            _monoid: PhantomData,
        }
    }

    pub fn push(mut self, item: M::Value) -> Self {
        self.value = M::combine(self.value, item);
        self
    }

    pub fn merge(self, other: Self) -> Self {
        self.push(other.value)
    }

    pub fn into_value(self) -> M::Value {
        self.value
    }
}

impl<M: Monoid> Default for Accumulator<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `task` on every item as concurrent rayon tasks and returns the
/// combined result once all of them have joined.
pub fn fan_out<M, I, F>(items: I, task: F) -> M::Value
where
    M: Monoid,
    I: IntoParallelIterator,
    F: Fn(I::Item) -> M::Value + Sync + Send,
{
    items
        .into_par_iter()
        .fold(Accumulator::<M>::new, |acc, item| acc.push(task(item)))
        .reduce(Accumulator::new, Accumulator::merge)
        .into_value()
}

/// Left-to-right sequential fold; the reference result for [`fan_out`].
pub fn fold_seq<M, I, F>(items: I, task: F) -> M::Value
where
    M: Monoid,
    I: IntoIterator,
    F: Fn(I::Item) -> M::Value,
{
    items
        .into_iter()
        .fold(Accumulator::<M>::new(), |acc, item| acc.push(task(item)))
        .into_value()
}
