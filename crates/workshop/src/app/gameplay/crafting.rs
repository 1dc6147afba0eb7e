//! Carry slot, crafting bench and order queue.

use std::collections::BTreeMap;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{recipe_for, Recipe, ResourceKind, ToyKind};

pub(crate) const MAX_ORDER_CAP: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Carrying {
    Resource(ResourceKind),
    Toy(ToyKind),
}

impl Carrying {
    pub(crate) fn label(self) -> String {
        match self {
            Self::Resource(kind) => kind.to_string(),
            Self::Toy(toy) => toy.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CraftingBench {
    counts: BTreeMap<ResourceKind, u32>,
}

impl CraftingBench {
    pub(crate) fn count(&self, kind: ResourceKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn add(&mut self, kind: ResourceKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Non-zero entries in resource order.
    pub(crate) fn contents(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(kind, count)| (*kind, *count))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.contents().next().is_none()
    }

    pub(crate) fn covers(&self, recipe: &Recipe) -> bool {
        recipe
            .ingredients
            .iter()
            .all(|(kind, needed)| self.count(*kind) >= *needed)
    }

    /// Deducts the whole recipe or nothing.
    pub(crate) fn consume(&mut self, recipe: &Recipe) -> bool {
        if !self.covers(recipe) {
            return false;
        }
        for (kind, needed) in recipe.ingredients {
            if let Some(count) = self.counts.get_mut(kind) {
                *count -= needed;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct OrderId(pub(crate) u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Order {
    pub(crate) id: OrderId,
    pub(crate) toy: ToyKind,
    pub(crate) recipe: &'static Recipe,
}

pub(crate) fn can_craft(order: &Order, bench: &CraftingBench) -> bool {
    bench.covers(order.recipe)
}

#[derive(Debug, Clone)]
pub(crate) struct OrderQueue {
    orders: Vec<Order>,
    max_len: u32,
    next_id: u64,
}

impl OrderQueue {
    pub(crate) fn new(max_len: u32) -> Self {
        Self {
            orders: Vec::new(),
            max_len: max_len.clamp(1, MAX_ORDER_CAP),
            next_id: 1,
        }
    }

    pub(crate) fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub(crate) fn len(&self) -> usize {
        self.orders.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub(crate) fn max_len(&self) -> u32 {
        self.max_len
    }

    pub(crate) fn grow_cap(&mut self) {
        self.max_len = (self.max_len + 1).min(MAX_ORDER_CAP);
    }

    /// Drops every queued order. Ids keep counting so they stay unique for
    /// the whole session.
    pub(crate) fn clear(&mut self) {
        self.orders.clear();
    }

    pub(crate) fn first_craftable(&self, bench: &CraftingBench) -> Option<&Order> {
        self.orders.iter().find(|order| can_craft(order, bench))
    }

    pub(crate) fn remove_first_matching(&mut self, toy: ToyKind) -> Option<Order> {
        let index = self.orders.iter().position(|order| order.toy == toy)?;
        Some(self.orders.remove(index))
    }

    /// Tops the queue up while it has room and the level still needs more
    /// orders than are in flight. Returns the orders added.
    pub(crate) fn replenish<R: Rng + ?Sized>(
        &mut self,
        outstanding_deliveries: u32,
        unlocked: &[ToyKind],
        rng: &mut R,
    ) -> Vec<Order> {
        let mut added = Vec::new();
        while (self.orders.len() as u32) < self.max_len
            && outstanding_deliveries > self.orders.len() as u32
        {
            let Some(toy) = self.pick_toy(unlocked, rng) else {
                break;
            };
            let order = Order {
                id: OrderId(self.next_id),
                toy,
                recipe: recipe_for(toy),
            };
            self.next_id += 1;
            self.orders.push(order);
            added.push(order);
        }
        added
    }

    fn pick_toy<R: Rng + ?Sized>(&self, unlocked: &[ToyKind], rng: &mut R) -> Option<ToyKind> {
        let fresh: Vec<ToyKind> = unlocked
            .iter()
            .copied()
            .filter(|toy| !self.orders.iter().any(|order| order.toy == *toy))
            .collect();
        if fresh.is_empty() {
            unlocked.choose(rng).copied()
        } else {
            fresh.choose(rng).copied()
        }
    }
}

/// Takes one unit from a resource station. Hands must be empty.
pub(crate) fn gather(carrying: &mut Option<Carrying>, kind: ResourceKind) -> bool {
    if carrying.is_some() {
        return false;
    }
    *carrying = Some(Carrying::Resource(kind));
    true
}

/// Moves a carried raw resource onto the bench.
pub(crate) fn deposit(
    carrying: &mut Option<Carrying>,
    bench: &mut CraftingBench,
) -> Option<ResourceKind> {
    let Some(Carrying::Resource(kind)) = *carrying else {
        return None;
    };
    bench.add(kind);
    *carrying = None;
    Some(kind)
}

/// Crafts the first queued order the bench can cover. The order stays queued
/// until delivered.
pub(crate) fn attempt_craft(
    carrying: &mut Option<Carrying>,
    queue: &OrderQueue,
    bench: &mut CraftingBench,
) -> Option<Order> {
    if carrying.is_some() {
        return None;
    }
    let order = *queue.first_craftable(bench)?;
    if !bench.consume(order.recipe) {
        return None;
    }
    *carrying = Some(Carrying::Toy(order.toy));
    Some(order)
}

/// Hands a carried toy to the first matching order and removes only that
/// order.
pub(crate) fn deliver(carrying: &mut Option<Carrying>, queue: &mut OrderQueue) -> Option<Order> {
    let Some(Carrying::Toy(toy)) = *carrying else {
        return None;
    };
    let order = queue.remove_first_matching(toy)?;
    *carrying = None;
    Some(order)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CraftingProgress {
    pub(crate) toy: ToyKind,
    pub(crate) have: u32,
    pub(crate) need: u32,
    pub(crate) missing: Vec<(ResourceKind, u32)>,
}

impl CraftingProgress {
    pub(crate) fn percent(&self) -> u32 {
        if self.need == 0 {
            return 0;
        }
        ((self.have as f32 / self.need as f32) * 100.0).round().min(100.0) as u32
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }

    pub(crate) fn needs_text(&self) -> String {
        if self.is_ready() {
            return "Ready to craft!".to_string();
        }
        let parts: Vec<String> = self
            .missing
            .iter()
            .map(|(kind, qty)| format!("{kind} x{qty}"))
            .collect();
        format!("Needs: {}", parts.join(", "))
    }
}

/// Progress toward the head of the queue, each resource capped at its need.
pub(crate) fn crafting_progress(queue: &OrderQueue, bench: &CraftingBench) -> Option<CraftingProgress> {
    let order = queue.orders().first()?;
    let mut have = 0;
    let mut missing = Vec::new();
    for (kind, needed) in order.recipe.ingredients {
        let on_bench = bench.count(*kind);
        have += on_bench.min(*needed);
        if on_bench < *needed {
            missing.push((*kind, needed - on_bench));
        }
    }
    Some(CraftingProgress {
        toy: order.toy,
        have,
        need: order.recipe.total_units(),
        missing,
    })
}

/// Next resource station worth visiting for the head order, counting the
/// unit already in hand.
pub(crate) fn guidance_target(
    queue: &OrderQueue,
    bench: &CraftingBench,
    carrying: Option<Carrying>,
) -> Option<ResourceKind> {
    let order = queue.orders().first()?;
    order.recipe.ingredients.iter().find_map(|(kind, needed)| {
        let in_hand = u32::from(carrying == Some(Carrying::Resource(*kind)));
        (bench.count(*kind) + in_hand < *needed).then_some(*kind)
    })
}
