#![allow(dead_code)]

use std::{
    cell::Cell,
    rc::Rc,
};

/// Shared bookkeeping for [`Item`]s: how many are alive and how many more
/// constructions or clones may succeed before one panics.
#[derive(Default)]
pub struct Probe {
    live: Cell<usize>,
    clones: Cell<usize>,
    budget: Cell<Option<usize>>,
}

impl Probe {

    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn live(&self) -> usize {
        self.live.get()
    }

    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    /// Lets `n` more constructions succeed; the next one panics.
    pub fn fail_after(&self, n: usize) {
        self.budget.set(Some(n));
    }

    pub fn never_fail(&self) {
        self.budget.set(None);
    }

    fn spend(&self) {
        match self.budget.get() {
            Some(0) => panic!("probe budget exhausted"),
            Some(n) => self.budget.set(Some(n - 1)),
            None => {},
        }
    }
}

pub struct Item {
    pub value: i32,
    probe: Rc<Probe>,
}

impl Item {

    /// Constructs an item, panicking if the probe's budget is spent.
    pub fn new(probe: &Rc<Probe>, value: i32) -> Self {
        probe.spend();
        probe.live.set(probe.live.get() + 1);
        Self { value, probe: probe.clone() }
    }
}

impl Clone for Item {

    fn clone(&self) -> Self {
        let item = Self::new(&self.probe, self.value);
        self.probe.clones.set(self.probe.clones.get() + 1);
        item
    }
}

impl Drop for Item {

    fn drop(&mut self) {
        self.probe.live.set(self.probe.live.get() - 1);
    }
}

impl core::fmt::Debug for Item {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.value)
    }
}

pub fn values<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<i32> {
    items.into_iter().map(|item| item.value).collect()
}
