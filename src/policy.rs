use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{self, Category, InsuranceProduct};
use crate::error::Result;

/// Policies held entering a wave: at most one per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectedPolicies {
    by_category: BTreeMap<Category, &'static InsuranceProduct>,
}

impl SelectedPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buy `name` if absent, drop it if held. Buying replaces any other
    /// tier already held in the same category.
    pub fn toggled(&self, name: &str) -> Result<Self> {
        let product = catalog::find_by_name(name)?;
        let mut next = self.clone();
        if self.contains(product.name) {
            next.by_category.remove(&product.category);
        } else {
            next.by_category.insert(product.category, product);
        }
        Ok(next)
    }

    /// In-place variant of [`toggled`](Self::toggled); unchanged on error.
    pub fn toggle(&mut self, name: &str) -> Result<()> {
        *self = self.toggled(name)?;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_category.values().any(|p| p.name == name)
    }

    pub fn get(&self, category: Category) -> Option<&'static InsuranceProduct> {
        self.by_category.get(&category).copied()
    }

    /// Held products in category order.
    pub fn iter(&self) -> impl Iterator<Item = &'static InsuranceProduct> + '_ {
        self.by_category.values().copied()
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|p| p.name.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_category.clear();
    }

    /// Premiums owed for every held policy, whether or not it ends up
    /// covering this wave's incident.
    pub fn premium_total(&self) -> i64 {
        self.iter().map(|p| p.premium).sum()
    }
}
