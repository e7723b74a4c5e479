use std::fmt;

use serde::Serialize;

use crate::error::{GameError, Result};
use crate::types::Loss;

/// Incident class a product insures against. Scenarios carry the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    HomeFortification,
    MedicalTreatment,
    SupplyProtection,
    EvacuationCoverage,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::HomeFortification,
        Category::MedicalTreatment,
        Category::SupplyProtection,
        Category::EvacuationCoverage,
    ];
}

/// Quality level within a category. Ordered Basic < Standard < Premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Basic,
    Standard,
    Premium,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Standard, Tier::Premium];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Basic => "Basic",
            Tier::Standard => "Standard",
            Tier::Premium => "Premium",
        };
        f.write_str(s)
    }
}

/// A purchasable policy. Catalog entries are constants and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InsuranceProduct {
    pub name: &'static str,
    pub category: Category,
    pub tier: Tier,
    /// Paid up front every round the policy is held.
    pub premium: i64,
    /// Owed in full on any claim, on top of the uncovered residual.
    pub deductible: i64,
    /// Percentage (0–100) of the base loss reimbursed.
    pub coverage_percent: u8,
    /// Loss suffered by this category's incident with no cover.
    pub base_loss_if_uninsured: Loss,
    pub description: &'static str,
    pub coverage_description: &'static str,
}

impl InsuranceProduct {
    /// Money owed when this policy answers a claim: deductible plus the
    /// uncovered share of the base loss.
    pub fn claim_cost(&self) -> i64 {
        self.deductible + self.base_loss_if_uninsured.uncovered(self.coverage_percent).money
    }

    /// Health lost when this policy answers a claim.
    pub fn health_lost(&self) -> i64 {
        self.base_loss_if_uninsured.uncovered(self.coverage_percent).health
    }
}

const HOME_LOSS: Loss = Loss { money: 1500, health: 10 };
const MEDICAL_LOSS: Loss = Loss { money: 1000, health: 20 };
const SUPPLY_LOSS: Loss = Loss { money: 2000, health: 15 };
const EVACUATION_LOSS: Loss = Loss { money: 2500, health: 25 };

// ── Product table ─────────────────────────────────────────────────────────────
// Display order: category, then tier ascending.

static CATALOG: [InsuranceProduct; 12] = [
    // Home fortification
    InsuranceProduct {
        name: "Basic Home Fortification",
        category: Category::HomeFortification,
        tier: Tier::Basic,
        premium: 300,
        deductible: 200,
        coverage_percent: 50,
        base_loss_if_uninsured: HOME_LOSS,
        description: "Basic protection against zombie break-ins",
        coverage_description: "Covers 50% of damages after deductible",
    },
    InsuranceProduct {
        name: "Standard Home Fortification",
        category: Category::HomeFortification,
        tier: Tier::Standard,
        premium: 500,
        deductible: 150,
        coverage_percent: 75,
        base_loss_if_uninsured: HOME_LOSS,
        description: "Enhanced protection with reinforced barriers",
        coverage_description: "Covers 75% of damages after deductible",
    },
    InsuranceProduct {
        name: "Premium Home Fortification",
        category: Category::HomeFortification,
        tier: Tier::Premium,
        premium: 800,
        deductible: 100,
        coverage_percent: 90,
        base_loss_if_uninsured: HOME_LOSS,
        description: "Military-grade fortification system",
        coverage_description: "Covers 90% of damages after deductible",
    },
    // Medical treatment
    InsuranceProduct {
        name: "Basic Zombie Bite Treatment",
        category: Category::MedicalTreatment,
        tier: Tier::Basic,
        premium: 200,
        deductible: 100,
        coverage_percent: 50,
        base_loss_if_uninsured: MEDICAL_LOSS,
        description: "Basic medical coverage for zombie-related injuries",
        coverage_description: "Covers 50% of medical costs after deductible",
    },
    InsuranceProduct {
        name: "Standard Zombie Bite Treatment",
        category: Category::MedicalTreatment,
        tier: Tier::Standard,
        premium: 400,
        deductible: 75,
        coverage_percent: 75,
        base_loss_if_uninsured: MEDICAL_LOSS,
        description: "Enhanced medical coverage with better treatments",
        coverage_description: "Covers 75% of medical costs after deductible",
    },
    InsuranceProduct {
        name: "Premium Zombie Bite Treatment",
        category: Category::MedicalTreatment,
        tier: Tier::Premium,
        premium: 600,
        deductible: 50,
        coverage_percent: 90,
        base_loss_if_uninsured: MEDICAL_LOSS,
        description: "Top-tier medical coverage with experimental treatments",
        coverage_description: "Covers 90% of medical costs after deductible",
    },
    // Supply protection
    InsuranceProduct {
        name: "Basic Supply Protection",
        category: Category::SupplyProtection,
        tier: Tier::Basic,
        premium: 400,
        deductible: 300,
        coverage_percent: 50,
        base_loss_if_uninsured: SUPPLY_LOSS,
        description: "Basic coverage for supply losses",
        coverage_description: "Covers 50% of supply losses after deductible",
    },
    InsuranceProduct {
        name: "Standard Supply Protection",
        category: Category::SupplyProtection,
        tier: Tier::Standard,
        premium: 600,
        deductible: 200,
        coverage_percent: 75,
        base_loss_if_uninsured: SUPPLY_LOSS,
        description: "Enhanced coverage with security systems",
        coverage_description: "Covers 75% of supply losses after deductible",
    },
    InsuranceProduct {
        name: "Premium Supply Protection",
        category: Category::SupplyProtection,
        tier: Tier::Premium,
        premium: 900,
        deductible: 100,
        coverage_percent: 90,
        base_loss_if_uninsured: SUPPLY_LOSS,
        description: "Maximum security for your supplies",
        coverage_description: "Covers 90% of supply losses after deductible",
    },
    // Evacuation coverage
    InsuranceProduct {
        name: "Basic Evacuation Coverage",
        category: Category::EvacuationCoverage,
        tier: Tier::Basic,
        premium: 500,
        deductible: 250,
        coverage_percent: 50,
        base_loss_if_uninsured: EVACUATION_LOSS,
        description: "Basic evacuation assistance",
        coverage_description: "Covers 50% of evacuation costs after deductible",
    },
    InsuranceProduct {
        name: "Standard Evacuation Coverage",
        category: Category::EvacuationCoverage,
        tier: Tier::Standard,
        premium: 800,
        deductible: 175,
        coverage_percent: 75,
        base_loss_if_uninsured: EVACUATION_LOSS,
        description: "Enhanced evacuation with better transport",
        coverage_description: "Covers 75% of evacuation costs after deductible",
    },
    InsuranceProduct {
        name: "Premium Evacuation Coverage",
        category: Category::EvacuationCoverage,
        tier: Tier::Premium,
        premium: 1200,
        deductible: 100,
        coverage_percent: 90,
        base_loss_if_uninsured: EVACUATION_LOSS,
        description: "VIP evacuation with helicopter transport",
        coverage_description: "Covers 90% of evacuation costs after deductible",
    },
];

/// Every product in stable display order.
pub fn list_products() -> &'static [InsuranceProduct] {
    &CATALOG
}

/// Resolve a player's selection string back to its catalog entry.
pub fn find_by_name(name: &str) -> Result<&'static InsuranceProduct> {
    CATALOG
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| GameError::UnknownProduct(name.to_string()))
}

/// The catalog entry for a (category, tier) pair. Total over the fixed table.
pub fn product(category: Category, tier: Tier) -> &'static InsuranceProduct {
    CATALOG
        .iter()
        .find(|p| p.category == category && p.tier == tier)
        .unwrap_or_else(|| unreachable!("catalog has every (category, tier) pair"))
}

/// Products of one category, Basic first.
pub fn products_in(category: Category) -> impl Iterator<Item = &'static InsuranceProduct> {
    CATALOG.iter().filter(move |p| p.category == category)
}

/// The Basic-tier entry, whose loss figures are the uninsured benchmark.
pub fn baseline_for(category: Category) -> &'static InsuranceProduct {
    product(category, Tier::Basic)
}

/// Among `selected`, the product covering `category`. Several candidates can
/// only arise from a malformed selection; the highest coverage wins, then the
/// highest premium.
pub fn best_match<'a, I>(category: Category, selected: I) -> Option<&'a InsuranceProduct>
where
    I: IntoIterator<Item = &'a InsuranceProduct>,
{
    selected
        .into_iter()
        .filter(|p| p.category == category)
        .max_by_key(|p| (p.coverage_percent, p.premium))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn twelve_products_with_unique_names() {
        let names: HashSet<&str> = list_products().iter().map(|p| p.name).collect();
        assert_eq!(list_products().len(), 12);
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn one_product_per_category_and_tier() {
        for category in Category::ALL {
            for tier in Tier::ALL {
                let n = list_products()
                    .iter()
                    .filter(|p| p.category == category && p.tier == tier)
                    .count();
                assert_eq!(n, 1, "{category:?}/{tier} appears {n} times");
            }
        }
    }

    #[test]
    fn tiers_strictly_ordered_within_category() {
        for category in Category::ALL {
            let tiers: Vec<&InsuranceProduct> = products_in(category).collect();
            assert_eq!(tiers.len(), 3);
            for pair in tiers.windows(2) {
                let (lo, hi) = (pair[0], pair[1]);
                assert!(lo.tier < hi.tier);
                assert!(hi.premium > lo.premium, "{} premium", hi.name);
                assert!(hi.deductible < lo.deductible, "{} deductible", hi.name);
                assert!(hi.coverage_percent > lo.coverage_percent, "{} coverage", hi.name);
            }
        }
    }

    #[test]
    fn base_loss_shared_within_category() {
        for category in Category::ALL {
            let baseline = baseline_for(category).base_loss_if_uninsured;
            assert!(products_in(category).all(|p| p.base_loss_if_uninsured == baseline));
        }
    }

    #[test]
    fn find_by_name_hits_and_misses() {
        let p = find_by_name("Premium Home Fortification").unwrap();
        assert_eq!(p.category, Category::HomeFortification);
        assert_eq!(p.tier, Tier::Premium);
        assert_eq!(p.premium, 800);

        assert_eq!(
            find_by_name("Home Fortification"),
            Err(GameError::UnknownProduct("Home Fortification".to_string()))
        );
    }

    #[test]
    fn baseline_is_basic_tier() {
        let b = baseline_for(Category::EvacuationCoverage);
        assert_eq!(b.name, "Basic Evacuation Coverage");
        assert_eq!(b.base_loss_if_uninsured, Loss { money: 2500, health: 25 });
    }

    #[test]
    fn best_match_filters_by_category() {
        let held = [
            product(Category::MedicalTreatment, Tier::Premium),
            product(Category::SupplyProtection, Tier::Basic),
        ];
        assert!(best_match(Category::HomeFortification, held).is_none());
        let m = best_match(Category::SupplyProtection, held).unwrap();
        assert_eq!(m.name, "Basic Supply Protection");
    }

    #[test]
    fn best_match_prefers_highest_coverage() {
        let held = [
            product(Category::HomeFortification, Tier::Standard),
            product(Category::HomeFortification, Tier::Premium),
            product(Category::HomeFortification, Tier::Basic),
        ];
        let m = best_match(Category::HomeFortification, held).unwrap();
        assert_eq!(m.tier, Tier::Premium);
    }

    #[test]
    fn best_match_breaks_coverage_ties_on_premium() {
        let cheap = product(Category::HomeFortification, Tier::Standard);
        let dear = InsuranceProduct { premium: cheap.premium + 1, ..cheap.clone() };
        let held = [cheap, &dear];
        let m = best_match(Category::HomeFortification, held).unwrap();
        assert_eq!(m.premium, dear.premium);
    }

    #[test]
    fn premium_home_claim_terms() {
        let p = find_by_name("Premium Home Fortification").unwrap();
        assert_eq!(p.claim_cost(), 250);
        assert_eq!(p.health_lost(), 1);
    }
}
