//! Local product cache - the "lite" projection of the remote catalog
//!
//! Keyed by the client-chosen product id, the cache holds only the fields
//! needed to (a) answer existence checks without a network round trip,
//! (b) supply the remote ids and version token for update/delete calls,
//! and (c) serve paginated listing locally. Full field values always come
//! from the remote catalog.
//!
//! An entry exists only while the remote pair exists: it is inserted
//! after a successful remote create, replaced wholesale after a
//! successful update (the version token changes atomically with any
//! field change and must never be synthesized locally), and removed only
//! after the remote delete succeeds.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Page, ProductType, SortField, SortOrder};

/// Cached projection of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteProduct {
    /// Client-chosen id; primary key of the cache.
    pub client_product_id: String,
    /// Remote catalog item id.
    pub item_id: String,
    /// Remote catalog variation id.
    pub variation_id: String,
    /// Normalized (trimmed, uppercased) product name.
    pub name: String,
    pub product_type: ProductType,
    pub cost_in_cents: i64,
    /// Optimistic concurrency token from the last remote response.
    pub version: i64,
}

/// In-memory keyed store of [`LiteProduct`] entries.
#[derive(Debug, Clone, Default)]
pub struct ProductCache {
    entries: Arc<RwLock<HashMap<String, LiteProduct>>>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point lookup by client product id.
    pub fn get(&self, client_product_id: &str) -> Option<LiteProduct> {
        self.entries.read().get(client_product_id).cloned()
    }

    /// Insert or replace an entry, keyed by its client product id.
    pub fn put(&self, entry: LiteProduct) {
        self.entries
            .write()
            .insert(entry.client_product_id.clone(), entry);
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&self, client_product_id: &str) -> Option<LiteProduct> {
        self.entries.write().remove(client_product_id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Paginated, sorted full scan. Served entirely from the cache; the
    /// remote catalog is never consulted for listing.
    pub fn list(
        &self,
        page: usize,
        page_size: usize,
        sort_by: SortField,
        order: SortOrder,
    ) -> Page<LiteProduct> {
        let mut items: Vec<LiteProduct> = self.entries.read().values().cloned().collect();

        match sort_by {
            SortField::ClientProductId => items.sort_by(|a, b| {
                a.client_product_id.cmp(&b.client_product_id)
            }),
            SortField::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
            SortField::ProductType => {
                items.sort_by(|a, b| a.product_type.as_str().cmp(b.product_type.as_str()))
            }
            SortField::CostInCents => items.sort_by_key(|p| p.cost_in_cents),
        }
        if order == SortOrder::Desc {
            items.reverse();
        }

        let total = items.len();
        let page_size = page_size.max(1);
        // page and page_size come straight from the query string; an
        // out-of-range product saturates to an empty page instead of
        // overflowing.
        let items = items
            .into_iter()
            .skip(page.saturating_mul(page_size))
            .take(page_size)
            .collect();

        Page {
            items,
            page,
            page_size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, cost: i64) -> LiteProduct {
        LiteProduct {
            client_product_id: id.to_string(),
            item_id: format!("ITEM-{id}"),
            variation_id: format!("VAR-{id}"),
            name: name.to_string(),
            product_type: ProductType::Flower,
            cost_in_cents: cost,
            version: 1,
        }
    }

    fn seeded() -> ProductCache {
        let cache = ProductCache::new();
        cache.put(entry("P3", "CHERRY", 1500));
        cache.put(entry("P1", "APPLE", 3000));
        cache.put(entry("P2", "BANANA", 500));
        cache
    }

    #[test]
    fn put_replaces_existing_entry() {
        let cache = ProductCache::new();
        cache.put(entry("P1", "APPLE", 3000));
        let mut replaced = entry("P1", "APPLE", 3500);
        replaced.version = 2;
        cache.put(replaced.clone());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("P1"), Some(replaced));
    }

    #[test]
    fn list_sorts_by_allowed_field() {
        let cache = seeded();

        let by_name = cache.list(0, 10, SortField::Name, SortOrder::Asc);
        let names: Vec<&str> = by_name.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["APPLE", "BANANA", "CHERRY"]);

        let by_cost_desc = cache.list(0, 10, SortField::CostInCents, SortOrder::Desc);
        let costs: Vec<i64> = by_cost_desc.items.iter().map(|p| p.cost_in_cents).collect();
        assert_eq!(costs, [3000, 1500, 500]);
    }

    #[test]
    fn list_paginates() {
        let cache = seeded();

        let first = cache.list(0, 2, SortField::ClientProductId, SortOrder::Asc);
        assert_eq!(first.total, 3);
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].client_product_id, "P1");

        let second = cache.list(1, 2, SortField::ClientProductId, SortOrder::Asc);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].client_product_id, "P3");

        let past_end = cache.list(5, 2, SortField::ClientProductId, SortOrder::Asc);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 3);
    }

    #[test]
    fn list_survives_huge_page_indexes() {
        let cache = seeded();

        let page = cache.list(usize::MAX, 20, SortField::ClientProductId, SortOrder::Asc);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);

        let page = cache.list(usize::MAX, usize::MAX, SortField::Name, SortOrder::Desc);
        assert!(page.items.is_empty());
    }
}
