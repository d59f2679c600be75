//! Free-text catalog search.
//!
//! A linear scan with a two-tier relevance sort - the catalog is small
//! enough that no index pays for itself, and re-running the scan on every
//! keystroke is within budget. The contract for a settled query string is
//! what matters: the same query over an unchanged catalog always yields
//! the same result in the same order.

use tracing::debug;

use super::Product;

/// Search `products` for a free-text query.
///
/// A product matches if the query (case-insensitive, trimmed) is a
/// substring of its name, description, category, subcategory, or material.
/// The literal query `door` additionally matches subcategory `Doors`, a
/// singular/plural accommodation the substring rule misses.
///
/// Results are ordered by relevance:
/// 1. products whose *name* contains the query,
/// 2. then products whose category or subcategory *equals* the query,
/// 3. ties keep catalog order (stable sort).
///
/// An empty query yields an empty result, not the full catalog.
#[must_use]
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| matches(p, &query))
        .cloned()
        .collect();

    // Vec::sort_by_key is stable, which the tie-break contract relies on.
    results.sort_by_key(|p| rank(p, &query));

    debug!(%query, hits = results.len(), "catalog search");
    results
}

fn matches(product: &Product, query: &str) -> bool {
    let subcategory = product.subcategory.as_str().to_lowercase();
    product.name.to_lowercase().contains(query)
        || product.description.to_lowercase().contains(query)
        || product.category.as_str().to_lowercase().contains(query)
        || subcategory.contains(query)
        || (subcategory == "doors" && query == "door")
        || product.material.to_lowercase().contains(query)
}

/// Relevance key, ascending: `0` sorts before `1` in each tier.
fn rank(product: &Product, query: &str) -> (u8, u8) {
    let name_match = product.name.to_lowercase().contains(query);
    let taxonomy_match = product.category.as_str().eq_ignore_ascii_case(query)
        || product.subcategory.as_str().eq_ignore_ascii_case(query);
    (u8::from(!name_match), u8::from(!taxonomy_match))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::seed::initial_products;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_empty_result() {
        let catalog = initial_products();
        assert!(search(&catalog, "").is_empty());
        assert!(search(&catalog, "   ").is_empty());
    }

    #[test]
    fn test_substring_match_over_all_fields() {
        let catalog = initial_products();

        // name
        assert!(names(&search(&catalog, "window")).contains(&"Sliding UPVC Window"));
        // description
        assert!(names(&search(&catalog, "double glazing")).contains(&"Sliding UPVC Window"));
        // category
        assert!(names(&search(&catalog, "iron")).contains(&"Iron Main Gate"));
        // material
        assert!(names(&search(&catalog, "tempered")).contains(&"Glass Partition"));
    }

    #[test]
    fn test_every_hit_satisfies_the_predicate() {
        let catalog = initial_products();
        for query in ["window", "door", "upvc", "glass", "security"] {
            for p in search(&catalog, query) {
                assert!(
                    matches(&p, query),
                    "{} does not match {query}",
                    p.name
                );
            }
        }
    }

    #[test]
    fn test_door_matches_doors_subcategory() {
        // "ABS Bathroom Door" matches "door" by name; "Steel Security
        // Door" too. The special case is products of subcategory Doors
        // whose text fields never contain the singular form - build one.
        let mut catalog = initial_products();
        let mut plain = catalog[0].clone();
        plain.id = fenestra_core::ProductId::new("x");
        plain.name = "Teak Entryway Panel".to_owned();
        plain.description = "Solid teak panel".to_owned();
        plain.material = "Teak".to_owned();
        plain.category = fenestra_core::Category::Steel;
        plain.subcategory = fenestra_core::Subcategory::Doors;
        catalog.push(plain);

        let hits = search(&catalog, "door");
        assert!(names(&hits).contains(&"Teak Entryway Panel"));
    }

    #[test]
    fn test_name_matches_rank_first() {
        let catalog = initial_products();
        let hits = search(&catalog, "door");

        let first_non_name = hits
            .iter()
            .position(|p| !p.name.to_lowercase().contains("door"));
        if let Some(boundary) = first_non_name {
            assert!(
                hits[boundary..]
                    .iter()
                    .all(|p| !p.name.to_lowercase().contains("door")),
                "a name match appeared after a non-name match"
            );
        }
    }

    #[test]
    fn test_exact_taxonomy_match_breaks_ties() {
        // Neither name contains "grill", so tier 1 ties; the product whose
        // subcategory equals the query must come first despite sitting
        // later in catalog order.
        let mut by_description = initial_products()[0].clone();
        by_description.id = fenestra_core::ProductId::new("a");
        by_description.name = "Mesh Safety Panel".to_owned();
        by_description.description = "Panel with integrated grill pattern".to_owned();
        by_description.subcategory = fenestra_core::Subcategory::Partitions;

        let mut by_subcategory = initial_products()[0].clone();
        by_subcategory.id = fenestra_core::ProductId::new("b");
        by_subcategory.name = "Window Safety Mesh".to_owned();
        by_subcategory.description = "Powder-coated safety mesh".to_owned();
        by_subcategory.subcategory = fenestra_core::Subcategory::Grill;

        let hits = search(&[by_description, by_subcategory], "grill");
        assert_eq!(names(&hits), vec!["Window Safety Mesh", "Mesh Safety Panel"]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let catalog = initial_products();
        let a = search(&catalog, "door");
        let b = search(&catalog, "door");
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = initial_products();
        // both "upvc" hits match by name, so both tiers tie and catalog
        // order must be preserved
        let hits = search(&catalog, "upvc");
        let sliding = hits.iter().position(|p| p.name == "Sliding UPVC Window");
        let french = hits.iter().position(|p| p.name == "UPVC French Door");
        assert!(sliding.unwrap() < french.unwrap());
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let catalog = initial_products();
        assert!(search(&catalog, "mahogany").is_empty());
    }
}
