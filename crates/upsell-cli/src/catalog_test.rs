use upsell_catalog::CatalogError;
use upsell_core::{Price, Variant};
use upsell_store::MemorySessionStorage;

use super::*;

struct StaticCatalog(Vec<CatalogItem>);

impl CatalogSource for StaticCatalog {
    async fn search(&self, _term: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.0.clone())
    }
}

struct DownCatalog;

impl CatalogSource for DownCatalog {
    async fn search(&self, _term: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        Err(CatalogError::Unauthorized { status: 401 })
    }
}

fn catalog() -> StaticCatalog {
    StaticCatalog(vec![CatalogItem {
        id: 77,
        title: "Desk Lamp".to_string(),
        image: None,
        variants: [1, 2, 3]
            .into_iter()
            .map(|id| Variant {
                id,
                product_id: Some(77),
                title: format!("Finish {id}"),
                price: Price::new("30.00"),
            })
            .collect(),
    }])
}

fn selected(store: &Store<MemorySessionStorage>, slot: usize) -> Option<Vec<i64>> {
    store
        .state()
        .slot(slot)?
        .product
        .as_ref()
        .map(|p| p.selected_variants.clone())
}

#[tokio::test]
async fn pick_keeps_all_variants_by_default() {
    let mut store = Store::new(MemorySessionStorage::new());
    run_pick(&mut store, &catalog(), 0, 77, &[]).await.unwrap();
    assert_eq!(selected(&store, 0), Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn pick_narrows_to_given_variants_in_order() {
    let mut store = Store::new(MemorySessionStorage::new());
    run_pick(&mut store, &catalog(), 0, 77, &[3, 1]).await.unwrap();
    assert_eq!(selected(&store, 0), Some(vec![3, 1]));
}

#[tokio::test]
async fn repicking_same_product_keeps_it_staged() {
    let mut store = Store::new(MemorySessionStorage::new());
    run_pick(&mut store, &catalog(), 0, 77, &[2]).await.unwrap();
    run_pick(&mut store, &catalog(), 0, 77, &[]).await.unwrap();
    assert_eq!(selected(&store, 0), Some(vec![2]));
}

#[tokio::test]
async fn pick_unknown_product_fails() {
    let mut store = Store::new(MemorySessionStorage::new());
    let result = run_pick(&mut store, &catalog(), 0, 5, &[]).await;
    assert!(result.is_err());
    assert!(store.state().slots()[0].is_empty());
}

#[tokio::test]
async fn pick_fails_when_catalog_is_down() {
    let mut store = Store::new(MemorySessionStorage::new());
    let err = run_pick(&mut store, &DownCatalog, 0, 77, &[])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("catalog search failed"));
}

#[tokio::test]
async fn search_reports_failure() {
    let mut store = Store::new(MemorySessionStorage::new());
    assert!(run_search(&mut store, &DownCatalog, "lamp").await.is_err());
    assert!(run_search(&mut store, &catalog(), "lamp").await.is_ok());
    assert_eq!(store.state().items().len(), 1);
}

/// Finds the lamp only when asked for it by name.
struct TermCatalog;

impl CatalogSource for TermCatalog {
    async fn search(&self, term: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        if term == "lamp" {
            Ok(catalog().0)
        } else {
            Ok(Vec::new())
        }
    }
}

#[tokio::test]
async fn searched_term_carries_over_to_next_pick() {
    let mut store = Store::new(MemorySessionStorage::new());
    run_search(&mut store, &TermCatalog, "lamp").await.unwrap();

    let mut store = Store::hydrate(store.into_storage());
    assert_eq!(store.state().search_term(), "lamp");

    run_pick(&mut store, &TermCatalog, 0, 77, &[]).await.unwrap();
    assert_eq!(selected(&store, 0), Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn repeated_variant_flag_counts_once() {
    let mut store = Store::new(MemorySessionStorage::new());
    run_pick(&mut store, &catalog(), 0, 77, &[1, 1]).await.unwrap();
    assert_eq!(selected(&store, 0), Some(vec![1]));

    run_pick(&mut store, &catalog(), 0, 77, &[3, 2, 3]).await.unwrap();
    assert_eq!(selected(&store, 0), Some(vec![3, 2]));
}
