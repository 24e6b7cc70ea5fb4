//! Macro-generated test suite for `OrderRepository + CatalogRepository`
//! contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//!
//! use repository_harness::*;
//! use order_desk::storage::InMemoryStore;
//!
//! order_repository_tests!(InMemoryStore::with_items(catalog()));
//! ```
//!
//! # Generated Tests
//!
//! ## Orders
//! - `test_insert_and_get`: insert then retrieve with resolved items and line ids
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_list_empty`: no orders stored
//! - `test_list_in_id_order`: list returns every order, ascending ids
//! - `test_ids_are_distinct`: every insert gets a fresh id
//! - `test_update_replaces_lines`: name and lines replaced, date kept
//! - `test_update_nonexistent`: zero rows
//! - `test_delete_cascades`: order and its lines gone
//! - `test_delete_nonexistent`: zero rows
//!
//! ## Catalog
//! - `test_item_scopes`: inactive items only visible to `ItemScope::All`
//!
//! ## Concurrency
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate the repository conformance suite.
///
/// `$factory` must evaluate to a store seeded with [`catalog`] that
/// implements both repository traits. It is re-evaluated for each test. For
/// the concurrency test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! order_repository_tests {
    ($factory:expr) => {
        mod order_repository_contract_tests {
            use super::*;
            use order_desk::prelude::*;

            // ==================================================================
            // Orders
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let order = new_order("Alice", &[(WIDGET, 3), (GADGET, 1)]);
                let order_date = order.order_date;

                let inserted = store.insert_order(order).await.unwrap();
                assert!(inserted.rows_affected > 0);

                let stored = store.get_order(inserted.order_id).await.unwrap().unwrap();
                assert_eq!(stored.order_id, inserted.order_id);
                assert_eq!(stored.customer_name, "Alice");
                assert_eq!(stored.order_date, order_date);
                assert_eq!(stored.status, OrderStatus::Pending);
                assert_eq!(stored.line_items.len(), 2);
                let stored_ids: Vec<_> =
                    stored.line_items.iter().map(|line| line.line_item_id).collect();
                assert_eq!(stored_ids, inserted.line_item_ids);
                assert_eq!(
                    stored.line_items[0].item.as_ref().map(|i| i.product_name.as_str()),
                    Some("Widget")
                );
                assert_eq!(stored.total_amount(), Decimal::new(3250, 2));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get_order(9_999).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list_orders().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_in_id_order() {
                let store = $factory;
                let ids = seed_orders(
                    &store,
                    vec![
                        new_order("Alice", &[(WIDGET, 1)]),
                        new_order("Bob", &[]),
                        new_order("Carol", &[(GIZMO, 10)]),
                    ],
                )
                .await;

                let orders = store.list_orders().await.unwrap();
                assert_eq!(order_ids(&orders), ids);
                assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
                assert!(orders[2].line_items[0].item.is_some());
            }

            #[tokio::test]
            async fn test_ids_are_distinct() {
                let store = $factory;
                let ids = seed_orders(
                    &store,
                    (0..5).map(|i| new_order(&format!("Customer {}", i), &[])).collect(),
                )
                .await;

                let mut unique = ids.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), 5);
            }

            #[tokio::test]
            async fn test_update_replaces_lines() {
                let store = $factory;
                let ids =
                    seed_orders(&store, vec![new_order("Alice", &[(WIDGET, 1), (GADGET, 1)])]).await;

                let mut order = store.get_order(ids[0]).await.unwrap().unwrap();
                let order_date = order.order_date;
                order.customer_name = "Alice Cooper".to_string();
                order.line_items = vec![LineItem::new(catalog_item(GIZMO), 7)];

                let rows = store.update_order(&order).await.unwrap();
                assert!(rows > 0);

                let stored = store.get_order(ids[0]).await.unwrap().unwrap();
                assert_eq!(stored.customer_name, "Alice Cooper");
                assert_eq!(stored.order_date, order_date);
                assert_eq!(stored.line_items.len(), 1);
                assert_eq!(stored.line_items[0].item_id, GIZMO);
                assert_eq!(stored.line_items[0].quantity, 7);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let ghost = Order {
                    order_id: 9_999,
                    customer_name: "Nobody".to_string(),
                    order_date: Utc::now(),
                    status: OrderStatus::Pending,
                    line_items: vec![],
                };

                assert_eq!(store.update_order(&ghost).await.unwrap(), 0);
                assert!(store.get_order(9_999).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_cascades() {
                let store = $factory;
                let ids = seed_orders(
                    &store,
                    vec![
                        new_order("Alice", &[(WIDGET, 1), (GADGET, 1)]),
                        new_order("Bob", &[(WIDGET, 2)]),
                    ],
                )
                .await;

                let rows = store.delete_order(ids[0]).await.unwrap();
                assert_eq!(rows, 3);

                assert!(store.get_order(ids[0]).await.unwrap().is_none());
                let remaining = store.list_orders().await.unwrap();
                assert_eq!(order_ids(&remaining), vec![ids[1]]);
                assert_eq!(remaining[0].line_items.len(), 1);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                assert_eq!(store.delete_order(9_999).await.unwrap(), 0);
            }

            // ==================================================================
            // Catalog
            // ==================================================================

            #[tokio::test]
            async fn test_item_scopes() {
                let store = $factory;

                let all = store.list_items(ItemScope::All).await.unwrap();
                let active = store.list_items(ItemScope::ActiveOnly).await.unwrap();
                assert_eq!(all.len(), catalog().len());
                assert_eq!(active.len(), catalog().len() - 1);
                assert!(active.iter().all(|item| item.is_active));

                assert!(store.get_item(RETIRED, ItemScope::All).await.unwrap().is_some());
                assert!(store.get_item(RETIRED, ItemScope::ActiveOnly).await.unwrap().is_none());
                assert!(store.get_item(9_999, ItemScope::All).await.unwrap().is_none());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert_order(new_order(&format!("Customer {}", i), &[(GIZMO, 1)]))
                            .await
                            .unwrap()
                            .order_id
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap());
                }
                ids.sort();
                ids.dedup();

                assert_eq!(ids.len(), 10);
                assert_eq!(store.list_orders().await.unwrap().len(), 10);
            }
        }
    };
}
