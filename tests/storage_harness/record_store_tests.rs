//! Macro-generated test suite for `RecordStore<TestPerson>` contract validation.
//!
//! The `record_store_tests!` macro generates a test module that validates any
//! `RecordStore<TestPerson>` implementation against the full contract: CRUD,
//! every filter operator, OR-substring mode, ordering, pagination and
//! concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use crudbase::storage::InMemoryRecordStore;
//!
//! record_store_tests!(InMemoryRecordStore::<TestPerson>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_find_one` / `test_find_one_nonexistent`
//! - `test_insert_duplicate_id`: second insert with the same id fails
//! - `test_update_merges_fields` / `test_update_nonexistent`
//! - `test_delete_existing` / `test_delete_nonexistent` / `test_delete_many`
//!
//! ## Find
//! - Full set, pagination, pages past the end
//! - One test per operator (`eq`, `neq`, `gt`, `lt`, `egt`, `elt`, `like`, `isNull`, `notNull`)
//! - `like` / `orlike` needles used verbatim, even when they read as dates or UUIDs
//! - `neq` against a value of another kind
//! - `orlike` across columns, suppression of AND clauses
//! - Last-write-wins on duplicate fields, unrecognized operators ignored
//! - Ascending and descending order
//!
//! ## Edge Cases
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `RecordStore<TestPerson>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance implementing
/// `RecordStore<TestPerson> + Clone + 'static`. It is re-evaluated for each
/// test to ensure isolation (it may contain `.await`).
#[macro_export]
macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use crudbase::core::field::FieldValue;
            use crudbase::core::query::{Operator, SearchRequest, StoreFilter};
            use crudbase::core::store::RecordStore;
            use uuid::Uuid;

            async fn seed<S: RecordStore<TestPerson>>(store: &S) -> Vec<TestPerson> {
                let people = sample_people();
                for person in &people {
                    store.insert(person).await.unwrap();
                }
                people
            }

            async fn find<S: RecordStore<TestPerson>>(
                store: &S,
                request: SearchRequest,
            ) -> (Vec<TestPerson>, u64) {
                let filter = StoreFilter::from_request(&request, true);
                store.find_and_count(&filter).await.unwrap()
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find_one() {
                let store = $factory;
                let person = create_person("Alice", "alice@test.com", 30, 4.5, true);

                store.insert(&person).await.unwrap();

                let found = store.find_one(&person.id).await.unwrap();
                assert_eq!(found, Some(person));
            }

            #[tokio::test]
            async fn test_find_one_nonexistent() {
                let store = $factory;
                let found = store.find_one(&Uuid::new_v4()).await.unwrap();
                assert!(found.is_none());
            }

            #[tokio::test]
            async fn test_insert_duplicate_id() {
                let store = $factory;
                let person = create_person("Alice", "alice@test.com", 30, 4.5, true);

                store.insert(&person).await.unwrap();
                assert!(store.insert(&person).await.is_err());
            }

            #[tokio::test]
            async fn test_update_merges_fields() {
                let store = $factory;
                let person = create_nicknamed("Alice", "Ally", 30);
                store.insert(&person).await.unwrap();

                let mut patch = create_person("Alicia", "alicia@test.com", 31, 1.5, false);
                patch.nickname = None;
                store.update(&person.id, patch).await.unwrap();

                let updated = store.find_one(&person.id).await.unwrap().unwrap();
                assert_eq!(updated.id, person.id);
                assert_eq!(updated.name, "Alicia");
                assert_eq!(updated.age, 31);
                assert!(!updated.active);
                assert_eq!(updated.nickname.as_deref(), Some("Ally"));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let ghost = create_person("Ghost", "ghost@test.com", 0, 0.0, false);
                assert!(store.update(&ghost.id, ghost.clone()).await.is_err());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let people = seed(&store).await;

                store.delete(&people[0].id).await.unwrap();

                assert!(store.find_one(&people[0].id).await.unwrap().is_none());
                let (_, total) = find(&store, SearchRequest::new()).await;
                assert_eq!(total, 4);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                store.delete(&Uuid::new_v4()).await.unwrap();
            }

            #[tokio::test]
            async fn test_delete_many() {
                let store = $factory;
                let people = seed(&store).await;

                let ids = vec![people[1].id, people[3].id, Uuid::new_v4()];
                store.delete_many(&ids).await.unwrap();

                let (list, total) = find(&store, SearchRequest::new()).await;
                assert_eq!(total, 3);
                assert_eq!(names(&list), vec!["Alice", "Charlie", "Eve"]);
            }

            // ==================================================================
            // Find: pagination
            // ==================================================================

            #[tokio::test]
            async fn test_find_full_set() {
                let store = $factory;
                seed(&store).await;

                let (list, total) = find(&store, SearchRequest::new().page(0, 0)).await;
                assert_eq!(list.len(), 5);
                assert_eq!(total, 5);
            }

            #[tokio::test]
            async fn test_find_second_page() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().order_by("age asc").page(2, 2);
                let (list, total) = find(&store, request).await;
                assert_eq!(total, 5);
                assert_eq!(ordered_names(&list), vec!["Charlie", "Diana"]);
            }

            #[tokio::test]
            async fn test_find_zero_page_size_returns_everything() {
                let store = $factory;
                seed(&store).await;

                let (list, total) = find(&store, SearchRequest::new().page(3, 0)).await;
                assert_eq!(list.len(), 5);
                assert_eq!(total, 5);
            }

            #[tokio::test]
            async fn test_find_page_past_end_keeps_total() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().order_by("age asc").page(4, 2);
                let (list, total) = find(&store, request).await;
                assert!(list.is_empty());
                assert_eq!(total, 5);
            }

            // ==================================================================
            // Find: operators
            // ==================================================================

            #[tokio::test]
            async fn test_find_eq_string() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("name", Operator::Eq, "Bob");
                let (list, total) = find(&store, request).await;
                assert_eq!(total, 1);
                assert_eq!(names(&list), vec!["Bob"]);
            }

            #[tokio::test]
            async fn test_find_eq_boolean() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("active", Operator::Eq, true);
                let (list, _) = find(&store, request).await;
                assert_eq!(names(&list), vec!["Alice", "Bob", "Diana"]);
            }

            #[tokio::test]
            async fn test_find_neq() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("age", Operator::Neq, 30);
                let (list, total) = find(&store, request).await;
                assert_eq!(total, 4);
                assert!(!names(&list).contains(&"Bob".to_string()));
            }

            #[tokio::test]
            async fn test_find_neq_matches_other_kinds() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("age", Operator::Neq, "30");
                let (_, total) = find(&store, request).await;
                assert_eq!(total, 5);

                let request = SearchRequest::new().filter("nickname", Operator::Neq, "Ally");
                let (list, _) = find(&store, request).await;
                assert_eq!(names(&list), vec!["Diana"]);
            }

            #[tokio::test]
            async fn test_find_eq_other_kind_matches_nothing() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("age", Operator::Eq, "30");
                let (list, total) = find(&store, request).await;
                assert!(list.is_empty());
                assert_eq!(total, 0);
            }

            #[tokio::test]
            async fn test_find_range_operators() {
                let store = $factory;
                seed(&store).await;

                let gt = SearchRequest::new().filter("age", Operator::Gt, 35);
                assert_eq!(names(&find(&store, gt).await.0), vec!["Diana", "Eve"]);

                let lt = SearchRequest::new().filter("age", Operator::Lt, 35);
                assert_eq!(names(&find(&store, lt).await.0), vec!["Alice", "Bob"]);

                let egt = SearchRequest::new().filter("score", Operator::Egt, 4.0);
                assert_eq!(
                    names(&find(&store, egt).await.0),
                    vec!["Alice", "Charlie", "Eve"]
                );

                let elt = SearchRequest::new().filter("score", Operator::Elt, 3.0);
                assert_eq!(names(&find(&store, elt).await.0), vec!["Bob", "Diana"]);
            }

            #[tokio::test]
            async fn test_find_like_is_substring_and_case_sensitive() {
                let store = $factory;
                seed(&store).await;

                let corp = SearchRequest::new().filter("email", Operator::Like, "corp");
                assert_eq!(names(&find(&store, corp).await.0), vec!["Bob", "Diana"]);

                let upper = SearchRequest::new().filter("name", Operator::Like, "ALICE");
                assert!(find(&store, upper).await.0.is_empty());
            }

            #[tokio::test]
            async fn test_find_like_treats_wildcards_literally() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("email", Operator::Like, "%");
                let (list, total) = find(&store, request).await;
                assert!(list.is_empty());
                assert_eq!(total, 0);
            }

            #[tokio::test]
            async fn test_find_like_date_text_verbatim() {
                let store = $factory;
                seed(&store).await;
                store
                    .insert(&create_with_bio("Logger", "boot at 2020-08-10T10:44:35Z ok"))
                    .await
                    .unwrap();

                let request = SearchRequest::new().filter("bio", Operator::Like, "2020-08-10T10:44:35Z");
                let (list, total) = find(&store, request).await;
                assert_eq!(total, 1);
                assert_eq!(names(&list), vec!["Logger"]);
            }

            #[tokio::test]
            async fn test_find_orlike_uuid_text_verbatim() {
                let store = $factory;
                seed(&store).await;
                store
                    .insert(&create_with_bio("Tracer", "ref 67E55044-10B1-426F-9247-BB680E5FE0C8"))
                    .await
                    .unwrap();

                let upper = SearchRequest::new().filter(
                    "name,bio",
                    Operator::OrLike,
                    "67E55044-10B1-426F-9247-BB680E5FE0C8",
                );
                assert_eq!(names(&find(&store, upper).await.0), vec!["Tracer"]);

                let lower = SearchRequest::new().filter(
                    "name,bio",
                    Operator::OrLike,
                    "67e55044-10b1-426f-9247-bb680e5fe0c8",
                );
                assert!(find(&store, lower).await.0.is_empty());
            }

            #[tokio::test]
            async fn test_find_null_checks() {
                let store = $factory;
                seed(&store).await;

                let is_null = SearchRequest::new().filter("nickname", Operator::IsNull, FieldValue::Null);
                assert_eq!(
                    names(&find(&store, is_null).await.0),
                    vec!["Bob", "Charlie", "Eve"]
                );

                let not_null = SearchRequest::new().filter("nickname", Operator::NotNull, FieldValue::Null);
                assert_eq!(names(&find(&store, not_null).await.0), vec!["Alice", "Diana"]);
            }

            // ==================================================================
            // Find: condition modes
            // ==================================================================

            #[tokio::test]
            async fn test_find_orlike_across_columns() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().filter("name,email", Operator::OrLike, "li");
                let (list, total) = find(&store, request).await;
                assert_eq!(total, 2);
                assert_eq!(names(&list), vec!["Alice", "Charlie"]);
            }

            #[tokio::test]
            async fn test_find_orlike_suppresses_and_clauses() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new()
                    .filter("active", Operator::Eq, true)
                    .filter("email", Operator::OrLike, "test.com");
                let (list, _) = find(&store, request).await;
                assert_eq!(names(&list), vec!["Alice", "Charlie", "Eve"]);
            }

            #[tokio::test]
            async fn test_find_and_clauses_combine() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new()
                    .filter("active", Operator::Eq, true)
                    .filter("age", Operator::Egt, 30);
                let (list, _) = find(&store, request).await;
                assert_eq!(names(&list), vec!["Bob", "Diana"]);
            }

            #[tokio::test]
            async fn test_find_duplicate_field_last_write_wins() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new()
                    .filter("age", Operator::Gt, 100)
                    .filter("age", Operator::Lt, 35);
                let (list, _) = find(&store, request).await;
                assert_eq!(names(&list), vec!["Alice", "Bob"]);
            }

            #[tokio::test]
            async fn test_find_unrecognized_operator_ignored() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new()
                    .filter("age", Operator::Unrecognized, 1000)
                    .filter("name", Operator::Eq, "Eve");
                let (list, total) = find(&store, request).await;
                assert_eq!(total, 1);
                assert_eq!(names(&list), vec!["Eve"]);
            }

            // ==================================================================
            // Find: ordering
            // ==================================================================

            #[tokio::test]
            async fn test_find_order_descending() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().order_by("score desc");
                let (list, _) = find(&store, request).await;
                assert_eq!(
                    ordered_names(&list),
                    vec!["Charlie", "Alice", "Eve", "Bob", "Diana"]
                );
            }

            #[tokio::test]
            async fn test_find_order_unknown_direction_is_descending() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().order_by("name xyz");
                let (list, _) = find(&store, request).await;
                assert_eq!(
                    ordered_names(&list),
                    vec!["Eve", "Diana", "Charlie", "Bob", "Alice"]
                );
            }

            #[tokio::test]
            async fn test_find_order_ascending_case_insensitive() {
                let store = $factory;
                seed(&store).await;

                let request = SearchRequest::new().order_by("age ASC");
                let (list, _) = find(&store, request).await;
                assert_eq!(
                    ordered_names(&list),
                    vec!["Alice", "Bob", "Charlie", "Diana", "Eve"]
                );
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        let person = create_person(
                            &format!("User{}", i),
                            &format!("user{}@test.com", i),
                            20 + i,
                            1.0,
                            true,
                        );
                        store.insert(&person).await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let (_, total) = find(&store, SearchRequest::new()).await;
                assert_eq!(total, 10);
            }
        }
    };
}
