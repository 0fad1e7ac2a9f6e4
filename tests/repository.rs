mod common;

use axum::http::StatusCode;
use common::{website, FailingStore, TABLE};
use dynamo_crud::{k1, to_problem, Context, IdGenerator, InMemoryStore, Repository, Website};
use std::collections::BTreeSet;
use std::sync::Arc;

async fn seeded(n: usize) -> (Repository<Website>, BTreeSet<String>) {
    let repo = Repository::new(Arc::new(InMemoryStore::new()), TABLE);
    let ids = IdGenerator::with_seed(7);
    let ctx = Context::background();
    let mut created = BTreeSet::new();
    for i in 0..n {
        let id = ids.new_string();
        repo.create(&ctx, &website(&id, &format!("site {}", i))).await.unwrap();
        created.insert(id);
    }
    (repo, created)
}

#[tokio::test]
async fn pagination_visits_every_item_exactly_once() {
    for n in [0usize, 1, 2, 5, 10, 26] {
        for limit in [1i32, 2, 3, 7, 25, 30] {
            let (repo, created) = seeded(n).await;
            let ctx = Context::background();

            let mut seen = Vec::new();
            let mut cursor = None;
            let mut pages = 0;
            loop {
                let page = repo.list(&ctx, limit, cursor).await.unwrap();
                pages += 1;
                assert!(page.items.len() <= limit as usize);
                seen.extend(page.items.into_iter().map(|w| w.id));
                cursor = page.next_cursor;
                if cursor.is_none() {
                    break;
                }
                assert!(pages <= n + 1, "cursor never ran out (n={}, limit={})", n, limit);
            }

            let unique: BTreeSet<String> = seen.iter().cloned().collect();
            assert_eq!(unique.len(), seen.len(), "duplicate item (n={}, limit={})", n, limit);
            assert_eq!(unique, created, "missed item (n={}, limit={})", n, limit);
            let expected_pages = n.div_ceil(limit as usize).max(1);
            assert_eq!(pages, expected_pages, "n={}, limit={}", n, limit);
        }
    }
}

#[tokio::test]
async fn create_get_delete_scenario() {
    let repo: Repository<Website> = Repository::new(Arc::new(InMemoryStore::new()), TABLE);
    let ctx = Context::background();

    let mut site = website("", "bar");
    site.id = IdGenerator::new().new_string();
    repo.create(&ctx, &site).await.unwrap();

    assert_eq!(repo.get(&ctx, k1(&site.id)).await.unwrap(), Some(site.clone()));

    repo.delete(&ctx, k1(&site.id)).await.unwrap();
    assert_eq!(repo.get(&ctx, k1(&site.id)).await.unwrap(), None);
}

#[tokio::test]
async fn update_of_absent_key_inserts() {
    let repo: Repository<Website> = Repository::new(Arc::new(InMemoryStore::new()), TABLE);
    let ctx = Context::background();

    repo.update(&ctx, &website("new", "fresh")).await.unwrap();
    assert_eq!(
        repo.get(&ctx, k1("new")).await.unwrap(),
        Some(website("new", "fresh"))
    );
}

#[tokio::test]
async fn backend_failures_become_500_problems() {
    let store = Arc::new(FailingStore::default());
    let repo: Repository<Website> = Repository::new(store.clone(), TABLE);
    let ctx = Context::background();

    let errors = [
        repo.list(&ctx, 10, None).await.unwrap_err(),
        repo.get(&ctx, k1("a")).await.unwrap_err(),
        repo.create(&ctx, &website("a", "b")).await.unwrap_err(),
        repo.update(&ctx, &website("a", "b")).await.unwrap_err(),
        repo.delete(&ctx, k1("a")).await.unwrap_err(),
    ];
    for err in &errors {
        let p = to_problem(Some(err));
        assert_eq!(p.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail().is_empty());
        assert!(err.to_string().contains("connection refused"));
    }
    assert_eq!(store.calls(), 5);
}

#[tokio::test]
async fn cancelled_context_fails_without_store_calls() {
    let store = Arc::new(FailingStore::default());
    let repo: Repository<Website> = Repository::new(store.clone(), TABLE);
    let ctx = Context::background();
    ctx.cancel();

    let errors = [
        repo.list(&ctx, 10, None).await.unwrap_err(),
        repo.get(&ctx, k1("a")).await.unwrap_err(),
        repo.create(&ctx, &website("a", "b")).await.unwrap_err(),
        repo.update(&ctx, &website("a", "b")).await.unwrap_err(),
        repo.delete(&ctx, k1("a")).await.unwrap_err(),
    ];
    for err in &errors {
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
    assert_eq!(store.calls(), 0);
}
