mod common;

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url_shortener::application::services::{LinkService, RedirectService};
use url_shortener::config::ShortenerConfig;
use url_shortener::domain::clock::SystemClock;
use url_shortener::domain::entities::NewLink;
use url_shortener::domain::errors::{ResolveError, ShortenError};
use url_shortener::domain::events::NoopObserver;
use url_shortener::domain::repositories::LinkRepository;
use url_shortener::infrastructure::persistence::SqliteLinkRepository;

struct Services {
    repo: Arc<SqliteLinkRepository>,
    links: Arc<LinkService<SqliteLinkRepository>>,
    redirects: Arc<RedirectService<SqliteLinkRepository>>,
}

async fn services(config: ShortenerConfig) -> Services {
    services_on(common::test_pool().await, config)
}

fn services_on(pool: SqlitePool, config: ShortenerConfig) -> Services {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));

    let redirects = Arc::new(RedirectService::new(
        repo.clone(),
        Arc::new(NoopObserver),
        config.operation_timeout,
    ));
    let links = Arc::new(
        LinkService::new(
            repo.clone(),
            Arc::new(SystemClock),
            Arc::new(NoopObserver),
            config,
        )
        .unwrap(),
    );

    Services {
        repo,
        links,
        redirects,
    }
}

fn small_alphabet(alphabet: &str, code_length: usize, reuse: bool) -> ShortenerConfig {
    ShortenerConfig {
        code_length,
        alphabet: alphabet.to_string(),
        reuse_existing_for_target: reuse,
        max_retries: 10,
        operation_timeout: Some(Duration::from_secs(30)),
    }
}

#[tokio::test]
async fn test_shorten_then_resolve_round_trip() {
    let s = services(common::test_config()).await;

    for target in [
        "https://example.com",
        "https://example.com/a/b?c=d#e",
        "http://xn--e1afmkfd.xn--p1ai/путь",
    ] {
        let allocation = s.links.shorten(target, None).await.unwrap();
        assert_eq!(allocation.link.code.len(), 6);

        let resolved = s.redirects.resolve(&allocation.link.code).await.unwrap();
        assert_eq!(resolved, target);
    }
}

#[tokio::test]
async fn test_target_is_trimmed_but_otherwise_verbatim() {
    let s = services(common::test_config()).await;

    let allocation = s
        .links
        .shorten("  https://Example.com/Path/  ", None)
        .await
        .unwrap();

    assert_eq!(allocation.link.target, "https://Example.com/Path/");
}

#[tokio::test]
async fn test_reuse_returns_same_code() {
    let s = services(common::test_config()).await;

    let first = s.links.shorten("https://dedup.com", None).await.unwrap();
    let second = s.links.shorten("https://dedup.com", None).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.link.code, second.link.code);
    assert_eq!(s.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_reuse_disabled_mints_new_code() {
    let config = ShortenerConfig {
        reuse_existing_for_target: false,
        ..common::test_config()
    };
    let s = services(config).await;

    let first = s.links.shorten("https://dedup.com", None).await.unwrap();
    let second = s.links.shorten("https://dedup.com", None).await.unwrap();

    assert!(second.created);
    assert_ne!(first.link.code, second.link.code);
}

#[tokio::test]
async fn test_custom_code_never_reused() {
    let s = services(common::test_config()).await;

    s.links
        .shorten("https://example.com", Some("promo"))
        .await
        .unwrap();
    let generated = s.links.shorten("https://example.com", None).await.unwrap();

    assert!(generated.created);
    assert_ne!(generated.link.code, "promo");
}

#[tokio::test]
async fn test_custom_code_conflict_keeps_first_mapping() {
    let s = services(common::test_config()).await;

    s.links
        .shorten("https://target1.com", Some("abc"))
        .await
        .unwrap();
    let result = s.links.shorten("https://target2.com", Some("abc")).await;

    assert_eq!(result.unwrap_err(), ShortenError::CodeConflict("abc".into()));
    assert_eq!(
        s.redirects.resolve("abc").await.unwrap(),
        "https://target1.com"
    );
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let s = services(common::test_config()).await;

    let result = s.redirects.resolve("zzzzzz").await;
    assert_eq!(result.unwrap_err(), ResolveError::NotFound("zzzzzz".into()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_shortens_never_share_a_code() {
    let pool = common::test_file_pool("parallel-shortens").await;
    let s = services_on(pool, small_alphabet("abc", 2, false));

    let mut handles = Vec::new();
    for i in 0..20 {
        let links = s.links.clone();
        handles.push(tokio::spawn(async move {
            links
                .shorten(&format!("https://example.com/{i}"), None)
                .await
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let allocation = handle.await.unwrap().unwrap();
        assert!(codes.insert(allocation.link.code));
    }

    assert_eq!(codes.len(), 20);
    assert_eq!(s.repo.count().await.unwrap(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_visit() {
    let pool = common::test_file_pool("concurrent-resolves").await;
    let s = services_on(pool, common::test_config());
    let code = s
        .links
        .shorten("https://example.com", None)
        .await
        .unwrap()
        .link
        .code;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let redirects = s.redirects.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                redirects.resolve(&code).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let link = s.repo.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(link.visits, 100);
}

#[tokio::test]
async fn test_two_symbol_alphabet_escalates_instead_of_hanging() {
    let s = services(small_alphabet("ab", 1, false)).await;

    for code in ["a", "b"] {
        s.repo
            .insert(NewLink {
                code: code.to_string(),
                target: format!("https://taken.com/{code}"),
                is_custom: false,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let allocation = s.links.shorten("https://third.com", None).await.unwrap();

    assert_eq!(allocation.link.code.len(), 2);
    assert!(allocation.link.code.chars().all(|c| c == 'a' || c == 'b'));
}

#[tokio::test]
async fn test_exhausted_base_length_yields_longer_code() {
    let s = services(small_alphabet("ab", 2, false)).await;

    for code in ["aa", "ab", "ba", "bb"] {
        s.repo
            .insert(NewLink {
                code: code.to_string(),
                target: format!("https://taken.com/{code}"),
                is_custom: false,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let allocation = s.links.shorten("https://fifth.com", None).await.unwrap();

    assert_eq!(allocation.link.code.len(), 3);
    assert_eq!(
        s.redirects.resolve(&allocation.link.code).await.unwrap(),
        "https://fifth.com"
    );
}
