//! Link creation, lookup, deletion and redirect service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved, validate_custom_code};
use crate::utils::url_validator::validate_target_url;

/// Maximum number of generated codes tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service for creating, resolving and removing short links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link.
    ///
    /// Input is validated before any store access, URL first, then the
    /// custom code. With a custom code a single insert is attempted. Without
    /// one, random 6-character codes are inserted until one does not
    /// collide, at most [`MAX_GENERATION_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed URL or custom code
    /// - [`AppError::Conflict`] if the custom code already exists
    /// - [`AppError::CodeGenerationExhausted`] if every generated code collided
    pub async fn create_link(
        &self,
        url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_target_url(&url).map_err(|e| {
            debug!(reason = %e, "Rejected target URL");
            AppError::validation("Invalid URL format")
        })?;

        if let Some(code) = custom_code {
            validate_custom_code(&code)?;

            let link = self.link_repository.create(NewLink { code, url }).await?;
            info!(code = %link.code, "Created link with custom code");
            return Ok(link);
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let new_link = NewLink {
                code: generate_code(),
                url: url.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(code = %link.code, attempt, "Created link");
                    return Ok(link);
                }
                Err(AppError::Conflict(_)) => {
                    warn!(attempt, "Generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeGenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Lists every link, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Deletes a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matched.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(code).await? {
            return Err(AppError::not_found("Link not found"));
        }

        info!(code, "Deleted link");
        Ok(())
    }

    /// Resolves a code for redirection and records the click.
    ///
    /// Reserved paths are answered without querying the store. The click
    /// counter and timestamp are updated in the same statement that reads
    /// the target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for reserved or unknown codes.
    pub async fn follow(&self, code: &str) -> Result<String, AppError> {
        if is_reserved(code) {
            return Err(AppError::not_found("Not found"));
        }

        let url = self
            .link_repository
            .record_click(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        debug!(code, "Recorded click");
        Ok(url)
    }

    /// Confirms the underlying store is reachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Constructs the full short URL from a base URL and code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_test_link(code: &str, url: &str) -> Link {
        Link::new(1, code.to_string(), url.to_string(), 0, None, Utc::now())
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_link_generates_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code.len() == 6
                    && new_link.code.chars().all(|c| c.is_ascii_alphanumeric())
                    && new_link.url == "https://example.com"
            })
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.url)));

        let link = service(mock_repo)
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn test_create_link_keeps_url_verbatim() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.url == "https://EXAMPLE.com:443/Path")
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.url)));

        let result = service(mock_repo)
            .create_link("https://EXAMPLE.com:443/Path".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "MyCode12")
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.url)));

        let link = service(mock_repo)
            .create_link(
                "https://example.com".to_string(),
                Some("MyCode12".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.code, "MyCode12");
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Code already exists")));

        let result = service(mock_repo)
            .create_link(
                "https://example.com".to_string(),
                Some("taken123".to_string()),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_link_invalid_url_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let err = service(mock_repo)
            .create_link("not-a-url".to_string(), Some("bad!".to_string()))
            .await
            .unwrap_err();

        // The URL is checked first, so its message wins over the bad code.
        assert!(matches!(&err, AppError::Validation(m) if m == "Invalid URL format"));
    }

    #[tokio::test]
    async fn test_create_link_invalid_custom_code_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let err = service(mock_repo)
            .create_link("https://example.com".to_string(), Some("abc".to_string()))
            .await
            .unwrap_err();

        assert!(
            matches!(&err, AppError::Validation(m) if m == "Code must be 6-8 alphanumeric characters")
        );
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(3).returning(move |new_link| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AppError::conflict("Code already exists"))
            } else {
                Ok(create_test_link(&new_link.code, &new_link.url))
            }
        });

        let result = service(mock_repo)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_create_link_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Code already exists")));

        let err = service(mock_repo)
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::CodeGenerationExhausted { attempts } if attempts == MAX_GENERATION_ATTEMPTS
        ));
    }

    #[tokio::test]
    async fn test_create_link_database_error_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let err = service(mock_repo)
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "missing1")
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock_repo).get_link("missing1").await.unwrap_err();
        assert!(matches!(&err, AppError::NotFound(m) if m == "Link not found"));
    }

    #[tokio::test]
    async fn test_delete_link() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_delete()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .withf(|code| code == "gone123")
            .times(1)
            .returning(|_| Ok(false));

        let service = service(mock_repo);
        assert!(service.delete_link("abc123").await.is_ok());
        assert!(matches!(
            service.delete_link("gone123").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_follow_records_click() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_record_click()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let url = service(mock_repo).follow("abc123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_follow_unknown_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock_repo).follow("nope123").await.unwrap_err();
        assert!(matches!(&err, AppError::NotFound(m) if m == "Link not found"));
    }

    #[tokio::test]
    async fn test_follow_reserved_code_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_record_click().times(0);

        let service = service(mock_repo);
        for code in ["api", "CODE", "healthz", "favicon.ico", "_next"] {
            let err = service.follow(code).await.unwrap_err();
            assert!(matches!(&err, AppError::NotFound(m) if m == "Not found"));
        }
    }

    #[test]
    fn test_short_url() {
        let service = service(MockLinkRepository::new());
        assert_eq!(
            service.short_url("https://sho.rt/", "abc123"),
            "https://sho.rt/abc123"
        );
        assert_eq!(
            service.short_url("http://localhost:3000", "abc123"),
            "http://localhost:3000/abc123"
        );
    }
}
