//! Link creation service: the short-code allocator.

use std::sync::Arc;

use tokio::time::{Instant, timeout_at};

use crate::config::ShortenerConfig;
use crate::domain::clock::Clock;
use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{ShortenError, StoreError};
use crate::domain::events::{LinkEvent, LinkEventObserver};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{
    AlphabetError, CodeGenerator, is_reserved, validate_custom_code,
};

/// How many times the code length may grow by one after collisions.
const MAX_LENGTH_ESCALATIONS: usize = 4;

/// Attempt budget multiplier for escalated lengths.
const ESCALATED_RETRY_FACTOR: usize = 10;

/// Result of a successful [`LinkService::shorten`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub link: Link,
    /// `false` when an existing link was returned under the reuse policy.
    pub created: bool,
}

/// Service allocating short codes for target URLs.
///
/// Custom codes are checked and inserted as-is. Generated codes are drawn at
/// random and inserted; the store's unique constraint decides the winner, so
/// concurrent callers never end up sharing a code.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    generator: CodeGenerator,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn LinkEventObserver>,
    config: ShortenerConfig,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if `config.alphabet` is unusable.
    pub fn new(
        link_repository: Arc<L>,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn LinkEventObserver>,
        config: ShortenerConfig,
    ) -> Result<Self, AlphabetError> {
        let generator = CodeGenerator::new(&config.alphabet)?;

        Ok(Self {
            link_repository,
            generator,
            clock,
            observer,
            config,
        })
    }

    /// Shortens `target`, using the configured default deadline.
    ///
    /// # Errors
    ///
    /// See [`Self::shorten_with_deadline`].
    pub async fn shorten(
        &self,
        target: &str,
        custom_code: Option<&str>,
    ) -> Result<Allocation, ShortenError> {
        let deadline = self.config.operation_timeout.map(|t| Instant::now() + t);
        self.shorten_with_deadline(target, custom_code, deadline)
            .await
    }

    /// Shortens `target`, giving up once `deadline` passes.
    ///
    /// # Policy
    ///
    /// - With `custom_code`: always a new link; fails if the code is taken.
    /// - Without: if reuse is enabled and `target` already has an
    ///   auto-generated link, that link is returned; otherwise a fresh random
    ///   code is allocated.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::EmptyTarget`] if `target` is blank
    /// - [`ShortenError::InvalidCode`] if `custom_code` breaks the code rules
    /// - [`ShortenError::CodeConflict`] if `custom_code` is already in use
    /// - [`ShortenError::AllocationExhausted`] if the retry budget runs out
    /// - [`ShortenError::StoreUnavailable`] on persistence failures
    /// - [`ShortenError::DeadlineExceeded`] if `deadline` passes first
    pub async fn shorten_with_deadline(
        &self,
        target: &str,
        custom_code: Option<&str>,
        deadline: Option<Instant>,
    ) -> Result<Allocation, ShortenError> {
        let work = self.allocate(target, custom_code);

        match deadline {
            Some(deadline) if deadline <= Instant::now() => Err(ShortenError::DeadlineExceeded),
            Some(deadline) => timeout_at(deadline, work)
                .await
                .map_err(|_| ShortenError::DeadlineExceeded)?,
            None => work.await,
        }
    }

    async fn allocate(
        &self,
        target: &str,
        custom_code: Option<&str>,
    ) -> Result<Allocation, ShortenError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ShortenError::EmptyTarget);
        }

        if let Some(code) = custom_code {
            return self.allocate_custom(target, code).await;
        }

        if self.config.reuse_existing_for_target
            && let Some(existing) = self.link_repository.find_by_target(target).await?
        {
            tracing::debug!(code = %existing.code, "Reusing existing code for target");
            self.observer.on_event(&LinkEvent::LinkReused {
                code: existing.code.clone(),
            });
            return Ok(Allocation {
                link: existing,
                created: false,
            });
        }

        self.allocate_random(target).await
    }

    async fn allocate_custom(&self, target: &str, code: &str) -> Result<Allocation, ShortenError> {
        validate_custom_code(code)?;

        if self.link_repository.find_by_code(code).await?.is_some() {
            return Err(ShortenError::CodeConflict(code.to_string()));
        }

        match self.insert(code.to_string(), target, true).await {
            Ok(link) => Ok(self.created(link)),
            Err(StoreError::UniqueViolation) => Err(ShortenError::CodeConflict(code.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Draws random candidates until one is inserted.
    ///
    /// `max_retries` attempts at the configured length, then the length grows
    /// by one (up to [`MAX_LENGTH_ESCALATIONS`] times) with a larger budget
    /// per length. The total number of attempts is therefore bounded.
    async fn allocate_random(&self, target: &str) -> Result<Allocation, ShortenError> {
        let mut attempts = 0;

        for escalation in 0..=MAX_LENGTH_ESCALATIONS {
            let length = self.config.code_length + escalation;
            let budget = if escalation == 0 {
                self.config.max_retries
            } else {
                self.config.max_retries * ESCALATED_RETRY_FACTOR
            };

            if escalation > 0 {
                tracing::warn!(
                    length,
                    attempts,
                    "Code space crowded, escalating code length"
                );
            }

            for _ in 0..budget {
                attempts += 1;
                let candidate = self.generator.generate(length);

                if is_reserved(&candidate) {
                    continue;
                }

                if self.link_repository.find_by_code(&candidate).await?.is_some() {
                    continue;
                }

                match self.insert(candidate, target, false).await {
                    Ok(link) => return Ok(self.created(link)),
                    Err(StoreError::UniqueViolation) => {
                        tracing::debug!("Lost insert race for candidate code, retrying");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        tracing::error!(
            attempts,
            code_length = self.config.code_length,
            alphabet_size = self.generator.alphabet_size(),
            "Failed to allocate a unique code"
        );

        Err(ShortenError::AllocationExhausted { attempts })
    }

    async fn insert(&self, code: String, target: &str, is_custom: bool) -> Result<Link, StoreError> {
        let new_link = NewLink {
            code,
            target: target.to_string(),
            is_custom,
            created_at: self.clock.now(),
        };

        self.link_repository.insert(new_link).await
    }

    fn created(&self, link: Link) -> Allocation {
        tracing::info!(code = %link.code, custom = link.is_custom, "Short link created");
        self.observer.on_event(&LinkEvent::LinkCreated {
            code: link.code.clone(),
            is_custom: link.is_custom,
        });

        Allocation {
            link,
            created: true,
        }
    }

    /// Retrieves a link by its short code without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    pub async fn get_link(&self, code: &str) -> Result<Option<Link>, StoreError> {
        self.link_repository.find_by_code(code).await
    }
}

/// Builds the public short URL from a base and a code.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
