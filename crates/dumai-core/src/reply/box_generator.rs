//! BoxReplyGenerator -- object-safe dynamic dispatch wrapper for ReplyGenerator.
//!
//! 1. Define an object-safe `ReplyGeneratorDyn` trait with boxed futures
//! 2. Blanket-impl `ReplyGeneratorDyn` for all `T: ReplyGenerator`
//! 3. `BoxReplyGenerator` wraps `Box<dyn ReplyGeneratorDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use dumai_types::error::ReplyError;

use super::generator::ReplyGenerator;

/// Object-safe version of [`ReplyGenerator`] with boxed futures.
pub trait ReplyGeneratorDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_reply_boxed<'a>(
        &'a self,
        text: &'a str,
        is_initial: bool,
        personality: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, ReplyError>> + Send + 'a>>;
}

impl<T: ReplyGenerator> ReplyGeneratorDyn for T {
    fn name(&self) -> &str {
        ReplyGenerator::name(self)
    }

    fn generate_reply_boxed<'a>(
        &'a self,
        text: &'a str,
        is_initial: bool,
        personality: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, ReplyError>> + Send + 'a>> {
        Box::pin(self.generate_reply(text, is_initial, personality))
    }
}

/// Type-erased reply generator.
///
/// Lets the application pick a backend at runtime (the Groq client in
/// production, a scripted generator in tests) while the orchestrator stays
/// generic over [`ReplyGenerator`].
pub struct BoxReplyGenerator {
    inner: Box<dyn ReplyGeneratorDyn>,
}

impl BoxReplyGenerator {
    /// Wrap a concrete `ReplyGenerator` in a type-erased box.
    pub fn new<T: ReplyGenerator + 'static>(generator: T) -> Self {
        Self {
            inner: Box::new(generator),
        }
    }
}

impl ReplyGenerator for BoxReplyGenerator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate_reply(
        &self,
        text: &str,
        is_initial: bool,
        personality: Option<&str>,
    ) -> Result<String, ReplyError> {
        self.inner
            .generate_reply_boxed(text, is_initial, personality)
            .await
    }
}
