//! Provider fallback chain.

use async_trait::async_trait;
use tracing::warn;

use crate::error::TranslationError;
use crate::traits::translator::Translator;
use crate::types::{language::Language, record::TranslationResult};

/// Tries the primary provider, then the secondary if the primary fails.
pub struct FallbackTranslator<P: Translator, S: Translator> {
    primary: P,
    secondary: S,
    name: String,
}

impl<P: Translator, S: Translator> FallbackTranslator<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        let name = format!("{}+{}", primary.name(), secondary.name());
        Self {
            primary,
            secondary,
            name,
        }
    }
}

#[async_trait]
impl<P: Translator, S: Translator> Translator for FallbackTranslator<P, S> {
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError> {
        let primary_err = match self.primary.translate(text, target).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        warn!(
            primary = self.primary.name(),
            secondary = self.secondary.name(),
            error = %primary_err,
            "Primary translator failed, trying secondary"
        );

        self.secondary
            .translate(text, target)
            .await
            .map_err(|secondary_err| {
                TranslationError::Exhausted(format!("{primary_err}; {secondary_err}"))
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTranslator;

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = MockTranslator::suffix(" [vi]");
        let secondary = MockTranslator::suffix(" [backup]");
        let chain = FallbackTranslator::new(primary.clone(), secondary.clone());

        let result = chain.translate("Good job", Language::Vi).await.unwrap();

        assert_eq!(result.translated, "Good job [vi]");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_secondary_used_when_primary_fails() {
        let primary = MockTranslator::failing();
        let secondary = MockTranslator::suffix(" [backup]");
        let chain = FallbackTranslator::new(primary.clone(), secondary.clone());

        let result = chain.translate("Good job", Language::Vi).await.unwrap();

        assert_eq!(result.translated, "Good job [backup]");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_both_failing_is_exhausted() {
        let chain = FallbackTranslator::new(MockTranslator::failing(), MockTranslator::failing());
        let err = chain.translate("Good job", Language::Vi).await.unwrap_err();
        assert!(matches!(err, TranslationError::Exhausted(_)));
    }

    #[test]
    fn test_name_joins_providers() {
        let chain = FallbackTranslator::new(
            MockTranslator::suffix("").named("google"),
            MockTranslator::suffix("").named("libre"),
        );
        assert_eq!(chain.name(), "google+libre");
    }
}
