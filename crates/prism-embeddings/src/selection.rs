//! Model selection and fallback ordering.

use prism_core::models::{ContentType, EmbeddingModel, EmbeddingStrategy};

/// Pick a model: content-type override, then a model whose domain matches
/// the hint, then the primary model.
pub fn select_model(
    strategy: &EmbeddingStrategy,
    models: &[EmbeddingModel],
    content_type: Option<ContentType>,
    domain: Option<&str>,
) -> String {
    if let Some(name) = content_type.and_then(|ct| strategy.content_type_overrides.get(&ct)) {
        return name.clone();
    }
    if let Some(domain) = domain {
        let matched = models.iter().find(|m| {
            m.domain
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(domain))
        });
        if let Some(model) = matched {
            return model.name.clone();
        }
    }
    strategy.primary_model.clone()
}

/// Models to try in order: the selected one, then each configured fallback
/// not already tried.
pub fn candidate_chain(strategy: &EmbeddingStrategy, selected: &str) -> Vec<String> {
    let mut chain = vec![selected.to_string()];
    for name in &strategy.fallback_models {
        if !chain.contains(name) {
            chain.push(name.clone());
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use prism_core::config::EmbeddingConfig;

    use super::*;

    #[test]
    fn override_beats_domain_and_primary() {
        let config = EmbeddingConfig::default();
        let picked = select_model(
            &config.strategy,
            &config.models,
            Some(ContentType::Code),
            Some("reference"),
        );
        assert_eq!(picked, "prism-code-512");
    }

    #[test]
    fn domain_match_is_case_insensitive() {
        let config = EmbeddingConfig::default();
        let picked = select_model(&config.strategy, &config.models, None, Some("Reference"));
        assert_eq!(picked, "prism-keyword-384");
    }

    #[test]
    fn falls_back_to_primary() {
        let config = EmbeddingConfig::default();
        let picked = select_model(
            &config.strategy,
            &config.models,
            Some(ContentType::Markdown),
            Some("astronomy"),
        );
        assert_eq!(picked, config.strategy.primary_model);
    }

    #[test]
    fn chain_skips_duplicates() {
        let config = EmbeddingConfig::default();
        let chain = candidate_chain(&config.strategy, "prism-keyword-384");
        assert_eq!(chain, vec!["prism-keyword-384", "prism-tfidf-256"]);
    }
}
