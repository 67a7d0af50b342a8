//! Greeting tool definition.
//!
//! Greets a person in English, Spanish or French. When no language is given,
//! one is drawn at random from a seedable generator.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rmcp::{handler::server::tool::cached_schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domains::tools::{
    ToolError, ToolHandler,
    schema::{ParamSpec, ToolDescriptor, ValidatedParams},
};

/// Languages drawn from when the caller does not pick one.
pub const LANGUAGES: [&str; 3] = ["english", "spanish", "french"];

// ============================================================================
// Structured Output
// ============================================================================

/// Result of the greeting tool.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Greeting {
    pub greeting: String,
    /// The language as given by the caller, or the randomly drawn one.
    pub language: String,
}

/// Build a greeting for `name`.
///
/// Matching is case-insensitive; anything other than spanish or french
/// greets in English. The returned `language` keeps the caller's spelling.
pub fn greet<R: Rng + ?Sized>(name: &str, language: Option<&str>, rng: &mut R) -> Greeting {
    let language = match language {
        Some(lang) => lang.to_string(),
        None => LANGUAGES[rng.gen_range(0..LANGUAGES.len())].to_string(),
    };

    let greeting = match language.to_lowercase().as_str() {
        "spanish" => format!("¡Hola, {}! ¿Cómo estás?", name),
        "french" => format!("Bonjour, {}! Comment allez-vous?", name),
        _ => format!("Hello, {}! How are you?", name),
    };

    Greeting { greeting, language }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Greeting tool.
pub struct GreetingTool {
    rng: Mutex<StdRng>,
}

impl GreetingTool {
    /// Tool name as registered.
    pub const NAME: &'static str = "greeting";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate a friendly greeting for a person in English, Spanish or French. A random language is used when none is given.";

    /// Create the tool with an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create the tool with a fixed seed for reproducible language picks.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION)
            .param(ParamSpec::string("name", "Name of the person to greet").required())
            .param(ParamSpec::string(
                "language",
                "Greeting language: english, spanish or french (random if omitted)",
            ))
    }
}

impl Default for GreetingTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for GreetingTool {
    fn output_schema(&self) -> Option<Arc<JsonObject>> {
        Some(cached_schema_for_type::<Greeting>())
    }

    #[instrument(skip_all)]
    async fn execute(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError> {
        let name = params.require_str("name")?;
        let language = params.str("language");

        let result = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| ToolError::internal("greeting generator lock poisoned"))?;
            greet(name, language, &mut *rng)
        };

        if language.is_none() {
            debug!("Picked random language: {}", result.language);
        }
        info!("Greeting generated in {}", result.language);

        serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_spanish_greeting_keeps_caller_spelling() {
        let g = greet("Maria", Some("Spanish"), &mut rng());
        assert_eq!(g.greeting, "¡Hola, Maria! ¿Cómo estás?");
        assert_eq!(g.language, "Spanish");
    }

    #[test]
    fn test_french_greeting_case_insensitive() {
        let g = greet("Luc", Some("FRENCH"), &mut rng());
        assert_eq!(g.greeting, "Bonjour, Luc! Comment allez-vous?");
        assert_eq!(g.language, "FRENCH");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let g = greet("Kai", Some("klingon"), &mut rng());
        assert_eq!(g.greeting, "Hello, Kai! How are you?");
        assert_eq!(g.language, "klingon");
    }

    #[test]
    fn test_random_language_matches_template() {
        let mut rng = rng();
        for _ in 0..50 {
            let g = greet("Sam", None, &mut rng);
            assert!(LANGUAGES.contains(&g.language.as_str()));
            assert!(g.greeting.contains("Sam"));
            let expected = greet("Sam", Some(g.language.as_str()), &mut StdRng::seed_from_u64(0));
            assert_eq!(g.greeting, expected.greeting);
        }
    }

    #[test]
    fn test_random_language_covers_all_choices() {
        let mut rng = rng();
        let picked: std::collections::HashSet<_> =
            (0..200).map(|_| greet("Sam", None, &mut rng).language).collect();
        assert_eq!(picked.len(), LANGUAGES.len());
    }

    #[test]
    fn test_same_seed_same_language() {
        let a = greet("Sam", None, &mut StdRng::seed_from_u64(9));
        let b = greet("Sam", None, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_execute_through_descriptor() {
        let tool = GreetingTool::with_seed(1);
        let params = GreetingTool::descriptor()
            .validate(json!({ "name": "Maria", "language": "Spanish" }))
            .unwrap();
        let result = tool.execute(params).await.unwrap();
        assert_eq!(
            result,
            json!({ "greeting": "¡Hola, Maria! ¿Cómo estás?", "language": "Spanish" })
        );
    }

    #[test]
    fn test_greeting_descriptor_metadata() {
        let d = GreetingTool::descriptor();
        assert_eq!(d.name, "greeting");
        assert_eq!(d.parameters.len(), 2);
        assert!(d.parameters[0].required);
        assert!(!d.parameters[1].required);
    }
}
