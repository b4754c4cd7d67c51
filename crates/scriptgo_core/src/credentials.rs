//! crates/scriptgo_core/src/credentials.rs
//!
//! Provider selection from the configured API keys. Google keys are
//! recognized by their "AIza" prefix even when supplied through the OpenAI
//! variable, and placeholder keys left over from setup templates force demo
//! mode so a half-configured install never sends real requests.

/// A Google API key always starts with this prefix.
const GOOGLE_KEY_PREFIX: &str = "AIza";

/// Fragment of the placeholder value shipped in setup templates.
const OPENAI_PLACEHOLDER_FRAGMENT: &str = "your-openai";

/// Raw key material as configured, before any provider is chosen.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

/// The provider a generation request should be routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderChoice {
    Google { api_key: String },
    OpenAi { api_key: String },
    Demo,
}

impl ProviderCredentials {
    /// Picks the provider for single-script generation. Google wins when both
    /// keys are usable. A placeholder OpenAI key forces demo mode outright.
    pub fn resolve(&self) -> ProviderChoice {
        let google = self.google_api_key.clone().or_else(|| {
            self.openai_api_key
                .clone()
                .filter(|key| key.starts_with(GOOGLE_KEY_PREFIX))
        });
        let openai = self
            .openai_api_key
            .clone()
            .filter(|key| !key.starts_with(GOOGLE_KEY_PREFIX));

        let placeholder = self
            .openai_api_key
            .as_deref()
            .is_some_and(|key| key.contains(OPENAI_PLACEHOLDER_FRAGMENT));
        if placeholder {
            return ProviderChoice::Demo;
        }

        match (google, openai) {
            (Some(api_key), _) => ProviderChoice::Google { api_key },
            (None, Some(api_key)) => ProviderChoice::OpenAi { api_key },
            (None, None) => ProviderChoice::Demo,
        }
    }

    /// Picks the provider for batch planning. Batch runs in JSON mode, which
    /// only the OpenAI client supports; everything else degrades to demo.
    pub fn resolve_batch(&self) -> ProviderChoice {
        match self.resolve() {
            ProviderChoice::OpenAi { api_key } => ProviderChoice::OpenAi { api_key },
            _ => ProviderChoice::Demo,
        }
    }
}
