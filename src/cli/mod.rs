use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// OpenAI-compatible provider for chat completion (openrouter, openai, deepseek, groq, xai)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "openrouter")]
    pub chat_llm_type: String,

    /// Base URL for the provider API (e.g., https://openrouter.ai/api/v1)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, provider default if None
    pub chat_base_url: Option<String>,

    /// Bearer credential for the provider. Falls back to OPENROUTER_API_KEY.
    #[arg(long, env = "CHAT_API_KEY", hide_env_values = true)]
    pub chat_api_key: Option<String>,

    /// Model for general replies (e.g., deepseek/deepseek-chat, gpt-4o)
    #[arg(long, env = "CHAT_MODEL")] // No default, provider default if None
    pub chat_model: Option<String>,

    /// Model for intent classification. Defaults to CHAT_MODEL if not set.
    #[arg(long, env = "CLASSIFIER_MODEL")]
    pub classifier_model: Option<String>,

    // --- General App Args ---
    /// Optional JSON file overriding the built-in system prompts.
    #[arg(long, env = "PROMPTS_PATH")]
    pub prompts_path: Option<String>,

    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.chat_api_key
            .clone()
            .or_else(|| std::env::var("OPENROUTER_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}
