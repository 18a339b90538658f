pub mod prompt;

use crate::cli::Args;
use crate::llm::{ LlmConfig, LlmError, LlmType };
use log::info;
use prompt::PromptConfig;
use std::error::Error;
use std::net::SocketAddr;

/// TLS material for serving HTTPS.
#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

/// Process-wide configuration, built once from [`Args`] at startup and only
/// read afterwards.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub llm: LlmConfig,
    pub classifier_model: Option<String>,
    pub prompts: PromptConfig,
    pub server_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
}

impl AgentConfig {
    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let llm_type: LlmType = args.chat_llm_type.parse()?;

        let api_key = args
            .resolved_api_key()
            .ok_or_else(|| LlmError::Config("CHAT_API_KEY (or OPENROUTER_API_KEY) must be set".to_string()))?;

        let llm = LlmConfig {
            llm_type,
            api_key,
            completion_model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
        };
        // Fail at startup rather than on the first request.
        llm.resolved_base_url()?;

        let prompts = match args.prompts_path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                info!("Loading prompts from {}", path);
                prompt::load_prompts(path)?
            }
            None => PromptConfig::default(),
        };

        let server_addr: SocketAddr = args.server_addr
            .parse()
            .map_err(|e| format!("Invalid server address '{}': {}", args.server_addr, e))?;

        let tls = if args.enable_tls {
            match (&args.tls_cert_path, &args.tls_key_path) {
                (Some(cert_path), Some(key_path)) =>
                    Some(TlsPaths { cert_path: cert_path.clone(), key_path: key_path.clone() }),
                _ => {
                    return Err("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.".into());
                }
            }
        } else {
            None
        };

        Ok(Self {
            llm,
            classifier_model: args.classifier_model.clone().filter(|m| !m.trim().is_empty()),
            prompts,
            server_addr,
            tls,
        })
    }

    pub fn log_summary(&self) {
        info!("--- Core Configuration ---");
        info!("Server Address: {}", self.server_addr);
        info!("TLS Enabled: {}", self.tls.is_some());
        info!("Chat LLM Type: {}", self.llm.llm_type);
        info!("Chat Base URL: {}", self.llm.resolved_base_url().unwrap_or_default());
        info!("Chat Model: {}", self.llm.resolved_model());
        info!(
            "Classifier Model: {}",
            self.classifier_model.as_deref().unwrap_or("same as chat model")
        );
        info!("-------------------------");
    }
}
