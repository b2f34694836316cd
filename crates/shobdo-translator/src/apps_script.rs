use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// Bangla/Korean translator backed by a deployed web-app script.
///
/// The script takes a form-encoded `source_lang`, `target_lang` and `text`
/// and answers `{"status": "success", "translatedText": ...}` or
/// `{"status": "error", "message": ...}`.
#[derive(Clone)]
pub struct AppsScriptTranslator {
    client: reqwest::Client,
    url: String,
}

impl AppsScriptTranslator {
    pub fn new(url: String, timeout: Duration) -> Result<Self, TranslateError> {
        if url.is_empty() {
            return Err(TranslateError::NotConfigured);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptReply {
    status: String,
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ScriptReply {
    fn into_text(self) -> Result<String, TranslateError> {
        if self.status != "success" {
            return Err(TranslateError::ApiError(
                self.message
                    .unwrap_or_else(|| format!("status {}", self.status)),
            ));
        }

        self.translated_text
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))
    }
}

#[async_trait]
impl Translator for AppsScriptTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if !self.supports(&from, &to) {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let params = [
            ("source_lang", from.as_str()),
            ("target_lang", to.as_str()),
            ("text", text),
        ];

        tracing::debug!("Translating {} chars {} -> {}", text.chars().count(), from, to);

        let response = self.client.post(&self.url).form(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let reply: ScriptReply = response.json().await?;
        let translated = reply.into_text()?;

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "apps-script".to_string(),
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![
            ("bn".to_string(), "ko".to_string()),
            ("ko".to_string(), "bn".to_string()),
        ]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Apps Script".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
