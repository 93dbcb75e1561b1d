use std::sync::Arc;

use async_trait::async_trait;
use llm::client::LlmClient;
use tracing::debug;

use crate::errors::Result;
use crate::prompt::build_system_prompt;
use crate::schema::SchemaDescription;

/// Capability seam for the completion backend.
///
/// The production implementation wraps the HTTP client from the `llm` crate;
/// tests substitute deterministic fakes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion. `system` grounds the model, `user` carries the raw
    /// question. Returns the raw model text, formatting artifacts included.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        Ok(LlmClient::complete(self, system, user).await?)
    }
}

/// Translates natural language questions into candidate SQL statements.
///
/// Candidates are untrusted output, callers must pass them through the safety
/// gate before execution.
pub struct Translator {
    backend: Arc<dyn CompletionBackend>,
    system_prompt: String,
}

impl Translator {
    pub fn new(backend: Arc<dyn CompletionBackend>, schema: &SchemaDescription) -> Translator {
        Translator {
            backend,
            system_prompt: build_system_prompt(schema.as_str()),
        }
    }

    /// Translate one question into a candidate statement.
    ///
    /// One completion attempt, no retries. Backend failures surface to the
    /// caller unchanged.
    pub async fn translate(&self, question: &str) -> Result<String> {
        let raw = self.backend.complete(&self.system_prompt, question).await?;
        let sql = extract_sql(&raw);
        debug!(%sql, "extracted candidate statement");
        Ok(sql)
    }
}

/// Strip enclosing code-fence markup from a model response.
///
/// Trims the response; if it starts with a fence marker, the whole first line
/// is dropped (or just the marker when no newline follows, e.g. a one-line
/// fenced response); if it then ends with a fence marker, everything from the
/// last marker onward is dropped. The result is trimmed again. Applying this
/// to already-clean text is a no-op.
pub fn extract_sql(raw: &str) -> String {
    let mut sql = raw.trim();
    if sql.starts_with("```") {
        sql = match sql.split_once('\n') {
            Some((_fence_line, rest)) => rest,
            None => &sql[3..],
        };
    }
    if sql.ends_with("```") {
        if let Some((head, _)) = sql.rsplit_once("```") {
            sql = head;
        }
    }
    sql.trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Canned backend that records the last (system, user) pair it saw.
    struct CannedBackend {
        response: String,
        seen: Mutex<Option<(String, String)>>,
    }

    impl CannedBackend {
        fn new(response: &str) -> CannedBackend {
            CannedBackend {
                response: response.to_string(),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, system: &str, user: &str) -> Result<String> {
            *self.seen.lock().unwrap() = Some((system.to_string(), user.to_string()));
            Ok(self.response.clone())
        }
    }

    #[test]
    fn extract_passes_clean_sql_through() {
        assert_eq!(extract_sql("SELECT 1"), "SELECT 1");
        assert_eq!(extract_sql("  SELECT 1\n"), "SELECT 1");
    }

    #[test]
    fn extract_strips_fence_with_language_tag() {
        assert_eq!(extract_sql("```sql\nSELECT 1\n```"), "SELECT 1");
    }

    #[test]
    fn extract_strips_bare_fence() {
        assert_eq!(
            extract_sql("```\nSELECT id FROM email\n```"),
            "SELECT id FROM email"
        );
    }

    #[test]
    fn extract_strips_leading_fence_without_newline() {
        assert_eq!(extract_sql("```SELECT 1"), "SELECT 1");
    }

    #[test]
    fn extract_strips_trailing_fence_only() {
        assert_eq!(extract_sql("SELECT 1\n```"), "SELECT 1");
    }

    #[test]
    fn extract_drops_only_the_last_trailing_fence() {
        assert_eq!(
            extract_sql("SELECT '```' AS fence FROM email```"),
            "SELECT '```' AS fence FROM email"
        );
    }

    #[test]
    fn extract_is_idempotent() {
        let once = extract_sql("```sql\nSELECT 1\n```");
        assert_eq!(extract_sql(&once), once);
    }

    #[test]
    fn extract_of_empty_fence_is_empty() {
        assert_eq!(extract_sql("```"), "");
        assert_eq!(extract_sql("```\n```"), "");
    }

    #[tokio::test]
    async fn translate_sends_prompt_and_question() {
        let backend = Arc::new(CannedBackend::new("SELECT 1"));
        let schema = SchemaDescription::new("CREATE TABLE email (id INT);");
        let translator = Translator::new(backend.clone(), &schema);

        let sql = translator.translate("how many emails?").await.unwrap();
        assert_eq!(sql, "SELECT 1");

        let (system, user) = backend.seen.lock().unwrap().clone().unwrap();
        assert!(system.contains("CREATE TABLE email (id INT);"));
        assert!(system.contains("RULES:"));
        assert_eq!(user, "how many emails?");
    }

    #[tokio::test]
    async fn translate_unwraps_fenced_responses() {
        let backend = Arc::new(CannedBackend::new(
            "```sql\nSELECT COUNT(*) FROM email WHERE deleted = 0\n```",
        ));
        let schema = SchemaDescription::new("");
        let translator = Translator::new(backend, &schema);

        let sql = translator.translate("count emails").await.unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM email WHERE deleted = 0");
    }
}
