//! Shared response plumbing for the Gemini and OpenAI HTTP APIs

/// Extract a human-readable error message from a provider error body.
///
/// Both Gemini and OpenAI report failures as `{"error": {"message": ...}}`.
/// Returns `None` if the body is not JSON or the field is absent.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = v.get("error")?.get("message")?.as_str()?;

    Some(message.to_string())
}

/// Consume a non-success response and produce an error detail string,
/// preferring the provider's own message over the bare status code.
pub(crate) async fn response_error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    error_message(&body).unwrap_or_else(|| format!("API call failed with status: {status}"))
}
