use bytes::Bytes;
use tracing::{debug, warn};

/// Extracts the text layer of an uploaded PDF.
///
/// Parsing runs on the blocking pool. Any failure, including a panic inside the parser,
/// yields an empty string: an unreadable upload degrades to "no text", never to an error.
pub async fn extract_pdf_text(bytes: Bytes) -> String {
    let size = bytes.len();
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await {
        Ok(Ok(text)) => {
            debug!("Extracted {} chars from a {size}-byte PDF", text.len());
            text
        }
        Ok(Err(e)) => {
            warn!("Error extracting PDF ({size} bytes): {e:?}");
            String::new()
        }
        Err(e) => {
            warn!("PDF extraction task aborted ({size} bytes): {e}");
            String::new()
        }
    }
}
