//! Console reporting for one submission. Failures end here: they are printed
//! and turned into `None`.

use crate::client::ContentClient;
use crate::content::{ContentRecord, ContentResource};
use crate::error::SubmissionError;

pub async fn submit_and_report(
    client: &ContentClient,
    record: &ContentRecord,
) -> Option<ContentResource> {
    let outcome = client.submit(record).await;
    println!("{}", render(&outcome));
    outcome.ok()
}

/// Text printed for a submission outcome.
pub fn render(outcome: &Result<ContentResource, SubmissionError>) -> String {
    match outcome {
        Ok(resource) => {
            let pretty = sonic_rs::to_string_pretty(resource)
                .unwrap_or_else(|err| format!("<unprintable response: {err}>"));
            format!("Successfully created blog post!\n{pretty}")
        }
        Err(SubmissionError::Rejected {
            status_code,
            body_text,
        }) => format!("Failed to create blog post. Status code: {status_code}\n{body_text}"),
        Err(err) => format!("An error occurred: {err}"),
    }
}
